pub mod config;
pub mod error;
pub mod id;
pub mod logging;
pub mod message;
pub mod session;
pub mod transcript;

pub use config::{ChatConfig, Config, IdentityConfig, ServiceConfig};
pub use error::{Error, Result};
pub use id::{IdGenerator, SequentialIds, UuidIds};
pub use message::{Author, DEFAULT_TEMPERATURE, Message, MessageId, now_millis, welcome_messages};
pub use session::{Anonymous, Identity, SessionProvider, StaticSession};
pub use transcript::{Revision, Transcript, TranscriptStore};
