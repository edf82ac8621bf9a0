pub mod adapter;
pub mod mock;
pub mod types;

pub use adapter::{ChatBackend, HttpBackend};
pub use mock::{MockBackend, MockReply};
pub use types::SendMessageResponse;

pub use banter_core::{Error, Result};
