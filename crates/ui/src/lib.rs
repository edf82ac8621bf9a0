pub mod app;
pub mod calendar;
pub mod components;
pub mod event_handler;
pub mod layout;
pub mod theme;
pub mod transcript;

pub use app::App;
pub use calendar::{calendar_millis, calendar_time};
pub use event_handler::{EventHandler, KeyAction};
pub use theme::Theme;
pub use transcript::{TranscriptRenderer, TranscriptView, badge_label};
