mod renderer;
mod view;

pub use renderer::{TranscriptRenderer, badge_label};
pub use view::TranscriptView;
