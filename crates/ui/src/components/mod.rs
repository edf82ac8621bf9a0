pub mod header;
pub mod input;

pub use header::Header;
pub use input::InputBox;
