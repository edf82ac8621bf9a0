pub mod composer;
pub mod pipeline;

pub use composer::Composer;
pub use pipeline::{DeliveryOutcome, DeliveryPipeline, DeliveryState, FailureReason, Submission};
