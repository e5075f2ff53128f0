pub mod evaluator;
pub mod notifier;

pub use evaluator::exceeds_thresholds;
pub use notifier::{AlertPublisher, LogPublisher, NotifyError, SnsPublisher};
