// Scheduled publishing module: the evaluator pass and the polling driver

pub mod driver;
pub mod evaluator;

pub use driver::{DriverConfig, PublishDriver};
pub use evaluator::{PublishEvaluator, PublishSummary, ScheduledPublisher};
