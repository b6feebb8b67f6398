pub mod activities;
pub mod adapters;
pub mod error;
pub mod models;

pub use error::PublishError;
pub use models::{PublishOutcome, PublishReceipt, PublishRequest, PublishingSettings};
