pub mod receipt;
pub mod settings;

pub use receipt::{HtmlExport, PublishOutcome, PublishReceipt, PublishRequest};
pub use settings::{AccountCredentials, PublishingEndpoints, PublishingSettings};
