pub mod api_response;
pub mod credential;
pub mod types;
pub mod utils;

pub use api_response::*;
pub use credential::*;
pub use types::*;
pub use utils::*;
