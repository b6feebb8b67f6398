pub mod publish;

pub use publish::{publish, publish_many};
