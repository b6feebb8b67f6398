pub mod edit;
pub mod generate;
pub mod key;
pub mod publish;
