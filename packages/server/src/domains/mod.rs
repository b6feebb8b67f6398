pub mod generation;
pub mod publishing;
