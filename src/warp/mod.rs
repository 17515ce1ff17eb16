pub mod engine;

pub use engine::{reproject, reproject_into, WarpStats};
