pub mod collisions;
pub mod probability;
pub mod report;

pub use collisions::{AnalyzerSettings, BirthdayCollisionAnalyzer};
