pub mod grouping;
pub mod ingest;
pub mod models;

pub use grouping::SquadGrouper;
pub use ingest::{load_roster, RosterColumns};
pub use models::{BirthdayKey, Squad};
