pub mod listing;
pub mod types;
