pub mod loader;
pub mod records;

pub use loader::{load_dir, IngestStats};
pub use records::{flatten_match, RawMatch, Skip};
