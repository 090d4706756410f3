pub mod event_table;

pub use event_table::{BallRow, EventTable};
