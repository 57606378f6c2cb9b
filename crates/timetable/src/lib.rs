pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryTimetable;
pub use sqlite::SqliteTimetable;
pub use store::{TimetableEntry, TimetableStore};
