use crate::error::StoreResult;
use async_trait::async_trait;

/// One scheduled period: `class` studies `subject` in `classroom` during `slot` on `day`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableEntry {
    pub class: String,
    pub day: String,
    pub slot: i64,
    pub subject: String,
    pub classroom: String,
}

/// Read-only timetable lookups.
#[async_trait]
pub trait TimetableStore: Send + Sync {
    /// Classrooms with nothing scheduled in `slot` on `day`.
    async fn free_class(&self, slot: i64, day: &str) -> StoreResult<Vec<String>>;

    /// Slots in which `class` has nothing scheduled on `day`.
    async fn free_slot(&self, class: &str, day: &str) -> StoreResult<Vec<i64>>;

    /// Subjects `class` has on `day`, in slot order.
    async fn timetable_by_day(&self, class: &str, day: &str) -> StoreResult<Vec<String>>;
}
