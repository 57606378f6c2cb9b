use crate::error::StoreResult;
use crate::store::{TimetableEntry, TimetableStore};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Answers the same queries as the SQL store from rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTimetable {
    entries: Vec<TimetableEntry>,
}

impl MemoryTimetable {
    pub fn new(entries: Vec<TimetableEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl TimetableStore for MemoryTimetable {
    async fn free_class(&self, slot: i64, day: &str) -> StoreResult<Vec<String>> {
        let busy: BTreeSet<&str> = self
            .entries
            .iter()
            .filter(|e| e.slot == slot && e.day == day)
            .map(|e| e.classroom.as_str())
            .collect();
        let rooms: BTreeSet<&str> = self
            .entries
            .iter()
            .map(|e| e.classroom.as_str())
            .filter(|room| !busy.contains(room))
            .collect();
        Ok(rooms.into_iter().map(String::from).collect())
    }

    async fn free_slot(&self, class: &str, day: &str) -> StoreResult<Vec<i64>> {
        let busy: BTreeSet<i64> = self
            .entries
            .iter()
            .filter(|e| e.class == class && e.day == day)
            .map(|e| e.slot)
            .collect();
        let slots: BTreeSet<i64> = self
            .entries
            .iter()
            .map(|e| e.slot)
            .filter(|slot| !busy.contains(slot))
            .collect();
        Ok(slots.into_iter().collect())
    }

    async fn timetable_by_day(&self, class: &str, day: &str) -> StoreResult<Vec<String>> {
        let mut lessons: Vec<&TimetableEntry> = self
            .entries
            .iter()
            .filter(|e| e.class == class && e.day == day)
            .collect();
        lessons.sort_by_key(|e| e.slot);
        Ok(lessons.into_iter().map(|e| e.subject.clone()).collect())
    }
}
