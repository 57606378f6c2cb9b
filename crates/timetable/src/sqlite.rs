use crate::error::StoreResult;
use crate::store::TimetableStore;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

const FREE_CLASS_SQL: &str = "SELECT DISTINCT classroom FROM timetable \
     WHERE classroom NOT IN (SELECT classroom FROM timetable WHERE slot = ? AND day = ?) \
     ORDER BY classroom";

const FREE_SLOT_SQL: &str = "SELECT DISTINCT slot FROM timetable \
     WHERE slot NOT IN (SELECT slot FROM timetable WHERE class = ? AND day = ?) \
     ORDER BY slot";

const DAY_TIMETABLE_SQL: &str =
    "SELECT subject FROM timetable WHERE class = ? AND day = ? ORDER BY slot";

/// Queries a `timetable(class, day, slot, subject, classroom)` table.
#[derive(Clone)]
pub struct SqliteTimetable {
    pool: SqlitePool,
}

impl SqliteTimetable {
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        info!(url, "Connected to timetable database");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimetableStore for SqliteTimetable {
    async fn free_class(&self, slot: i64, day: &str) -> StoreResult<Vec<String>> {
        debug!(slot, day, "free_class");
        let rooms = sqlx::query_scalar::<_, String>(FREE_CLASS_SQL)
            .bind(slot)
            .bind(day)
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    async fn free_slot(&self, class: &str, day: &str) -> StoreResult<Vec<i64>> {
        debug!(class, day, "free_slot");
        let slots = sqlx::query_scalar::<_, i64>(FREE_SLOT_SQL)
            .bind(class)
            .bind(day)
            .fetch_all(&self.pool)
            .await?;
        Ok(slots)
    }

    async fn timetable_by_day(&self, class: &str, day: &str) -> StoreResult<Vec<String>> {
        debug!(class, day, "timetable_by_day");
        let subjects = sqlx::query_scalar::<_, String>(DAY_TIMETABLE_SQL)
            .bind(class)
            .bind(day)
            .fetch_all(&self.pool)
            .await?;
        Ok(subjects)
    }
}
