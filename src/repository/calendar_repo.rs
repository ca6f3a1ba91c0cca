// ==========================================
// 生产计划AI管制台 - 日历与日统计仓储
// ==========================================
// 表: daily_line_stats / work_calendar
// 口径: 日明细为诊断参考值，禁止求和后顶替聚合表总量
// ==========================================

use crate::domain::plan::{DailyLineStat, WorkCalendarDay};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// CalendarRepository - 日历/日统计仓储
// ==========================================
pub struct CalendarRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CalendarRepository {
    /// 创建新的 CalendarRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 当月日别产线统计，按日期、产线升序
    pub fn get_daily_line_stats(
        &self,
        year: i32,
        month: u32,
        version: &str,
    ) -> RepositoryResult<Vec<DailyLineStat>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT date, line_number, total_quantity FROM daily_line_stats
               WHERE year = ?1 AND month = ?2 AND version = ?3
               ORDER BY date ASC, line_number ASC"#,
        )?;

        let stats = stmt
            .query_map(params![year, month, version], |row| {
                Ok(DailyLineStat {
                    date: Self::parse_date(row, 0)?,
                    line: row.get(1)?,
                    quantity: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<DailyLineStat>, _>>()?;

        Ok(stats)
    }

    /// 当月工作日历，按日期升序
    pub fn get_work_calendar(
        &self,
        year: i32,
        month: u32,
        version: &str,
    ) -> RepositoryResult<Vec<WorkCalendarDay>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT date, is_workday FROM work_calendar
               WHERE year = ?1 AND month = ?2 AND version = ?3
               ORDER BY date ASC"#,
        )?;

        let days = stmt
            .query_map(params![year, month, version], |row| {
                Ok(WorkCalendarDay {
                    date: Self::parse_date(row, 0)?,
                    is_workday: row.get::<_, i32>(1)? == 1,
                })
            })?
            .collect::<Result<Vec<WorkCalendarDay>, _>>()?;

        Ok(days)
    }

    /// 日期字段解析 (库中为 YYYY-MM-DD 文本)
    fn parse_date(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
        NaiveDate::parse_from_str(&row.get::<_, String>(idx)?, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
    }
}
