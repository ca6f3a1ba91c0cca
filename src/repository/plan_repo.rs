// ==========================================
// 生产计划AI管制台 - 计划明细仓储
// ==========================================
// 表: production_plans
// 约束: 所有查询参数化; 本仓储只读
// ==========================================

use crate::domain::plan::PlanRow;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// PlanRowRepository - 计划明细仓储
// ==========================================
pub struct PlanRowRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlanRowRepository {
    /// 创建新的 PlanRowRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询某版本的全部计划明细
    ///
    /// # 说明
    /// - 按 plan_date 升序返回 (库中为 YYYY-MM-DD 文本，ISO 格式支持字符串比较)
    /// - limit 为行数上限，对齐托管库的单次查询配额
    pub fn find_by_version(&self, version: &str, limit: usize) -> RepositoryResult<Vec<PlanRow>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT version, plan_date, line, product_name, quantity
               FROM production_plans
               WHERE version = ?1
               ORDER BY plan_date ASC
               LIMIT ?2"#,
        )?;

        let rows = stmt
            .query_map(params![version, limit as i64], |row| Self::map_row(row))?
            .collect::<Result<Vec<PlanRow>, _>>()?;

        Ok(rows)
    }

    /// 列出库中存在的全部版本标签 (去重、升序)
    pub fn list_versions(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT version FROM production_plans ORDER BY version ASC",
        )?;

        let versions = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(versions)
    }

    /// 行映射
    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<PlanRow> {
        Ok(PlanRow {
            version: row.get(0)?,
            plan_date: NaiveDate::parse_from_str(&row.get::<_, String>(1)?, "%Y-%m-%d")
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        1,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
            line: row.get(2)?,
            product_name: row.get(3)?,
            quantity: row.get(4)?,
        })
    }
}
