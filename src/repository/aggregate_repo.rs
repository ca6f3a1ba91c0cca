// ==========================================
// 生产计划AI管制台 - 预计算聚合仓储
// ==========================================
// 表: monthly_totals / line_monthly_totals /
//     line_capacities / product_summaries
// 红线: 聚合表是总量问题的唯一权威口径，仓储不做任何再计算
// ==========================================

use crate::domain::plan::{LineCapacity, ProductSummary};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// AggregateRepository - 聚合表仓储
// ==========================================
pub struct AggregateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AggregateRepository {
    /// 创建新的 AggregateRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 月度总量 (C4 单元格口径)
    ///
    /// # 返回
    /// - Ok(Some(total)): 有记录
    /// - Ok(None): 无记录 (合法状态，不是错误)
    pub fn get_monthly_total(
        &self,
        year: i32,
        month: u32,
        version: &str,
    ) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT total_quantity FROM monthly_totals
               WHERE year = ?1 AND month = ?2 AND version = ?3"#,
            params![year, month, version],
            |row| row.get::<_, i64>(0),
        ) {
            Ok(total) => Ok(Some(total)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 产线月度总量 (E5:E7 单元格口径)
    ///
    /// 仅返回有记录的产线；BTreeMap 保证按产线编号升序遍历
    pub fn get_line_monthly_totals(
        &self,
        year: i32,
        month: u32,
        version: &str,
    ) -> RepositoryResult<BTreeMap<i32, i64>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT line_number, monthly_total FROM line_monthly_totals
               WHERE year = ?1 AND month = ?2 AND version = ?3"#,
        )?;

        let totals = stmt
            .query_map(params![year, month, version], |row| {
                Ok((row.get::<_, i32>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<BTreeMap<i32, i64>, _>>()?;

        Ok(totals)
    }

    /// 产线日产能，按产线编号升序
    pub fn get_line_capacities(
        &self,
        year: i32,
        month: u32,
        version: &str,
    ) -> RepositoryResult<Vec<LineCapacity>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT line_number, daily_capacity FROM line_capacities
               WHERE year = ?1 AND month = ?2 AND version = ?3
               ORDER BY line_number ASC"#,
        )?;

        let capacities = stmt
            .query_map(params![year, month, version], |row| {
                Ok(LineCapacity {
                    line: row.get(0)?,
                    daily_capacity: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<LineCapacity>, _>>()?;

        Ok(capacities)
    }

    /// 产品月度汇总，按月总量降序，截断至前 top_n
    pub fn get_product_summaries(
        &self,
        year: i32,
        month: u32,
        version: &str,
        top_n: usize,
    ) -> RepositoryResult<Vec<ProductSummary>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT product_name, monthly_total FROM product_summaries
               WHERE year = ?1 AND month = ?2 AND version = ?3
               ORDER BY monthly_total DESC
               LIMIT ?4"#,
        )?;

        let summaries = stmt
            .query_map(params![year, month, version, top_n as i64], |row| {
                Ok(ProductSummary {
                    product_name: row.get(0)?,
                    monthly_total: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<ProductSummary>, _>>()?;

        Ok(summaries)
    }
}
