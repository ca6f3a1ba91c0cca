// ==========================================
// 生产计划AI管制台 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，避免与外部计划导入进程并发时的偶发 busy 错误
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化计划数据 schema（幂等）
///
/// 表结构对齐外部托管库的七张表；本系统只读，
/// 建表仅用于本地库缺表时的冷启动与测试环境
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS production_plans (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            version      TEXT NOT NULL,
            plan_date    TEXT NOT NULL,
            line         INTEGER NOT NULL,
            product_name TEXT NOT NULL,
            quantity     REAL NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_production_plans_version_date
            ON production_plans(version, plan_date);

        CREATE TABLE IF NOT EXISTS monthly_totals (
            year           INTEGER NOT NULL,
            month          INTEGER NOT NULL,
            version        TEXT NOT NULL,
            total_quantity INTEGER NOT NULL,
            PRIMARY KEY (year, month, version)
        );

        CREATE TABLE IF NOT EXISTS line_monthly_totals (
            year          INTEGER NOT NULL,
            month         INTEGER NOT NULL,
            version       TEXT NOT NULL,
            line_number   INTEGER NOT NULL,
            monthly_total INTEGER NOT NULL,
            PRIMARY KEY (year, month, version, line_number)
        );

        CREATE TABLE IF NOT EXISTS line_capacities (
            year           INTEGER NOT NULL,
            month          INTEGER NOT NULL,
            version        TEXT NOT NULL,
            line_number    INTEGER NOT NULL,
            daily_capacity REAL NOT NULL,
            PRIMARY KEY (year, month, version, line_number)
        );

        CREATE TABLE IF NOT EXISTS daily_line_stats (
            date           TEXT NOT NULL,
            year           INTEGER NOT NULL,
            month          INTEGER NOT NULL,
            version        TEXT NOT NULL,
            line_number    INTEGER NOT NULL,
            total_quantity REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (date, version, line_number)
        );

        CREATE TABLE IF NOT EXISTS work_calendar (
            date       TEXT NOT NULL,
            year       INTEGER NOT NULL,
            month      INTEGER NOT NULL,
            version    TEXT NOT NULL,
            is_workday INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (date, version)
        );

        CREATE TABLE IF NOT EXISTS product_summaries (
            year          INTEGER NOT NULL,
            month         INTEGER NOT NULL,
            version       TEXT NOT NULL,
            product_name  TEXT NOT NULL,
            monthly_total REAL NOT NULL,
            PRIMARY KEY (year, month, version, product_name)
        );
        "#,
    )?;

    Ok(())
}
