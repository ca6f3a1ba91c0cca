// ==========================================
// 生产计划AI管制台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + 远程聊天补全服务
// 系统定位: 决策支持系统 (分析上下文 + 版本对比 + AI 问答)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// AI 服务接入层
pub mod ai;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配与会话循环
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    AnalysisBundle, ChatRole, ChatTurn, DailyDiffEntry, DailyLineStat, DiffDirection, DiffReport,
    LineCapacity, LineDiffEntry, PlanRow, ProductDiffEntry, ProductSummary, TotalDiff,
    WorkCalendarDay,
};

// 引擎
pub use engine::{ContextAggregator, EngineError, PromptAssembler, VersionDiffer};

// API
pub use api::{ApiError, ChatApi};

// 配置
pub use config::{AnalysisThresholds, AppConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产计划AI管制台";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
