// ==========================================
// 生产计划AI管制台 - 领域层
// ==========================================
// 职责: 实体与值类型定义，不含数据访问与业务流程
// ==========================================

pub mod analysis;
pub mod chat;
pub mod diff;
pub mod plan;

// 重导出核心实体
pub use analysis::AnalysisBundle;
pub use chat::{ChatRole, ChatTurn};
pub use diff::{
    DailyDiffEntry, DiffDirection, DiffReport, LineDiffEntry, ProductDiffEntry, TotalDiff,
};
pub use plan::{DailyLineStat, LineCapacity, PlanRow, ProductSummary, WorkCalendarDay};
