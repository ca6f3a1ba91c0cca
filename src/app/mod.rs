// ==========================================
// 生产计划AI管制台 - 应用层
// ==========================================
// 职责: 应用装配与会话循环支撑
// ==========================================

pub mod state;

pub use state::AppState;
