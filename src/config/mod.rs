// ==========================================
// 生产计划AI管制台 - 配置层
// ==========================================
// 职责: 环境变量解析与分析阈值管理
// ==========================================

pub mod app_config;

pub use app_config::{AnalysisThresholds, AppConfig, ConfigError};
