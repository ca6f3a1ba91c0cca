// ==========================================
// 生产计划AI管制台 - 引擎层
// ==========================================
// 职责: 实现分析与对比业务规则
// 红线: Engine 不拼 SQL; 权威总量只取聚合表值
// ==========================================

pub mod context_aggregator;
pub mod error;
pub mod prompt_assembler;
pub mod version_differ;

// 重导出核心引擎
pub use context_aggregator::ContextAggregator;
pub use error::{EngineError, EngineResult};
pub use prompt_assembler::PromptAssembler;
pub use version_differ::VersionDiffer;
