// ==========================================
// 生产计划AI管制台 - 引擎层错误类型
// ==========================================
// 口径: DataInsufficient 面向用户提示，其余为内部故障
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 对比所需的快照数据不足 (任一版本明细为空)
    #[error("对比数据不足: {0}")]
    DataInsufficient(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
