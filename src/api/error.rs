// ==========================================
// 生产计划AI管制台 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户可见的消息
// 口径: 所有错误信息必须包含显式原因; 任何错误均不终止会话
// ==========================================

use crate::ai::AiError;
use crate::engine::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 对比数据不足，向用户展示后中止本次对比
    #[error("对比数据不足: {0}")]
    DataInsufficient(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 远程服务错误
    // ==========================================
    /// 聊天服务非成功响应，状态码与响应体原样透出
    #[error("远程服务错误 (状态码 {status}): {body}")]
    RemoteService { status: u16, body: String },

    #[error("远程服务通信失败: {0}")]
    RemoteCommunication(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从下层错误转换
// ==========================================

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, key } => {
                ApiError::NotFound(format!("{} (key={})", entity, key))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::DataInsufficient(msg) => ApiError::DataInsufficient(msg),
            EngineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            EngineError::Repository(repo_err) => repo_err.into(),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::RemoteService { status, body } => ApiError::RemoteService { status, body },
            AiError::Network(msg) => ApiError::RemoteCommunication(msg),
            AiError::ClientBuild(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 渲染为面向最终用户的韩文提示行
    ///
    /// 会话循环在任何错误后继续接受输入，错误只作为普通消息展示
    pub fn to_user_message(&self) -> String {
        match self {
            ApiError::DataInsufficient(_) => "⚠️ 비교할 데이터가 부족합니다.".to_string(),
            ApiError::RemoteService { status, body } => {
                format!("⚠️ API 오류 (코드: {})\n응답: {}", status, body)
            }
            ApiError::RemoteCommunication(msg) => format!("⚠️ 통신 오류: {}", msg),
            ApiError::DatabaseError(msg) => format!("⚠️ 데이터 조회 오류: {}", msg),
            other => format!("⚠️ 오류: {}", other),
        }
    }
}
