// ==========================================
// 生产计划AI管制台 - API 层
// ==========================================
// 职责: 面向会话层的业务接口与错误转换
// ==========================================

pub mod chat_api;
pub mod error;

pub use chat_api::ChatApi;
pub use error::{ApiError, ApiResult};
