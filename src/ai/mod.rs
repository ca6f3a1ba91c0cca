// ==========================================
// 生产计划AI管制台 - AI 服务接入层
// ==========================================
// 职责: 封装对远程聊天补全服务的单次同步调用
// ==========================================

pub mod client;

pub use client::{AiError, AiResult, ChatClient};
