// ==========================================
// 生产计划AI管制台 - AI 聊天服务客户端
// ==========================================
// 协议: 单次 POST {"prompt": ...}，Bearer 鉴权，
//       响应 {"message": ...}；无流式、无服务端会话状态
// 口径: 非 2xx 原样透出状态码与响应体，不做重试
// ==========================================

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// AI 客户端错误类型
#[derive(Error, Debug)]
pub enum AiError {
    /// 远程服务返回非成功状态，状态码与响应体原样保留
    #[error("远程服务错误 (状态码 {status}): {body}")]
    RemoteService { status: u16, body: String },

    #[error("网络请求失败: {0}")]
    Network(String),

    #[error("客户端初始化失败: {0}")]
    ClientBuild(String),
}

/// Result 类型别名
pub type AiResult<T> = Result<T, AiError>;

/// 聊天服务响应体
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<String>,
}

// ==========================================
// ChatClient - 聊天补全客户端
// ==========================================
pub struct ChatClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl ChatClient {
    /// 创建新的 ChatClient 实例
    ///
    /// # 参数
    /// - endpoint: 聊天服务地址
    /// - api_key: Bearer 密钥 (进程启动时注入，见 AppConfig)
    /// - timeout_secs: 单次请求固定超时
    pub fn new(endpoint: &str, api_key: &str, timeout_secs: u64) -> AiResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// 发送提示词并取回回复
    ///
    /// # 返回
    /// - Ok(String): 回复文本，响应缺少 message 字段时回退为固定提示
    /// - Err(AiError): 网络故障或非 2xx 状态
    pub fn ask(&self, prompt: &str) -> AiResult<String> {
        tracing::debug!(prompt_len = prompt.len(), "发送聊天请求");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({ "prompt": prompt }))
            .send()
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::RemoteService {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body).unwrap_or(ChatResponse {
            message: None,
        });

        Ok(parsed.message.unwrap_or_else(|| "응답 없음".to_string()))
    }
}
