// ==========================================
// 生产计划AI管制台 - 应用配置
// ==========================================
// 职责: 进程启动时从环境变量解析配置
// 红线: AI 服务密钥无默认值，缺失时立即失败，
//       禁止在源码中硬编码任何凭据
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 默认 AI 聊天服务地址
pub const DEFAULT_CHAT_API_URL: &str = "https://ai.potens.ai/api/chat";

/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// 默认分析期间（对齐当前计划月度）
pub const DEFAULT_PLAN_YEAR: i32 = 2025;
pub const DEFAULT_PLAN_MONTH: u32 = 8;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("环境变量 CHAT_API_KEY 未设置 (AI 服务密钥必须外部注入，无默认值)")]
    MissingApiKey,

    #[error("环境变量 {name} 取值无效: {value}")]
    InvalidValue { name: String, value: String },

    #[error("无法确定默认数据目录")]
    NoDataDir,
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 计划数据库路径
    pub db_path: String,

    /// AI 聊天服务地址
    pub chat_api_url: String,

    /// AI 聊天服务密钥 (Bearer)
    pub chat_api_key: String,

    /// 出站请求超时（秒）
    pub request_timeout_secs: u64,

    /// 分析期间: 年
    pub plan_year: i32,

    /// 分析期间: 月
    pub plan_month: u32,
}

impl AppConfig {
    /// 从环境变量解析配置
    ///
    /// # 环境变量
    /// - CHAT_API_KEY: AI 服务密钥（必填）
    /// - CHAT_API_URL: AI 服务地址（默认 potens 聊天端点）
    /// - PLAN_DB_PATH: 数据库路径（默认数据目录下 plan.db）
    /// - CHAT_TIMEOUT_SECS: 请求超时秒数（默认 60）
    /// - PLAN_YEAR / PLAN_MONTH: 分析期间（默认 2025/8）
    pub fn from_env() -> Result<Self, ConfigError> {
        let chat_api_key = std::env::var("CHAT_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let chat_api_url = std::env::var("CHAT_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_API_URL.to_string());

        let db_path = match std::env::var("PLAN_DB_PATH") {
            Ok(path) if !path.trim().is_empty() => path,
            _ => default_db_path()?,
        };

        let request_timeout_secs =
            parse_env_var("CHAT_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let plan_year = parse_env_var("PLAN_YEAR", DEFAULT_PLAN_YEAR)?;
        let plan_month: u32 = parse_env_var("PLAN_MONTH", DEFAULT_PLAN_MONTH)?;

        if !(1..=12).contains(&plan_month) {
            return Err(ConfigError::InvalidValue {
                name: "PLAN_MONTH".to_string(),
                value: plan_month.to_string(),
            });
        }

        Ok(Self {
            db_path,
            chat_api_url,
            chat_api_key,
            request_timeout_secs,
            plan_year,
            plan_month,
        })
    }
}

/// 解析数值型环境变量，未设置时取默认值
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw,
            })
        }
        _ => Ok(default),
    }
}

/// 默认数据库路径: <数据目录>/plan-ai-console/plan.db
pub fn default_db_path() -> Result<String, ConfigError> {
    let mut path: PathBuf = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    path.push("plan-ai-console");
    path.push("plan.db");
    Ok(path.to_string_lossy().into_owned())
}

// ==========================================
// AnalysisThresholds - 分析阈值配置
// ==========================================
// 说明: 90% 预警阈值与各截断上限沿用既有仪表盘的取值，
//       以可配置常量形式保留，不在代码中散落字面量
#[derive(Debug, Clone)]
pub struct AnalysisThresholds {
    /// 产能预警阈值比例 (quantity > ratio × capacity 触发)
    pub capacity_warn_ratio: f64,

    /// 产品排行/产品差异截断上限
    pub product_top_n: usize,

    /// 日别差异截断上限
    pub daily_diff_top_n: usize,

    /// 提示词中预警/违规展示上限
    pub warning_display_limit: usize,

    /// 提示词中日别统计样本上限
    pub daily_stat_display_limit: usize,

    /// 提示词中计划明细样本上限
    pub plan_sample_limit: usize,

    /// 单版本明细行查询上限 (对齐托管库配额)
    pub plan_row_limit: usize,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            capacity_warn_ratio: 0.9,
            product_top_n: 10,
            daily_diff_top_n: 5,
            warning_display_limit: 10,
            daily_stat_display_limit: 15,
            plan_sample_limit: 50,
            plan_row_limit: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = AnalysisThresholds::default();
        assert_eq!(thresholds.capacity_warn_ratio, 0.9);
        assert_eq!(thresholds.product_top_n, 10);
        assert_eq!(thresholds.daily_diff_top_n, 5);
        assert_eq!(thresholds.plan_row_limit, 2000);
    }
}
