// ==========================================
// 生产计划AI管制台 - 应用状态
// ==========================================
// 职责: 装配仓储、引擎与客户端，持有共享连接
// ==========================================

use std::sync::{Arc, Mutex};

use anyhow::Context;
use rusqlite::Connection;

use crate::ai::ChatClient;
use crate::api::ChatApi;
use crate::config::{AnalysisThresholds, AppConfig};
use crate::db;
use crate::engine::{ContextAggregator, PromptAssembler, VersionDiffer};
use crate::repository::{AggregateRepository, CalendarRepository, PlanRowRepository};

/// 应用状态
///
/// 包含聊天编排接口与共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 聊天编排API
    pub chat_api: Arc<ChatApi>,
}

impl AppState {
    /// 创建应用状态
    ///
    /// # 步骤
    /// 1. 打开数据库连接并应用统一 PRAGMA
    /// 2. 冷启动建表 (幂等)
    /// 3. 装配仓储、引擎与 AI 客户端
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        if let Some(parent) = std::path::Path::new(&config.db_path).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建数据目录: {}", parent.display()))?;
        }

        let conn = db::open_sqlite_connection(&config.db_path)
            .with_context(|| format!("无法打开数据库: {}", config.db_path))?;
        db::init_schema(&conn).context("schema 初始化失败")?;

        let conn: Arc<Mutex<Connection>> = Arc::new(Mutex::new(conn));
        let thresholds = AnalysisThresholds::default();

        let plan_repo = Arc::new(PlanRowRepository::new(Arc::clone(&conn)));
        let aggregate_repo = Arc::new(AggregateRepository::new(Arc::clone(&conn)));
        let calendar_repo = Arc::new(CalendarRepository::new(Arc::clone(&conn)));

        let aggregator = ContextAggregator::new(
            Arc::clone(&aggregate_repo),
            Arc::clone(&calendar_repo),
            thresholds.clone(),
        );
        let differ = VersionDiffer::new(
            Arc::clone(&plan_repo),
            Arc::clone(&aggregate_repo),
            thresholds.clone(),
        );
        let assembler = PromptAssembler::new(thresholds.clone());

        let client = ChatClient::new(
            &config.chat_api_url,
            &config.chat_api_key,
            config.request_timeout_secs,
        )
        .context("AI 客户端初始化失败")?;

        let chat_api = Arc::new(ChatApi::new(
            plan_repo,
            aggregator,
            differ,
            assembler,
            client,
            thresholds,
            config.plan_year,
            config.plan_month,
        ));

        Ok(Self {
            db_path: config.db_path.clone(),
            chat_api,
        })
    }
}
