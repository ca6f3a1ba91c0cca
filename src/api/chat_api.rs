// ==========================================
// 生产计划AI管制台 - 聊天编排接口
// ==========================================
// 职责: 一次用户提问 -> 顺序只读查询链 -> 最多一次出站 AI 调用
// 口径: 对比失败降级为内联提示文本; 聚合上下文永不失败;
//       AI 调用失败原样透出，由会话层展示后继续
// ==========================================

use crate::ai::ChatClient;
use crate::api::error::{ApiError, ApiResult};
use crate::config::AnalysisThresholds;
use crate::domain::chat::ChatTurn;
use crate::domain::diff::DiffReport;
use crate::domain::plan::PlanRow;
use crate::engine::{ContextAggregator, EngineError, PromptAssembler, VersionDiffer};
use crate::repository::PlanRowRepository;
use std::sync::Arc;

// ==========================================
// ChatApi - 聊天编排接口
// ==========================================
pub struct ChatApi {
    plan_repo: Arc<PlanRowRepository>,
    aggregator: ContextAggregator,
    differ: VersionDiffer,
    assembler: PromptAssembler,
    client: ChatClient,
    thresholds: AnalysisThresholds,
    plan_year: i32,
    plan_month: u32,
}

impl ChatApi {
    /// 创建新的 ChatApi 实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plan_repo: Arc<PlanRowRepository>,
        aggregator: ContextAggregator,
        differ: VersionDiffer,
        assembler: PromptAssembler,
        client: ChatClient,
        thresholds: AnalysisThresholds,
        plan_year: i32,
        plan_month: u32,
    ) -> Self {
        Self {
            plan_repo,
            aggregator,
            differ,
            assembler,
            client,
            thresholds,
            plan_year,
            plan_month,
        }
    }

    /// 列出库中全部版本标签
    pub fn list_versions(&self) -> ApiResult<Vec<String>> {
        Ok(self.plan_repo.list_versions()?)
    }

    /// 版本对比 (直连接口，供 /compare 命令使用)
    pub fn compare_versions(
        &self,
        base_version: &str,
        compare_version: &str,
    ) -> ApiResult<DiffReport> {
        if base_version == compare_version {
            return Err(ApiError::InvalidInput(
                "基准版本与对比版本不能相同".to_string(),
            ));
        }

        Ok(self.differ.compare(
            self.plan_year,
            self.plan_month,
            base_version,
            compare_version,
        )?)
    }

    /// 处理一次用户提问
    ///
    /// # 参数
    /// - question: 用户问题
    /// - history: 调用方持有的会话记录，按值传入
    /// - base_version: 对比基准版本 (对比模式下)
    /// - current_version: 当前查看版本
    ///
    /// # 返回
    /// - Ok(String): AI 回复文本
    /// - Err(ApiError): 远程服务错误等，由调用方渲染为内联消息
    pub fn ask(
        &self,
        question: &str,
        history: &[ChatTurn],
        base_version: Option<&str>,
        current_version: &str,
    ) -> ApiResult<String> {
        if question.trim().is_empty() {
            return Err(ApiError::InvalidInput("问题不能为空".to_string()));
        }

        // 1. 当前版本明细 (样本来源)，查询失败降级为空
        let rows: Vec<PlanRow> = match self
            .plan_repo
            .find_by_version(current_version, self.thresholds.plan_row_limit)
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, version = current_version, "计划明细查询失败，样本降级为空");
                Vec::new()
            }
        };

        // 2. 版本对比 (对比模式且版本不同)，失败降级为内联提示文本
        let comparison_text = match base_version {
            Some(base) if base != current_version => Some(self.build_comparison_text(
                base,
                current_version,
            )),
            _ => None,
        };

        // 3. 分析上下文 (尽力而为，整体从不失败)
        let bundle = self
            .aggregator
            .build(self.plan_year, self.plan_month, current_version);

        // 4. 组装提示词并发起单次出站调用
        let prompt = self.assembler.assemble(
            question,
            &rows,
            &bundle,
            comparison_text.as_deref(),
            Some(current_version),
            history,
        );

        tracing::info!(
            version = current_version,
            compare = base_version.unwrap_or("-"),
            rows = rows.len(),
            "发起 AI 提问"
        );

        Ok(self.client.ask(&prompt)?)
    }

    /// 生成对比报告文本，任何失败降级为内联提示
    fn build_comparison_text(&self, base_version: &str, compare_version: &str) -> String {
        match self.differ.compare(
            self.plan_year,
            self.plan_month,
            base_version,
            compare_version,
        ) {
            Ok(report) => report.render_markdown(),
            Err(EngineError::DataInsufficient(detail)) => {
                tracing::warn!(detail = %detail, "版本对比数据不足");
                "⚠️ 비교할 데이터가 부족합니다.".to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "版本对比失败");
                format!("⚠️ 비교 중 오류: {}", e)
            }
        }
    }
}
