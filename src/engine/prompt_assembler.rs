// ==========================================
// 生产计划AI管制台 - 提示词组装引擎
// ==========================================
// 职责: 将分析上下文、版本对比报告与会话记录拼装为
//       发往 AI 聊天服务的单条自然语言提示词
// 口径: 会话记录按值传入，本引擎不持有任何会话状态
// ==========================================

use crate::config::AnalysisThresholds;
use crate::domain::analysis::AnalysisBundle;
use crate::domain::chat::ChatTurn;
use crate::domain::diff::format_thousands;
use crate::domain::plan::PlanRow;
use chrono::NaiveDate;
use std::collections::HashMap;

// ==========================================
// PromptAssembler - 提示词组装器
// ==========================================
pub struct PromptAssembler {
    thresholds: AnalysisThresholds,
}

impl PromptAssembler {
    /// 创建新的 PromptAssembler 实例
    pub fn new(thresholds: AnalysisThresholds) -> Self {
        Self { thresholds }
    }

    /// 组装完整提示词
    ///
    /// # 参数
    /// - question: 用户问题
    /// - rows: 当前版本计划明细 (样本来源)
    /// - bundle: 分析上下文包
    /// - comparison_text: 版本对比报告 (已渲染)，无对比时为 None
    /// - current_version: 当前查看版本
    /// - history: 客户端持有的会话记录，每次调用整体传入
    pub fn assemble(
        &self,
        question: &str,
        rows: &[PlanRow],
        bundle: &AnalysisBundle,
        comparison_text: Option<&str>,
        current_version: Option<&str>,
        history: &[ChatTurn],
    ) -> String {
        let version_label = current_version.unwrap_or("전체");

        // ===== 月度总量段 (C4) =====
        let total_text = match bundle.monthly_total {
            Some(total) => format!(
                "\n### 📊 월간 전체 총합계 (C4 셀):\n- {}: {}대\n",
                version_label,
                format_thousands(total)
            ),
            None => String::new(),
        };

        // ===== 产线月度总量段 (E5:E7) =====
        let mut line_totals_text = String::new();
        if !bundle.line_monthly_totals.is_empty() {
            line_totals_text.push_str("\n### 🏭 라인별 월 총생산량 (E5:E7 셀):\n");
            for (line, qty) in &bundle.line_monthly_totals {
                line_totals_text.push_str(&format!(
                    "- 조립{}라인: {}대\n",
                    line,
                    format_thousands(*qty)
                ));
            }
        }

        // ===== 产能说明段 =====
        let mut capa_text = String::from("\n### 🏭 라인별 생산능력 (Capa):\n");
        for info in &bundle.capacity_info {
            capa_text.push_str(&format!("- {}\n", info));
        }

        // ===== 产能预警段 =====
        let mut capa_warning = String::new();
        if !bundle.capacity_warnings.is_empty() {
            capa_warning.push_str("\n### ⚠️ Capa 초과 경고:\n");
            for warning in bundle
                .capacity_warnings
                .iter()
                .take(self.thresholds.warning_display_limit)
            {
                capa_warning.push_str(&format!("- {}\n", warning));
            }
        } else {
            capa_warning.push_str("\n### ✅ Capa 상태: 모든 라인 정상 범위 내\n");
        }

        // ===== 休息日违规段 =====
        let mut holiday_text = String::new();
        if !bundle.holiday_violations.is_empty() {
            holiday_text.push_str("\n### 🚫 휴무일 생산 계획:\n");
            for violation in bundle
                .holiday_violations
                .iter()
                .take(self.thresholds.warning_display_limit)
            {
                holiday_text.push_str(&format!("- {}\n", violation));
            }
        } else {
            holiday_text.push_str(&format!(
                "\n### ✅ 휴무일 ({}일): 위반 없음\n",
                bundle.holiday_count
            ));
        }

        // ===== 产品排行段 =====
        let mut ranking_text = String::from("\n### 📊 생산량 상위 제품:\n");
        for rank in bundle
            .product_rankings
            .iter()
            .take(self.thresholds.product_top_n)
        {
            ranking_text.push_str(&format!("- {}\n", rank));
        }

        // ===== 日别统计样本段 =====
        let mut daily_text = String::from("\n### 📅 일별 라인별 생산 통계 (샘플, 참고용):\n");
        for stat in bundle
            .daily_stats
            .iter()
            .take(self.thresholds.daily_stat_display_limit)
        {
            daily_text.push_str(&format!("- {}\n", stat));
        }

        let comparison_section = comparison_text.unwrap_or("");
        let data_context = self.build_data_sample(rows);

        let mut prompt = format!(
            r#"당신은 생산계획 분석 전문가입니다.

[현재 조회 버전]: {version_label}

{total_text}

{line_totals_text}

{comparison_section}

{capa_text}

{capa_warning}

{holiday_text}

{ranking_text}

{daily_text}

[생산계획 데이터 샘플]:
{data_context}

---

**[중요: 데이터 해석 규칙]**

1. **생산량 비교 시 반드시 C4 셀과 E5:E7 셀 값을 최우선으로 사용하세요.**
   - C4 셀: 월간 전체 총합계 (모든 라인의 합)
   - E5 셀: 1라인 월 총생산량
   - E6 셀: 2라인 월 총생산량
   - E7 셀: 3라인 월 총생산량

2. **날짜별 데이터는 참고용입니다. 특정 날짜에 생산량이 0이거나 변동이 있어도 "생산 중단"이라고 판단하지 마세요.**
   - 주말 배분 조정, 근무일 변경 등의 이유일 수 있습니다.
   - 라인의 생산 여부는 E5:E7 셀의 월 총생산량으로만 판단하세요.

3. **차수 비교 시:**
   - "전체 생산량이 줄었니?" → C4 셀 값을 비교
   - "2라인 생산량이 줄었니?" → E6 셀 값을 비교
   - 날짜별 합산값이 아닌, 엑셀에 이미 계산된 합계 셀을 신뢰하세요.

4. **답변 시 반드시 구체적인 수치를 제시하세요.**
   - "0차: 217,625대 → 1차: 197,590대 (20,035대 감소)"처럼 명확하게 표현

위 규칙을 바탕으로 사용자의 질문에 정확하게 답변해주세요.
"#
        );

        // ===== 会话记录段 (客户端重建的多轮上下文) =====
        if !history.is_empty() {
            prompt.push_str("\n[이전 대화]:\n");
            for turn in history {
                prompt.push_str(&format!("{}: {}\n", turn.role.as_str(), turn.content));
            }
        }

        prompt.push_str(&format!("\n[사용자 질문]: {}", question));
        prompt
    }

    /// 构建计划明细样本
    ///
    /// 按 (plan_date, line, product_name) 聚合求和后取前 N 组；
    /// 明细本身按日期升序入参，聚合保持首次出现顺序
    pub fn build_data_sample(&self, rows: &[PlanRow]) -> String {
        if rows.is_empty() {
            return "데이터 없음".to_string();
        }

        let mut order: Vec<(NaiveDate, i32, String)> = Vec::new();
        let mut sums: HashMap<(NaiveDate, i32, String), f64> = HashMap::new();

        for row in rows {
            let key = (row.plan_date, row.line, row.product_name.clone());
            let entry = sums.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                0.0
            });
            *entry += row.quantity;
        }

        let mut sample = String::from("plan_date line product_name quantity");
        for key in order.iter().take(self.thresholds.plan_sample_limit) {
            let quantity = sums[key];
            sample.push_str(&format!(
                "\n{} {} {} {:.0}",
                key.0, key.1, key.2, quantity
            ));
        }

        sample
    }
}
