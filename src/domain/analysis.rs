// ==========================================
// 生产计划AI管制台 - 分析上下文模型
// ==========================================
// 用途: ContextAggregator 输出的结构化分析包
// 约束: 任一字段缺失均为合法状态 (尽力而为的部分上下文)
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// AnalysisBundle - 分析上下文包
// ==========================================
// 字段口径:
// - monthly_total: 月度总量权威值 (C4 单元格口径)，缺失 ≠ 错误
// - line_monthly_totals: 产线月度总量权威值 (E5:E7 单元格口径)
// - 其余均为面向提示词的展示字符串
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisBundle {
    /// 月度总量 (权威口径)，未录入时为 None
    pub monthly_total: Option<i64>,

    /// 产线 -> 月度总量，仅含有记录的产线
    pub line_monthly_totals: BTreeMap<i32, i64>,

    /// 产线日产能说明行
    pub capacity_info: Vec<String>,

    /// 产能预警: 单日计划量超过日产能 90% 的记录
    pub capacity_warnings: Vec<String>,

    /// 休息日违规: 非工作日仍有计划量的记录
    pub holiday_violations: Vec<String>,

    /// 产品产量排行 (前 N 名)
    pub product_rankings: Vec<String>,

    /// 日别产线统计展示行 (参考口径)
    pub daily_stats: Vec<String>,

    /// 当月休息日天数 (去重后的非工作日日期数)
    pub holiday_count: usize,
}

impl AnalysisBundle {
    /// 是否完全为空 (所有查询均失败或无数据)
    pub fn is_empty(&self) -> bool {
        self.monthly_total.is_none()
            && self.line_monthly_totals.is_empty()
            && self.capacity_info.is_empty()
            && self.capacity_warnings.is_empty()
            && self.holiday_violations.is_empty()
            && self.product_rankings.is_empty()
            && self.daily_stats.is_empty()
            && self.holiday_count == 0
    }
}
