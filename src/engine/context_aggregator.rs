// ==========================================
// 生产计划AI管制台 - 分析上下文聚合引擎
// ==========================================
// 契约: 给定 (year, month, version) 产出 AnalysisBundle
// 口径: 整体从不失败 —— 任一查询失败降级为该字段的空值，
//       记录 warn 日志后继续 (部分上下文优于没有上下文)
// 红线: 月度/产线总量只取聚合表，不做明细重算
// ==========================================

use crate::config::AnalysisThresholds;
use crate::domain::analysis::AnalysisBundle;
use crate::repository::{AggregateRepository, CalendarRepository};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// ==========================================
// ContextAggregator - 上下文聚合引擎
// ==========================================
pub struct ContextAggregator {
    aggregate_repo: Arc<AggregateRepository>,
    calendar_repo: Arc<CalendarRepository>,
    thresholds: AnalysisThresholds,
}

impl ContextAggregator {
    /// 创建新的 ContextAggregator 实例
    pub fn new(
        aggregate_repo: Arc<AggregateRepository>,
        calendar_repo: Arc<CalendarRepository>,
        thresholds: AnalysisThresholds,
    ) -> Self {
        Self {
            aggregate_repo,
            calendar_repo,
            thresholds,
        }
    }

    /// 构建分析上下文包
    ///
    /// # 降级策略
    /// 每个字段独立查询、独立降级；本方法不返回 Result
    pub fn build(&self, year: i32, month: u32, version: &str) -> AnalysisBundle {
        let mut bundle = AnalysisBundle::default();

        // ===== 月度总量 (C4) =====
        match self.aggregate_repo.get_monthly_total(year, month, version) {
            Ok(total) => bundle.monthly_total = total,
            Err(e) => {
                tracing::warn!(error = %e, version, "月度总量查询失败，降级为缺失");
            }
        }

        // ===== 产线月度总量 (E5:E7) =====
        match self
            .aggregate_repo
            .get_line_monthly_totals(year, month, version)
        {
            Ok(totals) => bundle.line_monthly_totals = totals,
            Err(e) => {
                tracing::warn!(error = %e, version, "产线月度总量查询失败，降级为空");
            }
        }

        // ===== 产线日产能 =====
        let mut capacity_by_line: HashMap<i32, f64> = HashMap::new();
        match self.aggregate_repo.get_line_capacities(year, month, version) {
            Ok(capacities) => {
                for capacity in capacities {
                    capacity_by_line.insert(capacity.line, capacity.daily_capacity);
                    bundle.capacity_info.push(format!(
                        "조립{}라인: {:.0}대/일",
                        capacity.line, capacity.daily_capacity
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, version, "产线日产能查询失败，降级为空");
            }
        }

        // ===== 日别统计 + 产能预警 =====
        let daily_stats = match self
            .calendar_repo
            .get_daily_line_stats(year, month, version)
        {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, version, "日别统计查询失败，降级为空");
                Vec::new()
            }
        };

        for stat in &daily_stats {
            bundle.daily_stats.push(format!(
                "{} 조립{}라인: {:.0}대",
                stat.date, stat.line, stat.quantity
            ));

            if let Some(&capacity) = capacity_by_line.get(&stat.line) {
                // 产能为 0 时使用率视为 0，永不触发预警
                if capacity > 0.0
                    && stat.quantity > capacity * self.thresholds.capacity_warn_ratio
                {
                    let usage_rate = stat.quantity / capacity * 100.0;
                    bundle.capacity_warnings.push(format!(
                        "⚠️ {} 조립{}라인: {:.0}대 (Capa {:.0}대의 {:.1}%)",
                        stat.date, stat.line, stat.quantity, capacity, usage_rate
                    ));
                }
            }
        }

        // ===== 工作日历 + 休息日违规 =====
        let mut holiday_dates: HashSet<NaiveDate> = HashSet::new();
        match self.calendar_repo.get_work_calendar(year, month, version) {
            Ok(days) => {
                for day in days {
                    if !day.is_workday {
                        holiday_dates.insert(day.date);
                    }
                }
                bundle.holiday_count = holiday_dates.len();
            }
            Err(e) => {
                tracing::warn!(error = %e, version, "工作日历查询失败，降级为空");
            }
        }

        for stat in &daily_stats {
            if holiday_dates.contains(&stat.date) && stat.quantity > 0.0 {
                bundle.holiday_violations.push(format!(
                    "🚫 {} (휴무일): 조립{}라인 {:.0}대 계획됨",
                    stat.date, stat.line, stat.quantity
                ));
            }
        }

        // ===== 产品排行 =====
        match self.aggregate_repo.get_product_summaries(
            year,
            month,
            version,
            self.thresholds.product_top_n,
        ) {
            Ok(summaries) => {
                for (idx, product) in summaries.iter().enumerate() {
                    bundle.product_rankings.push(format!(
                        "{}위: {} ({:.0}대)",
                        idx + 1,
                        product.product_name,
                        product.monthly_total
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, version, "产品排行查询失败，降级为空");
            }
        }

        bundle
    }
}
