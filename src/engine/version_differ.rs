// ==========================================
// 生产计划AI管制台 - 版本差异引擎
// ==========================================
// 契约: 给定两个版本标签产出确定性的四段式 DiffReport
// 前置: 任一版本明细为空 -> DataInsufficient (拒绝输出误导性半截对比)
// 红线: 第 1/2 段只取聚合表权威值; 第 3/4 段由明细聚合，
//       其中日别差异仅供参考 (排班重分配不代表总量变化)
// ==========================================

use crate::config::AnalysisThresholds;
use crate::domain::diff::{
    DailyDiffEntry, DiffDirection, DiffReport, LineDiffEntry, ProductDiffEntry, TotalDiff,
};
use crate::domain::plan::PlanRow;
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::{AggregateRepository, PlanRowRepository};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

// ==========================================
// VersionDiffer - 版本差异引擎
// ==========================================
pub struct VersionDiffer {
    plan_repo: Arc<PlanRowRepository>,
    aggregate_repo: Arc<AggregateRepository>,
    thresholds: AnalysisThresholds,
}

impl VersionDiffer {
    /// 创建新的 VersionDiffer 实例
    pub fn new(
        plan_repo: Arc<PlanRowRepository>,
        aggregate_repo: Arc<AggregateRepository>,
        thresholds: AnalysisThresholds,
    ) -> Self {
        Self {
            plan_repo,
            aggregate_repo,
            thresholds,
        }
    }

    /// 版本对比
    ///
    /// # 参数
    /// - base_version: 基准版本标签
    /// - compare_version: 对比版本标签
    ///
    /// # 返回
    /// - Ok(DiffReport): 对比结果，字段顺序确定
    /// - Err(EngineError::DataInsufficient): 任一版本明细为空
    pub fn compare(
        &self,
        year: i32,
        month: u32,
        base_version: &str,
        compare_version: &str,
    ) -> EngineResult<DiffReport> {
        if base_version.trim().is_empty() || compare_version.trim().is_empty() {
            return Err(EngineError::InvalidInput("版本标签不能为空".to_string()));
        }

        // 明细查询失败与查询为空同样视为数据不足
        let rows_base = self.fetch_rows(base_version);
        let rows_compare = self.fetch_rows(compare_version);

        if rows_base.is_empty() || rows_compare.is_empty() {
            return Err(EngineError::DataInsufficient(format!(
                "base={} ({}行), compare={} ({}行)",
                base_version,
                rows_base.len(),
                compare_version,
                rows_compare.len()
            )));
        }

        let total = self.build_total_diff(year, month, base_version, compare_version);
        let lines = self.build_line_diffs(year, month, base_version, compare_version);
        let products = self.build_product_diffs(&rows_base, &rows_compare);
        let dailies = self.build_daily_diffs(&rows_base, &rows_compare);

        Ok(DiffReport {
            base_version: base_version.to_string(),
            compare_version: compare_version.to_string(),
            total,
            lines,
            products,
            dailies,
        })
    }

    /// 拉取版本明细，失败降级为空 (随后由空判定触发 DataInsufficient)
    fn fetch_rows(&self, version: &str) -> Vec<PlanRow> {
        match self
            .plan_repo
            .find_by_version(version, self.thresholds.plan_row_limit)
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, version, "版本明细查询失败，按空集处理");
                Vec::new()
            }
        }
    }

    // ==========================================
    // 1. 月度总量差异 (C4 单元格口径)
    // ==========================================
    fn build_total_diff(
        &self,
        year: i32,
        month: u32,
        base_version: &str,
        compare_version: &str,
    ) -> Option<TotalDiff> {
        let base_total = self.fetch_monthly_total(year, month, base_version)?;
        let compare_total = self.fetch_monthly_total(year, month, compare_version)?;

        let diff = compare_total - base_total;
        // base 为 0 时变化率定义为 0，不报错
        let diff_rate = if base_total > 0 {
            diff as f64 / base_total as f64 * 100.0
        } else {
            0.0
        };

        Some(TotalDiff {
            base_total,
            compare_total,
            diff,
            diff_rate,
            direction: DiffDirection::from_diff(diff),
        })
    }

    fn fetch_monthly_total(&self, year: i32, month: u32, version: &str) -> Option<i64> {
        match self.aggregate_repo.get_monthly_total(year, month, version) {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(error = %e, version, "月度总量查询失败，总量对比段省略");
                None
            }
        }
    }

    // ==========================================
    // 2. 产线月度总量差异 (E5:E7 单元格口径)
    // ==========================================
    // 联合两版本产线集合，按产线编号升序；缺失按 0，零差异保留
    fn build_line_diffs(
        &self,
        year: i32,
        month: u32,
        base_version: &str,
        compare_version: &str,
    ) -> Vec<LineDiffEntry> {
        let base_totals = self.fetch_line_totals(year, month, base_version);
        let compare_totals = self.fetch_line_totals(year, month, compare_version);

        let all_lines: BTreeSet<i32> = base_totals
            .keys()
            .chain(compare_totals.keys())
            .copied()
            .collect();

        all_lines
            .into_iter()
            .map(|line| {
                let base_qty = base_totals.get(&line).copied().unwrap_or(0);
                let compare_qty = compare_totals.get(&line).copied().unwrap_or(0);
                LineDiffEntry {
                    line,
                    base_qty,
                    compare_qty,
                    diff: compare_qty - base_qty,
                }
            })
            .collect()
    }

    fn fetch_line_totals(&self, year: i32, month: u32, version: &str) -> BTreeMap<i32, i64> {
        match self
            .aggregate_repo
            .get_line_monthly_totals(year, month, version)
        {
            Ok(totals) => totals,
            Err(e) => {
                tracing::warn!(error = %e, version, "产线月度总量查询失败，按空集处理");
                BTreeMap::new()
            }
        }
    }

    // ==========================================
    // 3. 产品差异 (明细按产品聚合)
    // ==========================================
    // 仅保留非零差异; 按 |diff| 降序稳定排序，截断至前 N;
    // 并列时保持首次出现顺序 (基准版本明细在前)
    fn build_product_diffs(
        &self,
        rows_base: &[PlanRow],
        rows_compare: &[PlanRow],
    ) -> Vec<ProductDiffEntry> {
        let mut order: Vec<String> = Vec::new();
        let mut sums: HashMap<String, (f64, f64)> = HashMap::new();

        for row in rows_base {
            let entry = sums.entry(row.product_name.clone()).or_insert_with(|| {
                order.push(row.product_name.clone());
                (0.0, 0.0)
            });
            entry.0 += row.quantity;
        }
        for row in rows_compare {
            let entry = sums.entry(row.product_name.clone()).or_insert_with(|| {
                order.push(row.product_name.clone());
                (0.0, 0.0)
            });
            entry.1 += row.quantity;
        }

        let mut changes: Vec<ProductDiffEntry> = order
            .into_iter()
            .filter_map(|product_name| {
                let (base_qty, compare_qty) = sums[&product_name];
                let diff = compare_qty - base_qty;
                if diff != 0.0 {
                    Some(ProductDiffEntry {
                        product_name,
                        base_qty,
                        compare_qty,
                        diff,
                    })
                } else {
                    None
                }
            })
            .collect();

        changes.sort_by(|a, b| {
            b.diff
                .abs()
                .partial_cmp(&a.diff.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        changes.truncate(self.thresholds.product_top_n);
        changes
    }

    // ==========================================
    // 4. 日别差异 (明细按日期聚合，参考口径)
    // ==========================================
    // 仅保留非零差异; 按 |diff| 降序稳定排序，截断至前 N;
    // 并列时保持日期升序 (BTreeMap 遍历顺序)
    fn build_daily_diffs(
        &self,
        rows_base: &[PlanRow],
        rows_compare: &[PlanRow],
    ) -> Vec<DailyDiffEntry> {
        let mut sums: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

        for row in rows_base {
            sums.entry(row.plan_date).or_insert((0.0, 0.0)).0 += row.quantity;
        }
        for row in rows_compare {
            sums.entry(row.plan_date).or_insert((0.0, 0.0)).1 += row.quantity;
        }

        let mut changes: Vec<DailyDiffEntry> = sums
            .into_iter()
            .filter_map(|(date, (base_qty, compare_qty))| {
                let diff = compare_qty - base_qty;
                if diff != 0.0 {
                    Some(DailyDiffEntry {
                        date,
                        base_qty,
                        compare_qty,
                        diff,
                    })
                } else {
                    None
                }
            })
            .collect();

        changes.sort_by(|a, b| {
            b.diff
                .abs()
                .partial_cmp(&a.diff.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        changes.truncate(self.thresholds.daily_diff_top_n);
        changes
    }
}
