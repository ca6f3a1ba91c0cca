// ==========================================
// 生产计划AI管制台 - 计划领域模型
// ==========================================
// 口径: 一个 version 标签对应一份完整的月度计划快照
// 约束: PlanRow 一经写入不可变更，本系统只读
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PlanRow - 单条生产计划记录
// ==========================================
// 来源: 外部计划编制流程写入 production_plans 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRow {
    pub version: String,      // 版本标签 (如 "0차" / "1차")
    pub plan_date: NaiveDate, // 计划日期
    pub line: i32,            // 产线编号
    pub product_name: String, // 产品名称
    pub quantity: f64,        // 计划数量 (非负)
}

// ==========================================
// 预计算聚合表实体
// ==========================================
// 红线: monthly_totals / line_monthly_totals 是"总产量"问题的
//       唯一权威口径，禁止用明细行重新求和覆盖
//       (日明细可能因排班在非工作日之间重新分配，月总量不变)

/// 产线日产能 (line_capacities 表)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineCapacity {
    pub line: i32,
    pub daily_capacity: f64, // 台/日
}

/// 单日单线计划量 (daily_line_stats 表)
///
/// 诊断口径，仅用于产能预警与休息日检查
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLineStat {
    pub date: NaiveDate,
    pub line: i32,
    pub quantity: f64,
}

/// 工作日历 (work_calendar 表)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkCalendarDay {
    pub date: NaiveDate,
    pub is_workday: bool,
}

/// 产品月度汇总 (product_summaries 表)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_name: String,
    pub monthly_total: f64,
}
