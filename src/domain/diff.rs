// ==========================================
// 生产计划AI管制台 - 版本差异模型
// ==========================================
// 口径: 四段式差异报告
//   1. 月度总量 (权威)  2. 产线月度总量 (权威)
//   3. 产品差异 (明细行聚合)  4. 日别差异 (仅供参考)
// 红线: 1/2 段只取预计算单元格值，禁止明细重新求和
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 差异方向
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffDirection {
    Increase,
    Decrease,
    Unchanged,
}

impl DiffDirection {
    pub fn from_diff(diff: i64) -> Self {
        match diff.cmp(&0) {
            std::cmp::Ordering::Greater => DiffDirection::Increase,
            std::cmp::Ordering::Less => DiffDirection::Decrease,
            std::cmp::Ordering::Equal => DiffDirection::Unchanged,
        }
    }
}

/// 月度总量差异 (C4 单元格口径)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalDiff {
    pub base_total: i64,
    pub compare_total: i64,
    pub diff: i64,
    /// 变化率 (%)，base_total 为 0 时定义为 0
    pub diff_rate: f64,
    pub direction: DiffDirection,
}

/// 产线月度总量差异行 (E5:E7 单元格口径)
///
/// 联合两个版本的产线集合，缺失侧按 0 计；diff 为 0 仍保留输出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDiffEntry {
    pub line: i32,
    pub base_qty: i64,
    pub compare_qty: i64,
    pub diff: i64,
}

/// 产品差异行 (明细行按产品聚合，仅保留非零差异)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDiffEntry {
    pub product_name: String,
    pub base_qty: f64,
    pub compare_qty: f64,
    pub diff: f64,
}

/// 日别差异行 (明细行按日期聚合，仅保留非零差异，参考口径)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyDiffEntry {
    pub date: NaiveDate,
    pub base_qty: f64,
    pub compare_qty: f64,
    pub diff: f64,
}

// ==========================================
// DiffReport - 版本差异报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    pub base_version: String,
    pub compare_version: String,
    /// 两个版本的权威总量均有记录时才有值
    pub total: Option<TotalDiff>,
    /// 产线差异，按产线编号升序
    pub lines: Vec<LineDiffEntry>,
    /// 产品差异，按 |diff| 降序 (稳定排序)，截断至前 N
    pub products: Vec<ProductDiffEntry>,
    /// 日别差异，按 |diff| 降序 (稳定排序)，截断至前 N
    pub dailies: Vec<DailyDiffEntry>,
}

impl DiffReport {
    /// 渲染为韩文 Markdown 报告
    ///
    /// 输出格式沿用既有仪表盘的报告版式；
    /// 相同输入数据下逐字节确定 (无时间戳、无随机顺序)
    pub fn render_markdown(&self) -> String {
        let mut result = format!(
            "## 📊 {} → {} 변경 분석\n\n",
            self.base_version, self.compare_version
        );

        // ===== 1. 月度总量 (C4) =====
        if let Some(total) = &self.total {
            result += "### 📊 월간 전체 총합계 (C4 셀 기준):\n\n";
            result += &format!(
                "- **{}**: {}대\n",
                self.base_version,
                format_thousands(total.base_total)
            );
            result += &format!(
                "- **{}**: {}대\n",
                self.compare_version,
                format_thousands(total.compare_total)
            );
            result += &format!(
                "- **변화량**: {}대 ({:+.1}%)\n\n",
                format_signed_thousands(total.diff),
                total.diff_rate
            );

            match total.direction {
                DiffDirection::Decrease => {
                    result += &format!(
                        "✅ 전체 생산량이 **{}대 감소**했습니다.\n\n",
                        format_thousands(total.diff.abs())
                    );
                }
                DiffDirection::Increase => {
                    result += &format!(
                        "📈 전체 생산량이 **{}대 증가**했습니다.\n\n",
                        format_thousands(total.diff)
                    );
                }
                DiffDirection::Unchanged => {
                    result += "➡️ 전체 생산량은 동일합니다.\n\n";
                }
            }
        }

        // ===== 2. 产线月度总量 (E5:E7) =====
        if !self.lines.is_empty() {
            result += "### 🏭 라인별 월 총생산량 (E5:E7 셀 기준):\n\n";

            for entry in &self.lines {
                if entry.diff != 0 {
                    let emoji = if entry.diff > 0 { "📈" } else { "📉" };
                    result += &format!(
                        "{} **조립{}라인**: {}대 → {}대 ({}대)\n",
                        emoji,
                        entry.line,
                        format_thousands(entry.base_qty),
                        format_thousands(entry.compare_qty),
                        format_signed_thousands(entry.diff)
                    );
                } else {
                    result += &format!(
                        "➡️ **조립{}라인**: {}대 (변동 없음)\n",
                        entry.line,
                        format_thousands(entry.base_qty)
                    );
                }
            }

            result += "\n";
        }

        // ===== 3. 产品差异 =====
        if !self.products.is_empty() {
            result += "### 🔄 제품별 수량 변경 (상위 10개):\n\n";
            for entry in &self.products {
                let emoji = if entry.diff > 0.0 { "📈" } else { "📉" };
                result += &format!("{} **{}**: ", emoji, entry.product_name);
                result += &format!(
                    "{:.0}대 → {:.0}대 ",
                    entry.base_qty, entry.compare_qty
                );
                result += &format!("({:+.0}대)\n", entry.diff);
            }
        }

        // ===== 4. 日别差异 (参考口径) =====
        result += "\n### 📅 일별 생산량 변경 (상위 5일, 참고용):\n\n";

        for entry in &self.dailies {
            let emoji = if entry.diff > 0.0 { "📈" } else { "📉" };
            result += &format!(
                "{} {}: {:.0}대 → {:.0}대 ({:+.0}대)\n",
                emoji, entry.date, entry.base_qty, entry.compare_qty, entry.diff
            );
        }

        result += "\n**⚠️ 중요**: 특정 날짜의 생산량 변화는 주말 배분 조정 등의 이유일 수 있으며, \
                   생산 중단을 의미하지 않습니다. 전체 생산량은 위의 C4 셀과 E5:E7 셀 기준으로 \
                   판단해주세요.\n";

        result
    }
}

// ==========================================
// 数字格式化辅助
// ==========================================

/// 千分位格式化: 217625 -> "217,625"
pub fn format_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// 带符号千分位: 20035 -> "+20,035", -20035 -> "-20,035"
pub fn format_signed_thousands(value: i64) -> String {
    if value >= 0 {
        format!("+{}", format_thousands(value))
    } else {
        format_thousands(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(217625), "217,625");
        assert_eq!(format_thousands(-20035), "-20,035");
    }

    #[test]
    fn test_format_signed_thousands() {
        assert_eq!(format_signed_thousands(20035), "+20,035");
        assert_eq!(format_signed_thousands(-20035), "-20,035");
        assert_eq!(format_signed_thousands(0), "+0");
    }

    #[test]
    fn test_diff_direction() {
        assert_eq!(DiffDirection::from_diff(1), DiffDirection::Increase);
        assert_eq!(DiffDirection::from_diff(-1), DiffDirection::Decrease);
        assert_eq!(DiffDirection::from_diff(0), DiffDirection::Unchanged);
    }
}
