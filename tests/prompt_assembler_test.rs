// ==========================================
// PromptAssembler 集成测试
// ==========================================
// 测试目标: 验证提示词分段、截断上限与会话记录嵌入
// ==========================================

use chrono::NaiveDate;
use plan_ai_console::config::AnalysisThresholds;
use plan_ai_console::domain::analysis::AnalysisBundle;
use plan_ai_console::domain::chat::ChatTurn;
use plan_ai_console::domain::plan::PlanRow;
use plan_ai_console::engine::PromptAssembler;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn plan_row(plan_date: NaiveDate, line: i32, product_name: &str, quantity: f64) -> PlanRow {
    PlanRow {
        version: "1차".to_string(),
        plan_date,
        line,
        product_name: product_name.to_string(),
        quantity,
    }
}

#[test]
fn test_prompt_sections_present() {
    let assembler = PromptAssembler::new(AnalysisThresholds::default());

    let mut bundle = AnalysisBundle::default();
    bundle.monthly_total = Some(197590);
    bundle.line_monthly_totals.insert(1, 80000);
    bundle.line_monthly_totals.insert(2, 70000);
    bundle.capacity_info.push("조립1라인: 1000대/일".to_string());
    bundle.product_rankings.push("1위: PRODUCT-A (5000대)".to_string());
    bundle.holiday_count = 5;

    let rows = vec![plan_row(date(2025, 8, 1), 1, "PRODUCT-A", 120.0)];
    let comparison = "## 📊 0차 → 1차 변경 분석\n";

    let prompt = assembler.assemble(
        "전체 생산량이 줄었니?",
        &rows,
        &bundle,
        Some(comparison),
        Some("1차"),
        &[],
    );

    assert!(prompt.contains("[현재 조회 버전]: 1차"));
    assert!(prompt.contains("### 📊 월간 전체 총합계 (C4 셀):\n- 1차: 197,590대"));
    assert!(prompt.contains("- 조립1라인: 80,000대"));
    assert!(prompt.contains("- 조립2라인: 70,000대"));
    assert!(prompt.contains("## 📊 0차 → 1차 변경 분석"));
    assert!(prompt.contains("- 조립1라인: 1000대/일"));
    // 无预警/违规时的正常状态行
    assert!(prompt.contains("### ✅ Capa 상태: 모든 라인 정상 범위 내"));
    assert!(prompt.contains("### ✅ 휴무일 (5일): 위반 없음"));
    assert!(prompt.contains("- 1위: PRODUCT-A (5000대)"));
    // 数据解释规则
    assert!(prompt.contains("[중요: 데이터 해석 규칙]"));
    assert!(prompt.contains("C4 셀과 E5:E7 셀 값을 최우선으로 사용하세요"));
    // 明细样本与用户问题
    assert!(prompt.contains("[생산계획 데이터 샘플]:"));
    assert!(prompt.contains("2025-08-01 1 PRODUCT-A 120"));
    assert!(prompt.contains("[사용자 질문]: 전체 생산량이 줄었니?"));
}

#[test]
fn test_prompt_display_limits() {
    let assembler = PromptAssembler::new(AnalysisThresholds::default());

    let mut bundle = AnalysisBundle::default();
    for i in 0..12 {
        bundle
            .capacity_warnings
            .push(format!("⚠️ 2025-08-{:02} 조립1라인 경고", i + 1));
        bundle
            .holiday_violations
            .push(format!("🚫 2025-08-{:02} 위반", i + 1));
    }
    for i in 0..20 {
        bundle.daily_stats.push(format!("stat-{:02}", i));
    }

    let prompt = assembler.assemble("q", &[], &bundle, None, Some("0차"), &[]);

    // 预警/违规各展示前 10 条
    assert_eq!(prompt.matches("- ⚠️").count(), 10);
    assert_eq!(prompt.matches("- 🚫").count(), 10);
    // 日别统计样本前 15 条
    assert_eq!(prompt.matches("- stat-").count(), 15);
    assert!(prompt.contains("- stat-14"));
    assert!(!prompt.contains("- stat-15"));
}

#[test]
fn test_data_sample_grouped_and_capped() {
    let assembler = PromptAssembler::new(AnalysisThresholds::default());

    // 同一 (日期, 产线, 产品) 的两行聚合为一条样本
    let mut rows = vec![
        plan_row(date(2025, 8, 1), 1, "A", 30.0),
        plan_row(date(2025, 8, 1), 1, "A", 20.0),
    ];
    for day in 2..=28u32 {
        for line in 1..=3 {
            rows.push(plan_row(date(2025, 8, day), line, "B", 10.0));
        }
    }

    let sample = assembler.build_data_sample(&rows);
    let lines: Vec<&str> = sample.lines().collect();

    // 表头 + 上限 50 组
    assert_eq!(lines[0], "plan_date line product_name quantity");
    assert_eq!(lines.len(), 51);
    assert_eq!(lines[1], "2025-08-01 1 A 50");
}

#[test]
fn test_data_sample_empty() {
    let assembler = PromptAssembler::new(AnalysisThresholds::default());
    assert_eq!(assembler.build_data_sample(&[]), "데이터 없음");

    let prompt = assembler.assemble("q", &[], &AnalysisBundle::default(), None, None, &[]);
    assert!(prompt.contains("[현재 조회 버전]: 전체"));
    assert!(prompt.contains("데이터 없음"));
}

#[test]
fn test_history_embedded_in_order() {
    let assembler = PromptAssembler::new(AnalysisThresholds::default());

    let history = vec![
        ChatTurn::user("어제 뭐 물어봤지?"),
        ChatTurn::assistant("생산량 질문이었어요."),
    ];

    let prompt = assembler.assemble(
        "계속 설명해줘",
        &[],
        &AnalysisBundle::default(),
        None,
        Some("1차"),
        &history,
    );

    assert!(prompt.contains("[이전 대화]:"));
    let user_pos = prompt.find("user: 어제 뭐 물어봤지?").unwrap();
    let assistant_pos = prompt.find("assistant: 생산량 질문이었어요.").unwrap();
    let question_pos = prompt.find("[사용자 질문]: 계속 설명해줘").unwrap();
    assert!(user_pos < assistant_pos && assistant_pos < question_pos);
}
