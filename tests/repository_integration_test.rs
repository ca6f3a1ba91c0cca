// ==========================================
// Repository 层集成测试
// ==========================================
// 测试目标: 验证七张计划表的只读访问口径
// ==========================================


use plan_ai_console::repository::{
    AggregateRepository, CalendarRepository, PlanRowRepository,
};
use test_helpers::*;

#[test]
fn test_find_by_version_ordered_and_capped() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        // 故意乱序写入
        insert_plan_row(&guard, "0차", date(2025, 8, 20), 1, "A", 100.0).unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 1), 1, "B", 50.0).unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 10), 2, "C", 30.0).unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 5), 3, "D", 70.0).unwrap();
        insert_plan_row(&guard, "1차", date(2025, 8, 2), 1, "A", 10.0).unwrap();
    }

    let repo = PlanRowRepository::new(conn);

    let rows = repo.find_by_version("0차", 2000).unwrap();
    assert_eq!(rows.len(), 4);
    let dates: Vec<_> = rows.iter().map(|r| r.plan_date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted, "必须按 plan_date 升序返回");

    // 行数上限
    let capped = repo.find_by_version("0차", 2).unwrap();
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[0].plan_date, date(2025, 8, 1));

    // 不存在的版本返回空集，而不是错误
    let empty = repo.find_by_version("9차", 2000).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_list_versions_distinct_sorted() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        insert_plan_row(&guard, "1차", date(2025, 8, 1), 1, "A", 1.0).unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 1), 1, "A", 1.0).unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 2), 1, "A", 1.0).unwrap();
    }

    let repo = PlanRowRepository::new(conn);
    let versions = repo.list_versions().unwrap();
    assert_eq!(versions, vec!["0차".to_string(), "1차".to_string()]);
}

#[test]
fn test_monthly_total_present_and_absent() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        insert_monthly_total(&guard, 2025, 8, "0차", 217625).unwrap();
    }

    let repo = AggregateRepository::new(conn);

    // 有记录
    assert_eq!(repo.get_monthly_total(2025, 8, "0차").unwrap(), Some(217625));
    // 无记录是合法状态，不是错误
    assert_eq!(repo.get_monthly_total(2025, 8, "1차").unwrap(), None);
    assert_eq!(repo.get_monthly_total(2025, 9, "0차").unwrap(), None);
}

#[test]
fn test_line_monthly_totals_only_recorded_lines() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        insert_line_monthly_total(&guard, 2025, 8, "0차", 2, 70000).unwrap();
        insert_line_monthly_total(&guard, 2025, 8, "0차", 1, 80000).unwrap();
    }

    let repo = AggregateRepository::new(conn);
    let totals = repo.get_line_monthly_totals(2025, 8, "0차").unwrap();

    assert_eq!(totals.len(), 2);
    assert_eq!(totals.get(&1), Some(&80000));
    assert_eq!(totals.get(&2), Some(&70000));
    // BTreeMap 遍历按产线编号升序
    let lines: Vec<_> = totals.keys().copied().collect();
    assert_eq!(lines, vec![1, 2]);

    assert!(repo.get_line_monthly_totals(2025, 8, "1차").unwrap().is_empty());
}

#[test]
fn test_product_summaries_desc_and_capped() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        for i in 0..12 {
            insert_product_summary(
                &guard,
                2025,
                8,
                "0차",
                &format!("PRODUCT-{:02}", i),
                100.0 * (i as f64 + 1.0),
            )
            .unwrap();
        }
    }

    let repo = AggregateRepository::new(conn);
    let summaries = repo.get_product_summaries(2025, 8, "0차", 10).unwrap();

    assert_eq!(summaries.len(), 10);
    assert_eq!(summaries[0].product_name, "PRODUCT-11");
    assert_eq!(summaries[0].monthly_total, 1200.0);
    // 月总量降序
    for pair in summaries.windows(2) {
        assert!(pair[0].monthly_total >= pair[1].monthly_total);
    }
}

#[test]
fn test_daily_stats_and_work_calendar() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        insert_daily_line_stat(&guard, date(2025, 8, 2), "0차", 2, 450.0).unwrap();
        insert_daily_line_stat(&guard, date(2025, 8, 1), "0차", 1, 500.0).unwrap();
        insert_work_calendar_day(&guard, date(2025, 8, 2), "0차", false).unwrap();
        insert_work_calendar_day(&guard, date(2025, 8, 1), "0차", true).unwrap();
    }

    let repo = CalendarRepository::new(conn);

    let stats = repo.get_daily_line_stats(2025, 8, "0차").unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].date, date(2025, 8, 1));
    assert_eq!(stats[0].line, 1);
    assert_eq!(stats[0].quantity, 500.0);

    let calendar = repo.get_work_calendar(2025, 8, "0차").unwrap();
    assert_eq!(calendar.len(), 2);
    assert!(calendar[0].is_workday);
    assert!(!calendar[1].is_workday);
}
