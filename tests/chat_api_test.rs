// ==========================================
// ChatApi 集成测试
// ==========================================
// 测试目标: 验证编排接口的错误口径 (不发起真实网络调用)
// ==========================================


use plan_ai_console::ai::ChatClient;
use plan_ai_console::api::{ApiError, ChatApi};
use plan_ai_console::config::AnalysisThresholds;
use plan_ai_console::engine::{ContextAggregator, PromptAssembler, VersionDiffer};
use plan_ai_console::repository::{
    AggregateRepository, CalendarRepository, PlanRowRepository,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use test_helpers::*;

/// 装配 ChatApi (客户端指向本地保留地址，测试不触发请求)
fn create_chat_api(conn: Arc<Mutex<Connection>>) -> ChatApi {
    let thresholds = AnalysisThresholds::default();
    let plan_repo = Arc::new(PlanRowRepository::new(Arc::clone(&conn)));
    let aggregate_repo = Arc::new(AggregateRepository::new(Arc::clone(&conn)));
    let calendar_repo = Arc::new(CalendarRepository::new(conn));

    let aggregator = ContextAggregator::new(
        Arc::clone(&aggregate_repo),
        calendar_repo,
        thresholds.clone(),
    );
    let differ = VersionDiffer::new(
        Arc::clone(&plan_repo),
        aggregate_repo,
        thresholds.clone(),
    );
    let assembler = PromptAssembler::new(thresholds.clone());
    let client = ChatClient::new("http://127.0.0.1:9", "test-key", 1).unwrap();

    ChatApi::new(
        plan_repo, aggregator, differ, assembler, client, thresholds, 2025, 8,
    )
}

#[test]
fn test_list_versions() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        insert_plan_row(&guard, "1차", date(2025, 8, 1), 1, "A", 1.0).unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 1), 1, "A", 1.0).unwrap();
    }

    let api = create_chat_api(conn);
    assert_eq!(api.list_versions().unwrap(), vec!["0차", "1차"]);
}

#[test]
fn test_compare_versions_rejects_same_label() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    let api = create_chat_api(conn);
    assert!(matches!(
        api.compare_versions("0차", "0차"),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_compare_versions_data_insufficient_surfaced() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 1), 1, "A", 1.0).unwrap();
    }

    let api = create_chat_api(conn);
    let err = api.compare_versions("0차", "1차").unwrap_err();

    assert!(matches!(err, ApiError::DataInsufficient(_)));
    // 用户可见消息为韩文内联提示
    assert_eq!(err.to_user_message(), "⚠️ 비교할 데이터가 부족합니다.");
}

#[test]
fn test_compare_versions_success() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    {
        let guard = conn.lock().unwrap();
        insert_plan_row(&guard, "0차", date(2025, 8, 1), 1, "A", 100.0).unwrap();
        insert_plan_row(&guard, "1차", date(2025, 8, 1), 1, "A", 80.0).unwrap();
        insert_monthly_total(&guard, 2025, 8, "0차", 100).unwrap();
        insert_monthly_total(&guard, 2025, 8, "1차", 80).unwrap();
    }

    let api = create_chat_api(conn);
    let report = api.compare_versions("0차", "1차").unwrap();

    assert_eq!(report.base_version, "0차");
    assert_eq!(report.total.as_ref().unwrap().diff, -20);
}

#[test]
fn test_ask_rejects_empty_question() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).expect("Failed to open db");

    let api = create_chat_api(conn);
    // 在发起任何出站调用前即拒绝
    assert!(matches!(
        api.ask("   ", &[], None, "0차"),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_remote_error_user_message_format() {
    let err = ApiError::RemoteService {
        status: 503,
        body: "service unavailable".to_string(),
    };
    assert_eq!(
        err.to_user_message(),
        "⚠️ API 오류 (코드: 503)\n응답: service unavailable"
    );
}
