// ==========================================
// 生产计划AI管制台 - 会话主入口
// ==========================================
// 形态: 标准输入驱动的会话循环 (一问一答，顺序执行)
// 口径: 任何失败渲染为内联消息后继续接受输入，不终止会话
// ==========================================

use std::io::{self, BufRead, Write};

use plan_ai_console::app::AppState;
use plan_ai_console::config::AppConfig;
use plan_ai_console::domain::chat::ChatTurn;
use plan_ai_console::logging;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", plan_ai_console::APP_NAME);
    tracing::info!("系统版本: {}", plan_ai_console::VERSION);
    tracing::info!("==================================================");

    // 配置缺失 (尤其是 AI 密钥) 时立即失败
    let config = AppConfig::from_env()?;
    tracing::info!("使用数据库: {}", config.db_path);
    tracing::info!(
        "分析期间: {}年 {}月",
        config.plan_year,
        config.plan_month
    );

    let app_state = AppState::new(&config)?;
    let chat_api = app_state.chat_api;

    // 版本列表与默认选择 (最新版本)
    let versions = match chat_api.list_versions() {
        Ok(versions) if !versions.is_empty() => versions,
        Ok(_) => vec!["0차".to_string()],
        Err(e) => {
            tracing::warn!(error = %e, "版本列表查询失败，使用默认版本");
            vec!["0차".to_string()]
        }
    };
    let mut current_version = versions.last().cloned().unwrap_or_else(|| "0차".to_string());
    let mut base_version: Option<String> = None;

    println!("🏭 생산계획 AI 관제 센터");
    println!("사용 가능한 버전: {}", versions.join(", "));
    println!("안녕하세요! 현재 **{}** 데이터를 보고 있어요. 무엇을 도와드릴까요?", current_version);
    println!("(명령: /version <v>, /compare <v>, /compare off, /versions, /quit)");

    // 会话记录由本循环持有，每次提问按值传入核心层
    let mut history: Vec<ChatTurn> = Vec::new();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        // ===== 会话命令 =====
        if let Some(rest) = input.strip_prefix('/') {
            let mut parts = rest.splitn(2, ' ');
            let command = parts.next().unwrap_or("");
            let arg = parts.next().map(str::trim).unwrap_or("");

            match command {
                "quit" | "exit" => break,
                "versions" => {
                    println!("사용 가능한 버전: {}", versions.join(", "));
                }
                "version" => {
                    if arg.is_empty() {
                        println!("현재 버전: {}", current_version);
                    } else {
                        current_version = arg.to_string();
                        println!("현재 **{}** 데이터를 보고 있어요.", current_version);
                    }
                }
                "compare" => {
                    if arg == "off" {
                        base_version = None;
                        println!("버전 비교 모드 해제");
                    } else if arg.is_empty() {
                        match &base_version {
                            Some(base) => println!("비교 기준 버전: {}", base),
                            None => println!("버전 비교 모드가 꺼져 있어요."),
                        }
                    } else if arg == current_version {
                        println!("⚠️ 같은 버전은 비교할 수 없어요");
                    } else {
                        base_version = Some(arg.to_string());
                        println!("비교 기준 버전: {} → {}", arg, current_version);
                    }
                }
                _ => {
                    println!("알 수 없는 명령: /{}", command);
                }
            }
            continue;
        }

        // ===== 一次提问 =====
        let answer = match chat_api.ask(
            input,
            &history,
            base_version.as_deref(),
            &current_version,
        ) {
            Ok(answer) => answer,
            // 错误仅作为消息展示，会话继续
            Err(e) => e.to_user_message(),
        };

        println!("{}", answer);

        history.push(ChatTurn::user(input));
        history.push(ChatTurn::assistant(answer));
    }

    tracing::info!("会话结束");
    Ok(())
}
