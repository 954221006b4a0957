//! 埋め込みモックデータの読み込み

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::MockData;
use crate::utils::log_trace::{log_error, log_info_with_data};

const MOCK_DATA_JSON: &str = include_str!("../../data/mock_data.json");

pub fn parse_mock_data(json: &str) -> Result<MockData, String> {
    serde_json::from_str(json).map_err(|e| format!("モックデータ解析エラー: {}", e))
}

/// 埋め込みデータを読み込む。失敗時は空データで起動する
pub fn load_mock_data() -> MockData {
    match parse_mock_data(MOCK_DATA_JSON) {
        Ok(data) => {
            log_info_with_data(
                "mock-data",
                "Mock data loaded",
                serde_json::json!({
                    "agencies": data.agencies.len(),
                    "deals": data.deals.len(),
                    "subtasks": data.subtasks.len(),
                    "review_queue": data.review_queue.len(),
                    "member_reviews": data.member_reviews.len(),
                }),
            );
            data
        }
        Err(e) => {
            log_error("mock-data", &e);
            MockData::default()
        }
    }
}

/// モックデータの更新日時を取得（ビルド時に埋め込み）
pub fn format_mock_data_modified() -> String {
    let timestamp: i64 = option_env!("MOCK_DATA_MODIFIED")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    format_modified(timestamp)
}

fn format_modified(timestamp: i64) -> String {
    if timestamp == 0 {
        return "Mock data updated: unknown".to_string();
    }
    // JST (UTC+9) で表示
    let jst = FixedOffset::east_opt(9 * 3600);
    match (DateTime::<Utc>::from_timestamp(timestamp, 0), jst) {
        (Some(dt), Some(offset)) => format!(
            "Mock data updated: {}",
            dt.with_timezone(&offset).format("%Y-%m-%d %H:%M")
        ),
        _ => "Mock data updated: unknown".to_string(),
    }
}
