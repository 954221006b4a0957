//! アプリ設定
//!
//! 既定値をクエリ文字列（?debug=1&sla=12&toast=3000）で上書きする。

pub const DEFAULT_REVIEW_SLA_HOURS: i64 = 24;
pub const DEFAULT_TOAST_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub debug_logging: bool,
    /// レビュー待ちがSLA超過とみなされるまでの時間
    pub review_sla_hours: i64,
    pub toast_duration_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            review_sla_hours: DEFAULT_REVIEW_SLA_HOURS,
            toast_duration_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl AppConfig {
    /// `?a=1&b=2` 形式を解釈する。不正な値は無視して既定値のまま
    pub fn from_query(search: &str) -> Self {
        let mut config = Self::default();
        let query = search.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "debug" => config.debug_logging = matches!(value, "" | "1" | "true" | "on"),
                "sla" => {
                    if let Ok(hours) = value.parse::<i64>() {
                        if hours > 0 {
                            config.review_sla_hours = hours;
                        }
                    }
                }
                "toast" => {
                    if let Ok(ms) = value.parse::<u32>() {
                        config.toast_duration_ms = ms;
                    }
                }
                _ => {}
            }
        }
        config
    }
}

/// 現在のページURLから設定を読み込む
pub fn load_config() -> AppConfig {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    AppConfig::from_query(&search)
}
