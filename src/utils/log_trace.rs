//! 時系列トレースログシステム
//! すべての操作とイベントをメモリ上に記録し、後からダウンロードして確認できるようにする

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

pub const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // "deals", "subtasks", "ui-action", etc.
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    capacity: usize,
    debug_enabled: bool,
}

impl LogTrace {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            debug_enabled: false,
        }
    }

    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
    }

    pub fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        if level == LogLevel::Debug && !self.debug_enabled {
            return;
        }

        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        // コンソールにも出力
        write_console(&entry);

        // 上限を超えたら古いものから捨てる
        if self.logs.len() >= self.capacity {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(entry: &LogEntry) {
    let line = JsValue::from_str(&format!("[{}] {}", entry.category, entry.message));
    let data = entry
        .data
        .as_ref()
        .and_then(|d| serde_wasm_bindgen::to_value(d).ok());
    match (entry.level, data) {
        (LogLevel::Error, Some(d)) => web_sys::console::error_2(&line, &d),
        (LogLevel::Error, None) => web_sys::console::error_1(&line),
        (LogLevel::Warn, Some(d)) => web_sys::console::warn_2(&line, &d),
        (LogLevel::Warn, None) => web_sys::console::warn_1(&line),
        (LogLevel::Debug, Some(d)) => web_sys::console::debug_2(&line, &d),
        (LogLevel::Debug, None) => web_sys::console::debug_1(&line),
        (LogLevel::Info, Some(d)) => web_sys::console::log_2(&line, &d),
        (LogLevel::Info, None) => web_sys::console::log_1(&line),
    }
}

// ネイティブ（テスト）ではコンソール出力なし
#[cfg(not(target_arch = "wasm32"))]
fn write_console(_entry: &LogEntry) {}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn set_debug_logging(enabled: bool) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().set_debug_enabled(enabled);
    });
}

pub fn log_debug(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Debug, category, message, None);
    });
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Info, category, message, None);
    });
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Info, category, message, Some(data));
    });
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Warn, category, message, None);
    });
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Error, category, message, None);
    });
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().get_logs_json())
}

pub fn log_count() -> usize {
    LOG_TRACE.with(|trace| trace.borrow().len())
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().clear();
    });
}

/// ログをJSONファイルとしてダウンロード
pub fn download_logs() {
    let json_str = get_logs_json();
    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    let filename = format!("dashboard_log_{}.json", timestamp);

    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            let blob_parts = js_sys::Array::new();
            blob_parts.push(&JsValue::from_str(&json_str));

            let options = web_sys::BlobPropertyBag::new();
            options.set_type("application/json");

            if let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options) {
                if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
                    if let Ok(a) = document.create_element("a") {
                        let _ = a.set_attribute("href", &url);
                        let _ = a.set_attribute("download", &filename);
                        if let Some(element) = a.dyn_ref::<web_sys::HtmlElement>() {
                            element.click();
                        }
                        let _ = web_sys::Url::revoke_object_url(&url);
                    }
                }
            }
        }
    }
}
