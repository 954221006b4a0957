//! ユーティリティモジュール

pub mod config;
pub mod log_trace;
pub mod mock;

// 共通ヘルパー

/// 秒数を HH:MM:SS に整形
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// 金額を $12,345 形式に整形
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${}", out)
}

/// 評価（0〜5）を星で表示、未評価は "Pending"
pub fn format_rating(rating: Option<u8>) -> String {
    match rating {
        Some(r) => {
            let r = r.min(5) as usize;
            format!("{}{}", "★".repeat(r), "☆".repeat(5 - r))
        }
        None => "Pending".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(3725), "01:02:05");
        assert_eq!(format_duration(100 * 3600), "100:00:00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(950), "$950");
        assert_eq!(format_money(12500), "$12,500");
        assert_eq!(format_money(1234567), "$1,234,567");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(Some(3)), "★★★☆☆");
        assert_eq!(format_rating(Some(9)), "★★★★★");
        assert_eq!(format_rating(None), "Pending");
    }
}
