/// 以美金格式顯示金額（`$1,234.50`）。只在顯示時四捨五入到兩位小數。
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = amount < 0.0 && fixed != "0.00";

    format!(
        "{}${}.{}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        cents
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 百分比顯示，去掉多餘的零（`2` -> `2`, `2.50` -> `2.5`）
pub fn format_percentage(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(10.0), "$10.00");
        assert_eq!(format_currency(15.49845), "$15.50");
        assert_eq!(format_currency(46.4953), "$46.50");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-3.0), "-$3.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(2.0), "2");
        assert_eq!(format_percentage(2.5), "2.5");
        assert_eq!(format_percentage(0.125), "0.125");
    }
}
