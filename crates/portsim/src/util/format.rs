use jiff::ToSpan;
use jiff::civil::Date;

fn group_thousands(whole: i64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// Format a currency value with cents
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as i64;
    format!(
        "{}${}.{:02}",
        sign(value),
        group_thousands(cents_total / 100),
        cents_total % 100
    )
}

/// Format a currency value without cents (for table columns)
pub fn format_currency_short(value: f64) -> String {
    format!("{}${}", sign(value), group_thousands(value.abs().round() as i64))
}

/// Format a currency value in compact form (e.g., $2.1M, $450K, $50)
pub fn format_compact_currency(value: f64) -> String {
    let abs_value = value.abs();

    if abs_value >= 1_000_000.0 {
        format!("{}${:.1}M", sign(value), abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}${:.0}K", sign(value), abs_value / 1_000.0)
    } else {
        format!("{}${:.0}", sign(value), abs_value)
    }
}

/// Format a fraction as a percentage (0.123 -> "12.30%")
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Calendar label of simulated month `month`, where month 0 (the opening
/// balance) falls in `start`
pub fn month_label(start: Date, month: u32) -> String {
    match start.checked_add(i64::from(month).months()) {
        Ok(date) => format!("{:04}-{:02}", date.year(), date.month()),
        Err(_) => format!("M{month}"),
    }
}

/// Parse a `YYYY-MM` string into the first day of that month
pub fn parse_month(value: &str) -> Result<Date, jiff::Error> {
    format!("{}-01", value.trim()).parse::<Date>()
}
