//! Display formatting for currency and rates

/// Format as US dollars with thousands separators, e.g. `-$1,234.50`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!("{}${}.{:02}", sign, group_thousands(dollars), cents % 100)
}

/// Format a decimal rate as a percentage, e.g. `0.1349` -> `13.49%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
