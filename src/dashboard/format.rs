//! Number formatting for display
//!
//! Amounts are shown as whole US dollars with `en-US` digit grouping.
//! Counts are shown as plain numbers.

/// Format an amount as whole US dollars, e.g. `1234.9` -> `$1,235`
///
/// Rounds half away from zero. Values that round to zero print as `$0`.
pub fn format_usd(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "$∞" } else { "-$∞" }.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a count as a plain number, e.g. `4.0` -> `4`, `4.5` -> `4.5`
pub fn format_count(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Insert a comma between every group of three digits
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
