//! Display formatting for money and percentages.

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

/// Sign of a value, used by callers to pick a positive/negative style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

pub fn sign_of(value: f64) -> Sign {
    if value > 0.0 {
        Sign::Positive
    } else if value < 0.0 {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a number with `en` thousands separators and at most two fraction
/// digits, trailing zeros dropped: `1234.5` → `1,234.5`, `3000.0` → `3,000`.
///
/// Any finite value formats in full, however large.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let abs = value.abs();
    // Past 1e15 an f64 has no cent resolution left.
    let rounded = if abs < CENT_PRECISION_LIMIT {
        round2(abs)
    } else {
        abs.trunc()
    };
    let whole = rounded.trunc();
    let frac = ((rounded - whole) * 100.0).round() as u32;
    let mut out = group_whole(whole);
    if frac != 0 {
        let digits = format!("{:02}", frac);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    if value < 0.0 && rounded != 0.0 {
        format!("-{}", out)
    } else {
        out
    }
}

const CENT_PRECISION_LIMIT: f64 = 1e15;

/// Thousands-separated digits of a non-negative integral `whole`.
fn group_whole(whole: f64) -> String {
    if whole < u128::MAX as f64 {
        return (whole as u128).to_formatted_string(&Locale::en);
    }
    let digits = format!("{:.0}", whole);
    let sep = Locale::en.separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}

/// Currency string with a leading `$`: `-1250.5` → `-$1,250.5`.
pub fn format_currency(value: f64) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", amount),
    }
}

/// Percentage with two decimals: `12.3456` → `12.35%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", round2(value))
}
