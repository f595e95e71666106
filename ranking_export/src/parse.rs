// Tolerant readers for the numbers typed in the survey form.
//
// None of these functions fail: a value that cannot be understood is
// replaced by the fallback given by the caller.

use crate::config::FirmResponse;

/// The literal printed in place of revenues that were not disclosed.
pub const DND: &str = "DND";

fn strip_currency(raw: &str) -> String {
    raw.chars().filter(|c| *c != '$' && *c != ',').collect()
}

fn is_dnd_literal(raw: &str) -> bool {
    strip_currency(raw).trim().eq_ignore_ascii_case(DND)
}

/// Parses a decimal number such as `"$1,250.5"`.
///
/// Dollar signs and thousands separators are removed before parsing.
pub fn parse_decimal(raw: &str, fallback: f64) -> f64 {
    let cleaned = strip_currency(raw);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return fallback;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => fallback,
    }
}

/// Parses a whole number such as `"1,200"`.
///
/// A decimal value is truncated toward zero.
pub fn parse_whole_number(raw: &str, fallback: i64) -> i64 {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return fallback;
    }
    if let Ok(v) = cleaned.parse::<i64>() {
        return v;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => fallback,
    }
}

/// True if the firm chose not to disclose its revenues.
pub fn is_disclosure_declined(firm: &FirmResponse) -> bool {
    firm.revenue_dnd.trim().eq_ignore_ascii_case("TRUE") || is_dnd_literal(&firm.revenue_current)
}

/// Formats a revenue figure (in millions) for the publication, e.g. `"$47.5"`.
///
/// A revenue of exactly zero cannot be told apart from a missing answer,
/// and is printed as `DND` too.
pub fn format_revenue(raw: &str, declined: bool) -> String {
    if declined || raw.is_empty() || is_dnd_literal(raw) {
        return DND.to_string();
    }
    let v = parse_decimal(raw, 0.0);
    if v == 0.0 {
        DND.to_string()
    } else {
        format!("${:.1}", v)
    }
}

/// Formats a percentage rounded to the unit, e.g. `"38%"`. Non-positive values are blank.
pub fn format_percent(value: f64) -> String {
    if value > 0.0 {
        format!("{}%", value.round() as i64)
    } else {
        String::new()
    }
}
