//! Display helpers for the printer picker.

use shared::domain::PrinterStatus;

/// Rounds half-up to whole grams, e.g. `1234.6` -> `"1235 g"`.
pub fn format_weight(grams: f64) -> String {
    let rounded = round_half_up(grams);
    if rounded.is_nan() {
        "NaN g".to_string()
    } else if rounded.is_infinite() {
        let sign = if rounded.is_sign_negative() { "-" } else { "" };
        format!("{sign}Infinity g")
    } else if rounded == 0.0 {
        // No "-0 g" for small negatives.
        "0 g".to_string()
    } else {
        format!("{rounded:.0} g")
    }
}

/// `Math.round` semantics: exact halves go toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

pub fn printer_status_color(status: &PrinterStatus) -> &'static str {
    match status {
        PrinterStatus::Ready => "green",
        PrinterStatus::Printing => "orange",
        PrinterStatus::Error => "red",
        PrinterStatus::Other(_) => "gray",
    }
}

pub fn printer_status_emoji(status: &PrinterStatus) -> &'static str {
    match status {
        PrinterStatus::Ready => "✅",
        PrinterStatus::Printing => "🖨️",
        PrinterStatus::Error => "❌",
        PrinterStatus::Other(_) => "❓",
    }
}
