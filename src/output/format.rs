//! Human-readable formatting for byte counts and ratios.

use crate::utils::config::{BYTE_UNITS, BYTE_UNIT_STEP};

/// Format a byte count with binary units
///
/// **Public** - picks the largest unit not above the value, capped at GB.
/// Plain bytes are printed without decimals, larger units with two.
///
/// # Example
/// ```
/// use alloc_trace_studio::output::format_bytes;
///
/// assert_eq!(format_bytes(1023), "1023 bytes");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// ```
pub fn format_bytes(size: u64) -> String {
    format_byte_amount(size as f64)
}

/// Same as [`format_bytes`] for fractional amounts such as averages
pub fn format_byte_amount(size: f64) -> String {
    let mut value = size;
    let mut unit_index = 0;

    while value >= BYTE_UNIT_STEP && unit_index + 1 < BYTE_UNITS.len() {
        value /= BYTE_UNIT_STEP;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", value.trunc() as u64, BYTE_UNITS[0])
    } else {
        format!("{:.2} {}", value, BYTE_UNITS[unit_index])
    }
}

/// Format an integer with thousands separators (`1234567` -> `1,234,567`)
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Format a ratio as a percentage with one decimal (`0.256` -> `25.6%`)
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
