//! Helpers for byte counts: megabyte conversion and human-readable sizes.

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Convert an event setting expressed in megabytes to bytes.
pub fn megabytes_to_bytes(megabytes: u64) -> u64 {
    megabytes.saturating_mul(BYTES_PER_MEGABYTE)
}

/// Format a byte count as `Bytes`, `KB`, `MB` or `GB` with at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit_index = 0;

    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    let mut value_str = format!("{value:.2}");
    while value_str.ends_with('0') {
        value_str.pop();
    }
    if value_str.ends_with('.') {
        value_str.pop();
    }

    format!("{value_str} {}", UNITS[unit_index])
}
