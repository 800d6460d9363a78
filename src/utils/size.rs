use anyhow::{anyhow, Result};

/// Binary (1024-based) unit multipliers, longest suffix first so that
/// `100KB` is not consumed by the bare `B` unit.
const UNITS: [(&str, u64); 5] = [
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
    ("B", 1),
];

/// Convert a human-readable size string to bytes.
///
/// Accepts a plain integer (bytes) or a number immediately followed by one of
/// `B`, `KB`, `MB`, `GB`, `TB` (case-insensitive). Example: `100MB` -> 104857600.
pub fn parse_size(input: &str) -> Result<u64> {
    let size_str = input.trim().to_uppercase();

    // Digit-only input is already a byte count.
    if !size_str.is_empty() && size_str.bytes().all(|b| b.is_ascii_digit()) {
        return size_str
            .parse()
            .map_err(|_| anyhow!("Invalid size format: '{}'", size_str));
    }

    for (unit, multiplier) in UNITS {
        if let Some(num_part) = size_str.strip_suffix(unit) {
            let num_part = num_part.trim();
            let value: f64 = num_part
                .parse()
                .map_err(|_| anyhow!("Invalid numeric format: '{}'", num_part))?;
            if value < 0.0 {
                return Err(anyhow!("Invalid numeric format: '{}'", num_part));
            }
            return Ok((value * multiplier as f64) as u64);
        }
    }

    Err(anyhow!("Invalid size format: '{}'", size_str))
}

/// Convert a byte count to a human-readable string.
///
/// Example: 1048576 -> `1.00MB`.
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "0B".to_string();
    }

    let units = ["B", "KB", "MB", "GB", "TB"];
    let mut size = size_bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < units.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2}{}", size, units[unit_idx])
}
