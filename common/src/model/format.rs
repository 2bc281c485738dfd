//! Byte-size display formatting for the download summary.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary-1024 units and two decimals:
/// `1_000_000` → `"976.56 KB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    // Round half away from zero before formatting; `{:.2}` alone ties to
    // even and would show 390.625 as "390.62".
    let rounded = (value * 100.0).round() / 100.0;
    format!("{:.2} {}", rounded, UNITS[unit])
}

/// Whole-number percentage saved by compression, zero when nothing was.
pub fn saved_percentage(original_size: u64, compressed_size: u64) -> u32 {
    if original_size == 0 || compressed_size >= original_size {
        return 0;
    }
    let saved = (original_size - compressed_size) as f64 / original_size as f64;
    (saved * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_summary_sizes() {
        assert_eq!(format_size(1_000_000), "976.56 KB");
        assert_eq!(format_size(400_000), "390.63 KB");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn saved_percentage_rounds_to_whole_points() {
        assert_eq!(saved_percentage(1_000_000, 400_000), 60);
        assert_eq!(saved_percentage(3, 2), 33);
        assert_eq!(saved_percentage(0, 0), 0);
        assert_eq!(saved_percentage(100, 150), 0);
    }
}
