const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

/// Human-readable size: megabytes below 1 GiB, gigabytes from there, two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes < GB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}
