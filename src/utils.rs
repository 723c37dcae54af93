use crate::bar::Bar;

/// Configures a custom Rayon thread pool with specified size.
///
/// This function creates a new Rayon thread pool with the exact number of threads specified.
/// Running a merge inside `pool.install(..)` bounds how many snapshot files are parsed
/// at once, separate from the global Rayon pool.
///
/// # Arguments
/// * `num_threads` - Desired number of threads for the pool.
///
/// # Returns
/// * `Result<ThreadPool>` - Created thread pool or an error if creation fails.
pub fn configure_thread_pool(num_threads: usize) -> anyhow::Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))
}

/// Resolves the thread count requested on the command line.
///
/// `None` keeps the size of the global Rayon pool; a request above the number
/// of available CPUs is capped.
///
/// # Errors
/// * If `requested` is `Some(0)`.
pub fn effective_threads(requested: Option<usize>) -> anyhow::Result<usize> {
    match requested {
        Some(0) => Err(anyhow::anyhow!("Number of threads must be a positive integer")),
        Some(n) => {
            let max_threads = num_cpus::get();
            if n > max_threads {
                tracing::warn!(requested = n, max_threads, "limiting thread count to available CPUs");
                Ok(max_threads)
            } else {
                Ok(n)
            }
        }
        None => Ok(rayon::current_num_threads()),
    }
}

/// Formats a bar timestamp as `YYYY-MM-DD HH:MM:SS.mmm`, the recorder's own layout.
pub fn format_timestamp(ts: chrono::NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Formats a span as `[Nd ]HH:MM:SS[.mmm]`.
pub fn format_duration(duration: chrono::TimeDelta) -> String {
    let sign = if duration < chrono::TimeDelta::zero() { "-" } else { "" };
    let duration = duration.abs();
    let days = duration.num_days();
    let hours = duration.num_hours() % 24;
    let minutes = duration.num_minutes() % 60;
    let seconds = duration.num_seconds() % 60;
    let millis = duration.num_milliseconds() % 1000;

    let mut out = String::from(sign);
    if days > 0 {
        out.push_str(&format!("{days}d "));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if millis > 0 {
        out.push_str(&format!(".{millis:03}"));
    }
    out
}

/// Prints the first `count` bars of a slice.
///
/// # Example Output
/// ```text
///  - ts: 2025-02-17 14:23:00.000, open: 100.50, high: 100.75, low: 100.45, close: 100.60, vol: 87.00
///  - ts: 2025-02-17 14:23:01.000, open: 100.60, high: 100.80, low: 100.55, close: 100.70, vol: 12.00
/// ```
pub fn print_bars(items: &[Bar], count: usize) {
    for item in items.iter().take(count) {
        println!(
            " - ts: {}, open: {:.2}, high: {:.2}, low: {:.2}, close: {:.2}, vol: {:.2}",
            format_timestamp(item.timestamp),
            item.open,
            item.high,
            item.low,
            item.close,
            item.volume,
        );
    }
}
