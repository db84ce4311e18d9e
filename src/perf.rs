//! Run statistics for the command-line tools.

use std::time::{Duration, Instant};

/// Timing, memory and throughput of one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    pub elapsed: Duration,
    pub peak_memory: Option<u64>,
    pub genes: usize,
    pub variants: usize,
}

impl RunStats {
    /// Snapshot the run that began at `start`.
    #[must_use]
    pub fn capture(start: Instant, genes: usize, variants: usize) -> Self {
        Self {
            elapsed: start.elapsed(),
            peak_memory: peak_memory_bytes(),
            genes,
            variants,
        }
    }

    /// Variants analysed per second, or `None` for a run too short to measure.
    pub fn variants_per_second(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.variants as f64 / secs)
    }
}

/// Formats a duration as HH:MM:SS.d (tenths of a second).
pub fn format_elapsed(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let tenths = d.subsec_millis() / 100;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{tenths}")
}

/// Formats a rate with a thousands-scale suffix, e.g. `12.3k/s`.
pub fn format_rate(per_second: f64) -> String {
    if per_second >= 1_000_000.0 {
        format!("{:.1}M/s", per_second / 1_000_000.0)
    } else if per_second >= 1_000.0 {
        format!("{:.1}k/s", per_second / 1_000.0)
    } else {
        format!("{per_second:.0}/s")
    }
}

/// Returns peak resident set size in bytes, or None if unavailable.
pub fn peak_memory_bytes() -> Option<u64> {
    #[cfg(any(target_os = "macos", target_os = "linux"))]
    {
        use std::mem::MaybeUninit;
        let mut usage = MaybeUninit::<libc::rusage>::uninit();
        // SAFETY: `usage` points to writable, properly aligned storage for a
        // `rusage`, which is all `getrusage(RUSAGE_SELF, ..)` requires.
        let ret = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
        if ret == 0 {
            // SAFETY: a zero return means the struct was filled in.
            let usage = unsafe { usage.assume_init() };
            let max_rss = u64::try_from(usage.ru_maxrss).ok()?;
            // ru_maxrss is bytes on macOS, kilobytes on Linux
            let bytes = if cfg!(target_os = "macos") {
                max_rss
            } else {
                max_rss * 1024
            };
            return Some(bytes);
        }
    }
    None
}

/// Formats a byte count as a human-readable string (B, KB, MB, GB).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

    UNITS
        .iter()
        .find(|(size, _)| bytes >= *size)
        .map_or_else(
            || format!("{bytes} B"),
            |(size, unit)| format!("{:.1} {unit}", bytes as f64 / *size as f64),
        )
}
