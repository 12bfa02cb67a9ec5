//! Latency aggregation for probe runs.

use std::fmt;
use std::time::Duration;

/// One failed probe, kept for the end-of-run report.
#[derive(Debug)]
pub struct Failure {
    pub slug: String,
    pub message: String,
    pub elapsed: Duration,
}

/// Accumulates request outcomes and renders the summary report.
///
/// Percentiles and averages cover successful requests only; failures are
/// counted and listed but do not skew the latency figures.
#[derive(Debug, Default)]
pub struct LatencyStats {
    latencies_ms: Vec<u128>,
    failures: Vec<Failure>,
}

impl LatencyStats {
    pub fn record_success(&mut self, elapsed: Duration) {
        self.latencies_ms.push(elapsed.as_millis());
    }

    pub fn record_failure(&mut self, slug: &str, message: &str, elapsed: Duration) {
        self.failures.push(Failure {
            slug: slug.to_string(),
            message: message.to_string(),
            elapsed,
        });
    }

    pub fn total(&self) -> usize {
        self.latencies_ms.len() + self.failures.len()
    }

    pub fn successes(&self) -> usize {
        self.latencies_ms.len()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Success rate in percent, or `None` before any request completed.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.successes() as f64 / total as f64 * 100.0)
    }

    /// Latency in milliseconds at the given percentile, over successes.
    pub fn percentile(&self, pct: f64) -> Option<u128> {
        if self.latencies_ms.is_empty() {
            return None;
        }
        let mut sorted = self.latencies_ms.clone();
        sorted.sort_unstable();
        let index = (sorted.len() as f64 * pct / 100.0).floor() as usize;
        Some(sorted[index.min(sorted.len() - 1)])
    }

    pub fn average(&self) -> Option<f64> {
        (!self.latencies_ms.is_empty()).then(|| {
            self.latencies_ms.iter().sum::<u128>() as f64 / self.latencies_ms.len() as f64
        })
    }

    pub fn min(&self) -> Option<u128> {
        self.latencies_ms.iter().min().copied()
    }

    pub fn max(&self) -> Option<u128> {
        self.latencies_ms.iter().max().copied()
    }
}

impl fmt::Display for LatencyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RESULTS")?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "Total requests:  {}", self.total())?;
        writeln!(f, "Successful:      {}", self.successes())?;
        writeln!(f, "Failed:          {}", self.failures.len())?;

        if let Some(rate) = self.success_rate() {
            writeln!(f, "Success rate:    {rate:.2}%")?;
        }
        if let Some(avg) = self.average() {
            writeln!(f, "Average latency: {avg:.2} ms")?;
        }
        if let (Some(min), Some(max)) = (self.min(), self.max()) {
            writeln!(f, "Min / Max:       {min} ms / {max} ms")?;
        }
        if let (Some(p50), Some(p95), Some(p99)) = (
            self.percentile(50.0),
            self.percentile(95.0),
            self.percentile(99.0),
        ) {
            writeln!(f, "P50 / P95 / P99: {p50} ms / {p95} ms / {p99} ms")?;
        }

        if !self.failures.is_empty() {
            writeln!(f, "Failures:")?;
            for failure in &self.failures {
                writeln!(
                    f,
                    "  {} ({} ms): {}",
                    failure.slug,
                    failure.elapsed.as_millis(),
                    failure.message
                )?;
            }
        }

        Ok(())
    }
}
