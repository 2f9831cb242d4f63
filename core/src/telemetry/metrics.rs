use std::sync::Mutex;

/// Counters accumulated over one or more scenario runs.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub tiers_evaluated: usize,
    pub cells_evaluated: usize,
    pub transmitters_placed: usize,
    pub candidates_rejected: usize,
}

struct Metrics {
    snapshot: MetricsSnapshot,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                snapshot: MetricsSnapshot::default(),
            }),
        }
    }

    pub fn record_tier(&self, cells: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.snapshot.tiers_evaluated += 1;
            metrics.snapshot.cells_evaluated += cells;
        }
    }

    pub fn record_placement(&self, placed: usize, rejected: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.snapshot.transmitters_placed += placed;
            metrics.snapshot.candidates_rejected += rejected;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            metrics.snapshot
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
