// Derived numbers shown under the node and latency tables.

/// Summary statistics over the latency samples of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyStats {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl LatencyStats {
    /// Returns `None` when there are no usable samples. Missing values
    /// (`None`) and non-finite values are ignored.
    pub fn from_samples<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values: Vec<f64> = samples
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count: values.len(),
            average: sum / values.len() as f64,
            min,
            max,
        })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Quality bands used in the latency breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl LatencyBand {
    pub fn of(latency_ms: f64) -> Self {
        if latency_ms < 50.0 {
            LatencyBand::Excellent
        } else if latency_ms < 100.0 {
            LatencyBand::Good
        } else if latency_ms < 300.0 {
            LatencyBand::Fair
        } else {
            LatencyBand::Poor
        }
    }
}

/// Count of samples per band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatencyBuckets {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl LatencyBuckets {
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut buckets = Self::default();
        for value in samples.into_iter().flatten().filter(|v| v.is_finite()) {
            match LatencyBand::of(value) {
                LatencyBand::Excellent => buckets.excellent += 1,
                LatencyBand::Good => buckets.good += 1,
                LatencyBand::Fair => buckets.fair += 1,
                LatencyBand::Poor => buckets.poor += 1,
            }
        }
        buckets
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.poor
    }

    /// Share of `count` in percent, 0 when the bucket set is empty.
    pub fn percent(&self, count: usize) -> f64 {
        percentage(count as f64, self.total() as f64)
    }
}

/// Coarse grade for a single latency figure (node detail and recent
/// records colouring).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyGrade {
    Excellent,
    Good,
    Poor,
}

impl LatencyGrade {
    pub fn of(latency_ms: f64) -> Self {
        if latency_ms < 100.0 {
            LatencyGrade::Excellent
        } else if latency_ms < 300.0 {
            LatencyGrade::Good
        } else {
            LatencyGrade::Poor
        }
    }
}

/// `part / whole` as a percentage, 0 when `whole` is not positive.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Points earned per second of activity. Durations are in milliseconds.
pub fn points_per_second(points: f64, duration_ms: i64) -> f64 {
    if duration_ms > 0 {
        points / (duration_ms as f64 / 1000.0)
    } else {
        0.0
    }
}

/// Share of the node's lifetime it spent online.
pub fn uptime_percentage(active_ms: i64, created_at_ms: i64, now_ms: i64) -> f64 {
    if active_ms <= 0 {
        return 0.0;
    }
    percentage(active_ms as f64, (now_ms - created_at_ms) as f64)
}
