//! Fixed-width histograms and their complementary cumulative distribution

use crate::constants::{HISTOGRAM_BIN_WIDTH, HISTOGRAM_LOWER, HISTOGRAM_UPPER};
use crate::errors::{Result, generic_error};

/// Counting histogram over `[lower, upper)` with bins of equal width
///
/// Values below `lower` are counted in the first bin and values at or above
/// `upper` in the last one, so every added value is accounted for.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    lower: f64,
    width: f64,
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Creates an empty histogram
    ///
    /// # Errors
    /// Fails when `width` is not positive or the range is empty
    pub fn new(lower: f64, upper: f64, width: f64) -> Result<Self> {
        if !(width > 0.0) || !width.is_finite() {
            return Err(generic_error(&format!(
                "Histogram bin width must be positive, got {width}"
            )));
        }
        if !(upper > lower) || !lower.is_finite() || !upper.is_finite() {
            return Err(generic_error(&format!(
                "Histogram range [{lower}, {upper}) is empty"
            )));
        }

        let bins = ((upper - lower) / width).ceil() as usize;
        Ok(Histogram {
            lower,
            width,
            counts: vec![0; bins],
            total: 0,
        })
    }

    /// Histogram used for termination times: `[0, 2_001_000)` in bins of 100
    pub fn termination_times() -> Self {
        let bins = ((HISTOGRAM_UPPER - HISTOGRAM_LOWER) / HISTOGRAM_BIN_WIDTH) as usize;
        Histogram {
            lower: HISTOGRAM_LOWER as f64,
            width: HISTOGRAM_BIN_WIDTH as f64,
            counts: vec![0; bins],
            total: 0,
        }
    }

    /// Copy of this histogram's layout with every count reset, then filled
    /// with `values`
    pub fn with_values(&self, values: impl IntoIterator<Item = f64>) -> Self {
        let mut histogram = Histogram {
            lower: self.lower,
            width: self.width,
            counts: vec![0; self.counts.len()],
            total: 0,
        };
        for value in values {
            histogram.add(value);
        }
        histogram
    }

    pub fn add(&mut self, value: f64) {
        let last = self.counts.len() - 1;
        let bin = if value <= self.lower {
            0
        } else {
            (((value - self.lower) / self.width).floor() as usize).min(last)
        };
        self.counts[bin] += 1;
        self.total += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Every bin edge, from the lower edge of the first bin to the upper
    /// edge of the last (`bin_count() + 1` values)
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.counts.len())
            .map(|i| self.lower + i as f64 * self.width)
            .collect()
    }

    /// Lower edge of each bin (`bin_count()` values)
    pub fn bin_lower_edges(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|i| self.lower + i as f64 * self.width)
            .collect()
    }

    /// Fraction of values not yet counted once each bin is included
    ///
    /// For bin `i` this is `(total - cumulative_count(0..=i)) / total`. An
    /// empty histogram gives zero for every bin.
    pub fn ccdf(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; self.counts.len()];
        }

        let total = self.total as f64;
        self.counts
            .iter()
            .scan(0u64, |cumulative, &count| {
                *cumulative += count;
                Some(*cumulative)
            })
            .map(|cumulative| (total - cumulative as f64) / total)
            .collect()
    }
}

/// Arithmetic mean, NaN for no values
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}
