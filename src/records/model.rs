//! In-memory records built from data files

/// Termination flags of every sample of one destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminationCounts {
    pub sample_count: usize,
    pub terminations: Vec<bool>,
}

impl TerminationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sample(&mut self, terminated: bool) {
        self.sample_count += 1;
        self.terminations.push(terminated);
    }

    /// A destination terminated only if every one of its samples did
    pub fn all_terminated(&self) -> bool {
        self.terminations.iter().all(|&terminated| terminated)
    }
}

/// Metrics of one terminated sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleMetrics {
    pub termination_time: u64,
    pub messages: u64,
    pub deactivations: u64,
}

/// Everything recorded about one destination
///
/// `terminations` holds one flag per sample. The three metric sequences are
/// parallel and only hold values for the samples that terminated. The fields
/// are private so that [`DestinationData::record_sample`] is the only way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationData {
    sample_count: usize,
    terminations: Vec<bool>,
    termination_times: Vec<u64>,
    messages: Vec<u64>,
    deactivations: Vec<u64>,
}

impl DestinationData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sample; `metrics` is only kept when it is present, and it
    /// is only read by callers for samples that terminated
    pub fn record_sample(&mut self, metrics: Option<SampleMetrics>) {
        self.sample_count += 1;
        self.terminations.push(metrics.is_some());

        if let Some(metrics) = metrics {
            self.termination_times.push(metrics.termination_time);
            self.messages.push(metrics.messages);
            self.deactivations.push(metrics.deactivations);
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn terminations(&self) -> &[bool] {
        &self.terminations
    }

    pub fn termination_times(&self) -> &[u64] {
        &self.termination_times
    }

    pub fn messages(&self) -> &[u64] {
        &self.messages
    }

    pub fn deactivations(&self) -> &[u64] {
        &self.deactivations
    }

    pub fn terminated_samples(&self) -> usize {
        self.terminations.iter().filter(|&&terminated| terminated).count()
    }

    /// A destination terminated only if every one of its samples did
    pub fn all_terminated(&self) -> bool {
        self.terminations.iter().all(|&terminated| terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(time: u64) -> SampleMetrics {
        SampleMetrics {
            termination_time: time,
            messages: time / 10,
            deactivations: 1,
        }
    }

    #[test]
    fn test_destination_lengths_follow_terminations() {
        let mut data = DestinationData::new();
        data.record_sample(Some(metrics(100)));
        data.record_sample(None);
        data.record_sample(Some(metrics(300)));

        assert_eq!(data.sample_count(), 3);
        assert_eq!(data.terminations().len(), data.sample_count());
        assert_eq!(data.terminated_samples(), 2);
        assert_eq!(data.termination_times(), &[100, 300]);
        assert_eq!(data.messages(), &[10, 30]);
        assert_eq!(data.deactivations().len(), data.terminated_samples());
        assert!(!data.all_terminated());
    }

    #[test]
    fn test_destination_without_samples_counts_as_terminated() {
        let data = DestinationData::new();
        assert_eq!(data.sample_count(), 0);
        assert!(data.all_terminated());
    }

    #[test]
    fn test_termination_counts() {
        let mut counts = TerminationCounts::new();
        counts.record_sample(true);
        counts.record_sample(true);
        assert!(counts.all_terminated());

        counts.record_sample(false);
        assert_eq!(counts.sample_count, 3);
        assert!(!counts.all_terminated());
    }
}
