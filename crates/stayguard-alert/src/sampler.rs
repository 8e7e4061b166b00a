use crate::MetricSampler;
use stayguard_common::types::{Metric, SampleWindow};
use std::collections::HashMap;

/// Key: (entity_id, metric, window)
type SampleKey = (String, Metric, SampleWindow);

/// Table-backed sampler holding pre-computed observations.
///
/// Lookups are exact on the window; no interpolation between overlapping
/// windows is attempted.
#[derive(Debug, Clone, Default)]
pub struct InMemorySampler {
    values: HashMap<SampleKey, f64>,
}

impl InMemorySampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an observation, replacing any previous value for the same key.
    pub fn insert(&mut self, entity_id: &str, metric: Metric, window: SampleWindow, value: f64) {
        self.values
            .insert((entity_id.to_string(), metric, window), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl MetricSampler for InMemorySampler {
    fn sample(&self, entity_id: &str, metric: Metric, window: &SampleWindow) -> Option<f64> {
        self.values
            .get(&(entity_id.to_string(), metric, *window))
            .copied()
            .filter(|v| v.is_finite())
    }
}
