use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stayguard_alert::baseline::Population;
use stayguard_alert::sampler::InMemorySampler;
use stayguard_common::types::{GroupDraft, Metric, Property, RuleDraft, SampleWindow};
use std::collections::HashSet;

// ---- Rules file (used by `evaluate` / `dispatch`) ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub groups: Vec<GroupDraft>,
    #[serde(default)]
    pub rules: Vec<RuleDraft>,
}

// ---- Dataset file ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetFile {
    /// Reference date for rule windows when none is given on the command line
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub entity_id: String,
    pub metric: Metric,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub value: f64,
}

pub struct Dataset {
    pub as_of: Option<NaiveDate>,
    pub population: Population,
    pub sampler: InMemorySampler,
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &str, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} file '{}': {}", what, path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} file '{}': {}", what, path, e))
}

impl DatasetFile {
    /// Builds the population and sampler, skipping observations that cannot be used.
    pub fn into_dataset(self) -> Result<Dataset> {
        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.id.as_str()) {
                anyhow::bail!("duplicate property id in dataset: {}", property.id);
            }
        }

        let mut sampler = InMemorySampler::new();
        let mut skipped = 0usize;
        for obs in self.observations {
            if obs.end <= obs.start || !obs.value.is_finite() || !seen.contains(obs.entity_id.as_str()) {
                tracing::warn!(
                    entity_id = %obs.entity_id,
                    metric = %obs.metric,
                    start = %obs.start,
                    end = %obs.end,
                    "Skipping unusable observation"
                );
                skipped += 1;
                continue;
            }
            let window = SampleWindow {
                start: obs.start,
                end: obs.end,
            };
            sampler.insert(&obs.entity_id, obs.metric, window, obs.value);
        }

        tracing::info!(
            properties = self.properties.len(),
            observations = sampler.len(),
            skipped,
            "Dataset loaded"
        );

        Ok(Dataset {
            as_of: self.as_of,
            population: Population::new(self.properties),
            sampler,
        })
    }
}
