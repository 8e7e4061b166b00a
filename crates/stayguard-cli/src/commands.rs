use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

use stayguard_alert::engine::AlertEngine;
use stayguard_common::id::{IdGenerator, SnowflakeIdGenerator};
use stayguard_common::types::{
    AlertEvent, EvaluationOutcome, EvaluationResult, Priority, Rule, RuleCategory,
};
use stayguard_storage::{RuleFilter, RuleStore};

use crate::config::CliConfig;
use crate::dataset::{read_json, Dataset, DatasetFile, RulesFile};
use crate::rule_seed::{default_rule_drafts, seed_rules};

#[derive(Debug, Default, Serialize)]
pub struct EvaluationSummary {
    pub rules: usize,
    pub triggered: usize,
    pub not_triggered: usize,
    pub insufficient_data: usize,
}

#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub as_of: NaiveDate,
    pub summary: EvaluationSummary,
    pub results: Vec<EvaluationResult>,
}

#[derive(Debug, Serialize)]
pub struct RuleActivity {
    pub rule_id: String,
    pub rule_name: String,
    pub trigger_count: u64,
    pub last_triggered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct DispatchReport {
    pub as_of: NaiveDate,
    pub events: Vec<AlertEvent>,
    pub rules: Vec<RuleActivity>,
}

#[derive(Debug, Serialize)]
pub struct RuleListing {
    pub id: String,
    pub name: String,
    pub category: RuleCategory,
    pub priority: Priority,
    pub enabled: bool,
}

/// Builds a store from a rules file. Groups come first so rules can be scoped to them.
///
/// When the file lists no rule, the built-in defaults are used.
pub fn build_store(rules_file: RulesFile, ids: Arc<dyn IdGenerator>) -> RuleStore {
    let mut store = RuleStore::new(ids);
    for draft in rules_file.groups {
        let name = draft.name.clone();
        if let Err(e) = store.create_group(draft) {
            tracing::warn!(group_name = %name, error = %e, "Skipping invalid property group");
        }
    }

    let drafts = if rules_file.rules.is_empty() {
        tracing::info!("No rule defined, using default rules");
        default_rule_drafts()
    } else {
        rules_file.rules
    };
    let created = seed_rules(&mut store, drafts);
    tracing::info!(rules = created, groups = store.groups().len(), "Rules loaded");
    store
}

fn id_generator(config: &CliConfig) -> Arc<dyn IdGenerator> {
    Arc::new(SnowflakeIdGenerator::new(
        config.id.machine_id,
        config.id.node_id,
    ))
}

fn load(config: &CliConfig, rules_path: &str, dataset_path: &str) -> Result<(RuleStore, Dataset)> {
    let ids = id_generator(config);
    let rules_file: RulesFile = read_json(rules_path, "rules")?;
    let dataset_file: DatasetFile = read_json(dataset_path, "dataset")?;
    Ok((build_store(rules_file, ids), dataset_file.into_dataset()?))
}

/// Explicit date, else the dataset's reference date, else today.
pub fn resolve_as_of(explicit: Option<&str>, dataset: Option<NaiveDate>) -> Result<NaiveDate> {
    match explicit {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid as-of date '{}': {}", s, e)),
        None => Ok(dataset.unwrap_or_else(|| Utc::now().date_naive())),
    }
}

/// Evaluates every rule, enabled or not, without applying dispatch policy.
pub fn run_evaluate(
    config: &CliConfig,
    rules_path: &str,
    dataset_path: &str,
    as_of: Option<&str>,
) -> Result<EvaluationReport> {
    let (store, dataset) = load(config, rules_path, dataset_path)?;
    let as_of = resolve_as_of(as_of, dataset.as_of)?;
    let engine = AlertEngine::new(Box::new(dataset.sampler), id_generator(config), &config.locale);

    let mut summary = EvaluationSummary {
        rules: store.rules().len(),
        ..Default::default()
    };
    let mut results = Vec::new();

    for rule in store.rules() {
        for result in engine.evaluate_rule(rule, &dataset.population, store.groups(), as_of) {
            let keep = match result.outcome {
                EvaluationOutcome::Triggered => {
                    summary.triggered += 1;
                    true
                }
                EvaluationOutcome::NotTriggered => {
                    summary.not_triggered += 1;
                    config.evaluation.include_not_triggered
                }
                EvaluationOutcome::InsufficientData => {
                    summary.insufficient_data += 1;
                    config.evaluation.include_insufficient_data
                }
            };
            if keep {
                results.push(result);
            }
        }
    }

    tracing::info!(
        %as_of,
        triggered = summary.triggered,
        not_triggered = summary.not_triggered,
        insufficient_data = summary.insufficient_data,
        "Evaluation complete"
    );

    Ok(EvaluationReport {
        as_of,
        summary,
        results,
    })
}

/// Evaluates enabled rules through the dispatch policy and records each fire.
pub fn run_dispatch(
    config: &CliConfig,
    rules_path: &str,
    dataset_path: &str,
    as_of: Option<&str>,
) -> Result<DispatchReport> {
    let (mut store, dataset) = load(config, rules_path, dataset_path)?;
    let as_of = resolve_as_of(as_of, dataset.as_of)?;
    let mut engine =
        AlertEngine::new(Box::new(dataset.sampler), id_generator(config), &config.locale)
            .with_min_severity(config.dispatch.min_severity);

    let rules: Vec<Rule> = store.enabled_rules().into_iter().cloned().collect();
    let groups = store.groups().to_vec();
    let now = Utc::now();
    let mut events = Vec::new();

    for rule in &rules {
        for event in engine.dispatch(rule, &dataset.population, &groups, as_of, now) {
            store.record_trigger(&rule.id, now)?;
            tracing::info!(
                rule_id = %rule.id,
                entity_id = %event.entity_id,
                severity = %event.severity,
                "Alert dispatched"
            );
            events.push(event);
        }
    }

    let rules = store
        .rules()
        .iter()
        .map(|r| RuleActivity {
            rule_id: r.id.clone(),
            rule_name: r.name.clone(),
            trigger_count: r.trigger_count,
            last_triggered_at: r.last_triggered_at,
        })
        .collect();

    Ok(DispatchReport {
        as_of,
        events,
        rules,
    })
}

/// Lists the rules of a file whose name or description contains `search`.
pub fn run_list_rules(
    config: &CliConfig,
    rules_path: &str,
    search: Option<&str>,
) -> Result<Vec<RuleListing>> {
    let rules_file: RulesFile = read_json(rules_path, "rules")?;
    let store = build_store(rules_file, id_generator(config));
    let filter = RuleFilter {
        text_contains: search.map(str::to_string),
        ..Default::default()
    };
    Ok(store
        .list_rules(&filter)
        .into_iter()
        .map(|r| RuleListing {
            id: r.id.clone(),
            name: r.name.clone(),
            category: r.category,
            priority: r.priority,
            enabled: r.enabled,
        })
        .collect())
}

/// Rules file holding the built-in defaults, as a starting point for editing.
pub fn default_rules_file() -> RulesFile {
    RulesFile {
        groups: Vec::new(),
        rules: default_rule_drafts(),
    }
}
