use stayguard_cli::commands::{
    build_store, default_rules_file, resolve_as_of, run_dispatch, run_evaluate, run_list_rules,
};
use stayguard_cli::config::CliConfig;
use stayguard_common::id::SequentialIdGenerator;
use stayguard_common::types::{EvaluationOutcome, Severity};
use std::path::Path;
use std::sync::Arc;

const RULES: &str = r#"{
  "groups": [
    { "id": "g-studios", "name": "Studios", "criteria": { "max_capacity": 2 } }
  ],
  "rules": [
    {
      "name": "Occupation sous la moyenne",
      "category": "occupancy",
      "priority": "high",
      "metric": "occupancy_rate",
      "baseline": "portfolio_average",
      "threshold_type": "relative",
      "threshold_value": 15.0,
      "threshold_operator": "below",
      "severity_thresholds": { "warning": 10.0, "critical": 20.0 },
      "time_window": "30d",
      "time_direction": "future",
      "channels": ["in_app", "email"]
    },
    {
      "name": "Séjour minimum restrictif",
      "description": "Durée minimale supérieure à 3 nuits",
      "category": "restrictions",
      "metric": "minimum_stay",
      "threshold_type": "absolute",
      "threshold_value": 3.0,
      "threshold_operator": "above",
      "scope": { "type": "group", "group_id": "g-studios" }
    },
    {
      "name": "Prix désactivé",
      "category": "pricing",
      "enabled": false,
      "metric": "average_daily_rate",
      "threshold_value": 20.0,
      "threshold_operator": "above"
    },
    {
      "name": "Seuil invalide",
      "category": "pricing",
      "metric": "average_daily_rate",
      "threshold_value": -1.0,
      "threshold_operator": "above"
    }
  ]
}"#;

const DATASET: &str = r#"{
  "as_of": "2024-06-01",
  "properties": [
    { "id": "p-1", "name": "Studio Panier", "capacity": 2 },
    { "id": "p-2", "name": "T2 Joliette", "capacity": 2 },
    { "id": "p-3", "name": "Villa Roucas", "capacity": 8, "area": "Roucas-Blanc" }
  ],
  "observations": [
    { "entity_id": "p-1", "metric": "occupancy_rate", "start": "2024-06-01", "end": "2024-07-01", "value": 50.0 },
    { "entity_id": "p-2", "metric": "occupancy_rate", "start": "2024-06-01", "end": "2024-07-01", "value": 65.0 },
    { "entity_id": "p-3", "metric": "occupancy_rate", "start": "2024-06-01", "end": "2024-07-01", "value": 80.0 },
    { "entity_id": "p-3", "metric": "occupancy_rate", "start": "2024-07-01", "end": "2024-06-01", "value": 10.0 },
    { "entity_id": "p-9", "metric": "occupancy_rate", "start": "2024-06-01", "end": "2024-07-01", "value": 10.0 }
  ]
}"#;

struct Fixture {
    _dir: tempfile::TempDir,
    config: String,
    rules: String,
    dataset: String,
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn fixture(config_toml: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    Fixture {
        config: write(dir.path(), "stayguard.toml", config_toml),
        rules: write(dir.path(), "rules.json", RULES),
        dataset: write(dir.path(), "dataset.json", DATASET),
        _dir: dir,
    }
}

#[test]
fn evaluate_reports_every_outcome() {
    let f = fixture("locale = \"en\"\n");
    let config = CliConfig::load(&f.config).unwrap();
    let report = run_evaluate(&config, &f.rules, &f.dataset, None).unwrap();

    assert_eq!(report.as_of.to_string(), "2024-06-01");
    // The invalid rule is skipped; the disabled one is still evaluated
    assert_eq!(report.summary.rules, 3);
    assert_eq!(report.summary.triggered, 1);
    // Occupancy: p-2 and p-3. Price: no sample, 3 properties. Min stay: 2 studios.
    assert_eq!(report.summary.not_triggered, 2);
    assert_eq!(report.summary.insufficient_data, 5);
    assert_eq!(report.results.len(), 8);

    let fired = report
        .results
        .iter()
        .find(|r| r.outcome == EvaluationOutcome::Triggered)
        .unwrap();
    assert_eq!(fired.entity_id, "p-1");
    assert_eq!(fired.period, "next 30 days");
}

#[test]
fn evaluate_honours_report_filters() {
    let f = fixture(
        r#"
        locale = "en"
        [evaluation]
        include_insufficient_data = false
        include_not_triggered = false
        "#,
    );
    let config = CliConfig::load(&f.config).unwrap();
    let report = run_evaluate(&config, &f.rules, &f.dataset, None).unwrap();
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.summary.insufficient_data, 5);
}

#[test]
fn explicit_as_of_moves_the_window() {
    let f = fixture("");
    let config = CliConfig::load(&f.config).unwrap();
    let report = run_evaluate(&config, &f.rules, &f.dataset, Some("2024-05-01")).unwrap();
    assert_eq!(report.summary.triggered, 0);
    assert_eq!(report.summary.insufficient_data, 8);
}

#[test]
fn as_of_near_calendar_end_does_not_abort() {
    let f = fixture("");
    let config = CliConfig::load(&f.config).unwrap();
    let report = run_evaluate(&config, &f.rules, &f.dataset, Some("+262142-12-20")).unwrap();
    assert_eq!(report.summary.triggered, 0);
    assert_eq!(report.summary.insufficient_data, 8);

    let report = run_dispatch(&config, &f.rules, &f.dataset, Some("+262142-12-20")).unwrap();
    assert!(report.events.is_empty());
}

#[test]
fn dispatch_min_severity_drops_warnings() {
    let f = fixture("locale = \"en\"\n[dispatch]\nmin_severity = \"critical\"\n");
    let config = CliConfig::load(&f.config).unwrap();
    let report = run_dispatch(&config, &f.rules, &f.dataset, None).unwrap();
    // The only alert is critical, so it passes
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].severity, Severity::Critical);
}

#[test]
fn dispatch_emits_alerts_and_counts_triggers() {
    let f = fixture("locale = \"en\"\n");
    let config = CliConfig::load(&f.config).unwrap();
    let report = run_dispatch(&config, &f.rules, &f.dataset, None).unwrap();

    assert_eq!(report.events.len(), 1);
    let event = &report.events[0];
    assert_eq!(event.entity_id, "p-1");
    assert_eq!(event.severity, Severity::Critical);
    assert_eq!(
        event.message,
        "Occupancy rate of Studio Panier is 23.1% below the portfolio average (50.0 vs 65.0, next 30 days)"
    );

    let occupancy = report
        .rules
        .iter()
        .find(|r| r.rule_id == event.rule_id)
        .unwrap();
    assert_eq!(occupancy.trigger_count, 1);
    assert!(occupancy.last_triggered_at.is_some());
    assert!(report
        .rules
        .iter()
        .filter(|r| r.rule_id != event.rule_id)
        .all(|r| r.trigger_count == 0));
}

#[test]
fn dispatch_messages_default_to_french() {
    let f = fixture("");
    let config = CliConfig::load(&f.config).unwrap();
    let report = run_dispatch(&config, &f.rules, &f.dataset, None).unwrap();
    assert!(report.events[0]
        .message
        .starts_with("Taux d'occupation de Studio Panier"));
}

#[test]
fn list_rules_filters_by_text() {
    let f = fixture("");
    let config = CliConfig::load(&f.config).unwrap();

    let all = run_list_rules(&config, &f.rules, None).unwrap();
    assert_eq!(all.len(), 3);

    let found = run_list_rules(&config, &f.rules, Some("nuits")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Séjour minimum restrictif");
}

#[test]
fn empty_rules_file_falls_back_to_defaults() {
    let defaults = default_rules_file();
    let store = build_store(
        serde_json::from_str("{}").unwrap(),
        Arc::new(SequentialIdGenerator::new("rule")),
    );
    assert_eq!(store.rules().len(), defaults.rules.len());
    assert!(store.rules().iter().all(|r| r.enabled));
}

#[test]
fn missing_files_and_bad_dates_are_errors() {
    let f = fixture("");
    let config = CliConfig::load(&f.config).unwrap();
    assert!(run_evaluate(&config, "/nonexistent/rules.json", &f.dataset, None).is_err());
    assert!(run_evaluate(&config, &f.rules, &f.dataset, Some("01/06/2024")).is_err());
    assert!(resolve_as_of(Some("2024-02-30"), None).is_err());
    assert!(CliConfig::load("/nonexistent/stayguard.toml").is_err());
}
