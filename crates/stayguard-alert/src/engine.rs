use crate::baseline::{BaselineResolver, Population};
use crate::severity::classify;
use crate::threshold::evaluate;
use crate::MetricSampler;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use stayguard_common::i18n::{self, TRANSLATIONS};
use stayguard_common::id::IdGenerator;
use stayguard_common::types::{
    AlertEvent, EvaluationOutcome, EvaluationResult, Property, PropertyGroup, Rule, RuleScope,
    SampleWindow, Severity, ThresholdOperator, ThresholdType,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Key: (rule_id, entity_id)
type CooldownKey = (String, String);

pub struct AlertEngine {
    sampler: Box<dyn MetricSampler>,
    ids: Arc<dyn IdGenerator>,
    locale: String,
    min_severity: Severity,
    last_fired: HashMap<CooldownKey, DateTime<Utc>>,
}

impl AlertEngine {
    pub fn new(sampler: Box<dyn MetricSampler>, ids: Arc<dyn IdGenerator>, locale: &str) -> Self {
        Self {
            sampler,
            ids,
            locale: i18n::normalize_locale(locale).to_string(),
            min_severity: Severity::Info,
            last_fired: HashMap::new(),
        }
    }

    /// Alerts below `min_severity` are dropped by [`dispatch`](Self::dispatch)
    /// without starting a cooldown.
    pub fn with_min_severity(mut self, min_severity: Severity) -> Self {
        self.min_severity = min_severity;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Last time an alert was dispatched for the pair, if any.
    pub fn last_fired(&self, rule_id: &str, entity_id: &str) -> Option<DateTime<Utc>> {
        self.last_fired
            .get(&(rule_id.to_string(), entity_id.to_string()))
            .copied()
    }

    pub fn clear_cooldowns(&mut self) {
        self.last_fired.clear();
    }

    /// Evaluates a rule against every property in its scope.
    ///
    /// Enabled flag, snooze and mute are ignored: this is the what-if view.
    pub fn evaluate_rule(
        &self,
        rule: &Rule,
        population: &Population,
        groups: &[PropertyGroup],
        as_of: NaiveDate,
    ) -> Vec<EvaluationResult> {
        scope_entities(rule, population, groups)
            .into_iter()
            .map(|entity| self.evaluate_entity(rule, entity, population, as_of))
            .collect()
    }

    /// Evaluates a rule for a single property.
    pub fn evaluate_entity(
        &self,
        rule: &Rule,
        entity: &Property,
        population: &Population,
        as_of: NaiveDate,
    ) -> EvaluationResult {
        let period = i18n::period_label(&self.locale, rule.time_window, rule.time_direction);
        let window = SampleWindow::resolve(as_of, rule.time_window, rule.time_direction);

        let (metric_value, baseline_value) = match &window {
            Some(window) => (
                self.sampler.sample(&entity.id, rule.metric, window),
                BaselineResolver::new(&*self.sampler, population).resolve(
                    rule.metric,
                    rule.baseline,
                    window,
                    entity,
                ),
            ),
            None => {
                tracing::warn!(
                    rule_id = %rule.id,
                    %as_of,
                    window = rule.time_window.days(),
                    "Sample window out of calendar range"
                );
                (None, None)
            }
        };

        let insufficient = |metric_value: Option<f64>, baseline_value: Option<f64>| EvaluationResult {
            rule_id: rule.id.clone(),
            entity_id: entity.id.clone(),
            outcome: EvaluationOutcome::InsufficientData,
            would_trigger: false,
            metric_value,
            baseline_value,
            delta: None,
            delta_percent: None,
            severity: Severity::Info,
            period: period.clone(),
        };

        let (Some(value), Some(baseline)) = (metric_value, baseline_value) else {
            tracing::debug!(
                rule_id = %rule.id,
                entity_id = %entity.id,
                metric = %rule.metric,
                has_value = metric_value.is_some(),
                has_baseline = baseline_value.is_some(),
                "Insufficient data for evaluation"
            );
            return insufficient(metric_value, baseline_value);
        };

        // A relative deviation from a zero baseline has no meaning
        if rule.threshold_type == ThresholdType::Relative && baseline == 0.0 {
            return insufficient(metric_value, baseline_value);
        }

        let eval = evaluate(
            value,
            baseline,
            rule.threshold_type,
            rule.threshold_value,
            rule.threshold_operator,
        );
        let severity = classify(eval.delta_percent, rule.severity_thresholds.as_ref());

        EvaluationResult {
            rule_id: rule.id.clone(),
            entity_id: entity.id.clone(),
            outcome: if eval.would_trigger {
                EvaluationOutcome::Triggered
            } else {
                EvaluationOutcome::NotTriggered
            },
            would_trigger: eval.would_trigger,
            metric_value,
            baseline_value,
            delta: Some(eval.delta),
            delta_percent: Some(eval.delta_percent),
            severity,
            period,
        }
    }

    /// Evaluates a rule and returns the alerts that should be sent.
    ///
    /// Disabled rules produce nothing. Snoozed or muted properties, alerts
    /// below the minimum severity and pairs still inside the rule's cooldown
    /// are dropped. Dispatched pairs start a new cooldown at `now`.
    pub fn dispatch(
        &mut self,
        rule: &Rule,
        population: &Population,
        groups: &[PropertyGroup],
        as_of: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<AlertEvent> {
        if !rule.enabled {
            tracing::debug!(rule_id = %rule.id, "Rule disabled, skipping dispatch");
            return Vec::new();
        }

        let cooldown = Duration::days(i64::from(rule.cooldown_days));
        self.evict_expired(&rule.id, cooldown, now);
        let mut events = Vec::new();

        for result in self.evaluate_rule(rule, population, groups, as_of) {
            if !result.would_trigger {
                continue;
            }

            if result.severity < self.min_severity {
                tracing::debug!(
                    rule_id = %rule.id,
                    entity_id = %result.entity_id,
                    severity = %result.severity,
                    "Alert below minimum severity, dropped"
                );
                continue;
            }

            if rule.is_snoozed(&result.entity_id) || rule.is_muted(&result.entity_id) {
                tracing::debug!(
                    rule_id = %rule.id,
                    entity_id = %result.entity_id,
                    snoozed = rule.is_snoozed(&result.entity_id),
                    muted = rule.is_muted(&result.entity_id),
                    "Alert suppressed (snooze/mute)"
                );
                continue;
            }

            let key = (rule.id.clone(), result.entity_id.clone());
            let suppressed = self
                .last_fired
                .get(&key)
                .is_some_and(|last| now - *last < cooldown);

            if suppressed {
                tracing::debug!(
                    rule_id = %rule.id,
                    entity_id = %result.entity_id,
                    cooldown_days = rule.cooldown_days,
                    "Alert suppressed (cooldown)"
                );
                continue;
            }

            self.last_fired.insert(key, now);
            let entity_name = population
                .get(&result.entity_id)
                .map(|p| p.name.as_str())
                .unwrap_or(result.entity_id.as_str());
            events.push(self.build_event(rule, entity_name, &result, now));
        }

        events
    }

    /// Forgets fires of `rule_id` whose cooldown has elapsed.
    fn evict_expired(&mut self, rule_id: &str, cooldown: Duration, now: DateTime<Utc>) {
        self.last_fired
            .retain(|(rid, _), last| rid != rule_id || now - *last < cooldown);
    }

    /// Number of (rule, entity) pairs currently tracked for cooldown.
    pub fn tracked_cooldowns(&self) -> usize {
        self.last_fired.len()
    }

    fn build_event(
        &self,
        rule: &Rule,
        entity_name: &str,
        result: &EvaluationResult,
        now: DateTime<Utc>,
    ) -> AlertEvent {
        let value = result.metric_value.unwrap_or_default();
        let baseline = result.baseline_value.unwrap_or_default();
        let delta_percent = result.delta_percent.unwrap_or_default();

        AlertEvent {
            id: self.ids.next_id(),
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            entity_id: result.entity_id.clone(),
            metric: rule.metric,
            severity: result.severity,
            priority: rule.priority,
            message: self.render_message(rule, entity_name, value, baseline, delta_percent, &result.period),
            value,
            baseline,
            delta_percent,
            period: result.period.clone(),
            channels: rule.channels.clone(),
            timestamp: now,
        }
    }

    fn render_message(
        &self,
        rule: &Rule,
        entity_name: &str,
        value: f64,
        baseline: f64,
        delta_percent: f64,
        period: &str,
    ) -> String {
        let locale = self.locale.as_str();
        let (key, default) = match (rule.threshold_type, rule.threshold_operator) {
            (ThresholdType::Absolute, ThresholdOperator::Above) => (
                "alert.absolute.above",
                "{metric} of {entity} is {value:.1}, above {threshold:.1} ({period})",
            ),
            (ThresholdType::Absolute, ThresholdOperator::Below) => (
                "alert.absolute.below",
                "{metric} of {entity} is {value:.1}, below {threshold:.1} ({period})",
            ),
            (ThresholdType::Relative, ThresholdOperator::Above) => (
                "alert.relative.above",
                "{metric} of {entity} is {delta_percent:.1}% above {baseline} ({value:.1} vs {baseline_value:.1}, {period})",
            ),
            (ThresholdType::Relative, ThresholdOperator::Below) => (
                "alert.relative.below",
                "{metric} of {entity} is {delta_percent:.1}% below {baseline} ({value:.1} vs {baseline_value:.1}, {period})",
            ),
        };

        TRANSLATIONS
            .get(locale, key, default)
            .replace("{metric}", &i18n::metric_label(locale, rule.metric))
            .replace("{value:.1}", &format!("{value:.1}"))
            .replace("{threshold:.1}", &format!("{:.1}", rule.threshold_value))
            .replace("{delta_percent:.1}", &format!("{:.1}", delta_percent.abs()))
            .replace("{baseline}", i18n::baseline_label(locale, rule.baseline))
            .replace("{baseline_value:.1}", &format!("{baseline:.1}"))
            .replace("{period}", period)
            .replace("{entity}", entity_name)
    }
}

/// Properties a rule applies to, in population order.
///
/// Unknown ids in a selected scope are skipped; a group scope pointing at
/// a missing group yields no property.
pub fn scope_entities<'p>(
    rule: &Rule,
    population: &'p Population,
    groups: &[PropertyGroup],
) -> Vec<&'p Property> {
    match &rule.scope {
        RuleScope::All => population.properties().iter().collect(),
        RuleScope::Selected { entity_ids } => population
            .properties()
            .iter()
            .filter(|p| entity_ids.contains(&p.id))
            .collect(),
        RuleScope::Group { group_id } => match groups.iter().find(|g| &g.id == group_id) {
            Some(group) => population
                .properties()
                .iter()
                .filter(|p| group.contains(p))
                .collect(),
            None => {
                tracing::warn!(
                    rule_id = %rule.id,
                    group_id = %group_id,
                    "Rule references an unknown property group"
                );
                Vec::new()
            }
        },
    }
}
