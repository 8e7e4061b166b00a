use stayguard_common::types::{
    Baseline, Metric, NotificationChannel, Priority, RuleCategory, RuleDraft, RuleScope,
    SeverityThresholds, ThresholdOperator, ThresholdType, TimeDirection, TimeWindow,
    TriggerFrequency,
};
use stayguard_storage::RuleStore;

/// Default alert rule definitions, used when a rules file lists none.
struct RuleDef {
    name: &'static str,
    description: &'static str,
    category: RuleCategory,
    priority: Priority,
    metric: Metric,
    baseline: Baseline,
    threshold_type: ThresholdType,
    threshold_value: f64,
    operator: ThresholdOperator,
    severity: Option<(f64, f64)>,
    window: TimeWindow,
    direction: TimeDirection,
    frequency: TriggerFrequency,
}

const DEFAULT_RULES: &[RuleDef] = &[
    // ---- Occupancy ----
    RuleDef {
        name: "Occupation inférieure au portefeuille",
        description: "Taux d'occupation à venir nettement sous la moyenne des biens gérés",
        category: RuleCategory::Occupancy,
        priority: Priority::High,
        metric: Metric::OccupancyRate,
        baseline: Baseline::PortfolioAverage,
        threshold_type: ThresholdType::Relative,
        threshold_value: 15.0,
        operator: ThresholdOperator::Below,
        severity: Some((10.0, 20.0)),
        window: TimeWindow::Days30,
        direction: TimeDirection::Future,
        frequency: TriggerFrequency::Daily,
    },
    RuleDef {
        name: "Rythme de réservation en baisse",
        description: "Moins de nuits réservées que sur la période précédente",
        category: RuleCategory::Occupancy,
        priority: Priority::Medium,
        metric: Metric::BookingPace,
        baseline: Baseline::PreviousPeriod,
        threshold_type: ThresholdType::Relative,
        threshold_value: 25.0,
        operator: ThresholdOperator::Below,
        severity: Some((25.0, 50.0)),
        window: TimeWindow::Days14,
        direction: TimeDirection::Future,
        frequency: TriggerFrequency::Daily,
    },
    // ---- Pricing ----
    RuleDef {
        name: "Prix au-dessus des biens comparables",
        description: "Prix moyen par nuit supérieur aux biens de même capacité",
        category: RuleCategory::Pricing,
        priority: Priority::Medium,
        metric: Metric::AverageDailyRate,
        baseline: Baseline::PeerGroup,
        threshold_type: ThresholdType::Relative,
        threshold_value: 20.0,
        operator: ThresholdOperator::Above,
        severity: Some((20.0, 35.0)),
        window: TimeWindow::Days30,
        direction: TimeDirection::Future,
        frequency: TriggerFrequency::Daily,
    },
    // ---- Restrictions ----
    RuleDef {
        name: "Séjour minimum restrictif",
        description: "Durée minimale de séjour supérieure à 3 nuits",
        category: RuleCategory::Restrictions,
        priority: Priority::Medium,
        metric: Metric::MinimumStay,
        baseline: Baseline::PortfolioAverage,
        threshold_type: ThresholdType::Absolute,
        threshold_value: 3.0,
        operator: ThresholdOperator::Above,
        severity: None,
        window: TimeWindow::Days30,
        direction: TimeDirection::Future,
        frequency: TriggerFrequency::Weekly,
    },
    // ---- Availability ----
    RuleDef {
        name: "Nuits bloquées élevées",
        description: "Plus de 10 nuits bloquées par le propriétaire",
        category: RuleCategory::Availability,
        priority: Priority::Low,
        metric: Metric::BlockedNights,
        baseline: Baseline::PortfolioAverage,
        threshold_type: ThresholdType::Absolute,
        threshold_value: 10.0,
        operator: ThresholdOperator::Above,
        severity: None,
        window: TimeWindow::Days30,
        direction: TimeDirection::Future,
        frequency: TriggerFrequency::Weekly,
    },
    // ---- Revenue ----
    RuleDef {
        name: "Chiffre d'affaires en baisse sur un an",
        description: "Revenu du mois écoulé inférieur à la même période l'an dernier",
        category: RuleCategory::Revenue,
        priority: Priority::High,
        metric: Metric::Revenue,
        baseline: Baseline::PreviousYear,
        threshold_type: ThresholdType::Relative,
        threshold_value: 10.0,
        operator: ThresholdOperator::Below,
        severity: Some((10.0, 25.0)),
        window: TimeWindow::Days30,
        direction: TimeDirection::Past,
        frequency: TriggerFrequency::Weekly,
    },
    RuleDef {
        name: "Taux d'annulation anormal",
        description: "Annulations nettement plus fréquentes que sur le portefeuille",
        category: RuleCategory::Revenue,
        priority: Priority::Low,
        metric: Metric::CancellationRate,
        baseline: Baseline::PortfolioAverage,
        threshold_type: ThresholdType::Relative,
        threshold_value: 50.0,
        operator: ThresholdOperator::Above,
        severity: Some((50.0, 100.0)),
        window: TimeWindow::Days90,
        direction: TimeDirection::Past,
        frequency: TriggerFrequency::Weekly,
    },
];

impl RuleDef {
    fn to_draft(&self) -> RuleDraft {
        RuleDraft {
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category,
            enabled: true,
            priority: self.priority,
            metric: self.metric,
            baseline: self.baseline,
            threshold_type: self.threshold_type,
            threshold_value: self.threshold_value,
            threshold_operator: self.operator,
            severity_thresholds: self
                .severity
                .map(|(warning, critical)| SeverityThresholds { warning, critical }),
            time_window: self.window,
            time_direction: self.direction,
            trigger_frequency: self.frequency,
            scope: RuleScope::All,
            channels: vec![NotificationChannel::InApp, NotificationChannel::Email],
            cooldown_days: 7,
            auto_archive_days: Some(30),
        }
    }
}

pub fn default_rule_drafts() -> Vec<RuleDraft> {
    DEFAULT_RULES.iter().map(RuleDef::to_draft).collect()
}

/// Inserts drafts into the store, skipping invalid ones with warnings.
/// Returns the number of rules created.
pub fn seed_rules(store: &mut RuleStore, drafts: Vec<RuleDraft>) -> usize {
    let mut created = 0;
    for draft in drafts {
        let name = draft.name.clone();
        match store.create_rule(draft) {
            Ok(_) => created += 1,
            Err(e) => {
                tracing::warn!(rule_name = %name, error = %e, "Skipping invalid alert rule");
            }
        }
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use stayguard_common::id::SequentialIdGenerator;
    use std::sync::Arc;

    #[test]
    fn default_rules_are_valid() {
        let mut store = RuleStore::new(Arc::new(SequentialIdGenerator::new("rule")));
        let drafts = default_rule_drafts();
        let count = drafts.len();
        assert_eq!(seed_rules(&mut store, drafts), count);
        assert_eq!(store.rules().len(), DEFAULT_RULES.len());
    }

    #[test]
    fn invalid_drafts_are_skipped() {
        let mut store = RuleStore::new(Arc::new(SequentialIdGenerator::new("rule")));
        let mut drafts = default_rule_drafts();
        drafts[0].threshold_value = -1.0;
        let created = seed_rules(&mut store, drafts);
        assert_eq!(created, DEFAULT_RULES.len() - 1);
    }
}
