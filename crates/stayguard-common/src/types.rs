use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use stayguard_common::types::Severity;
///
/// let sev: Severity = "warning".parse().unwrap();
/// assert_eq!(sev, Severity::Warning);
/// assert_eq!(sev.to_string(), "warning");
/// assert!(Severity::Critical > Severity::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Occupancy,
    Pricing,
    Restrictions,
    Availability,
    Revenue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Measurable per-property quantities a rule can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Booked nights over available nights, in percent.
    OccupancyRate,
    /// Average daily rate (revenue per booked night).
    AverageDailyRate,
    /// Revenue per available night.
    Revpan,
    Revenue,
    /// Nights booked during the window.
    BookingPace,
    /// Average days between booking and check-in.
    LeadTime,
    AverageLengthOfStay,
    CancellationRate,
    AvailableNights,
    BlockedNights,
    MinimumStay,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::OccupancyRate => "occupancy_rate",
            Metric::AverageDailyRate => "average_daily_rate",
            Metric::Revpan => "revpan",
            Metric::Revenue => "revenue",
            Metric::BookingPace => "booking_pace",
            Metric::LeadTime => "lead_time",
            Metric::AverageLengthOfStay => "average_length_of_stay",
            Metric::CancellationRate => "cancellation_rate",
            Metric::AvailableNights => "available_nights",
            Metric::BlockedNights => "blocked_nights",
            Metric::MinimumStay => "minimum_stay",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an observed metric is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Mean across every managed property.
    #[default]
    PortfolioAverage,
    /// Mean across properties in the same capacity bracket.
    PeerGroup,
    /// Same property, the window of equal length immediately before.
    PreviousPeriod,
    /// Same property, the same window twelve months earlier.
    PreviousYear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdType {
    Absolute,
    #[default]
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdOperator {
    Above,
    Below,
}

impl ThresholdOperator {
    /// Strict comparison; equality never matches.
    pub fn check(&self, value: f64, threshold: f64) -> bool {
        match self {
            ThresholdOperator::Above => value > threshold,
            ThresholdOperator::Below => value < threshold,
        }
    }
}

/// Deviation magnitudes (in percent) at which a result is upgraded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "14d")]
    Days14,
    #[default]
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "60d")]
    Days60,
    #[serde(rename = "90d")]
    Days90,
}

impl TimeWindow {
    pub fn days(&self) -> i64 {
        match self {
            TimeWindow::Days7 => 7,
            TimeWindow::Days14 => 14,
            TimeWindow::Days30 => 30,
            TimeWindow::Days60 => 60,
            TimeWindow::Days90 => 90,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeDirection {
    Past,
    #[default]
    Future,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerFrequency {
    Realtime,
    #[default]
    Daily,
    Weekly,
}

/// Which properties a rule is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleScope {
    #[default]
    All,
    Selected { entity_ids: Vec<String> },
    Group { group_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    InApp,
    Email,
    Sms,
    Push,
}

/// Half-open date range `[start, end)` a metric is sampled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SampleWindow {
    /// Past windows end at `as_of` (exclusive); future windows start on it.
    ///
    /// Returns `None` when the window would leave the calendar range.
    pub fn resolve(as_of: NaiveDate, window: TimeWindow, direction: TimeDirection) -> Option<Self> {
        let span = Duration::days(window.days());
        Some(match direction {
            TimeDirection::Past => Self {
                start: as_of.checked_sub_signed(span)?,
                end: as_of,
            },
            TimeDirection::Future => Self {
                start: as_of,
                end: as_of.checked_add_signed(span)?,
            },
        })
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The window of equal length ending where this one starts.
    pub fn previous_period(&self) -> Option<Self> {
        let span = Duration::days(self.len_days());
        Some(Self {
            start: self.start.checked_sub_signed(span)?,
            end: self.start,
        })
    }

    /// The same window twelve months earlier, or `None` before the calendar start.
    pub fn previous_year(&self) -> Option<Self> {
        Some(Self {
            start: self.start.checked_sub_months(Months::new(12))?,
            end: self.end.checked_sub_months(Months::new(12))?,
        })
    }
}

/// A managed rental property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    /// Maximum number of guests.
    pub capacity: u32,
    #[serde(default)]
    pub area: Option<String>,
}

/// Persisted alert rule definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: RuleCategory,
    pub enabled: bool,
    pub priority: Priority,
    pub metric: Metric,
    pub baseline: Baseline,
    pub threshold_type: ThresholdType,
    pub threshold_value: f64,
    pub threshold_operator: ThresholdOperator,
    pub severity_thresholds: Option<SeverityThresholds>,
    pub time_window: TimeWindow,
    pub time_direction: TimeDirection,
    pub trigger_frequency: TriggerFrequency,
    pub scope: RuleScope,
    pub channels: Vec<NotificationChannel>,
    pub snoozed_ids: BTreeSet<String>,
    pub muted_ids: BTreeSet<String>,
    /// Minimum days between two notifications for the same property.
    pub cooldown_days: u32,
    /// Days after which stale alerts of this rule are archived by the UI.
    pub auto_archive_days: Option<u32>,
    pub trigger_count: u64,
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    pub fn is_snoozed(&self, entity_id: &str) -> bool {
        self.snoozed_ids.contains(entity_id)
    }

    pub fn is_muted(&self, entity_id: &str) -> bool {
        self.muted_ids.contains(entity_id)
    }

    /// Checks the configuration invariants every stored rule must hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.threshold_value.is_finite() || self.threshold_value < 0.0 {
            return Err(ValidationError::InvalidThreshold(self.threshold_value));
        }
        if let Some(st) = &self.severity_thresholds {
            if !st.warning.is_finite() || !st.critical.is_finite() || st.warning < 0.0 {
                return Err(ValidationError::InvalidSeverityThresholds {
                    warning: st.warning,
                    critical: st.critical,
                });
            }
            if st.warning > st.critical {
                return Err(ValidationError::SeverityThresholdsInverted {
                    warning: st.warning,
                    critical: st.critical,
                });
            }
        }
        if self.channels.is_empty() {
            return Err(ValidationError::NoChannels);
        }
        match &self.scope {
            RuleScope::All => {}
            RuleScope::Selected { entity_ids } => {
                if entity_ids.is_empty() || entity_ids.iter().any(|id| id.trim().is_empty()) {
                    return Err(ValidationError::EmptyScope);
                }
            }
            RuleScope::Group { group_id } => {
                if group_id.trim().is_empty() {
                    return Err(ValidationError::EmptyGroupId);
                }
            }
        }
        Ok(())
    }
}

/// Rule configuration errors, rejected when a rule is created or updated.
///
/// # Examples
///
/// ```rust
/// use stayguard_common::types::ValidationError;
///
/// let err = ValidationError::InvalidThreshold(-1.0);
/// assert!(err.to_string().contains("-1"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("rule name must not be empty")]
    EmptyName,

    #[error("threshold value must be a non-negative number, got {0}")]
    InvalidThreshold(f64),

    #[error("severity thresholds must be non-negative numbers (warning={warning}, critical={critical})")]
    InvalidSeverityThresholds { warning: f64, critical: f64 },

    #[error("warning threshold {warning} exceeds critical threshold {critical}")]
    SeverityThresholdsInverted { warning: f64, critical: f64 },

    #[error("at least one notification channel is required")]
    NoChannels,

    #[error("selected scope must list at least one property")]
    EmptyScope,

    #[error("group scope requires a group id")]
    EmptyGroupId,
}

fn default_true() -> bool {
    true
}

fn default_cooldown_days() -> u32 {
    7
}

fn default_channels() -> Vec<NotificationChannel> {
    vec![NotificationChannel::InApp]
}

/// Input for creating a rule; identity, timestamps and counters are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: RuleCategory,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub priority: Priority,
    pub metric: Metric,
    #[serde(default)]
    pub baseline: Baseline,
    #[serde(default)]
    pub threshold_type: ThresholdType,
    pub threshold_value: f64,
    pub threshold_operator: ThresholdOperator,
    #[serde(default)]
    pub severity_thresholds: Option<SeverityThresholds>,
    #[serde(default)]
    pub time_window: TimeWindow,
    #[serde(default)]
    pub time_direction: TimeDirection,
    #[serde(default)]
    pub trigger_frequency: TriggerFrequency,
    #[serde(default)]
    pub scope: RuleScope,
    #[serde(default = "default_channels")]
    pub channels: Vec<NotificationChannel>,
    #[serde(default = "default_cooldown_days")]
    pub cooldown_days: u32,
    #[serde(default)]
    pub auto_archive_days: Option<u32>,
}

impl RuleDraft {
    /// Builds the stored form of this draft.
    pub fn into_rule(self, id: String, now: DateTime<Utc>) -> Rule {
        Rule {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            enabled: self.enabled,
            priority: self.priority,
            metric: self.metric,
            baseline: self.baseline,
            threshold_type: self.threshold_type,
            threshold_value: self.threshold_value,
            threshold_operator: self.threshold_operator,
            severity_thresholds: self.severity_thresholds,
            time_window: self.time_window,
            time_direction: self.time_direction,
            trigger_frequency: self.trigger_frequency,
            scope: self.scope,
            channels: self.channels,
            snoozed_ids: BTreeSet::new(),
            muted_ids: BTreeSet::new(),
            cooldown_days: self.cooldown_days,
            auto_archive_days: self.auto_archive_days,
            trigger_count: 0,
            last_triggered_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<RuleCategory>,
    pub enabled: Option<bool>,
    pub priority: Option<Priority>,
    pub metric: Option<Metric>,
    pub baseline: Option<Baseline>,
    pub threshold_type: Option<ThresholdType>,
    pub threshold_value: Option<f64>,
    pub threshold_operator: Option<ThresholdOperator>,
    /// `Some(None)` clears the thresholds.
    pub severity_thresholds: Option<Option<SeverityThresholds>>,
    pub time_window: Option<TimeWindow>,
    pub time_direction: Option<TimeDirection>,
    pub trigger_frequency: Option<TriggerFrequency>,
    pub scope: Option<RuleScope>,
    pub channels: Option<Vec<NotificationChannel>>,
    pub cooldown_days: Option<u32>,
    pub auto_archive_days: Option<Option<u32>>,
}

impl RuleUpdate {
    pub fn apply_to(self, rule: &mut Rule) {
        if let Some(v) = self.name {
            rule.name = v;
        }
        if let Some(v) = self.description {
            rule.description = v;
        }
        if let Some(v) = self.category {
            rule.category = v;
        }
        if let Some(v) = self.enabled {
            rule.enabled = v;
        }
        if let Some(v) = self.priority {
            rule.priority = v;
        }
        if let Some(v) = self.metric {
            rule.metric = v;
        }
        if let Some(v) = self.baseline {
            rule.baseline = v;
        }
        if let Some(v) = self.threshold_type {
            rule.threshold_type = v;
        }
        if let Some(v) = self.threshold_value {
            rule.threshold_value = v;
        }
        if let Some(v) = self.threshold_operator {
            rule.threshold_operator = v;
        }
        if let Some(v) = self.severity_thresholds {
            rule.severity_thresholds = v;
        }
        if let Some(v) = self.time_window {
            rule.time_window = v;
        }
        if let Some(v) = self.time_direction {
            rule.time_direction = v;
        }
        if let Some(v) = self.trigger_frequency {
            rule.trigger_frequency = v;
        }
        if let Some(v) = self.scope {
            rule.scope = v;
        }
        if let Some(v) = self.channels {
            rule.channels = v;
        }
        if let Some(v) = self.cooldown_days {
            rule.cooldown_days = v;
        }
        if let Some(v) = self.auto_archive_days {
            rule.auto_archive_days = v;
        }
    }
}

/// Optional membership criteria of a property group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCriteria {
    #[serde(default)]
    pub min_capacity: Option<u32>,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    /// Empty means any area.
    #[serde(default)]
    pub areas: Vec<String>,
}

impl GroupCriteria {
    pub fn matches(&self, property: &Property) -> bool {
        if self.min_capacity.is_some_and(|min| property.capacity < min) {
            return false;
        }
        if self.max_capacity.is_some_and(|max| property.capacity > max) {
            return false;
        }
        if self.areas.is_empty() {
            return true;
        }
        property
            .area
            .as_deref()
            .is_some_and(|area| self.areas.iter().any(|a| a.eq_ignore_ascii_case(area)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub entity_ids: Vec<String>,
    pub criteria: Option<GroupCriteria>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropertyGroup {
    /// Explicit members plus any property matching the criteria.
    pub fn contains(&self, property: &Property) -> bool {
        self.entity_ids.iter().any(|id| id == &property.id)
            || self.criteria.as_ref().is_some_and(|c| c.matches(property))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraft {
    /// Optional caller-chosen id, so seed files can reference the group from rules.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_ids: Vec<String>,
    #[serde(default)]
    pub criteria: Option<GroupCriteria>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub entity_ids: Option<Vec<String>>,
    pub criteria: Option<Option<GroupCriteria>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOutcome {
    Triggered,
    NotTriggered,
    /// Metric or baseline could not be measured; no decision is made.
    InsufficientData,
}

/// Result of evaluating one rule against one property. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub rule_id: String,
    pub entity_id: String,
    pub outcome: EvaluationOutcome,
    pub would_trigger: bool,
    pub metric_value: Option<f64>,
    pub baseline_value: Option<f64>,
    pub delta: Option<f64>,
    pub delta_percent: Option<f64>,
    pub severity: Severity,
    pub period: String,
}

/// Notification produced when a rule fires and passes the dispatch policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub entity_id: String,
    pub metric: Metric,
    pub severity: Severity,
    pub priority: Priority,
    pub message: String,
    pub value: f64,
    pub baseline: f64,
    pub delta_percent: f64,
    pub period: String,
    pub channels: Vec<NotificationChannel>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RuleDraft {
        serde_json::from_str(
            r#"{
                "name": "Occupancy below portfolio",
                "category": "occupancy",
                "metric": "occupancy_rate",
                "threshold_value": 15.0,
                "threshold_operator": "below"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn draft_defaults_apply() {
        let d = draft();
        assert!(d.enabled);
        assert_eq!(d.priority, Priority::Medium);
        assert_eq!(d.baseline, Baseline::PortfolioAverage);
        assert_eq!(d.threshold_type, ThresholdType::Relative);
        assert_eq!(d.time_window, TimeWindow::Days30);
        assert_eq!(d.scope, RuleScope::All);
        assert_eq!(d.channels, vec![NotificationChannel::InApp]);
        assert_eq!(d.cooldown_days, 7);
    }

    #[test]
    fn scope_uses_tagged_representation() {
        let scope: RuleScope =
            serde_json::from_str(r#"{"type":"group","group_id":"g-1"}"#).unwrap();
        assert_eq!(
            scope,
            RuleScope::Group {
                group_id: "g-1".into()
            }
        );
        let window: TimeWindow = serde_json::from_str(r#""14d""#).unwrap();
        assert_eq!(window.days(), 14);
    }

    #[test]
    fn validate_rejects_bad_configuration() {
        let now = Utc::now();
        let mut rule = draft().into_rule("r-1".into(), now);
        assert!(rule.validate().is_ok());

        rule.threshold_value = -1.0;
        assert_eq!(rule.validate(), Err(ValidationError::InvalidThreshold(-1.0)));
        rule.threshold_value = 15.0;

        rule.severity_thresholds = Some(SeverityThresholds {
            warning: 30.0,
            critical: 20.0,
        });
        assert!(matches!(
            rule.validate(),
            Err(ValidationError::SeverityThresholdsInverted { .. })
        ));
        rule.severity_thresholds = Some(SeverityThresholds {
            warning: 20.0,
            critical: 20.0,
        });
        assert!(rule.validate().is_ok());

        rule.channels.clear();
        assert_eq!(rule.validate(), Err(ValidationError::NoChannels));
        rule.channels.push(NotificationChannel::Email);

        rule.scope = RuleScope::Selected { entity_ids: vec![] };
        assert_eq!(rule.validate(), Err(ValidationError::EmptyScope));
    }

    #[test]
    fn sample_window_resolution() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let future = SampleWindow::resolve(as_of, TimeWindow::Days30, TimeDirection::Future).unwrap();
        assert_eq!(future.start, as_of);
        assert_eq!(future.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        let past = SampleWindow::resolve(as_of, TimeWindow::Days7, TimeDirection::Past).unwrap();
        assert_eq!(past.start, NaiveDate::from_ymd_opt(2024, 2, 23).unwrap());
        assert_eq!(past.end, as_of);
        assert_eq!(past.len_days(), 7);

        let prev = past.previous_period().unwrap();
        assert_eq!(prev.end, past.start);
        assert_eq!(prev.len_days(), 7);

        let last_year = future.previous_year().unwrap();
        assert_eq!(last_year.start, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
    }

    #[test]
    fn sample_window_out_of_calendar_is_none() {
        let far_future = NaiveDate::MAX - Duration::days(10);
        assert!(SampleWindow::resolve(far_future, TimeWindow::Days90, TimeDirection::Future).is_none());
        assert!(SampleWindow::resolve(far_future, TimeWindow::Days7, TimeDirection::Future).is_some());

        let far_past = NaiveDate::MIN + Duration::days(3);
        assert!(SampleWindow::resolve(far_past, TimeWindow::Days30, TimeDirection::Past).is_none());
        let first = SampleWindow::resolve(far_past, TimeWindow::Days7, TimeDirection::Future).unwrap();
        assert!(first.previous_period().is_none());
    }

    #[test]
    fn group_criteria_matching() {
        let criteria = GroupCriteria {
            min_capacity: Some(4),
            max_capacity: Some(6),
            areas: vec!["Vieux-Port".into()],
        };
        let mut p = Property {
            id: "p-1".into(),
            name: "T3 Vieux-Port".into(),
            capacity: 4,
            area: Some("vieux-port".into()),
        };
        assert!(criteria.matches(&p));
        p.capacity = 8;
        assert!(!criteria.matches(&p));
        p.capacity = 5;
        p.area = None;
        assert!(!criteria.matches(&p));
    }
}
