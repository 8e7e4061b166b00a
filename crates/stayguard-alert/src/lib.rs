//! Rule evaluation engine for property metrics.
//!
//! A rule compares a property's metric over a time window against a
//! baseline (portfolio, peer group or a prior period). The
//! [`threshold`] module decides whether the rule fires, [`severity`]
//! labels the deviation, and [`engine::AlertEngine`] ties both together
//! with scope resolution and the notification policy (snooze, mute,
//! cooldown).

pub mod baseline;
pub mod engine;
pub mod sampler;
pub mod severity;
pub mod threshold;


use stayguard_common::types::{Metric, SampleWindow};

/// Source of metric observations.
///
/// Implementations answer "what was (or will be) `metric` for this
/// property over `window`". `None` is an explicit absence of data, which
/// the engine reports as insufficient data rather than as zero.
pub trait MetricSampler: Send + Sync {
    fn sample(&self, entity_id: &str, metric: Metric, window: &SampleWindow) -> Option<f64>;
}
