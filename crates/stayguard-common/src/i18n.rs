//! Lightweight i18n translation registry.
//!
//! Provides a centralized, static translation map keyed by `(locale, message_key)`.
//! Supported locales: `fr`, `en`. No external i18n framework dependency.

use crate::types::{Baseline, Metric, TimeDirection, TimeWindow};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Default locale when none is configured.
pub const DEFAULT_LOCALE: &str = "fr";

/// Supported locales.
pub const SUPPORTED_LOCALES: &[&str] = &["fr", "en"];

/// Central translation registry.
pub struct Translations {
    map: HashMap<(&'static str, &'static str), &'static str>,
}

impl Translations {
    /// Get a translated string for the given locale and key.
    /// Falls back to `en` if the locale is not found, then to the provided default.
    pub fn get<'a>(&self, locale: &str, key: &str, default: &'a str) -> &'a str {
        if let Some(&val) = self.map.get(&(locale, key)) {
            return val;
        }
        if locale != "en" {
            if let Some(&val) = self.map.get(&("en", key)) {
                return val;
            }
        }
        default
    }
}

/// Global translation singleton.
pub static TRANSLATIONS: LazyLock<Translations> = LazyLock::new(|| {
    let mut map = HashMap::new();

    macro_rules! t {
        ($locale:expr, $key:expr, $val:expr) => {
            map.insert(($locale, $key), $val);
        };
    }

    // ---- Periods ----
    t!("en", "period.past", "last {days} days");
    t!("fr", "period.past", "{days} derniers jours");
    t!("en", "period.future", "next {days} days");
    t!("fr", "period.future", "{days} prochains jours");

    // ---- Metrics ----
    t!("en", "metric.occupancy_rate", "Occupancy rate");
    t!("fr", "metric.occupancy_rate", "Taux d'occupation");
    t!("en", "metric.average_daily_rate", "Average daily rate");
    t!("fr", "metric.average_daily_rate", "Prix moyen par nuit");
    t!("en", "metric.revpan", "Revenue per available night");
    t!("fr", "metric.revpan", "Revenu par nuit disponible");
    t!("en", "metric.revenue", "Revenue");
    t!("fr", "metric.revenue", "Chiffre d'affaires");
    t!("en", "metric.booking_pace", "Booking pace");
    t!("fr", "metric.booking_pace", "Rythme de réservation");
    t!("en", "metric.lead_time", "Booking lead time");
    t!("fr", "metric.lead_time", "Délai de réservation");
    t!("en", "metric.average_length_of_stay", "Average length of stay");
    t!("fr", "metric.average_length_of_stay", "Durée moyenne de séjour");
    t!("en", "metric.cancellation_rate", "Cancellation rate");
    t!("fr", "metric.cancellation_rate", "Taux d'annulation");
    t!("en", "metric.available_nights", "Available nights");
    t!("fr", "metric.available_nights", "Nuits disponibles");
    t!("en", "metric.blocked_nights", "Blocked nights");
    t!("fr", "metric.blocked_nights", "Nuits bloquées");
    t!("en", "metric.minimum_stay", "Minimum stay");
    t!("fr", "metric.minimum_stay", "Séjour minimum");

    // ---- Baselines ----
    t!("en", "baseline.portfolio_average", "the portfolio average");
    t!("fr", "baseline.portfolio_average", "la moyenne du portefeuille");
    t!("en", "baseline.peer_group", "comparable properties");
    t!("fr", "baseline.peer_group", "les biens comparables");
    t!("en", "baseline.previous_period", "the previous period");
    t!("fr", "baseline.previous_period", "la période précédente");
    t!("en", "baseline.previous_year", "the same period last year");
    t!("fr", "baseline.previous_year", "la même période l'an dernier");

    // ---- Alert messages ----
    t!(
        "en",
        "alert.absolute.above",
        "{metric} of {entity} is {value:.1}, above {threshold:.1} ({period})"
    );
    t!(
        "fr",
        "alert.absolute.above",
        "{metric} de {entity} : {value:.1}, au-dessus de {threshold:.1} ({period})"
    );
    t!(
        "en",
        "alert.absolute.below",
        "{metric} of {entity} is {value:.1}, below {threshold:.1} ({period})"
    );
    t!(
        "fr",
        "alert.absolute.below",
        "{metric} de {entity} : {value:.1}, en dessous de {threshold:.1} ({period})"
    );
    t!(
        "en",
        "alert.relative.above",
        "{metric} of {entity} is {delta_percent:.1}% above {baseline} ({value:.1} vs {baseline_value:.1}, {period})"
    );
    t!(
        "fr",
        "alert.relative.above",
        "{metric} de {entity} : {delta_percent:.1} % au-dessus de {baseline} ({value:.1} contre {baseline_value:.1}, {period})"
    );
    t!(
        "en",
        "alert.relative.below",
        "{metric} of {entity} is {delta_percent:.1}% below {baseline} ({value:.1} vs {baseline_value:.1}, {period})"
    );
    t!(
        "fr",
        "alert.relative.below",
        "{metric} de {entity} : {delta_percent:.1} % en dessous de {baseline} ({value:.1} contre {baseline_value:.1}, {period})"
    );

    Translations { map }
});

/// Check whether a locale is supported.
pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Normalize locale: return the locale if supported, otherwise return the default.
pub fn normalize_locale(locale: &str) -> &str {
    if is_supported_locale(locale) {
        locale
    } else {
        DEFAULT_LOCALE
    }
}

/// Human label of an evaluation window, e.g. `"next 30 days"`.
pub fn period_label(locale: &str, window: TimeWindow, direction: TimeDirection) -> String {
    let tmpl = match direction {
        TimeDirection::Past => TRANSLATIONS.get(locale, "period.past", "last {days} days"),
        TimeDirection::Future => TRANSLATIONS.get(locale, "period.future", "next {days} days"),
    };
    tmpl.replace("{days}", &window.days().to_string())
}

pub fn metric_label(locale: &str, metric: Metric) -> String {
    let key = format!("metric.{}", metric.as_str());
    TRANSLATIONS.get(locale, &key, metric.as_str()).to_string()
}

pub fn baseline_label(locale: &str, baseline: Baseline) -> &'static str {
    match baseline {
        Baseline::PortfolioAverage => {
            TRANSLATIONS.get(locale, "baseline.portfolio_average", "the portfolio average")
        }
        Baseline::PeerGroup => {
            TRANSLATIONS.get(locale, "baseline.peer_group", "comparable properties")
        }
        Baseline::PreviousPeriod => {
            TRANSLATIONS.get(locale, "baseline.previous_period", "the previous period")
        }
        Baseline::PreviousYear => {
            TRANSLATIONS.get(locale, "baseline.previous_year", "the same period last year")
        }
    }
}
