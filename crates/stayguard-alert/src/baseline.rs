use crate::MetricSampler;
use stayguard_common::types::{Baseline, Metric, Property, SampleWindow};

/// The managed properties a baseline is computed over.
#[derive(Debug, Clone, Default)]
pub struct Population {
    properties: Vec<Property>,
}

impl Population {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    pub fn get(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Guest-capacity brackets used to pick peer properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CapacityBracket {
    /// Up to 2 guests.
    Studio,
    /// 3 to 4 guests.
    Small,
    /// 5 to 6 guests.
    Family,
    /// 7 guests and more.
    Large,
}

impl CapacityBracket {
    pub fn of(capacity: u32) -> Self {
        match capacity {
            0..=2 => Self::Studio,
            3..=4 => Self::Small,
            5..=6 => Self::Family,
            _ => Self::Large,
        }
    }
}

/// Computes the comparison value for a rule's metric and window.
pub struct BaselineResolver<'a> {
    sampler: &'a dyn MetricSampler,
    population: &'a Population,
}

impl<'a> BaselineResolver<'a> {
    pub fn new(sampler: &'a dyn MetricSampler, population: &'a Population) -> Self {
        Self {
            sampler,
            population,
        }
    }

    /// Returns `None` when no sample backs the baseline.
    ///
    /// - `PortfolioAverage`: mean over every property, the entity included.
    /// - `PeerGroup`: mean over the *other* properties in the entity's
    ///   capacity bracket.
    /// - `PreviousPeriod` / `PreviousYear`: the entity's own value for the
    ///   shifted window.
    pub fn resolve(
        &self,
        metric: Metric,
        baseline: Baseline,
        window: &SampleWindow,
        entity: &Property,
    ) -> Option<f64> {
        match baseline {
            Baseline::PortfolioAverage => mean(
                self.population
                    .properties()
                    .iter()
                    .filter_map(|p| self.sampler.sample(&p.id, metric, window)),
            ),
            Baseline::PeerGroup => {
                let bracket = CapacityBracket::of(entity.capacity);
                mean(
                    self.population
                        .properties()
                        .iter()
                        .filter(|p| p.id != entity.id && CapacityBracket::of(p.capacity) == bracket)
                        .filter_map(|p| self.sampler.sample(&p.id, metric, window)),
                )
            }
            Baseline::PreviousPeriod => {
                let shifted = window.previous_period()?;
                self.sampler.sample(&entity.id, metric, &shifted)
            }
            Baseline::PreviousYear => {
                let shifted = window.previous_year()?;
                self.sampler.sample(&entity.id, metric, &shifted)
            }
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::InMemorySampler;
    use chrono::NaiveDate;
    use stayguard_common::types::{TimeDirection, TimeWindow};

    fn property(id: &str, capacity: u32) -> Property {
        Property {
            id: id.to_string(),
            name: id.to_uppercase(),
            capacity,
            area: None,
        }
    }

    fn window() -> SampleWindow {
        SampleWindow::resolve(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            TimeWindow::Days30,
            TimeDirection::Future,
        )
        .unwrap()
    }

    fn setup() -> (InMemorySampler, Population) {
        let population = Population::new(vec![
            property("a", 2),
            property("b", 2),
            property("c", 4),
            property("d", 4),
            property("e", 8),
        ]);
        let mut sampler = InMemorySampler::new();
        let w = window();
        sampler.insert("a", Metric::OccupancyRate, w, 50.0);
        sampler.insert("b", Metric::OccupancyRate, w, 70.0);
        sampler.insert("c", Metric::OccupancyRate, w, 60.0);
        sampler.insert("d", Metric::OccupancyRate, w, 80.0);
        // "e" has no sample for the window
        sampler.insert("a", Metric::OccupancyRate, w.previous_period().unwrap(), 40.0);
        sampler.insert("a", Metric::OccupancyRate, w.previous_year().unwrap(), 65.0);
        (sampler, population)
    }

    #[test]
    fn portfolio_average_skips_missing_samples() {
        let (sampler, population) = setup();
        let resolver = BaselineResolver::new(&sampler, &population);
        let value = resolver.resolve(
            Metric::OccupancyRate,
            Baseline::PortfolioAverage,
            &window(),
            &property("a", 2),
        );
        assert_eq!(value, Some(65.0));
    }

    #[test]
    fn peer_group_excludes_entity_and_other_brackets() {
        let (sampler, population) = setup();
        let resolver = BaselineResolver::new(&sampler, &population);
        let value = resolver.resolve(
            Metric::OccupancyRate,
            Baseline::PeerGroup,
            &window(),
            &property("c", 4),
        );
        assert_eq!(value, Some(80.0));
    }

    #[test]
    fn peer_group_without_peers_is_none() {
        let (sampler, population) = setup();
        let resolver = BaselineResolver::new(&sampler, &population);
        let value = resolver.resolve(
            Metric::OccupancyRate,
            Baseline::PeerGroup,
            &window(),
            &property("e", 8),
        );
        assert_eq!(value, None);
    }

    #[test]
    fn prior_period_baselines() {
        let (sampler, population) = setup();
        let resolver = BaselineResolver::new(&sampler, &population);
        let a = property("a", 2);
        assert_eq!(
            resolver.resolve(Metric::OccupancyRate, Baseline::PreviousPeriod, &window(), &a),
            Some(40.0)
        );
        assert_eq!(
            resolver.resolve(Metric::OccupancyRate, Baseline::PreviousYear, &window(), &a),
            Some(65.0)
        );
        let b = property("b", 2);
        assert_eq!(
            resolver.resolve(Metric::OccupancyRate, Baseline::PreviousPeriod, &window(), &b),
            None
        );
    }

    #[test]
    fn empty_population_is_none() {
        let sampler = InMemorySampler::new();
        let population = Population::default();
        let resolver = BaselineResolver::new(&sampler, &population);
        assert_eq!(
            resolver.resolve(
                Metric::Revenue,
                Baseline::PortfolioAverage,
                &window(),
                &property("x", 2)
            ),
            None
        );
    }

    #[test]
    fn capacity_brackets() {
        assert_eq!(CapacityBracket::of(0), CapacityBracket::Studio);
        assert_eq!(CapacityBracket::of(2), CapacityBracket::Studio);
        assert_eq!(CapacityBracket::of(3), CapacityBracket::Small);
        assert_eq!(CapacityBracket::of(6), CapacityBracket::Family);
        assert_eq!(CapacityBracket::of(12), CapacityBracket::Large);
    }
}
