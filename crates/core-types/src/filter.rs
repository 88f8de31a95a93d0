use crate::enums::FilterDimension;
use serde::{Deserialize, Serialize};

/// The active selection: four independent selectors, `None` meaning "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub country: Option<String>,
    pub competitor: Option<String>,
    pub segment: Option<String>,
    pub kit_size: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: FilterDimension) -> Option<&str> {
        match dimension {
            FilterDimension::Country => self.country.as_deref(),
            FilterDimension::Competitor => self.competitor.as_deref(),
            FilterDimension::Segment => self.segment.as_deref(),
            FilterDimension::KitSize => self.kit_size.as_deref(),
        }
    }

    fn slot(&mut self, dimension: FilterDimension) -> &mut Option<String> {
        match dimension {
            FilterDimension::Country => &mut self.country,
            FilterDimension::Competitor => &mut self.competitor,
            FilterDimension::Segment => &mut self.segment,
            FilterDimension::KitSize => &mut self.kit_size,
        }
    }

    /// Returns the state after changing one selector.
    ///
    /// Every dimension with lower priority than `dimension` is cleared, so the
    /// new selection can never combine with a stale one that no row satisfies.
    /// Empty strings are treated as clearing the selector.
    pub fn select(&self, dimension: FilterDimension, value: Option<String>) -> FilterState {
        let mut next = self.clone();
        *next.slot(dimension) = value.filter(|v| !v.is_empty());
        for lower in FilterDimension::ALL.iter().filter(|d| **d > dimension) {
            *next.slot(*lower) = None;
        }
        next
    }

    /// Keeps only the selectors strictly above `dimension` in priority.
    pub fn narrowed_to_parents_of(&self, dimension: FilterDimension) -> FilterState {
        let mut parents = FilterState::new();
        for d in dimension.higher_priority() {
            *parents.slot(*d) = self.get(*d).map(str::to_string);
        }
        parents
    }

    /// The selectors currently set, in priority order.
    pub fn active(&self) -> impl Iterator<Item = (FilterDimension, &str)> + '_ {
        FilterDimension::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|v| (d, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}
