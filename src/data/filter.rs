use std::borrow::Cow;
use std::fmt;

use super::model::{Dataset, Player};

// ---------------------------------------------------------------------------
// Filter criteria: inclusive age range + optional nationality
// ---------------------------------------------------------------------------

/// Inclusive age range. `min > max` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i64,
    pub max: i64,
}

impl AgeRange {
    pub fn new(min: i64, max: i64) -> Self {
        AgeRange { min, max }
    }

    pub fn contains(&self, age: i64) -> bool {
        self.min <= age && age <= self.max
    }

    /// Clamp both bounds into `[lo, hi]` without reordering them.
    pub fn clamped_to(self, (lo, hi): (i64, i64)) -> Self {
        AgeRange {
            min: self.min.clamp(lo, hi),
            max: self.max.clamp(lo, hi),
        }
    }
}

/// Nationality predicate. `All` is the sentinel for "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NationalityFilter {
    #[default]
    All,
    Only(String),
}

impl NationalityFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// Interpret a selector label. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Self {
        if label == Self::ALL_LABEL {
            NationalityFilter::All
        } else {
            NationalityFilter::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NationalityFilter::All => Self::ALL_LABEL,
            NationalityFilter::Only(n) => n,
        }
    }

    pub fn matches(&self, nationality: &str) -> bool {
        match self {
            NationalityFilter::All => true,
            NationalityFilter::Only(n) => n == nationality,
        }
    }
}

impl fmt::Display for NationalityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub age_range: AgeRange,
    pub nationality: NationalityFilter,
}

impl FilterCriteria {
    /// Keep a player iff its age is in range and its nationality matches.
    pub fn accepts(&self, player: &Player) -> bool {
        self.age_range.contains(player.age) && self.nationality.matches(&player.nationality)
    }
}

/// Criteria that select the whole dataset: full age range, all nationalities.
pub fn init_filter_criteria(dataset: &Dataset) -> FilterCriteria {
    let (min, max) = dataset.age_bounds();
    FilterCriteria {
        age_range: AgeRange::new(min, max),
        nationality: NationalityFilter::All,
    }
}

/// Selector entries: `"All"` followed by the sorted distinct nationalities.
pub fn nationality_options(dataset: &Dataset) -> Vec<String> {
    std::iter::once(NationalityFilter::ALL_LABEL.to_string())
        .chain(dataset.nationalities().iter().cloned())
        .collect()
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] that passed a filter, in dataset order.
///
/// Holds positions into the dataset rather than copies, so it can never
/// disagree with the rows it was derived from.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Cow<'a, [usize]>,
}

impl<'a> FilteredView<'a> {
    /// Wrap previously computed positions (e.g. cached by a session).
    pub fn from_indices(dataset: &'a Dataset, indices: &'a [usize]) -> Self {
        FilteredView {
            dataset,
            indices: Cow::Borrowed(indices),
        }
    }

    /// Dataset positions of the rows in this view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices.into_owned()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Player> + '_ {
        let players = self.dataset.players();
        self.indices.iter().map(move |&i| &players[i])
    }
}

/// Return dataset positions of the players accepted by `criteria`.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .players()
        .iter()
        .enumerate()
        .filter(|(_, p)| criteria.accepts(p))
        .map(|(i, _)| i)
        .collect()
}

/// Apply `criteria` to `dataset`. Zero matching rows is a valid result.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView {
        dataset,
        indices: Cow::Owned(filtered_indices(dataset, criteria)),
    }
}
