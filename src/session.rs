use std::fmt;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{
    apply, init_filter_criteria, AgeRange, FilterCriteria, FilteredView,
    NationalityFilter,
};
use crate::data::model::{Dataset, Statistic};
use crate::data::rank::{top_n, RankedRow};
use crate::data::summary::{summarize, Summary};

// ---------------------------------------------------------------------------
// Non-fatal conditions surfaced next to the results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewWarning {
    /// The current criteria match no players.
    EmptyResult,
}

impl fmt::Display for ViewWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewWarning::EmptyResult => f.write_str("No players match the current filters."),
        }
    }
}

// ---------------------------------------------------------------------------
// Session – per-viewer criteria and derived results
// ---------------------------------------------------------------------------

/// One viewer's criteria and the results derived from them.
///
/// The dataset is shared read-only; everything else is owned by the session
/// and recomputed (filter → summary → leaderboard) whenever criteria change.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    criteria: FilterCriteria,
    statistic: Statistic,
    top_n: usize,

    /// Dataset positions passing `criteria` (cached).
    visible: Vec<usize>,
    summary: Summary,
    leaderboard: Vec<RankedRow>,
    color_map: ColorMap,
}

impl Session {
    /// Start a session showing the whole dataset.
    pub fn new(dataset: Arc<Dataset>, statistic: Statistic, top_n: usize) -> Self {
        let criteria = init_filter_criteria(&dataset);
        let color_map = ColorMap::new(dataset.nationalities());
        let mut session = Session {
            dataset,
            criteria,
            statistic,
            top_n,
            visible: Vec::new(),
            summary: Summary::default(),
            leaderboard: Vec::new(),
            color_map,
        };
        session.refilter();
        session
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn leaderboard(&self) -> &[RankedRow] {
        &self.leaderboard
    }

    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    /// The current filtered view.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::from_indices(&self.dataset, &self.visible)
    }

    pub fn warning(&self) -> Option<ViewWarning> {
        self.view().is_empty().then_some(ViewWarning::EmptyResult)
    }

    /// Set the age range, clamped to the dataset-wide bounds.
    pub fn set_age_range(&mut self, range: AgeRange) {
        let range = range.clamped_to(self.dataset.age_bounds());
        if range != self.criteria.age_range {
            self.criteria.age_range = range;
            self.refilter();
        }
    }

    /// Set the nationality predicate. Nationalities absent from the dataset
    /// are rejected and the current selection is kept.
    pub fn set_nationality(&mut self, nationality: NationalityFilter) {
        if nationality == self.criteria.nationality {
            return;
        }
        if let NationalityFilter::Only(n) = &nationality {
            if self.dataset.nationalities().binary_search(n).is_err() {
                log::warn!("ignoring unknown nationality {n:?}");
                return;
            }
        }
        self.criteria.nationality = nationality;
        self.refilter();
    }

    /// Change the ranking statistic; the filtered rows are unaffected.
    pub fn set_statistic(&mut self, statistic: Statistic) {
        if statistic != self.statistic {
            self.statistic = statistic;
            self.rerank();
        }
    }

    /// Recompute `visible` and everything derived from it.
    fn refilter(&mut self) {
        self.visible = apply(&self.dataset, &self.criteria).into_indices();
        let summary = summarize(&self.view());
        self.summary = summary;
        self.rerank();

        log::debug!(
            "ages {}..={}, nationality {} → {} of {} players",
            self.criteria.age_range.min,
            self.criteria.age_range.max,
            self.criteria.nationality,
            self.visible.len(),
            self.dataset.len()
        );
        if let Some(warning) = self.warning() {
            log::warn!("{warning}");
        }
    }

    fn rerank(&mut self) {
        let leaderboard = top_n(&self.view(), self.statistic, self.top_n);
        self.leaderboard = leaderboard;
    }
}
