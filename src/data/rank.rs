use super::filter::FilteredView;
use super::model::{StatValue, Statistic};

/// Rows shown in the leaderboard.
pub const DEFAULT_TOP_N: usize = 5;

/// One leaderboard row, projected to the identifying fields plus the
/// ranking value.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub name: String,
    pub club: String,
    pub nationality: String,
    pub value: StatValue,
}

/// The `n` highest rows of `view` by `stat`, descending.
///
/// Ties keep their order in the view (stable sort). Rows with no value for
/// `stat` are left out.
pub fn top_n(view: &FilteredView<'_>, stat: Statistic, n: usize) -> Vec<RankedRow> {
    let mut candidates: Vec<_> = view
        .iter()
        .filter_map(|p| stat.value(p).map(|v| (p, v)))
        .collect();

    // `sort_by` is stable; compare b to a for descending order.
    candidates.sort_by(|(_, a), (_, b)| b.as_f64().total_cmp(&a.as_f64()));

    candidates
        .into_iter()
        .take(n)
        .map(|(p, value)| RankedRow {
            name: p.name.clone(),
            club: p.club.clone(),
            nationality: p.nationality.clone(),
            value,
        })
        .collect()
}
