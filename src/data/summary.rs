use std::fmt;

use super::filter::FilteredView;
use super::model::{Player, Statistic};

// ---------------------------------------------------------------------------
// Mean – explicit "no data" instead of NaN
// ---------------------------------------------------------------------------

/// Arithmetic mean of a column, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mean {
    Value(f64),
    /// No rows (or no present values) to average.
    #[default]
    NoData,
}

impl Mean {
    /// Mean of `values`, rounded half-to-even at two decimals.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        let (sum, n) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        if n == 0 {
            Mean::NoData
        } else {
            Mean::Value(round2(sum / n as f64))
        }
    }
}

impl fmt::Display for Mean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mean::Value(v) => write!(f, "{v:.2}"),
            Mean::NoData => f.write_str("no data"),
        }
    }
}

/// Round to two decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ---------------------------------------------------------------------------
// Summary metrics over a filtered view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub mean_goals: Mean,
    pub mean_assists: Mean,
    pub mean_appearances: Mean,
}

/// Mean of one statistic over the view, skipping missing values.
pub fn mean_of(view: &FilteredView<'_>, stat: Statistic) -> Mean {
    Mean::of(view.iter().filter_map(|p| stat.value(p)).map(|v| v.as_f64()))
}

/// Compute the headline metrics. Never fails: an empty view yields
/// `count == 0` and [`Mean::NoData`] everywhere.
pub fn summarize(view: &FilteredView<'_>) -> Summary {
    let column = |f: fn(&Player) -> i64| Mean::of(view.iter().map(|p| f(p) as f64));

    Summary {
        count: view.len(),
        mean_goals: column(|p| p.goals),
        mean_assists: column(|p| p.assists),
        mean_appearances: column(|p| p.appearances),
    }
}
