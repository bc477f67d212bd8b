use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{LoadError, UnknownColumnError};

// ---------------------------------------------------------------------------
// Column labels as they appear in the source file (after trimming)
// ---------------------------------------------------------------------------

pub const NAME: &str = "Name";
pub const CLUB: &str = "Club";
pub const NATIONALITY: &str = "Nationality";
pub const POSITION: &str = "Position";
pub const AGE: &str = "Age";
pub const GOALS: &str = "Goals";
pub const ASSISTS: &str = "Assists";
pub const APPEARANCES: &str = "Appearances";
pub const WINS: &str = "Wins";
pub const LOSSES: &str = "Losses";
pub const SHOTS: &str = "Shots";
pub const SHOTS_ON_TARGET: &str = "Shots on target";
pub const GOALS_PER_MATCH: &str = "Goals per match";
pub const SHOOTING_ACCURACY: &str = "Shooting accuracy %";

/// Columns every record must carry. `Position` is optional.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    NAME,
    CLUB,
    NATIONALITY,
    AGE,
    GOALS,
    ASSISTS,
    APPEARANCES,
    WINS,
    LOSSES,
    SHOTS,
    SHOTS_ON_TARGET,
    GOALS_PER_MATCH,
    SHOOTING_ACCURACY,
];

// ---------------------------------------------------------------------------
// Player – one row of the dataset
// ---------------------------------------------------------------------------

/// A single player's statistics row.
///
/// Serialises with the canonical column labels so exported files load back
/// through the same loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Club")]
    pub club: String,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    #[serde(rename = "Position")]
    pub position: Option<String>,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Goals")]
    pub goals: i64,
    #[serde(rename = "Assists")]
    pub assists: i64,
    #[serde(rename = "Appearances")]
    pub appearances: i64,
    #[serde(rename = "Wins")]
    pub wins: i64,
    #[serde(rename = "Losses")]
    pub losses: i64,
    #[serde(rename = "Shots")]
    pub shots: i64,
    #[serde(rename = "Shots on target")]
    pub shots_on_target: i64,
    /// Missing for players without a defined rate.
    #[serde(rename = "Goals per match")]
    pub goals_per_match: Option<f64>,
    #[serde(rename = "Shooting accuracy %")]
    pub shooting_accuracy: Option<f64>,
}

// ---------------------------------------------------------------------------
// StatValue – a single statistic cell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Integer(i) => *i as f64,
            StatValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Integer(i) => write!(f, "{i}"),
            StatValue::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Statistic – the closed set of rankable / plottable columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Statistic {
    Goals,
    Assists,
    Age,
    Appearances,
    Wins,
    Losses,
    GoalsPerMatch,
    Shots,
    ShotsOnTarget,
    ShootingAccuracy,
}

impl Statistic {
    /// Selector order.
    pub const ALL: [Statistic; 10] = [
        Statistic::Goals,
        Statistic::Assists,
        Statistic::Age,
        Statistic::Appearances,
        Statistic::Wins,
        Statistic::Losses,
        Statistic::GoalsPerMatch,
        Statistic::Shots,
        Statistic::ShotsOnTarget,
        Statistic::ShootingAccuracy,
    ];

    /// Column label in the dataset (also the label shown to the user).
    pub fn label(self) -> &'static str {
        match self {
            Statistic::Goals => GOALS,
            Statistic::Assists => ASSISTS,
            Statistic::Age => AGE,
            Statistic::Appearances => APPEARANCES,
            Statistic::Wins => WINS,
            Statistic::Losses => LOSSES,
            Statistic::GoalsPerMatch => GOALS_PER_MATCH,
            Statistic::Shots => SHOTS,
            Statistic::ShotsOnTarget => SHOTS_ON_TARGET,
            Statistic::ShootingAccuracy => SHOOTING_ACCURACY,
        }
    }

    /// The player's value for this statistic, `None` when missing.
    pub fn value(self, player: &Player) -> Option<StatValue> {
        let int = |v: i64| Some(StatValue::Integer(v));
        match self {
            Statistic::Goals => int(player.goals),
            Statistic::Assists => int(player.assists),
            Statistic::Age => int(player.age),
            Statistic::Appearances => int(player.appearances),
            Statistic::Wins => int(player.wins),
            Statistic::Losses => int(player.losses),
            Statistic::Shots => int(player.shots),
            Statistic::ShotsOnTarget => int(player.shots_on_target),
            Statistic::GoalsPerMatch => player.goals_per_match.map(StatValue::Float),
            Statistic::ShootingAccuracy => player.shooting_accuracy.map(StatValue::Float),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Statistic {
    type Err = UnknownColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.label() == s)
            .ok_or_else(|| UnknownColumnError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table, immutable after construction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dataset {
    players: Vec<Player>,
    age_bounds: (i64, i64),
    nationalities: Vec<String>,
}

impl Dataset {
    /// Build the dataset and its derived indices. At least one player is
    /// required, otherwise no age bounds exist.
    pub fn from_players(players: Vec<Player>) -> Result<Self, LoadError> {
        let min_age = players.iter().map(|p| p.age).min().ok_or(LoadError::Empty)?;
        let max_age = players.iter().map(|p| p.age).max().ok_or(LoadError::Empty)?;

        let nationalities: Vec<String> = players
            .iter()
            .map(|p| p.nationality.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Dataset {
            players,
            age_bounds: (min_age, max_age),
            nationalities,
        })
    }

    /// All players in load order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Dataset-wide `(min, max)` age, both inclusive.
    pub fn age_bounds(&self) -> (i64, i64) {
        self.age_bounds
    }

    /// Distinct nationalities, sorted ascending.
    pub fn nationalities(&self) -> &[String] {
        &self.nationalities
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fixture player with every integer stat at zero.
    pub(crate) fn player(name: &str, age: i64, goals: i64, nationality: &str) -> Player {
        Player {
            name: name.to_string(),
            club: format!("{name} FC"),
            nationality: nationality.to_string(),
            position: Some("Forward".to_string()),
            age,
            goals,
            assists: 0,
            appearances: 0,
            wins: 0,
            losses: 0,
            shots: 0,
            shots_on_target: 0,
            goals_per_match: None,
            shooting_accuracy: None,
        }
    }

    #[test]
    fn dataset_indices() {
        let ds = Dataset::from_players(vec![
            player("A", 20, 5, "Spain"),
            player("B", 31, 2, "England"),
            player("C", 25, 9, "Spain"),
        ])
        .unwrap();
        assert_eq!(ds.age_bounds(), (20, 31));
        assert_eq!(ds.nationalities(), ["England", "Spain"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            Dataset::from_players(Vec::new()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn statistic_labels_round_trip() {
        for stat in Statistic::ALL {
            assert_eq!(stat.label().parse::<Statistic>(), Ok(stat));
        }
        assert_eq!(
            "goals".parse::<Statistic>(),
            Err(UnknownColumnError("goals".to_string()))
        );
    }

    #[test]
    fn missing_rate_has_no_value() {
        let mut p = player("A", 20, 5, "Spain");
        assert_eq!(Statistic::GoalsPerMatch.value(&p), None);
        p.goals_per_match = Some(0.25);
        assert_eq!(
            Statistic::GoalsPerMatch.value(&p),
            Some(StatValue::Float(0.25))
        );
        assert_eq!(Statistic::Goals.value(&p), Some(StatValue::Integer(5)));
    }

    #[test]
    fn stat_value_display() {
        assert_eq!(StatValue::Integer(12).to_string(), "12");
        assert_eq!(StatValue::Float(0.456).to_string(), "0.46");
    }
}
