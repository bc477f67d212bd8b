use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }
}

#[derive(Serialize)]
struct SamplePlayer {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Club")]
    club: String,
    #[serde(rename = "Nationality")]
    nationality: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Goals")]
    goals: i64,
    #[serde(rename = "Assists")]
    assists: i64,
    #[serde(rename = "Appearances")]
    appearances: i64,
    #[serde(rename = "Wins")]
    wins: i64,
    #[serde(rename = "Losses")]
    losses: i64,
    #[serde(rename = "Shots")]
    shots: i64,
    #[serde(rename = "Shots on target")]
    shots_on_target: i64,
    #[serde(rename = "Goals per match")]
    goals_per_match: Option<f64>,
    #[serde(rename = "Shooting accuracy %")]
    shooting_accuracy: Option<f64>,
}

const CLUBS: [&str; 8] = [
    "Arsenal",
    "Aston Villa",
    "Chelsea",
    "Everton",
    "Liverpool",
    "Manchester City",
    "Newcastle United",
    "Tottenham Hotspur",
];
const NATIONALITIES: [&str; 10] = [
    "Argentina", "Belgium", "Brazil", "England", "France", "Netherlands", "Norway", "Portugal",
    "Scotland", "Spain",
];
const POSITIONS: [&str; 4] = ["Goalkeeper", "Defender", "Midfielder", "Forward"];

fn generate_player(i: usize, rng: &mut SimpleRng) -> SamplePlayer {
    let position = rng.pick(&POSITIONS);
    let appearances = rng.range(1, 38 * 6);
    let attacking = match position {
        "Forward" => 0.45,
        "Midfielder" => 0.2,
        "Defender" => 0.05,
        _ => 0.0,
    };

    let shots = (appearances as f64 * attacking * 5.0 * rng.next_f64()).round() as i64;
    let shots_on_target = (shots as f64 * (0.25 + 0.35 * rng.next_f64())).round() as i64;
    let goals = (shots_on_target as f64 * (0.2 + 0.3 * rng.next_f64())).round() as i64;
    let assists = (appearances as f64 * attacking * 0.4 * rng.next_f64()).round() as i64;
    let wins = (appearances as f64 * (0.3 + 0.3 * rng.next_f64())).round() as i64;
    let losses = (appearances - wins) / 2;

    // Keepers record no shots: the rates stay undefined like in real exports.
    let goals_per_match = (position != "Goalkeeper")
        .then(|| ((goals as f64 / appearances as f64) * 100.0).round() / 100.0);
    let shooting_accuracy = (shots > 0)
        .then(|| ((shots_on_target as f64 / shots as f64) * 100.0).round());

    SamplePlayer {
        name: format!("Player {i:03}"),
        club: rng.pick(&CLUBS).to_string(),
        nationality: rng.pick(&NATIONALITIES).to_string(),
        position: position.to_string(),
        age: rng.range(17, 38),
        goals,
        assists,
        appearances,
        wins,
        losses,
        shots,
        shots_on_target,
        goals_per_match,
        shooting_accuracy,
    }
}

fn write_parquet(players: &[SamplePlayer], path: &str) -> Result<()> {
    let text = |f: fn(&SamplePlayer) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(players.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&SamplePlayer) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(players.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&SamplePlayer) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(players.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, DataType, ArrayRef)> = vec![
        ("Name", DataType::Utf8, text(|p| p.name.as_str())),
        ("Club", DataType::Utf8, text(|p| p.club.as_str())),
        ("Nationality", DataType::Utf8, text(|p| p.nationality.as_str())),
        ("Position", DataType::Utf8, text(|p| p.position.as_str())),
        ("Age", DataType::Int64, int(|p| p.age)),
        ("Goals", DataType::Int64, int(|p| p.goals)),
        ("Assists", DataType::Int64, int(|p| p.assists)),
        ("Appearances", DataType::Int64, int(|p| p.appearances)),
        ("Wins", DataType::Int64, int(|p| p.wins)),
        ("Losses", DataType::Int64, int(|p| p.losses)),
        ("Shots", DataType::Int64, int(|p| p.shots)),
        ("Shots on target", DataType::Int64, int(|p| p.shots_on_target)),
        ("Goals per match", DataType::Float64, float(|p| p.goals_per_match)),
        ("Shooting accuracy %", DataType::Float64, float(|p| p.shooting_accuracy)),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, dtype, _)| Field::new(*name, dtype.clone(), true))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, _, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let players: Vec<SamplePlayer> = (0..200).map(|i| generate_player(i, &mut rng)).collect();

    let json_path = "dataset.json";
    let json = serde_json::to_string_pretty(&players).context("serialising players")?;
    std::fs::write(json_path, json).with_context(|| format!("writing {json_path}"))?;

    let parquet_path = "dataset.parquet";
    write_parquet(&players, parquet_path)?;

    println!(
        "Wrote {} players to {json_path} and {parquet_path}",
        players.len()
    );
    Ok(())
}
