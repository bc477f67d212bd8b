use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::num::ParseFloatError;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{self, Dataset, Player, REQUIRED_COLUMNS};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a player dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Name": "...", "Age": 27, ... }, ...]`
/// * `.csv`     – header row with the column labels, one player per line
/// * `.parquet` – flat columns named like the JSON keys
///
/// Column labels are trimmed before validation, so `" Goals "` is `Goals`.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let players = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };
    log::debug!("parsed {} player records from {}", players.len(), path.display());

    Dataset::from_players(players)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell – a raw value before it is coerced into a Player field
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "'{s}'"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => write!(f, "null"),
        }
    }
}

/// One record keyed by normalised column label.
type Row = BTreeMap<String, Cell>;

fn normalize_column(label: &str) -> String {
    label.trim().to_string()
}

// ---------------------------------------------------------------------------
// Row → Player
// ---------------------------------------------------------------------------

fn player_from_row(index: usize, row: &Row) -> Result<Player, LoadError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !row.contains_key(**col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            row: index,
            columns: missing,
        });
    }

    let text = |col: &str| text_cell(index, col, row.get(col));
    let int = |col: &str| int_cell(index, col, row.get(col));
    let float = |col: &str| float_cell(index, col, row.get(col));

    Ok(Player {
        name: text(model::NAME)?,
        club: text(model::CLUB)?,
        nationality: text(model::NATIONALITY)?,
        position: optional_text_cell(row.get(model::POSITION)),
        age: int(model::AGE)?,
        goals: int(model::GOALS)?,
        assists: int(model::ASSISTS)?,
        appearances: int(model::APPEARANCES)?,
        wins: int(model::WINS)?,
        losses: int(model::LOSSES)?,
        shots: int(model::SHOTS)?,
        shots_on_target: int(model::SHOTS_ON_TARGET)?,
        goals_per_match: float(model::GOALS_PER_MATCH)?,
        shooting_accuracy: float(model::SHOOTING_ACCURACY)?,
    })
}

fn invalid(row: usize, column: &str, reason: impl Into<String>) -> LoadError {
    LoadError::InvalidValue {
        row,
        column: column.to_string(),
        reason: reason.into(),
    }
}

/// Parse a numeric string, tolerating whitespace, a trailing `%` and
/// thousands separators. Blank text is `None`.
fn parse_number(s: &str) -> Option<Result<f64, ParseFloatError>> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }
    Some(s.replace(',', "").parse::<f64>())
}

fn text_cell(row: usize, column: &str, cell: Option<&Cell>) -> Result<String, LoadError> {
    match cell {
        Some(Cell::Text(s)) => Ok(s.clone()),
        Some(Cell::Integer(i)) => Ok(i.to_string()),
        Some(Cell::Float(v)) => Ok(v.to_string()),
        Some(Cell::Bool(b)) => Ok(b.to_string()),
        Some(Cell::Null) | None => Err(invalid(row, column, "missing value")),
    }
}

fn optional_text_cell(cell: Option<&Cell>) -> Option<String> {
    match cell {
        Some(Cell::Text(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Cell::Integer(i)) => Some(i.to_string()),
        Some(Cell::Float(v)) => Some(v.to_string()),
        _ => None,
    }
}

fn int_cell(row: usize, column: &str, cell: Option<&Cell>) -> Result<i64, LoadError> {
    let value = match cell {
        Some(Cell::Integer(i)) => return Ok(*i),
        Some(Cell::Float(v)) => *v,
        Some(Cell::Text(s)) => match parse_number(s) {
            Some(Ok(v)) => v,
            Some(Err(_)) => return Err(invalid(row, column, format!("'{s}' is not a number"))),
            None => return Err(invalid(row, column, "missing value")),
        },
        Some(Cell::Null) | None => return Err(invalid(row, column, "missing value")),
        Some(other) => return Err(invalid(row, column, format!("expected an integer, got {other}"))),
    };

    // 2^63 is exactly `i64::MAX as f64` and already out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Ok(value as i64)
    } else {
        Err(invalid(row, column, format!("expected an integer, got {value}")))
    }
}

/// NaN (including the text "NaN") is a missing value; infinities are rejected.
fn float_cell(row: usize, column: &str, cell: Option<&Cell>) -> Result<Option<f64>, LoadError> {
    let value = match cell {
        Some(Cell::Integer(i)) => *i as f64,
        Some(Cell::Float(v)) => *v,
        Some(Cell::Text(s)) => match parse_number(s) {
            Some(Ok(v)) => v,
            Some(Err(_)) => return Err(invalid(row, column, format!("'{s}' is not a number"))),
            None => return Ok(None),
        },
        Some(Cell::Null) | None => return Ok(None),
        Some(other) => {
            return Err(invalid(row, column, format!("expected a number, got {other}")))
        }
    };

    if value.is_nan() {
        Ok(None)
    } else if value.is_infinite() {
        Err(invalid(row, column, format!("expected a finite number, got {value}")))
    } else {
        Ok(Some(value))
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Name": "Mohamed Salah", "Club": "Liverpool", "Nationality": "Egypt",
///     "Age": 31, "Goals": 19, "Goals per match": 0.59, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Player>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec.as_object().ok_or(LoadError::NotAnObject { row: i })?;
            let row: Row = obj
                .iter()
                .map(|(key, val)| (normalize_column(key), json_to_cell(val)))
                .collect();
            player_from_row(i, &row)
        })
        .collect()
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column labels, every cell kept as text and
/// coerced per column.  Empty cells are missing values.
fn load_csv(path: &Path) -> Result<Vec<Player>, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_column).collect();

    reader
        .records()
        .enumerate()
        .map(|(row_no, result)| {
            let record = result?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(col, value)| {
                    let cell = if value.is_empty() {
                        Cell::Null
                    } else {
                        Cell::Text(value.to_string())
                    };
                    (col.clone(), cell)
                })
                .collect();
            player_from_row(row_no, &row)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<Player>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut players = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let columns: Vec<(String, &ArrayRef)> = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| (normalize_column(field.name()), array))
            .collect();

        for row in 0..batch.num_rows() {
            let cells: Row = columns
                .iter()
                .map(|(name, array)| (name.clone(), extract_cell(array, row)))
                .collect();
            let index = players.len();
            players.push(player_from_row(index, &cells)?);
        }
    }

    Ok(players)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| Cell::Text(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| Cell::Text(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|arr| Cell::Integer(arr.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|arr| Cell::Integer(arr.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|arr| Cell::Float(arr.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|arr| Cell::Float(arr.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|arr| Cell::Bool(arr.value(row))),
        other => Some(Cell::Text(format!("{other:?}"))),
    };
    cell.unwrap_or(Cell::Null)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn record(name: &str, age: i64, nationality: &str) -> JsonValue {
        json!({
            "Name": name,
            "Club": "Arsenal",
            "Nationality": nationality,
            "Position": "Midfielder",
            "Age": age,
            "Goals": 4,
            "Assists": 3,
            "Appearances": 20,
            "Wins": 12,
            "Losses": 4,
            "Shots": 30,
            "Shots on target": 11,
            "Goals per match": 0.2,
            "Shooting accuracy %": "37%"
        })
    }

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_json_records_in_order() {
        let doc = json!([record("A", 20, "Spain"), record("B", 25, "France")]);
        let file = write_temp(".json", &doc.to_string());

        let ds = load_file(file.path()).unwrap();
        let names: Vec<&str> = ds.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(ds.players()[0].shooting_accuracy, Some(37.0));
        assert_eq!(ds.players()[0].position.as_deref(), Some("Midfielder"));
        assert_eq!(ds.age_bounds(), (20, 25));
    }

    #[test]
    fn column_labels_are_trimmed() {
        let mut rec = record("A", 20, "Spain");
        let obj = rec.as_object_mut().unwrap();
        let goals = obj.remove("Goals").unwrap();
        obj.insert("  Goals ".to_string(), goals);
        let file = write_temp(".json", &json!([rec]).to_string());

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.players()[0].goals, 4);
    }

    #[test]
    fn missing_columns_are_reported() {
        let mut rec = record("A", 20, "Spain");
        let obj = rec.as_object_mut().unwrap();
        obj.remove("Wins");
        obj.remove("Club");
        let file = write_temp(".json", &json!([rec]).to_string());

        match load_file(file.path()) {
            Err(LoadError::MissingColumns { row, columns }) => {
                assert_eq!(row, 0);
                assert_eq!(columns, ["Club", "Wins"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn position_is_optional() {
        let mut rec = record("A", 20, "Spain");
        rec.as_object_mut().unwrap().remove("Position");
        let file = write_temp(".json", &json!([rec]).to_string());

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.players()[0].position, None);
    }

    #[test]
    fn fractional_integer_is_invalid() {
        let mut rec = record("A", 20, "Spain");
        rec["Goals"] = json!(4.5);
        let file = write_temp(".json", &json!([rec]).to_string());

        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { column, .. }) if column == "Goals"
        ));
    }

    #[test]
    fn integral_float_is_accepted() {
        let mut rec = record("A", 20, "Spain");
        rec["Age"] = json!(20.0);
        let file = write_temp(".json", &json!([rec]).to_string());

        assert_eq!(load_file(file.path()).unwrap().players()[0].age, 20);
    }

    #[test]
    fn out_of_range_integer_is_invalid() {
        let mut rec = record("A", 20, "Spain");
        rec["Shots"] = json!(1e30);
        let file = write_temp(".json", &json!([rec]).to_string());
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { column, .. }) if column == "Shots"
        ));

        let mut rec = record("A", 20, "Spain");
        rec["Shots"] = json!(u64::MAX);
        let file = write_temp(".json", &json!([rec]).to_string());
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { column, .. }) if column == "Shots"
        ));
    }

    #[test]
    fn nan_text_rate_is_missing() {
        let csv = "Name,Club,Nationality,Age,Goals,Assists,Appearances,Wins,Losses,Shots,Shots on target,Goals per match,Shooting accuracy %\n\
                   A,Arsenal,Spain,20,5,1,10,6,2,12,6,nan,NaN\n\
                   B,Chelsea,France,25,10,2,30,15,9,40,24,0.33,60\n";
        let file = write_temp(".csv", csv);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.players()[0].goals_per_match, None);
        assert_eq!(ds.players()[0].shooting_accuracy, None);
        assert_eq!(ds.players()[1].shooting_accuracy, Some(60.0));
    }

    #[test]
    fn infinite_text_rate_is_invalid() {
        for text in ["inf", "-infinity"] {
            let csv = format!(
                "Name,Club,Nationality,Age,Goals,Assists,Appearances,Wins,Losses,Shots,Shots on target,Goals per match,Shooting accuracy %\n\
                 A,Arsenal,Spain,20,5,1,10,6,2,12,6,0.5,{text}\n"
            );
            let file = write_temp(".csv", &csv);
            assert!(matches!(
                load_file(file.path()),
                Err(LoadError::InvalidValue { row: 0, column, .. }) if column == "Shooting accuracy %"
            ));
        }
    }

    #[test]
    fn null_rate_is_missing() {
        let mut rec = record("A", 20, "Spain");
        rec["Goals per match"] = JsonValue::Null;
        let file = write_temp(".json", &json!([rec]).to_string());

        assert_eq!(load_file(file.path()).unwrap().players()[0].goals_per_match, None);
    }

    #[test]
    fn malformed_documents_fail() {
        let file = write_temp(".json", "{\"Name\": \"A\"}");
        assert!(matches!(load_file(file.path()), Err(LoadError::NotAnArray)));

        let file = write_temp(".json", "[1, 2]");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::NotAnObject { row: 0 })
        ));

        let file = write_temp(".json", "[{");
        assert!(matches!(load_file(file.path()), Err(LoadError::Json(_))));

        let file = write_temp(".json", "[]");
        assert!(matches!(load_file(file.path()), Err(LoadError::Empty)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(load_file(&path), Err(LoadError::Io { .. })));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_csv() {
        let csv = "Name, Club ,Nationality,Age,Goals,Assists,Appearances,Wins,Losses,Shots,Shots on target,Goals per match,Shooting accuracy %\n\
                   A,Arsenal,Spain,20,5,1,10,6,2,12,6,0.5,50%\n\
                   B,Chelsea,France,25,10,2,30,15,9,40,20,,\n";
        let file = write_temp(".csv", csv);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.players()[0].club, "Arsenal");
        assert_eq!(ds.players()[0].shooting_accuracy, Some(50.0));
        assert_eq!(ds.players()[1].goals_per_match, None);
        assert_eq!(ds.players()[1].position, None);
    }

    #[test]
    fn loads_parquet() {
        let schema = Arc::new(Schema::new(
            REQUIRED_COLUMNS
                .iter()
                .map(|col| {
                    let dtype = match *col {
                        model::NAME | model::CLUB | model::NATIONALITY => DataType::Utf8,
                        model::GOALS_PER_MATCH | model::SHOOTING_ACCURACY => DataType::Float64,
                        _ => DataType::Int64,
                    };
                    Field::new(*col, dtype, true)
                })
                .collect::<Vec<_>>(),
        ));
        let columns: Vec<ArrayRef> = schema
            .fields()
            .iter()
            .map(|field| -> ArrayRef {
                match field.data_type() {
                    DataType::Utf8 => Arc::new(StringArray::from(vec!["X", "Y"])),
                    DataType::Float64 => Arc::new(Float64Array::from(vec![Some(0.5), None])),
                    _ => Arc::new(Int64Array::from(vec![21, 30])),
                }
            })
            .collect();
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.age_bounds(), (21, 30));
        assert_eq!(ds.players()[0].goals_per_match, Some(0.5));
        assert_eq!(ds.players()[1].goals_per_match, None);
    }
}
