use std::io::Write;
use std::path::Path;

use super::filter::FilteredView;

/// Write the rows of `view` as CSV with the canonical column headers.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, out: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for player in view.iter() {
        writer.serialize(player)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export `view` to a CSV file at `path`, replacing any existing file.
pub fn export_csv(view: &FilteredView<'_>, path: &Path) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(view, file)?;
    log::info!("exported {} players to {}", view.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, init_filter_criteria, NationalityFilter};
    use crate::data::loader::load_file;
    use crate::data::model::tests::player;
    use crate::data::model::Dataset;

    #[test]
    fn header_and_rows() {
        let ds = Dataset::from_players(vec![player("A", 20, 5, "X")]).unwrap();
        let view = apply(&ds, &init_filter_criteria(&ds));

        let mut buf = Vec::new();
        write_csv(&view, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Name,Club,Nationality,Position,Age,Goals,Assists,Appearances,Wins,Losses,\
                 Shots,Shots on target,Goals per match,Shooting accuracy %"
            )
        );
        assert_eq!(lines.next(), Some("A,A FC,X,Forward,20,5,0,0,0,0,0,0,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn exported_view_loads_back() {
        let mut b = player("B", 25, 10, "Y");
        b.goals_per_match = Some(0.4);
        let ds = Dataset::from_players(vec![player("A", 20, 5, "X"), b]).unwrap();
        let mut criteria = init_filter_criteria(&ds);
        criteria.nationality = NationalityFilter::Only("Y".to_string());
        let view = apply(&ds, &criteria);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.csv");
        export_csv(&view, &path).unwrap();

        let reloaded = load_file(&path).unwrap();
        assert_eq!(reloaded.players(), &ds.players()[1..]);
    }
}
