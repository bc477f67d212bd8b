use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{self, Player};
use crate::session::Session;

const COLUMNS: [&str; 15] = [
    "#",
    model::NAME,
    model::CLUB,
    model::NATIONALITY,
    model::POSITION,
    model::AGE,
    model::GOALS,
    model::ASSISTS,
    model::APPEARANCES,
    model::WINS,
    model::LOSSES,
    model::SHOTS,
    model::SHOTS_ON_TARGET,
    model::GOALS_PER_MATCH,
    model::SHOOTING_ACCURACY,
];

fn optional(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

/// Display cells for one row; the first cell is the position in the view.
fn cells(position: usize, p: &Player) -> [String; 15] {
    [
        position.to_string(),
        p.name.clone(),
        p.club.clone(),
        p.nationality.clone(),
        p.position.clone().unwrap_or_default(),
        p.age.to_string(),
        p.goals.to_string(),
        p.assists.to_string(),
        p.appearances.to_string(),
        p.wins.to_string(),
        p.losses.to_string(),
        p.shots.to_string(),
        p.shots_on_target.to_string(),
        optional(p.goals_per_match),
        optional(p.shooting_accuracy),
    ]
}

// ---------------------------------------------------------------------------
// Full filtered view as a table (re-indexed from 0)
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, session: &Session) {
    ui.strong("Player Data Table");
    let players: Vec<&Player> = session.view().iter().collect();

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        ui.push_id("data_table", |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .columns(Column::auto(), COLUMNS.len())
                .header(20.0, |mut header| {
                    for title in COLUMNS {
                        header.col(|ui: &mut Ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, players.len(), |mut row| {
                        let i = row.index();
                        for cell in cells(i, players[i]) {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::player;

    #[test]
    fn cells_line_up_with_headers() {
        let mut p = player("A", 20, 5, "X");
        p.shooting_accuracy = Some(41.0);
        let row = cells(3, &p);
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "3");
        assert_eq!(row[1], "A");
        assert_eq!(row[5], "20");
        assert_eq!(row[13], "-");
        assert_eq!(row[14], "41.00");
    }
}
