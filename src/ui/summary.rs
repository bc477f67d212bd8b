use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::summary::mean_of;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Page header and headline metrics
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.heading("Premier League Player Stats Dashboard");
    ui.label("Explore player statistics interactively with filters and charts.");
    ui.add_space(6.0);
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

/// Four metric tiles: count and the three means.
pub fn metrics(ui: &mut Ui, session: &Session) {
    let summary = session.summary();
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Players Displayed", summary.count.to_string());
        metric(&mut cols[1], "Average Goals", summary.mean_goals.to_string());
        metric(&mut cols[2], "Average Assists", summary.mean_assists.to_string());
        metric(
            &mut cols[3],
            "Average Appearances",
            summary.mean_appearances.to_string(),
        );
    });

    if let Some(warning) = session.warning() {
        ui.label(RichText::new(warning.to_string()).color(Color32::YELLOW));
    }
}

// ---------------------------------------------------------------------------
// Top-N leaderboard
// ---------------------------------------------------------------------------

pub fn leaderboard(ui: &mut Ui, session: &Session) {
    let stat = session.statistic();
    ui.strong(format!("Top {} Players by {}", session.top_n(), stat.label()));

    ui.label(
        RichText::new(format!(
            "Average {} in view: {}",
            stat.label(),
            mean_of(&session.view(), stat)
        ))
        .weak(),
    );

    let rows = session.leaderboard();
    if rows.is_empty() {
        ui.label("No players to rank.");
        return;
    }

    ui.push_id("leaderboard", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Name", "Club", "Nationality", stat.label()] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let r = &rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(r.name.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.club.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.nationality.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.value.to_string());
                    });
                });
            });
    });
}
