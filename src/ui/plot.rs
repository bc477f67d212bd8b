use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::data::model::Player;
use crate::session::Session;

const CHART_HEIGHT: f32 = 500.0;
const MIN_RADIUS: f64 = 2.0;
const MAX_RADIUS: f64 = 12.0;

/// Hover text: name, club, age and position when known.
fn hover_label(p: &Player) -> String {
    match &p.position {
        Some(position) => format!("{}\n{} · age {} · {position}", p.name, p.club, p.age),
        None => format!("{}\n{} · age {}", p.name, p.club, p.age),
    }
}

/// Marker radius proportional to the square root of appearances, so marker
/// area tracks the value.
fn marker_radius(appearances: i64, max_appearances: i64) -> f32 {
    if max_appearances <= 0 {
        return MIN_RADIUS as f32;
    }
    let share = (appearances.max(0) as f64 / max_appearances as f64).sqrt();
    (MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * share) as f32
}

// ---------------------------------------------------------------------------
// Bar chart: x = player, y = statistic, colour = nationality
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, session: &Session) {
    let stat = session.statistic();
    let view = session.view();
    ui.strong(format!("{} of Players", stat.label()));

    let names: Vec<String> = view.iter().map(|p| p.name.clone()).collect();

    // One series per nationality so the legend shows countries.
    let mut series: BTreeMap<&str, Vec<Bar>> = BTreeMap::new();
    for (pos, p) in view.iter().enumerate() {
        if let Some(value) = stat.value(p) {
            series
                .entry(p.nationality.as_str())
                .or_default()
                .push(Bar::new(pos as f64, value.as_f64()).name(hover_label(p)).width(0.8));
        }
    }

    Plot::new("bar_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Name")
        .y_axis_label(stat.label())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (nationality, bars) in series {
                let color = session.color_map().color_for(nationality);
                plot_ui.bar_chart(BarChart::new(bars).name(nationality).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter plot: x = age, y = statistic, size = appearances, colour = nationality
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, session: &Session) {
    let stat = session.statistic();
    let view = session.view();
    let max_appearances = view.iter().map(|p| p.appearances).max().unwrap_or(0);

    Plot::new("scatter_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label(stat.label())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Markers sharing a nationality share a legend entry.
            for p in view.iter() {
                let Some(value) = stat.value(p) else {
                    continue;
                };
                let point = Points::new(vec![[p.age as f64, value.as_f64()]])
                    .radius(marker_radius(p.appearances, max_appearances))
                    .color(session.color_map().color_for(&p.nationality))
                    .name(&p.nationality);
                plot_ui.points(point);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::player;

    #[test]
    fn radius_grows_with_appearances() {
        assert_eq!(marker_radius(0, 38), MIN_RADIUS as f32);
        assert_eq!(marker_radius(38, 38), MAX_RADIUS as f32);
        assert!(marker_radius(10, 38) < marker_radius(20, 38));
        assert_eq!(marker_radius(5, 0), MIN_RADIUS as f32);
    }

    #[test]
    fn hover_includes_position_when_known() {
        let mut p = player("A", 20, 5, "X");
        assert_eq!(hover_label(&p), "A\nA FC · age 20 · Forward");
        p.position = None;
        assert_eq!(hover_label(&p), "A\nA FC · age 20");
    }
}
