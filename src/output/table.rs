use chrono::{DateTime, Duration, Utc};
use comfy_table::{
    Cell, Color, ContentArrangement, Table, modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::core::SessionView;
use crate::utils::format_duration;

use super::format::{header_cell, normalize_header_separator, right_cell, styled_cell};

/// Time covered by the closed sessions in `views`
fn total_tracked(views: &[SessionView]) -> Duration {
    views
        .iter()
        .filter_map(|v| v.session.end_time.map(|end| end - v.session.start_time))
        .fold(Duration::zero(), |acc, d| acc + d)
}

fn build_summary_table(views: &[SessionView], use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);

    table.set_header(vec![
        header_cell("ID", use_color),
        header_cell("Start", use_color),
        header_cell("End", use_color),
        header_cell("Project", use_color),
        header_cell("Task", use_color),
        header_cell("Duration", use_color),
    ]);

    let green = if use_color { Some(Color::Green) } else { None };
    let yellow = if use_color { Some(Color::Yellow) } else { None };

    for view in views {
        let duration_color = if view.session.is_open() { yellow } else { green };
        table.add_row(vec![
            right_cell(&view.session.id.to_string(), None, false),
            Cell::new(&view.start),
            Cell::new(&view.end),
            Cell::new(&view.session.project),
            Cell::new(&view.session.task),
            right_cell(&view.duration, duration_color, false),
        ]);
    }

    let cyan = if use_color { Some(Color::Cyan) } else { None };
    let anchor = DateTime::<Utc>::UNIX_EPOCH;
    let total = format_duration(anchor, Some(anchor + total_tracked(views)), anchor);
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        right_cell(&total, cyan, true),
    ]);

    table
}

pub(crate) fn print_summary_table(views: &[SessionView], title: &str, use_color: bool) {
    let table = build_summary_table(views, use_color);
    println!("\n  {title}\n");
    println!("{table}");
    println!("\n  {} sessions\n", views.len());
}
