use chrono::{DateTime, Utc};
use grading_core::{Category, Palette};
use metric_grader::SlotBoard;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SlotRow<'a> {
    slot: &'a str,
    text: Option<&'a str>,
    category: Option<Category>,
    color: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    title: Option<&'a str>,
    graded_at: DateTime<Utc>,
    palette: &'a str,
    slots: Vec<SlotRow<'a>>,
}

fn rows<'a>(board: &'a SlotBoard, palette: &'a Palette) -> Vec<SlotRow<'a>> {
    board
        .slots()
        .map(|(slot, state)| SlotRow {
            slot,
            text: state.text.as_deref(),
            category: state.color,
            color: state.color.map(|c| palette.color(c)),
        })
        .collect()
}

pub fn render_json(
    board: &SlotBoard,
    palette: &Palette,
    graded_at: DateTime<Utc>,
) -> serde_json::Result<String> {
    let report = Report {
        title: board.title(),
        graded_at,
        palette: &palette.name,
        slots: rows(board, palette),
    };
    serde_json::to_string_pretty(&report)
}

pub fn render_table(board: &SlotBoard, palette: &Palette) -> String {
    let rows = rows(board, palette);
    let slot_width = rows.iter().map(|r| r.slot.len()).max().unwrap_or(4).max(4);
    let text_width = rows
        .iter()
        .map(|r| r.text.map_or(0, str::len))
        .max()
        .unwrap_or(5)
        .max(5);

    let mut out = String::new();
    if let Some(title) = board.title() {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(&format!(
        "{:<sw$}  {:<tw$}  {}\n",
        "SLOT",
        "VALUE",
        "GRADE",
        sw = slot_width,
        tw = text_width
    ));
    for row in &rows {
        let grade = match (row.category, row.color) {
            (Some(c), Some(hex)) => format!("{:<6} {} ({})", c.as_str(), hex, c.to_label()),
            _ => String::new(),
        };
        let line = format!(
            "{:<sw$}  {:<tw$}  {}",
            row.slot,
            row.text.unwrap_or(""),
            grade,
            sw = slot_width,
            tw = text_width
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
