//! Plain-text and JSON renderings of a month grid for the non-TUI commands.

use serde::Serialize;

use crate::calendar::{CalendarGrid, DayCell};

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

#[derive(Debug, Serialize)]
pub struct GridJson<'a> {
    pub title:       String,
    pub month_index: u32,
    pub year:        i32,
    pub cells:       &'a [DayCell],
}

impl<'a> From<&'a CalendarGrid> for GridJson<'a> {
    fn from(grid: &'a CalendarGrid) -> Self {
        let period = grid.period();
        Self {
            title:       period.title(),
            month_index: period.month_index(),
            year:        period.year(),
            cells:       grid.cells(),
        }
    }
}

pub fn render_json(grid: &CalendarGrid) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&GridJson::from(grid))
}

/// Title line, weekday header, then six rows. Filler days are wrapped in
/// parentheses so the text stays readable without colour.
pub fn render_text(grid: &CalendarGrid) -> String {
    let mut out = String::new();
    out.push_str(&grid.period().title());
    out.push('\n');
    out.push_str(&WEEKDAYS.map(|d| format!(" {d} ")).concat());
    out.push('\n');
    for row in grid.rows() {
        let line: String = row.iter().map(|c| {
            if c.in_target_month { format!(" {:2} ", c.day) } else { format!("({:2})", c.day) }
        }).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_grid;
    use crate::sheet::resolve;

    #[test]
    fn text_layout_for_february_2025() {
        let grid = build_grid(resolve("LUTY'25").unwrap());
        let text = render_text(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "February 2025");
        assert_eq!(lines[1], " Mo  Tu  We  Th  Fr  Sa  Su ");
        assert_eq!(lines[2], "(27)(28)(29)(30)(31)  1   2");
        assert_eq!(lines[7], "( 3)( 4)( 5)( 6)( 7)( 8)( 9)");
    }

    #[test]
    fn json_shape() {
        let grid = build_grid(resolve("STYCZEŃ'24").unwrap());
        let value: serde_json::Value = serde_json::from_str(&render_json(&grid).unwrap()).unwrap();
        assert_eq!(value["title"], "January 2024");
        assert_eq!(value["month_index"], 0);
        assert_eq!(value["year"], 2024);
        assert_eq!(value["cells"].as_array().unwrap().len(), 42);
        assert_eq!(value["cells"][0], serde_json::json!({ "day": 1, "in_target_month": true }));
    }
}
