use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::sheet::ResolvedPeriod;

/// Cells in a month grid: 6 rows of 7 days.
pub const GRID_CELLS: usize = 42;
pub const WEEK_LEN:   usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day:             u32,
    pub in_target_month: bool,
}

/// A Monday-first 6×7 month grid, row-major. Always exactly [`GRID_CELLS`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    period: ResolvedPeriod,
    cells:  Vec<DayCell>,
}

impl CalendarGrid {
    pub fn period(&self) -> ResolvedPeriod { self.period }
    pub fn cells(&self) -> &[DayCell]      { &self.cells }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(WEEK_LEN)
    }

    /// Filler cells taken from the end of the previous month.
    pub fn leading(&self) -> usize {
        self.cells.iter().take_while(|c| !c.in_target_month).count()
    }

    /// The date a cell stands for, if it belongs to the target month.
    pub fn date_of(&self, cell: &DayCell) -> Option<NaiveDate> {
        if cell.in_target_month { self.period.date(cell.day) } else { None }
    }
}

/// Converts a Sunday=0 weekday number into the count of Monday-first cells
/// that precede it in its week (Monday=0 … Sunday=6).
pub fn monday_first_offset(days_from_sunday: u32) -> u32 {
    if days_from_sunday == 0 { 6 } else { days_from_sunday - 1 }
}

/// Lays out `period` as 42 cells: the tail of the previous month, every day of
/// the target month, then days 1, 2, … of the next month.
pub fn build_grid(period: ResolvedPeriod) -> CalendarGrid {
    let first   = period.first_day();
    let leading = monday_first_offset(first.weekday().num_days_from_sunday());
    let total   = days_in_month(period.year(), first.month());

    let prev_total = match period.prev() {
        Some(prev) => days_in_month(prev.year(), prev.first_day().month()),
        // Only at chrono's lower date bound; December is 31 days regardless.
        None => 31,
    };

    let prev_days = (prev_total - leading + 1..=prev_total)
        .map(|day| DayCell { day, in_target_month: false });
    let this_days = (1..=total)
        .map(|day| DayCell { day, in_target_month: true });
    let next_days = (1..)
        .map(|day| DayCell { day, in_target_month: false });

    let cells = prev_days.chain(this_days).chain(next_days).take(GRID_CELLS).collect();
    CalendarGrid { period, cells }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Day count of a 1-based month; 0 for a month outside 1–12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11              => 30,
        2 if is_leap_year(year)     => 29,
        2                           => 28,
        _                           => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    const MONTHS: [Month; 12] = [
        Month::January, Month::February, Month::March, Month::April,
        Month::May, Month::June, Month::July, Month::August,
        Month::September, Month::October, Month::November, Month::December,
    ];

    fn grid(month: Month, year: i32) -> CalendarGrid {
        build_grid(ResolvedPeriod::new(month, year).unwrap())
    }

    fn target_count(g: &CalendarGrid) -> usize {
        g.cells().iter().filter(|c| c.in_target_month).count()
    }

    #[test]
    fn weekday_conversion() {
        // Sunday, Monday … Saturday in host numbering.
        let expected = [6, 0, 1, 2, 3, 4, 5];
        for (sunday_based, want) in expected.iter().enumerate() {
            assert_eq!(monday_first_offset(sunday_based as u32), *want);
        }
    }

    #[test]
    fn always_42_cells_and_true_month_length() {
        for year in 2000..=2099 {
            for month in MONTHS {
                let g = grid(month, year);
                assert_eq!(g.cells().len(), GRID_CELLS, "{month:?} {year}");
                let expected = days_in_month(year, month.number_from_month()) as usize;
                assert_eq!(target_count(&g), expected, "{month:?} {year}");
                assert_eq!(g.rows().count(), 6);
            }
        }
    }

    #[test]
    fn february_leap_years() {
        assert_eq!(target_count(&grid(Month::February, 2024)), 29);
        assert_eq!(target_count(&grid(Month::February, 2023)), 28);
        assert_eq!(target_count(&grid(Month::February, 2000)), 29);
        assert_eq!(days_in_month(2100, 2), 28);
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_cells() {
        let g = grid(Month::January, 2024);
        assert_eq!(g.leading(), 0);
        assert_eq!(g.cells()[0], DayCell { day: 1, in_target_month: true });
    }

    #[test]
    fn february_2025_layout() {
        let g = grid(Month::February, 2025);
        let cells = g.cells();

        let leading: Vec<u32> = cells[..5].iter().map(|c| c.day).collect();
        assert_eq!(leading, vec![27, 28, 29, 30, 31]);
        assert!(cells[..5].iter().all(|c| !c.in_target_month));

        assert!(cells[5..33].iter().all(|c| c.in_target_month));
        assert_eq!(cells[5].day, 1);
        assert_eq!(cells[32].day, 28);

        let trailing: Vec<u32> = cells[33..].iter().map(|c| c.day).collect();
        assert_eq!(trailing, (1..=9).collect::<Vec<_>>());
        assert!(cells[33..].iter().all(|c| !c.in_target_month));
    }

    #[test]
    fn sunday_start_gets_six_leading_cells() {
        // 1 September 2024 is a Sunday.
        let g = grid(Month::September, 2024);
        assert_eq!(g.leading(), 6);
        let leading: Vec<u32> = g.cells()[..6].iter().map(|c| c.day).collect();
        assert_eq!(leading, vec![26, 27, 28, 29, 30, 31]);
    }

    #[test]
    fn january_borrows_from_previous_december() {
        // 1 January 2025 is a Wednesday.
        let g = grid(Month::January, 2025);
        let leading: Vec<u32> = g.cells()[..2].iter().map(|c| c.day).collect();
        assert_eq!(leading, vec![30, 31]);
    }

    #[test]
    fn march_after_leap_february() {
        // 1 March 2024 is a Friday: four days from February's 29.
        let g = grid(Month::March, 2024);
        let leading: Vec<u32> = g.cells()[..4].iter().map(|c| c.day).collect();
        assert_eq!(leading, vec![26, 27, 28, 29]);
    }

    #[test]
    fn leading_cells_are_consecutive_and_end_at_previous_month_end() {
        for month in MONTHS {
            let g = grid(month, 2026);
            let n = g.leading();
            if n == 0 { continue; }
            let prev = g.period().prev().unwrap();
            let prev_len = days_in_month(prev.year(), prev.month().number_from_month());
            let days: Vec<u32> = g.cells()[..n].iter().map(|c| c.day).collect();
            assert_eq!(days, (prev_len - n as u32 + 1..=prev_len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn build_is_idempotent() {
        assert_eq!(grid(Month::July, 2031), grid(Month::July, 2031));
    }

    #[test]
    fn date_of_only_maps_target_cells() {
        let g = grid(Month::February, 2025);
        assert_eq!(g.date_of(&g.cells()[0]), None);
        assert_eq!(g.date_of(&g.cells()[5]), NaiveDate::from_ymd_opt(2025, 2, 1));
    }
}
