use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::calendar::{CalendarGrid, DayCell, WEEK_LEN};
use crate::holidays;
use crate::theme::ThemeConfig;

// ─── Root draw ────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg()).fg(app.theme.fg())),
        area,
    );

    // Layout: [ content | status_bar(1) ]
    let root = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)]).split(area);

    match (&app.screen, &app.grid) {
        (Screen::Calendar, Some(grid)) => {
            // Content: [ calendar(34) | side panel ]
            let cols = Layout::default().direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(0)]).split(root[0]);
            draw_calendar(f, app, grid, cols[0]);
            draw_side_panel(f, app, cols[1]);
        }
        _ => draw_upload(f, app, root[0]),
    }
    draw_statusbar(f, app, root[1]);

    if app.show_help {
        draw_help(f, area, &app.theme);
    }
}

fn panel(title: &str, t: &ThemeConfig, focused: bool) -> Block<'static> {
    Block::default()
        .title(Title::from(Line::from(Span::styled(
            format!(" {title} "),
            Style::default().fg(t.accent()).add_modifier(Modifier::BOLD),
        ))))
        .borders(Borders::ALL)
        .border_type(t.border_type())
        .border_style(Style::default().fg(if focused { t.border_active() } else { t.border() }))
        .style(Style::default().bg(t.bg()))
}

// ─── Upload screen ────────────────────────────────────────────────────────────

fn draw_upload(f: &mut Frame, app: &App, area: Rect) {
    let t     = &app.theme;
    let rect  = centered(70, 40, area);
    let block = panel("Upload spreadsheet", t, true).style(Style::default().bg(t.popup_bg()));
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    let dim = Style::default().fg(t.fg_dim());
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Path to an .xlsx file whose first sheet is named like STYCZEŃ'07", dim)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ▶ ", Style::default().fg(t.accent()).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{}█", app.path_input), Style::default().fg(t.fg())),
        ]),
        Line::from(""),
    ];
    if let Some(msg) = &app.message {
        let color = if msg.is_error { t.error() } else { t.ok() };
        lines.push(Line::from(Span::styled(format!("  {}", msg.text), Style::default().fg(color))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("  Enter: load   Esc: clear / back   ?: help", dim)));

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(t.popup_bg())).wrap(Wrap { trim: false }),
        inner,
    );
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

fn draw_calendar(f: &mut Frame, app: &App, grid: &CalendarGrid, area: Rect) {
    let t     = &app.theme;
    let block = panel(&grid.period().title(), t, true);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = vec![];

    // Header row: Mo Tu We Th Fr Sa Su
    let hdrs: Vec<Span> = ["Mo","Tu","We","Th","Fr","Sa","Su"].iter().enumerate().map(|(i, d)| {
        let fg = if i >= 5 { t.weekend_color() } else { t.fg_dim() };
        Span::styled(format!(" {d} "), Style::default().fg(fg).add_modifier(Modifier::BOLD))
    }).collect();
    lines.push(Line::from(hdrs));
    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Style::default().fg(t.border()),
    )));

    for row in grid.rows() {
        let spans: Vec<Span> = row.iter().enumerate()
            .map(|(col, cell)| Span::styled(format!(" {:2} ", cell.day), cell_style(app, grid, cell, col)))
            .collect();
        lines.push(Line::from(spans));
    }

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(t.bg())).alignment(Alignment::Left),
        inner,
    );
}

fn cell_style(app: &App, grid: &CalendarGrid, cell: &DayCell, col: usize) -> Style {
    let t = &app.theme;
    let Some(date) = grid.date_of(cell) else {
        return Style::default().fg(t.filler());
    };
    let holiday = app.cfg.show_holidays() && holidays::is_holiday(date);

    if app.cfg.highlight_today() && date == app.today {
        let (bg, fg) = t.today_highlight();
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    } else if holiday {
        Style::default().fg(t.holiday()).add_modifier(Modifier::BOLD)
    } else if col % WEEK_LEN >= 5 {
        Style::default().fg(t.weekend_color())
    } else {
        Style::default().fg(t.fg())
    }
}

// ─── Side panel: sheet info + holidays ───────────────────────────────────────

fn draw_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let t    = &app.theme;
    let rows = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)]).split(area);

    let dim   = Style::default().fg(t.fg_dim());
    let sheet = app.sheet_name.as_deref().unwrap_or("—");
    let mut info = vec![Line::from(vec![
        Span::styled("  Sheet  ", dim),
        Span::styled(sheet.to_owned(), Style::default().fg(t.fg())),
    ])];
    if let Some(msg) = &app.message {
        let color = if msg.is_error { t.error() } else { t.ok() };
        info.push(Line::from(Span::styled(format!("  {}", msg.text), Style::default().fg(color))));
    }
    f.render_widget(
        Paragraph::new(info).block(panel("Source", t, false)).wrap(Wrap { trim: true }),
        rows[0],
    );

    let block = panel("Holidays", t, false);
    if !app.cfg.show_holidays() || app.month_holidays.is_empty() {
        f.render_widget(Paragraph::new("  No holidays").block(block).style(dim), rows[1]);
        return;
    }
    let items: Vec<ListItem> = app.month_holidays.iter().map(|(day, h)| {
        ListItem::new(Line::from(vec![
            Span::styled(" ★ ", Style::default().fg(t.holiday())),
            Span::styled(format!("{day:2}  "), dim),
            Span::styled(h.local_name, Style::default().fg(t.fg())),
            Span::styled(format!("  {}", h.name), dim),
        ]))
    }).collect();
    f.render_widget(List::new(items).block(block), rows[1]);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_statusbar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let (mode, keys) = match app.screen {
        Screen::Upload   => (" UPLOAD ",   "  Enter:load  Esc:clear  ?:help  Ctrl+c:quit"),
        Screen::Calendar => (" CALENDAR ", "  [:prev  ]:next  t:today  u:upload  T:theme  ?:help  q:quit"),
    };
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(mode, Style::default().bg(t.accent()).fg(t.bg()).add_modifier(Modifier::BOLD)),
        Span::styled(keys, Style::default().fg(t.fg_dim())),
        Span::styled(
            format!("  {}", app.theme.name),
            Style::default().fg(t.fg_dim()).add_modifier(Modifier::ITALIC),
        ),
    ])).style(Style::default().bg(t.bg2()));
    f.render_widget(bar, area);
}

// ─── Help overlay ────────────────────────────────────────────────────────────

fn draw_help(f: &mut Frame, area: Rect, t: &ThemeConfig) {
    let rect = centered(60, 60, area);
    f.render_widget(Clear, rect);

    let accent = Style::default().fg(t.accent()).add_modifier(Modifier::BOLD);
    let dim    = Style::default().fg(t.fg_dim());
    let lines  = vec![
        Line::from(""),
        Line::from(Span::styled("  Upload", accent)),
        Line::from(Span::styled("  type               Path to the .xlsx file", dim)),
        Line::from(Span::styled("  Enter              Load and show its month", dim)),
        Line::from(Span::styled("  Esc                Clear input / back to calendar", dim)),
        Line::from(""),
        Line::from(Span::styled("  Calendar", accent)),
        Line::from(Span::styled("  [ / ]              Prev / Next month", dim)),
        Line::from(Span::styled("  t                  Jump to the current month", dim)),
        Line::from(Span::styled("  u / Esc            Load another file", dim)),
        Line::from(Span::styled("  T                  Cycle theme", dim)),
        Line::from(""),
        Line::from(Span::styled("  General", accent)),
        Line::from(Span::styled("  ?                  Toggle help", dim)),
        Line::from(Span::styled("  q / Ctrl+c         Quit", dim)),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .block(panel("Keyboard Shortcuts", t, true).style(Style::default().bg(t.popup_bg())))
            .style(Style::default().fg(t.fg()))
            .wrap(Wrap { trim: false }),
        rect,
    );
}

// ─── Utilities ────────────────────────────────────────────────────────────────

fn centered(pct_x: u16, pct_y: u16, r: Rect) -> Rect {
    let vert = Layout::default().direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ]).split(r);
    Layout::default().direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ]).split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::sheet::resolve;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut term = Terminal::new(TestBackend::new(100, 30)).unwrap();
        term.draw(|f| draw(f, app)).unwrap();
        term.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn calendar_screen_shows_title_and_holidays() {
        let mut app = App::new(AppConfig::default(), ThemeConfig::default());
        app.show_period(resolve("LISTOPAD'24").unwrap());
        app.sheet_name = Some("LISTOPAD'24".into());
        app.screen     = Screen::Calendar;

        let screen = render(&app);
        assert!(screen.contains("November 2024"));
        assert!(screen.contains(" Mo  Tu  We  Th  Fr  Sa  Su "));
        assert!(screen.contains("Narodowe Święto Niepodległości"));
        assert!(screen.contains("LISTOPAD'24"));
    }

    #[test]
    fn upload_screen_shows_error_message() {
        let mut app = App::new(AppConfig::default(), ThemeConfig::default());
        app.message = Some(crate::app::Message::error("unknown month name \"FOO\""));

        let screen = render(&app);
        assert!(screen.contains("Upload spreadsheet"));
        assert!(screen.contains("unknown month name"));
    }
}
