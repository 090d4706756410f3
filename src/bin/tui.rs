mod tui_app;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
    Frame, Terminal,
};

use cricstats::config::Config;
use tui_app::{format_sr, truncate, AppState, Focus};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> io::Result<()> {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };
    let data_dir = std::env::args().nth(1).unwrap_or(cfg.data_dir);

    let mut app = match AppState::load(&data_dir) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Failed to load {data_dir}: {e}");
            std::process::exit(1);
        }
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Tab | KeyCode::Left | KeyCode::Right => app.toggle_focus(),
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                        _ => {}
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState) {
    let area = f.area();

    // Outer vertical split: header | body | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let season = app
        .selected_year()
        .map_or("—".to_string(), |y| y.to_string());
    let player = app.selected_player().unwrap_or("—");

    let title_spans = vec![
        Span::styled(
            " Batting Browser  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} · {}", season, truncate(player, 30)),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("{} runs", app.report.totals.total_runs),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("SR {}", format_sr(app.report.totals.overall_strike_rate)),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!(
                "{} matches loaded ({} skipped)",
                app.stats.matches_loaded,
                app.stats.unreadable
                    + app.stats.skipped_missing_info
                    + app.stats.skipped_not_enough_teams,
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(title_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn render_body(f: &mut Frame, app: &AppState, area: Rect) {
    // Horizontal split: selectors (30%) | per-match table (70%)
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let selectors = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(halves[0]);

    render_years(f, app, selectors[0]);
    render_players(f, app, selectors[1]);
    render_matches(f, app, halves[1]);
}

fn selector_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

fn render_years(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .years
        .iter()
        .map(|y| ListItem::new(y.to_string()))
        .collect();

    let list = List::new(items)
        .block(selector_block("SEASON", app.focus == Focus::Years))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.year_idx));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_players(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .players
        .iter()
        .map(|p| ListItem::new(truncate(p, 26)))
        .collect();

    let list = List::new(items)
        .block(selector_block("BATTER", app.focus == Focus::Players))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(if app.players.is_empty() {
        None
    } else {
        Some(app.player_idx)
    });
    f.render_stateful_widget(list, area, &mut state);
}

fn render_matches(f: &mut Frame, app: &AppState, area: Rect) {
    let header_cells = ["Date", "Opponent", "Venue", "Runs", "Balls", "SR"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        });
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .report
        .matches
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.date.format("%Y-%m-%d").to_string())
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(m.opponent.clone()),
                Cell::from(truncate(&m.venue, 30)),
                Cell::from(m.runs.to_string()).style(Style::default().fg(Color::Green)),
                Cell::from(m.balls_faced.to_string()),
                Cell::from(format_sr(m.strike_rate)).style(Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " INNINGS BY MATCH ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" q ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled(" tab ", Style::default().fg(Color::Yellow)),
        Span::raw("switch pane  "),
        Span::styled(" j/k ", Style::default().fg(Color::Yellow)),
        Span::raw("navigate"),
    ]);
    f.render_widget(Paragraph::new(help), area);
}
