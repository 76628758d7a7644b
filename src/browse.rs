//! Infinite-scroll feed browser using ratatui + crossterm.
//!
//! Shows the loaded posts, the selected post's body, and a log panel. Moving
//! the selection near the end of the list asks the loader for the next page;
//! the loader itself drops requests while one is already in flight.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use postkit::{FeedLoader, FeedState, LoadOutcome, Post, PostkitHttpClient, Postkit};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppError;

/// Target render interval (10 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Maximum log lines retained.
const MAX_LOG_LINES: usize = 200;

/// Fraction of a page from the end of the list at which the next page is
/// requested.
const PREFETCH_FRACTION: f32 = 0.5;

type PostLoader = FeedLoader<PostkitHttpClient>;

/// Run the feed browser until `q`/Esc or cancellation.
pub async fn run_browse(client: &Postkit, cancel: CancellationToken) -> Result<(), AppError> {
    let loader = Arc::new(client.feed_loader());
    let mut feed_rx = loader.subscribe();
    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<LoadReport>();
    let threshold = prefetch_threshold(loader.options().page_size);

    let mut log_lines: VecDeque<String> = VecDeque::with_capacity(MAX_LOG_LINES);
    let mut list_state = ListState::default();

    info!(page_size = loader.options().page_size, "starting browser");
    push_log(&mut log_lines, format!("Feed: {}", client.config.api_url));

    // Set up terminal.
    enable_raw_mode().map_err(|e| AppError::Terminal(format!("failed to enable raw mode: {e}")))?;
    undo_on_err(io::stdout().execute(EnterAlternateScreen).map(|_| ()), || {
        let _ = disable_raw_mode();
    })
    .map_err(|e| AppError::Terminal(format!("failed to enter alternate screen: {e}")))?;
    let mut terminal = undo_on_err(Terminal::new(CrosstermBackend::new(io::stdout())), || {
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
    .map_err(|e| AppError::Terminal(format!("failed to create terminal: {e}")))?;

    spawn_load(&loader, &report_tx);

    push_log(
        &mut log_lines,
        "j/k or arrows to move, r to reload, q to quit".to_string(),
    );

    let mut render_interval = tokio::time::interval(RENDER_INTERVAL);

    // Main event loop.
    let mut quit = false;
    // Set after a failed load; cleared by moving the selection or reloading.
    let mut load_failed = false;
    // Spawned loads that have not reported back yet.
    let mut pending: usize = 1;
    let result: Result<(), AppError> = loop {
        if quit {
            break Ok(());
        }

        tokio::select! {
            // Loader transition; the next tick redraws.
            Ok(()) = feed_rx.changed() => {
                feed_rx.borrow_and_update();
            }

            Some(report) = report_rx.recv() => {
                pending = pending.saturating_sub(1);
                match report {
                    LoadReport::Skipped => {}
                    LoadReport::Failed(_) => {
                        load_failed = true;
                        push_log(&mut log_lines, report.to_string());
                    }
                    _ => push_log(&mut log_lines, report.to_string()),
                }
            }

            // Render tick, also polls keyboard input.
            _ = render_interval.tick() => {
                while event::poll(Duration::ZERO).unwrap_or(false) {
                    let Ok(Event::Key(key)) = event::read() else {
                        continue;
                    };
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let len = loader.with_state(|s| s.len());
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => quit = true,
                        KeyCode::Down | KeyCode::Char('j') => {
                            load_failed = false;
                            let next = list_state.selected().map_or(0, |i| i + 1);
                            if next < len {
                                list_state.select(Some(next));
                            }
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            load_failed = false;
                            let prev = list_state.selected().map_or(0, |i| i.saturating_sub(1));
                            list_state.select(Some(prev));
                        }
                        KeyCode::Char('r') => {
                            loader.reset();
                            load_failed = false;
                            list_state.select(None);
                            push_log(&mut log_lines, "Reloading feed".to_string());
                            spawn_load(&loader, &report_tx);
                            pending += 1;
                        }
                        _ => {}
                    }
                }

                let wants_more = loader.with_state(|s| {
                    wants_next_page(
                        list_state.selected(),
                        s.len(),
                        threshold,
                        s.has_more(),
                        load_failed || pending > 0,
                    )
                });
                if wants_more {
                    spawn_load(&loader, &report_tx);
                    pending += 1;
                }

                if !quit {
                    let state = loader.snapshot();
                    if list_state.selected().is_none() && !state.is_empty() {
                        list_state.select(Some(0));
                    }
                    let _ = terminal.draw(|frame| {
                        render_ui(frame, &state, &mut list_state, &log_lines);
                    });
                }
            }

            _ = cancel.cancelled() => {
                break Ok(());
            }
        }
    };

    // Restore terminal.
    restore_terminal(&mut terminal);

    // Responses still in flight are dropped.
    loader.close();

    result
}

/// Result of a background page load, sent back to the event loop.
#[derive(Debug, Clone, PartialEq)]
enum LoadReport {
    Appended(usize),
    Exhausted,
    /// Nothing was applied: another load was in flight or the response was
    /// stale.
    Skipped,
    Failed(String),
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadReport::Appended(n) => write!(f, "Loaded {n} posts"),
            LoadReport::Exhausted => write!(f, "No more posts"),
            LoadReport::Skipped => write!(f, "Load skipped"),
            LoadReport::Failed(e) => write!(f, "Load failed: {e} (scroll or press r to retry)"),
        }
    }
}

/// Request the next page in the background, reporting the outcome to the loop.
fn spawn_load(loader: &Arc<PostLoader>, report_tx: &mpsc::UnboundedSender<LoadReport>) {
    let loader = Arc::clone(loader);
    let report_tx = report_tx.clone();
    tokio::spawn(async move {
        let report = match loader.load_next().await {
            Ok(LoadOutcome::Appended(n)) => LoadReport::Appended(n),
            Ok(LoadOutcome::Exhausted) => LoadReport::Exhausted,
            Ok(LoadOutcome::Skipped | LoadOutcome::Discarded) => LoadReport::Skipped,
            Err(e) => LoadReport::Failed(e.to_string()),
        };
        let _ = report_tx.send(report);
    });
}

/// Items from the end of the list at which the next page is requested.
fn prefetch_threshold(page_size: u32) -> usize {
    ((page_size as f32 * PREFETCH_FRACTION).ceil() as usize).max(1)
}

/// Whether the selection is within `threshold` items of the end.
///
/// An empty list always wants data; with nothing selected the list only
/// prefetches when it is shorter than the threshold.
fn should_prefetch(selected: Option<usize>, len: usize, threshold: usize) -> bool {
    if len == 0 {
        return true;
    }
    let position = selected.unwrap_or(0);
    position + threshold >= len
}

/// Whether a render tick should request another page.
///
/// `held` is set while a spawned load has not reported back and after a
/// failure until the user acts, so errors are never retried on a timer.
fn wants_next_page(
    selected: Option<usize>,
    len: usize,
    threshold: usize,
    has_more: bool,
    held: bool,
) -> bool {
    has_more && !held && should_prefetch(selected, len, threshold)
}

fn push_log(log_lines: &mut VecDeque<String>, line: String) {
    if log_lines.len() == MAX_LOG_LINES {
        log_lines.pop_front();
    }
    log_lines.push_back(line);
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

/// Run `undo` when a terminal setup step fails, passing the result through.
fn undo_on_err<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

/// Restore terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    let _ = terminal.show_cursor();
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

// ---------------------------------------------------------------------------
// UI rendering
// ---------------------------------------------------------------------------

/// Render the full TUI frame.
fn render_ui(
    frame: &mut Frame,
    state: &FeedState<Post>,
    list_state: &mut ListState,
    log_lines: &VecDeque<String>,
) {
    let area = frame.area();

    // Layout: header (3 rows), main panels, log (6 rows).
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(8),    // feed + detail
            Constraint::Length(6), // log
        ])
        .split(area);

    let status = if state.is_loading() {
        "loading…"
    } else if state.has_more() {
        "idle"
    } else {
        "end of feed"
    };
    let header_text = format!(
        " POSTBOARD | {} posts | next page {} | {status} | 'q' to quit",
        state.len(),
        state.next_page(),
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::White).bg(Color::Blue).bold())
        .alignment(Alignment::Center);
    frame.render_widget(header, main_layout[0]);

    // Feed (45%) | detail (55%).
    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_layout[1]);

    render_feed(frame, body_layout[0], state, list_state);
    render_detail(
        frame,
        body_layout[1],
        list_state.selected().and_then(|i| state.items().get(i)),
    );
    render_log(frame, main_layout[2], log_lines);
}

/// Render the scrollable post list.
fn render_feed(frame: &mut Frame, area: Rect, state: &FeedState<Post>, list_state: &mut ListState) {
    let mut items: Vec<ListItem> = state
        .items()
        .iter()
        .map(|p| ListItem::new(format!("{:>4}  {}", p.id, p.title)))
        .collect();
    if state.is_loading() {
        items.push(ListItem::new("      loading…").style(Style::default().fg(Color::Yellow)));
    } else if !state.has_more() {
        items.push(ListItem::new("      (end of feed)").style(Style::default().fg(Color::DarkGray)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Feed ");
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_stateful_widget(list, area, list_state);
}

/// Render the selected post.
fn render_detail(frame: &mut Frame, area: Rect, post: Option<&Post>) {
    let lines: Vec<Line> = match post {
        Some(p) => vec![
            Line::styled(p.title.clone(), Style::default().bold()),
            Line::styled(
                format!("post #{} by user #{}", p.id, p.user_id),
                Style::default().fg(Color::DarkGray),
            ),
            Line::from(""),
            Line::from(p.body.clone()),
        ],
        None => vec![Line::styled("No post selected", Style::default().fg(Color::DarkGray))],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Post ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Render the log panel, newest lines at the bottom.
fn render_log(frame: &mut Frame, area: Rect, log_lines: &VecDeque<String>) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = log_lines.len().saturating_sub(visible);
    let lines: Vec<Line> = log_lines
        .iter()
        .skip(skip)
        .map(|l| Line::from(l.as_str()))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Log ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
