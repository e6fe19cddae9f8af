//! User interface rendering
//!
//! - `mod.rs` - frame layout, header, status line and nav bar
//! - `screens` - one view per session phase

pub mod screens;

use crate::app::AppState;
use crate::input::nav_hints;
use crate::install_state::Phase;
use crate::theme::Styles;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BANNER: &str = "h e n r i k - o s";
const TAGLINE: &str = "Mac development environment setup";

/// Render the whole frame for the current state.
pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(5),    // Phase view
            Constraint::Length(1), // Status
            Constraint::Length(1), // Nav bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    match state.session.phase() {
        Phase::Selecting => screens::render_select(f, chunks[1], state),
        Phase::Running => screens::render_install(f, chunks[1], state),
        Phase::Finished => screens::render_done(f, chunks[1], state),
    }
    render_status(f, chunks[2], state);
    render_nav_bar(f, chunks[3], state.session.phase());
}

fn render_header(f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let lines = vec![
        Line::from(Span::styled(BANNER, Styles::title())),
        Line::from(Span::styled(TAGLINE, Styles::text_muted())),
    ];
    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Styles::border()),
    );
    f.render_widget(header, area);
}

fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    if let Some(msg) = &state.status_message {
        let status = Paragraph::new(Line::from(Span::styled(
            format!("  {msg}"),
            Styles::warning(),
        )));
        f.render_widget(status, area);
    }
}

fn render_nav_bar(f: &mut Frame, area: Rect, phase: Phase) {
    let mut spans = vec![Span::raw("  ")];
    for (i, (key, label)) in nav_hints(phase).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(*key, Styles::cursor()));
        spans.push(Span::styled(format!(" {label}"), Styles::nav_hint()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
