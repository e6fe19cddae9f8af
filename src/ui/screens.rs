//! Phase views: module selection, install progress, and the final summary.

use crate::app::AppState;
use crate::logic::postinstall;
use crate::summary::format_duration;
use crate::theme::{ModuleStatus, Styles, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Lines of captured output shown under the progress list
const OUTPUT_TAIL: usize = 200;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .title(Span::styled(format!(" {title} "), Styles::title()))
}

// =============================================================================
// Selecting
// =============================================================================

pub fn render_select(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let registry = state.session.registry();
    let items: Vec<ListItem> = registry
        .all()
        .iter()
        .enumerate()
        .map(|(i, module)| {
            let at_cursor = i == state.cursor;
            let mut spans = vec![
                Span::styled(if at_cursor { "▸ " } else { "  " }, Styles::cursor()),
                if state.session.is_selected(i) {
                    Span::styled("● ", Styles::success())
                } else {
                    Span::styled("○ ", Styles::text_muted())
                },
                Span::styled(
                    module.name().to_string(),
                    if at_cursor { Styles::cursor() } else { Styles::text() },
                ),
            ];
            let deps = module.dependencies();
            if !deps.is_empty() {
                spans.push(Span::styled(
                    format!(" (requires {})", deps.join(", ")),
                    Styles::dep_hint(),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let selected = (0..registry.len())
        .filter(|i| state.session.is_selected(*i))
        .count();
    let title = format!("Select modules ({selected}/{})", registry.len());
    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    f.render_stateful_widget(List::new(items).block(panel(&title)), chunks[0], &mut list_state);

    let description = registry
        .all()
        .get(state.cursor)
        .map(|m| m.description().to_string())
        .unwrap_or_default();
    let details = Paragraph::new(Span::styled(description, Styles::text_secondary()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Styles::text_muted()));
    f.render_widget(details, chunks[1]);
}

// =============================================================================
// Running
// =============================================================================

fn status_line<'a>(state: &AppState, index: usize, name: &'a str) -> Line<'a> {
    let status = state.module_status(index);
    let icon = match status {
        ModuleStatus::Running => Theme::spinner_frame(state.spinner_frame),
        other => Theme::status_icon(other),
    };
    let mut spans = vec![
        Span::raw("  "),
        Span::styled(icon, Theme::status_style(status)),
        Span::raw(" "),
        Span::styled(name, Styles::text()),
    ];

    if let Some(result) = state.session.result(index) {
        let elapsed = format_duration(result.elapsed);
        match result.outcome.reason() {
            None => spans.push(Span::styled(format!(" ({elapsed})"), Styles::text_muted())),
            Some(reason) => spans.push(Span::styled(
                format!(" {reason} ({elapsed})"),
                Styles::error(),
            )),
        }
    } else if status == ModuleStatus::Skipped {
        spans.push(Span::styled(" (skipped)", Styles::text_muted()));
    }
    Line::from(spans)
}

pub fn render_install(f: &mut Frame, area: Rect, state: &AppState) {
    let plan = state.session.plan();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(u16::try_from(plan.len() + 3).unwrap_or(u16::MAX)),
            Constraint::Min(3),
        ])
        .split(area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Installing... ", Styles::text()),
            Span::styled(format_duration(state.session.elapsed()), Styles::text_muted()),
        ]),
        Line::from(""),
    ];
    lines.extend(
        plan.modules()
            .iter()
            .enumerate()
            .map(|(i, module)| status_line(state, i, module.name())),
    );
    f.render_widget(Paragraph::new(lines), chunks[0]);

    // Module output arrives in one piece when each module completes
    let log: Vec<&str> = state
        .session
        .log()
        .iter()
        .flat_map(|chunk| chunk.lines())
        .collect();
    let visible = usize::from(chunks[1].height.saturating_sub(2)).min(OUTPUT_TAIL);
    let tail: Vec<Line> = log[log.len().saturating_sub(visible)..]
        .iter()
        .map(|line| Line::from(Span::styled(*line, Styles::text_muted())))
        .collect();
    f.render_widget(Paragraph::new(tail).block(panel("Output")), chunks[1]);
}

// =============================================================================
// Finished
// =============================================================================

pub fn render_done(f: &mut Frame, area: Rect, state: &AppState) {
    let session = &state.session;
    let mut lines = Vec::new();

    if let Some(err) = session.resolution_error() {
        lines.push(Line::from(Span::styled(format!("  Error: {err}"), Styles::error())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Nothing was installed.",
            Styles::text_muted(),
        )));
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        return;
    }

    let mut headline = vec![Span::styled(
        format!("  Done in {}", format_duration(session.elapsed())),
        Styles::text(),
    )];
    if session.failed() > 0 {
        headline.push(Span::raw(", "));
        headline.push(Span::styled(format!("{} succeeded", session.succeeded()), Styles::success()));
        headline.push(Span::raw(", "));
        headline.push(Span::styled(format!("{} failed", session.failed()), Styles::error()));
    }
    lines.push(Line::from(headline));
    if session.is_cancelled() {
        lines.push(Line::from(Span::styled(
            "  Cancelled before all modules ran",
            Styles::warning(),
        )));
    }
    lines.push(Line::from(""));

    lines.extend(
        session
            .plan()
            .modules()
            .iter()
            .enumerate()
            .map(|(i, module)| status_line(state, i, module.name())),
    );
    lines.push(Line::from(""));

    let ran: Vec<&str> = session.results().iter().map(|r| r.id.as_str()).collect();
    let steps = postinstall::render_manual_steps(&ran);
    let mut steps = steps.lines();
    if let Some(heading) = steps.next() {
        lines.push(Line::from(Span::styled(heading.to_string(), Styles::title())));
    }
    lines.extend(steps.map(|line| Line::from(Span::styled(line.to_string(), Styles::text()))));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use crate::app::AppState;
    use crate::install_state::{Completion, Message, Outcome};
    use crate::registry::RegistryBuilder;
    use crate::test_support::FakeModule;
    use crate::ui::test_render::{contains, render_to_lines};
    use std::sync::Arc;
    use std::time::Duration;

    fn state() -> AppState {
        let mut builder = RegistryBuilder::new();
        builder
            .register(FakeModule::ok("homebrew", &[]))
            .unwrap()
            .register(FakeModule::ok("fish", &["homebrew"]))
            .unwrap()
            .register(FakeModule::ok("ghostty", &[]))
            .unwrap();
        AppState::new(Arc::new(builder.build().unwrap()))
    }

    fn complete(state: &mut AppState, index: usize, outcome: Outcome, log: &str) {
        state.send(Message::Completed(Completion {
            index,
            outcome,
            elapsed: Duration::from_millis(12),
            log: log.to_string(),
        }));
    }

    #[test]
    fn test_select_view_lists_modules_with_dependencies() {
        let mut state = state();
        state.send(Message::Toggle(2));
        let lines = render_to_lines(&state, 80, 24);
        assert!(contains(&lines, "▸ ● homebrew"));
        assert!(contains(&lines, "fish (requires homebrew)"));
        assert!(contains(&lines, "○ ghostty"));
        assert!(contains(&lines, "Select modules (2/3)"));
        assert!(contains(&lines, "fake"));
    }

    #[test]
    fn test_install_view_shows_progress() {
        let mut state = state();
        state.send(Message::Start);
        complete(&mut state, 0, Outcome::Succeeded, "brew ok\n");
        let lines = render_to_lines(&state, 80, 24);
        assert!(contains(&lines, "Installing..."));
        assert!(contains(&lines, "✓ homebrew (12ms)"));
        assert!(contains(&lines, "○ ghostty"));
        assert!(contains(&lines, "brew ok"));
    }

    #[test]
    fn test_done_view_shows_failures_and_steps() {
        let mut state = state();
        state.send(Message::Start);
        complete(&mut state, 0, Outcome::Succeeded, "");
        complete(&mut state, 1, Outcome::Failed("chsh failed".into()), "");
        complete(&mut state, 2, Outcome::Succeeded, "");

        let lines = render_to_lines(&state, 80, 30);
        assert!(contains(&lines, "1 failed"));
        assert!(contains(&lines, "✗ fish chsh failed (12ms)"));
        assert!(contains(&lines, "Manual Steps:"));
        assert!(contains(&lines, "1. Open a new terminal"));
        assert!(contains(&lines, "q/enter exit"));
    }

    #[test]
    fn test_done_view_marks_skipped_after_cancel() {
        let mut state = state();
        state.send(Message::Start);
        state.send(Message::Cancel);
        complete(&mut state, 0, Outcome::Succeeded, "");
        let lines = render_to_lines(&state, 80, 24);
        assert!(contains(&lines, "Cancelled before all modules ran"));
        assert!(contains(&lines, "✓ homebrew (12ms)"));
        assert!(contains(&lines, "– fish (skipped)"));
    }
}
