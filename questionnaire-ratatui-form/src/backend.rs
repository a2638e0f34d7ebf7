//! Ratatui form surface implementation for the PresentationSurface trait.
//!
//! Displays the whole questionnaire at once in a scrollable form with keyboard navigation.

use std::io::{self, IsTerminal, Stderr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use questionnaire::{CompletionSink, PresentationSurface, Questionnaire, ViewNode};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::form::{
    CUSTOM_TEXT_TITLE, Focus, FormAction, FormState, TextBuffer, input_cursor, wrap_input,
    wrap_text,
};

/// How often the event loop checks whether the session gave up on the form.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Width of the `[✓] ` marker in front of option labels.
const MARKER_WIDTH: u16 = 4;

/// Error type for the Ratatui form surface.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// Stderr is not connected to a terminal.
    #[error("no interactive terminal available on stderr")]
    NotATerminal,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Ratatui form surface that displays the whole questionnaire at once.
///
/// The form is drawn on stderr so stdout stays free for the transcript.
#[derive(Debug, Clone, Default)]
pub struct RatatuiFormSurface {
    theme: Theme,
}

impl RatatuiFormSurface {
    /// Create a new Ratatui form surface with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// A running terminal form.
#[derive(Debug)]
pub struct RatatuiFormHandle {
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

/// Leaves raw mode and the alternate screen when dropped.
struct RestoreGuard;

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, Show);
    }
}

/// Terminal in form mode. Restored on drop, including on panics in the event loop.
struct FormTerminal {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    _restore: RestoreGuard,
}

impl FormTerminal {
    fn enter() -> Result<Self, RatatuiFormError> {
        enable_raw_mode()?;
        let restore = RestoreGuard;
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stderr))?;
        Ok(Self {
            terminal,
            _restore: restore,
        })
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut FormState,
    theme: &Theme,
    shutdown: &AtomicBool,
) -> io::Result<FormAction> {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            debug!("terminal form closed by session");
            return Ok(FormAction::Abandon);
        }

        terminal.draw(|frame| draw_form(frame, state, theme))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match state.handle_key(key) {
                FormAction::Continue => {}
                action => return Ok(action),
            }
        }
    }
}

fn run_form(
    mut terminal: FormTerminal,
    mut state: FormState,
    theme: Theme,
    shutdown: &AtomicBool,
    sink: CompletionSink,
) {
    let outcome = event_loop(&mut terminal.terminal, &mut state, &theme, shutdown);
    // Give the terminal back before anyone prints the transcript.
    drop(terminal);

    match outcome {
        Ok(FormAction::Submit) => {
            sink.submit(state.to_response());
        }
        Ok(_) => {
            sink.abandon();
        }
        Err(err) => {
            warn!(error = %err, "terminal form failed");
            sink.abandon();
        }
    }
}

/// A laid-out body node: index into `FormState::nodes`, top offset and height.
#[derive(Debug, Clone, Copy)]
struct Row {
    node: usize,
    y: u16,
    height: u16,
}

fn question_label(index: usize, text: &str) -> String {
    format!("{}. {}", index + 1, text)
}

fn line_count(lines: &[String]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX)
}

fn node_height(state: &FormState, node: &ViewNode, width: u16) -> u16 {
    match node {
        ViewNode::Header { introduction, .. } => line_count(&wrap_text(introduction, width)),
        ViewNode::Separator => 1,
        // Blank line above every question.
        ViewNode::Question { index, text } => {
            1 + line_count(&wrap_text(&question_label(*index, text), width))
        }
        ViewNode::Option { label, .. } => {
            line_count(&wrap_text(label, width.saturating_sub(MARKER_WIDTH)))
        }
        ViewNode::CustomText { question } => state
            .custom
            .get(*question)
            .map_or(3, |text| input_height(text, width)),
        ViewNode::Comment { .. } => 1 + input_height(&state.comment, width),
        ViewNode::Submit { .. } => 0,
    }
}

fn input_height(text: &TextBuffer, width: u16) -> u16 {
    2 + line_count(&wrap_input(&text.value, width.saturating_sub(2)))
}

fn layout_rows(state: &FormState, width: u16) -> (Vec<Row>, u16) {
    let mut y: u16 = 0;
    let rows = state
        .nodes
        .iter()
        .enumerate()
        .map(|(node, view)| {
            let height = node_height(state, view, width);
            let row = Row { node, y, height };
            y = y.saturating_add(height);
            row
        })
        .collect();
    (rows, y)
}

/// Keep the focused item, and the question above a first option, inside the viewport.
fn adjust_scroll(state: &mut FormState, rows: &[Row], viewport_height: u16) {
    let Some(focused) = state.focused_node() else {
        return;
    };
    let Some(row) = rows.get(focused) else {
        return;
    };

    let top = match (state.focus(), focused.checked_sub(1).and_then(|i| rows.get(i))) {
        (Focus::Option { option: 0, .. }, Some(question)) => question.y,
        _ => row.y,
    };
    let bottom = row.y.saturating_add(row.height);

    if bottom > state.scroll_offset.saturating_add(viewport_height) {
        state.scroll_offset = bottom.saturating_sub(viewport_height);
    }
    if top < state.scroll_offset {
        state.scroll_offset = top;
    }
}

pub(crate) fn draw_form(frame: &mut Frame, state: &mut FormState, theme: &Theme) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and author
            Constraint::Min(5),    // Questionnaire body
            Constraint::Length(3), // Submit button
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::styled(
            state.title.clone(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            format!("from {}", state.author),
            Style::default().fg(theme.secondary),
        ),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, chunks[0]);

    // 1 column margin on the left, 1 for the scrollbar on the right
    let body = chunks[1];
    let content_width = body.width.saturating_sub(2);
    let viewport_height = body.height;

    let (rows, total_height) = layout_rows(state, content_width);
    adjust_scroll(state, &rows, viewport_height);
    let scroll_offset = state.scroll_offset;
    let focused = state.focused_node();

    for row in &rows {
        let bottom = row.y.saturating_add(row.height);
        if bottom <= scroll_offset {
            continue;
        }
        if row.y >= scroll_offset.saturating_add(viewport_height) {
            break;
        }
        // Rows clipped at the top are skipped, they look broken half drawn.
        if row.y < scroll_offset {
            continue;
        }

        let visible_top = row.y - scroll_offset;
        let area = Rect {
            x: body.x + 1,
            y: body.y + visible_top,
            width: content_width,
            height: row.height.min(viewport_height - visible_top),
        };
        if let Some(node) = state.nodes.get(row.node) {
            draw_node(frame, state, node, area, focused == Some(row.node), theme);
        }
    }

    if total_height > viewport_height && body.width > 0 {
        let scrollbar_area = Rect {
            x: body.x + body.width - 1,
            y: body.y,
            width: 1,
            height: viewport_height,
        };

        let mut scrollbar_state = ScrollbarState::new(usize::from(total_height))
            .position(usize::from(scroll_offset))
            .viewport_content_length(usize::from(viewport_height));

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    let submit_focused = state.focus() == Focus::Submit;
    let submit_style = if submit_focused {
        Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    };
    let submit_text = if submit_focused {
        format!("[ {} ]", state.submit_label)
    } else {
        state.submit_label.clone()
    };
    let submit_button = Paragraph::new(submit_text)
        .style(submit_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if submit_focused {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(submit_button, chunks[2]);

    let help_text = "Tab/↓: Next  Shift+Tab/↑: Back  Space: Check  F10: Submit  Esc: Cancel";
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[3]);
}

fn draw_node(
    frame: &mut Frame,
    state: &FormState,
    node: &ViewNode,
    area: Rect,
    is_focused: bool,
    theme: &Theme,
) {
    match node {
        ViewNode::Header { introduction, .. } => {
            let text = Paragraph::new(lines(wrap_text(introduction, area.width)))
                .style(Style::default().fg(theme.text));
            frame.render_widget(text, area);
        }
        ViewNode::Separator => {
            let rule = Paragraph::new("─".repeat(usize::from(area.width)))
                .style(Style::default().fg(theme.border));
            frame.render_widget(rule, area);
        }
        ViewNode::Question { index, text } => {
            let label = Paragraph::new(lines(wrap_text(&question_label(*index, text), area.width)))
                .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD));
            frame.render_widget(label, below_blank_line(area));
        }
        ViewNode::Option {
            question,
            option,
            label,
        } => {
            let checked = state.is_checked(*question, *option);
            let marker = if checked { "[✓] " } else { "[ ] " };
            let indent = " ".repeat(usize::from(MARKER_WIDTH));

            let text: Vec<Line> = wrap_text(label, area.width.saturating_sub(MARKER_WIDTH))
                .into_iter()
                .enumerate()
                .map(|(i, line)| {
                    let prefix = if i == 0 { marker } else { indent.as_str() };
                    Line::from(format!("{prefix}{line}"))
                })
                .collect();

            let style = if is_focused {
                Style::default()
                    .fg(if checked { theme.success } else { theme.text })
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else if checked {
                Style::default().fg(theme.success)
            } else {
                Style::default().fg(theme.text)
            };
            frame.render_widget(Paragraph::new(text).style(style), area);
        }
        ViewNode::CustomText { question } => {
            if let Some(text) = state.custom.get(*question) {
                draw_input(frame, CUSTOM_TEXT_TITLE, text, area, is_focused, theme);
            }
        }
        ViewNode::Comment { prompt } => {
            draw_input(
                frame,
                prompt,
                &state.comment,
                below_blank_line(area),
                is_focused,
                theme,
            );
        }
        ViewNode::Submit { .. } => {}
    }
}

fn draw_input(
    frame: &mut Frame,
    title: &str,
    text: &TextBuffer,
    area: Rect,
    is_focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_focused {
            theme.primary
        } else {
            theme.border
        }))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            theme.text
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = Paragraph::new(lines(wrap_input(&text.value, inner.width)))
        .style(Style::default().fg(theme.text));
    frame.render_widget(value, inner);

    if is_focused && inner.width > 0 {
        let (row, col) = input_cursor(text, inner.width);
        if row < inner.height {
            frame.set_cursor_position((inner.x + col, inner.y + row));
        }
    }
}

fn below_blank_line(area: Rect) -> Rect {
    Rect {
        y: area.y.saturating_add(1),
        height: area.height.saturating_sub(1),
        ..area
    }
}

fn lines(text: Vec<String>) -> Vec<Line<'static>> {
    text.into_iter().map(Line::from).collect()
}

impl PresentationSurface for RatatuiFormSurface {
    type Handle = RatatuiFormHandle;
    type Error = RatatuiFormError;

    fn render(
        &self,
        questionnaire: &Questionnaire,
        sink: CompletionSink,
    ) -> Result<Self::Handle, Self::Error> {
        if !io::stderr().is_terminal() {
            return Err(RatatuiFormError::NotATerminal);
        }

        let terminal = FormTerminal::enter()?;
        let state = FormState::new(questionnaire);
        let theme = self.theme.clone();
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker = thread::Builder::new()
            .name("questionnaire-tui".to_string())
            .spawn({
                let shutdown = Arc::clone(&shutdown);
                move || run_form(terminal, state, theme, &shutdown, sink)
            })?;

        debug!(title = questionnaire.title(), "terminal form rendered");
        Ok(RatatuiFormHandle {
            shutdown,
            worker: Some(worker),
        })
    }

    fn dispose(&self, mut handle: Self::Handle) {
        handle.shutdown.store(true, Ordering::SeqCst);
        if let Some(worker) = handle.worker.take()
            && worker.join().is_err()
        {
            warn!("terminal form thread panicked");
        }
    }
}
