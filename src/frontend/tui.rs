//! Full-screen terminal frontend

use crate::controller::SessionController;
use crate::qa::AnswerService;
use crate::session::{Message, Sender, SessionSnapshot};
use crate::view::{
    attribution, sender_label, time_label, PLACEHOLDER, SUBTITLE, THINKING, TITLE, WELCOME,
};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// What a key press asks the frontend to do
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Submit,
    SetDraft(String),
    Ignore,
}

pub async fn run<S>(controller: &Arc<SessionController<S>>) -> io::Result<()>
where
    S: AnswerService + 'static,
{
    tracing::info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, controller).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("Terminal UI finished");
    result
}

async fn event_loop<S>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &Arc<SessionController<S>>,
) -> io::Result<()>
where
    S: AnswerService + 'static,
{
    let mut keys = EventStream::new();
    let mut updates = controller.subscribe();

    loop {
        let snapshot = controller.snapshot();
        terminal.draw(|frame| draw(frame, &snapshot))?;

        tokio::select! {
            event = keys.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_key(controller, key).is_break() {
                        break;
                    }
                }
                // Resize and friends: redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            update = updates.recv() => match update {
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Renderer lagged behind session events");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

/// Apply one key press. The key is judged against the session as it is now,
/// not as last drawn: earlier keys in the same batch may have submitted.
fn handle_key<S>(controller: &Arc<SessionController<S>>, key: KeyEvent) -> ControlFlow<()>
where
    S: AnswerService + 'static,
{
    match key_action(&controller.snapshot(), key) {
        KeyAction::Quit => return ControlFlow::Break(()),
        KeyAction::Submit => {
            // The gate runs here, so the next key already sees `pending`
            if let Some(request) = controller.begin_submit_draft() {
                let controller = Arc::clone(controller);
                tokio::spawn(async move { controller.resolve(request).await });
            }
        }
        KeyAction::SetDraft(draft) => controller.set_draft(draft),
        KeyAction::Ignore => {}
    }
    ControlFlow::Continue(())
}

/// The input field and submit trigger are disabled while a request is in
/// flight; only quitting works then.
fn key_action(snapshot: &SessionSnapshot, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c' | 'd') if ctrl => KeyAction::Quit,
        _ if snapshot.pending => KeyAction::Ignore,
        KeyCode::Enter if snapshot.can_submit() => KeyAction::Submit,
        KeyCode::Backspace if !snapshot.draft.is_empty() => {
            let mut draft = snapshot.draft.clone();
            draft.pop();
            KeyAction::SetDraft(draft)
        }
        KeyCode::Char('u') if ctrl => KeyAction::SetDraft(String::new()),
        KeyCode::Char(c) if !ctrl => {
            let mut draft = snapshot.draft.clone();
            draft.push(c);
            KeyAction::SetDraft(draft)
        }
        _ => KeyAction::Ignore,
    }
}

fn draw(frame: &mut Frame, snapshot: &SessionSnapshot) {
    let [header, body, input] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_transcript(frame, body, snapshot);
    draw_input(frame, input, snapshot);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
    ];
    let header = Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_transcript(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    if snapshot.is_empty_state() {
        let welcome = Paragraph::new(WELCOME)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let [_, middle, _] = Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Min(1),
            Constraint::Percentage(40),
        ])
        .areas(area);
        frame.render_widget(welcome, middle);
        return;
    }

    let lines = transcript_lines(snapshot);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Follow the newest message
    let total = paragraph.line_count(area.width);
    let scroll = u16::try_from(total.saturating_sub(usize::from(area.height))).unwrap_or(u16::MAX);
    frame.render_widget(paragraph.scroll((scroll, 0)), area);
}

fn transcript_lines(snapshot: &SessionSnapshot) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in &snapshot.transcript {
        lines.extend(message_lines(message));
        lines.push(Line::default());
    }
    if snapshot.pending {
        lines.push(Line::from(Span::styled(
            THINKING,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let (alignment, text_style) = match message.sender() {
        Sender::User => (Alignment::Right, Style::default().fg(Color::Cyan)),
        Sender::Bot => (Alignment::Left, Style::default()),
    };

    let mut lines: Vec<Line<'static>> = message
        .text()
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), text_style)).alignment(alignment))
        .collect();

    let mut meta = format!(
        "{} · {}",
        sender_label(message.sender()),
        time_label(message.timestamp())
    );
    if let Some(source) = attribution(message) {
        meta.push_str(" · ");
        meta.push_str(&source);
    }
    lines.push(
        Line::from(Span::styled(
            meta,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(alignment),
    );
    lines
}

fn draw_input(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let (title, border) = if snapshot.pending {
        (" Waiting for answer ", Style::default().fg(Color::DarkGray))
    } else {
        (" Send (Enter) · Quit (Esc) ", Style::default().fg(Color::Blue))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    let content = if snapshot.draft.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(snapshot.draft.clone())
    };
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if !snapshot.pending {
        let typed = u16::try_from(snapshot.draft.chars().count()).unwrap_or(u16::MAX);
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(typed).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}
