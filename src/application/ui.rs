use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::application::cli;
use crate::domain::models::Event;
use crate::domain::models::ASSISTANT_NAME;
use crate::domain::services::events::EventsService;
use crate::domain::services::onboarding_hint;
use crate::domain::services::AppState;
use crate::domain::services::ChatList;
use crate::domain::services::Focus;
use crate::domain::services::Overlay;

const SIDEBAR_WIDTH: u16 = 32;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    events: &mut EventsService,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let palette = app_state.theme.palette();
            let base_style = Style::default().fg(palette.text).bg(palette.background);
            frame.render_widget(Block::default().style(base_style), frame.size());

            let mut main_area = frame.size();
            let mut sidebar_area = None;
            if app_state.sidebar_visible {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                    .split(frame.size());
                sidebar_area = Some(columns[0]);
                main_area = columns[1];
            }

            let mut constraints = vec![Constraint::Min(1)];
            let show_hint = app_state.show_hint();
            if show_hint {
                constraints.push(Constraint::Length(1));
            }
            constraints.push(Constraint::Max(4));

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(main_area);
            let thread_area = layout[0];
            let input_area = layout[layout.len() - 1];

            if thread_area.width != app_state.last_known_width
                || thread_area.height != app_state.last_known_height
            {
                app_state.set_rect(thread_area);
            }

            frame.render_widget(
                Paragraph::new(app_state.thread_lines()).scroll((app_state.scroll.position, 0)),
                thread_area,
            );

            if show_hint {
                frame.render_widget(
                    Paragraph::new(onboarding_hint())
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(palette.muted)),
                    layout[1],
                );
            }

            frame.render_widget(app_state.textarea.widget(), input_area);

            if let Some(sidebar_area) = sidebar_area {
                let mut border_style = Style::default().fg(palette.muted);
                if app_state.focus == Focus::Sidebar {
                    border_style = Style::default().fg(palette.user);
                }

                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(format!(" Chats {} ", app_state.theme.icon()));

                let mut selected = None;
                if app_state.focus == Focus::Sidebar {
                    selected = Some(app_state.selected);
                }

                let rows = ChatList::rows(
                    app_state.store.conversations(),
                    app_state.store.active_id(),
                    selected,
                    sidebar_area.width.saturating_sub(2) as usize,
                    palette,
                );
                let offset = ChatList::scroll_offset(
                    app_state.sidebar_anchor(),
                    sidebar_area.height.saturating_sub(2),
                );

                frame.render_widget(
                    Paragraph::new(rows).block(block).scroll((offset, 0)),
                    sidebar_area,
                );

                if let Overlay::Menu { .. } = app_state.overlay {
                    let row = (app_state.selected as u16).saturating_sub(offset);
                    let menu_area = ChatList::menu_rect(sidebar_area, row);
                    frame.render_widget(Clear, menu_area);
                    frame.render_widget(
                        Paragraph::new(ChatList::menu_lines(palette)).block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(palette.muted))
                                .style(base_style),
                        ),
                        menu_area,
                    );
                }
            }

            if let Overlay::ConfirmDelete { title, .. } = &app_state.overlay {
                let modal_area = ChatList::centered_rect(50, 7, frame.size());
                frame.render_widget(Clear, modal_area);
                frame.render_widget(
                    Paragraph::new(ChatList::confirm_lines(title, palette))
                        .wrap(Wrap { trim: true })
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_type(BorderType::Rounded)
                                .border_style(Style::default().fg(palette.danger))
                                .title(" Delete chat? ")
                                .padding(ratatui::widgets::Padding::new(1, 1, 0, 0))
                                .style(base_style),
                        ),
                    modal_area,
                );
            }
        })?;

        let event = events.next().await?;
        if app_state.handle_event(event).await {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    if let Err(err) = disable_raw_mode() {
        tracing::error!(err = ?err, "failed to disable raw mode");
    }
    if let Err(err) = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    ) {
        tracing::error!(err = ?err, "failed to restore terminal");
    }
}

pub async fn start(
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let storage = cli::storage_from_config()?;
    let mut app_state = AppState::new(storage, tx).await;
    tracing::info!(assistant = ASSISTANT_NAME, theme = app_state.theme.to_string(), "starting ui");

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut events = EventsService::new(rx);

    let res = start_loop(&mut terminal, &mut app_state, &mut events).await;
    tracing::debug!(
        pending = app_state.responder.pending_count(),
        "shutting down"
    );
    app_state.responder.cancel_all();
    if let Err(err) = app_state.store.persist_all().await {
        tracing::error!(err = ?err, "failed to save chats on exit");
    }

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
