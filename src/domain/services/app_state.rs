#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use ratatui::text::Line;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::BubbleList;
use super::ChatStore;
use super::Responder;
use super::Scroll;
use super::Upload;
use super::Uploads;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::Reply;
use crate::domain::models::SlashCommand;
use crate::domain::models::StorageBox;
use crate::domain::models::TextArea;
use crate::domain::models::ThemeName;
use crate::domain::models::ASSISTANT_NAME;

pub const EMPTY_MESSAGE_REPLY: &str =
    "Oops, empty message! Try typing something fun or uploading a photo. 😅";
pub const UPLOADED_PHOTO: &str = "Uploaded a photo!";
pub const INVALID_UPLOAD_REPLY: &str = "Oops, please upload a valid image file!";

pub fn onboarding_hint() -> String {
    return format!("Ask {ASSISTANT_NAME} anything, or /upload a photo");
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /new (/n) - Starts a new chat.
- /delete (/d) - Deletes the current chat, after confirming.
- /upload (/u) [PATH] - Uploads a photo from disk.
- /theme (/t) - Switches between the light and dark theme.
- /clear - Deletes every chat.
- /quit /exit (/q) - Exit GroxAI.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Enter - Send your message, or open the selected chat in the sidebar.
- Tab - Move focus between the message box and the chat list.
- . - Open the menu for the selected chat in the chat list.
- Up arrow - Scroll up, or select the previous chat in the chat list.
- Down arrow - Scroll down, or select the next chat in the chat list.
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+N - Start a new chat.
- CTRL+T - Switch theme.
- CTRL+B - Show or hide the chat list.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Input,
    Sidebar,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    Menu { conversation_id: String },
    ConfirmDelete { conversation_id: String, title: String },
}

pub struct AppState<'a> {
    pub focus: Focus,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub overlay: Overlay,
    pub responder: Responder,
    pub scroll: Scroll,
    pub selected: usize,
    pub sidebar_visible: bool,
    pub store: ChatStore,
    pub textarea: tui_textarea::TextArea<'a>,
    pub theme: ThemeName,
    pub tick: usize,
}

impl<'a> AppState<'a> {
    pub async fn new(storage: StorageBox, tx: mpsc::UnboundedSender<Event>) -> AppState<'a> {
        let store = ChatStore::load(storage).await;
        let theme = store
            .theme()
            .or_else(|| return ThemeName::parse(&Config::get(ConfigKey::Theme)))
            .unwrap_or(ThemeName::Light);

        return AppState {
            focus: Focus::Input,
            last_known_height: 0,
            last_known_width: 0,
            overlay: Overlay::None,
            responder: Responder::new(tx),
            scroll: Scroll::default(),
            selected: 0,
            sidebar_visible: true,
            store,
            textarea: TextArea::default(),
            theme,
            tick: 0,
        };
    }

    fn active_id(&self) -> String {
        return self.store.active_id().unwrap_or_default().to_string();
    }

    /// Routes one event. Returns true when the app should exit.
    pub async fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::AssistantReply(reply) => {
                self.handle_reply(reply).await;
                return false;
            }
            Event::UITick() => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Event::KeyboardCTRLC() => {
                return true;
            }
            event => {
                if self.overlay != Overlay::None {
                    self.handle_overlay_event(event).await;
                    return false;
                }

                return self.handle_key_event(event).await;
            }
        }
    }

    async fn handle_overlay_event(&mut self, event: Event) {
        match self.overlay.clone() {
            Overlay::Menu { conversation_id } => match event {
                Event::KeyboardEnter() => self.request_delete(&conversation_id),
                _ => self.close_overlay(),
            },
            Overlay::ConfirmDelete { .. } => match event {
                Event::KeyboardEnter() => self.confirm_delete().await,
                Event::KeyboardEsc() => self.close_overlay(),
                Event::KeyboardCharInput(Input {
                    key: Key::Char('y'),
                    ..
                }) => self.confirm_delete().await,
                Event::KeyboardCharInput(Input {
                    key: Key::Char('n'),
                    ..
                }) => self.close_overlay(),
                _ => (),
            },
            Overlay::None => (),
        }
    }

    async fn handle_key_event(&mut self, event: Event) -> bool {
        match event {
            Event::KeyboardCTRLN() => self.new_conversation().await,
            Event::KeyboardCTRLT() => self.toggle_theme().await,
            Event::KeyboardCTRLB() => self.toggle_sidebar(),
            Event::KeyboardTab() => self.toggle_focus(),
            Event::KeyboardEsc() => self.focus = Focus::Input,
            Event::UIScrollPageUp() => self.scroll.up_page(),
            Event::UIScrollPageDown() => self.scroll.down_page(),
            Event::UIScrollUp() => {
                if self.focus == Focus::Sidebar {
                    self.select_prev();
                } else {
                    self.scroll.up();
                }
            }
            Event::UIScrollDown() => {
                if self.focus == Focus::Sidebar {
                    self.select_next();
                } else {
                    self.scroll.down();
                }
            }
            Event::KeyboardPaste(text) => {
                if self.focus == Focus::Input {
                    self.paste(&text);
                }
            }
            Event::KeyboardEnter() => {
                if self.focus == Focus::Sidebar {
                    if let Some(conversation) = self.store.conversations().get(self.selected) {
                        let id = conversation.id.clone();
                        self.switch_to(&id).await;
                    }
                    return false;
                }

                let text = self.textarea.lines().join("\n");
                self.textarea = TextArea::default();
                return self.submit(&text).await;
            }
            Event::KeyboardCharInput(input) => {
                if self.focus == Focus::Input {
                    self.textarea.input(input);
                } else if matches!(input.key, Key::Char('.')) {
                    self.open_menu();
                }
            }
            _ => (),
        }

        return false;
    }

    fn paste(&mut self, text: &str) {
        for c in text.chars() {
            let key = match c {
                '\r' => continue,
                '\n' => Key::Enter,
                c => Key::Char(c),
            };

            self.textarea.input(Input {
                key,
                ctrl: false,
                alt: false,
            });
        }
    }

    /// Handles a submitted message box. Returns true on a quit command.
    pub async fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        let conversation_id = self.active_id();

        if text.is_empty() {
            self.append(
                &conversation_id,
                Message::new(Author::Assistant, EMPTY_MESSAGE_REPLY),
            )
            .await;
            return false;
        }

        if let Some(command) = SlashCommand::parse(text) {
            return self.run_command(command).await;
        }

        self.append(&conversation_id, Message::new(Author::User, text))
            .await;
        self.responder.schedule(&conversation_id, false);
        self.store.mark_chatted().await;
        self.sync_dependants(true);

        return false;
    }

    async fn run_command(&mut self, command: SlashCommand) -> bool {
        if command.is_quit() {
            return true;
        }

        if command.is_new() {
            self.new_conversation().await;
        } else if command.is_delete() {
            let id = self.active_id();
            self.request_delete(&id);
        } else if command.is_upload() {
            self.upload(&command.arg_text()).await;
        } else if command.is_theme() {
            self.toggle_theme().await;
        } else if command.is_clear() {
            self.clear_all().await;
        } else if command.is_help() {
            let id = self.active_id();
            self.append(&id, Message::new(Author::Assistant, &help_text()))
                .await;
        }

        return false;
    }

    pub async fn upload(&mut self, raw_path: &str) {
        let conversation_id = self.active_id();

        match Uploads::read(raw_path).await {
            Ok(Upload::Image {
                media_type,
                data_uri,
            }) => {
                tracing::debug!(media_type, "uploaded photo");
                self.append(
                    &conversation_id,
                    Message::new_with_image(Author::User, UPLOADED_PHOTO, &data_uri),
                )
                .await;
                self.responder.schedule(&conversation_id, true);
                self.sync_dependants(true);
            }
            Ok(Upload::Rejected { media_type }) => {
                tracing::debug!(media_type, "rejected upload");
                self.append(
                    &conversation_id,
                    Message::new(Author::Assistant, INVALID_UPLOAD_REPLY),
                )
                .await;
            }
            Err(err) => {
                tracing::warn!(err = ?err, "unable to read upload");
                self.append(
                    &conversation_id,
                    Message::new(Author::Assistant, INVALID_UPLOAD_REPLY),
                )
                .await;
            }
        }
    }

    /// Delivers a reply into the conversation it was scheduled for, whether or
    /// not that conversation is still active.
    pub async fn handle_reply(&mut self, reply: Reply) {
        if !self.responder.complete(reply.ticket) {
            tracing::debug!(ticket = reply.ticket, "ignoring cancelled reply");
            return;
        }

        self.append(
            &reply.conversation_id,
            Message::new(Author::Assistant, &reply.text),
        )
        .await;
    }

    async fn append(&mut self, conversation_id: &str, message: Message) {
        if let Err(err) = self.store.append_message(conversation_id, message).await {
            tracing::debug!(err = ?err, "dropped message");
            return;
        }

        self.sync_dependants(self.store.active_id() == Some(conversation_id));
    }

    pub async fn new_conversation(&mut self) {
        self.store.create_conversation().await;
        self.selected = 0;
        self.overlay = Overlay::None;
        self.sync_dependants(true);
    }

    pub async fn switch_to(&mut self, conversation_id: &str) {
        if let Err(err) = self.store.switch_active(conversation_id).await {
            tracing::debug!(err = ?err, "unable to switch conversation");
            return;
        }

        if let Some(idx) = self.store.index_of(conversation_id) {
            self.selected = idx;
        }
        self.focus = Focus::Input;
        self.sync_dependants(true);
    }

    pub fn select_next(&mut self) {
        let last = self.store.conversations().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_menu(&mut self) {
        if let Some(conversation) = self.store.conversations().get(self.selected) {
            self.overlay = Overlay::Menu {
                conversation_id: conversation.id.clone(),
            };
        }
    }

    pub fn request_delete(&mut self, conversation_id: &str) {
        match self.store.get(conversation_id) {
            Some(conversation) => {
                self.overlay = Overlay::ConfirmDelete {
                    conversation_id: conversation.id.clone(),
                    title: conversation.display_title().to_string(),
                };
            }
            None => {
                self.overlay = Overlay::None;
            }
        }
    }

    pub async fn confirm_delete(&mut self) {
        let overlay = std::mem::replace(&mut self.overlay, Overlay::None);
        if let Overlay::ConfirmDelete {
            conversation_id, ..
        } = overlay
        {
            self.responder.cancel(&conversation_id);
            self.store.delete_conversation(&conversation_id).await;

            let last = self.store.conversations().len().saturating_sub(1);
            self.selected = self.selected.min(last);
            self.sync_dependants(true);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub async fn clear_all(&mut self) {
        self.responder.cancel_all();
        self.store.clear_all().await;
        self.selected = 0;
        self.sync_dependants(true);
    }

    pub async fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.store.set_theme(self.theme).await;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
        if !self.sidebar_visible {
            self.focus = Focus::Input;
        }
    }

    pub fn toggle_focus(&mut self) {
        if self.focus == Focus::Sidebar {
            self.focus = Focus::Input;
            return;
        }

        self.sidebar_visible = true;
        self.focus = Focus::Sidebar;
        if let Some(idx) = self.store.active_id().and_then(|id| return self.store.index_of(id)) {
            self.selected = idx;
        }
    }

    /// Sidebar row the chat list keeps in view: the browsed row while the
    /// sidebar has focus, otherwise the active conversation.
    pub fn sidebar_anchor(&self) -> usize {
        if self.focus == Focus::Sidebar {
            return self.selected;
        }

        return self
            .store
            .active_id()
            .and_then(|id| return self.store.index_of(id))
            .unwrap_or(0);
    }

    pub fn is_typing(&self) -> bool {
        return self
            .store
            .active_id()
            .map(|id| return self.responder.is_pending(id))
            .unwrap_or(false);
    }

    pub fn show_hint(&self) -> bool {
        return !self.store.has_chatted() && self.textarea.lines().join("").trim().is_empty();
    }

    pub fn thread_lines(&self) -> Vec<Line<'static>> {
        let messages = self
            .store
            .active()
            .map(|conversation| return conversation.messages.as_slice())
            .unwrap_or(&[]);

        let mut typing = None;
        if self.is_typing() {
            typing = Some(BubbleList::typing_frame(self.tick));
        }

        return BubbleList::lines(
            messages,
            typing,
            self.last_known_width as usize,
            self.theme.palette(),
        );
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants(self.scroll.is_at_end());
    }

    fn sync_dependants(&mut self, jump_to_end: bool) {
        let list_length = u16::try_from(self.thread_lines().len()).unwrap_or(u16::MAX);
        self.scroll.set_state(list_length, self.last_known_height);

        if jump_to_end {
            self.scroll.last();
        }
    }
}
