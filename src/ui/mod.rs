//! Interactive terminal shell.
//!
//! A thin collaborator around the store and the renderer: it reads the
//! viewport size and key input, asks [`crate::view::render`] for the
//! window of display lines, and forwards CRUD and send operations to
//! the store. Every store error is caught here, shown on the status
//! line, and the loop returns to the idle prompt; nothing in this
//! module terminates the process.

pub mod labels;

pub use labels::Labels;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use thiserror::Error;
use tracing::warn;

use crate::config::ResolvedConfig;
use crate::store::ConversationStore;
use crate::view::{render, RenderStyle, Viewport};

/// Width of the conversation-list column.
const SIDE_WIDTH: u16 = 30;

/// Lines jumped by PageUp/PageDown.
const PAGE_STEP: usize = 10;

/// Terminal-level failures of the interactive shell.
#[derive(Debug, Error)]
pub enum UiError {
    /// Raw-mode, drawing, or event-read failure
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// What the input line currently feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    /// Typing a chat prompt
    Prompt,
    /// Typing a new name for the current conversation
    Rename,
    /// Typing the delete confirmation word
    ConfirmDelete,
}

/// Interactive application state.
pub struct App {
    store: ConversationStore,
    labels: Labels,
    style: RenderStyle,
    input: String,
    mode: InputMode,
    scroll_offset: usize,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    /// Build the app around an opened store.
    pub fn new(store: ConversationStore, labels: Labels, style: RenderStyle) -> Self {
        Self {
            store,
            labels,
            style,
            input: String::new(),
            mode: InputMode::Prompt,
            scroll_offset: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Whether the event loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                // An interrupt abandons the pending input, not the app.
                KeyCode::Char('c') => self.reset_input(),
                KeyCode::Char('n') => self.new_chat(),
                KeyCode::Char('r') => self.start_rename(),
                KeyCode::Char('d') => self.start_delete(),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Esc => {
                if self.mode == InputMode::Prompt {
                    self.should_quit = true;
                } else {
                    self.reset_input();
                }
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::Down => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(PAGE_STEP),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_STEP),
            KeyCode::Tab => self.cycle_conversation(),
            _ => {}
        }
    }

    fn reset_input(&mut self) {
        self.input.clear();
        self.mode = InputMode::Prompt;
    }

    fn new_chat(&mut self) {
        self.store.deselect();
        self.scroll_offset = 0;
        self.reset_input();
    }

    fn start_rename(&mut self) {
        if let Some(current) = self.store.current() {
            self.input = current.to_string();
            self.mode = InputMode::Rename;
        }
    }

    fn start_delete(&mut self) {
        if self.store.current().is_some() {
            self.input.clear();
            self.mode = InputMode::ConfirmDelete;
            self.status = Some(self.labels.delete_confirm_hint.to_string());
        }
    }

    fn cycle_conversation(&mut self) {
        let names = self.store.list_names();
        if names.is_empty() {
            return;
        }
        let next = match self.store.current() {
            Some(current) => {
                let index = names.iter().position(|n| n == current).unwrap_or(0);
                names[(index + 1) % names.len()].clone()
            }
            None => names[0].clone(),
        };
        if let Err(err) = self.store.select(&next) {
            self.status = Some(err.to_string());
            return;
        }
        self.scroll_offset = 0;
    }

    /// Apply the input line according to the current mode. Store errors
    /// surface on the status line and the loop stays alive.
    fn submit_input(&mut self) {
        match self.mode {
            InputMode::Prompt => {
                let key = self.store.current().map(str::to_string);
                match self.store.send(key.as_deref(), &self.input) {
                    Ok(_) => {
                        self.input.clear();
                        self.scroll_offset = 0;
                    }
                    Err(err) => {
                        warn!(error = %err, "send failed");
                        self.status = Some(err.to_string());
                    }
                }
            }
            InputMode::Rename => {
                if let Some(current) = self.store.current().map(str::to_string) {
                    if let Err(err) = self.store.rename(&current, &self.input) {
                        self.status = Some(err.to_string());
                    }
                }
                self.reset_input();
            }
            InputMode::ConfirmDelete => {
                if self.input == "DELETE" {
                    if let Some(current) = self.store.current().map(str::to_string) {
                        if let Err(err) = self.store.delete(&current) {
                            self.status = Some(err.to_string());
                        }
                        self.scroll_offset = 0;
                    }
                }
                self.reset_input();
            }
        }
    }

    /// Draw one frame: chat list, conversation window, input line,
    /// status line.
    pub fn draw(&self, frame: &mut Frame) {
        let rows = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());
        let panes =
            Layout::horizontal([Constraint::Length(SIDE_WIDTH), Constraint::Min(1)]).split(rows[0]);

        // Chat list with the active conversation highlighted.
        let names = self.store.list_names();
        let items: Vec<ListItem> = names.iter().map(|n| ListItem::new(n.clone())).collect();
        let mut list_state = ListState::default();
        list_state.select(
            self.store
                .current()
                .and_then(|current| names.iter().position(|n| n == current)),
        );
        frame.render_stateful_widget(
            List::new(items)
                .block(Block::bordered().title(self.labels.chat_list_title))
                .highlight_style(ratatui::style::Style::new().reversed()),
            panes[0],
            &mut list_state,
        );

        // Conversation window straight from the pure renderer. The +2
        // puts the windowing's chrome reservation in line with this
        // pane's borders.
        let chat_area = panes[1];
        let viewport = Viewport::new(chat_area.height.saturating_add(2), chat_area.width);
        let messages = self
            .store
            .current()
            .and_then(|name| self.store.get(name))
            .map(|conv| conv.messages().to_vec())
            .unwrap_or_default();
        let lines: Vec<Line> = render(&messages, viewport, self.scroll_offset, &self.style)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().title(self.labels.conversation_title)),
            chat_area,
        );

        // Input line, titled by mode.
        let input_title = match self.mode {
            InputMode::Prompt => self.labels.prompt_title,
            InputMode::Rename => self.labels.rename_chat_title,
            InputMode::ConfirmDelete => self.labels.delete_chat_title,
        };
        frame.render_widget(
            Paragraph::new(self.input.as_str()).block(Block::bordered().title(input_title)),
            rows[1],
        );

        // Status line: last error or the key hints.
        let status = self
            .status
            .as_deref()
            .unwrap_or(self.labels.key_hints);
        frame.render_widget(Paragraph::new(status).dim(), rows[2]);
    }

    /// Poll-and-draw loop, generic over the backend so tests can run it
    /// against a `TestBackend`.
    pub fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), UiError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Run the interactive shell until the user quits, restoring the
/// terminal on the way out.
pub fn run(store: ConversationStore, config: &ResolvedConfig) -> Result<(), UiError> {
    let labels = Labels::for_tag(&config.language);
    let style = labels.render_style(
        config.user_prefix.as_deref(),
        config.assistant_prefix.as_deref(),
    );
    let mut app = App::new(store, labels, style);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app.event_loop(&mut terminal);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

// ===== Tests =====
