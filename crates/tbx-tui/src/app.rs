//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        alert::AlertToast,
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        input_line::{InputLine, InputLineState},
        output_pane::{OutputPane, OutputPaneState},
        status_bar::StatusBar,
        tab_bar::TabBar,
        text_area::{TextArea, TextAreaState},
    },
};
use chrono::Utc;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tbx_core::{config::Config, session, ExtractionStats};

// ---------------------------------------------------------------------------
// Tool + focus types
// ---------------------------------------------------------------------------

/// The two tools behind the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Extractor,
    Encryption,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Extractor, ToolKind::Encryption];

    /// Resolve a user-supplied tool name (CLI flag, config value, `:tool`
    /// command) to a tool.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "extract" | "extractor" | "logs" => Some(ToolKind::Extractor),
            "encrypt" | "encryption" => Some(ToolKind::Encryption),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ToolKind::Extractor => 0,
            ToolKind::Encryption => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ToolKind::Extractor => "1:extract",
            ToolKind::Encryption => "2:encrypt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Extractor JSON input pane.
    Input,
    /// Encryption passphrase line.
    Key,
    /// Encryption plaintext pane.
    Plaintext,
    /// The active tool's output pane.
    Output,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// Per-tool state
// ---------------------------------------------------------------------------

pub struct ExtractorTool {
    pub input: TextAreaState,
    pub output: OutputPaneState,
    pub stats: Option<ExtractionStats>,
}

impl ExtractorTool {
    fn new(initial_input: Option<String>) -> Self {
        Self {
            input: initial_input.map(TextAreaState::with_text).unwrap_or_default(),
            output: OutputPaneState::default(),
            stats: None,
        }
    }

    fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.stats = None;
    }
}

pub struct EncryptionTool {
    pub key: InputLineState,
    pub plaintext: TextAreaState,
    pub output: OutputPaneState,
}

impl EncryptionTool {
    fn new() -> Self {
        Self {
            key: InputLineState::default(),
            plaintext: TextAreaState::default(),
            output: OutputPaneState::default(),
        }
    }

    fn clear(&mut self) {
        self.key.clear();
        self.plaintext.clear();
        self.output.clear();
    }
}

/// A transient toast message with its dismissal deadline.
pub struct Alert {
    pub message: String,
    pub expires_at: Instant,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tool: ToolKind,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub extractor: ExtractorTool,
    pub encryption: EncryptionTool,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub alert: Option<Alert>,
    pub quit: bool,
}

impl AppState {
    /// Show a transient alert; it auto-dismisses after the configured timeout.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(message = %message, "alert");
        self.alert = Some(Alert {
            message,
            expires_at: Instant::now()
                + Duration::from_millis(self.config.ui.alert_timeout_ms),
        });
    }

    /// Drop the alert once its deadline has passed. Called every tick.
    fn tick_alert(&mut self) {
        if let Some(alert) = &self.alert {
            if Instant::now() >= alert.expires_at {
                self.alert = None;
            }
        }
    }

    /// Switch tabs, putting focus on the tool's first input pane.
    pub fn select_tool(&mut self, tool: ToolKind) {
        tracing::debug!(tool = ?tool, "tool selected");
        self.active_tool = tool;
        self.focus = default_focus(tool);
    }

    /// Cycle focus through the active tool's panes.
    pub fn focus_next(&mut self) {
        let next = match (self.active_tool, self.focus) {
            (ToolKind::Extractor, Focus::Input) => Focus::Output,
            (ToolKind::Extractor, _) => Focus::Input,
            (ToolKind::Encryption, Focus::Key) => Focus::Plaintext,
            (ToolKind::Encryption, Focus::Plaintext) => Focus::Output,
            (ToolKind::Encryption, _) => Focus::Key,
        };
        tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
        self.focus = next;
    }

    /// Run the active tool's primary action: extract or encrypt.
    pub fn run_active_tool(&mut self) {
        match self.active_tool {
            ToolKind::Extractor => {
                let outcome = session::run(&self.extractor.input.text);
                self.extractor.stats = outcome.stats();
                self.extractor
                    .output
                    .set(outcome.display_text().to_string(), outcome.is_error());
                tracing::debug!(error = outcome.is_error(), "extraction ran");
            }
            ToolKind::Encryption => {
                match tbx_crypto::encrypt(
                    &self.encryption.key.value,
                    &self.encryption.plaintext.text,
                ) {
                    Ok(armored) => self.encryption.output.set(armored, false),
                    // Precondition violations become transient alerts; the
                    // previous output stays on screen.
                    Err(err) => self.show_alert(err.to_string()),
                }
            }
        }
    }

    /// Copy the active tool's output text to the clipboard.
    pub fn copy_output(&mut self) {
        let text = match self.active_tool {
            ToolKind::Extractor => &self.extractor.output.text,
            ToolKind::Encryption => &self.encryption.output.text,
        };
        if text.is_empty() {
            self.show_alert("Nothing to copy yet.");
            return;
        }
        match tbx_core::clipboard::copy_text(text) {
            Ok(tool) => self.show_alert(format!("Copied to clipboard ({tool})")),
            Err(err) => self.show_alert(err.to_string()),
        }
    }

    /// Export the extracted logs to a timestamped file.
    ///
    /// Only a successful extraction can be exported — diagnostics cannot.
    pub fn export_output(&mut self) {
        let exportable = self.active_tool == ToolKind::Extractor
            && self.extractor.stats.is_some()
            && !self.extractor.output.is_error;
        if !exportable {
            self.show_alert("Nothing to export yet.");
            return;
        }
        let dir = self.config.export_dir();
        match tbx_core::export::write_export(&dir, &self.extractor.output.text, Utc::now()) {
            Ok(path) => self.show_alert(format!("Exported to {}", path.display())),
            Err(err) => self.show_alert(format!("Export failed: {err}")),
        }
    }

    /// Reset the active tool's inputs, output, and stats.
    pub fn clear_active_tool(&mut self) {
        match self.active_tool {
            ToolKind::Extractor => self.extractor.clear(),
            ToolKind::Encryption => self.encryption.clear(),
        }
        self.alert = None;
        self.focus = default_focus(self.active_tool);
        tracing::debug!(tool = ?self.active_tool, "tool cleared");
    }

    fn active_output(&mut self) -> &mut OutputPaneState {
        match self.active_tool {
            ToolKind::Extractor => &mut self.extractor.output,
            ToolKind::Encryption => &mut self.encryption.output,
        }
    }
}

fn default_focus(tool: ToolKind) -> Focus {
    match tool {
        ToolKind::Extractor => Focus::Input,
        ToolKind::Encryption => Focus::Key,
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Startup options resolved by the binary from CLI flags.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Tool to open at startup; overrides the config value.
    pub start_tool: Option<String>,
    /// Text preloaded into the extractor input pane.
    pub initial_input: Option<String>,
}

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(config: Config, theme: Theme, options: RunOptions) -> Self {
        let start_tool = options
            .start_tool
            .as_deref()
            .or(Some(config.ui.start_tool.as_str()))
            .and_then(|name| {
                let tool = ToolKind::from_name(name);
                if tool.is_none() {
                    tracing::warn!(name, "unknown start tool, falling back to extractor");
                }
                tool
            })
            .unwrap_or(ToolKind::Extractor);

        let state = AppState {
            active_tool: start_tool,
            focus: default_focus(start_tool),
            prev_focus: default_focus(start_tool),
            extractor: ExtractorTool::new(options.initial_input),
            encryption: EncryptionTool::new(),
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            alert: None,
            quit: false,
        };

        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.tick_alert();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            // Toggle help (only reachable in normal mode)
            AppEvent::Char('?') if !is_insert_mode(s.focus) => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            // Enter command mode with `:` (normal mode only)
            AppEvent::Char(':') if !is_insert_mode(s.focus) => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::SelectTool(index) => {
                if let Some(tool) = ToolKind::ALL.get(index) {
                    s.select_tool(*tool);
                }
            }

            AppEvent::Run => s.run_active_tool(),
            AppEvent::Copy => s.copy_output(),
            AppEvent::Export => s.export_output(),
            AppEvent::Clear => s.clear_active_tool(),

            AppEvent::FocusNext => s.focus_next(),

            // Leave the focused text pane
            AppEvent::Escape => {
                if is_insert_mode(s.focus) {
                    tracing::debug!(from = ?s.focus, "focus -> Output");
                    s.focus = Focus::Output;
                }
            }

            // Enter on the passphrase line advances to the plaintext pane
            AppEvent::Enter if s.focus == Focus::Key => {
                s.focus = Focus::Plaintext;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(
        focus,
        Focus::Input | Focus::Key | Focus::Plaintext | Focus::Command
    )
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Input => s.extractor.input.handle(&event),
        Focus::Key => s.encryption.key.handle(&event),
        Focus::Plaintext => s.encryption.plaintext.handle(&event),
        Focus::Output => s.active_output().handle(&event),
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const EXTRACT_INPUT_PLACEHOLDER: &str = "Paste your JSON here, e.g.:\n{\n    \"log\": \"Your log message here\",\n    \"kubernetes\": {...}\n}";
const EXTRACT_OUTPUT_PLACEHOLDER: &str =
    "No logs extracted yet — paste JSON above and press Ctrl+e.";
const KEY_PLACEHOLDER: &str = "Enter your encryption key";
const PLAINTEXT_PLACEHOLDER: &str = "Enter the text you want to encrypt...";
const CIPHERTEXT_PLACEHOLDER: &str = "Encrypted text will appear here...";

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let labels: Vec<&str> = ToolKind::ALL.iter().map(|t| t.label()).collect();
    frame.render_widget(
        TabBar::new(&labels, state.active_tool.index(), &state.theme),
        vert[0],
    );

    match state.active_tool {
        ToolKind::Extractor => draw_extractor(frame, state, vert[1]),
        ToolKind::Encryption => draw_encryption(frame, state, vert[1]),
    }

    let (stats, hint) = match state.active_tool {
        ToolKind::Extractor => (
            state.extractor.stats,
            " Ctrl+e:extract  y:copy  e:export  c:clear ",
        ),
        ToolKind::Encryption => (None, " Ctrl+e:encrypt  y:copy  c:clear "),
    };
    frame.render_widget(StatusBar::new(stats, hint, &state.theme), vert[2]);

    if let Some(alert) = &state.alert {
        let toast = AlertToast::new(&alert.message, &state.theme);
        let anchor = toast.anchor(area);
        frame.render_widget(toast, anchor);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

fn draw_extractor(frame: &mut Frame, state: &AppState, area: Rect) {
    let panes = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Fill(1)])
        .split(area);

    let input = TextArea::new(
        &state.extractor.input,
        "JSON Input",
        EXTRACT_INPUT_PLACEHOLDER,
        state.focus == Focus::Input,
        &state.theme,
    );
    if state.focus == Focus::Input {
        let (cx, cy) = input.cursor_position(panes[0]);
        frame.set_cursor_position((cx, cy));
    }
    frame.render_widget(input, panes[0]);

    frame.render_widget(
        OutputPane::new(
            &state.extractor.output,
            "Extracted Logs",
            EXTRACT_OUTPUT_PLACEHOLDER,
            state.focus == Focus::Output,
            &state.theme,
        ),
        panes[1],
    );
}

fn draw_encryption(frame: &mut Frame, state: &AppState, area: Rect) {
    let panes = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Fill(1),
        ])
        .split(area);

    let key = InputLine::new(
        &state.encryption.key,
        "Encryption Key",
        KEY_PLACEHOLDER,
        state.focus == Focus::Key,
        &state.theme,
    );
    if state.focus == Focus::Key {
        let (cx, cy) = key.cursor_position(panes[0]);
        frame.set_cursor_position((cx, cy));
    }
    frame.render_widget(key, panes[0]);

    let plaintext = TextArea::new(
        &state.encryption.plaintext,
        "Input Text",
        PLAINTEXT_PLACEHOLDER,
        state.focus == Focus::Plaintext,
        &state.theme,
    );
    if state.focus == Focus::Plaintext {
        let (cx, cy) = plaintext.cursor_position(panes[1]);
        frame.set_cursor_position((cx, cy));
    }
    frame.render_widget(plaintext, panes[1]);

    frame.render_widget(
        OutputPane::new(
            &state.encryption.output,
            "Encrypted Output",
            CIPHERTEXT_PLACEHOLDER,
            state.focus == Focus::Output,
            &state.theme,
        ),
        panes[2],
    );
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn app_state() -> AppState {
        let app = App::new(
            Config::defaults(),
            Theme::load_default(),
            RunOptions::default(),
        );
        app.state
    }

    #[test]
    fn tool_names_resolve() {
        assert_eq!(ToolKind::from_name("extract"), Some(ToolKind::Extractor));
        assert_eq!(ToolKind::from_name("EXTRACTOR"), Some(ToolKind::Extractor));
        assert_eq!(ToolKind::from_name("encrypt"), Some(ToolKind::Encryption));
        assert_eq!(ToolKind::from_name("encryption"), Some(ToolKind::Encryption));
        assert_eq!(ToolKind::from_name("nope"), None);
    }

    #[test]
    fn unknown_start_tool_falls_back_to_extractor() {
        let mut config = Config::defaults();
        config.ui.start_tool = "frobnicate".to_string();
        let app = App::new(config, Theme::load_default(), RunOptions::default());
        assert_eq!(app.state.active_tool, ToolKind::Extractor);
    }

    #[test]
    fn cli_tool_overrides_config() {
        let mut config = Config::defaults();
        config.ui.start_tool = "extract".to_string();
        let app = App::new(
            config,
            Theme::load_default(),
            RunOptions { start_tool: Some("encrypt".to_string()), initial_input: None },
        );
        assert_eq!(app.state.active_tool, ToolKind::Encryption);
        assert_eq!(app.state.focus, Focus::Key);
    }

    #[test]
    fn focus_cycles_per_tool() {
        let mut s = app_state();
        assert_eq!(s.focus, Focus::Input);
        s.focus_next();
        assert_eq!(s.focus, Focus::Output);
        s.focus_next();
        assert_eq!(s.focus, Focus::Input);

        s.select_tool(ToolKind::Encryption);
        assert_eq!(s.focus, Focus::Key);
        s.focus_next();
        assert_eq!(s.focus, Focus::Plaintext);
        s.focus_next();
        assert_eq!(s.focus, Focus::Output);
        s.focus_next();
        assert_eq!(s.focus, Focus::Key);
    }

    #[test]
    fn run_extractor_sets_output_and_stats() {
        let mut s = app_state();
        s.extractor.input.text = r#"{"log":"a"}{"log":"bb"}"#.to_string();
        s.run_active_tool();
        assert_eq!(s.extractor.output.text, "a\nbb");
        assert!(!s.extractor.output.is_error);
        let stats = s.extractor.stats.expect("stats present");
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.char_count, 4);
    }

    #[test]
    fn run_extractor_on_blank_input_is_an_error_display() {
        let mut s = app_state();
        s.run_active_tool();
        assert!(s.extractor.output.is_error);
        assert!(s.extractor.stats.is_none());
    }

    #[test]
    fn run_encryption_without_key_alerts_and_keeps_output() {
        let mut s = app_state();
        s.select_tool(ToolKind::Encryption);
        s.encryption.plaintext.text = "secret".to_string();
        s.run_active_tool();
        assert!(s.alert.is_some());
        assert!(s.encryption.output.text.is_empty());
    }

    #[test]
    fn run_encryption_fills_output() {
        let mut s = app_state();
        s.select_tool(ToolKind::Encryption);
        s.encryption.key.value = "hunter2".to_string();
        s.encryption.plaintext.text = "secret".to_string();
        s.run_active_tool();
        assert!(!s.encryption.output.text.is_empty());
        assert!(!s.encryption.output.is_error);
        assert!(s.alert.is_none());
    }

    #[test]
    fn export_without_stats_alerts() {
        let mut s = app_state();
        s.export_output();
        let alert = s.alert.expect("alert raised");
        assert!(alert.message.contains("Nothing to export"));
    }

    #[test]
    fn clear_resets_the_active_tool() {
        let mut s = app_state();
        s.extractor.input.text = r#"{"log":"a"}"#.to_string();
        s.run_active_tool();
        s.clear_active_tool();
        assert!(s.extractor.input.text.is_empty());
        assert!(s.extractor.output.text.is_empty());
        assert!(s.extractor.stats.is_none());
        assert_eq!(s.focus, Focus::Input);
    }
}
