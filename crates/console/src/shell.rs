//! The interactive loop: read a line, run the command, render the screen.
//!
//! The shell never mutates registry state itself. It calls a registry
//! operation, drains the change events that operation published, and renders
//! from fresh snapshots.

use std::io::{self, BufRead, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use serde_json::json;
use tokio::sync::broadcast::{self, error::TryRecvError};

use foundrytrack_core::auth::{ProfileUpdate, Session};
use foundrytrack_core::error::CoreError;
use foundrytrack_core::maintenance::VALID_MAINTENANCE_TYPES;
use foundrytrack_core::types::PatternId;
use foundrytrack_events::bus::EVENT_STATUS_CHANGED;
use foundrytrack_events::{EventBus, RegistryEvent};
use foundrytrack_registry::PatternRegistry;

use crate::command::{self, Command};
use crate::config::{ConsoleConfig, OutputFormat};
use crate::render;

const PROMPT: &str = "foundrytrack> ";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W: Write> {
    registry: PatternRegistry,
    session: Session,
    events: broadcast::Receiver<RegistryEvent>,
    output: OutputFormat,
    require_login: bool,
    /// Pattern shown on the scan screen, target of a bare `use`.
    scanned: Option<PatternId>,
    out: W,
}

impl<W: Write> Shell<W> {
    /// Build a shell over `registry`, which must publish on `bus`.
    pub fn new(registry: PatternRegistry, bus: &EventBus, config: &ConsoleConfig, out: W) -> Self {
        Self {
            registry,
            session: Session::new(),
            events: bus.subscribe(),
            output: config.output,
            require_login: config.require_login,
            scanned: None,
            out,
        }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Process lines from `input` until it ends or `quit` is entered.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            if self.handle_line(&line?)? == Flow::Quit {
                break;
            }
        }
        tracing::debug!("Console input finished");
        Ok(())
    }

    /// Read from a terminal with line editing and history.
    pub fn run_interactive(&mut self) -> io::Result<()> {
        let mut editor = DefaultEditor::new().map_err(io::Error::other)?;
        loop {
            let read = editor.readline(PROMPT);
            if let Ok(line) = &read {
                if !line.trim().is_empty() {
                    editor
                        .add_history_entry(line.as_str())
                        .map_err(io::Error::other)?;
                }
            }
            if self.handle_readline(read)? == Flow::Quit {
                break;
            }
        }
        tracing::debug!("Console input finished");
        Ok(())
    }

    /// Ctrl-D quits; Ctrl-C abandons the current line only.
    pub fn handle_readline(&mut self, read: Result<String, ReadlineError>) -> io::Result<Flow> {
        match read {
            Ok(line) => self.handle_line(&line),
            Err(ReadlineError::Interrupted) => {
                writeln!(self.out, "^C (type quit to exit)")?;
                Ok(Flow::Continue)
            }
            Err(ReadlineError::Eof) => Ok(Flow::Quit),
            Err(e) => Err(io::Error::other(e)),
        }
    }

    /// Parse and run one line. Command errors are rendered, not returned.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match command::parse(line) {
            Ok(None) => Ok(Flow::Continue),
            Ok(Some(cmd)) => self.execute(cmd),
            Err(e) => {
                self.error(&e.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, cmd: Command) -> io::Result<Flow> {
        if self.require_login && !cmd.is_public() {
            if let Some(e) = self.session.require_user().err() {
                self.error(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        }
        tracing::debug!(command = ?cmd, "Executing command");

        let result = match cmd {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.text(&render::help()).map(Ok),
            Command::Login { email, password } => {
                if self.session.login(&email, &password) {
                    self.show_home().map(Ok)
                } else {
                    Ok(Err(CoreError::Unauthorized(
                        "Please enter both email and password".to_string(),
                    )))
                }
            }
            Command::LoginDemo => {
                self.session.login_demo();
                self.show_home().map(Ok)
            }
            Command::Logout => {
                self.session.logout();
                self.scanned = None;
                self.text("Signed out.\n").map(Ok)
            }
            Command::Home => self.show_home().map(Ok),
            Command::Profile => {
                let user = self.session.user().cloned();
                self.emit(&user, |u| render::profile(u.as_ref())).map(Ok)
            }
            Command::ProfileUpdate {
                full_name,
                phone_number,
                department,
                new_password,
            } => {
                let update = ProfileUpdate {
                    full_name,
                    phone_number,
                    department,
                    new_password,
                };
                match update.apply() {
                    Ok(summary) => self
                        .emit(&summary, |_| "Profile updated successfully!\n".to_string())
                        .map(Ok),
                    Err(e) => Ok(Err(e)),
                }
            }
            Command::Dashboard => {
                let dashboard = self.registry.dashboard();
                self.emit(&dashboard, render::dashboard).map(Ok)
            }
            Command::Patterns { filter, query } => {
                let patterns = self.registry.search_filtered(&query, filter);
                self.emit(&patterns, |p| render::pattern_table(p)).map(Ok)
            }
            Command::Scan { pattern_id } => match self.registry.scan(&pattern_id).cloned() {
                Ok(pattern) => {
                    self.scanned = Some(pattern.id().to_string());
                    self.emit(&pattern, render::pattern_detail).map(Ok)
                }
                Err(e) => {
                    self.scanned = None;
                    Ok(Err(e))
                }
            },
            Command::ScanQr => match self.registry.simulate_qr_scan(&mut rand::rng()).cloned() {
                Ok(pattern) => {
                    self.scanned = Some(pattern.id().to_string());
                    self.emit(&pattern, |p| {
                        format!("QR code scanned: detected {}\n{}", p.id(), render::pattern_detail(p))
                    })
                    .map(Ok)
                }
                Err(e) => Ok(Err(e)),
            },
            Command::Use { pattern_id } => self.use_pattern(pattern_id),
            Command::Logs => {
                let logs = self.registry.maintenance_logs();
                let stats = self.registry.maintenance_stats();
                let text = render::log_table(logs, self.registry.patterns(), &stats);
                let value = json!({ "logs": logs, "stats": stats });
                self.emit(&value, |_| text).map(Ok)
            }
            Command::Log {
                pattern_id,
                maintenance_type,
                remarks,
            } => match self
                .registry
                .add_maintenance_log(&pattern_id, &maintenance_type, &remarks)
            {
                Ok(log_id) => {
                    self.drain_events()?;
                    let logged = self.registry.maintenance_logs()[0].pattern_id().to_string();
                    self.emit(&json!({ "logId": log_id, "patternId": logged }), |_| {
                        format!("Maintenance log {log_id} added for pattern {logged}\n")
                    })
                    .map(Ok)
                }
                Err(e) => Ok(Err(e)),
            },
            Command::Types => self
                .emit(&VALID_MAINTENANCE_TYPES, |_| render::maintenance_types())
                .map(Ok),
        };

        if let Err(e) = result? {
            self.error(&e.to_string())?;
        }
        Ok(Flow::Continue)
    }

    /// Count one use of `pattern_id`, or of the last scanned pattern.
    ///
    /// Typed ids resolve like `scan`, case-insensitively, to the canonical
    /// id. Unknown ids pass straight to the registry, which ignores them;
    /// the screen then reports that nothing matched.
    fn use_pattern(&mut self, pattern_id: Option<String>) -> io::Result<Result<(), CoreError>> {
        let id = match pattern_id {
            Some(typed) => match self.registry.scan(&typed) {
                Ok(pattern) => pattern.id().to_string(),
                Err(_) => typed,
            },
            None => match self.scanned.clone() {
                Some(scanned) => scanned,
                None => {
                    return Ok(Err(CoreError::Validation(
                        "Scan a pattern first or give a pattern ID".to_string(),
                    )))
                }
            },
        };

        self.registry.increment_usage(&id);
        self.drain_events()?;

        match self.registry.find_pattern(&id).cloned() {
            Some(pattern) => {
                self.scanned = Some(pattern.id().to_string());
                self.emit(&pattern, |p| {
                    format!(
                        "Usage updated: pattern {} usage count is now {}\n{}",
                        p.id(),
                        p.usage_count(),
                        render::pattern_detail(p)
                    )
                })
                .map(Ok)
            }
            None => Ok(Err(CoreError::NotFound {
                entity: "pattern",
                id,
            })),
        }
    }

    /// Consume pending registry events, announcing status changes.
    fn drain_events(&mut self) -> io::Result<()> {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    tracing::debug!(event_type = %event.event_type, "Registry event received");
                    if event.event_type == EVENT_STATUS_CHANGED && self.output == OutputFormat::Text {
                        let id = event.pattern_id.as_deref().unwrap_or("?");
                        let from = event.payload["from"].as_str().unwrap_or("?");
                        let to = event.payload["to"].as_str().unwrap_or("?");
                        writeln!(self.out, "Status of {id} changed: {from} -> {to}")?;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Console fell behind registry events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(()),
            }
        }
    }

    fn show_home(&mut self) -> io::Result<()> {
        let text = render::home(self.session.user());
        self.text(&text)
    }

    fn text(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    /// Write `value` as JSON, or as text produced by `render`.
    fn emit<T, F>(&mut self, value: &T, render: F) -> io::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        match self.output {
            OutputFormat::Text => self.text(&render(value)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
                writeln!(self.out, "{json}")
            }
        }
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        tracing::debug!(message, "Command failed");
        match self.output {
            OutputFormat::Text => writeln!(self.out, "Error: {message}"),
            OutputFormat::Json => writeln!(self.out, "{}", json!({ "error": message })),
        }
    }
}
