//! App — the session event loop.
//!
//! Owns the one `ControlState` and the terminal. Every command source
//! (keyboard, scan producer, deferred jump directives) funnels into a single
//! mpsc queue, so commands reach the processor strictly one at a time in
//! arrival order. Renderers only ever see the latest replacement state.

use std::io::{self, Write as _};
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use obx_core::command::{Button, Command, CustomAction};
use obx_core::config::Config;
use obx_core::state::Mode;
use obx_core::{transition, Catalog, ControlState};

use crate::keymap::{map_key, KeyAction};
use crate::scan::{self, ScanPlan};
use crate::screens;

/// Delay between the two scan-complete jump directives, so the install
/// screen is visible for a beat before antenna setup lands on top of it.
const JUMP_CHAIN_DELAY_MS: u64 = 120;

/// Internal event bus — everything the loop reacts to.
pub enum AppMessage {
    /// Raw terminal event from the blocking reader task.
    Event(Event),
    /// A remote command from a non-keyboard source (scan producer,
    /// deferred jump directives).
    Remote(Command),
}

pub struct App {
    config: Config,
    catalog: Catalog,
    state: ControlState,
    /// Command trace sink (JSON lines). `None` after a write error.
    trace: Option<std::fs::File>,
    /// Running scan producer, present only while the search screen is live.
    scan_task: Option<tokio::task::AbortHandle>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let trace_path = config.paths.data_dir.join("commands.log");
        let trace = match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&trace_path)
        {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("command trace unavailable ({}): {}", trace_path.display(), e);
                None
            }
        };

        let state = ControlState::new(&catalog);
        Self {
            config,
            catalog,
            state,
            trace,
            scan_task: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // Keyboard reader — blocking crossterm reads forwarded to the bus.
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("event read error: {}", e);
                    break;
                }
            }
        });

        info!("session started ({} channels)", self.catalog.channels.len());

        let result = loop {
            if let Err(e) = terminal.draw(|f| screens::draw(f, &self.catalog, &self.state)) {
                break Err(e.into());
            }
            match rx.recv().await {
                None => break Ok(()),
                Some(msg) => self.handle_message(msg, &tx),
            }
            if self.should_quit {
                break Ok(());
            }
        };

        if let Some(h) = self.scan_task.take() {
            h.abort();
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        result
    }

    fn handle_message(&mut self, msg: AppMessage, tx: &mpsc::Sender<AppMessage>) {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                self.handle_key(key, tx);
            }
            AppMessage::Event(_) => {} // resize redraws on next frame
            AppMessage::Remote(cmd) => self.apply(cmd, tx),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppMessage>) {
        match map_key(key) {
            Some(KeyAction::Quit) => {
                info!("quit requested");
                self.should_quit = true;
            }
            Some(KeyAction::Remote(button)) => self.on_button(button, tx),
            None => {}
        }
    }

    /// Route one remote button. The scan-complete acknowledgment is host
    /// business: `ok` on a finished scan becomes the two-step jump chain
    /// instead of reaching the processor.
    fn on_button(&mut self, button: Button, tx: &mpsc::Sender<AppMessage>) {
        if button == Button::Ok
            && self.state.mode == Mode::SearchProgress
            && self.state.search.is_complete()
        {
            info!("scan acknowledged — issuing install/antenna jump chain");
            self.apply(
                Command::Custom {
                    action: CustomAction::OpenInstall,
                },
                tx,
            );
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(JUMP_CHAIN_DELAY_MS)).await;
                let _ = tx
                    .send(AppMessage::Remote(Command::Custom {
                        action: CustomAction::OpenAntennaSetup,
                    }))
                    .await;
            });
            return;
        }
        self.apply(button.into(), tx);
    }

    /// Apply one command to the control state and reconcile host-side tasks.
    fn apply(&mut self, cmd: Command, tx: &mpsc::Sender<AppMessage>) {
        debug!("command {:?}", cmd);
        let next = transition(&self.catalog, &self.state, &cmd);
        if next.mode != self.state.mode {
            info!("screen {:?} → {:?}", self.state.mode, next.mode);
        }
        self.state = next;
        self.trace_command(&cmd);
        self.reconcile_scan(tx);
    }

    /// Keep the scan producer in lockstep with the control state: alive
    /// exactly while the search screen is open and unfinished.
    fn reconcile_scan(&mut self, tx: &mpsc::Sender<AppMessage>) {
        let wants_scan =
            self.state.power && self.state.mode == Mode::SearchProgress && !self.state.search.is_complete();
        match (&self.scan_task, wants_scan) {
            (None, true) => {
                let plan = ScanPlan::from_catalog(&self.catalog);
                let handle = scan::spawn(
                    tx.clone(),
                    plan,
                    self.state.search.progress,
                    self.config.scan.tick_ms,
                    self.config.scan.step_pct,
                );
                self.scan_task = Some(handle);
            }
            (Some(handle), false) => {
                handle.abort();
                self.scan_task = None;
            }
            _ => {}
        }
    }

    /// Append the command as one JSON line with a local timestamp.
    fn trace_command(&mut self, cmd: &Command) {
        let Some(file) = self.trace.as_mut() else {
            return;
        };
        let Ok(serde_json::Value::Object(mut line)) = serde_json::to_value(cmd) else {
            return;
        };
        line.insert(
            "ts".to_string(),
            chrono::Local::now().to_rfc3339().into(),
        );
        if let Err(e) = writeln!(file, "{}", serde_json::Value::Object(line)) {
            warn!("command trace write failed: {}", e);
            self.trace = None;
        }
    }
}
