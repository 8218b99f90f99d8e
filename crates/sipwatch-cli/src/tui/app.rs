//! TUI application state and event loop.
//!
//! The app owns the refresh scheduler and polls it once per frame, so the
//! dashboard and the cadence share one thread. Pausing skips the poll; the
//! scheduler then fires a single catch-up tick on resume.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use sipwatch_core::catalog::{self, CallAnalytics};
use sipwatch_core::{Alert, NetworkNode, ProtocolShare, RefreshScheduler, Snapshot, Topology};

// ---------------------------------------------------------------------------
// Tab
// ---------------------------------------------------------------------------

/// Dashboard views, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    LiveCalls,
    Analytics,
    Alerts,
    Network,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::LiveCalls,
        Tab::Analytics,
        Tab::Alerts,
        Tab::Network,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::LiveCalls,
            Self::LiveCalls => Self::Analytics,
            Self::Analytics => Self::Alerts,
            Self::Alerts => Self::Network,
            Self::Network => Self::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Network,
            Self::LiveCalls => Self::Overview,
            Self::Analytics => Self::LiveCalls,
            Self::Alerts => Self::Analytics,
            Self::Network => Self::Alerts,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::LiveCalls => "Live Calls",
            Self::Analytics => "Analytics",
            Self::Alerts => "Alerts",
            Self::Network => "Network",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::LiveCalls => 1,
            Self::Analytics => 2,
            Self::Alerts => 3,
            Self::Network => 4,
        }
    }

    /// Tab for a `1`–`5` key press.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    scheduler: RefreshScheduler,
    snapshot: Arc<Snapshot>,
    topology: Topology,
    analytics: CallAnalytics,
    overview_alerts: Vec<Alert>,
    protocols: Vec<ProtocolShare>,
    tab: Tab,
    /// Index into the topology's nodes; `None` until the user picks one.
    selected_node: Option<usize>,
    paused: bool,
    running: bool,
    last_export: Option<PathBuf>,
    export_error: Option<String>,
}

impl App {
    pub fn new(scheduler: RefreshScheduler) -> Self {
        let snapshot = scheduler.current();
        Self {
            scheduler,
            snapshot,
            topology: Topology::demo(),
            analytics: catalog::call_analytics(),
            overview_alerts: catalog::overview_alerts(),
            protocols: catalog::protocol_distribution(),
            tab: Tab::default(),
            selected_node: None,
            paused: false,
            running: true,
            last_export: None,
            export_error: None,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        self.scheduler.stop();

        if let Some(path) = &self.last_export {
            println!("Last export: {}", path.display());
        }

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }

            self.refresh(Instant::now());
        }

        Ok(())
    }

    /// Poll the scheduler and pick up a newly published snapshot.
    fn refresh(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        if self.scheduler.poll(now).is_some() {
            self.snapshot = self.scheduler.current();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.tab = self.tab.prev(),
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::from_digit(c) {
                    self.tab = tab;
                }
            }
            KeyCode::Up | KeyCode::Char('k') if self.tab == Tab::Network => self.select_prev_node(),
            KeyCode::Down | KeyCode::Char('j') if self.tab == Tab::Network => {
                self.select_next_node()
            }
            KeyCode::Char('p') => self.paused = !self.paused,
            KeyCode::Char('r') => {
                if self.scheduler.tick_now().is_some() {
                    self.snapshot = self.scheduler.current();
                }
            }
            KeyCode::Char('s') => self.export_snapshot(),
            _ => {}
        }
    }

    fn select_next_node(&mut self) {
        let n = self.topology.len();
        if n == 0 {
            return;
        }
        self.selected_node = Some(match self.selected_node {
            Some(i) => (i + 1) % n,
            None => 0,
        });
    }

    fn select_prev_node(&mut self) {
        let n = self.topology.len();
        if n == 0 {
            return;
        }
        self.selected_node = Some(match self.selected_node {
            Some(0) | None => n - 1,
            Some(i) => i - 1,
        });
    }

    fn export_snapshot(&mut self) {
        let epoch = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let path = PathBuf::from(format!("sipwatch-snapshot-{epoch}.json"));

        let json = serde_json::json!({
            "exported_at": epoch,
            "interval_ms": self.scheduler.interval().as_millis() as u64,
            "snapshot": &*self.snapshot,
            "topology": self.topology.nodes(),
        });

        let written = serde_json::to_string_pretty(&json)
            .map_err(io::Error::other)
            .and_then(|contents| std::fs::write(&path, contents));
        match written {
            Ok(()) => {
                log::info!("snapshot exported to {}", path.display());
                self.last_export = Some(path);
                self.export_error = None;
            }
            Err(e) => {
                log::warn!("snapshot export failed: {e}");
                self.export_error = Some(e.to_string());
            }
        }
    }

    // --- Public accessors ---

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
    pub fn topology(&self) -> &Topology {
        &self.topology
    }
    pub fn analytics(&self) -> &CallAnalytics {
        &self.analytics
    }
    pub fn overview_alerts(&self) -> &[Alert] {
        &self.overview_alerts
    }
    pub fn protocols(&self) -> &[ProtocolShare] {
        &self.protocols
    }
    pub fn tab(&self) -> Tab {
        self.tab
    }
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_node
    }
    pub fn selected_node(&self) -> Option<&NetworkNode> {
        self.selected_node.and_then(|i| self.topology.nodes().get(i))
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    pub fn interval(&self) -> Duration {
        self.scheduler.interval()
    }
    pub fn tick_count(&self) -> u64 {
        self.scheduler.tick_count()
    }
    pub fn last_export(&self) -> Option<&PathBuf> {
        self.last_export.as_ref()
    }
    pub fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }

    /// Show `snapshot` instead of the scheduler's current one.
    #[cfg(test)]
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Arc::new(snapshot);
        self
    }
}
