//! Pass orchestration.
//!
//! A pass runs restore, classify and layout back to back on the host's UI
//! thread. [`StorageEngine`] holds the read-only configuration; everything that
//! survives between host signals lives in an explicit [`EngineState`].

use serde_json::{Value, json};

use crate::classify::{Classifier, FillState};
use crate::config::{ConfigKey, ConfigStore, ScreenProfile, ShadingPalette, StorageConfig};
use crate::error::{Result, StorageError};
use crate::filter::{FilterState, Persistence};
use crate::layout::{DividerPool, LayoutEngine, PassReport};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::PassMetrics;
use crate::restore::{PassLedger, SnapshotRestorer};
use crate::widget::WidgetHost;

pub mod controls;

pub use controls::FilterControls;

const PASS_TARGET: &str = "storage::engine.pass";
const FILTERS_TARGET: &str = "storage::engine.filters";
const CONTROLS_TARGET: &str = "storage::engine.controls";
const METRICS_TARGET: &str = "storage::engine.metrics";

/// Configuration knobs for the engine.
#[derive(Clone, Default)]
pub struct EngineConfig {
    pub storage: StorageConfig,
    pub profile: ScreenProfile,
    /// Optional structured logger used by the engine.
    pub logger: Option<Logger>,
}

/// Host events the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    ContainerOpened,
    /// The host has torn down the screen's widgets.
    ContainerClosed,
    InventoryChanged,
    /// Sent after the host has handed the engine the updated config.
    ConfigChanged(ConfigKey),
}

#[derive(Debug)]
pub enum PassOutcome {
    Applied(PassReport),
    /// Preconditions failed; the screen was left as the host drew it.
    Skipped(StorageError),
    /// The signal does not call for a pass.
    Idle,
}

impl PassOutcome {
    pub fn report(&self) -> Option<&PassReport> {
        match self {
            Self::Applied(report) => Some(report),
            _ => None,
        }
    }
}

/// State carried from one host signal to the next.
#[derive(Debug)]
pub struct EngineState<W> {
    filters: FilterState,
    ledger: Option<PassLedger<W>>,
    dividers: DividerPool<W>,
    original_scroll: Option<i32>,
    controls: Option<FilterControls<W>>,
    chrome_grown: bool,
    metrics: PassMetrics,
}

impl<W: Copy + PartialEq> EngineState<W> {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            filters: FilterState::new(persistence),
            ledger: None,
            dividers: DividerPool::default(),
            original_scroll: None,
            controls: None,
            chrome_grown: false,
            metrics: PassMetrics::new(),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn metrics(&self) -> &PassMetrics {
        &self.metrics
    }

    pub fn controls(&self) -> Option<&FilterControls<W>> {
        self.controls.as_ref()
    }

    /// True while a pass's mutations are live on the host.
    pub fn has_live_pass(&self) -> bool {
        self.ledger.is_some()
    }

    /// Drops per-pass bookkeeping for a screen that stays open. Dividers and
    /// controls are kept: the host still owns them and a restart reuses them.
    fn release_screen(&mut self) {
        self.ledger = None;
        self.original_scroll = None;
        self.chrome_grown = false;
    }

    fn forget_screen(&mut self) {
        self.ledger = None;
        self.dividers.forget();
        self.original_scroll = None;
        self.controls = None;
        self.chrome_grown = false;
    }
}

pub struct StorageEngine {
    config: EngineConfig,
}

impl StorageEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the user options. Follow with a `ConfigChanged` signal.
    pub fn set_storage_config(&mut self, storage: StorageConfig) {
        self.config.storage = storage;
    }

    pub fn new_state<W: Copy + PartialEq>(&self) -> EngineState<W> {
        EngineState::new(self.config.storage.preserve_filters)
    }

    /// Loads persisted flags and lays out the screen if it is already open.
    pub fn start<H>(
        &self,
        host: &mut H,
        state: &mut EngineState<H::Handle>,
        store: &dyn ConfigStore,
    ) -> PassOutcome
    where
        H: WidgetHost,
    {
        state.filters.on_load(store);
        self.emit(
            LogLevel::Debug,
            FILTERS_TARGET,
            "filters_loaded",
            self.filter_fields(&state.filters),
        );
        self.open(host, state)
    }

    /// Undoes the live pass and hides the engine's controls.
    ///
    /// On a screen that is still open the hidden dividers and controls stay
    /// in `state`, so a later `start` with the same state reuses them.
    pub fn shutdown<H>(&self, host: &mut H, state: &mut EngineState<H::Handle>)
    where
        H: WidgetHost,
    {
        match self.check_screen(host) {
            Ok(container) => {
                let ledger = state.ledger.take();
                SnapshotRestorer::new(&self.config.profile).restore(
                    host,
                    container,
                    ledger.as_ref(),
                    &mut state.dividers,
                    state.original_scroll,
                );
                if let Some(controls) = &state.controls {
                    controls.set_visible(host, false);
                }
                if state.chrome_grown {
                    host.adjust_chrome_height(-self.config.profile.controls_height);
                }
                state.release_screen();
            }
            Err(_) => state.forget_screen(),
        }
        self.log_metrics(state);
    }

    pub fn handle_signal<H>(
        &self,
        host: &mut H,
        state: &mut EngineState<H::Handle>,
        signal: HostSignal,
    ) -> PassOutcome
    where
        H: WidgetHost,
    {
        match signal {
            HostSignal::ContainerOpened => self.open(host, state),
            HostSignal::ContainerClosed => {
                state.forget_screen();
                if state.filters.on_container_closed() {
                    self.emit(LogLevel::Debug, FILTERS_TARGET, "filters_reset", [
                        json_kv("cause", "container_closed"),
                    ]);
                }
                PassOutcome::Idle
            }
            HostSignal::InventoryChanged => self.run_pass(host, state),
            HostSignal::ConfigChanged(key) => {
                if key == ConfigKey::PreserveFilters {
                    state
                        .filters
                        .set_persistence(self.config.storage.preserve_filters);
                    if let Some(controls) = &state.controls {
                        controls.sync(host, &state.filters);
                    }
                }
                if key.affects_layout() {
                    self.run_pass(host, state)
                } else {
                    PassOutcome::Idle
                }
            }
        }
    }

    /// Flips one visibility flag and re-lays out the screen.
    ///
    /// A failed durable write is reported after the re-layout; the in-memory
    /// flag keeps its new value either way.
    pub fn toggle<H>(
        &self,
        host: &mut H,
        state: &mut EngineState<H::Handle>,
        store: &mut dyn ConfigStore,
        fill: FillState,
    ) -> Result<PassOutcome>
    where
        H: WidgetHost,
    {
        let persisted = state.filters.toggle(fill, store);
        state.metrics.record_toggle();
        let shown = state.filters.shows(fill);
        if let Some(controls) = &state.controls {
            host.set_filter_control_checked(controls.handle(fill), shown);
        }
        self.emit(LogLevel::Debug, FILTERS_TARGET, "filter_toggled", [
            json_kv("fill", format!("{fill:?}")),
            json_kv("shown", shown),
        ]);

        let outcome = self.run_pass(host, state);
        persisted?;
        Ok(outcome)
    }

    /// Runs one pass, converting precondition failures into a skip.
    pub fn run_pass<H>(&self, host: &mut H, state: &mut EngineState<H::Handle>) -> PassOutcome
    where
        H: WidgetHost,
    {
        match self.try_pass(host, state) {
            Ok(report) => {
                state
                    .metrics
                    .record_pass(report.visible, report.hidden, report.rows);
                self.emit(LogLevel::Info, PASS_TARGET, "pass_applied", [
                    json_kv("visible", report.visible),
                    json_kv("hidden", report.hidden),
                    json_kv("rows", report.rows),
                    json_kv("content_height", report.content_height),
                ]);
                PassOutcome::Applied(report)
            }
            Err(err) => {
                state.metrics.record_skip();
                let level = match err {
                    StorageError::MalformedSet { .. } => LogLevel::Warn,
                    _ if err.skips_pass() => LogLevel::Debug,
                    _ => LogLevel::Error,
                };
                self.emit(level, PASS_TARGET, "pass_skipped", [json_kv(
                    "reason",
                    err.to_string(),
                )]);
                PassOutcome::Skipped(err)
            }
        }
    }

    pub fn log_metrics<W>(&self, state: &EngineState<W>) {
        if let Some(logger) = &self.config.logger {
            let _ = logger.log_event(state.metrics.snapshot().to_log_event(METRICS_TARGET));
        }
    }

    fn open<H>(&self, host: &mut H, state: &mut EngineState<H::Handle>) -> PassOutcome
    where
        H: WidgetHost,
    {
        let outcome = self.run_pass(host, state);
        if outcome.report().is_none() {
            return outcome;
        }

        // controls go in only after the pass, so they never show stale flags
        if !state.chrome_grown {
            host.adjust_chrome_height(self.config.profile.controls_height);
            state.chrome_grown = true;
        }
        match &state.controls {
            Some(controls) => {
                controls.set_visible(host, true);
                controls.sync(host, &state.filters);
            }
            None => {
                state.controls = Some(FilterControls::install(host, &state.filters));
                self.emit(
                    LogLevel::Debug,
                    CONTROLS_TARGET,
                    "controls_installed",
                    self.filter_fields(&state.filters),
                );
            }
        }
        outcome
    }

    fn try_pass<H>(&self, host: &mut H, state: &mut EngineState<H::Handle>) -> Result<PassReport>
    where
        H: WidgetHost,
    {
        let container = self.check_screen(host)?;
        let profile = &self.config.profile;

        let original_scroll = *state
            .original_scroll
            .get_or_insert_with(|| host.scroll_height(container));
        let previous = state.ledger.take();
        SnapshotRestorer::new(profile).restore(
            host,
            container,
            previous.as_ref(),
            &mut state.dividers,
            Some(original_scroll),
        );

        let children: Vec<_> = host
            .children(container)
            .into_iter()
            .filter(|child| !state.dividers.contains(child))
            .collect();
        let mut classification = Classifier::new(profile).classify(host, &children)?;
        classification.park_junk(host, profile.junk_parked_x);

        let palette = ShadingPalette::from_config(&self.config.storage);
        let report = LayoutEngine::new(profile, palette).layout(
            host,
            container,
            &mut classification.sets,
            &state.filters,
            &mut state.dividers,
        );
        state.ledger = Some(PassLedger::from(&classification));
        Ok(report)
    }

    fn check_screen<H>(&self, host: &H) -> Result<H::Handle>
    where
        H: WidgetHost,
    {
        let container = host
            .sets_container()
            .ok_or(StorageError::ContainerMissing)?;
        let title = host.title_text().ok_or(StorageError::TitleMissing)?;
        if !self.config.profile.recognizes(&title) {
            return Err(StorageError::UnrecognizedTitle(title));
        }
        Ok(container)
    }

    fn filter_fields(&self, filters: &FilterState) -> Vec<(String, Value)> {
        vec![
            json_kv("show_empty", filters.shows(FillState::Empty)),
            json_kv("show_partial", filters.shows(FillState::Partial)),
            json_kv("show_full", filters.shows(FillState::Full)),
            json_kv("persistence", json!(format!("{:?}", filters.persistence()))),
        ]
    }

    fn emit(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = &self.config.logger {
            let _ = logger.log_event(event_with_fields(level, target, message, fields));
        }
    }
}
