//! Filtering and compact re-layout for storage screens drawn by a host UI.
//!
//! The host owns the widgets. Each pass restores whatever the previous pass
//! changed, classifies the sets container's children into storage sets, and
//! packs the visible sets into rows, pairing small sets side by side. Every
//! mutation is recorded against a snapshot so it can be undone on demand.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod restore;
pub mod widget;

pub use classify::{Classification, Classifier, Column, FillState, StorageSet};
pub use config::{
    ConfigError, ConfigKey, ConfigStore, JsonFileStore, MemoryStore, OutlineColor, ScreenProfile,
    ShadingPalette, StorageConfig,
};
pub use engine::{
    EngineConfig, EngineState, FilterControls, HostSignal, PassOutcome, StorageEngine,
};
pub use error::{Result, StorageError};
pub use filter::{FilterState, Persistence};
pub use geometry::{PositionMode, SizeMode, Span};
pub use layout::{DividerPool, LayoutEngine, PackPlan, PassReport, Placement, RowSlot, pack_rows};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, PassMetrics};
pub use restore::{PassLedger, SnapshotRestorer};
pub use widget::{
    DividerSpec, HoverShade, OwnedWidgetRef, SimulatedHost, Slot, WidgetHost, WidgetId, WidgetKind,
};
