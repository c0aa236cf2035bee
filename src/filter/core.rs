use serde::{Deserialize, Serialize};

use crate::classify::FillState;
use crate::config::{ConfigError, ConfigStore};

/// When the visibility flags are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Persistence {
    /// Reset to all-visible whenever the screen closes.
    Never,
    /// Kept in memory for the life of the process.
    #[default]
    WithinSession,
    /// Loaded from the durable store at start, written back on every toggle.
    AcrossSessions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    show_empty: bool,
    show_partial: bool,
    show_full: bool,
    persistence: Persistence,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(Persistence::default())
    }
}

impl FilterState {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            show_empty: true,
            show_partial: true,
            show_full: true,
            persistence,
        }
    }

    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    pub fn shows(&self, fill: FillState) -> bool {
        match fill {
            FillState::Empty => self.show_empty,
            FillState::Partial => self.show_partial,
            FillState::Full => self.show_full,
        }
    }

    fn flag_mut(&mut self, fill: FillState) -> &mut bool {
        match fill {
            FillState::Empty => &mut self.show_empty,
            FillState::Partial => &mut self.show_partial,
            FillState::Full => &mut self.show_full,
        }
    }

    pub fn show_all(&mut self) {
        self.show_empty = true;
        self.show_partial = true;
        self.show_full = true;
    }

    /// Flips one flag and returns its new value.
    ///
    /// The in-memory flag changes even if writing it back fails.
    pub fn toggle(
        &mut self,
        fill: FillState,
        store: &mut dyn ConfigStore,
    ) -> Result<bool, ConfigError> {
        let flag = self.flag_mut(fill);
        *flag = !*flag;
        let shown = *flag;
        if self.persistence == Persistence::AcrossSessions {
            store.set_visibility(fill, shown)?;
        }
        Ok(shown)
    }

    /// Pulls stored flags when they outlive the process; flags the store
    /// has never seen keep their in-memory value.
    pub fn on_load(&mut self, store: &dyn ConfigStore) {
        if self.persistence != Persistence::AcrossSessions {
            return;
        }
        for fill in FillState::ALL {
            if let Some(shown) = store.visibility(fill) {
                *self.flag_mut(fill) = shown;
            }
        }
    }

    /// Returns true when the flags were reset.
    pub fn on_container_closed(&mut self) -> bool {
        if self.persistence == Persistence::Never {
            self.show_all();
            return true;
        }
        false
    }

    /// Switching to `Never` resets the flags straight away.
    pub fn set_persistence(&mut self, persistence: Persistence) {
        self.persistence = persistence;
        if persistence == Persistence::Never {
            self.show_all();
        }
    }
}
