use core::fmt;
use std::collections::BTreeSet;

use log::{debug, info};

use crate::{
    ChangeMode, DisplayBackend, DisplayDevice, DisplayMode, DisplayModeError, DisplayModeResult,
    ModeChange, ModeSpec,
};

/// The unique modes of a display, ready for printing
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ModeListing {
    pub display: String,
    pub monitor: Option<String>,
    pub modes: BTreeSet<DisplayMode>,
}

impl fmt::Display for ModeListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Display:\n\t{}", self.display)?;
        if let Some(monitor) = &self.monitor {
            write!(f, " - {}", monitor)?;
        }
        writeln!(f, "\n\nAvailable modes:")?;
        for mode in &self.modes {
            writeln!(f, "\t{}", mode)?;
        }
        Ok(())
    }
}

/// Lists and changes display modes through a `DisplayBackend`
pub struct ModeController<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: DisplayBackend + ?Sized> ModeController<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Finds the desktop-attached display with the given zero-based index
    pub fn find_display(&self, index: usize) -> DisplayModeResult<DisplayDevice> {
        self.backend
            .displays()
            .nth(index)
            .ok_or(DisplayModeError::DisplayNotFound(index))
    }

    /// Finds a monitor attached to `display`; only used for descriptions
    pub fn find_monitor(&self, display: &DisplayDevice, index: usize) -> Option<DisplayDevice> {
        self.backend.monitors(display).nth(index)
    }

    pub fn list_modes(&self, index: usize) -> DisplayModeResult<ModeListing> {
        let display = self.find_display(index)?;
        let monitor = self.find_monitor(&display, 0);
        if monitor.is_none() {
            debug!("No monitor found for {}", display.name);
        }

        let modes: BTreeSet<DisplayMode> = self.backend.modes(&display).collect();
        debug!("{} reports {} unique modes", display.name, modes.len());

        Ok(ModeListing {
            display: display.string,
            monitor: monitor.map(|monitor| monitor.string),
            modes,
        })
    }

    /// Applies `mode` to the display and returns the mode that was requested from the OS.
    ///
    /// Fields missing from `mode` keep the display's current values.
    pub fn set_mode(
        &self,
        index: usize,
        mode: &str,
        change_mode: ChangeMode,
    ) -> DisplayModeResult<DisplayMode> {
        let display = self.find_display(index)?;
        let current = self
            .backend
            .current_mode(&display)
            .ok_or_else(|| DisplayModeError::QueryFailed(display.name.clone()))?;

        let spec: ModeSpec = mode.parse().map_err(|source| DisplayModeError::InvalidModeString {
            mode: mode.to_string(),
            source,
        })?;

        let change = ModeChange {
            mode: spec.apply_to(current),
            fields: spec.fields(),
            change_mode,
        };
        debug!("{}: {} -> {}", display.name, current, change.mode);

        let outcome = self.backend.change_mode(&display, &change);
        if !outcome.is_success() {
            return Err(DisplayModeError::ModeChangeFailed(outcome));
        }

        info!("{} now at {}", display.name, change.mode);
        Ok(change.mode)
    }
}
