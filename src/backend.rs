use core::fmt;

use crate::{DisplayMode, DisplayModeResult, ModeFields};

/// A display adapter or monitor as enumerated by the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDevice {
    /// Opaque device name used for follow-up queries, e.g. `\\.\DISPLAY1`
    pub name: String,
    /// Human-readable description
    pub string: String,
}

/// How a mode change should be submitted to the OS
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ChangeMode {
    /// Apply for the current session only
    #[default]
    Dynamic,
    /// Apply and store in the registry
    Persist,
    /// Only check whether the mode would be accepted
    Test,
}

/// A mode change request: the full target mode plus the fields that were asked for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: DisplayMode,
    pub fields: ModeFields,
    pub change_mode: ChangeMode,
}

/// Result of asking the OS to change a display mode
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    Successful,
    BadDualView,
    BadFlags,
    BadMode,
    BadParam,
    Failed,
    NotUpdated,
    Restart,
    Unknown(i32),
}

impl ChangeOutcome {
    /// Maps a raw `DISP_CHANGE_*` code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ChangeOutcome::Successful,
            1 => ChangeOutcome::Restart,
            -1 => ChangeOutcome::Failed,
            -2 => ChangeOutcome::BadMode,
            -3 => ChangeOutcome::NotUpdated,
            -4 => ChangeOutcome::BadFlags,
            -5 => ChangeOutcome::BadParam,
            -6 => ChangeOutcome::BadDualView,
            other => ChangeOutcome::Unknown(other),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChangeOutcome::Successful)
    }

    /// Human-readable reason for the outcome
    pub fn message(&self) -> &'static str {
        match self {
            ChangeOutcome::Successful => "The settings change was successful",
            ChangeOutcome::BadDualView => {
                "The settings change was unsuccessful because the system is DualView capable"
            }
            ChangeOutcome::BadFlags => "An invalid set of flags was passed in",
            ChangeOutcome::BadMode => "The graphics mode is not supported",
            ChangeOutcome::BadParam => "An invalid parameter was passed in",
            ChangeOutcome::Failed => "The display driver failed the specified graphics mode",
            ChangeOutcome::NotUpdated => "Unable to write settings to the registry",
            ChangeOutcome::Restart => {
                "The computer must be restarted for the graphics mode to work"
            }
            ChangeOutcome::Unknown(_) => "Unknown error",
        }
    }
}

impl fmt::Display for ChangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Request/response access to the OS display subsystem.
///
/// Nothing is cached: every call queries the OS afresh.
pub trait DisplayBackend {
    /// Display devices attached to the desktop, in OS order
    fn displays(&self) -> Box<dyn Iterator<Item = DisplayDevice> + '_>;

    /// Monitors attached to the given display device
    fn monitors<'a>(
        &'a self,
        display: &'a DisplayDevice,
    ) -> Box<dyn Iterator<Item = DisplayDevice> + 'a>;

    /// Every mode entry the OS reports for the display, duplicates included
    fn modes<'a>(
        &'a self,
        display: &'a DisplayDevice,
    ) -> Box<dyn Iterator<Item = DisplayMode> + 'a>;

    /// The mode the display is currently using
    fn current_mode(&self, display: &DisplayDevice) -> Option<DisplayMode>;

    /// Submits a mode change for the display
    fn change_mode(&self, display: &DisplayDevice, change: &ModeChange) -> ChangeOutcome;
}

/// Returns the backend for the platform this binary runs on
#[cfg(windows)]
pub fn system_backend() -> DisplayModeResult<Box<dyn DisplayBackend>> {
    Ok(Box::new(crate::win32::Win32Backend))
}

/// Returns the backend for the platform this binary runs on
#[cfg(not(windows))]
pub fn system_backend() -> DisplayModeResult<Box<dyn DisplayBackend>> {
    Err(crate::DisplayModeError::Unsupported)
}
