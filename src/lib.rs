//! List and change display modes on Windows.
//!
//! This library wraps the `winuser.h` calls for enumerating display devices and their modes
//! (`EnumDisplayDevices`, `EnumDisplaySettings`) and for switching modes
//! (`ChangeDisplaySettingsEx`). The OS is reached through the [`DisplayBackend`] trait, so the
//! mode logic also runs against other backends.

mod backend;
pub mod cli;
mod controller;
mod error;
mod types;
#[cfg(windows)]
mod win32;

pub use backend::*;
pub use controller::*;
pub use error::*;
pub use types::*;
#[cfg(windows)]
pub use win32::Win32Backend;
