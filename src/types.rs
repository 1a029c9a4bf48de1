use core::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

/// Contains the resolution of a display
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Color depth in bits per pixel
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct ColorDepth(pub u32);

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Refresh rate in Hz
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct RefreshRate(pub u32);

impl fmt::Display for RefreshRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A display mode as reported by the OS.
///
/// Field order matters: the derived ordering sorts by width, height, color depth and then
/// refresh rate.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DisplayMode {
    #[serde(flatten)]
    pub resolution: Resolution,
    pub color_depth: ColorDepth,
    pub refresh_rate: RefreshRate,
}

impl DisplayMode {
    pub fn new(width: u32, height: u32, color_depth: u32, refresh_rate: u32) -> Self {
        Self {
            resolution: Resolution::new(width, height),
            color_depth: ColorDepth(color_depth),
            refresh_rate: RefreshRate(refresh_rate),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.resolution, self.color_depth, self.refresh_rate)
    }
}

/// Which fields of a display mode are explicitly requested in a mode change
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ModeFields {
    pub resolution: bool,
    pub color_depth: bool,
    pub refresh_rate: bool,
}

/// Errors that occur while parsing a mode string
#[derive(Error, Debug)]
pub enum ParseModeError {
    #[error("Expected <width>x<height>[x<depth>][@<refresh>] or @<refresh>")]
    Malformed,
    #[error("Number out of range")]
    IntError(#[from] std::num::ParseIntError),
}

/// A partial display mode supplied by the user.
///
/// Accepted forms (case-insensitive): `1920x1080`, `1920x1080x32`, `1920x1080@60`,
/// `1920x1080x32@60` and `@144`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ModeSpec {
    pub resolution: Option<Resolution>,
    pub color_depth: Option<ColorDepth>,
    pub refresh_rate: Option<RefreshRate>,
}

impl ModeSpec {
    /// Returns the fields this spec sets
    pub fn fields(&self) -> ModeFields {
        ModeFields {
            resolution: self.resolution.is_some(),
            color_depth: self.color_depth.is_some(),
            refresh_rate: self.refresh_rate.is_some(),
        }
    }

    /// Overlays the given fields onto `base`, keeping the rest untouched
    pub fn apply_to(&self, base: DisplayMode) -> DisplayMode {
        DisplayMode {
            resolution: self.resolution.unwrap_or(base.resolution),
            color_depth: self.color_depth.unwrap_or(base.color_depth),
            refresh_rate: self.refresh_rate.unwrap_or(base.refresh_rate),
        }
    }
}

fn full_mode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(r"^([0-9]+)x([0-9]+)(?:x([0-9]+))?(?:@([0-9]+))?$")
            .case_insensitive(true)
            .build()
            .expect("full mode pattern compiles")
    })
}

fn refresh_only_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^@([0-9]+)$").expect("refresh pattern compiles"))
}

fn group(captures: &Captures, index: usize) -> Result<Option<u32>, ParseModeError> {
    captures
        .get(index)
        .map(|m| m.as_str().parse())
        .transpose()
        .map_err(ParseModeError::from)
}

impl FromStr for ModeSpec {
    type Err = ParseModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(captures) = full_mode_pattern().captures(s) {
            let width = group(&captures, 1)?.ok_or(ParseModeError::Malformed)?;
            let height = group(&captures, 2)?.ok_or(ParseModeError::Malformed)?;
            return Ok(ModeSpec {
                resolution: Some(Resolution::new(width, height)),
                color_depth: group(&captures, 3)?.map(ColorDepth),
                refresh_rate: group(&captures, 4)?.map(RefreshRate),
            });
        }

        if let Some(captures) = refresh_only_pattern().captures(s) {
            return Ok(ModeSpec {
                refresh_rate: group(&captures, 1)?.map(RefreshRate),
                ..ModeSpec::default()
            });
        }

        Err(ParseModeError::Malformed)
    }
}
