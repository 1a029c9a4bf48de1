use log::{debug, warn};
use winsafe::prelude::*;
use winsafe::{co, EnumDisplayDevices, GmidxEnum, DEVMODE, DISPLAY_DEVICE};

use crate::{
    ChangeMode, ChangeOutcome, ColorDepth, DisplayBackend, DisplayDevice, DisplayMode, ModeChange,
    RefreshRate, Resolution,
};

/// `DisplayBackend` over the `winuser.h` display settings API
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Backend;

impl Win32Backend {
    /// Fetch the settings the display is currently using
    fn current_devmode(&self, display: &DisplayDevice) -> Option<DEVMODE> {
        let mut devmode = DEVMODE::default();
        match winsafe::EnumDisplaySettings(
            Some(display.name.as_str()),
            GmidxEnum::Enum(co::ENUM_SETTINGS::CURRENT),
            &mut devmode,
        ) {
            Ok(()) => Some(devmode),
            Err(err) => {
                warn!("EnumDisplaySettings failed for {}: {}", display.name, err);
                None
            }
        }
    }
}

impl DisplayDevice {
    /// Create a display device from a winsafe display
    fn from_winsafe(device: &DISPLAY_DEVICE) -> Self {
        DisplayDevice {
            name: device.DeviceName(),
            string: device.DeviceString(),
        }
    }
}

impl DisplayBackend for Win32Backend {
    fn displays(&self) -> Box<dyn Iterator<Item = DisplayDevice> + '_> {
        // The winsafe iterator reuses one buffer, so copy each entry out before pulling the next.
        Box::new(
            EnumDisplayDevices(None, None)
                .filter_map(|result| result.ok())
                .filter(|device| {
                    device
                        .StateFlags
                        .has(co::DISPLAY_DEVICE::ATTACHED_TO_DESKTOP)
                })
                .map(DisplayDevice::from_winsafe),
        )
    }

    fn monitors<'a>(
        &'a self,
        display: &'a DisplayDevice,
    ) -> Box<dyn Iterator<Item = DisplayDevice> + 'a> {
        Box::new(
            EnumDisplayDevices(Some(display.name.as_str()), None)
                .filter_map(|result| result.ok())
                .map(DisplayDevice::from_winsafe),
        )
    }

    fn modes<'a>(
        &'a self,
        display: &'a DisplayDevice,
    ) -> Box<dyn Iterator<Item = DisplayMode> + 'a> {
        let name = display.name.as_str();
        Box::new((0..).map_while(move |index| {
            let mut devmode = DEVMODE::default();
            winsafe::EnumDisplaySettings(Some(name), GmidxEnum::Gmidx(index), &mut devmode)
                .ok()?;
            Some(devmode.display_mode())
        }))
    }

    fn current_mode(&self, display: &DisplayDevice) -> Option<DisplayMode> {
        self.current_devmode(display)
            .map(|devmode| devmode.display_mode())
    }

    fn change_mode(&self, display: &DisplayDevice, change: &ModeChange) -> ChangeOutcome {
        // Start from the current settings so position, flags and unrequested fields stay put.
        let mut devmode = self.current_devmode(display).unwrap_or_default();
        devmode.apply_mode_change(change);

        let flags = match change.change_mode {
            ChangeMode::Dynamic => co::CDS::DYNAMICALLY,
            ChangeMode::Persist => co::CDS::UPDATEREGISTRY,
            ChangeMode::Test => co::CDS::TEST,
        };

        debug!(
            "ChangeDisplaySettingsEx({}, {}, {:?})",
            display.name, change.mode, change.fields
        );
        let name = Some(display.name.as_str());
        let code = match winsafe::ChangeDisplaySettingsEx(name, Some(&mut devmode), flags) {
            Ok(code) | Err(code) => code,
        };
        ChangeOutcome::from_code(code.raw())
    }
}

/// Provides methods to read and write display modes on `winsafe::DEVMODE`
trait DevModeExt {
    fn display_mode(&self) -> DisplayMode;
    fn set_resolution(&mut self, resolution: Resolution);
    fn set_color_depth(&mut self, color_depth: ColorDepth);
    fn set_refresh_rate(&mut self, refresh_rate: RefreshRate);

    /// Writes the requested fields of a mode change, adding their flags to the existing ones
    fn apply_mode_change(&mut self, change: &ModeChange) {
        if change.fields.resolution {
            self.set_resolution(change.mode.resolution);
        }
        if change.fields.color_depth {
            self.set_color_depth(change.mode.color_depth);
        }
        if change.fields.refresh_rate {
            self.set_refresh_rate(change.mode.refresh_rate);
        }
    }
}

impl DevModeExt for DEVMODE {
    fn display_mode(&self) -> DisplayMode {
        DisplayMode::new(
            self.dmPelsWidth,
            self.dmPelsHeight,
            self.dmBitsPerPel,
            self.dmDisplayFrequency,
        )
    }

    fn set_resolution(&mut self, resolution: Resolution) {
        self.dmPelsWidth = resolution.width;
        self.dmPelsHeight = resolution.height;
        self.dmFields |= co::DM::PELSWIDTH | co::DM::PELSHEIGHT;
    }

    fn set_color_depth(&mut self, color_depth: ColorDepth) {
        self.dmBitsPerPel = color_depth.0;
        self.dmFields |= co::DM::BITSPERPEL;
    }

    fn set_refresh_rate(&mut self, refresh_rate: RefreshRate) {
        self.dmDisplayFrequency = refresh_rate.0;
        self.dmFields |= co::DM::DISPLAYFREQUENCY;
    }
}
