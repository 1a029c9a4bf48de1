use std::cell::RefCell;

use windisplaymode::{ChangeOutcome, DisplayBackend, DisplayDevice, DisplayMode, ModeChange};

/// A display known to `FakeBackend`
pub struct FakeDisplay {
    pub device: DisplayDevice,
    pub monitors: Vec<DisplayDevice>,
    pub modes: Vec<DisplayMode>,
    pub current: Option<DisplayMode>,
}

impl FakeDisplay {
    pub fn new(index: usize, current: DisplayMode) -> Self {
        FakeDisplay {
            device: device(&format!("\\\\.\\DISPLAY{}", index + 1), "Generic Adapter"),
            monitors: vec![device(
                &format!("\\\\.\\DISPLAY{}\\Monitor0", index + 1),
                "Generic Monitor",
            )],
            modes: vec![current],
            current: Some(current),
        }
    }
}

pub fn device(name: &str, string: &str) -> DisplayDevice {
    DisplayDevice {
        name: name.to_string(),
        string: string.to_string(),
    }
}

/// In-memory display subsystem that records every mode change it receives
pub struct FakeBackend {
    pub displays: Vec<FakeDisplay>,
    pub outcome: ChangeOutcome,
    pub changes: RefCell<Vec<(String, ModeChange)>>,
}

impl FakeBackend {
    pub fn new(displays: Vec<FakeDisplay>) -> Self {
        FakeBackend {
            displays,
            outcome: ChangeOutcome::Successful,
            changes: RefCell::new(Vec::new()),
        }
    }

    fn display(&self, device: &DisplayDevice) -> Option<&FakeDisplay> {
        self.displays.iter().find(|display| display.device == *device)
    }
}

impl DisplayBackend for FakeBackend {
    fn displays(&self) -> Box<dyn Iterator<Item = DisplayDevice> + '_> {
        Box::new(self.displays.iter().map(|display| display.device.clone()))
    }

    fn monitors<'a>(
        &'a self,
        display: &'a DisplayDevice,
    ) -> Box<dyn Iterator<Item = DisplayDevice> + 'a> {
        Box::new(
            self.display(display)
                .into_iter()
                .flat_map(|display| display.monitors.iter().cloned()),
        )
    }

    fn modes<'a>(
        &'a self,
        display: &'a DisplayDevice,
    ) -> Box<dyn Iterator<Item = DisplayMode> + 'a> {
        Box::new(
            self.display(display)
                .into_iter()
                .flat_map(|display| display.modes.iter().copied()),
        )
    }

    fn current_mode(&self, display: &DisplayDevice) -> Option<DisplayMode> {
        self.display(display).and_then(|display| display.current)
    }

    fn change_mode(&self, display: &DisplayDevice, change: &ModeChange) -> ChangeOutcome {
        self.changes.borrow_mut().push((display.name.clone(), *change));
        self.outcome
    }
}
