use quickctl_core::OrientationService;

/// Desktop compositors rotate outputs themselves and expose no orientation lock,
/// so the lifecycle calls are only recorded.
#[derive(Debug, Default)]
pub struct DesktopOrientation {
    unlocked: bool,
}

impl DesktopOrientation {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

impl OrientationService for DesktopOrientation {
    fn unlock_all(&mut self) {
        self.unlocked = true;
        log::debug!("Orientation unlocked");
    }

    fn remove_all_listeners(&mut self) {
        self.unlocked = false;
        log::debug!("Orientation listeners removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickctl_core::{QuickControl, Size, Timeline};

    #[test]
    fn mount_cycle_toggles_unlock() {
        let mut service = DesktopOrientation::default();
        let mut control: QuickControl<()> =
            QuickControl::new(Default::default(), Timeline::default());
        assert!(!service.is_unlocked());

        control.mount(&mut service);
        assert!(service.is_unlocked());
        control.on_layout(Size::new(600.0, 1000.0));

        control.unmount(&mut service);
        assert!(!service.is_unlocked());
    }
}
