use crate::geometry::Size;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Square layouts count as portrait.
    pub fn classify(size: Size) -> Self {
        if size.width > size.height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Platform orientation-lock service. Calls are fire-and-forget.
pub trait OrientationService {
    fn unlock_all(&mut self);
    fn remove_all_listeners(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOrientation;

impl OrientationService for NoopOrientation {
    fn unlock_all(&mut self) {}
    fn remove_all_listeners(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutChange {
    pub orientation: Orientation,
    /// First measurement, or the orientation flipped.
    pub reclassified: bool,
}

#[derive(Debug, Default)]
pub struct OrientationWatcher {
    orientation: Option<Orientation>,
    size: Size,
}

impl OrientationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, service: &mut dyn OrientationService) {
        service.unlock_all();
    }

    pub fn unmount(&mut self, service: &mut dyn OrientationService) {
        service.remove_all_listeners();
        self.orientation = None;
        self.size = Size::default();
    }

    pub fn on_layout(&mut self, size: Size) -> LayoutChange {
        let orientation = Orientation::classify(size);
        let reclassified = self.orientation != Some(orientation);

        if reclassified {
            log::debug!(
                "Layout {}x{} reclassified as {}",
                size.width,
                size.height,
                orientation
            );
        }

        self.size = size;
        self.orientation = Some(orientation);

        LayoutChange {
            orientation,
            reclassified,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    pub fn screen_height(&self) -> f64 {
        self.size.height
    }

    pub fn is_measured(&self) -> bool {
        self.orientation.is_some()
    }
}
