use crate::config::{Config, SlotConfig};
use crate::gui::control::{
    BOX_HEIGHT, BOX_RIGHT_OVERHANG, BOX_TOP_OFFSET, BOX_WIDTH, DISMISS_TOP_FRACTION, HANDLE_HEIGHT,
    HANDLE_WIDTH, ICON_SIZE, SLOT_SIZE, SLOT_TOP_FRACTION,
};
use crate::sys::icon::{self, IconName};
use crate::sys::wm;
use gdk_pixbuf::Pixbuf;
use quickctl_core::{
    ActionSlot, Frame, Point, QuickControl, Rect, Size, SlotPosition, SlotTransform, Slots, Target,
    Timeline,
};

#[derive(Clone)]
pub struct SlotContent {
    pub label: String,
    pub pixbuf: Option<Pixbuf>,
    pub runnable: bool,
}

impl SlotContent {
    fn from_config(cfg: &SlotConfig) -> Self {
        let label = cfg
            .label
            .clone()
            .or_else(|| cfg.icon.as_ref().map(|i| i.to_string()))
            .or_else(|| cfg.exec.as_ref().map(|e| e.to_string()))
            .unwrap_or_default();

        Self {
            label,
            pixbuf: cfg.icon.as_ref().and_then(load_icon),
            runnable: cfg.exec.as_ref().is_some_and(|e| e.is_runnable()),
        }
    }

    pub fn is_broken(&self) -> bool {
        !self.runnable
    }
}

fn load_icon(name: &IconName) -> Option<Pixbuf> {
    let path = icon::find_icon_path(name)?;
    match Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true) {
        Ok(pixbuf) => Some(pixbuf),
        Err(e) => {
            log::warn!("Failed to load icon {}: {}", path.display(), e);
            None
        }
    }
}

pub fn build_slots(config: &Config) -> Slots<SlotContent> {
    config.slot_entries().map(|entry| {
        let cfg = entry?;
        let exec = cfg.exec.clone()?;
        Some(ActionSlot::new(SlotContent::from_config(cfg), move || {
            wm::spawn(&exec)?;
            Ok(())
        }))
    })
}

/// Where a slot sits before its transform is applied.
#[derive(Debug, Clone, Copy)]
pub struct SlotPlacement {
    pub position: SlotPosition,
    pub rect: Rect,
    pub transform: SlotTransform,
}

impl SlotPlacement {
    /// Axis-aligned bounds after translate and scale. Rotation is in whole
    /// turns at rest, so it is ignored for hit testing.
    pub fn transformed_rect(&self) -> Rect {
        self.rect
            .translate(self.transform.translate.x, self.transform.translate.y)
            .scale(self.transform.scale)
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub surface: Size,
    /// Drag target: the whole box follows the handle.
    pub handle_box: Rect,
    pub handle: Rect,
    pub slots: Vec<SlotPlacement>,
    pub dismiss: Option<Rect>,
    pub expanded: bool,
}

impl Layout {
    pub fn compute<C>(frame: &Frame<'_, C>, surface: Size, top_inset: f64) -> Self {
        let box_right = surface.width + BOX_RIGHT_OVERHANG;
        let box_y = top_inset + BOX_TOP_OFFSET + frame.handle_y;
        let handle_box = Rect::new(box_right - BOX_WIDTH, box_y, BOX_WIDTH, BOX_HEIGHT);

        let handle = Rect::new(
            box_right - HANDLE_WIDTH,
            box_y + (BOX_HEIGHT - HANDLE_HEIGHT) / 2.0,
            HANDLE_WIDTH,
            HANDLE_HEIGHT,
        );

        let slot_rect = Rect::new(
            box_right - SLOT_SIZE,
            box_y + BOX_HEIGHT * SLOT_TOP_FRACTION,
            SLOT_SIZE,
            SLOT_SIZE,
        );

        let slots = frame
            .slots
            .iter()
            .map(|slot| SlotPlacement {
                position: slot.position,
                rect: slot_rect,
                transform: slot.transform,
            })
            .collect();

        let dismiss = frame.dismiss_layer.then(|| {
            let top = surface.height * DISMISS_TOP_FRACTION;
            Rect::new(0.0, top, surface.width, surface.height - top)
        });

        Self {
            surface,
            handle_box,
            handle,
            slots,
            dismiss,
            expanded: frame.expanded,
        }
    }

    /// Slots draw above the handle, and the whole box above the dismiss layer.
    pub fn hit_test(&self, point: Point) -> Option<Target> {
        let slot = self
            .expanded
            .then(|| {
                self.slots
                    .iter()
                    .rev()
                    .find(|s| s.transformed_rect().contains(point))
            })
            .flatten();

        if let Some(slot) = slot {
            return Some(Target::Slot(slot.position));
        }
        if self.handle.contains(point) {
            return Some(Target::Handle);
        }
        // the box sits above the dismiss layer
        if self.handle_box.contains(point) {
            return None;
        }
        self.dismiss
            .filter(|d| d.contains(point))
            .map(|_| Target::Dismiss)
    }

    pub fn grabs_drag(&self, point: Point) -> bool {
        self.handle_box.contains(point)
    }

    /// Collapsed, only the box takes input so the rest of the screen stays usable.
    pub fn input_region(&self) -> Rect {
        if self.dismiss.is_some() {
            Rect::new(0.0, 0.0, self.surface.width, self.surface.height)
        } else {
            self.handle_box
        }
    }
}

/// One pointer press, from button down to release.
#[derive(Debug, Clone, Copy)]
pub struct Press {
    origin: Point,
    on_box: bool,
    captured: bool,
    moved: bool,
}

impl Press {
    pub fn begin(origin: Point, layout: &Layout) -> Self {
        Self {
            origin,
            on_box: layout.grabs_drag(origin),
            captured: false,
            moved: false,
        }
    }

    /// `dx`/`dy` are cumulative since the press. Returns whether the handle moved.
    pub fn on_move<C>(&mut self, dx: f64, dy: f64, control: &mut QuickControl<C>) -> bool {
        if !self.captured && !self.moved && control.should_capture(dx, dy) {
            if self.on_box {
                control.begin_drag();
                self.captured = true;
            } else {
                self.moved = true;
            }
        }
        if self.captured {
            control.update_drag(dy);
        }
        self.captured
    }

    /// A release that never left the dead zone is a tap at the press origin.
    /// Returns whether anything changed.
    pub fn finish<C>(self, layout: &Layout, control: &mut QuickControl<C>) -> bool {
        if self.captured {
            control.end_drag();
            return true;
        }
        if self.moved {
            return false;
        }
        layout
            .hit_test(self.origin)
            .is_some_and(|target| control.tap(target))
    }
}

pub struct ControlState {
    pub control: QuickControl<SlotContent>,
    pub handle_icon: Option<Pixbuf>,
    pub surface: Size,
}

impl ControlState {
    pub fn from_config(config: &Config) -> Self {
        let mut control = QuickControl::new(config.control, Timeline::default());
        control.set_slots(build_slots(config));

        Self {
            control,
            handle_icon: config.handle.icon.as_ref().and_then(load_icon),
            surface: Size::default(),
        }
    }

    pub fn apply_config(&mut self, config: &Config) {
        icon::clear_cache();
        self.control.set_settings(config.control);
        self.control.set_slots(build_slots(config));
        self.handle_icon = config.handle.icon.as_ref().and_then(load_icon);
    }

    pub fn resize(&mut self, size: Size) {
        self.surface = size;
        if size.width > 0.0 && size.height > 0.0 {
            self.control.on_layout(size);
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::compute(
            &self.control.frame(),
            self.surface,
            self.control.settings().top_inset,
        )
    }
}
