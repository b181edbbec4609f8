use crate::animator::{ExpandCollapseAnimator, SlotPosition, SlotTransform};
use crate::bounds::ClampRange;
use crate::drag::DragController;
use crate::driver::{AnimationDriver, Channel, Timeline};
use crate::geometry::Size;
use crate::orientation::{LayoutChange, Orientation, OrientationService, OrientationWatcher};
use crate::settings::Settings;
use std::time::Duration;
use strum::{EnumCount, IntoEnumIterator};

/// Invoked once per tap on a slot.
pub type Action = Box<dyn FnMut() -> anyhow::Result<()>>;

pub struct ActionSlot<C> {
    pub content: C,
    on_activate: Action,
}

impl<C> ActionSlot<C> {
    pub fn new(content: C, on_activate: impl FnMut() -> anyhow::Result<()> + 'static) -> Self {
        Self {
            content,
            on_activate: Box::new(on_activate),
        }
    }
}

pub type Slots<C> = [Option<ActionSlot<C>>; SlotPosition::COUNT];

/// Something a tap can land on, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Slot(SlotPosition),
    Handle,
    /// Transparent full-surface layer behind the expanded cluster.
    Dismiss,
}

pub struct SlotFrame<'a, C> {
    pub position: SlotPosition,
    pub transform: SlotTransform,
    pub content: &'a C,
}

/// Everything the host needs to draw one frame.
pub struct Frame<'a, C> {
    /// Clamped vertical offset of the handle.
    pub handle_y: f64,
    pub expanded: bool,
    pub dismiss_layer: bool,
    /// Present slots only.
    pub slots: Vec<SlotFrame<'a, C>>,
}

/// The draggable handle with its expandable action cluster.
pub struct QuickControl<C, D = Timeline> {
    settings: Settings,
    driver: D,
    drag: DragController,
    watcher: OrientationWatcher,
    animator: ExpandCollapseAnimator,
    slots: Slots<C>,
    clamp: ClampRange,
    mounted: bool,
}

impl<C, D: AnimationDriver> QuickControl<C, D> {
    pub fn new(settings: Settings, driver: D) -> Self {
        Self {
            animator: ExpandCollapseAnimator::new(settings.duration),
            clamp: ClampRange::compute(
                0.0,
                settings.top_inset,
                Orientation::Portrait,
                &settings.end_points(),
            ),
            settings,
            driver,
            drag: DragController::new(),
            watcher: OrientationWatcher::new(),
            slots: [None, None, None],
            mounted: false,
        }
    }

    pub fn with_slot(mut self, position: SlotPosition, slot: ActionSlot<C>) -> Self {
        self.set_slot(position, Some(slot));
        self
    }

    pub fn set_slot(&mut self, position: SlotPosition, slot: Option<ActionSlot<C>>) {
        self.slots[position.as_index()] = slot;
    }

    pub fn set_slots(&mut self, slots: Slots<C>) {
        self.slots = slots;
    }

    pub fn has_slot(&self, position: SlotPosition) -> bool {
        self.slots[position.as_index()].is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.animator.set_duration(settings.duration);
        self.recompute_bounds();
    }

    pub fn mount(&mut self, service: &mut dyn OrientationService) {
        if self.mounted {
            return;
        }
        self.watcher.mount(service);
        self.mounted = true;
    }

    /// Tears down all interaction state; the next mount starts fresh.
    pub fn unmount(&mut self, service: &mut dyn OrientationService) {
        if !self.mounted {
            return;
        }
        self.watcher.unmount(service);
        self.drag = DragController::new();
        self.driver.set(Channel::OffsetY, 0.0);
        self.animator.reset(&mut self.driver);
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn on_layout(&mut self, size: Size) -> LayoutChange {
        let change = self.watcher.on_layout(size);
        self.recompute_bounds();
        if change.reclassified {
            self.drag.reset_to_origin(&mut self.driver);
        }
        change
    }

    fn recompute_bounds(&mut self) {
        self.clamp = ClampRange::compute(
            self.watcher.screen_height(),
            self.settings.top_inset,
            self.watcher.orientation(),
            &self.settings.end_points(),
        );
    }

    pub fn should_capture(&self, dx: f64, dy: f64) -> bool {
        DragController::should_capture(dx, dy)
    }

    pub fn begin_drag(&mut self) {
        self.drag.begin_drag(&mut self.driver);
    }

    pub fn update_drag(&mut self, dy: f64) {
        self.drag.update_drag(dy, &mut self.driver);
    }

    pub fn end_drag(&mut self) {
        self.drag.end_drag(&mut self.driver);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn toggle(&mut self) -> bool {
        self.animator.toggle(&mut self.driver)
    }

    pub fn is_expanded(&self) -> bool {
        self.animator.is_expanded()
    }

    /// Returns whether the tap did anything.
    pub fn tap(&mut self, target: Target) -> bool {
        match target {
            Target::Handle => {
                self.toggle();
                true
            }
            Target::Dismiss if self.is_expanded() => {
                self.toggle();
                true
            }
            Target::Dismiss => false,
            Target::Slot(position) => self.activate(position),
        }
    }

    /// Runs the slot's callback. A failing callback is logged and leaves the
    /// expand state untouched.
    pub fn activate(&mut self, position: SlotPosition) -> bool {
        let Some(slot) = self.slots[position.as_index()].as_mut() else {
            return false;
        };
        if let Err(e) = (slot.on_activate)() {
            log::error!("Action in {} slot failed: {:#}", position, e);
        }
        true
    }

    /// Steps animations by one frame. Returns whether another frame is needed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.driver.advance(dt)
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    pub fn clamp_range(&self) -> ClampRange {
        self.clamp
    }

    pub fn orientation(&self) -> Orientation {
        self.watcher.orientation()
    }

    pub fn render_position(&self) -> f64 {
        self.drag.render_position(&self.clamp, &self.driver)
    }

    pub fn raw_offset(&self) -> f64 {
        self.drag.raw_offset(&self.driver)
    }

    pub fn frame(&self) -> Frame<'_, C> {
        let slots = SlotPosition::iter()
            .filter_map(|position| {
                self.slots[position.as_index()]
                    .as_ref()
                    .map(|slot| SlotFrame {
                        position,
                        transform: self.animator.transform(position, &self.driver),
                        content: &slot.content,
                    })
            })
            .collect();

        Frame {
            handle_y: self.render_position(),
            expanded: self.is_expanded(),
            dismiss_layer: self.is_expanded(),
            slots,
        }
    }
}
