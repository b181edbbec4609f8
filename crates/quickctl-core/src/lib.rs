//! Interaction and animation engine for a floating quick control: a vertically
//! draggable handle that expands into up to three action slots.

pub mod animator;
pub mod bounds;
pub mod control;
pub mod drag;
pub mod driver;
pub mod geometry;
pub mod orientation;
pub mod settings;

pub use animator::{ExpandCollapseAnimator, SlotPosition, SlotTransform};
pub use bounds::{ClampRange, EndPoints};
pub use control::{ActionSlot, Frame, QuickControl, SlotFrame, Slots, Target};
pub use drag::DragController;
pub use driver::{AnimationDriver, Channel, Easing, SpringSpec, Timeline};
pub use geometry::{Point, Rect, Size};
pub use orientation::{NoopOrientation, Orientation, OrientationService, OrientationWatcher};
pub use settings::Settings;
