pub mod model;
pub mod view;

pub use model::{ControlState, Layout, Press, SlotContent, SlotPlacement};
pub use view::draw;

// Reference sizes in logical pixels.
pub const BOX_WIDTH: f64 = 80.0;
pub const BOX_HEIGHT: f64 = 120.0;
pub const BOX_TOP_OFFSET: f64 = 40.0; // below the top inset
pub const BOX_RIGHT_OVERHANG: f64 = 1.0;
pub const HANDLE_WIDTH: f64 = 25.0;
pub const HANDLE_HEIGHT: f64 = 50.0;
pub const SLOT_SIZE: f64 = 36.0;
pub const SLOT_TOP_FRACTION: f64 = 0.35; // of BOX_HEIGHT
pub const DISMISS_TOP_FRACTION: f64 = 0.05;
pub const ICON_SIZE: i32 = 128;
pub const ICON_FILL: f64 = 0.75;
