use crate::sys::wm::MonitorName;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use quickctl_core::Rect;

/// Full-screen transparent overlay; input is narrowed with [`set_input_region`].
pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("quickctl"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(KeyboardMode::None);
}

pub fn get_monitor_by_name(name: &MonitorName) -> Option<gdk::Monitor> {
    let display = gdk::Display::default()?;
    let monitors = display.monitors();
    (0..monitors.n_items()).find_map(|i| {
        monitors
            .item(i)
            .and_then(|item| item.downcast::<gdk::Monitor>().ok())
            .filter(|m| m.connector().is_some_and(|n| n.as_str() == **name))
    })
}

pub fn set_window_monitor(window: &gtk::ApplicationWindow, monitor_name: &MonitorName) {
    if let Some(monitor) = get_monitor_by_name(monitor_name) {
        window.set_monitor(Some(&monitor));
    }
}

/// Pointer events outside `rect` pass through to whatever is underneath.
pub fn set_input_region(window: &gtk::ApplicationWindow, rect: Rect) {
    let Some(surface) = window.surface() else {
        return;
    };
    let region = cairo::Region::create_rectangle(&cairo::RectangleInt::new(
        rect.origin.x.floor() as i32,
        rect.origin.y.floor() as i32,
        rect.size.width.ceil() as i32,
        rect.size.height.ceil() as i32,
    ));
    surface.set_input_region(&region);
}
