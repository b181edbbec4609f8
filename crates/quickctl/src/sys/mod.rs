pub mod icon;
pub mod orientation;
pub mod runtime;
pub mod server;
pub mod wm;
