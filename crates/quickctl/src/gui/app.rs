use crate::config;
use crate::events::AppEvent;
use crate::gui::control::{self, ControlState, Press};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::sys::orientation::DesktopOrientation;
use crate::sys::wm;
use gtk::prelude::*;
use gtk4 as gtk;
use quickctl_core::{Point, Size};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Longest step fed to the animations; a stalled clock must not fast-forward them.
const MAX_FRAME_MICROS: i64 = 50_000;

/// Time since the previous frame in clock microseconds. The first frame after
/// attaching steps by zero.
fn frame_delta(last: Option<i64>, now: i64) -> Duration {
    let elapsed = last.map_or(0, |last| now - last);
    Duration::from_micros(elapsed.clamp(0, MAX_FRAME_MICROS) as u64)
}

pub struct AppModel {
    pub state: Rc<RefCell<ControlState>>,
    pub visible: bool,
    pub orientation: DesktopOrientation,
    pub press: Option<Press>,
    /// Set while the frame clock drives the timeline.
    pub tick: Rc<RefCell<Option<gtk::TickCallbackId>>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Resize(Size),
    PressBegin(Point),
    PressMove(f64, f64),
    PressEnd,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (ControlState, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Quick Control"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "quickctl-window",
            set_decorated: false,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "quickctl-surface",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(Size::new(width as f64, height as f64)));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::PressBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |_, dx, dy| {
                        sender.input(AppMsg::PressMove(dx, dy));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::PressEnd);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            visible: false,
            orientation: DesktopOrientation::default(),
            press: None,
            tick: Rc::new(RefCell::new(None)),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = control::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);
        sender.input(AppMsg::Show);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                if let Some(name) = wm::get_active_monitor() {
                    window::set_window_monitor(&self.root, &name);
                }
                self.visible = true;

                let size = Size::new(
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                {
                    let mut state = self.state.borrow_mut();
                    state.control.mount(&mut self.orientation);
                    state.resize(size);
                }
                self.refresh();
            }
            AppMsg::Hide => {
                self.press = None;
                self.stop_ticking();
                self.state
                    .borrow_mut()
                    .control
                    .unmount(&mut self.orientation);
                self.visible = false;
            }
            AppMsg::Resize(size) => {
                self.state.borrow_mut().resize(size);
                self.refresh();
            }
            AppMsg::PressBegin(point) => {
                if !self.visible {
                    return;
                }
                self.press = Some(Press::begin(point, &self.state.borrow().layout()));
            }
            AppMsg::PressMove(dx, dy) => {
                let Some(press) = self.press.as_mut() else {
                    return;
                };
                if press.on_move(dx, dy, &mut self.state.borrow_mut().control) {
                    self.refresh();
                }
            }
            AppMsg::PressEnd => {
                let Some(press) = self.press.take() else {
                    return;
                };
                let changed = {
                    let mut state = self.state.borrow_mut();
                    let layout = state.layout();
                    press.finish(&layout, &mut state.control)
                };
                if changed {
                    self.refresh();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().apply_config(&new_config);
                    self.refresh();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn refresh(&self) {
        let region = self.state.borrow().layout().input_region();
        window::set_input_region(&self.root, region);
        self.drawing_area.queue_draw();

        if self.state.borrow().control.is_animating() {
            self.start_ticking();
        }
    }

    /// Steps the timeline on every frame until it settles, then detaches
    /// from the frame clock.
    fn start_ticking(&self) {
        if self.tick.borrow().is_some() {
            return;
        }

        let state = self.state.clone();
        let root = self.root.clone();
        let tick = self.tick.clone();
        let last_frame = Cell::new(None::<i64>);

        let id = self
            .drawing_area
            .add_tick_callback(move |drawing_area, clock| {
                let now = clock.frame_time();
                let dt = frame_delta(last_frame.replace(Some(now)), now);

                let animating = state.borrow_mut().control.advance(dt);
                window::set_input_region(&root, state.borrow().layout().input_region());
                drawing_area.queue_draw();

                if animating {
                    glib::ControlFlow::Continue
                } else {
                    tick.borrow_mut().take();
                    glib::ControlFlow::Break
                }
            });
        *self.tick.borrow_mut() = Some(id);
    }

    fn stop_ticking(&self) {
        if let Some(id) = self.tick.borrow_mut().take() {
            id.remove();
        }
    }
}
