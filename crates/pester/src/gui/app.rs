use crate::events::AppEvent;
use crate::gui::page::{self, Hit};
use crate::gui::theme::{self, ThemeColors};
use crate::sys::timers::GlibScheduler;
use gtk::prelude::*;
use gtk4 as gtk;
use nag::config::{self, Config};
use nag::{Event, Point, Session, UiState, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub session: Session<GlibScheduler, StdRng>,
    /// Latest state, shared with the draw and tick callbacks.
    pub snapshot: Rc<RefCell<UiState>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Fire(Event),
    PointerMove(Point),
    Click(Point),
    Resize(i32, i32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn dispatch(&mut self, event: Event) {
        if self.session.dispatch(event) {
            *self.snapshot.borrow_mut() = self.session.state().clone();
            self.drawing_area.queue_draw();
        }
    }

    fn hit(&self, point: Point) -> Option<Hit> {
        page::hit_test(self.session.state(), self.session.viewport(), point)
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some(page::TITLE),
            set_default_width: width,
            set_default_height: height,
            add_css_class: "pester-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "pester-page",
                set_cursor_from_name: Some("none"),

                connect_resize[sender] => move |_, w, h| {
                    sender.input(AppMsg::Resize(w, h));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
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
        let (config, rx) = init;

        theme::load_css();

        let width = config.window.width as i32;
        let height = config.window.height as i32;

        let scheduler = GlibScheduler::new(sender.input_sender().clone());
        let mut session = Session::new(config, scheduler, StdRng::from_entropy());
        session.mount();

        let snapshot = Rc::new(RefCell::new(session.state().clone()));

        let model = AppModel {
            session,
            snapshot: snapshot.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = snapshot.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, w, h| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let viewport = Viewport::new(w as f64, h as f64);
                let seconds = glib::monotonic_time() as f64 / 1_000_000.0;
                if let Err(e) = page::draw(cr, &state_draw.borrow(), viewport, &colors, seconds) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // keep animating while the page shakes
        let state_tick = snapshot;
        widgets.drawing_area.add_tick_callback(move |drawing_area, _| {
            if state_tick.borrow().shaking {
                drawing_area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Fire(event) => self.dispatch(event),
            AppMsg::PointerMove(point) => {
                self.dispatch(Event::PointerMoved(point));
                if self.hit(point) == Some(Hit::EvasiveButton) {
                    self.dispatch(Event::ButtonHovered);
                }
            }
            AppMsg::Click(point) => {
                if let Some(event) = self.hit(point).and_then(|hit| hit.click_event()) {
                    self.dispatch(event);
                }
            }
            AppMsg::Resize(w, h) => {
                self.dispatch(Event::Resize(Viewport::new(w as f64, h as f64)));
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.session.reconfigure(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.session.unmount();
    }
}
