use crate::events::AppEvent;
use crate::gui::model::State;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::view;
use crate::gui::{
    CONTENT_PADDING, CONTENT_SPACING, KNOB_SIZE, METER_HEIGHT, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use gtk::prelude::*;
use gtk4 as gtk;
use knob::config;
use knob::{Point, PointerKind};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub knob_area: gtk::DrawingArea,
    pub meter_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Layout(i32, i32),
    Pointer(PointerKind, Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Music Knob"),
            set_default_size: (WINDOW_WIDTH, WINDOW_HEIGHT),
            add_css_class: "musicknob-window",

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "border_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                },

                add_overlay = &gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: CONTENT_SPACING,
                    set_margin_all: CONTENT_PADDING,
                    set_valign: gtk::Align::Center,

                    #[name = "knob_area"]
                    gtk::DrawingArea {
                        set_content_width: KNOB_SIZE,
                        set_content_height: KNOB_SIZE,

                        add_controller = gtk::GestureDrag {
                            connect_drag_begin[sender] => move |_, x, y| {
                                sender.input(AppMsg::Pointer(PointerKind::Down, Point::new(x, y)));
                            },
                            connect_drag_update[sender] => move |gesture, dx, dy| {
                                if let Some((x, y)) = gesture.start_point() {
                                    sender.input(AppMsg::Pointer(
                                        PointerKind::Move,
                                        Point::new(x + dx, y + dy),
                                    ));
                                }
                            },
                            connect_drag_end[sender] => move |gesture, dx, dy| {
                                let (x, y) = gesture.start_point().unwrap_or_default();
                                sender.input(AppMsg::Pointer(
                                    PointerKind::Up,
                                    Point::new(x + dx, y + dy),
                                ));
                            },
                        },
                    },

                    #[name = "meter_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_content_height: METER_HEIGHT,
                        set_valign: gtk::Align::Center,
                    },
                },
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

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            knob_area: gtk::DrawingArea::default(),
            meter_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.knob_area = widgets.knob_area.clone();
        model.meter_area = widgets.meter_area.clone();

        let state_draw = model.state.clone();
        widgets
            .knob_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let state = state_draw.borrow();
                if let Err(e) = view::draw_knob(cr, &state, &colors, width as f64, height as f64) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let state_draw = model.state.clone();
        widgets
            .meter_area
            .set_draw_func(move |_, cr, width, height| {
                let state = state_draw.borrow();
                if let Err(e) = view::draw_meter(cr, &state, width as f64, height as f64) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let state_draw = model.state.clone();
        widgets
            .border_area
            .set_draw_func(move |_, cr, width, height| {
                let state = state_draw.borrow();
                if let Err(e) = view::draw_border(cr, &state, width as f64, height as f64) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // free-running border animation, redrawn every frame
        widgets.border_area.add_tick_callback(|area, _| {
            area.queue_draw();
            glib::ControlFlow::Continue
        });

        let layout_sender = sender.clone();
        widgets.knob_area.connect_resize(move |_, width, height| {
            layout_sender.input(AppMsg::Layout(width, height));
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
            AppMsg::Layout(width, height) => {
                self.state
                    .borrow_mut()
                    .knob
                    .on_layout_size(width as f64, height as f64);
            }
            AppMsg::Pointer(kind, position) => {
                let action = self.state.borrow_mut().knob.handle_event(kind, position);
                if action.should_redraw {
                    self.knob_area.queue_draw();
                    self.meter_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match self.state.borrow_mut().reconfigure(&new_config) {
                    Ok(()) => {
                        self.knob_area.queue_draw();
                        self.meter_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Rejected reloaded config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
