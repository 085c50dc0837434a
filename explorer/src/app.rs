use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use eframe::{App, CreationContext, Frame};
use egui::{CentralPanel, Context, RichText, SidePanel};
use log::info;
use pathway_graph::{
    Event, GraphView, LayoutAlgorithm, SettingsInteraction, SettingsNavigation, StyleRules,
};

use crate::{
    config::Config,
    controller::{Action, Controller},
    controls,
    dataset::Dataset,
    detail,
    keybindings::{self, Command},
    loader::{self, DataSource, LoadError},
    model::PathwayNode,
    style,
    ui_consts::{CONTROLS_PANEL_WIDTH, DETAIL_PANEL_WIDTH, HEADING_TEXT_SIZE},
};

const VIEW_ID: &str = "pathway";

enum Phase {
    Loading {
        rx: Receiver<Result<Dataset, LoadError>>,
        source: DataSource,
    },
    Ready(Box<Session>),
    Failed(String),
}

/// Per-dataset state, created once loading succeeds.
struct Session {
    controller: Controller,
    style: StyleRules<PathwayNode>,
    search: String,
    focus_search: bool,
    event_publisher: Sender<Event>,
    event_consumer: Receiver<Event>,
}

/// Graph view settings fixed for the whole run.
struct ViewSettings {
    layout: LayoutAlgorithm,
    animation_secs: f64,
    interaction: SettingsInteraction,
    navigation: SettingsNavigation,
}

pub struct ExplorerApp {
    config: Config,
    view: ViewSettings,
    phase: Phase,
}

impl ExplorerApp {
    pub fn new(_: &CreationContext<'_>, config: Config) -> Self {
        let source = config.data_source();
        info!("loading pathway data from {source}");
        let rx = loader::spawn_load(
            source.clone(),
            config.data.nodes_file.clone(),
            config.data.edges_file.clone(),
        );

        Self {
            view: ViewSettings {
                layout: config.layout_algorithm(),
                animation_secs: config.layout_animation_secs(),
                interaction: SettingsInteraction::new(),
                navigation: config.navigation(),
            },
            config,
            phase: Phase::Loading { rx, source },
        }
    }

    fn poll_loader(&mut self) {
        let Phase::Loading { rx, .. } = &self.phase else {
            return;
        };
        let res = match rx.try_recv() {
            Ok(res) => res,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(LoadError::Disconnected),
        };

        self.phase = match res {
            Ok(dataset) => {
                let (event_publisher, event_consumer) = unbounded();
                let controller = Controller::new(
                    dataset,
                    self.config.view.focus_zoom,
                    self.config.focus_duration_secs(),
                );
                Phase::Ready(Box::new(Session {
                    controller,
                    style: style::style_rules(),
                    search: String::new(),
                    focus_search: false,
                    event_publisher,
                    event_consumer,
                }))
            }
            Err(e) => Phase::Failed(e.to_string()),
        };
    }
}

impl App for ExplorerApp {
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        self.poll_loader();

        match &mut self.phase {
            Phase::Loading { source, .. } => {
                let text = format!("Loading pathway data from {source}");
                CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.);
                        ui.spinner();
                        ui.label(RichText::new(text).color(style::MUTED));
                    });
                });
                ctx.request_repaint();
            }
            Phase::Failed(message) => {
                CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.);
                        ui.label(
                            RichText::new("Failed to load pathway data")
                                .size(HEADING_TEXT_SIZE)
                                .color(style::RED),
                        );
                        ui.label(message.as_str());
                    });
                });
            }
            Phase::Ready(session) => ui_ready(ctx, session, &self.view),
        }
    }
}

fn ui_ready(ctx: &Context, s: &mut Session, view: &ViewSettings) {
    for cmd in keybindings::dispatch(ctx) {
        match cmd {
            Command::Fit => s.controller.dispatch(Action::Fit),
            Command::Relayout => s.controller.dispatch(Action::Relayout),
            Command::Reset => {
                s.search.clear();
                s.controller.dispatch(Action::Reset);
            }
            Command::ClearSelection => s.controller.dispatch(Action::TapBackground),
            Command::FocusSearch => s.focus_search = true,
        }
    }

    let mut actions = Vec::new();
    SidePanel::left("controls")
        .default_width(CONTROLS_PANEL_WIDTH)
        .min_width(CONTROLS_PANEL_WIDTH)
        .show(ctx, |ui| {
            actions = controls::show(ui, &s.controller, &mut s.search, s.focus_search);
        });
    s.focus_search = false;

    SidePanel::right("detail")
        .default_width(DETAIL_PANEL_WIDTH)
        .min_width(DETAIL_PANEL_WIDTH)
        .show(ctx, |ui| {
            if let Some(id) = detail::show(ui, s.controller.detail()) {
                actions.push(Action::Select(id));
            }
        });

    for action in actions {
        if action == Action::Reset {
            s.search.clear();
        }
        s.controller.dispatch(action);
    }

    let commands = s.controller.take_commands();
    CentralPanel::default().show(ctx, |ui| {
        ui.add(
            &mut GraphView::new(s.controller.graph_mut(), &s.style)
                .with_interactions(&view.interaction)
                .with_navigations(&view.navigation)
                .with_layout(&view.layout, view.animation_secs)
                .with_commands(commands)
                .with_events(&s.event_publisher)
                .with_id(Some(VIEW_ID.to_string())),
        );
    });

    // taps are handled on the frame after they happen
    while let Ok(event) = s.event_consumer.try_recv() {
        match event {
            Event::NodeTap(idx) => s.controller.dispatch(Action::TapNode(idx)),
            Event::BackgroundTap => s.controller.dispatch(Action::TapBackground),
            Event::LayoutFinished { .. } => {}
        }
        ctx.request_repaint();
    }
}
