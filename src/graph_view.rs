use crossbeam::channel::Sender;
use egui::{Id, PointerButton, Pos2, Rect, Response, Sense, Ui, Vec2, Widget};
use petgraph::stable_graph::NodeIndex;

use crate::{
    draw::Drawer,
    events::{Event, ViewCommand},
    layouts::{LayoutAlgorithm, LayoutRun},
    metadata::{fit, CameraAnimation, Metadata},
    settings::{SettingsInteraction, SettingsNavigation},
    Graph, StyleRules,
};

const RUNTIME_KEY: &str = "pathway_graph_runtime";

/// Frame-to-frame state that is not worth persisting: running animations.
#[derive(Clone, Debug, Default)]
struct Runtime {
    camera: Option<CameraAnimation>,
    layout: Option<LayoutRun>,
    dragged: Option<NodeIndex>,
}

impl Runtime {
    fn key(custom_id: Option<&String>) -> Id {
        Id::new((RUNTIME_KEY, custom_id.cloned().unwrap_or_default()))
    }

    fn load(ui: &Ui, custom_id: Option<&String>) -> Self {
        ui.data_mut(|data| data.get_temp::<Runtime>(Self::key(custom_id)))
            .unwrap_or_default()
    }

    fn save(self, ui: &mut Ui, custom_id: Option<&String>) {
        ui.data_mut(|data| data.insert_temp(Self::key(custom_id), self));
    }

    fn is_active(&self) -> bool {
        self.camera.is_some() || self.layout.is_some()
    }
}

/// Widget for visualizing and interacting with a pathway graph.
///
/// It renders nodes and edges of [`Graph`] using [`StyleRules`], reports taps
/// as [`Event`]s and executes [`ViewCommand`]s queued by the owner.
///
/// Zoom and pan are stored per view id in egui memory, so the camera survives
/// between frames without the owner keeping it.
pub struct GraphView<'a, N: Clone, E: Clone> {
    g: &'a mut Graph<N, E>,
    style: &'a StyleRules<N>,

    settings_interaction: SettingsInteraction,
    settings_navigation: SettingsNavigation,

    layout: LayoutAlgorithm,
    layout_duration: f64,

    commands: Vec<ViewCommand>,
    events_publisher: Option<&'a Sender<Event>>,
    custom_id: Option<String>,
}

impl<N: Clone + 'static, E: Clone> Widget for &mut GraphView<'_, N, E> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (resp, p) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let viewport = Rect::from_min_size(Pos2::ZERO, resp.rect.size());
        let now = ui.input(|i| i.time);

        let mut meta = Metadata::new(self.custom_id.clone()).load(ui);
        let mut runtime = Runtime::load(ui, self.custom_id.as_ref());

        self.handle_commands(&mut meta, &mut runtime, viewport, now);
        self.sync_layout(&mut meta, &mut runtime, viewport, now);
        sync_camera(&mut meta, &mut runtime, viewport, now);

        // node drag goes first so a drag started on a node never pans
        self.handle_node_drag(ui, &resp, &meta, &mut runtime);
        self.handle_navigation(ui, &resp, &mut meta, &mut runtime);
        self.handle_click(&resp, &meta);

        Drawer::new(self.g, self.style, &meta, &p, resp.rect.left_top().to_vec2()).draw();

        if runtime.is_active() {
            ui.ctx().request_repaint();
        }

        meta.save(ui);
        runtime.save(ui, self.custom_id.as_ref());

        resp
    }
}

impl<'a, N: Clone + 'static, E: Clone> GraphView<'a, N, E> {
    /// Creates a new `GraphView` widget with default navigation and interactions settings.
    /// To customize navigation and interactions use `with_interactions` and `with_navigations` methods.
    pub fn new(g: &'a mut Graph<N, E>, style: &'a StyleRules<N>) -> Self {
        Self {
            g,
            style,

            settings_interaction: SettingsInteraction::default(),
            settings_navigation: SettingsNavigation::default(),

            layout: LayoutAlgorithm::default(),
            layout_duration: 1.,

            commands: Vec::new(),
            events_publisher: None,
            custom_id: None,
        }
    }

    /// Makes widget interactive according to the provided settings.
    pub fn with_interactions(mut self, settings_interaction: &SettingsInteraction) -> Self {
        self.settings_interaction = settings_interaction.clone();
        self
    }

    /// Modifies default behaviour of navigation settings.
    pub fn with_navigations(mut self, settings_navigation: &SettingsNavigation) -> Self {
        self.settings_navigation = settings_navigation.clone();
        self
    }

    /// Layout used by [`ViewCommand::RunLayout`] and the duration of animated runs in seconds.
    pub fn with_layout(mut self, algorithm: &LayoutAlgorithm, animation_secs: f64) -> Self {
        self.layout = algorithm.clone();
        self.layout_duration = animation_secs;
        self
    }

    /// Commands to execute this frame, in order.
    pub fn with_commands(mut self, commands: Vec<ViewCommand>) -> Self {
        self.commands = commands;
        self
    }

    /// Publishes taps and layout completion to the provided channel.
    pub fn with_events(mut self, events_publisher: &'a Sender<Event>) -> Self {
        self.events_publisher = Some(events_publisher);
        self
    }

    /// Views sharing an id share their camera.
    pub fn with_id(mut self, custom_id: Option<String>) -> Self {
        self.custom_id = custom_id;
        self
    }

    fn handle_commands(
        &mut self,
        meta: &mut Metadata,
        runtime: &mut Runtime,
        viewport: Rect,
        now: f64,
    ) {
        for command in std::mem::take(&mut self.commands) {
            match command {
                ViewCommand::Fit => {
                    runtime.camera = None;
                    self.fit_to_screen(meta, viewport);
                }
                ViewCommand::CenterOn {
                    node,
                    zoom,
                    duration,
                } => {
                    let Some(target) = self.g.node(node).map(crate::Node::location) else {
                        continue;
                    };
                    runtime.camera = Some(CameraAnimation {
                        from_center: meta.center(viewport),
                        from_zoom: meta.zoom,
                        to_center: target,
                        to_zoom: self.settings_navigation.clamp_zoom(zoom),
                        started_at: now,
                        duration,
                    });
                }
                ViewCommand::RunLayout { animate } => {
                    log::debug!(
                        "starting {} layout, animated: {animate}",
                        self.layout.name()
                    );
                    runtime.layout = Some(LayoutRun::new(
                        self.layout.clone(),
                        self.g,
                        animate,
                        now,
                        self.layout_duration,
                    ));
                }
            }
        }
    }

    fn sync_layout(
        &mut self,
        meta: &mut Metadata,
        runtime: &mut Runtime,
        viewport: Rect,
        now: f64,
    ) {
        let Some(run) = runtime.layout.as_mut() else {
            return;
        };
        if !run.advance(self.g, now) {
            return;
        }

        let algorithm = run.algorithm().name();
        runtime.layout = None;
        runtime.camera = None;
        self.fit_to_screen(meta, viewport);
        log::info!("{algorithm} layout finished");
        self.publish_event(Event::LayoutFinished { algorithm });
    }

    fn fit_to_screen(&self, meta: &mut Metadata, viewport: Rect) {
        let Some(bounds) = self.g.visible_bounds(|n| self.style.radius(n)) else {
            return;
        };
        let nav = &self.settings_navigation;
        let (zoom, center) = fit(
            bounds,
            viewport,
            nav.fit_padding,
            nav.min_zoom,
            nav.max_zoom,
        );
        meta.look_at(center, zoom, viewport);
    }

    fn handle_node_drag(
        &mut self,
        ui: &Ui,
        resp: &Response,
        meta: &Metadata,
        runtime: &mut Runtime,
    ) {
        if !self.settings_interaction.dragging_enabled {
            return;
        }

        if resp.drag_started_by(PointerButton::Primary) {
            let origin = ui.input(|i| i.pointer.press_origin());
            runtime.dragged = origin.and_then(|pos| self.node_at(resp, meta, pos));
            if let Some(n) = runtime.dragged.and_then(|idx| self.g.node_mut(idx)) {
                n.set_dragged(true);
            }
        }

        if let Some(idx) = runtime.dragged {
            let delta = resp.drag_delta() / meta.zoom;
            if let Some(n) = self.g.node_mut(idx) {
                n.set_location(n.location() + delta);
            }
        }

        if resp.drag_stopped() {
            if let Some(n) = runtime.dragged.take().and_then(|idx| self.g.node_mut(idx)) {
                n.set_dragged(false);
            }
        }
    }

    fn handle_navigation(
        &self,
        ui: &Ui,
        resp: &Response,
        meta: &mut Metadata,
        runtime: &mut Runtime,
    ) {
        let nav = &self.settings_navigation;
        if !nav.zoom_and_pan_enabled {
            return;
        }

        if resp.hovered() {
            let (zoom_delta, scroll) = ui.input(|i| (i.zoom_delta(), i.smooth_scroll_delta.y));
            // pinch reports a ratio, the wheel reports points scrolled this frame
            let factor = if zoom_delta == 1. {
                (scroll * nav.zoom_speed / 50.).exp()
            } else {
                zoom_delta
            };

            if factor != 1. {
                let anchor = ui
                    .input(|i| i.pointer.hover_pos())
                    .unwrap_or(resp.rect.center())
                    - resp.rect.left_top().to_vec2();
                runtime.camera = None;
                meta.zoom_around(anchor, factor, nav.min_zoom, nav.max_zoom);
            }
        }

        let dragging =
            resp.dragged_by(PointerButton::Primary) || resp.dragged_by(PointerButton::Middle);
        if dragging && runtime.dragged.is_none() && resp.drag_delta() != Vec2::ZERO {
            runtime.camera = None;
            meta.pan += resp.drag_delta();
        }
    }

    fn handle_click(&self, resp: &Response, meta: &Metadata) {
        if !self.settings_interaction.node_tapping_enabled || !resp.clicked() {
            return;
        }
        let Some(pos) = resp.interact_pointer_pos() else {
            return;
        };

        match self.node_at(resp, meta, pos) {
            Some(idx) => self.publish_event(Event::NodeTap(idx)),
            None => self.publish_event(Event::BackgroundTap),
        }
    }

    fn node_at(&self, resp: &Response, meta: &Metadata, screen_pos: Pos2) -> Option<NodeIndex> {
        let local = screen_pos - resp.rect.left_top().to_vec2();
        let canvas = meta.screen_to_canvas_pos(local);
        self.g.node_at(canvas, |n| self.style.radius(n))
    }

    fn publish_event(&self, event: Event) {
        if let Some(sender) = self.events_publisher {
            sender.send(event).ok();
        }
    }
}

fn sync_camera(meta: &mut Metadata, runtime: &mut Runtime, viewport: Rect, now: f64) {
    let Some(anim) = runtime.camera.as_ref() else {
        return;
    };
    let (center, zoom, done) = anim.sample(now);
    meta.look_at(center, zoom, viewport);
    if done {
        runtime.camera = None;
    }
}
