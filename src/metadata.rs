use egui::{Id, Pos2, Rect, Ui, Vec2};
use serde::{Deserialize, Serialize};

const KEY_PREFIX: &str = "pathway_graph_metadata";

/// Camera of a [`crate::GraphView`], persisted in egui memory per view id.
///
/// `pan` is expressed in widget-local coordinates: a canvas point `p` is
/// drawn at `top_left + p * zoom + pan`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Current zoom factor
    pub zoom: f32,
    /// Current pan offset
    pub pan: Vec2,
    /// Custom key to identify the metadata
    id: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            zoom: 1.,
            pan: Vec2::ZERO,
            id: String::new(),
        }
    }
}

impl Metadata {
    pub fn new(id: Option<String>) -> Self {
        Self {
            id: id.unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn load(self, ui: &Ui) -> Self {
        ui.data_mut(|data| {
            data.get_persisted::<Metadata>(Id::new(self.get_key()))
                .unwrap_or(self)
        })
    }

    pub fn save(self, ui: &mut Ui) {
        ui.data_mut(|data| {
            data.insert_persisted(Id::new(self.get_key()), self);
        });
    }

    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.zoom
    }

    pub fn screen_to_canvas_pos(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    /// Canvas point currently shown at the center of `viewport`.
    pub fn center(&self, viewport: Rect) -> Pos2 {
        self.screen_to_canvas_pos(viewport.center())
    }

    /// Places `center` (canvas) at the center of `viewport` with the given zoom.
    pub fn look_at(&mut self, center: Pos2, zoom: f32, viewport: Rect) {
        self.zoom = zoom;
        self.pan = viewport.center().to_vec2() - center.to_vec2() * zoom;
    }

    /// Zooms by `factor` keeping the canvas point under `anchor` in place.
    /// The resulting zoom is clamped to `min..=max`.
    pub fn zoom_around(&mut self, anchor: Pos2, factor: f32, min: f32, max: f32) {
        let graph_pos = (anchor.to_vec2() - self.pan) / self.zoom;
        let new_zoom = (self.zoom * factor).clamp(min, max);
        self.pan += graph_pos * self.zoom - graph_pos * new_zoom;
        self.zoom = new_zoom;
    }

    fn get_key(&self) -> String {
        format!("{KEY_PREFIX}_{}", self.id)
    }
}

/// Zoom and canvas center that make `bounds` fill `viewport` minus `padding`
/// on every side. The zoom is clamped to `min..=max`.
pub fn fit(bounds: Rect, viewport: Rect, padding: f32, min: f32, max: f32) -> (f32, Pos2) {
    let avail = (viewport.size() - Vec2::splat(padding * 2.)).max(Vec2::splat(1.));
    let size = bounds.size().max(Vec2::splat(1e-3));

    let mut zoom = (avail.x / size.x).min(avail.y / size.y);
    if !zoom.is_finite() || zoom <= 0. {
        zoom = 1.;
    }

    (zoom.clamp(min, max), bounds.center())
}

/// Animated camera move from one center/zoom to another.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraAnimation {
    pub from_center: Pos2,
    pub from_zoom: f32,
    pub to_center: Pos2,
    pub to_zoom: f32,
    /// Start time in seconds, egui input clock.
    pub started_at: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl CameraAnimation {
    /// Camera center and zoom at `now` plus whether the animation is over.
    pub fn sample(&self, now: f64) -> (Pos2, f32, bool) {
        let t = if self.duration <= 0. {
            1.
        } else {
            ((now - self.started_at) / self.duration).clamp(0., 1.) as f32
        };
        let eased = ease_in_out(t);

        let center = self.from_center.lerp(self.to_center, eased);
        let zoom = self.from_zoom + (self.to_zoom - self.from_zoom) * eased;

        (center, zoom, t >= 1.)
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2. * t * t
    } else {
        1. - (-2. * t + 2.).powi(2) / 2.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.))
    }

    #[test]
    fn persisted_camera_holds_zoom_pan_and_id() {
        let mut meta = Metadata::new(Some("pathway".into()));
        meta.zoom = 2.;
        meta.pan = Vec2::new(10., -5.);

        let value = serde_json::to_value(&meta).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "pan", "zoom"]);
        assert_eq!(value["zoom"], 2.);
    }

    #[test]
    fn fit_contains_bounds_with_padding() {
        let bounds = Rect::from_min_max(Pos2::new(-100., -50.), Pos2::new(300., 150.));
        let (zoom, center) = fit(bounds, viewport(), 50., 0.1, 4.);

        // 700 / 400 vs 500 / 200
        assert!((zoom - 1.75).abs() < 1e-5);
        assert_eq!(center, Pos2::new(100., 50.));

        let mut meta = Metadata::default();
        meta.look_at(center, zoom, viewport());
        let min = meta.canvas_to_screen_pos(bounds.min);
        let max = meta.canvas_to_screen_pos(bounds.max);
        assert!(min.x >= 49.9 && max.x <= 750.1);
        assert!(min.y >= 49.9 && max.y <= 550.1);
    }

    #[test]
    fn fit_respects_zoom_limits() {
        let tiny = Rect::from_center_size(Pos2::ZERO, Vec2::splat(1.));
        assert_eq!(fit(tiny, viewport(), 50., 0.1, 4.).0, 4.);

        let huge = Rect::from_center_size(Pos2::ZERO, Vec2::splat(1e6));
        assert_eq!(fit(huge, viewport(), 50., 0.1, 4.).0, 0.1);
    }

    #[test]
    fn zoom_around_keeps_anchor_fixed() {
        let mut meta = Metadata::default();
        meta.pan = Vec2::new(30., -20.);
        let anchor = Pos2::new(200., 100.);
        let before = meta.screen_to_canvas_pos(anchor);

        meta.zoom_around(anchor, 1.5, 0.1, 4.);
        let after = meta.screen_to_canvas_pos(anchor);

        assert!((meta.zoom - 1.5).abs() < 1e-6);
        assert!(before.distance(after) < 1e-3);

        meta.zoom_around(anchor, 100., 0.1, 4.);
        assert_eq!(meta.zoom, 4.);
    }

    #[test]
    fn camera_animation_reaches_target() {
        let anim = CameraAnimation {
            from_center: Pos2::ZERO,
            from_zoom: 1.,
            to_center: Pos2::new(100., 100.),
            to_zoom: 1.5,
            started_at: 10.,
            duration: 0.3,
        };

        let (c, z, done) = anim.sample(10.);
        assert_eq!((c, z, done), (Pos2::ZERO, 1., false));

        let (c, z, done) = anim.sample(10.15);
        assert!((c.x - 50.).abs() < 1e-3 && (z - 1.25).abs() < 1e-3);
        assert!(!done);

        let (c, z, done) = anim.sample(11.);
        assert_eq!((c, z, done), (Pos2::new(100., 100.), 1.5, true));
    }
}
