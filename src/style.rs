use std::sync::Arc;

use egui::{Color32, Stroke};

use crate::elements::Node;

type NodeFn<N, T> = Arc<dyn Fn(&N) -> T + Send + Sync>;

/// Declarative style rules. Per-node visuals are pure functions of the node
/// payload; class and selection overrides are fixed values applied on top.
pub struct StyleRules<N> {
    pub(crate) node_fill: NodeFn<N, Color32>,
    pub(crate) node_diameter: NodeFn<N, f32>,
    pub(crate) node_border: NodeFn<N, Option<Stroke>>,

    pub(crate) selected_border: Stroke,

    pub(crate) edge: Stroke,
    pub(crate) edge_opacity: f32,
    pub(crate) edge_highlighted: Stroke,
    pub(crate) arrow_size: f32,

    pub(crate) faded_node_opacity: f32,
    pub(crate) faded_edge_opacity: f32,

    pub(crate) labels_enabled: bool,
    pub(crate) label_size: f32,
    pub(crate) label_color: Color32,
}

impl<N> Clone for StyleRules<N> {
    fn clone(&self) -> Self {
        Self {
            node_fill: Arc::clone(&self.node_fill),
            node_diameter: Arc::clone(&self.node_diameter),
            node_border: Arc::clone(&self.node_border),
            selected_border: self.selected_border,
            edge: self.edge,
            edge_opacity: self.edge_opacity,
            edge_highlighted: self.edge_highlighted,
            arrow_size: self.arrow_size,
            faded_node_opacity: self.faded_node_opacity,
            faded_edge_opacity: self.faded_edge_opacity,
            labels_enabled: self.labels_enabled,
            label_size: self.label_size,
            label_color: self.label_color,
        }
    }
}

impl<N: 'static> Default for StyleRules<N> {
    fn default() -> Self {
        Self {
            node_fill: Arc::new(|_: &N| Color32::GRAY),
            node_diameter: Arc::new(|_: &N| 20.),
            node_border: Arc::new(|_: &N| None),
            selected_border: Stroke::new(4., Color32::from_rgb(0x4a, 0x9e, 0xff)),
            edge: Stroke::new(1., Color32::from_rgb(0x2a, 0x2a, 0x3a)),
            edge_opacity: 0.6,
            edge_highlighted: Stroke::new(2., Color32::from_rgb(0x4a, 0x9e, 0xff)),
            arrow_size: 6.,
            faded_node_opacity: 0.15,
            faded_edge_opacity: 0.05,
            labels_enabled: true,
            label_size: 10.,
            label_color: Color32::from_rgb(0xe0, 0xe0, 0xe0),
        }
    }
}

impl<N: 'static> StyleRules<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_fill(mut self, f: impl Fn(&N) -> Color32 + Send + Sync + 'static) -> Self {
        self.node_fill = Arc::new(f);
        self
    }

    /// Diameter in canvas units.
    pub fn with_node_diameter(mut self, f: impl Fn(&N) -> f32 + Send + Sync + 'static) -> Self {
        self.node_diameter = Arc::new(f);
        self
    }

    pub fn with_node_border(
        mut self,
        f: impl Fn(&N) -> Option<Stroke> + Send + Sync + 'static,
    ) -> Self {
        self.node_border = Arc::new(f);
        self
    }

    /// Border drawn around a selected node instead of its own border.
    pub fn with_selected_border(mut self, stroke: Stroke) -> Self {
        self.selected_border = stroke;
        self
    }

    pub fn with_edge(mut self, stroke: Stroke, opacity: f32) -> Self {
        self.edge = stroke;
        self.edge_opacity = opacity;
        self
    }

    pub fn with_edge_highlighted(mut self, stroke: Stroke) -> Self {
        self.edge_highlighted = stroke;
        self
    }

    pub fn with_arrow_size(mut self, size: f32) -> Self {
        self.arrow_size = size;
        self
    }

    pub fn with_faded_opacity(mut self, node: f32, edge: f32) -> Self {
        self.faded_node_opacity = node;
        self.faded_edge_opacity = edge;
        self
    }

    pub fn with_labels(mut self, enabled: bool, size: f32, color: Color32) -> Self {
        self.labels_enabled = enabled;
        self.label_size = size;
        self.label_color = color;
        self
    }

    pub fn fill(&self, payload: &N) -> Color32 {
        (self.node_fill)(payload)
    }

    pub fn diameter(&self, payload: &N) -> f32 {
        (self.node_diameter)(payload)
    }

    pub(crate) fn radius(&self, n: &Node<N>) -> f32
    where
        N: Clone,
    {
        self.diameter(n.payload()) / 2.
    }

    /// Border of a node after applying the selection override.
    pub fn border(&self, payload: &N, selected: bool) -> Option<Stroke> {
        if selected {
            return Some(self.selected_border);
        }
        (self.node_border)(payload)
    }

    /// Opacity multiplier of a node.
    pub fn node_opacity(&self, faded: bool) -> f32 {
        if faded {
            self.faded_node_opacity
        } else {
            1.
        }
    }

    /// Stroke and opacity of an edge given its classes.
    pub fn edge_stroke(&self, highlighted: bool, faded: bool) -> (Stroke, f32) {
        if highlighted {
            (self.edge_highlighted, 1.)
        } else if faded {
            (self.edge, self.faded_edge_opacity)
        } else {
            (self.edge, self.edge_opacity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_overrides_border() {
        let rules: StyleRules<u32> =
            StyleRules::new().with_node_border(|n| (*n > 0).then_some(Stroke::new(3., Color32::WHITE)));

        assert_eq!(rules.border(&0, false), None);
        assert_eq!(rules.border(&1, false), Some(Stroke::new(3., Color32::WHITE)));
        assert_eq!(rules.border(&0, true), Some(rules.selected_border));
        assert_eq!(rules.border(&1, true).map(|s| s.width), Some(4.));
    }

    #[test]
    fn edge_classes_pick_stroke_and_opacity() {
        let rules: StyleRules<()> = StyleRules::new();
        assert_eq!(rules.edge_stroke(false, false), (rules.edge, 0.6));
        assert_eq!(rules.edge_stroke(false, true), (rules.edge, 0.05));
        assert_eq!(rules.edge_stroke(true, false), (rules.edge_highlighted, 1.));
        assert_eq!(rules.node_opacity(true), 0.15);
    }

    #[test]
    fn callbacks_read_payload() {
        let rules: StyleRules<f32> = StyleRules::new()
            .with_node_diameter(|p| p * 2.)
            .with_node_fill(|p| if *p > 1. { Color32::RED } else { Color32::BLUE });
        assert_eq!(rules.diameter(&12.), 24.);
        assert_eq!(rules.fill(&2.), Color32::RED);
    }
}
