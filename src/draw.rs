use egui::{Align2, FontId, Painter, Pos2, Shape, Stroke, Vec2};

use crate::{metadata::Metadata, Graph, StyleRules};

/// Paints edges first, then nodes with their labels, skipping hidden elements.
pub struct Drawer<'a, N: Clone, E: Clone> {
    g: &'a Graph<N, E>,
    style: &'a StyleRules<N>,
    meta: &'a Metadata,
    painter: &'a Painter,
    offset: Vec2,
}

impl<'a, N: Clone + 'static, E: Clone> Drawer<'a, N, E> {
    pub fn new(
        g: &'a Graph<N, E>,
        style: &'a StyleRules<N>,
        meta: &'a Metadata,
        painter: &'a Painter,
        offset: Vec2,
    ) -> Self {
        Self {
            g,
            style,
            meta,
            painter,
            offset,
        }
    }

    pub fn draw(&self) {
        self.draw_edges();
        self.draw_nodes();
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.meta.canvas_to_screen_pos(pos) + self.offset
    }

    fn draw_edges(&self) {
        for (idx, e) in self.g.edges_iter().filter(|(_, e)| !e.hidden()) {
            let Some((start, end)) = self.g.edge_endpoints(idx) else {
                continue;
            };
            let (Some(start), Some(end)) = (self.g.node(start), self.g.node(end)) else {
                continue;
            };
            if start.hidden() || end.hidden() {
                continue;
            }

            let (stroke, opacity) = self.style.edge_stroke(e.highlighted(), e.faded());
            let color = stroke.color.gamma_multiply(opacity);
            let width = self.meta.canvas_to_screen_size(stroke.width).max(0.5);

            let from = self.to_screen(start.location());
            let to = self.to_screen(end.location());
            let delta = to - from;
            let len = delta.length();
            if len < f32::EPSILON {
                continue;
            }
            let dir = delta / len;

            let r_start = self.meta.canvas_to_screen_size(self.style.radius(start));
            let r_end = self.meta.canvas_to_screen_size(self.style.radius(end));
            if len <= r_start + r_end {
                continue;
            }

            let tip = to - dir * r_end;
            let arrow = self.meta.canvas_to_screen_size(self.style.arrow_size);
            let base = tip - dir * arrow;
            let normal = Vec2::new(-dir.y, dir.x) * arrow / 2.;

            self.painter
                .line_segment([from + dir * r_start, base], Stroke::new(width, color));
            self.painter.add(Shape::convex_polygon(
                vec![tip, base + normal, base - normal],
                color,
                Stroke::NONE,
            ));
        }
    }

    fn draw_nodes(&self) {
        for (_, n) in self.g.nodes_iter().filter(|(_, n)| !n.hidden()) {
            let opacity = self.style.node_opacity(n.faded());
            let center = self.to_screen(n.location());
            let radius = self.meta.canvas_to_screen_size(self.style.radius(n));

            let fill = self.style.fill(n.payload()).gamma_multiply(opacity);
            self.painter.circle_filled(center, radius, fill);

            if let Some(border) = self.style.border(n.payload(), n.selected()) {
                let width = self.meta.canvas_to_screen_size(border.width);
                self.painter.circle_stroke(
                    center,
                    radius - width / 2.,
                    Stroke::new(width, border.color.gamma_multiply(opacity)),
                );
            }

            if self.style.labels_enabled && !n.label().is_empty() {
                let size = self.meta.canvas_to_screen_size(self.style.label_size);
                self.painter.text(
                    center + Vec2::new(0., radius + 2.),
                    Align2::CENTER_TOP,
                    n.label(),
                    FontId::proportional(size.max(1.)),
                    self.style.label_color.gamma_multiply(opacity),
                );
            }
        }
    }
}
