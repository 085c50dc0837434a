use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Sort order for circular layout nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Alphabetical by label (ascending)
    #[default]
    Alphabetical,
    /// No sorting - preserve insertion order
    None,
}

/// Circular layout arranges nodes evenly around a circle centered on the
/// canvas origin, starting at the top and going clockwise.
///
/// The radius grows with the node count unless a fixed one is set. The
/// layout applies in a single step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circular {
    pub sort_order: SortOrder,
    pub base_radius: f32,
    pub radius_per_node: f32,
    pub fixed_radius: Option<f32>,
}

impl Default for Circular {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::default(),
            base_radius: 50.,
            radius_per_node: 12.,
            fixed_radius: None,
        }
    }
}

impl Circular {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_fixed_radius(mut self, radius: f32) -> Self {
        self.fixed_radius = Some(radius);
        self
    }

    pub fn radius(&self, node_count: usize) -> f32 {
        self.fixed_radius
            .unwrap_or(self.base_radius + node_count as f32 * self.radius_per_node)
    }

    /// Positions for nodes given their labels, in input order.
    pub fn positions(&self, labels: &[&str]) -> Vec<Pos2> {
        let n = labels.len();
        let mut order: Vec<usize> = (0..n).collect();
        if self.sort_order == SortOrder::Alphabetical {
            order.sort_by(|a, b| labels[*a].cmp(labels[*b]));
        }

        let radius = self.radius(n);
        let mut res = vec![Pos2::ZERO; n];
        for (slot, &i) in order.iter().enumerate() {
            let angle = -std::f32::consts::FRAC_PI_2
                + (slot as f32) * std::f32::consts::TAU / (n as f32);
            res[i] = Pos2::new(radius * angle.cos(), radius * angle.sin());
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabetical_order_starts_at_top() {
        let layout = Circular::new().with_fixed_radius(100.);
        let pos = layout.positions(&["c", "a", "b", "d"]);

        // "a" takes the first slot at the top
        assert!((pos[1].x).abs() < 1e-3 && (pos[1].y + 100.).abs() < 1e-3);
        // "b" is a quarter turn clockwise
        assert!((pos[2].x - 100.).abs() < 1e-3 && pos[2].y.abs() < 1e-3);
        assert!(pos.iter().all(|p| (p.to_vec2().length() - 100.).abs() < 1e-3));
    }

    #[test]
    fn radius_scales_with_count() {
        let layout = Circular::new();
        assert!(layout.radius(100) > layout.radius(10));
        assert!(layout.positions(&[]).is_empty());
    }
}
