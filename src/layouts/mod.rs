mod circular;
mod force_directed;

pub use self::circular::{Circular, SortOrder};
pub use self::force_directed::{ForceDirected, ForceDirectedParams};

use egui::{Pos2, Vec2};
use petgraph::stable_graph::NodeIndex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Graph;

/// Layout algorithms a [`crate::GraphView`] can run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutAlgorithm {
    ForceDirected(ForceDirected),
    Circular(Circular),
}

impl Default for LayoutAlgorithm {
    fn default() -> Self {
        Self::ForceDirected(ForceDirected::default())
    }
}

impl LayoutAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ForceDirected(_) => "force-directed",
            Self::Circular(_) => "circular",
        }
    }

    /// Number of steps a full run takes.
    pub fn iterations(&self) -> u32 {
        match self {
            Self::ForceDirected(fd) => fd.params.iterations.max(1),
            Self::Circular(_) => 1,
        }
    }
}

/// One execution of a layout over the nodes that were visible when it started.
///
/// Without animation the whole run completes on the first [`LayoutRun::advance`];
/// with animation the iterations are spread over `duration` seconds.
#[derive(Debug, Clone)]
pub struct LayoutRun {
    algorithm: LayoutAlgorithm,
    indices: Vec<NodeIndex>,
    links: Vec<(usize, usize)>,
    positions: Vec<Pos2>,
    scratch_disp: Vec<Vec2>,
    iteration: u32,
    animate: bool,
    started_at: f64,
    duration: f64,
}

impl LayoutRun {
    pub fn new<N: Clone, E: Clone>(
        algorithm: LayoutAlgorithm,
        g: &Graph<N, E>,
        animate: bool,
        started_at: f64,
        duration: f64,
    ) -> Self {
        Self::with_rng(algorithm, g, animate, started_at, duration, &mut rand::rng())
    }

    /// Same as [`LayoutRun::new`] with a caller provided random source for the
    /// starting positions.
    pub fn with_rng<N: Clone, E: Clone, R: Rng>(
        algorithm: LayoutAlgorithm,
        g: &Graph<N, E>,
        animate: bool,
        started_at: f64,
        duration: f64,
        rng: &mut R,
    ) -> Self {
        let visible: Vec<_> = g.nodes_iter().filter(|(_, n)| !n.hidden()).collect();
        let indices: Vec<NodeIndex> = visible.iter().map(|(idx, _)| *idx).collect();

        let positions = match &algorithm {
            LayoutAlgorithm::ForceDirected(fd) => fd.initial_positions(indices.len(), rng),
            LayoutAlgorithm::Circular(c) => {
                let labels: Vec<&str> = visible.iter().map(|(_, n)| n.label()).collect();
                c.positions(&labels)
            }
        };

        let links = g
            .edges_iter()
            .filter(|(_, e)| !e.hidden())
            .filter_map(|(e, _)| {
                let (s, t) = g.edge_endpoints(e)?;
                let s = indices.iter().position(|i| *i == s)?;
                let t = indices.iter().position(|i| *i == t)?;
                Some((s, t))
            })
            .collect();

        Self {
            algorithm,
            indices,
            links,
            positions,
            scratch_disp: Vec::new(),
            iteration: 0,
            animate,
            started_at,
            duration,
        }
    }

    pub fn algorithm(&self) -> &LayoutAlgorithm {
        &self.algorithm
    }

    pub fn finished(&self) -> bool {
        self.iteration >= self.algorithm.iterations()
    }

    /// Runs the iterations due at `now` and writes the positions into `g`.
    /// Returns `true` once the run is complete.
    pub fn advance<N: Clone, E: Clone>(&mut self, g: &mut Graph<N, E>, now: f64) -> bool {
        let total = self.algorithm.iterations();
        let target = if self.animate && self.duration > 0. {
            let progress = ((now - self.started_at) / self.duration).clamp(0., 1.);
            ((f64::from(total) * progress).ceil() as u32).min(total)
        } else {
            total
        };

        while self.iteration < target {
            if let LayoutAlgorithm::ForceDirected(fd) = &self.algorithm {
                fd.step(
                    &mut self.positions,
                    &self.links,
                    &mut self.scratch_disp,
                    self.iteration,
                );
            }
            self.iteration += 1;
        }

        for (idx, pos) in self.indices.iter().zip(&self.positions) {
            if let Some(n) = g.node_mut(*idx) {
                if !n.dragged() {
                    n.set_location(*pos);
                }
            }
        }

        self.finished()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn graph() -> Graph<(), ()> {
        let mut g = Graph::new();
        let a = g.add_node_with_label((), "b");
        let b = g.add_node_with_label((), "a");
        let c = g.add_node_with_label((), "c");
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());
        g
    }

    #[test]
    fn run_without_animation_completes_at_once() {
        let mut g = graph();
        let algorithm = LayoutAlgorithm::ForceDirected(ForceDirected::new(ForceDirectedParams {
            iterations: 50,
            ..Default::default()
        }));
        let mut rng = StdRng::seed_from_u64(1);
        let mut run = LayoutRun::with_rng(algorithm, &g, false, 0., 1., &mut rng);

        assert!(run.advance(&mut g, 0.));
        let locations: Vec<_> = g.nodes_iter().map(|(_, n)| n.location()).collect();
        assert!(locations.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn animated_run_spreads_iterations() {
        let mut g = graph();
        let algorithm = LayoutAlgorithm::ForceDirected(ForceDirected::new(ForceDirectedParams {
            iterations: 100,
            ..Default::default()
        }));
        let mut rng = StdRng::seed_from_u64(1);
        let mut run = LayoutRun::with_rng(algorithm, &g, true, 10., 1., &mut rng);

        assert!(!run.advance(&mut g, 10.5));
        assert_eq!(run.iteration, 50);
        assert!(run.advance(&mut g, 11.2));
        assert_eq!(run.iteration, 100);
    }

    #[test]
    fn hidden_nodes_keep_their_location() {
        let mut g = graph();
        let hidden = NodeIndex::new(2);
        g.node_mut(hidden).unwrap().set_location(Pos2::new(999., 999.));
        g.node_mut(hidden).unwrap().set_hidden(true);

        let algorithm = LayoutAlgorithm::Circular(Circular::new().with_fixed_radius(10.));
        let mut run = LayoutRun::new(algorithm, &g, false, 0., 0.);
        assert!(run.advance(&mut g, 0.));

        assert_eq!(run.links, vec![(0, 1)]);
        assert_eq!(g.node(hidden).unwrap().location(), Pos2::new(999., 999.));
        // "a" sorts first and lands at the top
        let top = g.node(NodeIndex::new(1)).unwrap().location();
        assert!(top.distance(Pos2::new(0., -10.)) < 1e-3);
    }
}
