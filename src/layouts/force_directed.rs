use egui::{Pos2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Repulsion the force constants are normalized against.
const REFERENCE_REPULSION: f32 = 8000.;
/// Elasticity the force constants are normalized against.
const REFERENCE_ELASTICITY: f32 = 0.45;
const EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceDirectedParams {
    pub node_repulsion: f32,
    pub ideal_edge_length: f32,
    pub edge_elasticity: f32,
    pub gravity: f32,
    pub iterations: u32,
}

impl Default for ForceDirectedParams {
    fn default() -> Self {
        Self {
            node_repulsion: 8000.,
            ideal_edge_length: 100.,
            edge_elasticity: 0.45,
            gravity: 0.25,
            iterations: 2500,
        }
    }
}

impl ForceDirectedParams {
    /// Whether the simulation can run with these parameters.
    pub fn is_valid(&self) -> bool {
        let positive = [
            self.node_repulsion,
            self.ideal_edge_length,
            self.edge_elasticity,
        ];
        positive.iter().all(|v| v.is_finite() && *v > 0.)
            && self.gravity.is_finite()
            && self.gravity >= 0.
            && self.iterations > 0
    }
}

/// Spring-electrical layout: Fruchterman-Reingold forces, a pull toward the
/// canvas origin and a linearly cooling step limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceDirected {
    pub params: ForceDirectedParams,
}

impl ForceDirected {
    pub fn new(params: ForceDirectedParams) -> Self {
        Self { params }
    }

    /// Random start positions in a square whose side grows with the node count.
    pub fn initial_positions<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Pos2> {
        let half = self.params.ideal_edge_length * (n.max(1) as f32).sqrt() / 2.;
        (0..n)
            .map(|_| {
                Pos2::new(
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                )
            })
            .collect()
    }

    /// Advances the simulation by one iteration. `links` index into `positions`.
    pub fn step(
        &self,
        positions: &mut [Pos2],
        links: &[(usize, usize)],
        disp: &mut Vec<Vec2>,
        iteration: u32,
    ) {
        if positions.is_empty() {
            return;
        }

        let p = &self.params;
        let k = p.ideal_edge_length;

        disp.clear();
        disp.resize(positions.len(), Vec2::ZERO);

        compute_repulsion(positions, disp, k, p.node_repulsion / REFERENCE_REPULSION);
        compute_attraction(
            positions,
            links,
            disp,
            k,
            p.edge_elasticity / REFERENCE_ELASTICITY,
        );
        apply_gravity(positions, disp, p.gravity);

        let temperature = self.temperature(iteration);
        apply_displacements(positions, disp, temperature);
    }

    /// Largest distance a node may move during `iteration`.
    pub fn temperature(&self, iteration: u32) -> f32 {
        let total = self.params.iterations.max(1) as f32;
        let progress = (iteration as f32 / total).min(1.);
        let start = self.params.ideal_edge_length * 2.;
        (start * (1. - progress)).max(0.5)
    }
}

pub(crate) fn compute_repulsion(positions: &[Pos2], disp: &mut [Vec2], k: f32, c_repulse: f32) {
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let mut delta = positions[i] - positions[j];
            if delta.length() < EPSILON {
                // coincident nodes get pushed apart along a fixed axis
                delta = Vec2::new(EPSILON, 0.);
            }
            let distance = delta.length().max(EPSILON);
            let force = c_repulse * (k * k) / distance;
            let dir = delta / distance;
            disp[i] += dir * force;
            disp[j] -= dir * force;
        }
    }
}

pub(crate) fn compute_attraction(
    positions: &[Pos2],
    links: &[(usize, usize)],
    disp: &mut [Vec2],
    k: f32,
    c_attract: f32,
) {
    for &(a, b) in links {
        if a == b {
            continue;
        }
        let delta = positions[a] - positions[b];
        let distance = delta.length().max(EPSILON);
        let force = c_attract * (distance * distance) / k;
        let dir = delta / distance;
        disp[a] -= dir * force;
        disp[b] += dir * force;
    }
}

pub(crate) fn apply_gravity(positions: &[Pos2], disp: &mut [Vec2], c: f32) {
    if c == 0. {
        return;
    }
    for (d, pos) in disp.iter_mut().zip(positions) {
        *d -= pos.to_vec2() * c;
    }
}

pub(crate) fn apply_displacements(positions: &mut [Pos2], disp: &[Vec2], temperature: f32) {
    for (pos, d) in positions.iter_mut().zip(disp) {
        let len = d.length();
        if len < EPSILON || !len.is_finite() {
            continue;
        }
        *pos += *d / len * len.min(temperature);
    }
}
