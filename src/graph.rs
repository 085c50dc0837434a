use egui::{Pos2, Rect};
use petgraph::{
    stable_graph::{EdgeIndex, NodeIndex, StableGraph},
    visit::EdgeRef,
    Directed, Direction,
};

use crate::elements::{Class, Edge, Node};

type StableGraphType<N, E> = StableGraph<Node<N>, Edge<E>, Directed>;

/// Closed neighborhood of a node: the node itself, every node adjacent to it
/// by an edge in either direction and the edges connecting them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighborhood {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<EdgeIndex>,
}

/// Wrapper around [`petgraph::stable_graph::StableGraph`] compatible with [`super::GraphView`].
/// It is used to store graph data and provide access to it.
#[derive(Debug, Clone)]
pub struct Graph<N: Clone, E: Clone> {
    g: StableGraphType<N, E>,
}

impl<N: Clone, E: Clone> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            g: StableGraph::default(),
        }
    }
}

impl<N: Clone, E: Clone> Graph<N, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn g(&self) -> &StableGraphType<N, E> {
        &self.g
    }

    pub fn g_mut(&mut self) -> &mut StableGraphType<N, E> {
        &mut self.g
    }

    /// Adds node to graph with an empty label at the canvas origin.
    pub fn add_node(&mut self, payload: N) -> NodeIndex {
        self.g.add_node(Node::new(payload))
    }

    pub fn add_node_with_label(&mut self, payload: N, label: impl Into<String>) -> NodeIndex {
        self.g.add_node(Node::new(payload).with_label(label))
    }

    pub fn add_edge(&mut self, start: NodeIndex, end: NodeIndex, payload: E) -> EdgeIndex {
        self.g.add_edge(start, end, Edge::new(payload))
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&Node<N>> {
        self.g.node_weight(idx)
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> Option<&mut Node<N>> {
        self.g.node_weight_mut(idx)
    }

    pub fn edge(&self, idx: EdgeIndex) -> Option<&Edge<E>> {
        self.g.edge_weight(idx)
    }

    pub fn edge_mut(&mut self, idx: EdgeIndex) -> Option<&mut Edge<E>> {
        self.g.edge_weight_mut(idx)
    }

    pub fn edge_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.g.edge_endpoints(idx)
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = (NodeIndex, &Node<N>)> {
        self.g
            .node_indices()
            .filter_map(|idx| self.g.node_weight(idx).map(|n| (idx, n)))
    }

    pub fn edges_iter(&self) -> impl Iterator<Item = (EdgeIndex, &Edge<E>)> {
        self.g
            .edge_indices()
            .filter_map(|idx| self.g.edge_weight(idx).map(|e| (idx, e)))
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.g.edge_count()
    }

    /// Closed neighborhood of `idx`. Includes hidden elements, ordered by index.
    pub fn neighborhood(&self, idx: NodeIndex) -> Neighborhood {
        if self.g.node_weight(idx).is_none() {
            return Neighborhood::default();
        }

        let mut nodes = vec![idx];
        let mut edges = Vec::new();
        for e in self
            .g
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.g.edges_directed(idx, Direction::Incoming))
        {
            let other = if e.source() == idx {
                e.target()
            } else {
                e.source()
            };
            if !nodes.contains(&other) {
                nodes.push(other);
            }
            if !edges.contains(&e.id()) {
                edges.push(e.id());
            }
        }
        nodes[1..].sort_unstable();
        edges.sort_unstable();

        Neighborhood { nodes, edges }
    }

    /// Distinct sources of edges pointing at `idx`, in edge insertion order.
    pub fn incomers(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.adjacent(idx, Direction::Incoming)
    }

    /// Distinct targets of edges leaving `idx`, in edge insertion order.
    pub fn outgoers(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.adjacent(idx, Direction::Outgoing)
    }

    fn adjacent(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut res = Vec::new();
        for e in self.g.edge_indices() {
            let Some((source, target)) = self.g.edge_endpoints(e) else {
                continue;
            };
            let other = match dir {
                Direction::Incoming if target == idx => source,
                Direction::Outgoing if source == idx => target,
                _ => continue,
            };
            if !res.contains(&other) {
                res.push(other);
            }
        }
        res
    }

    /// Removes every class from every element.
    pub fn clear_classes(&mut self) {
        for n in self.g.node_weights_mut() {
            n.classes_mut().clear();
        }
        for e in self.g.edge_weights_mut() {
            e.classes_mut().clear();
        }
    }

    /// Marks every element outside `hood` as faded and every edge inside it as highlighted.
    pub fn highlight(&mut self, hood: &Neighborhood) {
        self.clear_classes();

        let indices: Vec<_> = self.g.node_indices().collect();
        for idx in indices {
            if !hood.nodes.contains(&idx) {
                if let Some(n) = self.g.node_weight_mut(idx) {
                    n.classes_mut().add(Class::Faded);
                }
            }
        }

        let indices: Vec<_> = self.g.edge_indices().collect();
        for idx in indices {
            let class = if hood.edges.contains(&idx) {
                Class::Highlighted
            } else {
                Class::Faded
            };
            if let Some(e) = self.g.edge_weight_mut(idx) {
                e.classes_mut().add(class);
            }
        }
    }

    /// Selects a single node, deselecting every other one. `None` clears the selection.
    pub fn select_only(&mut self, idx: Option<NodeIndex>) {
        let indices: Vec<_> = self.g.node_indices().collect();
        for i in indices {
            if let Some(n) = self.g.node_weight_mut(i) {
                n.set_selected(Some(i) == idx);
            }
        }
    }

    /// Bounds of the visible nodes in canvas coordinates, inflated by each node's radius.
    pub fn visible_bounds(&self, radius_of: impl Fn(&Node<N>) -> f32) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for (_, n) in self.nodes_iter().filter(|(_, n)| !n.hidden()) {
            let r = radius_of(n);
            let rect = Rect::from_center_size(n.location(), egui::vec2(r * 2., r * 2.));
            bounds = Some(match bounds {
                Some(b) => b.union(rect),
                None => rect,
            });
        }
        bounds
    }

    /// Finds the topmost visible node covering `pos` (canvas coordinates).
    /// Can be optimized by using a spatial index like quad-tree if needed.
    pub fn node_at(&self, pos: Pos2, radius_of: impl Fn(&Node<N>) -> f32) -> Option<NodeIndex> {
        let mut found = None;
        for (idx, n) in self.nodes_iter().filter(|(_, n)| !n.hidden()) {
            if n.location().distance(pos) <= radius_of(n) {
                found = Some(idx);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Graph<&'static str, ()>, Vec<NodeIndex>) {
        let mut g = Graph::new();
        let a = g.add_node_with_label("a", "a");
        let b = g.add_node_with_label("b", "b");
        let c = g.add_node_with_label("c", "c");
        let d = g.add_node_with_label("d", "d");
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());
        g.add_edge(a, b, ());
        (g, vec![a, b, c, d])
    }

    #[test]
    fn neighborhood_is_closed_and_direction_agnostic() {
        let (g, idx) = chain();
        let hood = g.neighborhood(idx[1]);
        assert_eq!(hood.nodes, vec![idx[1], idx[0], idx[2]]);
        assert_eq!(hood.edges.len(), 3);

        let lonely = g.neighborhood(idx[3]);
        assert_eq!(lonely.nodes, vec![idx[3]]);
        assert!(lonely.edges.is_empty());
    }

    #[test]
    fn incomers_and_outgoers_are_deduplicated() {
        let (g, idx) = chain();
        assert_eq!(g.incomers(idx[1]), vec![idx[0]]);
        assert_eq!(g.outgoers(idx[1]), vec![idx[2]]);
        assert!(g.incomers(idx[0]).is_empty());
        assert!(g.outgoers(idx[3]).is_empty());
    }

    #[test]
    fn highlight_fades_everything_outside() {
        let (mut g, idx) = chain();
        let hood = g.neighborhood(idx[2]);
        g.highlight(&hood);

        assert!(!g.node(idx[1]).unwrap().faded());
        assert!(!g.node(idx[2]).unwrap().faded());
        assert!(g.node(idx[0]).unwrap().faded());
        assert!(g.node(idx[3]).unwrap().faded());

        let highlighted = g.edges_iter().filter(|(_, e)| e.highlighted()).count();
        let faded = g.edges_iter().filter(|(_, e)| e.faded()).count();
        assert_eq!((highlighted, faded), (1, 2));

        g.clear_classes();
        assert!(g.nodes_iter().all(|(_, n)| n.classes().is_empty()));
    }

    #[test]
    fn bounds_and_hit_test_skip_hidden_nodes() {
        let (mut g, idx) = chain();
        g.node_mut(idx[0]).unwrap().set_location(Pos2::new(-100., 0.));
        g.node_mut(idx[1]).unwrap().set_location(Pos2::new(100., 50.));
        g.node_mut(idx[2]).unwrap().set_location(Pos2::new(500., 500.));
        g.node_mut(idx[2]).unwrap().set_hidden(true);
        g.node_mut(idx[3]).unwrap().set_hidden(true);

        let b = g.visible_bounds(|_| 10.).unwrap();
        assert_eq!(b.min, Pos2::new(-110., -10.));
        assert_eq!(b.max, Pos2::new(110., 60.));

        assert_eq!(g.node_at(Pos2::new(95., 45.), |_| 10.), Some(idx[1]));
        assert_eq!(g.node_at(Pos2::new(500., 500.), |_| 10.), None);
    }

    #[test]
    fn select_only_keeps_single_selection() {
        let (mut g, idx) = chain();
        g.select_only(Some(idx[0]));
        g.select_only(Some(idx[2]));
        let selected: Vec<_> = g
            .nodes_iter()
            .filter(|(_, n)| n.selected())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(selected, vec![idx[2]]);

        g.select_only(None);
        assert!(g.nodes_iter().all(|(_, n)| !n.selected()));
    }
}
