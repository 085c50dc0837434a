use log::debug;
use pathway_graph::{Graph, ViewCommand};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::{
    dataset::{Counts, Dataset},
    detail::NodeDetail,
    filter::{self, Chip, FilterState, Visibility},
    model::{PathwayEdge, PathwayNode},
};

/// Everything the user can ask the explorer to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Search(String),
    Toggle(Chip),
    Reset,
    Fit,
    Relayout,
    TapNode(NodeIndex),
    TapBackground,
    /// Select the node with this id and move the camera to it.
    Select(String),
}

/// Owns the dataset, its graph elements and the filter and selection state.
///
/// Every mutation goes through [`Controller::dispatch`]. Camera and layout
/// requests are queued as [`ViewCommand`]s for the graph view to pick up.
pub struct Controller {
    dataset: Dataset,
    graph: Graph<PathwayNode, PathwayEdge>,

    defaults: FilterState,
    filter: FilterState,
    visibility: Visibility,
    counts: Counts,
    categories: Vec<(String, usize)>,

    selected: Option<NodeIndex>,
    detail: Option<NodeDetail>,

    commands: Vec<ViewCommand>,
    focus_zoom: f32,
    focus_duration: f64,
}

impl Controller {
    /// Builds one graph element per record, in dataset order, and queues the
    /// initial non-animated layout.
    pub fn new(dataset: Dataset, focus_zoom: f32, focus_duration: f64) -> Self {
        let mut graph = Graph::new();
        for node in dataset.nodes() {
            graph.add_node_with_label(node.clone(), node.name.clone());
        }
        for (edge, &(s, t)) in dataset.edges().iter().zip(dataset.links()) {
            graph.add_edge(NodeIndex::new(s), NodeIndex::new(t), edge.clone());
        }

        let categories = dataset.categories();
        let defaults = FilterState::all_active(categories.iter().map(|(c, _)| c.clone()));
        let counts = dataset.counts();

        let mut controller = Self {
            dataset,
            graph,
            filter: defaults.clone(),
            defaults,
            visibility: Visibility::default(),
            counts,
            categories,
            selected: None,
            detail: None,
            commands: vec![ViewCommand::RunLayout { animate: false }],
            focus_zoom,
            focus_duration,
        };
        controller.apply_filters();
        controller
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {action:?}");
        match action {
            Action::Search(text) => {
                self.filter.search = text;
                self.apply_filters();
            }
            Action::Toggle(chip) => {
                self.filter.toggle(&chip);
                self.apply_filters();
            }
            Action::Reset => {
                self.filter = self.defaults.clone();
                self.apply_filters();
                self.clear_selection();
                self.commands.push(ViewCommand::Fit);
            }
            Action::Fit => self.commands.push(ViewCommand::Fit),
            Action::Relayout => self.commands.push(ViewCommand::RunLayout { animate: true }),
            Action::TapNode(idx) => self.select(idx),
            Action::TapBackground => self.clear_selection(),
            Action::Select(id) => {
                let Some(idx) = self.dataset.index_of(&id).map(NodeIndex::new) else {
                    debug!("ignoring selection of unknown node {id}");
                    return;
                };
                self.select(idx);
                self.commands.push(ViewCommand::CenterOn {
                    node: idx,
                    zoom: self.focus_zoom,
                    duration: self.focus_duration,
                });
            }
        }
    }

    /// Commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }

    fn select(&mut self, idx: NodeIndex) {
        let Some(detail) = NodeDetail::build(&self.graph, idx) else {
            return;
        };
        let hood = self.graph.neighborhood(idx);
        self.graph.highlight(&hood);
        self.graph.select_only(Some(idx));
        self.selected = Some(idx);
        self.detail = Some(detail);
    }

    fn clear_selection(&mut self) {
        self.graph.clear_classes();
        self.graph.select_only(None);
        self.selected = None;
        self.detail = None;
    }

    fn apply_filters(&mut self) {
        self.visibility = filter::evaluate(&self.dataset, &self.filter);
        for (i, visible) in self.visibility.nodes.iter().enumerate() {
            if let Some(n) = self.graph.node_mut(NodeIndex::new(i)) {
                n.set_hidden(!visible);
            }
        }
        for (i, visible) in self.visibility.edges.iter().enumerate() {
            if let Some(e) = self.graph.edge_mut(EdgeIndex::new(i)) {
                e.set_hidden(!visible);
            }
        }
        debug!(
            "{} of {} nodes visible, {} edges",
            self.visibility.visible_nodes,
            self.dataset.nodes().len(),
            self.visibility.visible_edges
        );
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn graph(&self) -> &Graph<PathwayNode, PathwayEdge> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph<PathwayNode, PathwayEdge> {
        &mut self.graph
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    pub fn categories(&self) -> &[(String, usize)] {
        &self.categories
    }

    pub fn selected(&self) -> Option<NodeIndex> {
        self.selected
    }

    pub fn detail(&self) -> Option<&NodeDetail> {
        self.detail.as_ref()
    }
}
