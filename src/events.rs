use petgraph::stable_graph::NodeIndex;

/// Events published by [`crate::GraphView`] to the channel passed with
/// [`crate::GraphView::with_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A visible node was clicked.
    NodeTap(NodeIndex),
    /// The canvas was clicked outside of every visible node.
    BackgroundTap,
    /// A layout run completed and the view was fitted to the result.
    LayoutFinished { algorithm: &'static str },
}

/// Requests executed by [`crate::GraphView`] on its next frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCommand {
    /// Fit every visible node into the viewport without moving nodes.
    Fit,
    /// Animate the camera to center `node` at `zoom` over `duration` seconds.
    CenterOn {
        node: NodeIndex,
        zoom: f32,
        duration: f64,
    },
    /// Recompute positions of the visible nodes and fit when done.
    RunLayout { animate: bool },
}
