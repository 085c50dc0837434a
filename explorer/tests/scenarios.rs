use pathway_explorer::{
    filter::Chip,
    model::{PathwayEdge, PathwayNode},
    Action, Controller, Dataset,
};
use petgraph::stable_graph::NodeIndex;
use serde_json::json;

fn dataset(nodes: serde_json::Value, edges: serde_json::Value) -> Dataset {
    let nodes: Vec<PathwayNode> = serde_json::from_value(nodes).unwrap();
    let edges: Vec<PathwayEdge> = serde_json::from_value(edges).unwrap();
    Dataset::new(nodes, edges)
}

#[test]
fn toggling_a_category_hides_its_nodes_and_edges() {
    let mut c = Controller::new(
        dataset(
            json!([
                {"id": "n1", "name": "One", "category": "A", "biomarker_status": "validated"},
                {"id": "n2", "name": "Two", "category": "B", "biomarker_status": "validated"}
            ]),
            json!([{"id": 1, "source": "n1", "target": "n2"}]),
        ),
        1.5,
        0.3,
    );
    assert_eq!(c.visibility().visible_edges, 1);

    c.dispatch(Action::Toggle(Chip::Category("B".into())));

    let v = c.visibility();
    assert_eq!(v.nodes, vec![true, false]);
    assert_eq!(v.edges, vec![false]);
    assert_eq!((v.visible_nodes, v.visible_edges), (1, 0));
}

#[test]
fn isolated_node_has_no_connections() {
    let mut c = Controller::new(
        dataset(
            json!([{"id": "solo", "name": "Solo", "category": "Enzymes", "biomarker_status": "none"}]),
            json!([]),
        ),
        1.5,
        0.3,
    );

    c.dispatch(Action::TapNode(NodeIndex::new(0)));
    let d = c.detail().unwrap();
    assert!(d.biomarkers.is_empty() && d.drugs.is_empty());
    assert!(d.upstream.is_empty() && d.downstream.is_empty());
}

#[test]
fn background_tap_after_selection_clears_everything() {
    let mut c = Controller::new(
        dataset(
            json!([
                {"id": "a", "name": "A", "category": "X", "biomarker_status": "none"},
                {"id": "b", "name": "B", "category": "X", "biomarker_status": "none"},
                {"id": "c", "name": "C", "category": "X", "biomarker_status": "none"}
            ]),
            json!([{"id": 1, "source": "a", "target": "b"}]),
        ),
        1.5,
        0.3,
    );

    c.dispatch(Action::Select("a".into()));
    assert!(c.graph().node(NodeIndex::new(2)).unwrap().faded());

    c.dispatch(Action::TapBackground);
    assert!(c.detail().is_none());
    assert!(c
        .graph()
        .nodes_iter()
        .all(|(_, n)| n.classes().is_empty() && !n.selected()));
    assert!(c.graph().edges_iter().all(|(_, e)| e.classes().is_empty()));
}
