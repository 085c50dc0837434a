use std::collections::{BTreeMap, HashMap};

use log::warn;

use crate::model::{BiomarkerStatus, Druggability, PathwayEdge, PathwayNode};

/// Summary counts shown next to the filter chips.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub by_status: BTreeMap<BiomarkerStatus, usize>,
    /// `Unknown` also counts `none` and missing values.
    pub by_druggability: BTreeMap<Druggability, usize>,
}

impl Counts {
    pub fn status(&self, status: BiomarkerStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }

    pub fn druggability(&self, d: Druggability) -> usize {
        self.by_druggability.get(&d).copied().unwrap_or_default()
    }
}

/// Immutable node/edge collections with resolved edge endpoints.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    nodes: Vec<PathwayNode>,
    edges: Vec<PathwayEdge>,
    /// `(source, target)` node positions, parallel to `edges`.
    links: Vec<(usize, usize)>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Builds the dataset, dropping records that break referential integrity:
    /// nodes repeating an earlier id and edges with an unknown endpoint.
    pub fn new(nodes: Vec<PathwayNode>, edges: Vec<PathwayEdge>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut kept_nodes = Vec::with_capacity(nodes.len());
        for node in nodes {
            if index.contains_key(&node.id) {
                warn!("dropping node with duplicate id {}", node.id);
                continue;
            }
            index.insert(node.id.clone(), kept_nodes.len());
            kept_nodes.push(node);
        }

        let mut kept_edges = Vec::with_capacity(edges.len());
        let mut links = Vec::with_capacity(edges.len());
        for edge in edges {
            match (index.get(&edge.source), index.get(&edge.target)) {
                (Some(&s), Some(&t)) => {
                    links.push((s, t));
                    kept_edges.push(edge);
                }
                _ => warn!(
                    "dropping edge {} ({} -> {}): unknown endpoint",
                    edge.id, edge.source, edge.target
                ),
            }
        }

        Self {
            nodes: kept_nodes,
            edges: kept_edges,
            links,
            index,
        }
    }

    pub fn nodes(&self) -> &[PathwayNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PathwayEdge] {
        &self.edges
    }

    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    pub fn node(&self, i: usize) -> Option<&PathwayNode> {
        self.nodes.get(i)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Categories with their member counts, most populated first. Ties keep
    /// the order in which the category first appears.
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut res: Vec<(String, usize)> = Vec::new();
        for node in &self.nodes {
            match res.iter_mut().find(|(c, _)| *c == node.category) {
                Some((_, count)) => *count += 1,
                None => res.push((node.category.clone(), 1)),
            }
        }
        res.sort_by(|a, b| b.1.cmp(&a.1));
        res
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts {
            total: self.nodes.len(),
            ..Default::default()
        };
        for node in &self.nodes {
            *counts.by_status.entry(node.biomarker_status).or_default() += 1;

            let bucket = match node.druggability() {
                Druggability::NotDruggable => Druggability::Unknown,
                d => d,
            };
            *counts.by_druggability.entry(bucket).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, category: &str) -> PathwayNode {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": id, "category": category, "biomarker_status": "none"
        }))
        .unwrap()
    }

    fn edge(id: i64, source: &str, target: &str) -> PathwayEdge {
        serde_json::from_value(serde_json::json!({
            "id": id, "source": source, "target": target
        }))
        .unwrap()
    }

    #[test]
    fn dangling_edges_and_duplicate_nodes_are_dropped() {
        let ds = Dataset::new(
            vec![node("A", "X"), node("B", "X"), node("A", "Y")],
            vec![edge(1, "A", "B"), edge(2, "A", "missing"), edge(3, "B", "A")],
        );

        assert_eq!(ds.nodes().len(), 2);
        assert_eq!(ds.node(0).unwrap().category, "X");
        assert_eq!(ds.edges().len(), 2);
        assert_eq!(ds.links(), &[(0, 1), (1, 0)]);
        assert_eq!(ds.index_of("B"), Some(1));
        assert_eq!(ds.index_of("missing"), None);
    }

    #[test]
    fn categories_sort_by_count_then_first_appearance() {
        let ds = Dataset::new(
            vec![
                node("1", "Kinases"),
                node("2", "Cytokines"),
                node("3", "Enzymes"),
                node("4", "Cytokines"),
                node("5", "Kinases"),
                node("6", "Inflammasome"),
            ],
            vec![],
        );

        assert_eq!(
            ds.categories(),
            vec![
                ("Kinases".to_string(), 2),
                ("Cytokines".to_string(), 2),
                ("Enzymes".to_string(), 1),
                ("Inflammasome".to_string(), 1),
            ]
        );
    }

    #[test]
    fn unknown_druggability_count_absorbs_none_and_missing() {
        let mut high = node("H", "X");
        high.best_druggability = Some(Druggability::High);
        let mut none = node("N", "X");
        none.best_druggability = Some(Druggability::NotDruggable);
        let missing = node("M", "X");
        let mut validated = node("V", "X");
        validated.biomarker_status = BiomarkerStatus::Validated;

        let counts = Dataset::new(vec![high, none, missing, validated], vec![]).counts();

        assert_eq!(counts.total, 4);
        assert_eq!(counts.druggability(Druggability::High), 1);
        assert_eq!(counts.druggability(Druggability::Unknown), 3);
        assert_eq!(counts.druggability(Druggability::NotDruggable), 0);
        assert_eq!(counts.status(BiomarkerStatus::NoBiomarker), 3);
        assert_eq!(counts.status(BiomarkerStatus::Validated), 1);
    }
}
