use std::collections::BTreeSet;

use crate::{
    dataset::Dataset,
    model::{BiomarkerStatus, DrugStatus, Druggability, PathwayNode},
};

/// One toggleable filter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chip {
    Biomarker(BiomarkerStatus),
    Drug(DrugStatus),
    Druggability(Druggability),
    Category(String),
}

/// Accepted values per filter dimension plus the search text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub biomarker: BTreeSet<BiomarkerStatus>,
    pub drugs: BTreeSet<DrugStatus>,
    pub druggability: BTreeSet<Druggability>,
    pub categories: BTreeSet<String>,
}

impl FilterState {
    /// Every known value active, empty search.
    pub fn all_active(categories: impl IntoIterator<Item = String>) -> Self {
        Self {
            search: String::new(),
            biomarker: BiomarkerStatus::ALL.into_iter().collect(),
            drugs: DrugStatus::ALL.into_iter().collect(),
            druggability: Druggability::ALL.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }

    pub fn is_active(&self, chip: &Chip) -> bool {
        match chip {
            Chip::Biomarker(s) => self.biomarker.contains(s),
            Chip::Drug(d) => self.drugs.contains(d),
            Chip::Druggability(d) => self.druggability.contains(d),
            Chip::Category(c) => self.categories.contains(c),
        }
    }

    pub fn toggle(&mut self, chip: &Chip) {
        fn flip<T: Ord + Clone>(set: &mut BTreeSet<T>, value: &T) {
            if !set.remove(value) {
                set.insert(value.clone());
            }
        }

        match chip {
            Chip::Biomarker(s) => flip(&mut self.biomarker, s),
            Chip::Drug(d) => flip(&mut self.drugs, d),
            Chip::Druggability(d) => flip(&mut self.druggability, d),
            Chip::Category(c) => flip(&mut self.categories, c),
        }
    }
}

/// Whether `node` passes every rule of `filter`.
pub fn is_node_visible(node: &PathwayNode, filter: &FilterState) -> bool {
    matches_search(node, &filter.search)
        && filter.biomarker.contains(&node.biomarker_status)
        && matches_drugs(node, &filter.drugs)
        && matches_druggability(node.druggability(), &filter.druggability)
        && filter.categories.contains(&node.category)
}

fn matches_search(node: &PathwayNode, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    node.name.to_lowercase().contains(&needle)
        || node
            .gene()
            .is_some_and(|g| g.to_lowercase().contains(&needle))
        || node.id.to_lowercase().contains(&needle)
}

fn matches_drugs(node: &PathwayNode, active: &BTreeSet<DrugStatus>) -> bool {
    let approved = node.has_approved();
    let pipeline = node.has_pipeline();

    (active.contains(&DrugStatus::Approved) && approved)
        || (active.contains(&DrugStatus::Pipeline) && pipeline)
        || (active.contains(&DrugStatus::NoDrugs) && !approved && !pipeline)
}

/// The `unknown` option also admits confirmed non-druggable targets.
fn matches_druggability(value: Druggability, active: &BTreeSet<Druggability>) -> bool {
    active.contains(&value)
        || (active.contains(&Druggability::Unknown)
            && matches!(value, Druggability::Unknown | Druggability::NotDruggable))
}

/// Result of one filter pass over a dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    pub nodes: Vec<bool>,
    /// Parallel to the dataset edges. An edge is visible iff both endpoints are.
    pub edges: Vec<bool>,
    pub visible_nodes: usize,
    pub visible_edges: usize,
}

pub fn evaluate(dataset: &Dataset, filter: &FilterState) -> Visibility {
    let nodes: Vec<bool> = dataset
        .nodes()
        .iter()
        .map(|n| is_node_visible(n, filter))
        .collect();
    let edges: Vec<bool> = dataset
        .links()
        .iter()
        .map(|&(s, t)| nodes[s] && nodes[t])
        .collect();

    Visibility {
        visible_nodes: nodes.iter().filter(|v| **v).count(),
        visible_edges: edges.iter().filter(|v| **v).count(),
        nodes,
        edges,
    }
}
