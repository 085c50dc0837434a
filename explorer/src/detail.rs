use egui::{Color32, RichText, Ui};
use pathway_graph::Graph;
use petgraph::stable_graph::NodeIndex;

use crate::{
    model::{Biomarker, PathwayEdge, PathwayNode},
    style::{self, Badge},
    ui_consts::{DETAIL_SECTION_SPACING, HEADING_TEXT_SIZE, META_TEXT_SIZE},
};

pub const NO_BIOMARKERS: &str = "No PD biomarkers identified";
pub const NO_DRUGS: &str = "No drugs in development";
pub const NO_CONNECTIONS: &str = "None";

#[derive(Clone, Debug, PartialEq)]
pub struct BiomarkerRow {
    pub name: String,
    pub badge: Badge,
    pub validation: String,
    /// Type and notes joined with a bullet.
    pub meta: Option<String>,
    /// Assay with its sensitivity in parentheses. Absent for unknown assays.
    pub assay: Option<String>,
    pub assay_notes: Option<String>,
}

impl BiomarkerRow {
    fn new(b: &Biomarker) -> Self {
        let meta: Vec<&str> = [b.kind.as_deref(), b.notes.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        let assay = b
            .assay
            .as_deref()
            .filter(|a| !a.is_empty() && *a != "Unknown")
            .map(|a| match b.assay_sensitivity.as_deref() {
                Some(s) if !s.is_empty() => format!("{a} ({s})"),
                _ => a.to_string(),
            });

        Self {
            name: b.name.clone(),
            badge: style::druggability_badge(b.druggability),
            validation: b.validation.label().to_string(),
            meta: (!meta.is_empty()).then(|| meta.join(" • ")),
            assay,
            assay_notes: b.assay_notes.clone().filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrugRow {
    Approved(String),
    Pipeline(String),
}

/// Neighbor entry; clicking it selects the node with `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub id: String,
    pub name: String,
}

/// Read-only inspector content of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetail {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub category: String,
    pub gene: Option<String>,
    pub biomarkers: Vec<BiomarkerRow>,
    pub drugs: Vec<DrugRow>,
    pub upstream: Vec<Connection>,
    pub downstream: Vec<Connection>,
}

impl NodeDetail {
    pub fn build(g: &Graph<PathwayNode, PathwayEdge>, idx: NodeIndex) -> Option<Self> {
        let node = g.node(idx)?.payload();

        let to_connections = |indices: Vec<NodeIndex>| -> Vec<Connection> {
            indices
                .into_iter()
                .filter_map(|i| g.node(i))
                .map(|n| Connection {
                    id: n.payload().id.clone(),
                    name: n.payload().name.clone(),
                })
                .collect()
        };

        Some(Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind.clone(),
            category: node.category.clone(),
            gene: node.gene().map(ToString::to_string),
            biomarkers: node.biomarkers.iter().map(BiomarkerRow::new).collect(),
            drugs: node
                .drugs_approved
                .iter()
                .cloned()
                .map(DrugRow::Approved)
                .chain(node.drugs_pipeline.iter().cloned().map(DrugRow::Pipeline))
                .collect(),
            upstream: to_connections(g.incomers(idx)),
            downstream: to_connections(g.outgoers(idx)),
        })
    }
}

/// Renders the inspector. Returns the id of a clicked neighbor.
pub fn show(ui: &mut Ui, detail: Option<&NodeDetail>) -> Option<String> {
    let Some(d) = detail else {
        ui.add_space(DETAIL_SECTION_SPACING * 4.);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Click a node to see its details").color(style::MUTED));
        });
        return None;
    };

    let mut clicked = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.label(RichText::new(&d.name).size(HEADING_TEXT_SIZE).strong());
        ui.label(format!("{} • {}", d.kind, d.category));
        if let Some(gene) = &d.gene {
            ui.label(RichText::new(format!("Gene: {gene}")).color(style::MUTED));
        }

        section(ui, "PD Biomarkers");
        if d.biomarkers.is_empty() {
            placeholder(ui, NO_BIOMARKERS);
        }
        for b in &d.biomarkers {
            biomarker(ui, b);
        }

        section(ui, "Drugs");
        if d.drugs.is_empty() {
            placeholder(ui, NO_DRUGS);
        }
        for drug in &d.drugs {
            match drug {
                DrugRow::Approved(name) => ui.label(format!("💊 {name}")),
                DrugRow::Pipeline(name) => ui.label(RichText::new(format!("🧪 {name}")).italics()),
            };
        }

        section(ui, "Upstream");
        clicked = connections(ui, &d.upstream).or(clicked.take());
        section(ui, "Downstream");
        clicked = connections(ui, &d.downstream).or(clicked.take());
    });
    clicked
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(DETAIL_SECTION_SPACING);
    ui.separator();
    ui.label(RichText::new(title).strong());
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(META_TEXT_SIZE).color(style::MUTED));
}

fn biomarker(ui: &mut Ui, b: &BiomarkerRow) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&b.name).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{} {}", b.badge.icon, b.badge.label))
                        .size(META_TEXT_SIZE)
                        .color(b.badge.color),
                )
                .on_hover_text(format!("Druggability: {}", b.badge.label));
            });
        });

        let mut meta = b.validation.clone();
        if let Some(extra) = &b.meta {
            meta = format!("{meta} • {extra}");
        }
        ui.label(RichText::new(meta).size(META_TEXT_SIZE).color(Color32::GRAY));

        if let Some(assay) = &b.assay {
            ui.label(
                RichText::new(format!("📋 {assay}"))
                    .size(META_TEXT_SIZE)
                    .color(style::ACCENT),
            );
        }
        if let Some(notes) = &b.assay_notes {
            ui.label(RichText::new(notes).size(META_TEXT_SIZE).italics());
        }
    });
}

fn connections(ui: &mut Ui, list: &[Connection]) -> Option<String> {
    if list.is_empty() {
        placeholder(ui, NO_CONNECTIONS);
        return None;
    }
    let mut clicked = None;
    for c in list {
        if ui.link(c.name.as_str()).on_hover_text(c.id.as_str()).clicked() {
            clicked = Some(c.id.clone());
        }
    }
    clicked
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn graph() -> Graph<PathwayNode, PathwayEdge> {
        let mut g = Graph::new();
        let nodes = [
            json!({"id": "TLR4", "name": "TLR4", "type": "receptor", "category": "Pattern Recognition",
                   "biomarker_status": "validated", "gene": "TLR4",
                   "drugs_approved": ["eritoran"], "drugs_pipeline": ["TAK-242"],
                   "pd_biomarkers": [
                       {"name": "IL-6", "validation": "validated", "druggability": "high",
                        "type": "cytokine", "assay": "ELISA", "assay_sensitivity": "1 pg/mL",
                        "assay_notes": "serum"},
                       {"name": "CRP", "validation": "established", "assay": "Unknown"}
                   ]}),
            json!({"id": "MYD88", "name": "MyD88", "category": "Pattern Recognition",
                   "biomarker_status": "none"}),
            json!({"id": "LPS", "name": "LPS", "category": "Pattern Recognition",
                   "biomarker_status": "none"}),
            json!({"id": "ALONE", "name": "Alone", "category": "Enzymes",
                   "biomarker_status": "none"}),
        ];
        let idx: Vec<_> = nodes
            .into_iter()
            .map(|v| {
                let n: PathwayNode = serde_json::from_value(v).unwrap();
                let label = n.name.clone();
                g.add_node_with_label(n, label)
            })
            .collect();
        let edge = |id: i64, s: &str, t: &str| -> PathwayEdge {
            serde_json::from_value(json!({"id": id, "source": s, "target": t})).unwrap()
        };
        g.add_edge(idx[2], idx[0], edge(1, "LPS", "TLR4"));
        g.add_edge(idx[0], idx[1], edge(2, "TLR4", "MYD88"));
        g.add_edge(idx[0], idx[1], edge(3, "TLR4", "MYD88"));
        g
    }

    #[test]
    fn detail_lists_biomarkers_drugs_and_neighbors() {
        let g = graph();
        let d = NodeDetail::build(&g, NodeIndex::new(0)).unwrap();

        assert_eq!(d.gene.as_deref(), Some("TLR4"));
        assert_eq!(d.biomarkers.len(), 2);
        assert_eq!(d.biomarkers[0].assay.as_deref(), Some("ELISA (1 pg/mL)"));
        assert_eq!(d.biomarkers[0].meta.as_deref(), Some("cytokine"));
        assert_eq!(d.biomarkers[0].badge.icon, "🎯");
        assert_eq!(d.biomarkers[1].assay, None);
        assert_eq!(d.biomarkers[1].badge.icon, "❓");
        assert_eq!(
            d.drugs,
            vec![
                DrugRow::Approved("eritoran".into()),
                DrugRow::Pipeline("TAK-242".into())
            ]
        );
        assert_eq!(
            d.upstream,
            vec![Connection {
                id: "LPS".into(),
                name: "LPS".into()
            }]
        );
        assert_eq!(d.downstream.len(), 1);
        assert_eq!(d.downstream[0].id, "MYD88");
    }

    #[test]
    fn isolated_node_has_empty_connection_lists() {
        let g = graph();
        let d = NodeDetail::build(&g, NodeIndex::new(3)).unwrap();
        assert!(d.upstream.is_empty() && d.downstream.is_empty());
        assert!(d.biomarkers.is_empty() && d.drugs.is_empty());
        assert!(NodeDetail::build(&g, NodeIndex::new(42)).is_none());
    }
}
