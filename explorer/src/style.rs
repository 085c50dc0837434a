//! Visual encodings of pathway nodes. Everything here is a pure function of
//! node attributes.

use egui::{Color32, Stroke};
use pathway_graph::StyleRules;

use crate::model::{BiomarkerStatus, Druggability, PathwayNode};

pub const GREEN: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
pub const BLUE: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const AMBER: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);
pub const GRAY: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
pub const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
pub const DARK_GRAY: Color32 = Color32::from_rgb(0x4b, 0x55, 0x63);
pub const ACCENT: Color32 = Color32::from_rgb(0x4a, 0x9e, 0xff);
pub const EDGE: Color32 = Color32::from_rgb(0x2a, 0x2a, 0x3a);
pub const LABEL: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xe0);
pub const MUTED: Color32 = Color32::from_rgb(0x66, 0x66, 0x66);

const MIN_DIAMETER: f32 = 20.;
const MAX_DIAMETER: f32 = 50.;
const BASE_DIAMETER: f32 = 15.;

pub fn status_color(status: BiomarkerStatus) -> Color32 {
    match status {
        BiomarkerStatus::Validated => GREEN,
        BiomarkerStatus::Established => BLUE,
        BiomarkerStatus::Emerging => AMBER,
        BiomarkerStatus::NoBiomarker | BiomarkerStatus::Other => GRAY,
    }
}

pub fn fill(node: &PathwayNode) -> Color32 {
    status_color(node.biomarker_status)
}

/// `clamp(15 + paper_count, 20, 50)` with a missing count read as zero.
pub fn diameter(node: &PathwayNode) -> f32 {
    (BASE_DIAMETER + node.paper_count.unwrap_or(0.)).clamp(MIN_DIAMETER, MAX_DIAMETER)
}

/// White ring on targets with at least one approved drug.
pub fn border(node: &PathwayNode) -> Option<Stroke> {
    node.has_approved()
        .then_some(Stroke::new(3., Color32::WHITE))
}

/// Icon and color of a biomarker druggability tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub icon: &'static str,
    pub color: Color32,
    pub label: &'static str,
}

pub fn druggability_badge(d: Option<Druggability>) -> Badge {
    let (icon, color) = match d {
        Some(Druggability::High) => ("🎯", GREEN),
        Some(Druggability::Medium) => ("📊", AMBER),
        Some(Druggability::Low) => ("🔬", GRAY),
        Some(Druggability::NotDruggable) => ("❌", RED),
        Some(Druggability::Unknown | Druggability::Other) | None => ("❓", DARK_GRAY),
    };
    let label = match d {
        Some(Druggability::Other) | None => Druggability::Unknown.key(),
        Some(d) => d.key(),
    };
    Badge { icon, color, label }
}

/// Accent color of a pathway category chip.
pub fn category_color(category: &str) -> Color32 {
    let rgb = match category {
        "Inflammasome" => 0xef4444,
        "Pattern Recognition" => 0xf97316,
        "JAK-STAT" => 0x8b5cf6,
        "NF-κB" => 0xec4899,
        "Cytokines" => 0x06b6d4,
        "Interferons" => 0x14b8a6,
        "Chemokines" => 0x84cc16,
        "Chemokine Receptors" => 0xa3e635,
        "Cytokine Receptors" => 0x22d3d1,
        "GPCRs" => 0xfb923c,
        "Kinases" => 0xa855f7,
        "Enzymes" => 0xf472b6,
        "Transcription Factors" => 0x818cf8,
        "Cell Death" => 0xdc2626,
        "Checkpoints" => 0x0ea5e9,
        "Costimulation" => 0x10b981,
        "Adhesion" => 0xfbbf24,
        "Alarmins" => 0xf87171,
        "Metabolism" => 0x34d399,
        "Epigenetics" => 0xc084fc,
        "Ferroptosis" => 0xfb7185,
        "Resolution" => 0x4ade80,
        "Neuroinflammation" => 0x60a5fa,
        "Microbiome" => 0xa78bfa,
        "Complement" => 0xfcd34d,
        "B Cell Targets" => 0x2dd4bf,
        "PI3K-AKT" => 0xc4b5fd,
        "MAPK" => 0xfda4af,
        "Purinergic" => 0x86efac,
        "Antiviral" => 0x7dd3fc,
        _ => return GRAY,
    };
    hex(rgb)
}

fn hex(rgb: u32) -> Color32 {
    let [_, r, g, b] = rgb.to_be_bytes();
    Color32::from_rgb(r, g, b)
}

/// Rules registered on the graph view.
pub fn style_rules() -> StyleRules<PathwayNode> {
    StyleRules::new()
        .with_node_fill(fill)
        .with_node_diameter(diameter)
        .with_node_border(border)
        .with_selected_border(Stroke::new(4., ACCENT))
        .with_edge(Stroke::new(1., EDGE), 0.6)
        .with_edge_highlighted(Stroke::new(2., ACCENT))
        .with_faded_opacity(0.15, 0.05)
        .with_labels(true, 10., LABEL)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn node(value: serde_json::Value) -> PathwayNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn fill_follows_biomarker_status() {
        let mut n = node(json!({"id": "a", "name": "a", "biomarker_status": "validated"}));
        assert_eq!(fill(&n), Color32::from_rgb(0x22, 0xc5, 0x5e));
        n.biomarker_status = BiomarkerStatus::Established;
        assert_eq!(fill(&n), Color32::from_rgb(0x3b, 0x82, 0xf6));
        n.biomarker_status = BiomarkerStatus::Emerging;
        assert_eq!(fill(&n), Color32::from_rgb(0xf5, 0x9e, 0x0b));
        n.biomarker_status = BiomarkerStatus::Other;
        assert_eq!(fill(&n), Color32::from_rgb(0x6b, 0x72, 0x80));
    }

    #[test]
    fn diameter_is_clamped() {
        let mut n = node(json!({"id": "a", "name": "a", "biomarker_status": "none"}));
        assert_eq!(diameter(&n), 20.);
        n.paper_count = Some(12.);
        assert_eq!(diameter(&n), 27.);
        n.paper_count = Some(400.);
        assert_eq!(diameter(&n), 50.);
    }

    #[test]
    fn approved_drugs_get_white_border_unless_selected() {
        let n = node(json!({"id": "a", "name": "a", "biomarker_status": "none",
                            "drugs_approved": ["tocilizumab"]}));
        assert_eq!(border(&n), Some(Stroke::new(3., Color32::WHITE)));

        let rules = style_rules();
        assert_eq!(rules.border(&n, true), Some(Stroke::new(4., ACCENT)));

        let plain = node(json!({"id": "b", "name": "b", "biomarker_status": "none",
                                "drugs_pipeline": ["x"]}));
        assert_eq!(rules.border(&plain, false), None);
    }

    #[test]
    fn druggability_badges() {
        assert_eq!(druggability_badge(Some(Druggability::High)).icon, "🎯");
        assert_eq!(druggability_badge(Some(Druggability::NotDruggable)).color, RED);
        let missing = druggability_badge(None);
        assert_eq!((missing.icon, missing.label), ("❓", "unknown"));
    }

    #[test]
    fn category_palette() {
        assert_eq!(category_color("Inflammasome"), Color32::from_rgb(0xef, 0x44, 0x44));
        assert_eq!(category_color("Antiviral"), Color32::from_rgb(0x7d, 0xd3, 0xfc));
        assert_eq!(category_color("Something New"), GRAY);
    }
}
