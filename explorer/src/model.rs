use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Validation tier of a node's pharmacodynamic biomarkers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomarkerStatus {
    Validated,
    Established,
    Emerging,
    #[default]
    #[serde(rename = "none")]
    NoBiomarker,
    /// Any value the viewer does not know about.
    #[serde(other)]
    Other,
}

impl BiomarkerStatus {
    pub const ALL: [Self; 4] = [
        Self::Validated,
        Self::Established,
        Self::Emerging,
        Self::NoBiomarker,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Established => "established",
            Self::Emerging => "emerging",
            Self::NoBiomarker => "none",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Validated => "Validated",
            Self::Established => "Established",
            Self::Emerging => "Emerging",
            Self::NoBiomarker => "None",
            Self::Other => "Other",
        }
    }
}

/// How tractable a target is for drug development.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Druggability {
    High,
    Medium,
    Low,
    Unknown,
    /// Confirmed non-druggable.
    #[serde(rename = "none")]
    NotDruggable,
    #[serde(other)]
    Other,
}

impl Druggability {
    pub const ALL: [Self; 5] = [
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Unknown,
        Self::NotDruggable,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
            Self::NotDruggable => "none",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
            Self::NotDruggable => "None",
            Self::Other => "Other",
        }
    }
}

/// Drug development stage used by the drug filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrugStatus {
    Approved,
    Pipeline,
    NoDrugs,
}

impl DrugStatus {
    pub const ALL: [Self; 3] = [Self::Approved, Self::Pipeline, Self::NoDrugs];

    pub fn key(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pipeline => "pipeline",
            Self::NoDrugs => "no-drugs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Pipeline => "Pipeline",
            Self::NoDrugs => "No drugs",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Biomarker {
    pub name: String,
    #[serde(default)]
    pub validation: BiomarkerStatus,
    #[serde(default)]
    pub druggability: Option<Druggability>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assay: Option<String>,
    #[serde(default)]
    pub assay_sensitivity: Option<String>,
    #[serde(default)]
    pub assay_notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathwayNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub gene: Option<String>,
    /// Missing status is never admitted by the biomarker filter.
    #[serde(default = "unknown_status")]
    pub biomarker_status: BiomarkerStatus,
    #[serde(rename = "pd_biomarkers", default, deserialize_with = "null_as_empty")]
    pub biomarkers: Vec<Biomarker>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub drugs_approved: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub drugs_pipeline: Vec<String>,
    #[serde(default)]
    pub best_druggability: Option<Druggability>,
    #[serde(default)]
    pub paper_count: Option<f32>,
}

fn unknown_status() -> BiomarkerStatus {
    BiomarkerStatus::Other
}

/// Reads an explicit `null` list as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl PathwayNode {
    pub fn has_approved(&self) -> bool {
        !self.drugs_approved.is_empty()
    }

    pub fn has_pipeline(&self) -> bool {
        !self.drugs_pipeline.is_empty()
    }

    /// Best druggability with a missing value read as `unknown`.
    pub fn druggability(&self) -> Druggability {
        self.best_druggability.unwrap_or(Druggability::Unknown)
    }

    /// Gene symbol when present and not blank.
    pub fn gene(&self) -> Option<&str> {
        self.gene.as_deref().filter(|g| !g.trim().is_empty())
    }
}

/// Edge ids come as numbers or strings depending on the export.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathwayEdge {
    pub id: EdgeId,
    pub source: String,
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_deserializes_with_defaults() {
        let node: PathwayNode = serde_json::from_str(
            r#"{"id": "IL6", "name": "IL-6", "type": "cytokine", "category": "Cytokines",
                "biomarker_status": "validated"}"#,
        )
        .unwrap();

        assert_eq!(node.kind, "cytokine");
        assert_eq!(node.biomarker_status, BiomarkerStatus::Validated);
        assert!(node.biomarkers.is_empty());
        assert!(!node.has_approved() && !node.has_pipeline());
        assert_eq!(node.druggability(), Druggability::Unknown);
        assert_eq!(node.gene(), None);
    }

    #[test]
    fn null_lists_read_as_empty() {
        let node: PathwayNode = serde_json::from_str(
            r#"{"id": "A", "name": "A", "category": "X", "biomarker_status": "emerging",
                "pd_biomarkers": null, "drugs_approved": null, "drugs_pipeline": null}"#,
        )
        .unwrap();

        assert!(node.biomarkers.is_empty());
        assert!(!node.has_approved() && !node.has_pipeline());
        assert_eq!(node.biomarker_status, BiomarkerStatus::Emerging);
    }

    #[test]
    fn missing_status_is_other() {
        let node: PathwayNode =
            serde_json::from_str(r#"{"id": "A", "name": "A", "category": "X"}"#).unwrap();
        assert_eq!(node.biomarker_status, BiomarkerStatus::Other);
    }

    #[test]
    fn unrecognized_enum_values_become_other() {
        let node: PathwayNode = serde_json::from_str(
            r#"{"id": "X", "name": "X", "biomarker_status": "speculative",
                "best_druggability": "maybe", "gene": "  "}"#,
        )
        .unwrap();

        assert_eq!(node.biomarker_status, BiomarkerStatus::Other);
        assert_eq!(node.best_druggability, Some(Druggability::Other));
        assert_eq!(node.gene(), None);
    }

    #[test]
    fn none_values_map_to_named_variants() {
        let node: PathwayNode = serde_json::from_str(
            r#"{"id": "Y", "name": "Y", "biomarker_status": "none", "best_druggability": "none",
                "pd_biomarkers": [{"name": "CRP", "validation": "established", "druggability": "high",
                                   "assay": "ELISA", "assay_sensitivity": "pg/mL"}]}"#,
        )
        .unwrap();

        assert_eq!(node.biomarker_status, BiomarkerStatus::NoBiomarker);
        assert_eq!(node.druggability(), Druggability::NotDruggable);
        assert_eq!(node.biomarkers[0].druggability, Some(Druggability::High));
        assert_eq!(node.biomarkers[0].assay.as_deref(), Some("ELISA"));
    }

    #[test]
    fn edge_ids_accept_numbers_and_strings() {
        let edges: Vec<PathwayEdge> = serde_json::from_str(
            r#"[{"id": 1, "source": "A", "target": "B"},
                {"id": "e-2", "source": "B", "target": "C"}]"#,
        )
        .unwrap();

        assert_eq!(edges[0].id, EdgeId::Number(1));
        assert_eq!(edges[1].id.to_string(), "e-2");
    }
}
