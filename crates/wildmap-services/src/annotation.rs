//! Annotation types shared by the store, the service and the HTTP client.

use serde::{Deserialize, Serialize};

/// Discriminator between the two annotation collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Animal,
    Tree,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 2] = [AnnotationKind::Animal, AnnotationKind::Tree];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Tree => "tree",
        }
    }

    /// File name of the collection inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Animal => "animals.json",
            Self::Tree => "trees.json",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Animal => 0,
            Self::Tree => 1,
        }
    }
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnnotationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "animal" => Ok(Self::Animal),
            "tree" => Ok(Self::Tree),
            other => Err(format!("unknown entry type {other:?}")),
        }
    }
}

/// A persisted point record. The kind is implied by the collection it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// Body of `POST /add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Body returned by `POST /add` for every outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReply {
    pub message: String,
}
