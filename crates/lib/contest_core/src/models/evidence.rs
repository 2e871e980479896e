//! Uploaded evidence items.

use serde::{Deserialize, Serialize};

use crate::uuid::evidence_id;

/// Coarse evidence type, fixed when the item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Photo,
    Document,
    Other,
}

impl EvidenceKind {
    /// `image/*` is a photo; every other uploaded file, including one with
    /// an empty MIME type, is a document. `Other` is only used when there is
    /// no file at all.
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            EvidenceKind::Photo
        } else {
            EvidenceKind::Document
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Photo => "photo",
            EvidenceKind::Document => "document",
            EvidenceKind::Other => "other",
        }
    }
}

/// Handle to the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceFile {
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
}

/// One uploaded file plus the user's description of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    pub file: Option<EvidenceFile>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
}

impl Evidence {
    /// Create an evidence item with a fresh id, deriving its kind from the
    /// file's MIME type.
    pub fn from_upload(file: Option<EvidenceFile>, description: impl Into<String>) -> Self {
        Self::with_id(evidence_id(), file, description)
    }

    /// Like [`Evidence::from_upload`] with a caller-chosen id.
    pub fn with_id(
        id: impl Into<String>,
        file: Option<EvidenceFile>,
        description: impl Into<String>,
    ) -> Self {
        let kind = file
            .as_ref()
            .map(|f| EvidenceKind::from_mime(&f.mime_type))
            .unwrap_or(EvidenceKind::Other);
        Self {
            id: id.into(),
            file,
            description: description.into(),
            kind,
        }
    }

    /// Display name of the underlying file.
    pub fn file_name(&self) -> &str {
        self.file.as_ref().map(|f| f.name.as_str()).unwrap_or("unnamed file")
    }
}

/// Partial evidence update. The kind is never re-derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceUpdate {
    pub description: Option<String>,
}

impl EvidenceUpdate {
    pub fn description(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
        }
    }

    pub fn apply_to(&self, evidence: &mut Evidence) {
        if let Some(description) = &self.description {
            evidence.description = description.clone();
        }
    }
}
