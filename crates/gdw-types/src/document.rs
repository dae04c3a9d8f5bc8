use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a tracked resource's body is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Flat line-oriented text (key=value tables and the like).
    Text,
    /// Nested JSON document.
    Json,
}

/// A fetched resource snapshot. Immutable once constructed; two instances
/// (`old`, `new`) are compared per run.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    /// An ordered sequence of lines, stored as the raw text.
    Text(String),
    /// A nested structure of mappings, sequences, and scalars.
    Structured(Value),
}

impl Document {
    /// The resource kind this document was parsed as.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Document::Text(_) => ResourceKind::Text,
            Document::Structured(_) => ResourceKind::Json,
        }
    }

    /// The raw bytes to persist for this document.
    ///
    /// Text documents round-trip verbatim; structured documents are
    /// pretty-printed so snapshot files stay reviewable.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Document::Text(text) => text.clone().into_bytes(),
            Document::Structured(value) => {
                // Serializing an in-memory Value cannot fail.
                serde_json::to_vec_pretty(value).unwrap_or_default()
            }
        }
    }

    /// Parse persisted bytes back into a document of the given kind.
    pub fn from_bytes(kind: ResourceKind, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        match kind {
            ResourceKind::Text => Ok(Document::Text(String::from_utf8_lossy(bytes).into_owned())),
            ResourceKind::Json => Ok(Document::Structured(serde_json::from_slice(bytes)?)),
        }
    }
}

/// Returns `true` if the value is a scalar (not an object or array).
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}
