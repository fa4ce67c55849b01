use std::str::Utf8Error;

use serde::{Deserialize, Serialize};

/// MIME type carried by every chunk the embedding extractor produces.
pub const TEXT_PLAIN: &str = "text/plain";

/// Feature name used for embeddings when the caller does not pick one.
pub const DEFAULT_EMBEDDING_NAME: &str = "embedding";

/// A unit of data flowing through extractors: raw bytes, a MIME type and
/// whatever features upstream extractors attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub content_type: String,
    pub data: Vec<u8>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Content {
    pub fn new(content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
            features: Vec::new(),
        }
    }

    /// Plain-text content carrying a single feature.
    pub fn from_text(text: impl Into<String>, feature: Feature) -> Self {
        Self {
            content_type: TEXT_PLAIN.to_string(),
            data: text.into().into_bytes(),
            features: vec![feature],
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// True when the MIME essence is `text/plain`, ignoring parameters such
    /// as `charset` and letter case.
    pub fn is_plain_text(&self) -> bool {
        let essence = self.content_type.split(';').next().unwrap_or("").trim();
        essence.eq_ignore_ascii_case(TEXT_PLAIN)
    }

    /// Borrow the payload as UTF-8 text.
    pub fn text(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    /// Values of the first embedding feature, if any.
    pub fn embedding(&self) -> Option<&[f32]> {
        self.features.iter().find_map(Feature::as_embedding)
    }
}

/// Similarity metric an embedding was produced for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    #[default]
    Cosine,
    Dot,
    Euclidean,
}

/// Typed annotation attached to a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feature_type", rename_all = "lowercase")]
#[non_exhaustive]
pub enum Feature {
    Embedding {
        name: String,
        values: Vec<f32>,
        #[serde(default)]
        distance: Distance,
    },
}

impl Feature {
    /// Embedding named `embedding` for cosine similarity.
    pub fn embedding(values: Vec<f32>) -> Self {
        Self::named_embedding(DEFAULT_EMBEDDING_NAME, values, Distance::Cosine)
    }

    pub fn named_embedding(name: impl Into<String>, values: Vec<f32>, distance: Distance) -> Self {
        Feature::Embedding {
            name: name.into(),
            values,
            distance,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Feature::Embedding { name, .. } => name,
        }
    }

    pub fn as_embedding(&self) -> Option<&[f32]> {
        match self {
            Feature::Embedding { values, .. } => Some(values),
        }
    }
}
