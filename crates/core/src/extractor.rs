use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::content::{Content, Distance, TEXT_PLAIN};
use crate::error::ExtractError;

/// Shape of the embedding feature an extractor attaches to its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSchema {
    pub name: String,
    pub dimensions: usize,
    pub distance: Distance,
}

/// What an extractor accepts and produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorDescription {
    pub name: String,
    pub input_mime_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<EmbeddingSchema>,
}

/// A component that turns a list of content into derived content, one
/// output list per input it handled.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Typed, defaulted configuration accepted by `extract`.
    type Params: DeserializeOwned + Default + Send + Sync;

    fn name(&self) -> &str;

    fn input_mime_types(&self) -> Vec<String> {
        vec![TEXT_PLAIN.to_string()]
    }

    fn describe(&self) -> ExtractorDescription {
        ExtractorDescription {
            name: self.name().to_string(),
            input_mime_types: self.input_mime_types(),
            embedding: None,
        }
    }

    async fn extract(
        &self,
        content: &[Content],
        params: &Self::Params,
    ) -> Result<Vec<Vec<Content>>, ExtractError>;

    /// Run `extract` with params given as JSON. Missing, blank or `null`
    /// params mean `Params::default()`.
    async fn extract_json(
        &self,
        content: &[Content],
        raw_params: Option<&str>,
    ) -> Result<Vec<Vec<Content>>, ExtractError> {
        let params = parse_params::<Self::Params>(raw_params)?;
        self.extract(content, &params).await
    }
}

/// Parse extractor params from JSON, falling back to the default for
/// missing, blank or `null` input.
pub fn parse_params<P: DeserializeOwned + Default>(raw: Option<&str>) -> Result<P, ExtractError> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(P::default()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Feature;

    #[derive(Debug, Default, Deserialize)]
    struct EchoParams {
        #[serde(default)]
        repeat: usize,
    }

    /// Emits each text item `repeat` times (at least once).
    struct EchoExtractor;

    #[async_trait]
    impl Extractor for EchoExtractor {
        type Params = EchoParams;

        fn name(&self) -> &str {
            "echo"
        }

        async fn extract(
            &self,
            content: &[Content],
            params: &EchoParams,
        ) -> Result<Vec<Vec<Content>>, ExtractError> {
            Ok(content
                .iter()
                .map(|c| vec![c.clone(); params.repeat.max(1)])
                .collect())
        }
    }

    #[test]
    fn parse_params_defaults_on_empty_input() {
        let p: EchoParams = parse_params(None).unwrap();
        assert_eq!(p.repeat, 0);
        let p: EchoParams = parse_params(Some("  ")).unwrap();
        assert_eq!(p.repeat, 0);
        let p: EchoParams = parse_params(Some("null")).unwrap();
        assert_eq!(p.repeat, 0);
    }

    #[test]
    fn parse_params_reports_bad_json() {
        let err = parse_params::<EchoParams>(Some("{repeat: 2")).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn extract_json_delegates_with_parsed_params() {
        let input = vec![Content::from_text("hi", Feature::embedding(vec![1.0]))];
        let out = EchoExtractor
            .extract_json(&input, Some(r#"{"repeat": 3}"#))
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].len(), 3);
    }

    #[test]
    fn default_description_has_no_embedding_schema() {
        let desc = EchoExtractor.describe();
        assert_eq!(desc.name, "echo");
        assert_eq!(desc.input_mime_types, vec!["text/plain".to_string()]);
        assert!(desc.embedding.is_none());

        let json = serde_json::to_value(&desc).unwrap();
        assert!(json.get("embedding").is_none());
    }
}
