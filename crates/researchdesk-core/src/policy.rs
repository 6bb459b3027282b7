use serde::{Deserialize, Serialize};

use crate::error::DeskError;
use crate::research::{null_as_default, null_as_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyQuery {
    pub query: String,
    #[serde(default)]
    pub context: Option<String>,
}

impl PolicyQuery {
    pub fn new(query: impl Into<String>, context: Option<String>) -> Self {
        Self {
            query: query.into(),
            context: context.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn validate(&self) -> Result<(), DeskError> {
        if self.query.trim().is_empty() {
            return Err(DeskError::InvalidInput("Please enter a policy question".into()));
        }
        Ok(())
    }
}

/// A document the policy answer was grounded on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySource {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub document_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub excerpt: String,
}

impl PolicySource {
    pub fn label(&self) -> &str {
        if self.document_title.is_empty() {
            &self.url
        } else {
            &self.document_title
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAdvice {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<PolicySource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_context_is_null() {
        let q = PolicyQuery::new("Should we subsidise heat pumps?", Some(String::new()));
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({ "query": "Should we subsidise heat pumps?", "context": null })
        );
    }

    #[test]
    fn test_query_presence_check() {
        assert!(PolicyQuery::new(" ", None).validate().is_err());
        assert!(PolicyQuery::new("q", None).validate().is_ok());
    }

    #[test]
    fn test_advice_decoding() {
        let advice: PolicyAdvice = serde_json::from_value(json!({
            "answer": "Phase it in.",
            "sources": [
                { "document_title": "White paper", "url": "https://gov/wp", "excerpt": "..." },
                { "url": "https://gov/untitled" }
            ]
        }))
        .unwrap();
        assert_eq!(advice.answer, "Phase it in.");
        assert_eq!(advice.sources.len(), 2);
        assert_eq!(advice.sources[0].label(), "White paper");
        assert_eq!(advice.sources[1].label(), "https://gov/untitled");
        assert!(advice.sources[1].excerpt.is_empty());
    }

    #[test]
    fn test_advice_without_sources() {
        let advice: PolicyAdvice = serde_json::from_value(json!({ "answer": "n/a" })).unwrap();
        assert!(advice.sources.is_empty());
    }
}
