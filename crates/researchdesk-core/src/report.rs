use serde::{Deserialize, Serialize};

use crate::research::{ResearchResult, Source};
use crate::section::{parse_sections, Section};

/// Display-ready research report: parsed sections plus the cited sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub sections: Vec<Section>,
    pub sources: Vec<Source>,
}

impl Report {
    pub fn from_result(result: &ResearchResult) -> Self {
        Self {
            sections: parse_sections(&result.content),
            sources: result.sources.clone(),
        }
    }

    /// No sections means there is nothing to show, even if sources came back.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl From<ResearchResult> for Report {
    fn from(result: ResearchResult) -> Self {
        Self {
            sections: parse_sections(&result.content),
            sources: result.sources,
        }
    }
}
