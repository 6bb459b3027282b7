use async_trait::async_trait;
use researchdesk_core::policy::{PolicyAdvice, PolicyQuery};
use researchdesk_core::research::{ResearchRequest, ResearchResult, Video, VideoRequest};
use researchdesk_core::DeskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// The bare message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::NotFound(msg)
            | ServiceError::InvalidInput(msg)
            | ServiceError::Internal(msg) => msg,
        }
    }
}

impl From<DeskError> for ServiceError {
    fn from(e: DeskError) -> Self {
        match e {
            DeskError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
        }
    }
}

/// Operations offered by the remote research/policy API.
///
/// The CLI programs against this trait; `HttpService` is the only
/// production implementation.
#[async_trait]
pub trait ResearchService: Send + Sync {
    async fn run_research(&self, request: &ResearchRequest) -> Result<ResearchResult, ServiceError>;
    async fn research_videos(&self, request: &VideoRequest) -> Result<Vec<Video>, ServiceError>;
    async fn policy_query(&self, query: &PolicyQuery) -> Result<PolicyAdvice, ServiceError>;
}
