use researchdesk_core::policy::{PolicyAdvice, PolicyQuery};
use researchdesk_core::research::{ResearchRequest, ResearchResult, Video, VideoRequest};
use tokio::runtime::Runtime;

use crate::{ApiVersion, HttpService, ResearchService, ServiceError};

/// Blocking wrapper around the async `HttpService`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Must not be used from inside another tokio runtime.
pub struct BlockingHttpService {
    inner: HttpService,
    rt: Runtime,
}

impl BlockingHttpService {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::from_service(HttpService::new(base_url))
    }

    pub fn with_api_key(base_url: &str, key: String) -> Result<Self, ServiceError> {
        Self::from_service(HttpService::with_api_key(base_url, key))
    }

    pub fn from_service(inner: HttpService) -> Result<Self, ServiceError> {
        let rt = Runtime::new()
            .map_err(|e| ServiceError::Internal(format!("failed to create tokio runtime: {e}")))?;
        Ok(Self { inner, rt })
    }

    pub fn set_api_version(&mut self, version: ApiVersion) {
        self.inner.set_api_version(version);
    }

    pub fn run_research(&self, request: &ResearchRequest) -> Result<ResearchResult, ServiceError> {
        self.rt.block_on(self.inner.run_research(request))
    }

    pub fn research_videos(&self, request: &VideoRequest) -> Result<Vec<Video>, ServiceError> {
        self.rt.block_on(self.inner.research_videos(request))
    }

    pub fn policy_query(&self, query: &PolicyQuery) -> Result<PolicyAdvice, ServiceError> {
        self.rt.block_on(self.inner.policy_query(query))
    }
}
