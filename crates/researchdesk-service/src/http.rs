use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use researchdesk_core::policy::{PolicyAdvice, PolicyQuery};
use researchdesk_core::research::{
    Envelope, ResearchRequest, ResearchResult, Video, VideoList, VideoRequest,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::{ResearchService, ServiceError};

const RESEARCH_FALLBACK: &str = "Failed to fetch research data";
const VIDEOS_FALLBACK: &str = "Failed to fetch videos";
const POLICY_FALLBACK: &str = "Failed to fetch response from server";

/// Which generation of the research endpoints to talk to.
///
/// v1 serves `/research/*` with bare JSON bodies; v2 serves
/// `/v2/research/*` and wraps every reply in `{ success, data }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "v1" => Some(ApiVersion::V1),
            "v2" => Some(ApiVersion::V2),
            _ => None,
        }
    }

    fn research_prefix(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "/research",
            ApiVersion::V2 => "/v2/research",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiVersion::parse_str(&s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown api version '{s}' (expected v1 or v2)"))
    }
}

/// Async HTTP client implementation of ResearchService.
pub struct HttpService {
    base_url: String,
    client: Client,
    api_key: Option<String>,
    version: ApiVersion,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            api_key: None,
            version: ApiVersion::default(),
        }
    }

    pub fn with_api_key(base_url: &str, key: String) -> Self {
        let mut svc = Self::new(base_url);
        svc.api_key = Some(key);
        svc
    }

    pub fn set_api_version(&mut self, version: ApiVersion) {
        self.version = version;
    }

    pub fn api_version(&self) -> ApiVersion {
        self.version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {key}")),
            None => builder,
        }
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, ServiceError> {
        let url = format!("{}{path}", self.base_url);
        debug!("POST {url}");
        let builder = self.client.post(url).json(body);
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("connection failed: {e}")))?;
        handle_response(resp, fallback).await
    }

    /// Post to a research endpoint, unwrapping the v2 envelope when needed.
    async fn post_research<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, ServiceError> {
        let path = format!("{}/{endpoint}", self.version.research_prefix());
        match self.version {
            ApiVersion::V1 => self.post_json(&path, body, fallback).await,
            ApiVersion::V2 => {
                let env: Envelope<T> = self.post_json(&path, body, fallback).await?;
                if !env.success {
                    debug!("{path}: envelope reported success=false");
                }
                Ok(env.data)
            }
        }
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    } else {
        let body = resp.text().await.unwrap_or_default();
        let err = error_from_body(status, &body, fallback);
        warn!("request failed with {status}: {}", err.message());
        Err(err)
    }
}

/// Map a non-2xx reply to a ServiceError.
///
/// The message comes from `detail` (a string, or a list of `{msg}` objects
/// as produced by request validation), then `error`, then the fallback.
pub(crate) fn error_from_body(status: StatusCode, body: &str, fallback: &str) -> ServiceError {
    let msg = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| extract_message(&v))
        .unwrap_or_else(|| fallback.to_string());

    if status == StatusCode::NOT_FOUND {
        ServiceError::NotFound(msg)
    } else if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
        ServiceError::InvalidInput(msg)
    } else {
        ServiceError::Internal(msg)
    }
}

fn extract_message(v: &serde_json::Value) -> Option<String> {
    match &v["detail"] {
        serde_json::Value::String(s) if !s.is_empty() => return Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items.iter().filter_map(|i| i["msg"].as_str()).collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }
    v["error"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[async_trait]
impl ResearchService for HttpService {
    async fn run_research(
        &self,
        request: &ResearchRequest,
    ) -> Result<ResearchResult, ServiceError> {
        request.validate()?;
        self.post_research("run", request, RESEARCH_FALLBACK).await
    }

    async fn research_videos(&self, request: &VideoRequest) -> Result<Vec<Video>, ServiceError> {
        request.validate()?;
        let list: VideoList = self
            .post_research("videos", request, VIDEOS_FALLBACK)
            .await?;
        Ok(list.videos)
    }

    async fn policy_query(&self, query: &PolicyQuery) -> Result<PolicyAdvice, ServiceError> {
        query.validate()?;
        self.post_json("/query", query, POLICY_FALLBACK).await
    }
}
