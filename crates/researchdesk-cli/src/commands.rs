use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use researchdesk_core::policy::PolicyQuery;
use researchdesk_core::research::{Envelope, ResearchRequest, ResearchResult, VideoRequest};
use researchdesk_core::Report;
use researchdesk_service::ResearchService;
use serde_json::json;
use tracing::{info, warn};

use crate::config::{Command, OutputFormat};
use crate::render;

/// Run one subcommand against the service and return what should be printed.
pub async fn execute(
    command: &Command,
    format: OutputFormat,
    service: &dyn ResearchService,
) -> Result<String> {
    match command {
        Command::Research {
            title,
            brief,
            length,
            top_k,
            videos,
        } => {
            let request = ResearchRequest::new(title.as_str())
                .with_brief(brief.clone())
                .with_length(*length)
                .with_top_k(*top_k);
            info!(
                "running research '{}' (length={}, top_k={})",
                request.title,
                request.length.as_str(),
                request.top_k
            );
            let result = service.run_research(&request).await?;
            let report = Report::from(result);
            if report.is_empty() {
                warn!("research reply contained no displayable content");
            }

            // A failed video lookup must not discard the finished report.
            let videos = if *videos {
                let lookup = service
                    .research_videos(&VideoRequest::new(title.as_str()))
                    .await;
                if let Err(e) = &lookup {
                    warn!("video lookup failed: {e}");
                }
                Some(lookup)
            } else {
                None
            };

            Ok(match format {
                OutputFormat::Json => {
                    let mut value = json!({ "report": report });
                    match &videos {
                        Some(Ok(videos)) => value["videos"] = serde_json::to_value(videos)?,
                        Some(Err(e)) => value["videos_error"] = json!(e.message()),
                        None => {}
                    }
                    serde_json::to_string_pretty(&value)?
                }
                OutputFormat::Text => {
                    let mut out = render::render_research(&report);
                    match &videos {
                        Some(Ok(videos)) => out.push_str(&render::render_videos(videos)),
                        Some(Err(e)) => out.push_str(&render::render_error(e.message())),
                        None => {}
                    }
                    out
                }
            })
        }
        Command::Videos { title, top_k } => {
            let request = VideoRequest::new(title.as_str()).with_top_k(*top_k);
            info!("fetching videos for '{}'", request.title);
            let videos = service.research_videos(&request).await?;
            Ok(match format {
                OutputFormat::Json => serde_json::to_string_pretty(&json!({ "videos": videos }))?,
                OutputFormat::Text => render::render_videos(&videos),
            })
        }
        Command::Policy { query, context } => {
            let query = PolicyQuery::new(query.as_str(), context.clone());
            info!("asking policy agent");
            let advice = service.policy_query(&query).await?;
            Ok(match format {
                OutputFormat::Json => serde_json::to_string_pretty(&advice)?,
                OutputFormat::Text => render::render_policy(&advice),
            })
        }
        Command::Render { file } => {
            let raw = read_input(file.as_deref())?;
            let report = Report::from(decode_saved(&raw));
            Ok(match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
                OutputFormat::Text => render::render_research(&report),
            })
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Accept a saved v2 envelope, a bare v1 result, or raw report text.
pub fn decode_saved(raw: &str) -> ResearchResult {
    if let Ok(env) = serde_json::from_str::<Envelope<ResearchResult>>(raw) {
        return env.data;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
        if value.is_object() {
            if let Ok(result) = serde_json::from_value::<ResearchResult>(value) {
                return result;
            }
        }
    }
    ResearchResult {
        content: raw.to_string(),
        sources: Vec::new(),
    }
}
