use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use researchdesk_core::research::{ResearchLength, DEFAULT_TOP_K, DEFAULT_VIDEO_TOP_K};
use researchdesk_service::{ApiVersion, HttpService};

#[derive(Debug, Parser)]
#[command(name = "researchdesk", about = "Research and policy-advice desk")]
pub struct CliConfig {
    /// Base URL of the research/policy API
    #[arg(
        long,
        global = true,
        env = "RESEARCHDESK_API_URL",
        default_value = "http://localhost:8000"
    )]
    pub api_url: String,

    /// API key sent as a bearer token
    #[arg(long, global = true, env = "RESEARCHDESK_API_KEY")]
    pub api_key: Option<String>,

    /// Research endpoint generation (v1 or v2)
    #[arg(long, global = true, env = "RESEARCHDESK_API_VERSION", default_value = "v2")]
    pub api_version: ApiVersion,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a research request and show the report with its sources
    Research {
        /// Research title
        #[arg(long)]
        title: String,

        /// Additional context or aspects to focus on
        #[arg(long)]
        brief: Option<String>,

        /// Research depth: small, medium or deep
        #[arg(long, default_value = "medium", value_parser = parse_length)]
        length: ResearchLength,

        /// Number of sources (clamped to 1..=10)
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: u32,

        /// Also fetch related videos
        #[arg(long)]
        videos: bool,
    },

    /// Find videos related to a title
    Videos {
        #[arg(long)]
        title: String,

        #[arg(long, default_value_t = DEFAULT_VIDEO_TOP_K)]
        top_k: u32,
    },

    /// Ask the policy agent a question
    Policy {
        #[arg(long)]
        query: String,

        /// Optional background for the question
        #[arg(long)]
        context: Option<String>,
    },

    /// Render a saved research response without calling the API.
    /// Reads stdin when FILE is omitted or `-`.
    Render { file: Option<PathBuf> },
}

fn parse_length(s: &str) -> Result<ResearchLength, String> {
    ResearchLength::parse_str(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown length '{s}' (expected small, medium or deep)"))
}

impl CliConfig {
    pub fn build_service(&self) -> HttpService {
        let mut service = match &self.api_key {
            Some(key) => HttpService::with_api_key(&self.api_url, key.clone()),
            None => HttpService::new(&self.api_url),
        };
        service.set_api_version(self.api_version);
        service
    }
}
