//! Plain-text panels for the terminal.
//!
//! Every function returns the finished panel as a `String`; an empty string
//! means the panel has nothing to show and is omitted.

use researchdesk_core::policy::PolicyAdvice;
use researchdesk_core::research::{Source, Video};
use researchdesk_core::{Report, Section};

pub const REPORT_HEADING: &str = "Research Report";
pub const SOURCES_HEADING: &str = "Sources & References";
pub const VIDEOS_HEADING: &str = "Related Videos";
pub const POLICY_HEADING: &str = "Policy Advice";

fn heading(out: &mut String, title: &str, underline: char) {
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!(
        "{}\n",
        underline.to_string().repeat(title.chars().count())
    ));
}

fn render_section(out: &mut String, section: &Section) {
    if !section.title.is_empty() {
        heading(out, &section.title, '-');
    }
    for paragraph in &section.content {
        out.push_str(&format!("{paragraph}\n\n"));
    }
}

/// The parsed report body. Empty when the report has no sections.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    if report.is_empty() {
        return out;
    }
    heading(&mut out, REPORT_HEADING, '=');
    out.push('\n');
    for section in &report.sections {
        render_section(&mut out, section);
    }
    out
}

fn render_links(title: &str, links: &[Source]) -> String {
    let mut out = String::new();
    if links.is_empty() {
        return out;
    }
    heading(&mut out, title, '=');
    out.push('\n');
    let width = links.len().to_string().len();
    for (idx, link) in links.iter().enumerate() {
        out.push_str(&format!("{:>width$}. {}\n", idx + 1, link.label()));
        out.push_str(&format!("{:width$}  {}\n", "", link.url));
    }
    out.push('\n');
    out
}

pub fn render_sources(sources: &[Source]) -> String {
    render_links(SOURCES_HEADING, sources)
}

pub fn render_videos(videos: &[Video]) -> String {
    render_links(VIDEOS_HEADING, videos)
}

pub fn render_policy(advice: &PolicyAdvice) -> String {
    let mut out = String::new();
    heading(&mut out, POLICY_HEADING, '=');
    out.push('\n');
    out.push_str(&format!("{}\n\n", advice.answer));
    heading(&mut out, "Sources", '-');
    if advice.sources.is_empty() {
        out.push_str("No sources available\n");
        return out;
    }
    for source in &advice.sources {
        out.push_str(&format!("* {}\n", source.label()));
        if !source.url.is_empty() {
            out.push_str(&format!("  {}\n", source.url));
        }
        if !source.excerpt.is_empty() {
            out.push_str(&format!("  {}\n", source.excerpt));
        }
    }
    out
}

/// Report followed by its sources, as shown after a research run.
pub fn render_research(report: &Report) -> String {
    if report.is_empty() {
        return String::new();
    }
    let mut out = render_report(report);
    out.push_str(&render_sources(&report.sources));
    out
}

/// Error line shown below the panels that did render.
pub fn render_error(message: &str) -> String {
    format!("Error: {message}\n")
}
