//! `vita check` command implementation.
//!
//! The build command deliberately swallows data problems so the static
//! page survives them; `check` is where they surface. It parses the data
//! document (a malformed document is an error here), reports section
//! sizes, and lists the citations the segmentation heuristic cannot
//! split.

use std::path::PathBuf;

use clap::Args;
use vita_config::{CliSettings, Config};
use vita_data::{Publication, SiteData};
use vita_render::parse_citation;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover vita.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data document path (overrides config).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Citation parse coverage over the publication list.
#[derive(Debug, Default, PartialEq, Eq)]
struct CitationCoverage {
    /// Structured records with citation fields.
    structured: usize,
    /// Free-text citations the heuristic segments.
    segmented: usize,
    /// Citations that will render unsegmented.
    unsegmented: Vec<String>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the data document is
    /// unreadable or malformed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data: self.data,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let data = SiteData::load(&config.site_resolved.data)?;

        output.info(&format!(
            "Data document: {}",
            config.site_resolved.data.display()
        ));
        output.info(&format!("Publications: {}", data.publications.len()));
        output.info(&format!("Awards: {}", data.awards.len()));
        output.info(&format!("Teaching: {}", data.teaching.len()));
        output.info(&format!("Talks: {}", data.talks.len()));
        output.info(&format!("Education: {}", data.education.len()));
        output.info(&format!("Featured: {}", data.featured.len()));

        let coverage = citation_coverage(&data.publications);
        if !data.publications.is_empty() {
            output.info(&format!(
                "Citation coverage: {} structured, {} segmented, {} unsegmented",
                coverage.structured,
                coverage.segmented,
                coverage.unsegmented.len()
            ));
        }
        for citation in &coverage.unsegmented {
            output.warning(&format!("Unsegmented citation: {}", preview(citation)));
        }

        output.success("Data document is valid");
        Ok(())
    }
}

/// Classify every publication by how the formatter will handle it.
fn citation_coverage(publications: &[Publication]) -> CitationCoverage {
    let mut coverage = CitationCoverage::default();
    for publication in publications {
        match publication {
            Publication::Structured(record) if record.has_citation_fields() => {
                coverage.structured += 1;
            }
            Publication::Structured(record) => {
                coverage
                    .unsegmented
                    .push(record.title.clone().unwrap_or_default());
            }
            Publication::Plain(text) => {
                if parse_citation(text).is_some() {
                    coverage.segmented += 1;
                } else {
                    coverage.unsegmented.push(text.clone());
                }
            }
        }
    }
    coverage
}

/// First part of a citation, for one-line diagnostics.
fn preview(text: &str) -> String {
    const MAX: usize = 60;
    if text.chars().count() <= MAX {
        text.to_owned()
    } else {
        let truncated: String = text.chars().take(MAX).collect();
        format!("{truncated}…")
    }
}
