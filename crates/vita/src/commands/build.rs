//! `vita build` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use vita_config::{CliSettings, Config};
use vita_data::SiteData;
use vita_metrics::MetricsClient;
use vita_render::{AuthorEmphasis, PressLink, PressTable};
use vita_site::Populator;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover vita.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data document path (overrides config).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Template path (overrides config).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output path (overrides config).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Enable metric badge hydration (default: per config, off).
    #[arg(long)]
    metrics: Option<bool>,

    /// Disable metric badge hydration.
    #[arg(long, conflicts_with = "metrics")]
    no_metrics: bool,

    /// Enable verbose output (show skipped sections and timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// A missing or malformed data document is not an error: the template
    /// is written through unchanged so the static page stays intact.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the template/output
    /// paths cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let metrics_enabled = self.no_metrics.then_some(false).or(self.metrics);
        let cli_settings = CliSettings {
            data: self.data,
            template: self.template,
            output: self.out,
            metrics_enabled,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let populator = populator_from_config(&config)?;

        let template = std::fs::read_to_string(&config.site_resolved.template)?;

        let data = match SiteData::load(&config.site_resolved.data) {
            Ok(data) => Some(data),
            Err(e) => {
                output.warning(&format!(
                    "Data document unavailable ({e}); writing template unchanged"
                ));
                None
            }
        };

        let populate_start = std::time::Instant::now();
        let mut page = populator.populate(&template, data.as_ref());
        tracing::info!(
            elapsed_ms = populate_start.elapsed().as_secs_f64() * 1000.0,
            "Page populated"
        );

        if config.metrics.enabled {
            output.info("Hydrating metric badges");
            let client = MetricsClient::new(Duration::from_secs(config.metrics.timeout_secs));
            page = client.hydrate(&page);
        }

        let destination = &config.site_resolved.output;
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(destination, &page)?;

        output.success(&format!("Wrote {}", destination.display()));
        Ok(())
    }
}

/// Build a populator from the loaded configuration.
///
/// Compiles the author emphasis patterns and the press-link table; a
/// pattern that fails to compile is a configuration error.
pub(crate) fn populator_from_config(config: &Config) -> Result<Populator, CliError> {
    let author = match &config.author {
        Some(author) => AuthorEmphasis::new(&author.surname, &author.initials)
            .map_err(|e| CliError::Validation(format!("author emphasis pattern: {e}")))?,
        None => AuthorEmphasis::none(),
    };

    let press = match &config.press {
        Some(entries) => {
            let rules = entries.iter().map(|entry| {
                (
                    entry.pattern.clone(),
                    entry
                        .links
                        .iter()
                        .map(|link| PressLink::new(&link.label, &link.url))
                        .collect(),
                )
            });
            PressTable::from_rules(rules)
                .map_err(|e| CliError::Validation(format!("press pattern: {e}")))?
        }
        None => PressTable::built_in(),
    };

    Ok(Populator::new(author, press))
}

#[cfg(test)]
mod tests {
    use vita_config::PressEntry;

    use super::*;

    #[test]
    fn test_populator_from_default_config() {
        let config = Config::default();
        assert!(populator_from_config(&config).is_ok());
    }

    #[test]
    fn test_populator_from_config_rejects_bad_pattern() {
        let mut config = Config::default();
        config.press = Some(vec![PressEntry {
            pattern: "(unclosed".to_owned(),
            links: Vec::new(),
        }]);
        let err = populator_from_config(&config).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("press pattern"));
    }

    fn build_args(config: std::path::PathBuf) -> BuildArgs {
        BuildArgs {
            config: Some(config),
            data: None,
            template: None,
            out: None,
            metrics: None,
            no_metrics: false,
            verbose: false,
        }
    }

    #[test]
    fn test_build_writes_populated_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("vita.toml"),
            "[author]\nsurname = \"Chim\"\ninitials = [\"M\", \"M\"]\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("template.html"),
            "<h1><!-- vita:hero-name -->placeholder<!-- /vita:hero-name --></h1>",
        )
        .unwrap();
        std::fs::write(dir.path().join("site-data.json"), r#"{"name": "A. Scholar"}"#).unwrap();

        build_args(dir.path().join("vita.toml")).execute().unwrap();

        let page = std::fs::read_to_string(dir.path().join("public/index.html")).unwrap();
        assert!(page.contains("<!-- vita:hero-name -->A. Scholar<!-- /vita:hero-name -->"));
    }

    #[test]
    fn test_build_missing_data_writes_template_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vita.toml"), "").unwrap();
        let template = "<h1><!-- vita:hero-name -->placeholder<!-- /vita:hero-name --></h1>";
        std::fs::write(dir.path().join("template.html"), template).unwrap();

        build_args(dir.path().join("vita.toml")).execute().unwrap();

        let page = std::fs::read_to_string(dir.path().join("public/index.html")).unwrap();
        assert_eq!(page, template);
    }
}
