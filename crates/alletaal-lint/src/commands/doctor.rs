//! Doctor command — diagnose configuration and collaborators.
//!
//! The scoring pipeline depends on two external pieces: the annotator
//! command and the word-frequency table. `doctor` probes both and reports
//! what the other commands will actually use.

use anyhow::bail;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use alletaal_lint_core::annotator::{Annotator, CommandAnnotator};
use alletaal_lint_core::config::{Config, ConfigSources};
use alletaal_lint_core::frequency::ZipfTable;

/// Dutch probe sentence fed to the annotator to verify it responds.
const PROBE_SENTENCE: &str = "Test zin.";

/// Arguments for the `doctor` subcommand.
#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

#[derive(Serialize)]
struct Check {
    name: &'static str,
    status: CheckStatus,
    detail: String,
}

/// Diagnose the environment: config discovery, annotator, frequency table.
///
/// Fails (non-zero exit) when the annotator is unavailable, mirroring a
/// health probe; a missing frequency table is only a warning since scoring
/// degrades to the fallback frequency.
#[instrument(name = "cmd_doctor", skip_all)]
pub fn cmd_doctor(
    _args: DoctorArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!("executing doctor command");

    let checks = vec![
        check_config(sources),
        check_annotator(config),
        check_lexicon(config),
    ];

    if global_json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        for check in &checks {
            let status = match check.status {
                CheckStatus::Ok => "OK".green().to_string(),
                CheckStatus::Warn => "WARN".yellow().to_string(),
                CheckStatus::Fail => "FAIL".red().to_string(),
            };
            println!("{status:>4}  {}: {}", check.name.bold(), check.detail);
        }
    }

    if checks.iter().any(|c| c.status == CheckStatus::Fail) {
        bail!("environment is not ready; fix the failing checks above");
    }
    Ok(())
}

fn check_config(sources: &ConfigSources) -> Check {
    sources.primary_file().map_or_else(
        || Check {
            name: "config",
            status: CheckStatus::Warn,
            detail: "no configuration file found, using defaults".to_string(),
        },
        |path| Check {
            name: "config",
            status: CheckStatus::Ok,
            detail: format!("loaded {path}"),
        },
    )
}

fn check_annotator(config: &Config) -> Check {
    let Some(ref command) = config.annotator_command else {
        return Check {
            name: "annotator",
            status: CheckStatus::Fail,
            detail: "no annotator_command configured".to_string(),
        };
    };

    let annotator = match CommandAnnotator::new(command.clone()) {
        Ok(annotator) => annotator,
        Err(e) => {
            return Check {
                name: "annotator",
                status: CheckStatus::Fail,
                detail: e.to_string(),
            };
        }
    };

    match annotator.annotate(PROBE_SENTENCE) {
        Ok(sentences) => Check {
            name: "annotator",
            status: CheckStatus::Ok,
            detail: format!(
                "`{}` answered with {} sentence(s)",
                command.join(" "),
                sentences.len()
            ),
        },
        Err(e) => Check {
            name: "annotator",
            status: CheckStatus::Fail,
            detail: e.to_string(),
        },
    }
}

fn check_lexicon(config: &Config) -> Check {
    let Some(ref path) = config.frequency_file else {
        return Check {
            name: "frequency table",
            status: CheckStatus::Warn,
            detail: "no frequency_file configured; unknown-word fallback applies to every word"
                .to_string(),
        };
    };

    match ZipfTable::from_path(path) {
        Ok(table) => Check {
            name: "frequency table",
            status: CheckStatus::Ok,
            detail: format!("{path} ({} entries)", table.len()),
        },
        Err(e) => Check {
            name: "frequency table",
            status: CheckStatus::Fail,
            detail: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_annotator_fails() {
        let check = check_annotator(&Config::default());
        assert_eq!(check.status, CheckStatus::Fail);
    }

    #[test]
    fn missing_lexicon_warns() {
        let check = check_lexicon(&Config::default());
        assert_eq!(check.status, CheckStatus::Warn);
    }

    #[test]
    fn missing_config_file_warns() {
        let check = check_config(&ConfigSources::default());
        assert_eq!(check.status, CheckStatus::Warn);
    }

    #[cfg(unix)]
    #[test]
    fn responsive_annotator_passes() {
        // printf ignores stdin and answers with one annotated token.
        let config = Config {
            annotator_command: Some(vec![
                "printf".to_string(),
                "1\tTest\ttest\tNOUN\tN|soort|ev\t_\t0\troot\t_\t_\n".to_string(),
            ]),
            ..Config::default()
        };
        let check = check_annotator(&config);
        assert_eq!(check.status, CheckStatus::Ok);
    }

    #[test]
    fn doctor_fails_without_annotator() {
        let result = cmd_doctor(
            DoctorArgs::default(),
            true,
            &Config::default(),
            &ConfigSources::default(),
        );
        assert!(result.is_err());
    }
}
