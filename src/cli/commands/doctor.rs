//! Doctor command - verify configuration and credentials.

use crate::cli::Output;
use crate::config::{Prompts, Settings, API_KEY_ENV};
use crate::video_source::VideoRef;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Tubelens Doctor");
    println!();
    println!("Checking configuration...\n");

    let sections = [
        ("API Configuration", vec![check_api_key(settings)]),
        ("Configuration", vec![check_config_file(config_path), check_prompts(settings)]),
        ("Transcripts", vec![check_languages(settings), check_url_parser()]),
    ];

    let mut checks = Vec::new();
    for (title, results) in sections {
        println!("{}", style(title).bold());
        for check in &results {
            check.print();
        }
        println!();
        checks.extend(results);
    }

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Tubelens.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Tubelens is ready to use.");
    }

    Ok(())
}

/// Check that an API key resolves from the environment or the config file.
fn check_api_key(settings: &Settings) -> CheckResult {
    let from_env = std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .is_some();

    match settings.inference_config() {
        Ok(config) => {
            let source = if from_env { "environment" } else { "config file" };
            CheckResult::ok(
                API_KEY_ENV,
                &format!("configured via {} ({})", source, mask_key(&config.api_key)),
            )
        }
        Err(_) => CheckResult::error(
            API_KEY_ENV,
            "not set",
            &format!("Set with: export {}='sk-...'", API_KEY_ENV),
        ),
    }
}

/// Show only the prefix and suffix of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tubelens config init",
        )
    }
}

fn check_prompts(settings: &Settings) -> CheckResult {
    match Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    ) {
        Ok(_) => {
            let source = settings.prompts.custom_dir.as_deref().unwrap_or("built-in");
            CheckResult::ok("Prompts", source)
        }
        Err(e) => CheckResult::error(
            "Prompts",
            &e.to_string(),
            "Fix or remove the files in prompts.custom_dir",
        ),
    }
}

fn check_languages(settings: &Settings) -> CheckResult {
    if settings.transcript.languages.is_empty() {
        CheckResult::warning(
            "Caption languages",
            "none configured",
            "Set transcript.languages, e.g. [\"en\"]",
        )
    } else {
        CheckResult::ok(
            "Caption languages",
            &settings.transcript.languages.join(", "),
        )
    }
}

fn check_url_parser() -> CheckResult {
    match VideoRef::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ") {
        Ok(video) => CheckResult::ok("URL parsing", &format!("ok ({})", video.id())),
        Err(e) => CheckResult::error("URL parsing", &e.to_string(), "This is a bug"),
    }
}
