//! CLI output formatting utilities.

use crate::analysis::{AnalysisResult, Sentiment};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Print an analysis result for humans.
    pub fn analysis(result: &AnalysisResult) {
        let meta = &result.metadata;
        Output::header(&meta.title);
        Output::kv("Author", &meta.author);
        Output::kv("URL", &meta.url);
        if let Some(duration) = meta.duration_seconds {
            Output::kv("Duration", &crate::transcript::format_timestamp(duration));
        }
        if meta.inferred {
            Output::kv("Metadata", "inferred from transcript");
        }

        Output::header("Summary");
        println!("{}", result.summary);

        if !result.topics.is_empty() {
            Output::header("Topics");
            for topic in &result.topics {
                Output::list_item(topic);
            }
        }

        if !result.insights.is_empty() {
            Output::header("Insights");
            for insight in &result.insights {
                let tag = match insight.sentiment {
                    Sentiment::Positive => style("+").green(),
                    Sentiment::Negative => style("-").red(),
                    Sentiment::Neutral => style("~").dim(),
                };
                println!("  {} {}", tag, insight.content);
            }
        }

        if !result.key_moments.is_empty() {
            Output::header("Key Moments");
            for moment in &result.key_moments {
                println!("  {} {}", style(&moment.label).cyan(), moment.description);
            }
        }

        println!();
        if result.transcript_truncated {
            Output::warning("Transcript was truncated before analysis.");
        }
        println!(
            "{}",
            style(format!("Processed in {:.2}s", result.processing_time)).dim()
        );
    }
}
