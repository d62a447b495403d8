//! Analyze command - run one analysis from the terminal.

use crate::analysis::{AnalysisRequest, AnalysisType, Analyzer};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;

/// Analyze a single video and print the result.
pub async fn run_analyze(
    url: &str,
    analysis_type: AnalysisType,
    json: bool,
    settings: Settings,
) -> anyhow::Result<()> {
    preflight::check(Operation::Analyze, &settings)?;

    let analyzer = Analyzer::from_settings(&settings)?;
    let request = AnalysisRequest::new(url, analysis_type);

    let spinner = (!json).then(|| Output::spinner(&format!("Analyzing {}...", url)));
    let outcome = analyzer.analyze(&request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            Output::error(&format!("Analysis failed ({:?}): {}", e.kind(), e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        Output::analysis(&result);
    }

    Ok(())
}
