//! Conformance runs
//!
//! Replays every sample through a pipeline, then mutates a bounded prefix
//! of the samples and expects the pipeline to notice. One failing sample
//! never stops the run; every outcome is recorded.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::mutation::mutate;
use crate::pipeline::{ParsePipeline, PipelineOutput};
use crate::{Error, Result};

/// Configuration for a conformance run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    /// How many samples, from the front, are also run mutated
    pub mutated_sample_limit: usize,
    /// Tag written over each message header by the mutation
    pub header_replacement: String,
    /// Count structural errors in an unmutated sample as a failure
    pub fail_on_structural_errors: bool,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            mutated_sample_limit: 2,
            header_replacement: "UXH".to_string(),
            fail_on_structural_errors: false,
        }
    }
}

/// A named interchange text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub name: String,
    pub text: String,
}

impl Sample {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Outcome for one sample, mutated or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleResult {
    pub name: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub mutated: bool,
}

impl SampleResult {
    fn passed(name: impl Into<String>, mutated: bool, summary: String) -> Self {
        Self {
            name: name.into(),
            ok: true,
            error: None,
            summary: Some(summary),
            mutated,
        }
    }

    fn failed(name: impl Into<String>, mutated: bool, error: String) -> Self {
        Self {
            name: name.into(),
            ok: false,
            error: Some(error),
            summary: None,
            mutated,
        }
    }
}

/// Result of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConformanceReport {
    /// True only when every recorded result is ok
    pub success: bool,
    pub results: Vec<SampleResult>,
}

impl ConformanceReport {
    fn from_results(results: Vec<SampleResult>) -> Self {
        Self {
            success: results.iter().all(|r| r.ok),
            results,
        }
    }

    /// Results that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &SampleResult> {
        self.results.iter().filter(|r| !r.ok)
    }
}

/// Runs samples through a pipeline under one configuration
#[derive(Debug, Clone, Default)]
pub struct ConformanceTester {
    config: ConformanceConfig,
}

impl ConformanceTester {
    #[must_use]
    pub fn new(config: ConformanceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ConformanceConfig {
        &self.config
    }

    /// Run the unmutated pass over every sample, then the mutated pass over
    /// the first `mutated_sample_limit` samples
    pub fn run<P>(&self, pipeline: &P, samples: &[Sample]) -> ConformanceReport
    where
        P: ParsePipeline + ?Sized,
    {
        let mut results: Vec<SampleResult> = samples
            .iter()
            .map(|sample| self.check_sample(pipeline, sample))
            .collect();

        results.extend(
            samples
                .iter()
                .take(self.config.mutated_sample_limit)
                .map(|sample| self.check_mutated(pipeline, sample)),
        );

        let report = ConformanceReport::from_results(results);
        info!(
            samples = samples.len(),
            results = report.results.len(),
            success = report.success,
            "Conformance run complete"
        );
        report
    }

    fn check_sample<P>(&self, pipeline: &P, sample: &Sample) -> SampleResult
    where
        P: ParsePipeline + ?Sized,
    {
        let result = match invoke(pipeline, &sample.text) {
            Ok(output) if self.config.fail_on_structural_errors && !output.errors.is_empty() => {
                let codes: Vec<&str> = output.errors.iter().map(|e| e.code.as_str()).collect();
                SampleResult::failed(
                    &sample.name,
                    false,
                    format!("structural errors reported: {}", codes.join(", ")),
                )
            }
            Ok(output) => SampleResult::passed(&sample.name, false, summarize(&output)),
            Err(err) => SampleResult::failed(&sample.name, false, err.to_string()),
        };

        log_outcome(&result);
        result
    }

    fn check_mutated<P>(&self, pipeline: &P, sample: &Sample) -> SampleResult
    where
        P: ParsePipeline + ?Sized,
    {
        let name = format!("{} (mutated)", sample.name);

        let mutated = match mutate(&sample.text, &self.config.header_replacement) {
            Ok(mutated) => mutated,
            Err(err) => {
                let result = SampleResult::failed(name, true, err.to_string());
                log_outcome(&result);
                return result;
            }
        };

        let result = match invoke(pipeline, &mutated) {
            Err(err) => SampleResult::passed(name, true, format!("mutation detected: {err}")),
            Ok(output) => match output.errors.iter().find(|e| e.code.signals_malformed_structure()) {
                Some(detected) => SampleResult::passed(
                    name,
                    true,
                    format!("mutation detected: {}", detected.code),
                ),
                None => SampleResult::failed(
                    name,
                    true,
                    format!(
                        "mutated sample accepted without a structural error ({} segments, {} errors)",
                        output.segment_count(),
                        output.errors.len()
                    ),
                ),
            },
        };

        log_outcome(&result);
        result
    }
}

/// Run `samples` through `pipeline` with the default configuration
pub fn run_conformance<P>(pipeline: &P, samples: &[Sample]) -> ConformanceReport
where
    P: ParsePipeline + ?Sized,
{
    ConformanceTester::default().run(pipeline, samples)
}

/// Run the pipeline, turning a panic into an error
fn invoke<P>(pipeline: &P, text: &str) -> Result<PipelineOutput>
where
    P: ParsePipeline + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| pipeline.run(text))) {
        Ok(result) => result,
        Err(payload) => Err(Error::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn summarize(output: &PipelineOutput) -> String {
    format!(
        "{} segments, {} structural errors",
        output.segment_count(),
        output.errors.len()
    )
}

fn log_outcome(result: &SampleResult) {
    if result.ok {
        info!(sample = %result.name, mutated = result.mutated, "Sample passed");
    } else {
        warn!(
            sample = %result.name,
            mutated = result.mutated,
            error = result.error.as_deref().unwrap_or_default(),
            "Sample failed"
        );
    }
}
