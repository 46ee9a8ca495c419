//! Command implementations

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use edi_adapter_edifact::parse as tokenize;
use edi_conformance::{ConformanceTester, ParsePipeline, ReferencePipeline, Sample};
use edi_mapping::MappingTable;
use edi_validation::{ErrorCode, StructuralError, StructuralValidator, ValidationConfig};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;

#[derive(Serialize)]
struct ValidationOutput {
    valid: bool,
    errors: Vec<StructuralError>,
}

pub fn parse(input: &Path, pretty: bool) -> anyhow::Result<ExitCode> {
    let text = read_input(input)?;
    let document =
        tokenize(&text).with_context(|| format!("Failed to parse {}", input.display()))?;

    print_json(&document, pretty)?;
    Ok(ExitCode::SUCCESS)
}

pub fn validate(
    input: &Path,
    config: &ValidationConfig,
    pretty: bool,
) -> anyhow::Result<ExitCode> {
    let text = read_input(input)?;

    let errors = match tokenize(&text) {
        Ok(document) => StructuralValidator::with_config(config.clone())
            .validate(&document)
            .into_errors(),
        Err(err) => vec![StructuralError::new(ErrorCode::EmptyInput, err.to_string())],
    };

    info!(input = %input.display(), errors = errors.len(), "Validated");
    let output = ValidationOutput {
        valid: errors.is_empty(),
        errors,
    };
    print_json(&output, pretty)?;

    Ok(if output.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn explain(input: &Path, config: &CliConfig, pretty: bool) -> anyhow::Result<ExitCode> {
    let text = read_input(input)?;
    let pipeline = reference_pipeline(config)?;
    let output = pipeline
        .run(&text)
        .with_context(|| format!("Failed to explain {}", input.display()))?;

    print_json(&output, pretty)?;
    Ok(ExitCode::SUCCESS)
}

pub fn conformance(
    files: &[PathBuf],
    config: &CliConfig,
    pretty: bool,
) -> anyhow::Result<ExitCode> {
    let samples = files
        .iter()
        .map(|path| Ok(Sample::new(path.display().to_string(), read_input(path)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let pipeline = reference_pipeline(config)?;
    let report = ConformanceTester::new(config.conformance.clone()).run(&pipeline, &samples);

    print_json(&report, pretty)?;
    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn reference_pipeline(config: &CliConfig) -> anyhow::Result<ReferencePipeline> {
    let mut pipeline = ReferencePipeline::new().with_validation(config.validation.clone());

    if let Some(path) = &config.mapping_table {
        let table = MappingTable::load(path)
            .with_context(|| format!("Failed to load mapping table {}", path.display()))?;
        pipeline = pipeline.with_table(table);
    }

    Ok(pipeline)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
