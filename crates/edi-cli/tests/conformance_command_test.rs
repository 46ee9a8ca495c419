use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::Builder;

fn sample_arg(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata/samples")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn run_edi(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edi"))
        .args(args)
        .output()
        .expect("run edi")
}

#[test]
fn corpus_passes_conformance() {
    let orders = sample_arg("orders_d96a.edi");
    let desadv = sample_arg("desadv_custom_una.edi");
    let aperak = sample_arg("aperak_single_line.edi");
    let output = run_edi(&["conformance", &orders, &desadv, &aperak, "--pretty"]);

    assert!(output.status.success(), "stdout: {}", String::from_utf8_lossy(&output.stdout));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(results.iter().filter(|r| r["mutated"] == true).count(), 2);
    assert!(results.iter().all(|r| r["ok"] == true));
}

#[test]
fn empty_sample_fails_conformance() {
    let mut blank = Builder::new().suffix(".edi").tempfile().unwrap();
    blank.write_all(b"\n").unwrap();
    let blank_arg = blank.path().to_string_lossy().into_owned();
    let aperak = sample_arg("aperak_single_line.edi");

    let output = run_edi(&["conformance", &aperak, &blank_arg]);

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["results"][1]["ok"], false);
    assert!(json["results"][1]["error"].as_str().unwrap().contains("empty"));
}

#[test]
fn config_limits_mutated_samples() {
    let mut config = Builder::new().suffix(".yaml").tempfile().unwrap();
    config
        .write_all(b"conformance:\n  mutated_sample_limit: 0\n")
        .unwrap();
    let config_arg = config.path().to_string_lossy().into_owned();
    let aperak = sample_arg("aperak_single_line.edi");

    let output = run_edi(&["-c", &config_arg, "conformance", &aperak]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
}

#[test]
fn conformance_requires_files() {
    let output = run_edi(&["conformance"]);
    assert!(!output.status.success());
}
