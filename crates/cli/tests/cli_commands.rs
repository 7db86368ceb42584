use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

const SOURCE: &str = r#"
const icon = "M0 0 L10 0 L10 10 Z";
const img = "data:image/png;base64,AAAA";
const markup = '<svg><circle r="5"/></svg>';
const text = "hello world";
"#;

/// analyze on a single file prints the console summary and writes assets.
#[test]
fn analyze_single_file_prints_summary() {
    let temp = tempdir().expect("tempdir");
    let src = temp.path().join("app.js");
    fs::write(&src, SOURCE).expect("write source");
    let out = temp.path().join("out");

    cargo_bin_cmd!("asset-salvage")
        .arg("analyze")
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total literals: 4"))
        .stdout(predicate::str::contains("SVG paths: 1"))
        .stdout(predicate::str::contains("Base64 images: 1"))
        .stdout(predicate::str::contains("<svg> elements: 1"));

    let dir = out.join("app");
    assert!(dir.join("svg_extracted_0.svg").exists());
    assert!(dir.join("base64_image_0.png").exists());
    assert!(dir.join("inline_svg_0.svg").exists());
    assert_eq!(
        fs::read_to_string(dir.join("uncategorized_literals_app.txt")).expect("corpus"),
        "hello world"
    );
    assert!(out.join("summary.json").exists());
}

/// --json keeps stdout machine-readable and reports per-file outcomes.
#[test]
fn analyze_directory_json_reports_skipped_files() {
    let temp = tempdir().expect("tempdir");
    let input = temp.path().join("js");
    fs::create_dir_all(&input).expect("input dir");
    fs::write(input.join("a.js"), SOURCE).expect("a");
    fs::write(input.join("b.js"), "function (").expect("b");
    let out = temp.path().join("out");

    let output = cargo_bin_cmd!("asset-salvage")
        .arg("analyze")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--json")
        .arg("--parallel")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: serde_json::Value = serde_json::from_slice(&output).expect("analyze json");
    assert_eq!(body["totals"]["files"], 2);
    assert_eq!(body["totals"]["analyzed"], 1);
    assert_eq!(body["totals"]["skipped"], 1);
    assert_eq!(body["totals"]["svg_paths"], 1);
    assert_eq!(body["files"][0]["status"], "analyzed");
    assert_eq!(body["files"][1]["status"], "skipped");
    assert!(body["files"][1]["error"].as_str().unwrap_or_default().contains("Failed to parse"));
}

/// Config file values apply unless a flag overrides them.
#[test]
fn analyze_honors_config_prefixes() {
    let temp = tempdir().expect("tempdir");
    let src = temp.path().join("app.js");
    fs::write(&src, SOURCE).expect("write source");
    let config = temp.path().join("salvage.yaml");
    fs::write(&config, "config_version: '0.1.0'\nprefixes:\n  svg_path: icon\n").expect("config");
    let out = temp.path().join("out");

    cargo_bin_cmd!("asset-salvage")
        .arg("analyze")
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .arg("--viewbox")
        .arg("max-square")
        .assert()
        .success();

    let svg = fs::read_to_string(out.join("app").join("icon_0.svg")).expect("renamed svg");
    assert!(svg.contains(r#"viewBox="0 0 20 20""#));
}

#[test]
fn analyze_missing_input_fails() {
    let temp = tempdir().expect("tempdir");
    cargo_bin_cmd!("asset-salvage")
        .arg("analyze")
        .arg(temp.path().join("missing.js"))
        .arg("--out")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input"));
}

#[test]
fn analyze_rejects_unknown_viewbox() {
    let temp = tempdir().expect("tempdir");
    let src = temp.path().join("app.js");
    fs::write(&src, SOURCE).expect("write source");
    cargo_bin_cmd!("asset-salvage")
        .arg("analyze")
        .arg(&src)
        .arg("--viewbox")
        .arg("golden-ratio")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid viewBox heuristic"));
}

#[test]
fn classify_prints_json_outcome() {
    let output = cargo_bin_cmd!("asset-salvage")
        .arg("classify")
        .arg("M0 0 L100 50")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: serde_json::Value = serde_json::from_slice(&output).expect("classify json");
    assert_eq!(body["unclassified"], false);
    assert_eq!(body["assets"][0]["type"], "svg_path");
    assert!(body["assets"][0]["content"].as_str().unwrap_or_default().contains("0 0 110 55"));
}

#[test]
fn classify_reports_unclassified_text() {
    cargo_bin_cmd!("asset-salvage")
        .arg("classify")
        .arg("M365 Copilot")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unclassified"));
}

#[test]
fn detectors_lists_in_priority_order() {
    cargo_bin_cmd!("asset-salvage")
        .arg("detectors")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. svg-path"))
        .stdout(predicate::str::contains("2. base64-image"))
        .stdout(predicate::str::contains("3. inline-svg"));
}

#[test]
fn init_config_writes_default_and_refuses_overwrite() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("asset-salvage.json");

    cargo_bin_cmd!("asset-salvage")
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .assert()
        .success();
    let body: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("config")).expect("config json");
    assert_eq!(body["config_version"], "0.1.0");
    assert_eq!(body["viewbox"], "min-max-extent");

    cargo_bin_cmd!("asset-salvage")
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cargo_bin_cmd!("asset-salvage")
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .arg("--force")
        .assert()
        .success();
}
