/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const SAMPLE_PROJECT: &str = "tests/fixtures/sample-project";
const TREE_DUMP: &str = "tests/fixtures/package-tree.json";

fn run_json(extra_args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("npm-sbom")
        .args(["-p", SAMPLE_PROJECT, "-f", "json"])
        .args(extra_args)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn component_names(bom: &Value) -> Vec<String> {
    bom["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("npm-sbom")
            .args(["-p", SAMPLE_PROJECT])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("npm-sbom").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("npm-sbom").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("npm-sbom")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("npm-sbom")
            .args(["-f", "markdown"])
            .assert()
            .code(2);
    }

    /// Exit code 1: Application error - non-existent project path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("npm-sbom")
            .args(["-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Directory does not exist"));
    }

    /// Exit code 1: Application error - path is a file, not a directory
    #[test]
    fn test_exit_code_application_error_file_not_directory() {
        cargo_bin_cmd!("npm-sbom")
            .args(["-p", "Cargo.toml"])
            .assert()
            .code(1);
    }

    /// Exit code 1: Application error - directory without package.json
    #[test]
    fn test_exit_code_application_error_missing_manifest() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("npm-sbom")
            .args(["-p", dir.path().to_str().unwrap()])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("package.json not found"));
    }
}

#[test]
fn test_e2e_xml_default_format() {
    cargo_bin_cmd!("npm-sbom")
        .args(["-p", SAMPLE_PROJECT])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
        ))
        .stdout(predicate::str::contains(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4" serialNumber="urn:uuid:"#,
        ))
        .stdout(predicate::str::contains(
            r#"<component type="library" bom-ref="pkg:npm/lodash@4.17.21">"#,
        ))
        .stdout(predicate::str::contains(
            r#"<component type="framework" bom-ref="pkg:npm/%40scope/widget@2.1.0">"#,
        ))
        .stdout(predicate::str::contains("<group>@scope</group>"))
        .stdout(predicate::str::contains(r#"<hash alg="SHA-1">abc123</hash>"#))
        .stdout(predicate::str::contains(r#"<text content-type="text/markdown">"#))
        .stdout(predicate::str::contains("sample-project").not())
        .stdout(predicate::str::contains("stray").not());
}

#[test]
fn test_e2e_json_format() {
    let bom = run_json(&[]);

    assert_eq!(bom["bomFormat"], "CycloneDX");
    assert_eq!(bom["specVersion"], "1.4");
    assert_eq!(bom["version"], 1);
    assert!(bom["serialNumber"].as_str().unwrap().starts_with("urn:uuid:"));
    assert_eq!(bom["metadata"]["tools"][0]["name"], "npm-sbom");
    assert_eq!(
        component_names(&bom),
        vec!["lodash", "widget", "cyc-a", "cyc-b"]
    );

    let lodash = &bom["components"][0];
    assert_eq!(lodash["purl"], "pkg:npm/lodash@4.17.21");
    assert_eq!(lodash["description"], "Lodash modular utilities.");
    assert_eq!(lodash["hashes"][0]["alg"], "SHA-512");
    assert_eq!(
        lodash["hashes"][0]["content"],
        "307f775a6ed1dd4ee3489ffc8509914787805ba099d6fca2ded9f79e18c3750af1f06e5d5cb9a952d7ba21371ec318b001381c31f062563f88e43eb385d0b474"
    );
    assert_eq!(lodash["licenses"][0]["license"]["id"], "MIT");
    assert!(lodash["licenses"][0]["license"]["text"]["content"]
        .as_str()
        .unwrap()
        .starts_with("Copyright OpenJS Foundation"));
    assert!(lodash["licenses"][0]["license"]["text"]
        .get("contentType")
        .is_none());
    assert_eq!(lodash["externalReferences"][0]["type"], "website");
    assert_eq!(lodash["externalReferences"][1]["type"], "issue-tracker");
    assert_eq!(lodash["externalReferences"][2]["type"], "vcs");

    let widget = &bom["components"][1];
    assert_eq!(widget["group"], "@scope");
    assert_eq!(widget["type"], "framework");
    assert_eq!(widget["licenses"][0]["license"]["name"], "Some Custom License");
    assert_eq!(
        widget["licenses"][0]["license"]["text"]["contentType"],
        "text/markdown"
    );
}

#[test]
fn test_e2e_cycle_and_invalid_license_warning() {
    cargo_bin_cmd!("npm-sbom")
        .args(["-p", SAMPLE_PROJECT, "-f", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Invalid license definition in package: cyc-b:1.2.0. Skipping",
        ));

    let bom = run_json(&[]);
    let cyc_b = &bom["components"][3];
    assert_eq!(cyc_b["name"], "cyc-b");
    assert_eq!(cyc_b["licenses"].as_array().unwrap().len(), 1);
    assert_eq!(cyc_b["licenses"][0]["license"]["id"], "MIT");
}

#[test]
fn test_e2e_include_dev_dependencies() {
    let bom = run_json(&["--include-dev"]);
    assert_eq!(
        component_names(&bom),
        vec!["lodash", "widget", "cyc-a", "cyc-b", "dev-tool"]
    );
}

#[test]
fn test_e2e_no_serial_number() {
    let bom = run_json(&["--no-serial-number"]);
    assert!(bom.get("serialNumber").is_none());
}

#[test]
fn test_e2e_no_license_data() {
    let bom = run_json(&["--no-license-data"]);
    for component in bom["components"].as_array().unwrap() {
        assert!(component.get("licenses").is_none());
    }
}

#[test]
fn test_e2e_no_license_text() {
    let bom = run_json(&["--no-license-text"]);
    let lodash = &bom["components"][0];
    assert_eq!(lodash["licenses"][0]["license"]["id"], "MIT");
    assert!(lodash["licenses"][0]["license"].get("text").is_none());
}

#[test]
fn test_e2e_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("bom.xml");

    cargo_bin_cmd!("npm-sbom")
        .args(["-p", SAMPLE_PROJECT, "-o", output_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Output complete"));

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("<purl>pkg:npm/lodash@4.17.21</purl>"));
}

#[test]
fn test_e2e_output_file_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("missing/bom.xml");

    cargo_bin_cmd!("npm-sbom")
        .args(["-p", SAMPLE_PROJECT, "-o", output_path.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Parent directory does not exist"));
}

#[test]
fn test_e2e_tree_dump() {
    let output = cargo_bin_cmd!("npm-sbom")
        .args(["-p", SAMPLE_PROJECT, "--tree", TREE_DUMP, "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let bom: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(component_names(&bom), vec!["lodash", "loop"]);
    let lodash = &bom["components"][0];
    assert_eq!(lodash["hashes"][0]["alg"], "SHA-1");
    assert_eq!(lodash["hashes"][0]["content"], "deadbeef");
    // realPath is resolved relative to the dump file
    assert!(lodash["licenses"][0]["license"]["text"]["content"]
        .as_str()
        .unwrap()
        .starts_with("Copyright OpenJS Foundation"));
}

#[test]
fn test_e2e_tree_dump_missing_file() {
    cargo_bin_cmd!("npm-sbom")
        .args(["-p", SAMPLE_PROJECT, "--tree", "tests/fixtures/missing.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read package tree"));
}

#[test]
fn test_e2e_malformed_integrity_aborts() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "app", "version": "1.0.0", "dependencies": {"bad": "1.0.0"}}"#,
    )
    .unwrap();
    let bad_dir = dir.path().join("node_modules/bad");
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(
        bad_dir.join("package.json"),
        r#"{"name": "bad", "version": "1.0.0", "_integrity": "sha512-@@@"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("npm-sbom")
        .args(["-p", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid integrity value for bad@1.0.0"));
}

#[test]
fn test_e2e_lenient_integrity_and_mixed_case_name() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "app", "version": "1.0.0", "dependencies": {"JSONStream": "1.3.5"}}"#,
    )
    .unwrap();
    let pkg_dir = dir.path().join("node_modules/JSONStream");
    fs::create_dir_all(&pkg_dir).unwrap();
    fs::write(
        pkg_dir.join("package.json"),
        r#"{"name": "JSONStream", "version": "1.3.5", "_integrity": "deadbeef sha512-AQIDBA"}"#,
    )
    .unwrap();

    let output = cargo_bin_cmd!("npm-sbom")
        .args(["-p", dir.path().to_str().unwrap(), "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let bom: Value = serde_json::from_slice(&output.stdout).unwrap();

    let component = &bom["components"][0];
    assert_eq!(component["name"], "JSONStream");
    assert_eq!(component["purl"], "pkg:npm/JSONStream@1.3.5");
    assert_eq!(component["hashes"][0]["alg"], "SHA-512");
    assert_eq!(component["hashes"][0]["content"], "01020304");
}
