//! End-to-end runs of the `calavera` binary in non-interactive mode

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PACKAGE_JSON: &str = r#"{
  "name": "demo-app",
  "version": "0.1.0",
  "type": "module",
  "scripts": {
    "dev": "vite"
  }
}
"#;

fn project() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory for tests");
    fs::write(dir.path().join("package.json"), PACKAGE_JSON).unwrap();
    dir
}

fn calavera(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("calavera").unwrap();
    cmd.arg("--directory").arg(dir).arg("--skip-install");
    cmd
}

fn manifest(dir: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
}

fn files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn editorconfig_only_writes_one_file() {
    let dir = project();

    calavera(dir.path())
        .args(["--tools", "editorconfig"])
        .assert()
        .success();

    assert_eq!(files(dir.path()), [".editorconfig", "package.json"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        PACKAGE_JSON
    );
}

#[test]
fn prettier_and_eslint_are_wired_together() {
    let dir = project();

    calavera(dir.path())
        .args(["--tools", "prettier,eslint"])
        .assert()
        .success();

    let config = fs::read_to_string(dir.path().join("eslint.config.js")).unwrap();
    assert!(config.contains("import eslintConfigPrettier from \"eslint-config-prettier\";"));
    assert!(dir.path().join(".prettierignore").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join(".prettierrc.json")).unwrap(),
        "{}\n"
    );

    let manifest = manifest(dir.path());
    let keys: Vec<&String> = manifest.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["name", "version", "type", "scripts"]);
    assert_eq!(manifest["scripts"]["dev"], "vite");
    assert_eq!(manifest["scripts"]["prettier:format"], "prettier --write .");
    assert_eq!(manifest["scripts"]["lint:eslint"], "eslint .");
}

#[test]
fn typescript_setup_writes_nested_base_config() {
    let dir = project();

    calavera(dir.path())
        .args(["--tools", "tsconfig-noemit,eslint"])
        .assert()
        .success();

    let base: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join(".project-calavera/tsconfig.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(base["compilerOptions"]["noEmit"], true);
    assert_eq!(base["compilerOptions"]["moduleResolution"], "bundler");

    let config = fs::read_to_string(dir.path().join("eslint.config.js")).unwrap();
    assert!(config.contains("tseslint.configs.strictTypeChecked"));
    assert_eq!(manifest(dir.path())["scripts"]["build:ts"], "tsc");
}

#[test]
fn rerunning_overwrites_instead_of_duplicating() {
    let dir = project();
    let tools = "stylelint,eslint-css,prettier,editorconfig";

    calavera(dir.path()).args(["--tools", tools]).assert().success();
    let first_config = fs::read_to_string(dir.path().join(".stylelintrc.json")).unwrap();
    let first_manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();

    calavera(dir.path()).args(["--tools", tools]).assert().success();

    assert_eq!(
        fs::read_to_string(dir.path().join(".stylelintrc.json")).unwrap(),
        first_config
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        first_manifest
    );
    assert_eq!(first_manifest.matches("\"lint:css\"").count(), 1);
}

#[test]
fn conflicting_typescript_variants_are_rejected() {
    let dir = project();

    calavera(dir.path())
        .args(["--tools", "tsconfig,tsconfig-noemit"])
        .assert()
        .failure();

    assert_eq!(files(dir.path()), ["package.json"]);
}

#[test]
fn unknown_tool_is_rejected() {
    let dir = project();

    calavera(dir.path())
        .args(["--tools", "prettier,rome"])
        .assert()
        .failure();

    assert_eq!(files(dir.path()), ["package.json"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();

    calavera(&dir.path().join("nope"))
        .args(["--tools", "editorconfig"])
        .assert()
        .failure();
}

#[test]
fn unknown_package_manager_is_a_usage_error() {
    let dir = project();

    calavera(dir.path())
        .args(["--tools", "prettier", "--package-manager", "cargo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown package manager"));

    assert_eq!(files(dir.path()), ["package.json"]);
}
