//! TypeScript config renderer
//!
//! The root `tsconfig.json` only extends the base config kept in
//! `.project-calavera/`.

use super::{ConfigArtifact, Rendered, Script};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const TSCONFIG_FILE: &str = "tsconfig.json";
pub const BASE_CONFIG_DIR: &str = ".project-calavera";

#[derive(Debug, Serialize)]
struct RootConfig {
    extends: String,
}

#[derive(Debug, Serialize)]
struct BaseConfig {
    include: Vec<&'static str>,
    exclude: Vec<&'static str>,
    #[serde(rename = "compilerOptions")]
    compiler_options: CompilerOptions,
}

/// Options are serialized in declaration order; unset ones are skipped
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    no_emit: Option<bool>,
    allow_importing_ts_extensions: bool,
    allow_js: bool,
    es_module_interop: bool,
    force_consistent_casing_in_file_names: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<&'static str>,
    target: &'static str,
    module_resolution: &'static str,
    no_unchecked_indexed_access: bool,
    resolve_json_module: bool,
    skip_lib_check: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_map: Option<bool>,
    strict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    isolated_modules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verbatim_module_syntax: Option<bool>,
}

impl CompilerOptions {
    /// `tsc` emits ES modules itself
    fn emit() -> Self {
        Self {
            allow_importing_ts_extensions: true,
            allow_js: true,
            es_module_interop: true,
            force_consistent_casing_in_file_names: true,
            module: Some("ESNext"),
            target: "ESNext",
            module_resolution: "node",
            no_unchecked_indexed_access: true,
            resolve_json_module: true,
            skip_lib_check: true,
            source_map: Some(true),
            strict: true,
            ..Self::default()
        }
    }

    /// Type-check only; a bundler does the emitting
    fn no_emit() -> Self {
        Self {
            no_emit: Some(true),
            allow_importing_ts_extensions: true,
            allow_js: true,
            es_module_interop: true,
            force_consistent_casing_in_file_names: true,
            target: "ESNext",
            module_resolution: "bundler",
            no_unchecked_indexed_access: true,
            resolve_json_module: true,
            skip_lib_check: true,
            strict: true,
            isolated_modules: Some(true),
            verbatim_module_syntax: Some(true),
            ..Self::default()
        }
    }
}

/// Path of the base config, relative to the project root
pub fn base_config_path() -> PathBuf {
    Path::new(BASE_CONFIG_DIR).join(TSCONFIG_FILE)
}

pub fn render_tsconfig(no_emit: bool) -> serde_json::Result<Rendered> {
    let root = RootConfig {
        extends: format!("./{BASE_CONFIG_DIR}/{TSCONFIG_FILE}"),
    };

    let base = BaseConfig {
        include: vec!["src/**/*.ts*"],
        exclude: vec!["node_modules"],
        compiler_options: if no_emit {
            CompilerOptions::no_emit()
        } else {
            CompilerOptions::emit()
        },
    };

    Ok(Rendered {
        label: "TypeScript",
        config: "TypeScript",
        artifacts: vec![
            ConfigArtifact::json(base_config_path(), &base)?,
            ConfigArtifact::json(TSCONFIG_FILE, &root)?,
        ],
        scripts: vec![Script::new("build:ts", "tsc")],
        dependencies: vec!["typescript"],
    })
}
