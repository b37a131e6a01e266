//! Non-destructive access to the project's `package.json`
//!
//! Only keys under `scripts` are ever touched. Everything else, including key
//! order, survives a load/save round trip because `serde_json` is built with
//! `preserve_order`.

use crate::error::{Result, SetupError};
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const MANIFEST_FILE: &str = "package.json";

const ARTIFACT: &str = "package.json";

/// In-memory copy of `package.json`
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Manifest {
    /// Whether a manifest exists in `dir`
    pub fn exists(dir: &Path) -> bool {
        dir.join(MANIFEST_FILE).is_file()
    }

    /// Read and parse `package.json` from `dir`
    pub async fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SetupError::ManifestNotFound { path });
            }
            Err(e) => return Err(SetupError::config_write(ARTIFACT, e)),
        };

        Self::parse(path, &raw)
    }

    fn parse(path: PathBuf, raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| SetupError::config_write(ARTIFACT, e))?;

        match value {
            Value::Object(root) => Ok(Self { path, root }),
            _ => Err(SetupError::config_write(
                ARTIFACT,
                io::Error::new(io::ErrorKind::InvalidData, "top-level value is not an object"),
            )),
        }
    }

    /// Look up a script command by name
    pub fn script(&self, name: &str) -> Option<&str> {
        self.root.get("scripts")?.get(name)?.as_str()
    }

    /// Insert or overwrite one entry under `scripts`
    ///
    /// A missing `scripts` object is appended after the existing keys.
    pub fn set_script(&mut self, name: &str, command: &str) -> Result<()> {
        let scripts = self
            .root
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));

        match scripts {
            Value::Object(scripts) => {
                scripts.insert(name.to_string(), Value::String(command.to_string()));
                Ok(())
            }
            _ => Err(SetupError::config_write(
                ARTIFACT,
                io::Error::new(io::ErrorKind::InvalidData, "\"scripts\" is not an object"),
            )),
        }
    }

    /// Pretty-printed manifest text with a trailing newline
    pub fn to_json_string(&self) -> Result<String> {
        let text = serde_json::to_string_pretty(&self.root)
            .map_err(|e| SetupError::config_write(ARTIFACT, e))?;
        Ok(format!("{text}\n"))
    }

    /// Write the manifest back to disk.
    ///
    /// The text goes to a sibling temp file first and is then renamed over
    /// the real path, so an interrupted write never leaves a truncated file.
    pub async fn save(&self) -> Result<()> {
        let text = self.to_json_string()?;
        let tmp = self.path.with_extension("json.calavera-tmp");

        fs::write(&tmp, text)
            .await
            .map_err(|e| SetupError::config_write(ARTIFACT, e))?;

        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(SetupError::config_write(ARTIFACT, e));
        }

        Ok(())
    }
}
