use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use taskdown_core::DEFAULT_HEADING;

#[derive(Deserialize, PartialEq, Debug)]
#[serde(default)]
pub struct Root {
    /// Markdown document holding the task section.
    pub file: PathBuf,
    pub heading: String,
}

impl Default for Root {
    fn default() -> Self {
        Self {
            file: PathBuf::from("README.md"),
            heading: DEFAULT_HEADING.to_owned(),
        }
    }
}

impl Root {
    /// Read the settings file, falling back to defaults when it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no {}, using default settings", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(err).with_context(|| path.display().to_string()),
        };
        Self::parse(&content).with_context(|| path.display().to_string())
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_norway::from_str(content)?)
    }
}
