//! Layered configuration.
//!
//! Sources, lowest priority first: built-in defaults, a TOML file
//! (`sdb.toml` unless another path is given), `SDB_`-prefixed environment
//! variables, then command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::ensure;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::SdbResult;
use crate::monitor::Mode;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "sdb.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt shown by the interactive line editor.
    pub prompt: String,
    /// Run to completion without reading commands.
    pub batch: bool,
    /// Log level: error, warn, info, debug, trace or off.
    pub log: String,
    /// Where interactive history is persisted, if anywhere.
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    /// Guest image; the built-in image is used when absent.
    pub image: Option<PathBuf>,
    pub mem_base: u64,
    pub mem_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "(sdb) ".into(),
            batch: false,
            log: "off".into(),
            history_file: None,
            history_size: 100,
            image: None,
            mem_base: 0x8000_0000,
            mem_size: 0x800_0000,
        }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl Config {
    /// Load the configuration. An explicitly named file must exist.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> SdbResult<Self> {
        let file = match file {
            Some(path) => {
                ensure!(path.exists(), "config file {} not found", path.display());
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&file))
            .merge(Env::prefixed("SDB_"))
            .merge(Serialized::defaults(overrides))
            .extract()?;

        ensure!(config.mem_size >= 4, "mem_size must hold at least one word");
        Ok(config)
    }

    pub fn mode(&self) -> Mode {
        if self.batch { Mode::Batch } else { Mode::Interactive }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(Config::load(Some(&missing), &Overrides::default()).is_err());

        let cfg = Config::default();
        assert_eq!(cfg.prompt, "(sdb) ");
        assert_eq!(cfg.mode(), Mode::Interactive);
    }

    #[test]
    fn file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "prompt = \"> \"\nlog = \"info\"\nmem_base = 0x1000\nmem_size = 4096"
        )
        .unwrap();

        let overrides = Overrides {
            batch: Some(true),
            log: Some("trace".into()),
            image: None,
        };
        let cfg = Config::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(cfg.prompt, "> ");
        assert_eq!(cfg.log, "trace");
        assert_eq!(cfg.mem_base, 0x1000);
        assert_eq!(cfg.mem_size, 4096);
        assert_eq!(cfg.mode(), Mode::Batch);
        assert_eq!(cfg.history_size, 100);
    }

    #[test]
    fn tiny_memory_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mem_size = 2").unwrap();
        assert!(Config::load(Some(file.path()), &Overrides::default()).is_err());
    }
}
