//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rocket_cart::CartConfig;
use rocket_observability::{init_logging, LogConfig};

use crate::output::Output;

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["rocket.toml", ".rocket.toml", "rocket.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Cart configuration.
    pub config: CartConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => find_config(&cwd),
        };

        let mut config = match &config_path {
            Some(path) => CartConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => CartConfig::default(),
        };

        // Storage paths in a config file are relative to that file.
        let base = config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(cwd.as_path())
            .to_path_buf();
        config.storage.dir = resolve(&base, &config.storage.dir);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Install the tracing subscriber. `--verbose` raises the filter to debug.
    pub fn init_logging(&self) {
        let config = if self.output.is_verbose() {
            LogConfig {
                filter: "debug".to_string(),
                ..self.config.logging.clone()
            }
        } else {
            self.config.logging.clone()
        };
        init_logging(&config);
    }

    /// Path new config files are written to.
    pub fn default_config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_NAMES[0])
    }
}

/// Find the nearest config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

fn resolve(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
