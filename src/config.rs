use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::command::TestCommand;

pub const CONFIG_FILE_NAME: &str = ".locfixrc.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_corrections_csv")]
    pub corrections_csv: String,
    #[serde(default = "default_source_file", alias = "modifiersFile")]
    pub source_file: String,
    #[serde(default = "default_insert_header_lines")]
    pub insert_header_lines: usize,
    #[serde(default = "default_correct_header_lines")]
    pub correct_header_lines: usize,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
    #[serde(default)]
    pub test: TestConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    #[serde(default = "default_test_command")]
    pub command: String,
    #[serde(default = "default_test_env")]
    pub env: BTreeMap<String, String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_corrections_csv() -> String {
    "res/modifier_names.csv".to_string()
}

fn default_source_file() -> String {
    "modifiers.rs".to_string()
}

fn default_insert_header_lines() -> usize {
    155
}

fn default_correct_header_lines() -> usize {
    160
}

fn default_max_rounds() -> usize {
    100
}

fn default_test_command() -> String {
    [
        "cargo test --package anbennar-wiki --bin anbennar-wiki",
        "bundled_modifiers::tests::test_triggered_modifiers_parse --no-fail-fast",
        "-- --format=json --exact -Z unstable-options --show-output",
    ]
    .join(" ")
}

fn default_test_env() -> BTreeMap<String, String> {
    BTreeMap::from([("RUSTC_BOOTSTRAP".to_string(), "1".to_string())])
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corrections_csv: default_corrections_csv(),
            source_file: default_source_file(),
            insert_header_lines: default_insert_header_lines(),
            correct_header_lines: default_correct_header_lines(),
            max_rounds: default_max_rounds(),
            test: TestConfig::default(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            command: default_test_command(),
            env: default_test_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate the values the resolve loop depends on.
    pub fn validate_resolve(&self) -> Result<()> {
        self.test.validate()?;
        if self.max_rounds == 0 {
            bail!("'maxRounds' must be greater than 0");
        }
        Ok(())
    }
}

impl TestConfig {
    /// Validate the test section. Only commands that run tests call this.
    pub fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            bail!("'test.command' must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("'test.timeoutSecs' must be greater than 0");
        }
        Ok(())
    }

    pub fn to_command(&self, working_dir: &Path) -> TestCommand {
        TestCommand {
            command: self.command.clone(),
            env: self.env.clone(),
            working_dir: Some(working_dir.to_path_buf()),
            timeout: Some(Duration::from_secs(self.timeout_secs)),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that relative paths in the config are resolved against:
    /// the config file's directory, or the start directory for defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl ConfigLoadResult {
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
