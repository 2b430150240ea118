// Copyright (c) 2025 Sean McNamara <smcnam@gmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cli::Cli;
use crate::constants::{
    DEFAULT_BYTES, DEFAULT_FORMAT, DEFAULT_NUMBER, DEFAULT_OUTPUT, DEFAULT_SLEEP,
    DEFAULT_SPLIT_BY, DEFAULT_TYPE,
};
use crate::error::ConfigError;
use crate::options::RawOptions;

/// Configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log format name
    pub format: Option<String>,

    /// Output filename
    pub output: Option<String>,

    /// Output type (stdout, log, gz)
    #[serde(rename = "type")]
    pub log_type: Option<String>,

    /// Number of lines to generate
    pub number: Option<i64>,

    /// Size of logs to generate (in bytes)
    pub bytes: Option<i64>,

    /// Interval between lines (in seconds)
    pub sleep: Option<f64>,

    /// Maximum lines or bytes per file
    pub split_by: Option<i64>,

    /// Replace existing output files
    pub overwrite: Option<bool>,

    /// Generate until interrupted
    #[serde(rename = "loop")]
    pub forever: Option<bool>,

    pub seed: Option<u64>,

    /// Status log file path
    pub log_file: Option<String>,
}

impl Config {
    /// Load config from a file, or return default if file doesn't exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let file_err = |message: String| ConfigError::File {
            path: path.display().to_string(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|err| file_err(err.to_string()))?;
        toml::from_str(&content).map_err(|err| file_err(err.to_string()))
    }

    /// Merge this config with CLI args, where CLI args take precedence
    pub fn merge_with_cli<T>(&self, cli_value: T, config_value: Option<T>, default_value: T) -> T
    where
        T: PartialEq + Clone,
    {
        // If CLI value differs from default, use CLI value
        if cli_value != default_value {
            cli_value
        } else if let Some(config_val) = config_value {
            config_val
        } else {
            default_value
        }
    }

    /// Combines the command line with this file into unvalidated options.
    pub fn resolve(&self, cli: &Cli) -> RawOptions {
        RawOptions {
            format: self.merge_with_cli(
                cli.format.clone(),
                self.format.clone(),
                DEFAULT_FORMAT.to_string(),
            ),
            output: self.merge_with_cli(
                cli.output.clone(),
                self.output.clone(),
                DEFAULT_OUTPUT.to_string(),
            ),
            log_type: self.merge_with_cli(
                cli.log_type.clone(),
                self.log_type.clone(),
                DEFAULT_TYPE.to_string(),
            ),
            number: self.merge_with_cli(cli.number, self.number, DEFAULT_NUMBER),
            bytes: self.merge_with_cli(cli.bytes, self.bytes, DEFAULT_BYTES),
            sleep: self.merge_with_cli(cli.sleep, self.sleep, DEFAULT_SLEEP),
            split_by: self.merge_with_cli(cli.split_by, self.split_by, DEFAULT_SPLIT_BY),
            overwrite: self.merge_with_cli(cli.overwrite, self.overwrite, false),
            forever: self.merge_with_cli(cli.forever, self.forever, false),
            seed: cli.seed.or(self.seed),
        }
    }

    /// Status log path, command line first.
    pub fn log_file(&self, cli: &Cli) -> Option<String> {
        cli.log_file.clone().or_else(|| self.log_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("flog.toml")).unwrap();
        assert!(config.format.is_none());
        assert!(config.number.is_none());
    }

    #[test]
    fn test_file_values_fill_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flog.toml");
        fs::write(
            &path,
            "format = \"rfc3164\"\ntype = \"gz\"\nnumber = 20\nsplit_by = 5\nloop = true\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        let cli = Cli::parse_from(["flog"]);
        let raw = config.resolve(&cli);

        assert_eq!(raw.format, "rfc3164");
        assert_eq!(raw.log_type, "gz");
        assert_eq!(raw.number, 20);
        assert_eq!(raw.split_by, 5);
        assert!(raw.forever);
        assert_eq!(raw.output, DEFAULT_OUTPUT);
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flog.toml");
        fs::write(&path, "format = \"rfc3164\"\nnumber = 20\nseed = 1\n").unwrap();

        let config = Config::load(&path).unwrap();
        let cli = Cli::parse_from(["flog", "-f", "apache_error", "-n", "3", "--seed", "9"]);
        let raw = config.resolve(&cli);

        assert_eq!(raw.format, "apache_error");
        assert_eq!(raw.number, 3);
        assert_eq!(raw.seed, Some(9));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flog.toml");
        fs::write(&path, "number = \"many\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::File { .. }));
    }
}
