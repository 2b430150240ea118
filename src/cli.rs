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

use clap::Parser;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BYTES, DEFAULT_FORMAT, DEFAULT_NUMBER, DEFAULT_OUTPUT, DEFAULT_SLEEP,
    DEFAULT_SPLIT_BY, DEFAULT_TYPE, LONG_ABOUT,
};

#[derive(Parser, Debug)]
#[command(name = "flog")]
#[command(about = "A fake log generator for common log formats")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Log format ("apache_common"|"apache_combined"|"apache_error"|"rfc3164")
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Output filename. Path-like is allowed
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Log output type ("stdout"|"log"|"gz")
    #[arg(short = 't', long = "type", default_value = DEFAULT_TYPE)]
    pub log_type: String,

    /// Number of lines to generate
    #[arg(short, long, default_value_t = DEFAULT_NUMBER, allow_negative_numbers = true)]
    pub number: i64,

    /// Size of logs to generate (in bytes). Takes precedence over --number when non-zero
    #[arg(short, long, default_value_t = DEFAULT_BYTES, allow_negative_numbers = true)]
    pub bytes: i64,

    /// Interval between lines (in seconds). Only shifts timestamps, never actually sleeps
    #[arg(short, long, default_value_t = DEFAULT_SLEEP, allow_negative_numbers = true)]
    pub sleep: f64,

    /// Maximum number of lines or bytes per log file (0 disables splitting)
    #[arg(short = 'p', long, default_value_t = DEFAULT_SPLIT_BY, allow_negative_numbers = true)]
    pub split_by: i64,

    /// [Warning] Overwrite the existing log files
    #[arg(short = 'w', long)]
    pub overwrite: bool,

    /// Keep generating until interrupted
    #[arg(short = 'l', long = "loop")]
    pub forever: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also append status notices to this file
    #[arg(long)]
    pub log_file: Option<String>,

    /// Path to config file (defaults to flog.toml in current directory if it exists)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "flog", "-f", "rfc3164", "-o", "out.log", "-t", "gz", "-n", "5", "-p", "2", "-s",
            "0.5", "-w", "-l",
        ])
        .unwrap();
        assert_eq!(cli.format, "rfc3164");
        assert_eq!(cli.output, "out.log");
        assert_eq!(cli.log_type, "gz");
        assert_eq!(cli.number, 5);
        assert_eq!(cli.split_by, 2);
        assert_eq!(cli.sleep, 0.5);
        assert!(cli.overwrite);
        assert!(cli.forever);
    }

    #[test]
    fn test_negative_numbers_reach_validation() {
        let cli = Cli::try_parse_from(["flog", "-n", "-3"]).unwrap();
        assert_eq!(cli.number, -3);
    }
}
