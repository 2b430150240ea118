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

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{DEFAULT_NUMBER, DEFAULT_OUTPUT};
use crate::error::ConfigError;

/// Supported line layouts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogFormat {
    ApacheCommon,
    ApacheCombined,
    ApacheError,
    Rfc3164,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apache_common" => Ok(Self::ApacheCommon),
            "apache_combined" => Ok(Self::ApacheCombined),
            "apache_error" => Ok(Self::ApacheError),
            "rfc3164" => Ok(Self::Rfc3164),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ApacheCommon => "apache_common",
            Self::ApacheCombined => "apache_combined",
            Self::ApacheError => "apache_error",
            Self::Rfc3164 => "rfc3164",
        };
        f.write_str(name)
    }
}

/// Where generated lines go.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputKind {
    /// Standard output. Never split.
    Stdout,
    /// Plain text file.
    Log,
    /// Gzip-compressed file.
    Gz,
}

impl FromStr for OutputKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(Self::Stdout),
            "log" => Ok(Self::Log),
            "gz" => Ok(Self::Gz),
            other => Err(ConfigError::InvalidType(other.to_string())),
        }
    }
}

/// How much to generate in total.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Target {
    Lines(u64),
    Bytes(u64),
    /// Line-count accounting, no end.
    Forever,
}

/// Validated generation parameters.
#[derive(Clone, Debug)]
pub struct Options {
    pub format: LogFormat,
    pub output: String,
    pub kind: OutputKind,
    pub number: u64,
    pub bytes: u64,
    pub sleep: f64,
    pub split_by: u64,
    pub overwrite: bool,
    pub forever: bool,
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: LogFormat::ApacheCommon,
            output: DEFAULT_OUTPUT.to_string(),
            kind: OutputKind::Stdout,
            number: DEFAULT_NUMBER as u64,
            bytes: 0,
            sleep: 0.0,
            split_by: 0,
            overwrite: false,
            forever: false,
            seed: None,
        }
    }
}

impl Options {
    /// Non-zero bytes win over the line count; `forever` wins over both.
    pub fn target(&self) -> Target {
        if self.forever {
            if self.bytes > 0 {
                // Byte accounting still drives splitting, but the run never ends.
                Target::Bytes(u64::MAX)
            } else {
                Target::Forever
            }
        } else if self.bytes > 0 {
            Target::Bytes(self.bytes)
        } else {
            Target::Lines(self.number)
        }
    }

    /// Synthetic clock step between lines, truncated to milliseconds.
    pub fn pacing(&self) -> Duration {
        Duration::from_millis((self.sleep * 1000.0) as u64)
    }

    /// Splitting applies to file outputs with a non-zero threshold.
    pub fn splits(&self) -> bool {
        self.kind != OutputKind::Stdout && self.split_by > 0
    }
}

/// Unvalidated values as they come from the command line and config file.
#[derive(Clone, Debug)]
pub struct RawOptions {
    pub format: String,
    pub output: String,
    pub log_type: String,
    pub number: i64,
    pub bytes: i64,
    pub sleep: f64,
    pub split_by: i64,
    pub overwrite: bool,
    pub forever: bool,
    pub seed: Option<u64>,
}

fn non_negative(value: i64, field: &'static str) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| ConfigError::Negative { field })
}

impl RawOptions {
    pub fn validate(self) -> Result<Options, ConfigError> {
        let format = self.format.parse::<LogFormat>()?;
        let kind = self.log_type.parse::<OutputKind>()?;
        let number = non_negative(self.number, "lines")?;
        let bytes = non_negative(self.bytes, "bytes")?;
        if self.sleep.is_nan() || self.sleep < 0.0 {
            return Err(ConfigError::Negative { field: "sleep" });
        }
        let split_by = non_negative(self.split_by, "split-by")?;

        Ok(Options {
            format,
            output: self.output,
            kind,
            number,
            bytes,
            sleep: self.sleep,
            split_by,
            overwrite: self.overwrite,
            forever: self.forever,
            seed: self.seed,
        })
    }
}
