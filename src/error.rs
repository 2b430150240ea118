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

use std::io;
use thiserror::Error;

/// Rejected options. Raised before anything is generated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not a valid format")]
    InvalidFormat(String),

    #[error("{0} is not a valid log type")]
    InvalidType(String),

    #[error("{field} can not be negative")]
    Negative { field: &'static str },

    #[error("invalid config file {path}: {message}")]
    File { path: String, message: String },
}

/// Failures while generating. Every variant ends the run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to open {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to {path}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to close {path}")]
    Close {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("interrupted")]
    Interrupted,
}
