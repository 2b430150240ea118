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

//! Fake log generator.
//!
//! Fabricates log lines in a handful of common formats and streams them to
//! stdout, a plain file or a gzip file, optionally splitting file output
//! once a line or byte threshold is crossed.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fake;
pub mod format;
pub mod generator;
pub mod logger;
pub mod naming;
pub mod options;
pub mod writer;

pub use error::{ConfigError, GenerateError};
pub use format::{FakeLogs, LineSource};
pub use generator::{Summary, generate, generate_with};
pub use options::{LogFormat, Options, OutputKind};
