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

pub const DEFAULT_FORMAT: &str = "apache_common";
pub const DEFAULT_OUTPUT: &str = "generated.log";
pub const DEFAULT_TYPE: &str = "stdout";
pub const DEFAULT_NUMBER: i64 = 1000;
pub const DEFAULT_BYTES: i64 = 0;
pub const DEFAULT_SLEEP: f64 = 0.0;
pub const DEFAULT_SPLIT_BY: i64 = 0;
pub const DEFAULT_CONFIG_FILE: &str = "flog.toml";

pub const LONG_ABOUT: &str = r#"flog is a fake log generator for common log formats.

"--bytes" takes precedence over "--number" when it is non-zero.
"--sleep" does not actually sleep; it advances the timestamps written into each line.
"--split-by" sets the maximum number of lines (with "--number") or bytes (with "--bytes") of a log file.
[Warning] "--overwrite" replaces existing log files."#;

/// Message printed for every completed output file.
pub fn created_notice(path: &str) -> String {
    format!("{} is created.", path)
}
