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

use std::path::is_separator;

/// Returns the extension of the last path element, dot included, or "" when
/// there is none. Only the final `.` counts, so `a.tar.gz` yields `.gz`.
fn extension(path: &str) -> &str {
    let name_start = path
        .rfind(is_separator)
        .map(|idx| idx + 1)
        .unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) => &path[name_start + dot..],
        None => "",
    }
}

/// Name of the split file with the given index: the index goes between the
/// stem and the extension (`generated.log`, 2 -> `generated2.log`).
pub fn split_file_name(base: &str, index: usize) -> String {
    let ext = extension(base);
    let stem = &base[..base.len() - ext.len()];
    format!("{}{}{}", stem, index, ext)
}
