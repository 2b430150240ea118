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

use chrono::{DateTime, Local, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::fake;
use crate::options::LogFormat;

pub const APACHE_COMMON_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";
pub const APACHE_ERROR_TIME: &str = "%a %b %d %H:%M:%S %Y";
pub const RFC3164_TIME: &str = "%b %d %H:%M:%S";

/// Produces one log line for a format at a time offset from the run start.
/// Lines never contain a line terminator.
pub trait LineSource {
    fn next_line(&mut self, format: LogFormat, offset: Duration) -> String;
}

/// Random log lines anchored at a fixed start time.
pub struct FakeLogs<R: Rng> {
    rng: R,
    anchor: DateTime<Local>,
}

impl FakeLogs<StdRng> {
    /// Anchored at the current local time. Seeded when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_anchor(rng, Local::now())
    }
}

impl<R: Rng> FakeLogs<R> {
    pub fn with_anchor(rng: R, anchor: DateTime<Local>) -> Self {
        Self { rng, anchor }
    }

    fn at(&self, offset: Duration) -> DateTime<Local> {
        TimeDelta::from_std(offset)
            .ok()
            .and_then(|delta| self.anchor.checked_add_signed(delta))
            .unwrap_or(self.anchor)
    }

    fn request(&mut self) -> String {
        let rng = &mut self.rng;
        format!(
            "\"{} {} {}\" {} {}",
            fake::http_method(rng),
            fake::request_path(rng),
            fake::http_version(rng),
            fake::status_code(rng),
            fake::body_size(rng)
        )
    }

    fn apache_common(&mut self, at: DateTime<Local>) -> String {
        let host = fake::ipv4(&mut self.rng);
        let user = fake::username(&mut self.rng);
        format!(
            "{} - {} [{}] {}",
            host,
            user,
            at.format(APACHE_COMMON_TIME),
            self.request()
        )
    }

    fn apache_combined(&mut self, at: DateTime<Local>) -> String {
        let common = self.apache_common(at);
        let referer = fake::url(&mut self.rng);
        let agent = fake::user_agent(&mut self.rng);
        format!("{} \"{}\" \"{}\"", common, referer, agent)
    }

    fn apache_error(&mut self, at: DateTime<Local>) -> String {
        let rng = &mut self.rng;
        format!(
            "[{}] [{}:{}] [pid {}:tid {}] [client {}:{}] {}",
            at.format(APACHE_ERROR_TIME),
            fake::error_module(rng),
            fake::severity(rng),
            fake::pid(rng),
            fake::pid(rng),
            fake::ipv4(rng),
            fake::port(rng),
            fake::hacker_phrase(rng)
        )
    }

    fn rfc3164(&mut self, at: DateTime<Local>) -> String {
        let rng = &mut self.rng;
        format!(
            "<{}>{} {} {}[{}]: {}",
            fake::priority(rng),
            at.format(RFC3164_TIME),
            fake::username(rng),
            fake::app_name(rng),
            fake::pid(rng),
            fake::hacker_phrase(rng)
        )
    }
}

impl<R: Rng> LineSource for FakeLogs<R> {
    fn next_line(&mut self, format: LogFormat, offset: Duration) -> String {
        let at = self.at(offset);
        match format {
            LogFormat::ApacheCommon => self.apache_common(at),
            LogFormat::ApacheCombined => self.apache_combined(at),
            LogFormat::ApacheError => self.apache_error(at),
            LogFormat::Rfc3164 => self.rfc3164(at),
        }
    }
}
