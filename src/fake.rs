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

//! Random building blocks for fabricated log fields.

use rand::Rng;
use rand::seq::SliceRandom;

const LAST_NAMES: &[&str] = &[
    "Kozey", "Moen", "Hahn", "Bauch", "Schmitt", "Lind", "Kuhn", "Ritchie", "Mertz", "Feeney",
    "Turcotte", "Rempel", "Wehner", "Gutkowski", "Okuneva", "Zieme", "Balistreri", "Hills",
    "Stracke", "Boyer", "Kessler", "Volkman", "Nitzsche", "Runte",
];

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD"];

const HTTP_VERSIONS: &[&str] = &["HTTP/1.0", "HTTP/1.1", "HTTP/2.0"];

const STATUS_CODES: &[u16] = &[
    200, 200, 200, 201, 204, 301, 302, 304, 400, 401, 403, 404, 405, 406, 416, 500, 501, 502,
    503,
];

const URL_VERBS: &[&str] = &[
    "innovate", "synergize", "morph", "leverage", "deploy", "aggregate", "enable", "scale",
    "transform", "harness", "optimize", "integrate", "streamline", "envisioneer", "revolutionize",
];

const URL_ADJECTIVES: &[&str] = &[
    "next-generation", "holistic", "mission-critical", "sticky", "scalable", "real-time",
    "b2b", "cross-platform", "distributed", "viral", "seamless", "bleeding-edge", "robust",
    "frictionless",
];

const URL_NOUNS: &[&str] = &[
    "platforms", "synergies", "paradigms", "markets", "metrics", "channels", "networks",
    "solutions", "infrastructures", "portals", "models", "e-markets", "supply-chains",
];

const TLDS: &[&str] = &["com", "net", "org", "io", "biz", "info", "name"];

const SEVERITIES: &[&str] = &[
    "emerg", "alert", "crit", "error", "warn", "notice", "info", "debug",
];

const ERROR_MODULES: &[&str] = &[
    "core", "mpm_event", "ssl", "proxy", "rewrite", "authz_core", "auth_basic", "cgi",
    "deflate", "headers", "mime", "php7",
];

const APPS: &[&str] = &[
    "sshd", "cron", "kernel", "systemd", "nginx", "postfix", "dhclient", "sudo", "dbus",
    "rsyslogd",
];

const BROWSERS: &[&str] = &["Chrome", "Firefox", "Safari", "Opera"];

const PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Windows NT 6.1",
    "Windows NT 5.01",
    "Macintosh; Intel Mac OS X 10_14_6",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux i686",
    "iPhone; CPU iPhone OS 12_2 like Mac OS X",
];

const HACKER_ABBREVIATIONS: &[&str] = &[
    "TCP", "HTTP", "SDD", "RAM", "GB", "CSS", "SSL", "AGP", "SQL", "FTP", "PCI", "AI", "ADP",
    "RSS", "XML", "EXE", "COM", "HDD", "THX", "SMTP", "SMS", "USB", "PNG", "SAS", "IB", "SCSI",
    "JSON", "XSS", "JBOD",
];

const HACKER_ADJECTIVES: &[&str] = &[
    "auxiliary", "primary", "back-end", "digital", "open-source", "virtual", "cross-platform",
    "redundant", "online", "haptic", "multi-byte", "bluetooth", "wireless", "1080p", "neural",
    "optical", "solid state", "mobile",
];

const HACKER_NOUNS: &[&str] = &[
    "driver", "protocol", "bandwidth", "panel", "microchip", "program", "port", "card", "array",
    "interface", "system", "sensor", "firewall", "hard drive", "pixel", "alarm", "feed",
    "monitor", "application", "transmitter", "bus", "circuit", "capacitor", "matrix",
];

const HACKER_VERBS: &[&str] = &[
    "back up", "bypass", "hack", "override", "compress", "copy", "navigate", "index", "connect",
    "generate", "quantify", "calculate", "synthesize", "input", "transmit", "program", "reboot",
    "parse",
];

const HACKER_INGVERBS: &[&str] = &[
    "backing up", "bypassing", "hacking", "overriding", "compressing", "copying", "navigating",
    "indexing", "connecting", "generating", "quantifying", "calculating", "synthesizing",
    "transmitting", "programming", "parsing",
];

const LATIN: &[&str] = &[
    "quia", "dolor", "sit", "amet", "consectetur", "adipisci", "velit", "sed", "quia", "non",
    "numquam", "eius", "modi", "tempora", "incidunt", "labore", "dolore", "magnam", "aliquam",
    "quaerat", "voluptatem",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

pub fn ipv4<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=255u8),
        rng.gen_range(0..=255u8),
        rng.gen_range(0..=255u8),
        rng.gen_range(0..=255u8)
    )
}

/// A last name with a trailing number, e.g. `Kozey7157`.
pub fn username<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", pick(rng, LAST_NAMES), rng.gen_range(1000..10000u32))
}

pub fn http_method<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, HTTP_METHODS)
}

pub fn http_version<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, HTTP_VERSIONS)
}

pub fn status_code<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    STATUS_CODES.choose(rng).copied().unwrap_or(200)
}

/// Response size in bytes.
pub fn body_size<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..30000)
}

/// Absolute request path with one to three segments.
pub fn request_path<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut path = format!("/{}", pick(rng, URL_VERBS));
    let depth = rng.gen_range(0..3);
    for i in 0..depth {
        path.push('/');
        path.push_str(if i % 2 == 0 {
            pick(rng, URL_ADJECTIVES)
        } else {
            pick(rng, URL_NOUNS)
        });
    }
    path
}

pub fn url<R: Rng + ?Sized>(rng: &mut R) -> String {
    let scheme = if rng.gen_bool(0.5) { "https" } else { "http" };
    let host = format!(
        "{}{}",
        pick(rng, URL_ADJECTIVES).replace('-', ""),
        pick(rng, URL_NOUNS).replace('-', "")
    );
    format!(
        "{}://www.{}.{}{}",
        scheme,
        host,
        pick(rng, TLDS),
        request_path(rng)
    )
}

pub fn user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    let platform = pick(rng, PLATFORMS);
    let webkit = rng.gen_range(5300..5400u32);
    match pick(rng, BROWSERS) {
        "Chrome" => format!(
            "Mozilla/5.0 ({}) AppleWebKit/{} (KHTML, like Gecko) Chrome/{}.0.{}.0 Mobile Safari/{}",
            platform,
            webkit,
            rng.gen_range(36..90u32),
            rng.gen_range(800..900u32),
            webkit
        ),
        "Firefox" => {
            let version = rng.gen_range(4..80u32);
            format!(
                "Mozilla/5.0 ({}; rv:{}.0) Gecko/2010{:02}{:02} Firefox/{}.0",
                platform,
                version,
                rng.gen_range(1..=12u32),
                rng.gen_range(1..=28u32),
                version
            )
        }
        "Safari" => format!(
            "Mozilla/5.0 ({}) AppleWebKit/{}.{} (KHTML, like Gecko) Version/{}.0 Safari/{}.{}",
            platform,
            webkit,
            rng.gen_range(1..10u32),
            rng.gen_range(4..13u32),
            webkit,
            rng.gen_range(1..10u32)
        ),
        _ => format!(
            "Opera/{}.{} ({}) Presto/2.{}.{} Version/{}.00",
            rng.gen_range(8..10u32),
            rng.gen_range(10..90u32),
            platform,
            rng.gen_range(8..13u32),
            rng.gen_range(160..300u32),
            rng.gen_range(10..13u32)
        ),
    }
}

pub fn severity<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, SEVERITIES)
}

pub fn error_module<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, ERROR_MODULES)
}

pub fn app_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, APPS)
}

pub fn latin_word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, LATIN)
}

pub fn pid<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..10000)
}

pub fn port<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(1024..=65535)
}

/// Syslog priority: facility * 8 + severity.
pub fn priority<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(0..24u8) * 8 + rng.gen_range(0..8u8)
}

fn capitalize(phrase: String) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => phrase,
    }
}

/// A technobabble sentence in the style of the classic "hacker phrase".
pub fn hacker_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    let abbr = pick(rng, HACKER_ABBREVIATIONS);
    let adj = pick(rng, HACKER_ADJECTIVES);
    let noun = pick(rng, HACKER_NOUNS);
    let verb = pick(rng, HACKER_VERBS);
    let ingverb = pick(rng, HACKER_INGVERBS);
    let other_noun = pick(rng, HACKER_NOUNS);

    let phrase = match rng.gen_range(0..6) {
        0 => format!(
            "if we {} the {}, we can get to the {} {} through the {} {} {}!",
            verb, noun, abbr, other_noun, adj, abbr, noun
        ),
        1 => format!(
            "we need to {} the {} {} {}!",
            verb, adj, abbr, noun
        ),
        2 => format!(
            "try to {} the {} {}, maybe it will {} the {} {}!",
            verb, abbr, noun, verb, adj, other_noun
        ),
        3 => format!(
            "you can't {} the {} without {} the {} {} {}!",
            verb, noun, ingverb, adj, abbr, other_noun
        ),
        4 => format!(
            "use the {} {} {}, then you can {} the {} {}!",
            adj, abbr, noun, verb, adj, other_noun
        ),
        _ => format!(
            "the {} {} is down, {} the {} {} so we can {} the {} {}!",
            abbr, noun, verb, adj, other_noun, verb, abbr, noun
        ),
    };
    capitalize(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ipv4_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let ip = ipv4(&mut rng);
            let octets: Vec<u16> = ip.split('.').map(|o| o.parse().unwrap()).collect();
            assert_eq!(octets.len(), 4);
            assert!(octets.iter().all(|o| *o <= 255));
            assert!(octets[0] >= 1);
        }
    }

    #[test]
    fn test_priority_in_syslog_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert!(priority(&mut rng) <= 191);
        }
    }

    #[test]
    fn test_hacker_phrase_is_single_capitalized_line() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let phrase = hacker_phrase(&mut rng);
            assert!(!phrase.contains('\n'));
            assert!(phrase.chars().next().unwrap().is_uppercase());
            assert!(phrase.ends_with('!'));
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(user_agent(&mut a), user_agent(&mut b));
        assert_eq!(url(&mut a), url(&mut b));
    }
}
