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

//! Generation loop and file splitting.
//!
//! Lines are pulled from a [`LineSource`] one at a time and written to the
//! current [`Sink`]. A running total (lines, or bytes without terminators
//! when a byte target is set) decides both when the run ends and when the
//! current file is rolled over. Rollover happens once the total exceeds
//! `split_by * split_index`; the new file is named by
//! [`split_file_name`] with the index before it is incremented, so a run
//! writing `generated.log` continues in `generated1.log`, `generated2.log`
//! and so on.
//!
//! The synthetic clock advances by the pacing interval after every line. It
//! only feeds the timestamps of later lines; nothing here sleeps.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::constants::created_notice;
use crate::error::GenerateError;
use crate::format::LineSource;
use crate::logger::{Logger, log_message, log_warning};
use crate::naming::split_file_name;
use crate::options::{Options, OutputKind, Target};
use crate::writer::{self, Sink};

/// What a finished run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Lines written.
    pub lines: u64,
    /// Bytes written, line terminators excluded.
    pub bytes: u64,
    /// Completed files in creation order. Empty for stdout.
    pub files: Vec<String>,
}

/// The open sink and where the split sequence stands.
struct SplitState<F> {
    sink: Box<dyn Sink>,
    path: String,
    index: u64,
    open: F,
}

impl<F> SplitState<F>
where
    F: FnMut(&str) -> Result<Box<dyn Sink>, GenerateError>,
{
    fn start(path: &str, mut open: F) -> Result<Self, GenerateError> {
        let sink = open(path)?;
        Ok(Self {
            sink,
            path: path.to_string(),
            index: 1,
            open,
        })
    }

    fn write_line(&mut self, line: &str) -> Result<(), GenerateError> {
        self.sink
            .write_all(line.as_bytes())
            .and_then(|_| self.sink.write_all(b"\n"))
            .map_err(|source| GenerateError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn close(&mut self) -> Result<(), GenerateError> {
        self.sink.close().map_err(|source| GenerateError::Close {
            path: self.path.clone(),
            source,
        })
    }

    /// Closes and announces the current file, then continues in the next one.
    fn roll_over(
        &mut self,
        base: &str,
        completed: &mut Vec<String>,
        logger: &mut Option<Logger>,
    ) -> Result<(), GenerateError> {
        self.close()?;
        announce(logger, &self.path);
        let next = split_file_name(base, self.index as usize);
        completed.push(std::mem::replace(&mut self.path, next));
        self.sink = (self.open)(&self.path)?;
        self.index += 1;
        Ok(())
    }
}

fn announce(logger: &mut Option<Logger>, path: &str) {
    log_message(logger, &created_notice(path));
}

/// Runs a full generation to the configured destination.
///
/// Returns early with [`GenerateError::Interrupted`] once `shutdown` is set;
/// the current file is closed first so compressed output stays readable.
pub fn generate<S: LineSource>(
    options: &Options,
    source: &mut S,
    shutdown: &AtomicBool,
    logger: &mut Option<Logger>,
) -> Result<Summary, GenerateError> {
    let kind = options.kind;
    let overwrite = options.overwrite;
    generate_with(options, source, shutdown, logger, |path| {
        writer::open(kind, path, overwrite)
    })
}

/// Same as [`generate`], with sinks supplied by `open`. It is called once for
/// the base path and once per rollover.
pub fn generate_with<S, F>(
    options: &Options,
    source: &mut S,
    shutdown: &AtomicBool,
    logger: &mut Option<Logger>,
    open: F,
) -> Result<Summary, GenerateError>
where
    S: LineSource,
    F: FnMut(&str) -> Result<Box<dyn Sink>, GenerateError>,
{
    let target = options.target();
    let splits = options.splits();
    let reports_files = options.kind != OutputKind::Stdout;
    let pacing = options.pacing();

    let mut summary = Summary::default();
    let mut offset = Duration::ZERO;
    let mut state = SplitState::start(&options.output, open)?;

    loop {
        let done = match target {
            Target::Lines(limit) => summary.lines >= limit,
            Target::Bytes(limit) => summary.bytes >= limit,
            Target::Forever => false,
        };
        if done {
            break;
        }

        if shutdown.load(Ordering::Relaxed) {
            log_warning(logger, "Interrupted. Closing current output.");
            state.close()?;
            if reports_files {
                announce(logger, &state.path);
                summary.files.push(state.path.clone());
            }
            return Err(GenerateError::Interrupted);
        }

        let line = source.next_line(options.format, offset);
        state.write_line(&line)?;
        summary.lines += 1;
        summary.bytes += line.len() as u64;

        let accumulated = match target {
            Target::Bytes(_) => summary.bytes,
            Target::Lines(_) | Target::Forever => summary.lines,
        };
        if splits && accumulated > options.split_by.saturating_mul(state.index) {
            state.roll_over(&options.output, &mut summary.files, logger)?;
        }

        offset = offset.saturating_add(pacing);
    }

    state.close()?;
    if reports_files {
        announce(logger, &state.path);
        summary.files.push(state.path.clone());
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FakeLogs;
    use crate::options::LogFormat;
    use chrono::{Local, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    /// Emits `line-1`, `line-2`, ... and records requested offsets.
    #[derive(Default)]
    struct Counter {
        calls: u64,
        offsets: Vec<Duration>,
    }

    impl LineSource for Counter {
        fn next_line(&mut self, _format: LogFormat, offset: Duration) -> String {
            self.calls += 1;
            self.offsets.push(offset);
            format!("line-{}", self.calls)
        }
    }

    #[derive(Clone, Default)]
    struct Shared {
        data: Rc<RefCell<Vec<u8>>>,
        closes: Rc<RefCell<u32>>,
    }

    struct MemorySink {
        shared: Shared,
        closed: bool,
        fail_writes: bool,
        fail_close: bool,
    }

    impl Write for MemorySink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.closed || self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "rejected"));
            }
            self.shared.data.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Sink for MemorySink {
        fn close(&mut self) -> io::Result<()> {
            if self.closed {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed twice"));
            }
            self.closed = true;
            if self.fail_close {
                return Err(io::Error::new(io::ErrorKind::Other, "flush failed"));
            }
            *self.shared.closes.borrow_mut() += 1;
            Ok(())
        }
    }

    /// Opens in-memory sinks and remembers them by path.
    #[derive(Clone, Default)]
    struct Opened {
        files: Rc<RefCell<Vec<(String, Shared)>>>,
    }

    impl Opened {
        fn opener(&self) -> impl FnMut(&str) -> Result<Box<dyn Sink>, GenerateError> {
            let files = self.files.clone();
            move |path: &str| {
                let shared = Shared::default();
                files.borrow_mut().push((path.to_string(), shared.clone()));
                Ok(Box::new(MemorySink {
                    shared,
                    closed: false,
                    fail_writes: false,
                    fail_close: false,
                }) as Box<dyn Sink>)
            }
        }

        fn paths(&self) -> Vec<String> {
            self.files.borrow().iter().map(|(p, _)| p.clone()).collect()
        }

        fn lines(&self, idx: usize) -> Vec<String> {
            let files = self.files.borrow();
            let data = files[idx].1.data.borrow();
            String::from_utf8(data.clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }

        fn closes(&self, idx: usize) -> u32 {
            *self.files.borrow()[idx].1.closes.borrow()
        }
    }

    fn options(kind: OutputKind) -> Options {
        Options {
            kind,
            ..Options::default()
        }
    }

    fn run(options: &Options, opened: &Opened) -> Result<Summary, GenerateError> {
        let mut source = Counter::default();
        let shutdown = AtomicBool::new(false);
        generate_with(options, &mut source, &shutdown, &mut None, opened.opener())
    }

    #[test]
    fn test_writes_exact_line_count() {
        let mut opts = options(OutputKind::Log);
        opts.number = 25;
        let opened = Opened::default();

        let summary = run(&opts, &opened).unwrap();

        assert_eq!(summary.lines, 25);
        assert_eq!(opened.lines(0).len(), 25);
        assert_eq!(opened.lines(0)[24], "line-25");
        assert_eq!(summary.files, vec!["generated.log".to_string()]);
        assert_eq!(opened.closes(0), 1);
    }

    #[test]
    fn test_zero_lines_writes_nothing() {
        let mut opts = options(OutputKind::Log);
        opts.number = 0;
        let opened = Opened::default();

        let summary = run(&opts, &opened).unwrap();

        assert_eq!(summary.lines, 0);
        assert!(opened.lines(0).is_empty());
        assert_eq!(opened.paths().len(), 1);
    }

    #[test]
    fn test_byte_target_stops_within_one_line() {
        let mut opts = options(OutputKind::Log);
        opts.bytes = 100;
        opts.number = 1;
        let opened = Opened::default();

        let summary = run(&opts, &opened).unwrap();

        let lines = opened.lines(0);
        let total: usize = lines.iter().map(String::len).sum();
        let last = lines.last().unwrap().len();
        assert!(total >= 100);
        assert!(total - last < 100);
        assert_eq!(summary.bytes, total as u64);
        assert!(summary.lines > 1);
    }

    #[test]
    fn test_split_by_lines() {
        let mut opts = options(OutputKind::Log);
        opts.number = 10;
        opts.split_by = 3;
        let opened = Opened::default();

        let summary = run(&opts, &opened).unwrap();

        let expected = vec![
            "generated.log".to_string(),
            "generated1.log".to_string(),
            "generated2.log".to_string(),
            "generated3.log".to_string(),
        ];
        assert_eq!(opened.paths(), expected);
        assert_eq!(summary.files, expected);
        assert_eq!(opened.lines(0), vec!["line-1", "line-2", "line-3", "line-4"]);
        assert_eq!(opened.lines(1), vec!["line-5", "line-6", "line-7"]);
        assert_eq!(opened.lines(2), vec!["line-8", "line-9", "line-10"]);
        assert!(opened.lines(3).is_empty());
        for idx in 0..4 {
            assert_eq!(opened.closes(idx), 1);
        }
    }

    #[test]
    fn test_segment_count_matches_ceiling() {
        for (total, threshold) in [(1u64, 1u64), (5, 5), (6, 5), (11, 5), (12, 4), (100, 7)] {
            let mut opts = options(OutputKind::Gz);
            opts.number = total;
            opts.split_by = threshold;
            let opened = Opened::default();

            let summary = run(&opts, &opened).unwrap();

            assert_eq!(
                summary.files.len() as u64,
                total.div_ceil(threshold),
                "total={} threshold={}",
                total,
                threshold
            );
            let written: usize = (0..summary.files.len()).map(|i| opened.lines(i).len()).sum();
            assert_eq!(written as u64, total);
        }
    }

    #[test]
    fn test_split_by_bytes() {
        // Every counter line up to line-9 is 6 bytes long.
        let mut opts = options(OutputKind::Log);
        opts.bytes = 48;
        opts.split_by = 12;
        let opened = Opened::default();

        let summary = run(&opts, &opened).unwrap();

        assert_eq!(summary.lines, 8);
        assert_eq!(summary.bytes, 48);
        assert_eq!(opened.lines(0), vec!["line-1", "line-2", "line-3"]);
        assert_eq!(opened.lines(1), vec!["line-4", "line-5"]);
        assert_eq!(opened.lines(2), vec!["line-6", "line-7"]);
        assert_eq!(opened.lines(3), vec!["line-8"]);
        assert_eq!(summary.files.len(), 4);
    }

    #[test]
    fn test_stdout_never_rolls_over() {
        let mut opts = options(OutputKind::Stdout);
        opts.number = 50;
        opts.split_by = 2;
        let opened = Opened::default();

        let summary = run(&opts, &opened).unwrap();

        assert_eq!(opened.paths().len(), 1);
        assert_eq!(opened.lines(0).len(), 50);
        assert!(summary.files.is_empty());
    }

    #[test]
    fn test_pacing_advances_offsets() {
        let mut opts = options(OutputKind::Log);
        opts.number = 3;
        opts.sleep = 1.5;
        let opened = Opened::default();
        let mut source = Counter::default();
        let shutdown = AtomicBool::new(false);

        generate_with(&opts, &mut source, &shutdown, &mut None, opened.opener()).unwrap();

        assert_eq!(
            source.offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(1500),
                Duration::from_millis(3000)
            ]
        );
    }

    #[test]
    fn test_rollover_open_failure_is_fatal() {
        let mut opts = options(OutputKind::Log);
        opts.number = 10;
        opts.split_by = 2;
        let opened = Opened::default();
        let mut inner = opened.opener();
        let open = move |path: &str| {
            if path == "generated.log" {
                inner(path)
            } else {
                Err(GenerateError::Open {
                    path: path.to_string(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                })
            }
        };
        let mut source = Counter::default();
        let shutdown = AtomicBool::new(false);

        let err = generate_with(&opts, &mut source, &shutdown, &mut None, open).unwrap_err();

        assert!(matches!(err, GenerateError::Open { ref path, .. } if path == "generated1.log"));
        assert_eq!(source.calls, 3);
        assert_eq!(opened.closes(0), 1);
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let opts = options(OutputKind::Log);
        let open = |_: &str| {
            Ok(Box::new(MemorySink {
                shared: Shared::default(),
                closed: false,
                fail_writes: true,
                fail_close: false,
            }) as Box<dyn Sink>)
        };
        let mut source = Counter::default();
        let shutdown = AtomicBool::new(false);

        let err = generate_with(&opts, &mut source, &shutdown, &mut None, open).unwrap_err();

        assert!(matches!(err, GenerateError::Write { .. }));
        assert_eq!(source.calls, 1);
    }

    /// Sinks whose close fails for the given path.
    fn failing_close_at(
        target: &'static str,
    ) -> impl FnMut(&str) -> Result<Box<dyn Sink>, GenerateError> {
        move |path: &str| {
            Ok(Box::new(MemorySink {
                shared: Shared::default(),
                closed: false,
                fail_writes: false,
                fail_close: path == target,
            }) as Box<dyn Sink>)
        }
    }

    #[test]
    fn test_final_close_failure_is_fatal() {
        let mut opts = options(OutputKind::Log);
        opts.number = 3;
        let mut source = Counter::default();
        let shutdown = AtomicBool::new(false);

        let err = generate_with(
            &opts,
            &mut source,
            &shutdown,
            &mut None,
            failing_close_at("generated.log"),
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Close { ref path, .. } if path == "generated.log"));
        assert_eq!(source.calls, 3);
    }

    #[test]
    fn test_rollover_close_failure_is_fatal() {
        let mut opts = options(OutputKind::Log);
        opts.number = 10;
        opts.split_by = 2;
        let mut source = Counter::default();
        let shutdown = AtomicBool::new(false);

        let err = generate_with(
            &opts,
            &mut source,
            &shutdown,
            &mut None,
            failing_close_at("generated.log"),
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Close { ref path, .. } if path == "generated.log"));
        // The third line triggered the rollover; nothing was requested after it.
        assert_eq!(source.calls, 3);
    }

    #[test]
    fn test_rollover_open_failure_announces_completed_file() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let status = dir.path().join("status.log");
        let mut logger = Some(Logger::new(&status.to_string_lossy()).unwrap());

        let mut opts = options(OutputKind::Log);
        opts.number = 10;
        opts.split_by = 2;
        let opened = Opened::default();
        let mut inner = opened.opener();
        let open = move |path: &str| {
            if path == "generated.log" {
                inner(path)
            } else {
                Err(GenerateError::Open {
                    path: path.to_string(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                })
            }
        };
        let mut source = Counter::default();
        let shutdown = AtomicBool::new(false);

        let err = generate_with(&opts, &mut source, &shutdown, &mut logger, open).unwrap_err();

        assert!(matches!(err, GenerateError::Open { ref path, .. } if path == "generated1.log"));
        assert_eq!(opened.lines(0), vec!["line-1", "line-2", "line-3"]);
        let contents = std::fs::read_to_string(&status).unwrap();
        assert!(contents.contains("] generated.log is created."));
        assert!(!contents.contains("generated1.log"));
    }

    /// Raises the shutdown flag after a number of lines.
    struct Interrupting<'a> {
        inner: Counter,
        after: u64,
        flag: &'a AtomicBool,
    }

    impl LineSource for Interrupting<'_> {
        fn next_line(&mut self, format: LogFormat, offset: Duration) -> String {
            let line = self.inner.next_line(format, offset);
            if self.inner.calls >= self.after {
                self.flag.store(true, Ordering::Relaxed);
            }
            line
        }
    }

    #[test]
    fn test_interrupt_closes_current_file() {
        let mut opts = options(OutputKind::Gz);
        opts.forever = true;
        opts.split_by = 4;
        let opened = Opened::default();
        let shutdown = AtomicBool::new(false);
        let mut source = Interrupting {
            inner: Counter::default(),
            after: 6,
            flag: &shutdown,
        };

        let err =
            generate_with(&opts, &mut source, &shutdown, &mut None, opened.opener()).unwrap_err();

        assert!(matches!(err, GenerateError::Interrupted));
        assert_eq!(opened.paths(), vec!["generated.log", "generated1.log"]);
        assert_eq!(opened.lines(0).len(), 5);
        assert_eq!(opened.lines(1), vec!["line-6"]);
        assert_eq!(opened.closes(0), 1);
        assert_eq!(opened.closes(1), 1);
    }

    #[test]
    fn test_gz_segments_decompress_to_plain_output() {
        use flate2::read::GzDecoder;
        use std::io::Read;
        use tempfile::TempDir;

        let anchor = Local.with_ymd_and_hms(2018, 4, 22, 9, 30, 0).unwrap();
        let dir = TempDir::new().unwrap();
        let shutdown = AtomicBool::new(false);

        let mut plain = options(OutputKind::Log);
        plain.format = LogFormat::ApacheCombined;
        plain.number = 40;
        plain.split_by = 15;
        plain.sleep = 0.25;
        plain.output = dir.path().join("plain.log").to_string_lossy().into_owned();

        let mut packed = plain.clone();
        packed.kind = OutputKind::Gz;
        packed.output = dir.path().join("packed.gz").to_string_lossy().into_owned();

        let mut source = FakeLogs::with_anchor(StdRng::seed_from_u64(7), anchor);
        let plain_summary = generate(&plain, &mut source, &shutdown, &mut None).unwrap();
        let mut source = FakeLogs::with_anchor(StdRng::seed_from_u64(7), anchor);
        let packed_summary = generate(&packed, &mut source, &shutdown, &mut None).unwrap();

        assert_eq!(plain_summary.files.len(), 3);
        assert_eq!(packed_summary.files.len(), 3);
        for (plain_path, packed_path) in plain_summary.files.iter().zip(&packed_summary.files) {
            let expected = std::fs::read_to_string(plain_path).unwrap();
            let mut decoded = String::new();
            GzDecoder::new(std::fs::File::open(packed_path).unwrap())
                .read_to_string(&mut decoded)
                .unwrap();
            assert_eq!(decoded, expected);
        }
    }
}
