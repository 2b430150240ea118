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

//! Output sinks for generated lines.
//!
//! Every output kind is a [`Sink`]: an [`io::Write`] with an explicit
//! [`Sink::close`]. Closing flushes whatever the sink buffers and releases
//! the underlying file. A closed sink rejects further writes and closes.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};

use crate::error::GenerateError;
use crate::options::OutputKind;

const BUFFER_CAPACITY: usize = 8192;

pub trait Sink: Write {
    fn close(&mut self) -> io::Result<()>;
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "sink is closed")
}

/// Pass-through to the process's standard output. Closing only flushes; the
/// console stream itself stays open.
pub struct StdoutSink {
    out: Option<io::Stdout>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            out: Some(io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for StdoutSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.as_mut().ok_or_else(closed)?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.as_mut().ok_or_else(closed)?.flush()
    }
}

impl Sink for StdoutSink {
    fn close(&mut self) -> io::Result<()> {
        self.out.take().ok_or_else(closed)?.flush()
    }
}

/// Plain file, written through a buffer.
pub struct FileSink {
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(file: File) -> Self {
        Self {
            writer: Some(BufWriter::with_capacity(BUFFER_CAPACITY, file)),
        }
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.as_mut().ok_or_else(closed)?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.as_mut().ok_or_else(closed)?.flush()
    }
}

impl Sink for FileSink {
    fn close(&mut self) -> io::Result<()> {
        let writer = self.writer.take().ok_or_else(closed)?;
        // Flushes the buffer; the file is closed on drop.
        writer.into_inner().map_err(|err| err.into_error())?;
        Ok(())
    }
}

/// Gzip stream over a buffered file.
pub struct GzSink {
    encoder: Option<GzEncoder<BufWriter<File>>>,
}

impl GzSink {
    pub fn new(file: File) -> Self {
        let inner = BufWriter::with_capacity(BUFFER_CAPACITY, file);
        Self {
            encoder: Some(GzEncoder::new(inner, Compression::default())),
        }
    }
}

impl Write for GzSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder.as_mut().ok_or_else(closed)?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.as_mut().ok_or_else(closed)?.flush()
    }
}

impl Sink for GzSink {
    fn close(&mut self) -> io::Result<()> {
        let encoder = self.encoder.take().ok_or_else(closed)?;
        // Compressor first, so the trailer reaches the file buffer.
        let writer = encoder.finish()?;
        writer.into_inner().map_err(|err| err.into_error())?;
        Ok(())
    }
}

/// Opens the destination file.
///
/// Without `overwrite`, an existing empty file is appended to and an
/// existing file with content is refused. With `overwrite`, the file is
/// truncated.
fn open_file(path: &str, overwrite: bool) -> io::Result<File> {
    if overwrite {
        return OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path);
    }

    let file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;
    if file.metadata()?.len() > 0 {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "file already exists and is not empty (use --overwrite to replace it)",
        ));
    }
    Ok(file)
}

/// Opens a sink of the given kind. `path` is ignored for stdout.
pub fn open(kind: OutputKind, path: &str, overwrite: bool) -> Result<Box<dyn Sink>, GenerateError> {
    let open_err = |source| GenerateError::Open {
        path: path.to_string(),
        source,
    };

    match kind {
        OutputKind::Stdout => Ok(Box::new(StdoutSink::new())),
        OutputKind::Log => {
            let file = open_file(path, overwrite).map_err(open_err)?;
            Ok(Box::new(FileSink::new(file)))
        }
        OutputKind::Gz => {
            let file = open_file(path, overwrite).map_err(open_err)?;
            Ok(Box::new(GzSink::new(file)))
        }
    }
}
