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

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use flog::cli::Cli;
use flog::config::Config;
use flog::constants::DEFAULT_CONFIG_FILE;
use flog::logger::Logger;
use flog::{ConfigError, FakeLogs, GenerateError, generate};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_INTERRUPTED: u8 = 130;

fn run(cli: Cli) -> Result<()> {
    // Load config from specified path or default flog.toml
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load(&config_path)?;
    let options = config.resolve(&cli).validate()?;

    let mut logger = match config.log_file(&cli) {
        Some(path) => Some(Logger::new(&path)?),
        None => None,
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    // The generator notices the flag and closes its output before exiting
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("Error setting Ctrl-C handler")?;

    let mut source = FakeLogs::new(options.seed);
    generate(&options, &mut source, &shutdown, &mut logger)
        .with_context(|| format!("Failed to generate {} logs", options.format))?;
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ConfigError>().is_some() {
        return EXIT_CONFIG;
    }
    match err.downcast_ref::<GenerateError>() {
        Some(GenerateError::Interrupted) => EXIT_INTERRUPTED,
        _ => EXIT_FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}
