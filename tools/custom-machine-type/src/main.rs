// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Validate and format Compute Engine custom machine types.

mod args;

use anyhow::Result;
use args::{Args, Command, FormatArgs};
use clap::Parser;
use custom_machine_type::{CpuSeries, CustomMachineType};

const DESCRIPTION: &str = concat!(
    "Validates custom machine types against the limits of their CPU series.",
    " On success, it prints the machine type in the format expected by the",
    " Compute Engine API. Use the `limits` command to list the limits of",
    " each series."
);

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    let _guard = enable_tracing(&args);
    tracing::debug!("Configuration: {args:?}");

    match &args.command {
        Command::Format(format) => println!("{}", format_machine_type(format)?),
        Command::Limits => print!("{}", limits_table()),
    }
    Ok(())
}

fn format_machine_type(args: &FormatArgs) -> Result<String> {
    let machine_type = CustomMachineType::with_default_limits(
        &args.zone,
        args.series,
        args.memory_mb,
        args.cores,
    )?;
    tracing::debug!(
        extended_memory = machine_type.uses_extra_memory(),
        "valid machine type: {machine_type:?}"
    );
    let name = if args.short {
        machine_type.to_short_form()
    } else {
        machine_type.to_full_path()
    };
    Ok(name)
}

fn limits_table() -> String {
    CpuSeries::ALL
        .iter()
        .map(|series| format!("{:<18} {}\n", series.as_str(), series.default_limits()))
        .collect()
}

fn enable_tracing(args: &Args) -> tracing::dispatcher::DefaultGuard {
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
