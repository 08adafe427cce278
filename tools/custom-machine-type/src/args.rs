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

use anyhow::bail;
use clap::{Parser, Subcommand};
use custom_machine_type::CpuSeries;

/// Configuration options for the tool.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = super::DESCRIPTION)]
pub struct Args {
    /// Log the validation steps to stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Validate a custom machine type and print its name.
    Format(FormatArgs),
    /// Print the limits for each series.
    Limits,
}

#[derive(Clone, Debug, clap::Args)]
pub struct FormatArgs {
    /// The zone where the VM will run.
    #[arg(long, env = "GOOGLE_CLOUD_ZONE")]
    pub zone: String,

    /// The CPU series, for example `n2-custom` or `e2-custom-micro`.
    #[arg(long)]
    pub series: CpuSeries,

    /// The amount of memory, in MB.
    #[arg(long)]
    pub memory_mb: u32,

    /// The number of cores. Ignored for shared-core series.
    #[arg(long, default_value_t = 2)]
    pub cores: u32,

    /// Print the machine type without the zone, as used in instance templates.
    #[arg(long, default_value_t = false)]
    pub short: bool,
}

impl Args {
    /// Validates the arguments after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Command::Format(format) = &self.command {
            if format.zone.is_empty() {
                bail!("invalid zone, must be non-empty")
            }
            if format.zone.contains('/') {
                bail!(
                    "invalid zone ({}), use the zone name, for example `us-central1-a`",
                    format.zone
                )
            }
        }
        Ok(())
    }
}
