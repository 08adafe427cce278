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

use crate::CpuSeries;

/// The errors returned when a custom machine type is invalid.
///
/// None of these errors are transient. Retrying with the same parameters
/// always produces the same error.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The name does not match any of the supported CPU series.
    #[error("unknown custom machine type series `{0}`")]
    UnknownSeries(String),

    /// The series does not support the requested number of cores.
    #[error(
        "invalid number of cores requested ({requested}). Allowed number of cores for {series} is: {allowed:?}"
    )]
    InvalidCoreCount {
        series: CpuSeries,
        requested: u32,
        allowed: Vec<u32>,
    },

    /// The memory is not a multiple of [MEMORY_GRANULARITY_MB][crate::MEMORY_GRANULARITY_MB].
    #[error("requested memory must be a multiple of 256 MB, got {memory_mb} MB")]
    InvalidMemoryAlignment { memory_mb: u32 },

    /// The memory is below the per-core minimum of the series.
    #[error(
        "requested memory is too low ({memory_mb} MB). Minimal memory for {series} is {min_per_core_mb} MB per core"
    )]
    MemoryTooLow {
        series: CpuSeries,
        memory_mb: u32,
        min_per_core_mb: u32,
    },

    /// The memory is above what the series accepts.
    #[error("requested memory is too large ({memory_mb} MB) for {series}. {ceiling}")]
    MemoryTooHigh {
        series: CpuSeries,
        memory_mb: u32,
        ceiling: MemoryCeiling,
    },
}

/// The ceiling exceeded by a [Error::MemoryTooHigh] error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MemoryCeiling {
    /// The series does not support extended memory, the memory may not exceed
    /// this many MB per core.
    PerCore { max_per_core_mb: u32 },
    /// The series supports extended memory up to this many MB in total.
    Extended { limit_mb: u32 },
}

impl std::fmt::Display for MemoryCeiling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerCore { max_per_core_mb } => {
                write!(f, "Maximum memory allowed is {max_per_core_mb} MB per core")
            }
            Self::Extended { limit_mb } => write!(f, "Maximum memory allowed is {limit_mb} MB"),
        }
    }
}

impl Error {
    /// The series associated with the error, if any.
    pub fn series(&self) -> Option<CpuSeries> {
        match self {
            Self::UnknownSeries(_) | Self::InvalidMemoryAlignment { .. } => None,
            Self::InvalidCoreCount { series, .. }
            | Self::MemoryTooLow { series, .. }
            | Self::MemoryTooHigh { series, .. } => Some(*series),
        }
    }
}
