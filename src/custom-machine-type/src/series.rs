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

use crate::{Error, TypeLimit};

/// The CPU series supported by custom machine types.
///
/// The wire name of each series is the prefix used in the machine type, for
/// example, `n2-custom` in `zones/us-central1-a/machineTypes/n2-custom-8-10240`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CpuSeries {
    /// General purpose N1 machines, named `custom`.
    N1,
    /// General purpose N2 machines, named `n2-custom`.
    N2,
    /// General purpose N2D machines, named `n2d-custom`.
    N2D,
    /// Cost optimized E2 machines, named `e2-custom`.
    E2,
    /// Shared-core E2 machines, named `e2-custom-micro`.
    E2Micro,
    /// Shared-core E2 machines, named `e2-custom-small`.
    E2Small,
    /// Shared-core E2 machines, named `e2-custom-medium`.
    E2Medium,
}

impl CpuSeries {
    /// All the supported series.
    pub const ALL: [CpuSeries; 7] = [
        Self::N1,
        Self::N2,
        Self::N2D,
        Self::E2,
        Self::E2Micro,
        Self::E2Small,
        Self::E2Medium,
    ];

    /// The name used for this series in machine type paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N1 => "custom",
            Self::N2 => "n2-custom",
            Self::N2D => "n2d-custom",
            Self::E2 => "e2-custom",
            Self::E2Micro => "e2-custom-micro",
            Self::E2Small => "e2-custom-small",
            Self::E2Medium => "e2-custom-medium",
        }
    }

    /// Returns true for the series with a fixed number of cores.
    ///
    /// Machine types in these series always have
    /// [SHARED_CORE_COUNT][crate::SHARED_CORE_COUNT] cores, and the core count
    /// is omitted from their name.
    pub fn is_shared_core(&self) -> bool {
        matches!(self, Self::E2Micro | Self::E2Small | Self::E2Medium)
    }

    /// The limits Compute Engine applies to this series.
    pub fn default_limits(&self) -> &'static TypeLimit {
        TypeLimit::for_series(*self)
    }
}

impl std::fmt::Display for CpuSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CpuSeries {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|series| series.as_str() == s)
            .ok_or_else(|| Error::UnknownSeries(s.to_string()))
    }
}
