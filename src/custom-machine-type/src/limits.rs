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
use std::sync::LazyLock;

/// The limits for a custom machine type series.
///
/// Applications rarely need to create these, [CpuSeries::default_limits]
/// returns the limits documented for each series. Create your own to
/// validate against different limits, for example, in tests.
///
/// # Example
/// ```
/// # use custom_machine_type::TypeLimit;
/// let limits = TypeLimit::new(512, 8192)
///     .set_allowed_cores([2, 4, 8])
///     .set_extra_memory_limit(64 * 1024);
/// assert!(limits.allows_core_count(4));
/// assert!(!limits.allows_core_count(6));
/// assert!(limits.allow_extra_memory());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeLimit {
    allowed_cores: Vec<u32>,
    min_mem_per_core_mb: u32,
    max_mem_per_core_mb: u32,
    allow_extra_memory: bool,
    extra_memory_limit_mb: u32,
}

impl TypeLimit {
    /// Creates limits accepting any number of cores, with the given per-core
    /// memory range and no extended memory.
    pub fn new(min_mem_per_core_mb: u32, max_mem_per_core_mb: u32) -> Self {
        Self {
            min_mem_per_core_mb,
            max_mem_per_core_mb,
            ..Default::default()
        }
    }

    /// Restricts the number of cores to the given values.
    ///
    /// An empty set of values accepts any number of cores.
    pub fn set_allowed_cores<I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut cores = v.into_iter().collect::<Vec<_>>();
        cores.sort_unstable();
        cores.dedup();
        self.allowed_cores = cores;
        self
    }

    /// Enables extended memory, up to `v` MB in total.
    pub fn set_extra_memory_limit(mut self, v: u32) -> Self {
        self.allow_extra_memory = true;
        self.extra_memory_limit_mb = v;
        self
    }

    /// The allowed number of cores, in ascending order. Empty if any number
    /// is allowed.
    pub fn allowed_cores(&self) -> &[u32] {
        &self.allowed_cores
    }

    /// Returns true if `count` cores are allowed.
    pub fn allows_core_count(&self, count: u32) -> bool {
        self.allowed_cores.is_empty() || self.allowed_cores.binary_search(&count).is_ok()
    }

    /// The minimum memory per core, in MB.
    pub fn min_mem_per_core_mb(&self) -> u32 {
        self.min_mem_per_core_mb
    }

    /// The maximum memory per core, in MB, unless extended memory is used.
    pub fn max_mem_per_core_mb(&self) -> u32 {
        self.max_mem_per_core_mb
    }

    /// Returns true if the series supports extended memory.
    pub fn allow_extra_memory(&self) -> bool {
        self.allow_extra_memory
    }

    /// The maximum memory, in MB, when extended memory is used.
    pub fn extra_memory_limit_mb(&self) -> u32 {
        self.extra_memory_limit_mb
    }

    /// The default limits for `series`.
    pub fn for_series(series: CpuSeries) -> &'static TypeLimit {
        match series {
            CpuSeries::N1 => &*N1,
            CpuSeries::N2 => &*N2,
            CpuSeries::N2D => &*N2D,
            CpuSeries::E2 => &*E2,
            CpuSeries::E2Micro => &*E2_MICRO,
            CpuSeries::E2Small => &*E2_SMALL,
            CpuSeries::E2Medium => &*E2_MEDIUM,
        }
    }
}

impl std::fmt::Display for TypeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.allowed_cores.is_empty() {
            write!(f, "cores=any")?;
        } else {
            write!(f, "cores={:?}", self.allowed_cores)?;
        }
        write!(
            f,
            " memory_per_core_mb={}..={}",
            self.min_mem_per_core_mb, self.max_mem_per_core_mb
        )?;
        if self.allow_extra_memory {
            write!(
                f,
                " extended_memory_limit_mb={}",
                self.extra_memory_limit_mb
            )?;
        }
        Ok(())
    }
}

// See https://cloud.google.com/compute/docs/general-purpose-machines#custom_machine_types
static N1: LazyLock<TypeLimit> = LazyLock::new(|| {
    TypeLimit::new(922, 6656)
        .set_allowed_cores(std::iter::once(1).chain((2..=96).step_by(2)))
        .set_extra_memory_limit(624 << 10)
});
static N2: LazyLock<TypeLimit> = LazyLock::new(|| {
    TypeLimit::new(512, 8192)
        .set_allowed_cores((2..=32).step_by(2).chain((36..=128).step_by(4)))
        .set_extra_memory_limit(624 << 10)
});
static N2D: LazyLock<TypeLimit> = LazyLock::new(|| {
    TypeLimit::new(512, 8192)
        .set_allowed_cores([2, 4, 8, 16, 32, 48, 64, 80, 96])
        .set_extra_memory_limit(768 << 10)
});
static E2: LazyLock<TypeLimit> =
    LazyLock::new(|| TypeLimit::new(512, 8192).set_allowed_cores((2..=32).step_by(2)));
static E2_MICRO: LazyLock<TypeLimit> = LazyLock::new(|| TypeLimit::new(1024, 2048));
static E2_SMALL: LazyLock<TypeLimit> = LazyLock::new(|| TypeLimit::new(2048, 4096));
static E2_MEDIUM: LazyLock<TypeLimit> = LazyLock::new(|| TypeLimit::new(4096, 8192));

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn builder() {
        let limits = TypeLimit::new(256, 1024);
        assert!(limits.allowed_cores().is_empty());
        assert!(limits.allows_core_count(0));
        assert!(limits.allows_core_count(123));
        assert!(!limits.allow_extra_memory());
        assert_eq!(limits.extra_memory_limit_mb(), 0);

        let limits = limits
            .set_allowed_cores([8, 2, 4, 2])
            .set_extra_memory_limit(4096);
        assert_eq!(limits.allowed_cores(), &[2, 4, 8]);
        assert!(limits.allows_core_count(4));
        assert!(!limits.allows_core_count(3));
        assert!(limits.allow_extra_memory());
        assert_eq!(limits.extra_memory_limit_mb(), 4096);
        assert_eq!(limits.min_mem_per_core_mb(), 256);
        assert_eq!(limits.max_mem_per_core_mb(), 1024);
    }

    #[test_case(CpuSeries::N1, 49, 922, 6656, Some(638976))]
    #[test_case(CpuSeries::N2, 40, 512, 8192, Some(638976))]
    #[test_case(CpuSeries::N2D, 9, 512, 8192, Some(786432))]
    #[test_case(CpuSeries::E2, 16, 512, 8192, None)]
    #[test_case(CpuSeries::E2Micro, 0, 1024, 2048, None)]
    #[test_case(CpuSeries::E2Small, 0, 2048, 4096, None)]
    #[test_case(CpuSeries::E2Medium, 0, 4096, 8192, None)]
    fn defaults(series: CpuSeries, core_options: usize, min: u32, max: u32, extra: Option<u32>) {
        let limits = series.default_limits();
        assert_eq!(limits.allowed_cores().len(), core_options, "{limits:?}");
        assert_eq!(limits.min_mem_per_core_mb(), min, "{limits:?}");
        assert_eq!(limits.max_mem_per_core_mb(), max, "{limits:?}");
        assert_eq!(limits.allow_extra_memory(), extra.is_some(), "{limits:?}");
        assert_eq!(
            limits.extra_memory_limit_mb(),
            extra.unwrap_or(0),
            "{limits:?}"
        );
    }

    #[test]
    fn n1_cores() {
        let limits = CpuSeries::N1.default_limits();
        assert!(limits.allows_core_count(1));
        assert!(!limits.allows_core_count(3));
        assert!(limits.allows_core_count(96));
        assert!(!limits.allows_core_count(98));
    }

    #[test]
    fn n2_cores() {
        let limits = CpuSeries::N2.default_limits();
        assert!(limits.allows_core_count(32));
        assert!(!limits.allows_core_count(34));
        assert!(limits.allows_core_count(36));
        assert!(!limits.allows_core_count(66));
        assert!(limits.allows_core_count(128));
    }

    #[test]
    fn fmt() {
        let got = CpuSeries::E2Micro.default_limits().to_string();
        assert_eq!(got, "cores=any memory_per_core_mb=1024..=2048");
        let got = CpuSeries::N2D.default_limits().to_string();
        assert!(
            got.contains("cores=[2, 4, 8, 16, 32, 48, 64, 80, 96]"),
            "{got}"
        );
        assert!(got.contains("extended_memory_limit_mb=786432"), "{got}");
    }
}
