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

use crate::error::MemoryCeiling;
use crate::{CpuSeries, Error, MEMORY_GRANULARITY_MB, Result, SHARED_CORE_COUNT, TypeLimit};

/// A validated custom machine type.
///
/// Values of this type always satisfy the limits they were created with.
/// Use [to_full_path][CustomMachineType::to_full_path] to set the
/// `machine_type` field of an instance, and
/// [to_short_form][CustomMachineType::to_short_form] for instance templates.
///
/// # Example
/// ```
/// # use custom_machine_type::{CpuSeries, CustomMachineType};
/// // The core count is ignored for shared-core series.
/// let machine_type =
///     CustomMachineType::with_default_limits("us-central1-a", CpuSeries::E2Micro, 2048, 0)?;
/// assert_eq!(machine_type.core_count(), 2);
/// assert_eq!(machine_type.to_short_form(), "e2-custom-micro-2048");
/// # Ok::<(), custom_machine_type::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomMachineType {
    zone: String,
    series: CpuSeries,
    memory_mb: u32,
    core_count: u32,
    limits: TypeLimit,
}

impl CustomMachineType {
    /// Validates a custom machine type against `limits`.
    ///
    /// The `zone` is not validated. For shared-core series the `core_count`
    /// is ignored and replaced with [SHARED_CORE_COUNT].
    ///
    /// The checks run in a fixed order, and the first failure is returned:
    /// the number of cores, the memory granularity, the minimum memory, and
    /// finally the maximum memory.
    pub fn new<Z>(
        zone: Z,
        series: CpuSeries,
        memory_mb: u32,
        core_count: u32,
        limits: TypeLimit,
    ) -> Result<Self>
    where
        Z: Into<String>,
    {
        let core_count = if series.is_shared_core() {
            SHARED_CORE_COUNT
        } else {
            core_count
        };
        let machine_type = Self {
            zone: zone.into(),
            series,
            memory_mb,
            core_count,
            limits,
        };
        if let Err(e) = machine_type.check() {
            tracing::debug!(
                zone = %machine_type.zone,
                %series,
                memory_mb,
                core_count,
                "invalid custom machine type: {e}"
            );
            return Err(e);
        }
        Ok(machine_type)
    }

    /// Validates a custom machine type against the default limits of
    /// `series`.
    pub fn with_default_limits<Z>(
        zone: Z,
        series: CpuSeries,
        memory_mb: u32,
        core_count: u32,
    ) -> Result<Self>
    where
        Z: Into<String>,
    {
        Self::new(
            zone,
            series,
            memory_mb,
            core_count,
            series.default_limits().clone(),
        )
    }

    /// The zone of the machine type, for example `us-central1-a`.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// The CPU series.
    pub fn cpu_series(&self) -> CpuSeries {
        self.series
    }

    /// The total memory, in MB.
    pub fn memory_mb(&self) -> u32 {
        self.memory_mb
    }

    /// The number of cores, always [SHARED_CORE_COUNT] for shared-core series.
    pub fn core_count(&self) -> u32 {
        self.core_count
    }

    /// The limits used to validate this machine type.
    pub fn limits(&self) -> &TypeLimit {
        &self.limits
    }

    /// Returns true if the memory exceeds the per-core maximum of the series.
    ///
    /// Such machine types use [extended memory], and their name has an `-ext`
    /// suffix.
    ///
    /// [extended memory]: https://cloud.google.com/compute/docs/instances/creating-instance-with-custom-machine-type#extendedmemory
    pub fn uses_extra_memory(&self) -> bool {
        u64::from(self.memory_mb) > self.per_core_total(self.limits.max_mem_per_core_mb())
    }

    /// Formats the machine type as expected by the Compute Engine API.
    ///
    /// For example, `zones/us-central1-a/machineTypes/n2-custom-8-10240`.
    pub fn to_full_path(&self) -> String {
        format!("zones/{}/machineTypes/{}", self.zone, self.to_short_form())
    }

    /// Formats the machine type without the zone.
    ///
    /// For example, `n2-custom-8-10240`. Instance templates use this format.
    pub fn to_short_form(&self) -> String {
        if self.series.is_shared_core() {
            return format!("{}-{}", self.series, self.memory_mb);
        }
        let suffix = if self.uses_extra_memory() { "-ext" } else { "" };
        format!(
            "{}-{}-{}{suffix}",
            self.series, self.core_count, self.memory_mb
        )
    }

    fn per_core_total(&self, per_core_mb: u32) -> u64 {
        u64::from(self.core_count) * u64::from(per_core_mb)
    }

    fn check(&self) -> Result<()> {
        let limits = &self.limits;
        if !limits.allows_core_count(self.core_count) {
            return Err(Error::InvalidCoreCount {
                series: self.series,
                requested: self.core_count,
                allowed: limits.allowed_cores().to_vec(),
            });
        }

        if self.memory_mb % MEMORY_GRANULARITY_MB != 0 {
            return Err(Error::InvalidMemoryAlignment {
                memory_mb: self.memory_mb,
            });
        }

        let memory_mb = u64::from(self.memory_mb);
        if memory_mb < self.per_core_total(limits.min_mem_per_core_mb()) {
            return Err(Error::MemoryTooLow {
                series: self.series,
                memory_mb: self.memory_mb,
                min_per_core_mb: limits.min_mem_per_core_mb(),
            });
        }

        if !self.uses_extra_memory() {
            return Ok(());
        }
        let ceiling = match limits.allow_extra_memory() {
            false => MemoryCeiling::PerCore {
                max_per_core_mb: limits.max_mem_per_core_mb(),
            },
            true if self.memory_mb > limits.extra_memory_limit_mb() => MemoryCeiling::Extended {
                limit_mb: limits.extra_memory_limit_mb(),
            },
            true => return Ok(()),
        };
        Err(Error::MemoryTooHigh {
            series: self.series,
            memory_mb: self.memory_mb,
            ceiling,
        })
    }
}

impl std::fmt::Display for CustomMachineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_full_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const ZONE: &str = "europe-central2-b";

    #[test]
    fn traits() {
        static_assertions::assert_impl_all!(CustomMachineType: Clone, std::fmt::Debug, std::fmt::Display);
        static_assertions::assert_impl_all!(CustomMachineType: Send, Sync);
    }

    #[test_case(CpuSeries::N1, 8192, 8, "custom-8-8192")]
    #[test_case(CpuSeries::N2, 4096, 4, "n2-custom-4-4096")]
    #[test_case(CpuSeries::N2D, 8192, 4, "n2d-custom-4-8192")]
    #[test_case(CpuSeries::E2, 8192, 8, "e2-custom-8-8192")]
    #[test_case(CpuSeries::E2Small, 4096, 0, "e2-custom-small-4096")]
    #[test_case(CpuSeries::E2Micro, 2048, 0, "e2-custom-micro-2048")]
    #[test_case(CpuSeries::E2Medium, 8192, 0, "e2-custom-medium-8192")]
    #[test_case(CpuSeries::N2, 638720, 8, "n2-custom-8-638720-ext")]
    fn format(series: CpuSeries, memory_mb: u32, cores: u32, want: &str) -> anyhow::Result<()> {
        let got = CustomMachineType::with_default_limits(ZONE, series, memory_mb, cores)?;
        assert_eq!(got.to_short_form(), want, "{got:?}");
        assert_eq!(
            got.to_full_path(),
            format!("zones/{ZONE}/machineTypes/{want}"),
            "{got:?}"
        );
        assert_eq!(got.to_string(), got.to_full_path(), "{got:?}");
        Ok(())
    }

    #[test]
    fn accessors() -> anyhow::Result<()> {
        let got = CustomMachineType::with_default_limits(ZONE, CpuSeries::N2D, 16384, 8)?;
        assert_eq!(got.zone(), ZONE);
        assert_eq!(got.cpu_series(), CpuSeries::N2D);
        assert_eq!(got.memory_mb(), 16384);
        assert_eq!(got.core_count(), 8);
        assert_eq!(got.limits(), CpuSeries::N2D.default_limits());
        assert!(!got.uses_extra_memory(), "{got:?}");
        Ok(())
    }

    #[test]
    fn custom_limits() -> anyhow::Result<()> {
        let limits = TypeLimit::new(1024, 2048).set_allowed_cores([3]);
        let got = CustomMachineType::new(ZONE, CpuSeries::N1, 4096, 3, limits.clone())?;
        assert_eq!(got.to_short_form(), "custom-3-4096");
        assert_eq!(got.limits(), &limits);

        let got = CustomMachineType::new(ZONE, CpuSeries::N1, 4096, 2, limits);
        assert!(
            matches!(got, Err(Error::InvalidCoreCount { requested: 2, ref allowed, .. }) if allowed == &[3]),
            "{got:?}"
        );
        Ok(())
    }

    #[test_case(CpuSeries::E2Micro, 2048)]
    #[test_case(CpuSeries::E2Small, 4096)]
    #[test_case(CpuSeries::E2Medium, 8192)]
    fn shared_core_ignores_cores(series: CpuSeries, memory_mb: u32) -> anyhow::Result<()> {
        for cores in [0, 1, 2, 4, 96, u32::MAX] {
            let got = CustomMachineType::with_default_limits(ZONE, series, memory_mb, cores)?;
            assert_eq!(got.core_count(), SHARED_CORE_COUNT, "{got:?}");
            assert_eq!(got.to_short_form(), format!("{series}-{memory_mb}"));
        }
        Ok(())
    }

    #[test]
    fn bad_alignment() {
        let got = CustomMachineType::with_default_limits(ZONE, CpuSeries::N1, 8194, 8);
        assert_eq!(got, Err(Error::InvalidMemoryAlignment { memory_mb: 8194 }));
        assert_eq!(
            got.unwrap_err().to_string(),
            "requested memory must be a multiple of 256 MB, got 8194 MB"
        );
    }

    #[test]
    fn alignment_always_checked() {
        for series in CpuSeries::ALL {
            let limits = series.default_limits();
            let cores = limits.allowed_cores().first().copied().unwrap_or(2);
            for memory_mb in [1, 255, 257, 8194, 638721] {
                let got = CustomMachineType::with_default_limits(ZONE, series, memory_mb, cores);
                assert_eq!(
                    got,
                    Err(Error::InvalidMemoryAlignment { memory_mb }),
                    "{series} {memory_mb}"
                );
            }
        }
    }

    #[test]
    fn bad_cores() {
        let got = CustomMachineType::with_default_limits(ZONE, CpuSeries::N2, 8194, 66);
        let limits = CpuSeries::N2.default_limits();
        assert_eq!(
            got,
            Err(Error::InvalidCoreCount {
                series: CpuSeries::N2,
                requested: 66,
                allowed: limits.allowed_cores().to_vec(),
            })
        );
    }

    #[test_case(CpuSeries::N1, 8, 922)]
    #[test_case(CpuSeries::N2, 4, 512)]
    #[test_case(CpuSeries::E2, 2, 512)]
    #[test_case(CpuSeries::E2Medium, 2, 4096)]
    fn memory_lower_bound(series: CpuSeries, cores: u32, min: u32) -> anyhow::Result<()> {
        let memory_mb = (cores * min).div_ceil(MEMORY_GRANULARITY_MB) * MEMORY_GRANULARITY_MB;
        let got = CustomMachineType::with_default_limits(ZONE, series, memory_mb, cores)?;
        assert_eq!(got.memory_mb(), memory_mb);

        let memory_mb = memory_mb - MEMORY_GRANULARITY_MB;
        let got = CustomMachineType::with_default_limits(ZONE, series, memory_mb, cores);
        assert_eq!(
            got,
            Err(Error::MemoryTooLow {
                series,
                memory_mb,
                min_per_core_mb: min,
            })
        );
        Ok(())
    }

    #[test]
    fn memory_lower_bound_exact() -> anyhow::Result<()> {
        let limits = TypeLimit::new(1024, 4096);
        let got = CustomMachineType::new(ZONE, CpuSeries::N2, 4 * 1024, 4, limits.clone())?;
        assert_eq!(got.to_short_form(), "n2-custom-4-4096");
        let got = CustomMachineType::new(ZONE, CpuSeries::N2, 4 * 1024 - 256, 4, limits);
        assert!(matches!(got, Err(Error::MemoryTooLow { .. })), "{got:?}");
        Ok(())
    }

    #[test_case(CpuSeries::N1, 8, 6656)]
    #[test_case(CpuSeries::N2, 8, 8192)]
    #[test_case(CpuSeries::N2D, 16, 8192)]
    fn memory_upper_bound_extended(series: CpuSeries, cores: u32, max: u32) -> anyhow::Result<()> {
        let got = CustomMachineType::with_default_limits(ZONE, series, cores * max, cores)?;
        assert!(!got.uses_extra_memory(), "{got:?}");
        assert!(!got.to_full_path().ends_with("-ext"), "{got:?}");

        let got = CustomMachineType::with_default_limits(ZONE, series, cores * max + 256, cores)?;
        assert!(got.uses_extra_memory(), "{got:?}");
        assert!(got.to_full_path().ends_with("-ext"), "{got:?}");

        let limit = series.default_limits().extra_memory_limit_mb();
        let got = CustomMachineType::with_default_limits(ZONE, series, limit, cores)?;
        assert!(got.uses_extra_memory(), "{got:?}");

        let got = CustomMachineType::with_default_limits(ZONE, series, limit + 256, cores);
        assert_eq!(
            got,
            Err(Error::MemoryTooHigh {
                series,
                memory_mb: limit + 256,
                ceiling: MemoryCeiling::Extended { limit_mb: limit },
            })
        );
        Ok(())
    }

    #[test_case(CpuSeries::E2, 4, 8192)]
    #[test_case(CpuSeries::E2Micro, 2, 2048)]
    #[test_case(CpuSeries::E2Small, 2, 4096)]
    #[test_case(CpuSeries::E2Medium, 2, 8192)]
    fn memory_upper_bound_no_extended(
        series: CpuSeries,
        cores: u32,
        max: u32,
    ) -> anyhow::Result<()> {
        let got = CustomMachineType::with_default_limits(ZONE, series, cores * max, cores)?;
        assert!(!got.uses_extra_memory(), "{got:?}");
        assert!(!got.to_full_path().ends_with("-ext"), "{got:?}");

        let memory_mb = cores * max + 256;
        let got = CustomMachineType::with_default_limits(ZONE, series, memory_mb, cores);
        assert_eq!(
            got,
            Err(Error::MemoryTooHigh {
                series,
                memory_mb,
                ceiling: MemoryCeiling::PerCore {
                    max_per_core_mb: max,
                },
            })
        );
        Ok(())
    }

    #[test]
    fn check_order() {
        // Both the core count and the alignment are invalid.
        let got = CustomMachineType::with_default_limits(ZONE, CpuSeries::N2D, 1000, 6);
        assert!(
            matches!(got, Err(Error::InvalidCoreCount { .. })),
            "{got:?}"
        );
        // Both the alignment and the minimum memory are invalid.
        let got = CustomMachineType::with_default_limits(ZONE, CpuSeries::N2D, 100, 8);
        assert!(
            matches!(got, Err(Error::InvalidMemoryAlignment { .. })),
            "{got:?}"
        );
    }

    #[test]
    fn no_overflow() {
        let limits = TypeLimit::new(u32::MAX, u32::MAX);
        let got = CustomMachineType::new(ZONE, CpuSeries::N1, 256, u32::MAX, limits);
        assert!(matches!(got, Err(Error::MemoryTooLow { .. })), "{got:?}");

        let limits = TypeLimit::new(0, u32::MAX);
        let got = CustomMachineType::new(ZONE, CpuSeries::N1, u32::MAX - 255, u32::MAX, limits);
        let got = got.map(|m| m.uses_extra_memory());
        assert_eq!(got, Ok(false));
    }
}
