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

//! Validate and format [custom machine types] for Compute Engine.
//!
//! A custom machine type lets you choose the number of vCPUs and the amount
//! of memory of a VM independently, instead of picking a predefined shape.
//! Each CPU series imposes its own limits on those values. This crate checks
//! a requested shape against those limits and formats it as the
//! `machineType` value expected by the Compute Engine API.
//!
//! # Example
//! ```
//! # use custom_machine_type::{CpuSeries, CustomMachineType};
//! let machine_type =
//!     CustomMachineType::with_default_limits("us-central1-a", CpuSeries::N2, 10240, 8)?;
//! assert_eq!(
//!     machine_type.to_full_path(),
//!     "zones/us-central1-a/machineTypes/n2-custom-8-10240"
//! );
//! assert_eq!(machine_type.to_short_form(), "n2-custom-8-10240");
//! # Ok::<(), custom_machine_type::Error>(())
//! ```
//!
//! [custom machine types]: https://cloud.google.com/compute/docs/general-purpose-machines#custom_machine_types

mod error;
mod limits;
mod machine_type;
mod series;

pub use error::{Error, MemoryCeiling};
pub use limits::TypeLimit;
pub use machine_type::CustomMachineType;
pub use series::CpuSeries;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Memory for custom machine types must be a multiple of this value, in MB.
pub const MEMORY_GRANULARITY_MB: u32 = 256;

/// The number of cores in all shared-core series.
pub const SHARED_CORE_COUNT: u32 = 2;
