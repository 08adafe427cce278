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

// [START compute_custom_machine_type_create_with_helper]
use custom_machine_type::{CpuSeries, CustomMachineType};
use google_cloud_compute_v1::client::Instances;
use google_cloud_compute_v1::model::{
    AttachedDisk, AttachedDiskInitializeParams, Instance, NetworkInterface,
};
use google_cloud_lro::Poller;

/// Creates a VM with a custom machine type, validated before making any
/// requests.
///
/// # Parameters
/// - `series`: the CPU series, for example [CpuSeries::N2].
/// - `core_count`: the number of vCPUs.
/// - `memory_mb`: the amount of memory, in MB. Must be a multiple of 256.
pub async fn sample(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
    series: CpuSeries,
    core_count: u32,
    memory_mb: u32,
) -> anyhow::Result<CustomMachineType> {
    let machine_type = CustomMachineType::with_default_limits(zone, series, memory_mb, core_count)?;
    println!("Using machine type {machine_type}");

    let instance = Instance::new()
        .set_machine_type(machine_type.to_full_path())
        .set_name(name)
        .set_description("A test VM with a custom machine type.")
        .set_labels([("source", "compute_custom_machine_type_create_with_helper")])
        .set_disks([AttachedDisk::new()
            .set_initialize_params(
                AttachedDiskInitializeParams::new()
                    .set_disk_size_gb(10)
                    .set_source_image("projects/debian-cloud/global/images/family/debian-12"),
            )
            .set_boot(true)
            .set_auto_delete(true)])
        .set_network_interfaces([NetworkInterface::new().set_network("global/networks/default")]);

    let operation = client
        .insert()
        .set_project(project_id)
        .set_zone(zone)
        .set_body(instance)
        .poller()
        .until_done()
        .await?
        .to_result()?;
    println!("Instance created: {operation:?}");

    Ok(machine_type)
}
// [END compute_custom_machine_type_create_with_helper]
