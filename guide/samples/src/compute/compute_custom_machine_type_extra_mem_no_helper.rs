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

// [START compute_custom_machine_type_extra_mem_no_helper]
use google_cloud_compute_v1::client::Instances;
use google_cloud_compute_v1::model::{
    AttachedDisk, AttachedDiskInitializeParams, Instance, NetworkInterface,
};
use google_cloud_lro::Poller;

/// Creates a VM with an N2 custom machine type using extended memory.
///
/// The machine type is formatted without any validation. The service rejects
/// the request if the values are not valid.
///
/// # Parameters
/// - `core_count`: the number of vCPUs, for example `8`.
/// - `memory_mb`: the amount of memory, in MB. Must be a multiple of 256 and
///   larger than 8192 MB per vCPU, for example `81920`.
pub async fn sample(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
    core_count: u32,
    memory_mb: u32,
) -> anyhow::Result<()> {
    // The `-ext` suffix enables extended memory.
    let machine_type = format!("zones/{zone}/machineTypes/n2-custom-{core_count}-{memory_mb}-ext");

    let instance = Instance::new()
        .set_machine_type(machine_type)
        .set_name(name)
        .set_description("A test VM with extended memory.")
        .set_labels([("source", "compute_custom_machine_type_extra_mem_no_helper")])
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

    Ok(())
}
// [END compute_custom_machine_type_extra_mem_no_helper]
