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

// [START compute_custom_machine_type_create_without_helper]
use google_cloud_compute_v1::client::Instances;
use google_cloud_compute_v1::model::{
    AttachedDisk, AttachedDiskInitializeParams, Instance, NetworkInterface,
};
use google_cloud_lro::Poller;

/// Creates a VM using a machine type formatted by the caller.
///
/// # Parameters
/// - `zone`: the zone for the VM, for example: `us-central1-a`.
/// - `machine_type`: the machine type, for example:
///   `zones/us-central1-a/machineTypes/n2-custom-8-10240`.
pub async fn sample(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
    machine_type: &str,
) -> anyhow::Result<()> {
    let instance = Instance::new()
        .set_machine_type(machine_type)
        .set_name(name)
        .set_description("A test VM with a custom machine type.")
        .set_labels([("source", "compute_custom_machine_type_create_no_helper")])
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
// [END compute_custom_machine_type_create_without_helper]
