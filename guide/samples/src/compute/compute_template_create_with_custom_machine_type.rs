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

// [START compute_template_create_with_custom_machine_type]
use custom_machine_type::CustomMachineType;
use google_cloud_compute_v1::client::InstanceTemplates;
use google_cloud_compute_v1::model::{
    AttachedDisk, AttachedDiskInitializeParams, InstanceProperties, InstanceTemplate,
    NetworkInterface,
};
use google_cloud_lro::Poller;

/// Creates an instance template using a custom machine type.
///
/// Instance templates are global resources, their machine type does not
/// include the zone.
pub async fn sample(
    client: &InstanceTemplates,
    project_id: &str,
    name: &str,
    machine_type: &CustomMachineType,
) -> anyhow::Result<()> {
    let properties = InstanceProperties::new()
        .set_machine_type(machine_type.to_short_form())
        .set_labels([("source", "compute_custom_machine_type_template")])
        .set_disks([AttachedDisk::new()
            .set_initialize_params(
                AttachedDiskInitializeParams::new()
                    .set_disk_size_gb(10)
                    .set_source_image("projects/debian-cloud/global/images/family/debian-12"),
            )
            .set_boot(true)
            .set_auto_delete(true)])
        .set_network_interfaces([NetworkInterface::new().set_network("global/networks/default")]);
    let template = InstanceTemplate::new()
        .set_name(name)
        .set_description("A test instance template with a custom machine type.")
        .set_properties(properties);

    let operation = client
        .insert()
        .set_project(project_id)
        .set_body(template)
        .poller()
        .until_done()
        .await?
        .to_result()?;
    println!("Instance template created: {operation:?}");

    Ok(())
}
// [END compute_template_create_with_custom_machine_type]
