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

use google_cloud_compute_v1::client::Instances;
use google_cloud_compute_v1::model::Instance;
use google_cloud_gax::paginator::ItemPaginator;
use google_cloud_wkt::Timestamp;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub mod compute_custom_machine_type_create_shared_with_helper;
pub mod compute_custom_machine_type_create_with_helper;
pub mod compute_custom_machine_type_create_without_helper;
pub mod compute_custom_machine_type_extra_mem_no_helper;
pub mod compute_custom_machine_type_update_memory;
pub mod compute_instance_templates_delete;
pub mod compute_instances_delete;
pub mod compute_template_create_with_custom_machine_type;

/// The value of the `source` label in all the resources created by these
/// samples.
pub const SOURCE_LABEL_PREFIX: &str = "compute_custom_machine_type";

/// Returns the machine type of an existing VM.
///
/// The service returns the full URL of the machine type, for example,
/// `https://www.googleapis.com/compute/v1/projects/my-project/zones/us-central1-a/machineTypes/n2-custom-8-10240`.
pub async fn get_machine_type(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
) -> anyhow::Result<String> {
    let instance = client
        .get()
        .set_project(project_id)
        .set_zone(zone)
        .set_instance(name)
        .send()
        .await?;
    let Some(machine_type) = instance.machine_type else {
        return Err(anyhow::Error::msg(format!(
            "missing machine type in instance {name}"
        )));
    };
    Ok(machine_type)
}

/// Deletes the VMs created by these samples more than 48 hours ago.
///
/// Failures to delete a VM are printed and ignored.
pub async fn cleanup_stale_instances(client: &Instances, project_id: &str) -> anyhow::Result<()> {
    let deadline = stale_deadline()?;
    let mut stale = Vec::new();
    let mut items = client
        .aggregated_list()
        .set_project(project_id)
        .set_return_partial_success(true)
        .by_item();
    while let Some((_zone, scoped_list)) = items.next().await.transpose()? {
        stale.extend(
            scoped_list
                .instances
                .into_iter()
                .filter_map(|instance| stale_instance(instance, &deadline)),
        );
    }

    for (zone, name) in stale {
        println!("Deleting VM {name} in zone {zone}");
        if let Err(e) = compute_instances_delete::sample(client, project_id, &zone, &name).await {
            println!("error deleting VM {name} in zone {zone}: {e:?}");
        }
    }
    Ok(())
}

fn stale_deadline() -> anyhow::Result<Timestamp> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
    let deadline = now.saturating_sub(Duration::from_secs(48 * 60 * 60));
    Ok(Timestamp::clamp(deadline.as_secs() as i64, 0))
}

/// Returns the zone and name of `instance` if it was created by these samples
/// before `deadline`.
fn stale_instance(instance: Instance, deadline: &Timestamp) -> Option<(String, String)> {
    let source = instance.labels.get("source")?;
    if !source.starts_with(SOURCE_LABEL_PREFIX) {
        return None;
    }
    let created = instance
        .creation_timestamp
        .as_ref()
        .and_then(|v| Timestamp::try_from(v).ok())?;
    if &created > deadline {
        return None;
    }
    Some((instance.zone?, instance.name?))
}
