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

// [START compute_instances_delete]
use google_cloud_compute_v1::client::Instances;
use google_cloud_lro::Poller;

/// Deletes the VM `name` in `zone`.
///
/// `zone` may be the zone name or the zone URL, as found in `Instance::zone`.
pub async fn sample(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
) -> anyhow::Result<()> {
    let zone = zone.rsplit('/').next().unwrap_or(zone);
    let operation = client
        .delete()
        .set_project(project_id)
        .set_zone(zone)
        .set_instance(name)
        .poller()
        .until_done()
        .await?
        .to_result()?;
    println!("Instance {name} deleted from {zone}: {operation:?}");

    Ok(())
}
// [END compute_instances_delete]
