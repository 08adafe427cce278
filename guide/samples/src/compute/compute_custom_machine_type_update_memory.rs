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

// [START compute_custom_machine_type_update_memory]
use anyhow::bail;
use custom_machine_type::{CpuSeries, CustomMachineType};
use google_cloud_compute_v1::client::Instances;
use google_cloud_compute_v1::model::InstancesSetMachineTypeRequest;
use google_cloud_lro::Poller;

/// Changes the memory of a VM using a custom machine type.
///
/// The VM must use an N1, N2, or N2D custom machine type. The number of vCPUs
/// does not change. Memory above the per-vCPU limit uses extended memory.
///
/// The VM is stopped before changing its machine type. It is started again
/// afterwards, also when the change fails. If the VM cannot be stopped it is
/// left as is.
pub async fn sample(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
    memory_mb: u32,
) -> anyhow::Result<CustomMachineType> {
    let current = super::get_machine_type(client, project_id, zone, name).await?;
    let machine_type = updated_machine_type(&current, zone, memory_mb)?;
    println!("Changing machine type from {current} to {machine_type}");

    let operation = client
        .stop()
        .set_project(project_id)
        .set_zone(zone)
        .set_instance(name)
        .poller()
        .until_done()
        .await?
        .to_result()?;
    println!("Instance stopped: {operation:?}");

    update_then_start(
        set_machine_type(client, project_id, zone, name, &machine_type),
        start(client, project_id, zone, name),
    )
    .await?;

    Ok(machine_type)
}

async fn set_machine_type(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
    machine_type: &CustomMachineType,
) -> anyhow::Result<()> {
    let operation = client
        .set_machine_type()
        .set_project(project_id)
        .set_zone(zone)
        .set_instance(name)
        .set_body(
            InstancesSetMachineTypeRequest::new().set_machine_type(machine_type.to_full_path()),
        )
        .poller()
        .until_done()
        .await?
        .to_result()?;
    println!("Instance updated: {operation:?}");
    Ok(())
}

async fn start(
    client: &Instances,
    project_id: &str,
    zone: &str,
    name: &str,
) -> anyhow::Result<()> {
    let operation = client
        .start()
        .set_project(project_id)
        .set_zone(zone)
        .set_instance(name)
        .poller()
        .until_done()
        .await?
        .to_result()?;
    println!("Instance started: {operation:?}");
    Ok(())
}

/// Runs `update` and then `start`, even if `update` fails.
///
/// The error from `update`, if any, takes precedence.
async fn update_then_start<U, S>(update: U, start: S) -> anyhow::Result<()>
where
    U: Future<Output = anyhow::Result<()>>,
    S: Future<Output = anyhow::Result<()>>,
{
    let updated = update.await;
    let started = start.await;
    updated?;
    started
}

/// Computes the new machine type, keeping the series and number of vCPUs of
/// `current`.
///
/// `current` may be a full URL, a path, or just the machine type name.
pub fn updated_machine_type(
    current: &str,
    zone: &str,
    memory_mb: u32,
) -> anyhow::Result<CustomMachineType> {
    let (series, core_count) = parse_custom_machine_type(current)?;
    if !matches!(series, CpuSeries::N1 | CpuSeries::N2 | CpuSeries::N2D) {
        bail!(
            "extended memory is only available for N1, N2, and N2D custom machine types, got {current}"
        );
    }
    let machine_type = CustomMachineType::with_default_limits(zone, series, memory_mb, core_count)?;
    Ok(machine_type)
}

fn parse_custom_machine_type(machine_type: &str) -> anyhow::Result<(CpuSeries, u32)> {
    let name = machine_type.rsplit('/').next().unwrap_or(machine_type);
    let name = name.strip_suffix("-ext").unwrap_or(name);
    // The name is `{series}-{cores}-{memory}`, and the series may contain `-`.
    let mut parts = name.rsplitn(3, '-');
    let (Some(memory), Some(cores), Some(series)) = (parts.next(), parts.next(), parts.next())
    else {
        bail!("{machine_type} is not a custom machine type");
    };
    if memory.parse::<u32>().is_err() {
        bail!("{machine_type} is not a custom machine type");
    }
    let Ok(cores) = cores.parse::<u32>() else {
        bail!("{machine_type} is not a custom machine type with a configurable number of cores");
    };
    Ok((series.parse::<CpuSeries>()?, cores))
}
// [END compute_custom_machine_type_update_memory]
