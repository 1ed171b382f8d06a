/* fleet-remote-access
 * Copyright (C) 2025 Frederic Henrichs <frederic@tinkerforge.com>
 *
 * This library is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 2 of the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library; if not, write to the
 * Free Software Foundation, Inc., 59 Temple Place - Suite 330,
 * Boston, MA 02111-1307, USA.
 */

use actix_web::{post, web, HttpResponse, Responder};
use db_connector::models::devices::Device;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    command_hub::CommandHub,
    error::Error,
    membership::resolve_group_context,
    models::device_ref::encode_external_id,
    utils::{get_connection, parse_uuid, web_block_unpacked},
    AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendUpdateSchema {
    pub group_id: String,
}

/// Everything needed to build update commands for one group, loaded in a
/// single blocking hop.
struct UpdateBatch {
    team_id: uuid::Uuid,
    license_active: bool,
    application_uid: i64,
    snapshot_uid: i64,
    devices: Vec<Device>,
}

fn load_update_batch(
    conn: &mut PgConnection,
    group_id: uuid::Uuid,
) -> Result<Option<UpdateBatch>, Error> {
    use db_connector::schema::applications::dsl as applications;
    use db_connector::schema::devices::dsl as devices;
    use db_connector::schema::pipeline_stage_device_groups::dsl as pipeline_stages;
    use db_connector::schema::snapshots::dsl as snapshots;
    use db_connector::schema::teams::dsl as teams;

    let group = resolve_group_context(conn, group_id)?;

    // No pipeline stage drives this group: nothing to send.
    let target_snapshot_id: Option<uuid::Uuid> = match pipeline_stages::pipeline_stage_device_groups
        .filter(pipeline_stages::device_group_id.eq(group.group_id))
        .select(pipeline_stages::target_snapshot_id)
        .first(conn)
        .optional()
    {
        Ok(v) => v,
        Err(_err) => return Err(Error::InternalError),
    };
    let target_snapshot_id = match target_snapshot_id {
        Some(v) => v,
        None => return Ok(None),
    };

    let application_uid: i64 = match applications::applications
        .find(group.application_id)
        .select(applications::uid)
        .get_result(conn)
    {
        Ok(v) => v,
        Err(_err) => return Err(Error::InternalError),
    };

    let license_active: bool = match teams::teams
        .find(group.team_id)
        .select(teams::license_active)
        .get_result(conn)
    {
        Ok(v) => v,
        Err(_err) => return Err(Error::InternalError),
    };

    let snapshot_uid: i64 = match snapshots::snapshots
        .find(target_snapshot_id)
        .select(snapshots::uid)
        .get_result(conn)
    {
        Ok(v) => v,
        Err(_err) => return Err(Error::InternalError),
    };

    // Members whose target differs from the group's target are not yet meant
    // to receive this update and are skipped.
    let devices: Vec<Device> = match devices::devices
        .filter(devices::group_id.eq(group.group_id))
        .filter(devices::target_snapshot_id.eq(target_snapshot_id))
        .select(Device::as_select())
        .load(conn)
    {
        Ok(v) => v,
        Err(_err) => return Err(Error::InternalError),
    };

    Ok(Some(UpdateBatch {
        team_id: group.team_id,
        license_active,
        application_uid,
        snapshot_uid,
        devices,
    }))
}

/// Push an "update" command to every connected member device that is on the
/// group's current target snapshot. Best-effort: offline devices are skipped
/// and delivery is never awaited.
pub async fn send_update_command(
    state: &web::Data<AppState>,
    hub: &web::Data<CommandHub>,
    group_id: uuid::Uuid,
) -> actix_web::Result<()> {
    let mut conn = get_connection(state)?;
    let batch = web_block_unpacked(move || load_update_batch(&mut conn, group_id)).await?;

    let batch = match batch {
        Some(b) => b,
        None => return Ok(()),
    };

    for device in batch.devices {
        let payload = json!({
            "ownerType": "application",
            "applicationId": encode_external_id(batch.application_uid),
            "snapshotId": encode_external_id(batch.snapshot_uid),
            "settingsHash": device.settings_hash,
            "mode": device.mode,
            "licensed": batch.license_active,
        });

        if !hub.send_command(batch.team_id, device.id, "update", payload) {
            log::debug!("Device '{}' is not connected, skipping update command", device.id);
        }
    }

    Ok(())
}

/// Trigger update commands for all connected devices of a group
#[utoipa::path(
    context_path = "/group",
    request_body = SendUpdateSchema,
    responses(
        (status = 200, description = "Update commands were dispatched"),
        (status = 400, description = "Invalid group id or group not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[post("/send_update")]
pub async fn send_update(
    state: web::Data<AppState>,
    hub: web::Data<CommandHub>,
    payload: web::Json<SendUpdateSchema>,
) -> actix_web::Result<impl Responder> {
    let group_id = parse_uuid(&payload.group_id)?;
    send_update_command(&state, &hub, group_id).await?;

    Ok(HttpResponse::Ok())
}
