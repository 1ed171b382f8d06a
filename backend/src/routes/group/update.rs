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
use db_connector::models::device_groups::DeviceGroup;
use diesel::prelude::*;
use diesel::result::Error::NotFound;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::GroupResponseSchema;
use crate::{
    error::Error,
    utils::{get_connection, parse_uuid, web_block_unpacked},
    AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateGroupSchema {
    pub group_id: String,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = db_connector::schema::device_groups)]
struct GroupChangeset {
    name: Option<String>,
    description: Option<String>,
}

/// Edit name and/or description of a device group. Only fields present in
/// the request are changed.
#[utoipa::path(
    context_path = "/group",
    request_body = UpdateGroupSchema,
    responses(
        (status = 200, description = "Group was updated successfully", body = GroupResponseSchema),
        (status = 400, description = "Invalid group id or group not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[post("/update")]
pub async fn update(
    state: web::Data<AppState>,
    payload: actix_web_validator::Json<UpdateGroupSchema>,
) -> actix_web::Result<impl Responder> {
    let group_id = parse_uuid(&payload.group_id)?;
    let changeset = GroupChangeset {
        name: payload.name.clone(),
        description: payload.description.clone(),
    };

    let mut conn = get_connection(&state)?;
    let group = web_block_unpacked(move || {
        use db_connector::schema::device_groups::dsl as device_groups;

        let group: DeviceGroup = match device_groups::device_groups
            .find(group_id)
            .select(DeviceGroup::as_select())
            .get_result(&mut conn)
        {
            Ok(g) => g,
            Err(NotFound) => return Err(Error::GroupDoesNotExist),
            Err(_err) => return Err(Error::InternalError),
        };

        // Diesel rejects an empty changeset, and there is nothing to do.
        if changeset.name.is_none() && changeset.description.is_none() {
            return Ok(group);
        }

        match diesel::update(device_groups::device_groups.find(group_id))
            .set(&changeset)
            .get_result::<DeviceGroup>(&mut conn)
        {
            Ok(g) => Ok(g),
            Err(_err) => Err(Error::InternalError),
        }
    })
    .await?;

    Ok(HttpResponse::Ok().json(GroupResponseSchema::from(group)))
}
