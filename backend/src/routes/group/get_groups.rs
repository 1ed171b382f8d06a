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

use actix_web::{get, web, HttpResponse, Responder};
use db_connector::models::device_groups::DeviceGroup;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GroupResponseSchema;
use crate::{
    error::Error,
    utils::{get_connection, parse_uuid, web_block_unpacked},
    AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetGroupsQuery {
    pub application_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GetGroupsResponse {
    pub groups: Vec<GroupResponseSchema>,
}

/// List the device groups of an application
#[utoipa::path(
    context_path = "/group",
    params(
        ("application_id" = String, Query, description = "Application to list groups for")
    ),
    responses(
        (status = 200, description = "List of device groups", body = GetGroupsResponse),
        (status = 400, description = "Invalid application id"),
        (status = 500, description = "Internal server error")
    )
)]
#[get("/list")]
pub async fn get_groups(
    state: web::Data<AppState>,
    query: web::Query<GetGroupsQuery>,
) -> actix_web::Result<impl Responder> {
    let application_id = parse_uuid(&query.application_id)?;

    let mut conn = get_connection(&state)?;
    let groups: Vec<DeviceGroup> = web_block_unpacked(move || {
        use db_connector::schema::device_groups::dsl as device_groups;

        match device_groups::device_groups
            .filter(device_groups::application_id.eq(application_id))
            .select(DeviceGroup::as_select())
            .load(&mut conn)
        {
            Ok(g) => Ok(g),
            Err(_err) => Err(Error::InternalError),
        }
    })
    .await?;

    let response = GetGroupsResponse {
        groups: groups.into_iter().map(GroupResponseSchema::from).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}
