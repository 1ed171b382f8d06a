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

pub mod create;
pub mod get_groups;
pub mod membership;
pub mod send_update;
pub mod update;

#[cfg(test)]
pub(crate) mod test_helpers;

use actix_web::web;
use serde::Serialize;
use utoipa::ToSchema;

use db_connector::models::device_groups::DeviceGroup;

pub fn configure(cfg: &mut web::ServiceConfig) {
    let scope = web::scope("/group")
        .service(create::create)
        .service(update::update)
        .service(get_groups::get_groups)
        .service(membership::update_membership)
        .service(send_update::send_update);
    cfg.service(scope);
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupResponseSchema {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub application_id: Option<String>,
}

impl From<DeviceGroup> for GroupResponseSchema {
    fn from(group: DeviceGroup) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name,
            description: group.description,
            application_id: group.application_id.map(|id| id.to_string()),
        }
    }
}
