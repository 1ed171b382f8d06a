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

use actix_web::{put, web, HttpResponse, Responder};
use db_connector::models::device_groups::DeviceGroup;
use diesel::prelude::*;
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
pub struct CreateGroupSchema {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub application_id: Option<String>,
    pub description: Option<String>,
}

/// Create a device group. Without an application the group is created
/// detached and cannot hold members until one is assigned.
#[utoipa::path(
    context_path = "/group",
    request_body = CreateGroupSchema,
    responses(
        (status = 200, description = "Group was created successfully", body = GroupResponseSchema),
        (status = 400, description = "The request contains invalid data"),
        (status = 500, description = "Internal server error")
    )
)]
#[put("/create")]
pub async fn create(
    state: web::Data<AppState>,
    payload: actix_web_validator::Json<CreateGroupSchema>,
) -> actix_web::Result<impl Responder> {
    let application_id = match &payload.application_id {
        Some(id) => Some(parse_uuid(id)?),
        None => None,
    };

    let group = DeviceGroup {
        id: uuid::Uuid::new_v4(),
        name: payload.name.clone(),
        description: payload.description.clone(),
        application_id,
        created_at: chrono::Utc::now().naive_utc(),
    };

    let mut conn = get_connection(&state)?;
    let group = web_block_unpacked(move || {
        use db_connector::schema::device_groups::dsl as device_groups;

        match diesel::insert_into(device_groups::device_groups)
            .values(&group)
            .get_result::<DeviceGroup>(&mut conn)
        {
            Ok(g) => Ok(g),
            Err(_err) => Err(Error::InternalError),
        }
    })
    .await?;

    Ok(HttpResponse::Ok().json(GroupResponseSchema::from(group)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::{
        routes::group::{configure, test_helpers::*},
        tests::{configure as test_configure, TestScope},
    };

    #[actix_web::test]
    async fn test_create_group() {
        let scope = TestScope::new();

        let app = App::new().configure(test_configure).configure(configure);
        let app = test::init_service(app).await;

        let body = CreateGroupSchema {
            name: "Test Group".to_string(),
            application_id: Some(scope.application_id.to_string()),
            description: Some("staging devices".to_string()),
        };

        let req = test::TestRequest::put()
            .uri("/group/create")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let response: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(response["name"], "Test Group");
        assert_eq!(response["description"], "staging devices");

        let group_id = response["id"].as_str().unwrap();
        let group = get_group_from_db(group_id).unwrap();
        assert_eq!(group.name, "Test Group");
        assert_eq!(group.application_id, Some(scope.application_id));

        delete_test_group_from_db(group_id);
        scope.cleanup();
    }

    #[actix_web::test]
    async fn test_create_detached_group() {
        let app = App::new().configure(test_configure).configure(configure);
        let app = test::init_service(app).await;

        let body = CreateGroupSchema {
            name: "Detached".to_string(),
            application_id: None,
            description: None,
        };

        let req = test::TestRequest::put()
            .uri("/group/create")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let response: serde_json::Value = test::read_body_json(resp).await;
        assert!(response["application_id"].is_null());

        delete_test_group_from_db(response["id"].as_str().unwrap());
    }

    #[actix_web::test]
    async fn test_create_group_requires_name() {
        let app = App::new().configure(test_configure).configure(configure);
        let app = test::init_service(app).await;

        let body = CreateGroupSchema {
            name: String::new(),
            application_id: None,
            description: None,
        };

        let req = test::TestRequest::put()
            .uri("/group/create")
            .set_json(&body)
            .to_request();
        let resp = crate::tests::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }
}
