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
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::send_update::send_update_command;
use crate::{
    command_hub::CommandHub,
    membership::{diff::MembershipRequest, reconcile},
    models::device_ref::DeviceRef,
    utils::{get_connection, parse_uuid, web_block_unpacked},
    AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMembershipSchema {
    pub group_id: String,
    pub add_devices: Option<Vec<DeviceRef>>,
    pub remove_devices: Option<Vec<DeviceRef>>,
    pub set_devices: Option<Vec<DeviceRef>>,
}

fn resolve_refs(refs: &Option<Vec<DeviceRef>>) -> actix_web::Result<Option<Vec<i64>>> {
    let refs = match refs {
        Some(refs) => refs,
        None => return Ok(None),
    };

    let mut ids = Vec::with_capacity(refs.len());
    for device_ref in refs {
        ids.push(device_ref.resolve()?);
    }
    Ok(Some(ids))
}

/// Reconcile the membership of a device group. `set_devices` is
/// authoritative when present; otherwise `add_devices`/`remove_devices` are
/// applied as independent filters against the current membership, additions
/// before removals. After a successful mutation, connected member devices on
/// the group's target snapshot receive an update command (best-effort).
#[utoipa::path(
    context_path = "/group",
    request_body = UpdateMembershipSchema,
    responses(
        (status = 200, description = "Membership was updated"),
        (status = 400, description = "Invalid input or ineligible devices in the request"),
        (status = 500, description = "Internal server error")
    )
)]
#[post("/update_membership")]
pub async fn update_membership(
    state: web::Data<AppState>,
    hub: web::Data<CommandHub>,
    payload: web::Json<UpdateMembershipSchema>,
) -> actix_web::Result<impl Responder> {
    let group_id = parse_uuid(&payload.group_id)?;

    let request = MembershipRequest {
        add: resolve_refs(&payload.add_devices)?,
        remove: resolve_refs(&payload.remove_devices)?,
        set: resolve_refs(&payload.set_devices)?,
    };

    // Nothing requested: return without touching the database.
    if request.is_empty() {
        return Ok(HttpResponse::Ok());
    }

    let mut conn = get_connection(&state)?;
    let group = web_block_unpacked(move || reconcile(&mut conn, group_id, &request)).await?;

    // The membership change is committed at this point; a failed notification
    // pass must not turn it into a request error.
    if let Err(err) = send_update_command(&state, &hub, group.group_id).await {
        log::warn!(
            "Failed to send update commands for group '{}': {:?}",
            group.group_id,
            err
        );
    }

    Ok(HttpResponse::Ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::{
        models::device_ref::encode_external_id,
        routes::group::{configure, test_helpers::*},
        tests::{configure as test_configure, TestScope},
    };

    fn refs(ids: &[i64]) -> Option<Vec<DeviceRef>> {
        Some(ids.iter().map(|id| DeviceRef::Numeric(*id)).collect())
    }

    #[actix_web::test]
    async fn test_set_devices_reaches_requested_membership() {
        let scope = TestScope::new();
        let group = scope.add_group("set membership");
        let d1 = scope.add_device_in_group(group);
        let d2 = scope.add_device_in_group(group);
        let d3 = scope.add_device_in_group(group);
        let d4 = scope.add_device();

        let app = App::new()
            .configure(test_configure)
            .app_data(web::Data::new(CommandHub::default()))
            .configure(configure);
        let app = test::init_service(app).await;

        let body = UpdateMembershipSchema {
            group_id: group.to_string(),
            add_devices: None,
            remove_devices: None,
            set_devices: refs(&[d2, d3, d4]),
        };

        let req = test::TestRequest::post()
            .uri("/group/update_membership")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        assert_eq!(get_device_group(d1), None);
        assert_eq!(get_device_group(d2), Some(group));
        assert_eq!(get_device_group(d3), Some(group));
        assert_eq!(get_device_group(d4), Some(group));

        scope.cleanup();
    }

    #[actix_web::test]
    async fn test_add_encoded_device_reference() {
        let scope = TestScope::new();
        let group = scope.add_group("encoded ref");
        let device = scope.add_device();

        let app = App::new()
            .configure(test_configure)
            .app_data(web::Data::new(CommandHub::default()))
            .configure(configure);
        let app = test::init_service(app).await;

        let body = UpdateMembershipSchema {
            group_id: group.to_string(),
            add_devices: Some(vec![DeviceRef::Encoded(encode_external_id(device))]),
            remove_devices: None,
            set_devices: None,
        };

        let req = test::TestRequest::post()
            .uri("/group/update_membership")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        assert_eq!(get_device_group(device), Some(group));

        scope.cleanup();
    }

    #[actix_web::test]
    async fn test_add_wrong_team_device_fails_with_400() {
        let scope = TestScope::new();
        let other_scope = TestScope::new();
        let group = scope.add_group("wrong team");
        let foreign_device = other_scope.add_device();

        let app = App::new()
            .configure(test_configure)
            .app_data(web::Data::new(CommandHub::default()))
            .configure(configure);
        let app = test::init_service(app).await;

        let body = UpdateMembershipSchema {
            group_id: group.to_string(),
            add_devices: refs(&[foreign_device]),
            remove_devices: None,
            set_devices: None,
        };

        let req = test::TestRequest::post()
            .uri("/group/update_membership")
            .set_json(&body)
            .to_request();
        let resp = crate::tests::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        assert_eq!(get_device_group(foreign_device), None);

        scope.cleanup();
        other_scope.cleanup();
    }

    #[actix_web::test]
    async fn test_empty_request_is_a_noop() {
        let scope = TestScope::new();
        let group = scope.add_group("noop");

        let app = App::new()
            .configure(test_configure)
            .app_data(web::Data::new(CommandHub::default()))
            .configure(configure);
        let app = test::init_service(app).await;

        let body = UpdateMembershipSchema {
            group_id: group.to_string(),
            add_devices: None,
            remove_devices: None,
            set_devices: None,
        };

        let req = test::TestRequest::post()
            .uri("/group/update_membership")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        scope.cleanup();
    }

    #[actix_web::test]
    async fn test_invalid_encoded_reference_fails_without_mutation() {
        let scope = TestScope::new();
        let group = scope.add_group("bad ref");
        let device = scope.add_device();

        let app = App::new()
            .configure(test_configure)
            .app_data(web::Data::new(CommandHub::default()))
            .configure(configure);
        let app = test::init_service(app).await;

        let body = UpdateMembershipSchema {
            group_id: group.to_string(),
            add_devices: Some(vec![
                DeviceRef::Numeric(device),
                DeviceRef::Encoded("|||".to_string()),
            ]),
            remove_devices: None,
            set_devices: None,
        };

        let req = test::TestRequest::post()
            .uri("/group/update_membership")
            .set_json(&body)
            .to_request();
        let resp = crate::tests::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        assert_eq!(get_device_group(device), None);

        scope.cleanup();
    }
}
