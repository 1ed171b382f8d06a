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

use db_connector::{models::device_groups::DeviceGroup, test_connection_pool};
use diesel::prelude::*;

/// Helper function to get a group from the database
pub fn get_group_from_db(group_id: &str) -> Option<DeviceGroup> {
    use db_connector::schema::device_groups::dsl::*;

    let pool = test_connection_pool();
    let mut conn = pool.get().unwrap();
    let uuid_val = uuid::Uuid::parse_str(group_id).unwrap();

    device_groups
        .filter(id.eq(uuid_val))
        .select(DeviceGroup::as_select())
        .first(&mut conn)
        .ok()
}

/// Helper function to clean up a group from the database
pub fn delete_test_group_from_db(group_id: &str) {
    use db_connector::schema::device_groups::dsl::*;

    let pool = test_connection_pool();
    let mut conn = pool.get().unwrap();
    let uuid_val = uuid::Uuid::parse_str(group_id).unwrap();

    diesel::delete(device_groups.filter(id.eq(uuid_val)))
        .execute(&mut conn)
        .ok();
}

/// Helper function to read a device's current group pointer
pub fn get_device_group(device_id: i64) -> Option<uuid::Uuid> {
    use db_connector::schema::devices::dsl::*;

    let pool = test_connection_pool();
    let mut conn = pool.get().unwrap();

    devices
        .find(device_id)
        .select(group_id)
        .get_result(&mut conn)
        .unwrap()
}
