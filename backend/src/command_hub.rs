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

use std::collections::HashMap;
use std::sync::Mutex;

use actix::prelude::*;
use actix_web::web::Bytes;
use serde_json::json;

/// Connected devices are keyed by their owning team plus their device id.
pub type DeviceKey = (uuid::Uuid, i64);

#[derive(Message)]
#[rtype(result = "()")]
pub struct CommandMessage(pub Bytes);

/// Registry of live device connections. The transport that feeds it is
/// external; the backend only ever hands serialized commands to whatever
/// recipient the transport registered.
#[derive(Default)]
pub struct CommandHub {
    connected_devices: Mutex<HashMap<DeviceKey, Recipient<CommandMessage>>>,
}

impl CommandHub {
    pub fn register(
        &self,
        team_id: uuid::Uuid,
        device_id: i64,
        recipient: Recipient<CommandMessage>,
    ) {
        self.connected_devices
            .lock()
            .unwrap()
            .insert((team_id, device_id), recipient);
    }

    pub fn deregister(&self, team_id: uuid::Uuid, device_id: i64) {
        self.connected_devices
            .lock()
            .unwrap()
            .remove(&(team_id, device_id));
    }

    /// Fire-and-forget dispatch of a named command. Returns false when the
    /// device has no live connection; delivery is never awaited or retried.
    pub fn send_command(
        &self,
        team_id: uuid::Uuid,
        device_id: i64,
        command: &str,
        payload: serde_json::Value,
    ) -> bool {
        let devices = self.connected_devices.lock().unwrap();
        let recipient = match devices.get(&(team_id, device_id)) {
            Some(r) => r,
            None => return false,
        };

        let msg = json!({
            "command": command,
            "payload": payload,
        });
        recipient.do_send(CommandMessage(Bytes::from(msg.to_string())));
        true
    }
}
