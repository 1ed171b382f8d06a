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

pub mod diff;

use std::collections::HashSet;

use diesel::prelude::*;
use diesel::result::Error::NotFound;

use crate::error::Error;
use diff::{compute_diff, MembershipDiff, MembershipRequest};

/// A fully resolved group: its id plus the owning application and the team
/// derived through it. Membership mutations are only legal against groups
/// that resolve to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupContext {
    pub group_id: uuid::Uuid,
    pub application_id: uuid::Uuid,
    pub team_id: uuid::Uuid,
}

pub fn resolve_group_context(
    conn: &mut PgConnection,
    group_id: uuid::Uuid,
) -> Result<GroupContext, Error> {
    use db_connector::schema::applications::dsl as applications;
    use db_connector::schema::device_groups::dsl as device_groups;

    let application_id: Option<uuid::Uuid> = match device_groups::device_groups
        .find(group_id)
        .select(device_groups::application_id)
        .get_result(conn)
    {
        Ok(v) => v,
        Err(NotFound) => return Err(Error::GroupDoesNotExist),
        Err(_err) => return Err(Error::InternalError),
    };

    // Detached groups have no application and therefore no derivable team.
    let application_id = match application_id {
        Some(v) => v,
        None => return Err(Error::GroupHasNoTeam),
    };

    let team_id: uuid::Uuid = match applications::applications
        .find(application_id)
        .select(applications::team_id)
        .get_result(conn)
    {
        Ok(v) => v,
        Err(NotFound) => return Err(Error::GroupHasNoTeam),
        Err(_err) => return Err(Error::InternalError),
    };

    Ok(GroupContext {
        group_id,
        application_id,
        team_id,
    })
}

pub fn current_member_ids(
    conn: &mut PgConnection,
    group_id: uuid::Uuid,
) -> Result<HashSet<i64>, Error> {
    use db_connector::schema::devices::dsl as devices;

    let ids: Vec<i64> = match devices::devices
        .filter(devices::group_id.eq(group_id))
        .select(devices::id)
        .load(conn)
    {
        Ok(v) => v,
        Err(_err) => return Err(Error::InternalError),
    };

    Ok(ids.into_iter().collect())
}

/// Assigns the given devices to the group. Validation and mutation share the
/// same predicates so a concurrent writer cannot slip an ineligible device
/// past the count check: eligible devices are unassigned or already in this
/// group, and scoped to the group's application and team.
///
/// Expects to run inside a caller-provided transaction.
pub fn assign_devices_to_group(
    conn: &mut PgConnection,
    group: &GroupContext,
    ids: &[i64],
) -> Result<(), Error> {
    use db_connector::schema::devices::dsl as devices;

    let eligible: i64 = devices::devices
        .filter(devices::id.eq_any(ids.to_vec()))
        .filter(
            devices::group_id
                .is_null()
                .or(devices::group_id.eq(group.group_id)),
        )
        .filter(devices::application_id.eq(group.application_id))
        .filter(devices::team_id.eq(group.team_id))
        .count()
        .get_result(conn)?;

    if eligible != ids.len() as i64 {
        return Err(Error::DevicesCannotBeAdded);
    }

    diesel::update(
        devices::devices
            .filter(devices::id.eq_any(ids.to_vec()))
            .filter(
                devices::group_id
                    .is_null()
                    .or(devices::group_id.eq(group.group_id)),
            )
            .filter(devices::application_id.eq(group.application_id))
            .filter(devices::team_id.eq(group.team_id)),
    )
    .set(devices::group_id.eq(group.group_id))
    .execute(conn)?;

    Ok(())
}

/// Removes the given devices from the group. The `group_id` predicate on the
/// update defends against a concurrent reassignment between the count check
/// and the mutation.
///
/// Expects to run inside a caller-provided transaction.
pub fn remove_devices_from_group(
    conn: &mut PgConnection,
    group: &GroupContext,
    ids: &[i64],
) -> Result<(), Error> {
    use db_connector::schema::devices::dsl as devices;

    let eligible: i64 = devices::devices
        .filter(devices::id.eq_any(ids.to_vec()))
        .filter(devices::group_id.eq(group.group_id))
        .filter(devices::application_id.eq(group.application_id))
        .filter(devices::team_id.eq(group.team_id))
        .count()
        .get_result(conn)?;

    if eligible != ids.len() as i64 {
        return Err(Error::DevicesCannotBeRemoved);
    }

    diesel::update(
        devices::devices
            .filter(devices::id.eq_any(ids.to_vec()))
            .filter(devices::group_id.eq(group.group_id))
            .filter(devices::application_id.eq(group.application_id))
            .filter(devices::team_id.eq(group.team_id)),
    )
    .set(devices::group_id.eq(None::<uuid::Uuid>))
    .execute(conn)?;

    Ok(())
}

/// Applies a computed diff in one atomic transaction. Additions always run
/// before removals; a device present in both lists ends up removed. On any
/// error the whole transaction rolls back: validation errors propagate
/// unchanged, everything else is wrapped as `MembershipUpdateFailed` with the
/// original message.
pub fn apply_membership(
    conn: &mut PgConnection,
    group: &GroupContext,
    diff: &MembershipDiff,
) -> Result<(), Error> {
    conn.transaction::<_, Error, _>(|conn| {
        if !diff.to_add.is_empty() {
            assign_devices_to_group(conn, group, &diff.to_add)?;
        }
        if !diff.to_remove.is_empty() {
            remove_devices_from_group(conn, group, &diff.to_remove)?;
        }
        Ok(())
    })
}

/// The full reconciliation pipeline: resolve the group, snapshot its current
/// membership, compute the diff and apply it. Callers are expected to have
/// short-circuited empty requests before acquiring a connection.
pub fn reconcile(
    conn: &mut PgConnection,
    group_id: uuid::Uuid,
    request: &MembershipRequest,
) -> Result<GroupContext, Error> {
    let group = resolve_group_context(conn, group_id)?;
    let current = current_member_ids(conn, group.group_id)?;

    let diff = compute_diff(&current, request);
    if !diff.is_empty() {
        apply_membership(conn, &group, &diff)?;
    }

    Ok(group)
}
