use super::applications::Application;
use super::device_groups::DeviceGroup;
use super::teams::Team;
use diesel::prelude::*;

/// A managed device. `group_id` is the single membership pointer; a device
/// with a NULL `group_id` is unassigned.
#[derive(
    Debug, Clone, Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq,
)]
#[diesel(belongs_to(Application))]
#[diesel(belongs_to(Team))]
#[diesel(belongs_to(DeviceGroup, foreign_key = group_id))]
#[diesel(table_name = crate::schema::devices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Device {
    pub id: i64,
    pub name: Option<String>,
    pub application_id: uuid::Uuid,
    pub team_id: uuid::Uuid,
    pub group_id: Option<uuid::Uuid>,
    pub target_snapshot_id: Option<uuid::Uuid>,
    pub settings_hash: Option<String>,
    pub mode: String,
}
