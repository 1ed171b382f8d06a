use super::device_groups::DeviceGroup;
use super::snapshots::Snapshot;
use diesel::prelude::*;

#[derive(
    Debug, Clone, Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq,
)]
#[diesel(belongs_to(DeviceGroup, foreign_key = device_group_id))]
#[diesel(belongs_to(Snapshot, foreign_key = target_snapshot_id))]
#[diesel(table_name = crate::schema::pipeline_stage_device_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PipelineStageDeviceGroup {
    pub id: uuid::Uuid,
    pub device_group_id: uuid::Uuid,
    pub target_snapshot_id: uuid::Uuid,
}
