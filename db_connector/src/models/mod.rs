pub mod applications;
pub mod device_groups;
pub mod devices;
pub mod pipeline_stage_device_groups;
pub mod snapshots;
pub mod teams;
