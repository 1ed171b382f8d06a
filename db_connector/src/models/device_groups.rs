use super::applications::Application;
use diesel::prelude::*;

#[derive(
    Debug, Clone, Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq,
)]
#[diesel(belongs_to(Application))]
#[diesel(table_name = crate::schema::device_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeviceGroup {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: Option<String>,
    pub application_id: Option<uuid::Uuid>,
    pub created_at: chrono::NaiveDateTime,
}
