use super::applications::Application;
use diesel::prelude::*;

#[derive(
    Debug, Clone, Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq,
)]
#[diesel(belongs_to(Application))]
#[diesel(table_name = crate::schema::snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Snapshot {
    pub id: uuid::Uuid,
    pub uid: i64,
    pub application_id: uuid::Uuid,
    pub created_at: chrono::NaiveDateTime,
}
