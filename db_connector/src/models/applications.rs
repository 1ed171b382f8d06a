use super::teams::Team;
use diesel::prelude::*;

#[derive(
    Debug, Clone, Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq,
)]
#[diesel(belongs_to(Team))]
#[diesel(table_name = crate::schema::applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Application {
    pub id: uuid::Uuid,
    pub uid: i64,
    pub name: String,
    pub team_id: uuid::Uuid,
}
