use diesel::prelude::*;

#[derive(Clone, Debug, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::rollcall::position)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Position {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rollcall::position)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPosition {
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Clone, Debug, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::rollcall::employee_status)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeStatus {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rollcall::employee_status)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEmployeeStatus {
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Clone, Debug, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::rollcall::attendance_status)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttendanceStatus {
    pub id: i32,
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rollcall::attendance_status)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAttendanceStatus {
    pub name: String,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Clone, Debug, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::rollcall::person)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Person {
    pub id: uuid::Uuid,
    pub full_name: String,
    pub birth_date: jiff_diesel::Date,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rollcall::person)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPerson {
    pub id: uuid::Uuid,
    pub full_name: String,
    pub birth_date: jiff_diesel::Date,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

/// Partial update for a person. `None` fields are left untouched; the nested
/// `Option` on the nullable columns distinguishes "set null" from "leave alone".
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::rollcall::person)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PersonChanges {
    pub full_name: Option<String>,
    pub birth_date: Option<jiff_diesel::Date>,
    pub phone_number: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

#[derive(Clone, Debug, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::rollcall::employee)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(Person))]
pub struct Employee {
    pub id: uuid::Uuid,
    pub person_id: uuid::Uuid,
    pub employee_id: String,
    pub position_id: i32,
    pub status_id: i32,
    pub hire_date: jiff_diesel::Date,
    pub is_biometric_enabled: bool,
    pub security_image_identifier: Option<String>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rollcall::employee)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEmployee {
    pub id: uuid::Uuid,
    pub person_id: uuid::Uuid,
    pub employee_id: String,
    pub position_id: i32,
    pub status_id: i32,
    pub hire_date: jiff_diesel::Date,
    pub is_biometric_enabled: bool,
    pub security_image_identifier: Option<String>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

/// Partial update for an employee. Any applied change refreshes `updated` and
/// re-syncs the auth projection; an empty changeset still forces a re-sync
/// (the "touch" used to repair stale projection rows).
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::rollcall::employee)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeChanges {
    pub position_id: Option<i32>,
    pub status_id: Option<i32>,
    pub is_biometric_enabled: Option<bool>,
    pub security_image_identifier: Option<String>,
}

#[derive(Clone, Debug, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::rollcall::attendance_record)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(Employee))]
pub struct AttendanceRecord {
    pub id: i32,
    pub employee_id: uuid::Uuid,
    pub attendance_date: jiff_diesel::Date,
    pub status_id: i32,
    pub check_in: Option<jiff_diesel::Timestamp>,
    pub check_out: Option<jiff_diesel::Timestamp>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rollcall::attendance_record)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAttendanceRecord {
    pub employee_id: uuid::Uuid,
    pub attendance_date: jiff_diesel::Date,
    pub status_id: i32,
    pub check_in: Option<jiff_diesel::Timestamp>,
    pub check_out: Option<jiff_diesel::Timestamp>,
    pub created: jiff_diesel::Timestamp,
    pub updated: jiff_diesel::Timestamp,
}

/// A denormalized login row. Every field other than `last_synced_at` is a
/// verbatim copy of employee/person data or a catalog name as of the last
/// committed employee write.
#[derive(Clone, Debug, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::rollcall::auth_user)]
#[diesel(primary_key(employee_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuthUser {
    pub employee_id: String,
    pub employee_uuid: uuid::Uuid,
    pub person_uuid: uuid::Uuid,
    pub full_name: String,
    pub birth_date: jiff_diesel::Date,
    pub security_image_identifier: Option<String>,
    pub status_name: String,
    pub position_name: String,
    pub is_biometric_enabled: bool,
    pub last_synced_at: jiff_diesel::Timestamp,
}

/// Insert-or-replace payload for the projection upsert. Doubles as the
/// changeset applied on conflict so every field is overwritten.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::rollcall::auth_user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewAuthUser {
    pub employee_id: String,
    pub employee_uuid: uuid::Uuid,
    pub person_uuid: uuid::Uuid,
    pub full_name: String,
    pub birth_date: jiff_diesel::Date,
    pub security_image_identifier: Option<String>,
    pub status_name: String,
    pub position_name: String,
    pub is_biometric_enabled: bool,
    pub last_synced_at: jiff_diesel::Timestamp,
}
