//! Catalog tables: small id-to-name lookups used as foreign-key targets.
//! Rows are never renamed or deleted through the store; already-synced
//! projection rows keep the old name until the owning employee is re-synced.

use crate::{models, schema, Error, Store};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

impl Store {
    #[tracing::instrument(skip(self))]
    pub async fn add_position(&self, position_name: String) -> Result<models::Position, Error> {
        let now = jiff::Timestamp::now().into();
        let new_position = models::NewPosition {
            name: position_name,
            created: now,
            updated: now,
        };
        let mut conn = self.connection().await?;
        diesel::insert_into(schema::rollcall::position::table)
            .values(&new_position)
            .returning(models::Position::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| Error::from_catalog_write(err, &new_position.name))
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_employee_status(
        &self,
        status_name: String,
    ) -> Result<models::EmployeeStatus, Error> {
        let now = jiff::Timestamp::now().into();
        let new_status = models::NewEmployeeStatus {
            name: status_name,
            created: now,
            updated: now,
        };
        let mut conn = self.connection().await?;
        diesel::insert_into(schema::rollcall::employee_status::table)
            .values(&new_status)
            .returning(models::EmployeeStatus::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| Error::from_catalog_write(err, &new_status.name))
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_attendance_status(
        &self,
        status_name: String,
    ) -> Result<models::AttendanceStatus, Error> {
        let now = jiff::Timestamp::now().into();
        let new_status = models::NewAttendanceStatus {
            name: status_name,
            created: now,
            updated: now,
        };
        let mut conn = self.connection().await?;
        diesel::insert_into(schema::rollcall::attendance_status::table)
            .values(&new_status)
            .returning(models::AttendanceStatus::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| Error::from_catalog_write(err, &new_status.name))
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_position(&self, position_id: i32) -> Result<Option<models::Position>, Error> {
        use schema::rollcall::position::dsl::*;
        let mut conn = self.connection().await?;
        match position
            .filter(id.eq(position_id))
            .select(models::Position::as_select())
            .first(&mut conn)
            .await
        {
            Ok(loaded) => Ok(Some(loaded)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_employee_status(
        &self,
        employee_status_id: i32,
    ) -> Result<Option<models::EmployeeStatus>, Error> {
        use schema::rollcall::employee_status::dsl::*;
        let mut conn = self.connection().await?;
        match employee_status
            .filter(id.eq(employee_status_id))
            .select(models::EmployeeStatus::as_select())
            .first(&mut conn)
            .await
        {
            Ok(loaded) => Ok(Some(loaded)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_attendance_status(
        &self,
        attendance_status_id: i32,
    ) -> Result<Option<models::AttendanceStatus>, Error> {
        use schema::rollcall::attendance_status::dsl::*;
        let mut conn = self.connection().await?;
        match attendance_status
            .filter(id.eq(attendance_status_id))
            .select(models::AttendanceStatus::as_select())
            .first(&mut conn)
            .await
        {
            Ok(loaded) => Ok(Some(loaded)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
