//! Daily attendance records, at most one per employee per calendar date.
//! The store records what callers tell it; deciding that someone is absent
//! or late is policy that lives with the caller, not here.

use crate::{models, schema, types_cache::AttendanceStatusName, Error, Store};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

impl Store {
    /// Creates the day's record for an employee. A second check-in for the
    /// same employee and date surfaces as `Error::DuplicateAttendance` so the
    /// caller can fall back to updating the existing record.
    #[tracing::instrument(skip(self))]
    pub async fn check_in(
        &self,
        employee_uuid: uuid::Uuid,
        attendance_date: jiff::civil::Date,
        status: AttendanceStatusName,
        at: jiff::Timestamp,
    ) -> Result<models::AttendanceRecord, Error> {
        let now = jiff::Timestamp::now().into();
        let status_id = self.types_cache.attendance_status.id_of(status)?;
        let new_record = models::NewAttendanceRecord {
            employee_id: employee_uuid,
            attendance_date: attendance_date.into(),
            status_id,
            check_in: Some(at.into()),
            check_out: None,
            created: now,
            updated: now,
        };
        let mut conn = self.connection().await?;
        diesel::insert_into(schema::rollcall::attendance_record::table)
            .values(&new_record)
            .returning(models::AttendanceRecord::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| Error::from_attendance_write(err, attendance_date))
    }

    /// Stamps the check-out time on the existing same-day record.
    #[tracing::instrument(skip(self))]
    pub async fn check_out(
        &self,
        employee_uuid: uuid::Uuid,
        attendance_date: jiff::civil::Date,
        at: jiff::Timestamp,
    ) -> Result<models::AttendanceRecord, Error> {
        use schema::rollcall::attendance_record;
        let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
        let date: jiff_diesel::Date = attendance_date.into();
        let checked_out_at: jiff_diesel::Timestamp = at.into();
        let mut conn = self.connection().await?;
        match diesel::update(attendance_record::table)
            .filter(
                attendance_record::employee_id
                    .eq(employee_uuid)
                    .and(attendance_record::attendance_date.eq(date)),
            )
            .set((
                attendance_record::check_out.eq(Some(checked_out_at)),
                attendance_record::updated.eq(now),
            ))
            .returning(models::AttendanceRecord::as_returning())
            .get_result(&mut conn)
            .await
        {
            Ok(record) => Ok(record),
            Err(diesel::result::Error::NotFound) => Err(Error::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// Reassigns the day's status (e.g. Present -> Late). The status is
    /// always caller-assigned.
    #[tracing::instrument(skip(self))]
    pub async fn set_attendance_status(
        &self,
        employee_uuid: uuid::Uuid,
        attendance_date: jiff::civil::Date,
        status: AttendanceStatusName,
    ) -> Result<models::AttendanceRecord, Error> {
        use schema::rollcall::attendance_record;
        let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
        let date: jiff_diesel::Date = attendance_date.into();
        let status_id = self.types_cache.attendance_status.id_of(status)?;
        let mut conn = self.connection().await?;
        match diesel::update(attendance_record::table)
            .filter(
                attendance_record::employee_id
                    .eq(employee_uuid)
                    .and(attendance_record::attendance_date.eq(date)),
            )
            .set((
                attendance_record::status_id.eq(status_id),
                attendance_record::updated.eq(now),
            ))
            .returning(models::AttendanceRecord::as_returning())
            .get_result(&mut conn)
            .await
        {
            Ok(record) => Ok(record),
            Err(diesel::result::Error::NotFound) => Err(Error::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_attendance(
        &self,
        employee_uuid: uuid::Uuid,
        on_date: jiff::civil::Date,
    ) -> Result<Option<models::AttendanceRecord>, Error> {
        use schema::rollcall::attendance_record::dsl::*;
        let date: jiff_diesel::Date = on_date.into();
        let mut conn = self.connection().await?;
        match attendance_record
            .filter(employee_id.eq(employee_uuid).and(attendance_date.eq(date)))
            .select(models::AttendanceRecord::as_select())
            .first(&mut conn)
            .await
        {
            Ok(record) => Ok(Some(record)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
