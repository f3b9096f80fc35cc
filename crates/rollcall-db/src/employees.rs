//! Employee records and the write paths that keep the auth projection in
//! step. Every committed insert or update of an employee row recomputes and
//! upserts its projection row in the same transaction, so the projection can
//! never trail a committed employee write.

use crate::{
    models, projection, schema, sql_functions::lower, types_cache::EmployeeStatusName, Error,
    Store,
};
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};

impl Store {
    /// Creates an employee for an existing, not-yet-linked person and the
    /// matching projection row, atomically. New employees start without
    /// biometrics or a security image; enrollment fills those in later.
    #[tracing::instrument(skip(self))]
    pub async fn create_employee(
        &self,
        person_id: uuid::Uuid,
        employee_code: String,
        position_id: i32,
        status: EmployeeStatusName,
        hire_date: jiff::civil::Date,
    ) -> Result<(models::Employee, models::AuthUser), Error> {
        let now = jiff::Timestamp::now().into();
        let status_id = self.types_cache.employee_status.id_of(status)?;
        let new_employee = models::NewEmployee {
            id: uuid::Uuid::new_v4(),
            person_id,
            employee_id: employee_code,
            position_id,
            status_id,
            hire_date: hire_date.into(),
            is_biometric_enabled: false,
            security_image_identifier: None,
            created: now,
            updated: now,
        };
        self.connection()
            .await?
            .transaction(|mut conn| {
                use schema::rollcall::employee;
                async move {
                    let employee = match diesel::insert_into(employee::table)
                        .values(&new_employee)
                        .returning(models::Employee::as_returning())
                        .get_result(&mut conn)
                        .await
                    {
                        Ok(employee) => employee,
                        Err(err) => {
                            return Err(Error::from_employee_write(err, &new_employee.employee_id))
                        }
                    };
                    let auth_user = projection::sync_auth_user(&mut conn, &employee).await?;
                    Ok::<_, Error>((employee, auth_user))
                }
                .scope_boxed()
            })
            .await
    }

    /// Applies a partial update, refreshes `updated`, and re-syncs the
    /// projection, all in one transaction. An empty changeset is the "touch"
    /// that forces a projection recompute after person or catalog edits.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_employee(
        &self,
        employee_uuid: uuid::Uuid,
        changes: models::EmployeeChanges,
    ) -> Result<(models::Employee, models::AuthUser), Error> {
        let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
        self.connection()
            .await?
            .transaction(|mut conn| {
                use schema::rollcall::employee;
                async move {
                    let employee = match diesel::update(employee::table)
                        .filter(employee::id.eq(employee_uuid))
                        .set((changes, employee::updated.eq(now)))
                        .returning(models::Employee::as_returning())
                        .get_result(&mut conn)
                        .await
                    {
                        Ok(employee) => employee,
                        Err(diesel::result::Error::NotFound) => return Err(Error::NotFound),
                        Err(err) => return Err(Error::from_employee_update(err)),
                    };
                    let auth_user = projection::sync_auth_user(&mut conn, &employee).await?;
                    Ok::<_, Error>((employee, auth_user))
                }
                .scope_boxed()
            })
            .await
    }

    /// The enrollment collaborator's entry point: stores the security image
    /// identifier on the employee row. The projection picks it up through
    /// the ordinary update-plus-sync path.
    #[tracing::instrument(skip(self, image_identifier))]
    pub async fn enroll_security_image(
        &self,
        employee_uuid: uuid::Uuid,
        image_identifier: String,
    ) -> Result<(models::Employee, models::AuthUser), Error> {
        self.update_employee(
            employee_uuid,
            models::EmployeeChanges {
                security_image_identifier: Some(image_identifier),
                ..Default::default()
            },
        )
        .await
    }

    /// Removes the employee together with its attendance records and its
    /// projection row, atomically. The person row stays; it has its own
    /// lifecycle.
    #[tracing::instrument(skip(self))]
    pub async fn delete_employee(&self, employee_uuid: uuid::Uuid) -> Result<(), Error> {
        self.connection()
            .await?
            .transaction(|mut conn| {
                use schema::rollcall::{attendance_record, auth_user, employee};
                async move {
                    diesel::delete(attendance_record::table)
                        .filter(attendance_record::employee_id.eq(employee_uuid))
                        .execute(&mut conn)
                        .await?;
                    diesel::delete(auth_user::table)
                        .filter(auth_user::employee_uuid.eq(employee_uuid))
                        .execute(&mut conn)
                        .await?;
                    match diesel::delete(employee::table)
                        .filter(employee::id.eq(employee_uuid))
                        .execute(&mut conn)
                        .await
                    {
                        Ok(0) => Err(Error::NotFound),
                        Ok(_) => Ok(()),
                        Err(err) => Err(err.into()),
                    }
                }
                .scope_boxed()
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_employee(
        &self,
        employee_uuid: uuid::Uuid,
    ) -> Result<Option<models::Employee>, Error> {
        use schema::rollcall::employee::dsl::*;
        let mut conn = self.connection().await?;
        match employee
            .filter(id.eq(employee_uuid))
            .select(models::Employee::as_select())
            .first(&mut conn)
            .await
        {
            Ok(loaded_employee) => Ok(Some(loaded_employee)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_employee_by_code(
        &self,
        employee_code: &str,
    ) -> Result<Option<models::Employee>, Error> {
        use schema::rollcall::employee::dsl::*;
        let mut conn = self.connection().await?;
        match employee
            .filter(lower(employee_id).eq(lower(employee_code)))
            .select(models::Employee::as_select())
            .first(&mut conn)
            .await
        {
            Ok(loaded_employee) => Ok(Some(loaded_employee)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
