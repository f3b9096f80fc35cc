//! The auth projection sync. `auth_user` is a login-optimized snapshot of
//! employee, person, and catalog state; it is recomputed and upserted here,
//! inside the same transaction as the employee write that triggered it, and
//! nowhere else. Reads for authentication go through `load_auth_user` only
//! and never join the source tables.

use crate::{models, schema, sql_functions::lower, Error, PooledConn, Store};
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};

/// Recomputes the full projection row for `employee` and upserts it by
/// employee code, overwriting every field. Must run inside the transaction
/// of the triggering employee write so a sync failure rolls that write back.
///
/// The person and catalog rows are resolved fresh from the database rather
/// than any cache: the projection must reflect joined state at commit time.
/// A missing referent means pre-existing corruption; the returned error
/// aborts the surrounding transaction instead of persisting a partial row.
pub(crate) async fn sync_auth_user(
    conn: &mut PooledConn,
    employee: &models::Employee,
) -> Result<models::AuthUser, Error> {
    use schema::rollcall::{auth_user, employee_status, person, position};

    let person: models::Person = match person::table
        .filter(person::id.eq(employee.person_id))
        .select(models::Person::as_select())
        .first(&mut *conn)
        .await
    {
        Ok(person) => person,
        Err(diesel::result::Error::NotFound) => {
            return Err(Error::ProjectionSourceMissing("person"))
        }
        Err(err) => return Err(err.into()),
    };
    let position_name: String = match position::table
        .filter(position::id.eq(employee.position_id))
        .select(position::name)
        .first(&mut *conn)
        .await
    {
        Ok(name) => name,
        Err(diesel::result::Error::NotFound) => {
            return Err(Error::ProjectionSourceMissing("position"))
        }
        Err(err) => return Err(err.into()),
    };
    let status_name: String = match employee_status::table
        .filter(employee_status::id.eq(employee.status_id))
        .select(employee_status::name)
        .first(&mut *conn)
        .await
    {
        Ok(name) => name,
        Err(diesel::result::Error::NotFound) => {
            return Err(Error::ProjectionSourceMissing("employee status"))
        }
        Err(err) => return Err(err.into()),
    };

    let row = models::NewAuthUser {
        employee_id: employee.employee_id.clone(),
        employee_uuid: employee.id,
        person_uuid: person.id,
        full_name: person.full_name,
        birth_date: person.birth_date,
        security_image_identifier: employee.security_image_identifier.clone(),
        status_name,
        position_name,
        is_biometric_enabled: employee.is_biometric_enabled,
        last_synced_at: jiff::Timestamp::now().into(),
    };
    diesel::insert_into(auth_user::table)
        .values(&row)
        .on_conflict(auth_user::employee_id)
        .do_update()
        .set(&row)
        .returning(models::AuthUser::as_returning())
        .get_result(&mut *conn)
        .await
        .map_err(Into::into)
}

impl Store {
    /// The login read path. Case-insensitive on the employee code and reads
    /// only the projection table.
    #[tracing::instrument(skip(self))]
    pub async fn load_auth_user(
        &self,
        employee_code: &str,
    ) -> Result<Option<models::AuthUser>, Error> {
        use schema::rollcall::auth_user::dsl::*;
        let mut conn = self.connection().await?;
        match auth_user
            .filter(lower(employee_id).eq(lower(employee_code)))
            .select(models::AuthUser::as_select())
            .first(&mut conn)
            .await
        {
            Ok(loaded_auth_user) => Ok(Some(loaded_auth_user)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Recomputes every projection row from current source state. This is the
    /// operator-invoked repair for staleness left behind by person edits or
    /// catalog renames, which do not trigger a re-sync on their own. Each
    /// employee is re-synced in its own transaction.
    #[tracing::instrument(skip(self))]
    pub async fn rebuild_auth_users(&self) -> Result<usize, Error> {
        use schema::rollcall::employee;
        let mut conn = self.connection().await?;
        let employees: Vec<models::Employee> = employee::table
            .select(models::Employee::as_select())
            .load(&mut conn)
            .await?;
        let mut rebuilt = 0;
        for employee in employees {
            conn.transaction(|conn| {
                async move {
                    sync_auth_user(conn, &employee).await?;
                    Ok::<_, Error>(())
                }
                .scope_boxed()
            })
            .await?;
            rebuilt += 1;
        }
        tracing::info!(rebuilt, "rebuilt auth projection rows");
        Ok(rebuilt)
    }
}
