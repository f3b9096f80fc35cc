use diesel_async::{
    pooled_connection::{
        mobc::{Builder, Pool},
        AsyncDieselConnectionManager,
    },
    AsyncPgConnection,
};
use std::time::Duration;

mod attendance;
mod catalog;
mod employees;
pub mod models;
mod persons;
mod projection;
mod schema;
mod sql_functions;
pub mod types_cache;

pub(crate) type PooledConn =
    mobc::Connection<AsyncDieselConnectionManager<AsyncPgConnection>>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("getting connection from pool: {0}")]
    GetConnectionPool(#[from] mobc::Error<diesel_async::pooled_connection::PoolError>),
    #[error("result failure: {0}")]
    Result(#[from] diesel::result::Error),
    #[error("type cache: {0}")]
    TypeCache(#[from] types_cache::Error),
    #[error("duplicate employee code: {0}")]
    DuplicateEmployeeCode(String),
    #[error("person is already linked to another employee")]
    DuplicatePersonLink,
    #[error("phone number already belongs to another person")]
    DuplicatePhoneNumber,
    #[error("duplicate catalog name: {0}")]
    DuplicateCatalogName(String),
    #[error("attendance already recorded for {date}")]
    DuplicateAttendance { date: jiff::civil::Date },
    #[error("missing referenced {0}")]
    MissingReference(&'static str),
    #[error("projection source row missing: {0}")]
    ProjectionSourceMissing(&'static str),
    #[error("Not Found")]
    NotFound,
}

impl Error {
    fn unique_constraint(err: &diesel::result::Error) -> Option<&str> {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => info.constraint_name(),
            _ => None,
        }
    }

    fn foreign_key_constraint(err: &diesel::result::Error) -> Option<&str> {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => info.constraint_name(),
            _ => None,
        }
    }

    pub(crate) fn from_person_write(err: diesel::result::Error) -> Self {
        match Self::unique_constraint(&err) {
            Some("person_phone_number_key") => Self::DuplicatePhoneNumber,
            _ => err.into(),
        }
    }

    pub(crate) fn from_employee_write(err: diesel::result::Error, employee_code: &str) -> Self {
        if let Some(constraint) = Self::unique_constraint(&err) {
            return match constraint {
                "employee_employee_id_key" | "employee_employee_id_lower_key" => {
                    Self::DuplicateEmployeeCode(employee_code.to_owned())
                }
                "employee_person_id_key" => Self::DuplicatePersonLink,
                _ => err.into(),
            };
        }
        if let Some(constraint) = Self::foreign_key_constraint(&err) {
            return match constraint {
                "employee_person_id_fkey" => Self::MissingReference("person"),
                "employee_position_id_fkey" => Self::MissingReference("position"),
                "employee_status_id_fkey" => Self::MissingReference("employee status"),
                _ => err.into(),
            };
        }
        err.into()
    }

    pub(crate) fn from_employee_update(err: diesel::result::Error) -> Self {
        if let Some(constraint) = Self::foreign_key_constraint(&err) {
            return match constraint {
                "employee_position_id_fkey" => Self::MissingReference("position"),
                "employee_status_id_fkey" => Self::MissingReference("employee status"),
                _ => err.into(),
            };
        }
        err.into()
    }

    pub(crate) fn from_attendance_write(
        err: diesel::result::Error,
        date: jiff::civil::Date,
    ) -> Self {
        if let Some("attendance_record_employee_id_attendance_date_key") =
            Self::unique_constraint(&err)
        {
            return Self::DuplicateAttendance { date };
        }
        if let Some(constraint) = Self::foreign_key_constraint(&err) {
            return match constraint {
                "attendance_record_employee_id_fkey" => Self::MissingReference("employee"),
                "attendance_record_status_id_fkey" => {
                    Self::MissingReference("attendance status")
                }
                _ => err.into(),
            };
        }
        err.into()
    }

    pub(crate) fn from_catalog_write(err: diesel::result::Error, catalog_name: &str) -> Self {
        match Self::unique_constraint(&err) {
            Some(_) => Self::DuplicateCatalogName(catalog_name.to_owned()),
            None => err.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Store {
    pool: Pool<AsyncPgConnection>,
    types_cache: types_cache::Cache,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    db_url: String,
    max_open: u64,
    max_idle: u64,
    #[serde(with = "humantime_serde", default)]
    max_lifetime: Option<Duration>,
    #[serde(with = "humantime_serde", default)]
    max_idle_lifetime: Option<Duration>,
    #[serde(with = "humantime_serde")]
    timeout_for_get: Duration,
}

pub async fn create(config: &Config) -> Result<Store, Error> {
    let pool = create_pool(config);
    let types_cache = create_types_cache(pool.clone()).await?;
    Ok(Store { pool, types_cache })
}

fn create_pool(config: &Config) -> mobc::Pool<AsyncDieselConnectionManager<AsyncPgConnection>> {
    let builder = Builder::new()
        .max_open(config.max_open)
        .max_idle(config.max_idle)
        .max_lifetime(
            config
                .max_lifetime
                .map(|v| v.max(Duration::from_secs(3600))),
        )
        .max_idle_lifetime(
            config
                .max_idle_lifetime
                .map(|v| v.max(Duration::from_secs(900))),
        )
        .get_timeout(Some(config.timeout_for_get.max(Duration::from_secs(5))));
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.db_url);
    let pool = builder.build(manager);
    pool
}

async fn create_types_cache(
    pool: mobc::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>,
) -> Result<types_cache::Cache, Error> {
    let conn = pool.get().await?;
    let cache = types_cache::Cache::new();
    cache.populate(conn).await?;
    Ok(cache)
}

impl Store {
    async fn connection(&self) -> Result<PooledConn, Error> {
        self.pool.get().await.map_err(Into::into)
    }

    /// Reloads the catalog name-to-id cache. Call after seeding or extending
    /// the catalog tables on a live store.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_catalog_cache(&self) -> Result<(), Error> {
        let conn = self.connection().await?;
        self.types_cache.populate(conn).await?;
        Ok(())
    }
}
