use arc_swap::ArcSwap;
use diesel_async::{pooled_connection::AsyncDieselConnectionManager, AsyncPgConnection};
use std::{collections::HashMap, sync::Arc};

#[derive(Clone, Debug)]
pub struct Cache {
    pub employee_status: Arc<TypeCache<EmployeeStatusName>>,
    pub attendance_status: Arc<TypeCache<AttendanceStatusName>>,
}

impl Cache {
    pub fn new() -> Self {
        Self {
            employee_status: Arc::new(TypeCache::new()),
            attendance_status: Arc::new(TypeCache::new()),
        }
    }

    pub(crate) async fn populate(
        &self,
        mut conn: mobc::Connection<AsyncDieselConnectionManager<AsyncPgConnection>>,
    ) -> Result<(), Error> {
        self.employee_status
            .populate(EmployeeStatusName::load_from_db(&mut conn).await?);
        self.attendance_status
            .populate(AttendanceStatusName::load_from_db(&mut conn).await?);
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("result failure: {0}")]
    ResultError(#[from] diesel::result::Error),
    #[error("type entry does not exist")]
    DoesNotExist,
}

#[derive(Debug)]
pub struct TypeCache<T: Eq + std::hash::Hash>(ArcSwap<HashMap<T, i32>>);

impl<T: Eq + std::hash::Hash> TypeCache<T> {
    fn new() -> Self {
        Self(ArcSwap::new(Arc::new(HashMap::new())))
    }

    fn populate(&self, entries: HashMap<T, i32>) {
        self.0.swap(Arc::new(entries));
    }

    pub fn id_of(&self, name: T) -> Result<i32, Error> {
        self.0.load().get(&name).copied().ok_or(Error::DoesNotExist)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EmployeeStatusName {
    Active,
    Inactive,
    Suspended,
    Terminated,
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttendanceStatusName {
    Present,
    Absent,
    Late,
    OnLeave,
    Other(String),
}

macro_rules! impl_type_name {
    {
        Enum $enum_type:ty, Table $table_name:ident, Model $model_name:ident; $($variant:ident => $name:expr),+
    } => {
        impl $enum_type {
            async fn load_from_db(
                conn: &mut mobc::Connection<AsyncDieselConnectionManager<AsyncPgConnection>>,
            ) -> Result<HashMap<$enum_type, i32>, Error> {
                use super::schema::rollcall::$table_name::dsl::*;
                use diesel::{QueryDsl, SelectableHelper};
                use diesel_async::RunQueryDsl;
                $table_name
                    .select(super::models::$model_name::as_select())
                    .get_results(conn)
                    .await
                    .map_err(Into::into)
                    .map(|v| {
                        v.into_iter()
                            .map(|v| (Self::from_name(&v.name), v.id))
                            .collect::<HashMap<_, _>>()
                    })
            }

            pub fn from_name(name: &str) -> Self {
                use $enum_type::*;
                match name {
                    $($name => $variant),+,
                    s => Self::Other(s.to_owned()),
                }
            }

            pub fn to_name(&self) -> String {
                use $enum_type::*;
                match self {
                    $($variant => $name.to_owned()),+,
                    Other(s) => s.clone(),
                }
            }
        }
    };
}

impl_type_name! {
    Enum EmployeeStatusName, Table employee_status, Model EmployeeStatus;
    Active => "Active",
    Inactive => "Inactive",
    Suspended => "Suspended",
    Terminated => "Terminated"
}

impl_type_name! {
    Enum AttendanceStatusName, Table attendance_status, Model AttendanceStatus;
    Present => "Present",
    Absent => "Absent",
    Late => "Late",
    OnLeave => "On Leave"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_round_trip_through_their_labels() {
        for status in [
            EmployeeStatusName::Active,
            EmployeeStatusName::Inactive,
            EmployeeStatusName::Suspended,
            EmployeeStatusName::Terminated,
            EmployeeStatusName::Other("Seasonal".to_owned()),
        ] {
            assert_eq!(EmployeeStatusName::from_name(&status.to_name()), status);
        }
        for status in [
            AttendanceStatusName::Present,
            AttendanceStatusName::Absent,
            AttendanceStatusName::Late,
            AttendanceStatusName::OnLeave,
            AttendanceStatusName::Other("Half Day".to_owned()),
        ] {
            assert_eq!(AttendanceStatusName::from_name(&status.to_name()), status);
        }
    }

    #[test]
    fn id_of_reports_missing_entries() {
        let cache: TypeCache<EmployeeStatusName> = TypeCache::new();
        assert!(matches!(
            cache.id_of(EmployeeStatusName::Active),
            Err(Error::DoesNotExist)
        ));
    }
}
