//! Person records. A person exists independently of employment and is linked
//! to at most one employee. Edits here deliberately do not re-sync any auth
//! projection row; `Store::rebuild_auth_users` is the repair for that.

use crate::{models, schema, Error, Store};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

impl Store {
    #[tracing::instrument(skip(self))]
    pub async fn create_person(
        &self,
        full_name: String,
        birth_date: jiff::civil::Date,
        phone_number: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<models::Person, Error> {
        let now = jiff::Timestamp::now().into();
        let new_person = models::NewPerson {
            id: uuid::Uuid::new_v4(),
            full_name,
            birth_date: birth_date.into(),
            phone_number,
            avatar_url,
            created: now,
            updated: now,
        };
        let mut conn = self.connection().await?;
        diesel::insert_into(schema::rollcall::person::table)
            .values(&new_person)
            .returning(models::Person::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Error::from_person_write)
    }

    #[tracing::instrument(skip(self, changes))]
    pub async fn update_person(
        &self,
        person_id: uuid::Uuid,
        changes: models::PersonChanges,
    ) -> Result<models::Person, Error> {
        use schema::rollcall::person;
        let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
        let mut conn = self.connection().await?;
        match diesel::update(person::table)
            .filter(person::id.eq(person_id))
            .set((changes, person::updated.eq(now)))
            .returning(models::Person::as_returning())
            .get_result(&mut conn)
            .await
        {
            Ok(updated_person) => Ok(updated_person),
            Err(diesel::result::Error::NotFound) => Err(Error::NotFound),
            Err(err) => Err(Error::from_person_write(err)),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_person(
        &self,
        person_id: uuid::Uuid,
    ) -> Result<Option<models::Person>, Error> {
        use schema::rollcall::person::dsl::*;
        let mut conn = self.connection().await?;
        match person
            .filter(id.eq(person_id))
            .select(models::Person::as_select())
            .first(&mut conn)
            .await
        {
            Ok(loaded_person) => Ok(Some(loaded_person)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
