//! Login-time identity verification for employees. Everything here reads the
//! denormalized `auth_user` projection only - never the source tables - so a
//! verification is a single primary-key lookup plus pure decision logic.

use rollcall_db::{models, types_cache::EmployeeStatusName, Store};

#[derive(Clone, Debug)]
pub struct Verifier {
    db: Store,
}

pub fn create_verifier(database: Store) -> Verifier {
    Verifier { db: database }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("employee database error: {0}")]
    EmployeeDb(#[from] rollcall_db::Error),
}

/// What the employee presented at the terminal: the code on their badge and,
/// optionally, a claimed birth date for the secondary identity check.
#[derive(Clone, Debug)]
pub struct Claims {
    pub employee_id: String,
    pub birth_date: Option<jiff::civil::Date>,
}

/// The projection fields a login service needs once verification passed.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifiedIdentity {
    pub employee_id: String,
    pub employee_uuid: uuid::Uuid,
    pub person_uuid: uuid::Uuid,
    pub full_name: String,
    pub is_biometric_enabled: bool,
    pub security_image_identifier: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Verified(VerifiedIdentity),
    /// Identity checks passed but no security image is on file yet; the
    /// caller must route the employee through enrollment before login.
    EnrollmentRequired(VerifiedIdentity),
    IdentityMismatch,
    Inactive { status_name: String },
    UnknownEmployee,
}

impl Verifier {
    #[tracing::instrument(skip(self, claims), fields(employee_id = %claims.employee_id))]
    pub async fn verify(&self, claims: &Claims) -> Result<Outcome, Error> {
        match self.db.load_auth_user(&claims.employee_id).await? {
            Some(auth_user) => Ok(decide(auth_user, claims)),
            None => Ok(Outcome::UnknownEmployee),
        }
    }

    /// Stores the enrolled security image against the employee row; the auth
    /// projection is re-synced by that write, not touched here.
    #[tracing::instrument(skip(self, image_identifier))]
    pub async fn enroll(
        &self,
        employee_uuid: uuid::Uuid,
        image_identifier: String,
    ) -> Result<(), Error> {
        self.db
            .enroll_security_image(employee_uuid, image_identifier)
            .await?;
        Ok(())
    }
}

fn decide(auth_user: models::AuthUser, claims: &Claims) -> Outcome {
    if auth_user.status_name != EmployeeStatusName::Active.to_name() {
        return Outcome::Inactive {
            status_name: auth_user.status_name,
        };
    }
    if let Some(claimed) = claims.birth_date {
        let claimed: jiff_diesel::Date = claimed.into();
        if claimed != auth_user.birth_date {
            return Outcome::IdentityMismatch;
        }
    }
    let identity = VerifiedIdentity {
        employee_id: auth_user.employee_id,
        employee_uuid: auth_user.employee_uuid,
        person_uuid: auth_user.person_uuid,
        full_name: auth_user.full_name,
        is_biometric_enabled: auth_user.is_biometric_enabled,
        security_image_identifier: auth_user.security_image_identifier,
    };
    if identity.security_image_identifier.is_none() {
        Outcome::EnrollmentRequired(identity)
    } else {
        Outcome::Verified(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(status_name: &str, security_image: Option<&str>) -> models::AuthUser {
        models::AuthUser {
            employee_id: "EMP001".to_owned(),
            employee_uuid: uuid::Uuid::new_v4(),
            person_uuid: uuid::Uuid::new_v4(),
            full_name: "Jane Doe".to_owned(),
            birth_date: jiff::civil::date(1990, 1, 1).into(),
            security_image_identifier: security_image.map(str::to_owned),
            status_name: status_name.to_owned(),
            position_name: "Trimmer".to_owned(),
            is_biometric_enabled: true,
            last_synced_at: jiff::Timestamp::now().into(),
        }
    }

    fn claims(birth_date: Option<jiff::civil::Date>) -> Claims {
        Claims {
            employee_id: "EMP001".to_owned(),
            birth_date,
        }
    }

    #[test]
    fn active_enrolled_employee_is_verified() {
        let outcome = decide(auth_user("Active", Some("img_42")), &claims(None));
        match outcome {
            Outcome::Verified(identity) => {
                assert_eq!(identity.employee_id, "EMP001");
                assert!(identity.is_biometric_enabled);
                assert_eq!(identity.security_image_identifier.as_deref(), Some("img_42"));
            }
            other => panic!("expected Verified, got {other:?}"),
        }
    }

    #[test]
    fn missing_security_image_forces_enrollment() {
        let outcome = decide(auth_user("Active", None), &claims(None));
        assert!(
            matches!(outcome, Outcome::EnrollmentRequired(_)),
            "got {outcome:?}"
        );
    }

    #[test]
    fn only_the_active_status_permits_login() {
        for status in ["Inactive", "Suspended", "Terminated"] {
            let outcome = decide(auth_user(status, Some("img_42")), &claims(None));
            assert_eq!(
                outcome,
                Outcome::Inactive {
                    status_name: status.to_owned()
                }
            );
        }
    }

    #[test]
    fn claimed_birth_date_must_match_the_projection() {
        let matching = claims(Some(jiff::civil::date(1990, 1, 1)));
        let outcome = decide(auth_user("Active", Some("img_42")), &matching);
        assert!(matches!(outcome, Outcome::Verified(_)), "got {outcome:?}");

        let mismatched = claims(Some(jiff::civil::date(1990, 1, 2)));
        let outcome = decide(auth_user("Active", Some("img_42")), &mismatched);
        assert_eq!(outcome, Outcome::IdentityMismatch);
    }

    #[test]
    fn inactive_wins_over_missing_enrollment() {
        let outcome = decide(auth_user("Suspended", None), &claims(None));
        assert!(
            matches!(outcome, Outcome::Inactive { .. }),
            "got {outcome:?}"
        );
    }
}
