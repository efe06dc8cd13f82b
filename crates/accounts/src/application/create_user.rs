//! Create User Use Case
//!
//! Validates the candidate fields, enforces username/email uniqueness,
//! hashes the password, and inserts the new row.

use platform::password::{ClearTextPassword, PasswordDigest};

use crate::application::config::DirectoryConfig;
use crate::application::request::{self, FieldMap};
use crate::application::result::{OperationData, Outcome};
use crate::domain::entity::user::NewUser;
use crate::domain::repository::AccountStore;
use crate::domain::validation::{self, REQUIRED_CREATE_FIELDS};
use crate::domain::value_object::{email::Email, profile::ProfileData};
use crate::error::{ErrorList, OperationError};

pub(crate) async fn run<S: AccountStore>(
    store: &mut S,
    config: &DirectoryConfig,
    fields: &FieldMap,
) -> Result<Outcome, ErrorList> {
    let (username, email, password) = match (
        request::str_field(fields, "username"),
        request::str_field(fields, "email"),
        request::str_field(fields, "password"),
    ) {
        (Some(username), Some(email), Some(password)) => (username, email, password),
        _ => {
            return Err(validation::missing_fields(fields, &REQUIRED_CREATE_FIELDS)
                .into_iter()
                .map(OperationError::MissingField)
                .collect());
        }
    };

    let email = Email::new(email).map_err(|_| OperationError::InvalidEmailFormat)?;

    let violations = validation::password_violations(password);
    if !violations.is_empty() {
        return Err(violations
            .into_iter()
            .map(OperationError::WeakPassword)
            .collect());
    }

    if store
        .find_id_by_username_or_email(username, email.as_str())
        .await?
        .is_some()
    {
        return Err(OperationError::Conflict("Username or email already exists").into());
    }

    let plaintext = ClearTextPassword::new(password);
    let password_digest =
        PasswordDigest::compute(&plaintext, config.digest_scheme, config.pepper())
            .map_err(|e| OperationError::Internal(e.to_string()))?;

    let mut new_user = NewUser::new(username.to_string(), email, password_digest);
    if let Some(is_admin) = request::bool_field(fields, "is_admin") {
        new_user.is_admin = is_admin;
    }
    if let Some(profile) = fields.get("profile") {
        new_user.profile = ProfileData::new(profile.clone());
    }

    let user_id = store.insert(&new_user).await?;

    tracing::info!(
        user_id = %user_id,
        username = %new_user.username,
        "User created"
    );

    Ok(Outcome::with_data(
        "User created successfully",
        OperationData::Created { user_id },
    ))
}
