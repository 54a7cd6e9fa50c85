//! User account coordinator.
//!
//! Passwords are write-only: the add form requires one, the edit form never
//! sends one, and the platform never returns one. Avatar uploads go through
//! a dedicated multipart endpoint rather than the profile update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use staybook_core::{Email, Role, UserId};
use tracing::instrument;

use crate::stay::{StayClient, User, UserDraft};

use super::{CoordinatorError, FieldError, FormMode};

const PASSWORD_MIN_LEN: usize = 6;

/// Editable state of the user form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub mode: FormMode,
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Only consulted in add mode; edit submissions never carry a password.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// `YYYY-MM-DD`, or empty/absent.
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub gender: bool,
    #[serde(default)]
    pub role: Role,
}

impl UserForm {
    /// Empty form for creating a user.
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            id: None,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            phone: None,
            birthday: None,
            avatar: None,
            gender: true,
            role: Role::User,
        }
    }

    /// Form pre-populated from an existing account.
    #[must_use]
    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit,
            id: Some(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            phone: user.phone.clone(),
            birthday: user.birthday.clone(),
            avatar: user.avatar.clone(),
            gender: user.gender,
            role: user.role,
        }
    }

    /// Validate the form. All rules are local; users have no references to
    /// other entities.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if Email::parse(self.email.trim()).is_err() {
            errors.push(FieldError::new("email", "Email is invalid"));
        }

        if self.mode == FormMode::Add {
            if self.password.is_empty() {
                errors.push(FieldError::new("password", "Password is required"));
            } else if self.password.chars().count() < PASSWORD_MIN_LEN {
                errors.push(FieldError::new(
                    "password",
                    "Password must be at least 6 characters",
                ));
            }
        }

        if let Some(birthday) = self.birthday.as_deref()
            && !birthday.trim().is_empty()
            && NaiveDate::parse_from_str(birthday.trim(), "%Y-%m-%d").is_err()
        {
            errors.push(FieldError::new(
                "birthday",
                "Birthday must be a valid date (YYYY-MM-DD)",
            ));
        }

        errors
    }

    fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: self.phone.clone(),
            birthday: self.birthday.clone(),
            avatar: self.avatar.clone(),
            gender: self.gender,
            role: self.role,
        }
    }

    fn profile(&self, id: UserId) -> User {
        User {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: None,
            phone: self.phone.clone(),
            birthday: self.birthday.clone(),
            avatar: self.avatar.clone(),
            gender: self.gender,
            role: self.role,
        }
    }
}

/// Coordinates user list/create/update/delete against the Stay API.
#[derive(Clone)]
pub struct UserCoordinator {
    client: StayClient,
}

impl UserCoordinator {
    /// Create a coordinator over the shared client.
    #[must_use]
    pub const fn new(client: StayClient) -> Self {
        Self { client }
    }

    /// All user accounts.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the list fetch fails.
    pub async fn list(&self) -> Result<Vec<User>, CoordinatorError> {
        Ok(self.client.list_users().await?)
    }

    /// Fetch a single account.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the account cannot be fetched.
    pub async fn get(&self, id: UserId) -> Result<User, CoordinatorError> {
        Ok(self.client.get_user(id).await?)
    }

    /// Validate and submit the form.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Invalid`] for validation failures, or a
    /// notice-level error for rejected submissions.
    #[instrument(skip(self, form), fields(mode = ?form.mode))]
    pub async fn submit(&self, form: &UserForm) -> Result<User, CoordinatorError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(CoordinatorError::Invalid(errors));
        }

        let saved = match (form.mode, form.id) {
            (FormMode::Edit, Some(id)) => self.client.update_user(id, &form.profile(id)).await?,
            (FormMode::Edit, None) => {
                return Err(CoordinatorError::Notice(
                    "No user selected to edit.".to_string(),
                ));
            }
            (FormMode::Add, _) => self.client.create_user(&form.draft()).await?,
        };
        Ok(saved)
    }

    /// Upload a new avatar for the signed-in operator's account.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the upload is rejected.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_avatar(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<User, CoordinatorError> {
        Ok(self.client.upload_avatar(file_name, bytes).await?)
    }

    /// Delete an account. Callers confirm with the operator first.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the delete is rejected.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), CoordinatorError> {
        self.client.delete_user(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_add_form() -> UserForm {
        UserForm {
            name: "Mai Tran".to_string(),
            email: "mai@example.com".to_string(),
            password: "hunter22".to_string(),
            ..UserForm::add()
        }
    }

    #[test]
    fn test_valid_add_form_passes() {
        assert!(valid_add_form().validate().is_empty());
    }

    #[test]
    fn test_password_rules_apply_in_add_mode_only() {
        let mut form = valid_add_form();
        form.password = String::new();
        assert!(form.validate().iter().any(|e| e.field == "password"));

        form.password = "short".to_string();
        let errors = form.validate();
        assert_eq!(errors[0].message, "Password must be at least 6 characters");

        form.mode = FormMode::Edit;
        form.id = Some(UserId::new(3));
        form.password = String::new();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_email_validation() {
        let mut form = valid_add_form();
        form.email = "not-an-email".to_string();
        let errors = form.validate();
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Email is invalid");

        form.email = "  ".to_string();
        assert_eq!(form.validate()[0].message, "Email is required");
    }

    #[test]
    fn test_birthday_format() {
        let mut form = valid_add_form();
        form.birthday = Some("1994-02-17".to_string());
        assert!(form.validate().is_empty());

        form.birthday = Some("17/02/1994".to_string());
        assert!(form.validate().iter().any(|e| e.field == "birthday"));

        form.birthday = Some(String::new());
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_edit_profile_never_carries_password() {
        let mut form = valid_add_form();
        form.mode = FormMode::Edit;
        form.id = Some(UserId::new(8));
        form.password = "should-be-ignored".to_string();
        let profile = form.profile(UserId::new(8));
        assert!(profile.password.is_none());
    }
}
