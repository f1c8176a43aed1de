//! Local validation for the profile and sign-in forms.
//!
//! Errors are keyed by field name so screens can show them next to the
//! offending input. Nothing here talks to the API.

use crate::models::{PasswordChange, ProfileUpdate};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Maximum email length accepted by the form.
const MAX_EMAIL_LENGTH: usize = 254;

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_OLD_PASSWORD: &str = "old_password";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_PASSWORD_CONFIRMATION: &str = "password_confirmation";

/// Field-scoped validation failures, in form order.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Only the first error per field is kept.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Raw values typed into the profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormData {
    pub name: String,
    pub email: String,
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_RE.is_match(email)
}

fn check_email(email: &str, errors: &mut ValidationErrors) {
    if email.is_empty() {
        errors.add(FIELD_EMAIL, "Email is required");
    } else if !is_valid_email(email) {
        errors.add(FIELD_EMAIL, "Enter a valid email");
    }
}

/// Validate the profile form and build the request body.
///
/// # Rules
/// - Name and email are required, email must be well formed
/// - When the current password is filled in, the new password and its
///   confirmation are required and must match
/// - Without a current password the password fields are left out of the body
pub fn validate_profile(form: &ProfileFormData) -> Result<ProfileUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = form.name.trim();
    let email = form.email.trim();

    if name.is_empty() {
        errors.add(FIELD_NAME, "Name is required");
    }
    check_email(email, &mut errors);

    let changing_password = !form.old_password.is_empty();
    if changing_password {
        if form.password.is_empty() {
            errors.add(FIELD_PASSWORD, "Required field");
        }
        if form.password_confirmation.is_empty() {
            errors.add(FIELD_PASSWORD_CONFIRMATION, "Required field");
        } else if form.password_confirmation != form.password {
            errors.add(FIELD_PASSWORD_CONFIRMATION, "Passwords do not match");
        }
    }

    errors.into_result()?;

    let password_change = changing_password.then(|| PasswordChange {
        old_password: form.old_password.clone(),
        password: form.password.clone(),
        password_confirmation: form.password_confirmation.clone(),
    });

    Ok(ProfileUpdate {
        name: name.to_string(),
        email: email.to_string(),
        password_change,
    })
}

/// Validate the sign-in form.
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(email.trim(), &mut errors);
    if password.is_empty() {
        errors.add(FIELD_PASSWORD, "Password is required");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> ProfileFormData {
        ProfileFormData {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_without_password_change() {
        let update = validate_profile(&base_form()).unwrap();
        assert_eq!(update.name, "Ana");
        assert!(update.password_change.is_none());
    }

    #[test]
    fn test_password_fields_dropped_without_old_password() {
        let mut form = base_form();
        form.password = "typed-anyway".to_string();
        let update = validate_profile(&form).unwrap();
        assert!(update.password_change.is_none());
    }

    #[test]
    fn test_name_and_email_required() {
        let errors = validate_profile(&ProfileFormData::default()).unwrap_err();
        assert_eq!(errors.get(FIELD_NAME), Some("Name is required"));
        assert_eq!(errors.get(FIELD_EMAIL), Some("Email is required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let mut form = base_form();
        form.name = "   ".to_string();
        let errors = validate_profile(&form).unwrap_err();
        assert!(errors.get(FIELD_NAME).is_some());
    }

    #[test]
    fn test_malformed_email() {
        let mut form = base_form();
        form.email = "ana@".to_string();
        let errors = validate_profile(&form).unwrap_err();
        assert_eq!(errors.get(FIELD_EMAIL), Some("Enter a valid email"));
    }

    #[test]
    fn test_old_password_requires_new_password() {
        let mut form = base_form();
        form.old_password = "old-secret".to_string();
        let errors = validate_profile(&form).unwrap_err();
        assert_eq!(errors.get(FIELD_PASSWORD), Some("Required field"));
        assert_eq!(errors.get(FIELD_PASSWORD_CONFIRMATION), Some("Required field"));
    }

    #[test]
    fn test_confirmation_must_match() {
        let mut form = base_form();
        form.old_password = "old-secret".to_string();
        form.password = "new-secret".to_string();
        form.password_confirmation = "new-secrt".to_string();
        let errors = validate_profile(&form).unwrap_err();
        assert!(errors.get(FIELD_PASSWORD).is_none());
        assert_eq!(
            errors.get(FIELD_PASSWORD_CONFIRMATION),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_matching_passwords_pass() {
        let mut form = base_form();
        form.old_password = "old-secret".to_string();
        form.password = "new-secret".to_string();
        form.password_confirmation = "new-secret".to_string();
        let update = validate_profile(&form).unwrap();
        let change = update.password_change.unwrap();
        assert_eq!(change.old_password, "old-secret");
        assert_eq!(change.password, "new-secret");
    }

    #[test]
    fn test_email_trimmed() {
        let mut form = base_form();
        form.email = "  ana@example.com ".to_string();
        assert_eq!(validate_profile(&form).unwrap().email, "ana@example.com");
    }

    #[test]
    fn test_sign_in_validation() {
        assert!(validate_sign_in("ana@example.com", "secret").is_ok());

        let errors = validate_sign_in("", "").unwrap_err();
        assert_eq!(errors.get(FIELD_EMAIL), Some("Email is required"));
        assert_eq!(errors.get(FIELD_PASSWORD), Some("Password is required"));
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(FIELD_NAME, "first");
        errors.add(FIELD_NAME, "second");
        assert_eq!(errors.get(FIELD_NAME), Some("first"));
        assert_eq!(errors.len(), 1);
    }
}
