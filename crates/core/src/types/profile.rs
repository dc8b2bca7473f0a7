//! User profile record and the field-format rules shared by client and API.

use serde::{Deserialize, Serialize};

use super::{Avatar, Email, PersonName, PhoneNumber, UserId};

/// First failing field-format check of a profile.
///
/// The display strings are shown verbatim to operators.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or contains something other than letters and whitespace.
    #[error("Name is required and must only contain letters.")]
    InvalidName,
    /// Email is empty or not shaped like `local@domain.tld`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    /// Number is empty or not exactly ten digits.
    #[error("Please enter a valid 10-digit number.")]
    InvalidNumber,
}

/// Profile fields as submitted by a client: `{name, email, number, avatar}`.
///
/// Text fields are unvalidated; call [`UserFields::validate`] before storing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub number: String,
    pub avatar: Avatar,
}

impl UserFields {
    /// Check the fields in order (name, email, number) and return the
    /// validated data, or the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first field that fails.
    pub fn validate(&self) -> Result<ProfileData, ValidationError> {
        let name = PersonName::parse(&self.name).map_err(|_| ValidationError::InvalidName)?;
        let email = Email::parse(&self.email).map_err(|_| ValidationError::InvalidEmail)?;
        let number =
            PhoneNumber::parse(&self.number).map_err(|_| ValidationError::InvalidNumber)?;

        Ok(ProfileData {
            name,
            email,
            number,
            avatar: self.avatar,
        })
    }
}

/// Validated profile fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub name: PersonName,
    pub email: Email,
    pub number: PhoneNumber,
    pub avatar: Avatar,
}

/// A stored user profile.
///
/// Serializes as `{id, name, email, number, avatar}` with every value a
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: PersonName,
    pub email: Email,
    pub number: PhoneNumber,
    pub avatar: Avatar,
}

impl UserProfile {
    /// Attach an identifier to validated profile data.
    #[must_use]
    pub fn new(id: UserId, data: ProfileData) -> Self {
        Self {
            id,
            name: data.name,
            email: data.email,
            number: data.number,
            avatar: data.avatar,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, number: &str) -> UserFields {
        UserFields {
            name: name.to_string(),
            email: email.to_string(),
            number: number.to_string(),
            avatar: Avatar::One,
        }
    }

    #[test]
    fn test_validate_accepts_good_fields() {
        let data = fields("Ann Lee", "ann@x.com", "5551234567")
            .validate()
            .unwrap();
        assert_eq!(data.name.as_str(), "Ann Lee");
        assert_eq!(data.email.as_str(), "ann@x.com");
        assert_eq!(data.number.as_str(), "5551234567");
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert_eq!(
            fields("", "ann@x.com", "5551234567").validate(),
            Err(ValidationError::InvalidName)
        );
    }

    #[test]
    fn test_validate_rejects_bad_emails() {
        for email in ["", "foo", "foo@", "foo@bar"] {
            assert_eq!(
                fields("Ann", email, "5551234567").validate(),
                Err(ValidationError::InvalidEmail),
                "{email:?}"
            );
        }
        assert!(fields("Ann", "foo@bar.com", "5551234567").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        for number in ["", "123", "12345678901", "55512345x7"] {
            assert_eq!(
                fields("Ann", "ann@x.com", number).validate(),
                Err(ValidationError::InvalidNumber),
                "{number:?}"
            );
        }
        assert!(fields("Ann", "ann@x.com", "1234567890").validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_failure_only() {
        assert_eq!(
            fields("", "foo", "123").validate(),
            Err(ValidationError::InvalidName)
        );
        assert_eq!(
            fields("Ann", "foo", "123").validate(),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::InvalidName.to_string(),
            "Name is required and must only contain letters."
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
        assert_eq!(
            ValidationError::InvalidNumber.to_string(),
            "Please enter a valid 10-digit number."
        );
    }

    #[test]
    fn test_profile_json_shape() {
        let id: UserId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        let data = fields("Ann Lee", "ann@x.com", "5551234567")
            .validate()
            .unwrap();
        let profile = UserProfile::new(id, data);

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "name": "Ann Lee",
                "email": "ann@x.com",
                "number": "5551234567",
                "avatar": "/images/avatar-1.jpg",
            })
        );

        let back: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_validate_accepts_long_email() {
        let email = format!("{}@example.com", "a".repeat(250));
        let data = fields("Ann", &email, "5551234567").validate().unwrap();
        assert_eq!(data.email.as_str(), email);
    }
}
