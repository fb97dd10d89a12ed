//! Register Use Case
//!
//! Creates a user together with its Admin or Graduate extension.
//!
//! Checks run in a fixed order and the first failure is reported:
//! names, role, contact, password, uniqueness, then the role-specific
//! fields. Nothing is written unless every check passes.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    profile::{AdminProfile, GraduateProfile, RoleProfile},
    user::NewUser,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    phone_number::PhoneNumber,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult, ValidationError};

/// Register input
///
/// Every field is optional here; presence is part of validation.
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<i64>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub role_fields: RoleFields,
}

/// Role-specific registration fields, in textual form
#[derive(Debug, Default)]
pub struct RoleFields {
    pub department: Option<String>,
    pub batch_number: Option<String>,
    pub institute: Option<String>,
    pub major: Option<String>,
    pub age: Option<String>,
    pub region: Option<String>,
    pub graduation_date: Option<String>,
    pub national_id: Option<String>,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Checked identity part of a registration
struct Identity {
    first_name: PersonName,
    last_name: PersonName,
    role: UserRole,
    email: Option<Email>,
    phone_number: Option<PhoneNumber>,
    password: RawPassword,
}

impl Identity {
    fn parse(input: RegisterInput) -> Result<(Self, RoleFields), ValidationError> {
        let first_name = input.first_name.as_deref().and_then(PersonName::new);
        let last_name = input.last_name.as_deref().and_then(PersonName::new);
        let (Some(first_name), Some(last_name)) = (first_name, last_name) else {
            return Err(ValidationError::NameRequired);
        };

        let role = input
            .role_id
            .and_then(UserRole::from_id)
            .ok_or(ValidationError::RoleInvalid)?;

        let email = Email::from_optional(input.email.as_deref());
        let phone_number = PhoneNumber::from_optional(input.phone_number.as_deref());
        if email.is_none() && phone_number.is_none() {
            return Err(ValidationError::ContactRequired);
        }

        let password = RawPassword::new(input.password.unwrap_or_default())?;

        let identity = Self {
            first_name,
            last_name,
            role,
            email,
            phone_number,
            password,
        };
        Ok((identity, input.role_fields))
    }
}

impl RoleFields {
    /// Build the extension record for `role`, reporting the first missing field
    pub fn into_profile(self, role: UserRole) -> Result<RoleProfile, ValidationError> {
        match role {
            UserRole::Admin => {
                let department = required(self.department)
                    .ok_or(ValidationError::DepartmentRequired)?;
                Ok(RoleProfile::Admin(AdminProfile { department }))
            }
            UserRole::Graduate => {
                let missing = ValidationError::GraduateFieldRequired;
                let batch_number = required(self.batch_number).ok_or(missing("batchNumber"))?;
                let institute = required(self.institute).ok_or(missing("institute"))?;
                let major = required(self.major).ok_or(missing("major"))?;
                let age = required(self.age)
                    .and_then(|age| parse_age(&age))
                    .ok_or(missing("age"))?;
                let region = required(self.region).ok_or(missing("region"))?;
                let graduation_date =
                    required(self.graduation_date).ok_or(missing("graduationDate"))?;
                let national_id = required(self.national_id).ok_or(missing("nationalId"))?;

                Ok(RoleProfile::Graduate(GraduateProfile {
                    batch_number,
                    institute,
                    major,
                    age,
                    region,
                    graduation_date,
                    national_id,
                }))
            }
        }
    }
}

/// Trimmed value, `None` if absent or blank
fn required(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Positive integer age; a whole decimal such as `"20.0"` also counts
fn parse_age(value: &str) -> Option<i32> {
    let age = match value.parse::<i32>() {
        Ok(age) => age,
        Err(_) => value
            .parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX))
            .map(|f| f as i32)?,
    };
    (age > 0).then_some(age)
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let (identity, role_fields) = Identity::parse(input)?;

        // Advisory: the store enforces uniqueness again on insert
        if self
            .user_repo
            .exists_by_contact(identity.email.as_ref(), identity.phone_number.as_ref())
            .await?
        {
            return Err(AuthError::UserAlreadyExists);
        }

        let profile = role_fields.into_profile(identity.role)?;

        let password_hash =
            UserPassword::hash(identity.password, self.config.pepper_owned()).await?;

        let new_user = NewUser {
            first_name: identity.first_name,
            last_name: identity.last_name,
            email: identity.email,
            phone_number: identity.phone_number,
            password_hash,
            role: identity.role,
        };

        let user = self.user_repo.create(&new_user, &profile).await?;

        tracing::info!(
            user_id = %user.user_id,
            contact = %user.contact(),
            role = %user.role,
            "New user registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graduate_fields() -> RoleFields {
        RoleFields {
            batch_number: Some("1".to_string()),
            institute: Some("X".to_string()),
            major: Some("Y".to_string()),
            age: Some("20".to_string()),
            region: Some("Z".to_string()),
            graduation_date: Some("2024-01-01".to_string()),
            national_id: Some("123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_graduate_profile_complete() {
        let profile = graduate_fields().into_profile(UserRole::Graduate).unwrap();
        let RoleProfile::Graduate(graduate) = profile else {
            panic!("expected graduate profile");
        };
        assert_eq!(graduate.age, 20);
        assert_eq!(graduate.graduation_date, "2024-01-01");
    }

    #[test]
    fn test_graduate_first_missing_field_wins() {
        let fields = RoleFields {
            major: None,
            region: None,
            ..graduate_fields()
        };
        assert_eq!(
            fields.into_profile(UserRole::Graduate).unwrap_err(),
            ValidationError::GraduateFieldRequired("major")
        );

        let fields = RoleFields {
            national_id: Some("   ".to_string()),
            ..graduate_fields()
        };
        assert_eq!(
            fields.into_profile(UserRole::Graduate).unwrap_err().to_string(),
            "nationalId is required for Graduate!"
        );
    }

    #[test]
    fn test_graduate_age_must_be_positive_integer() {
        for bad in ["0", "-3", "abc", "20.5", ""] {
            let fields = RoleFields {
                age: Some(bad.to_string()),
                ..graduate_fields()
            };
            assert_eq!(
                fields.into_profile(UserRole::Graduate).unwrap_err(),
                ValidationError::GraduateFieldRequired("age"),
                "age {bad:?}"
            );
        }
    }

    #[test]
    fn test_graduate_age_whole_decimal() {
        let fields = RoleFields {
            age: Some("20.0".to_string()),
            ..graduate_fields()
        };
        let RoleProfile::Graduate(graduate) = fields.into_profile(UserRole::Graduate).unwrap()
        else {
            panic!("expected graduate profile");
        };
        assert_eq!(graduate.age, 20);

        let fields = RoleFields {
            age: Some("-0.0".to_string()),
            ..graduate_fields()
        };
        assert!(fields.into_profile(UserRole::Graduate).is_err());
    }

    #[test]
    fn test_admin_requires_department() {
        let fields = RoleFields {
            department: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fields.into_profile(UserRole::Admin).unwrap_err(),
            ValidationError::DepartmentRequired
        );

        let fields = RoleFields {
            department: Some(" IT ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fields.into_profile(UserRole::Admin).unwrap(),
            RoleProfile::Admin(AdminProfile {
                department: "IT".to_string()
            })
        );
    }

    #[test]
    fn test_identity_order() {
        let err = |input: RegisterInput| Identity::parse(input).err().unwrap();

        assert_eq!(
            err(RegisterInput {
                first_name: Some("A".to_string()),
                last_name: Some(" ".to_string()),
                ..Default::default()
            }),
            ValidationError::NameRequired
        );

        let named = || RegisterInput {
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            ..Default::default()
        };

        assert_eq!(err(named()), ValidationError::RoleInvalid);
        assert_eq!(
            err(RegisterInput {
                role_id: Some(3),
                ..named()
            }),
            ValidationError::RoleInvalid
        );
        assert_eq!(
            err(RegisterInput {
                role_id: Some(1),
                email: Some("  ".to_string()),
                ..named()
            }),
            ValidationError::ContactRequired
        );
        assert_eq!(
            err(RegisterInput {
                role_id: Some(1),
                phone_number: Some("0599".to_string()),
                ..named()
            }),
            ValidationError::PasswordRequired
        );
    }
}
