//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::register::{RegisterInput, RoleFields};
use crate::application::login::LoginInput;
use crate::domain::entity::session_claims::AuthenticatedSession;

/// Field accepted as either a JSON string or a JSON number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    /// Integral numbers render without a fraction (`20.0` becomes `"20"`)
    pub fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => integral(&number)
                .map(|n| n.to_string())
                .unwrap_or_else(|| number.to_string()),
        }
    }
}

/// Value of a JSON number with no fractional part, whether written `2` or `2.0`
fn integral(number: &serde_json::Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn text(value: Option<TextOrNumber>) -> Option<String> {
    value.map(TextOrNumber::into_text)
}

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Fields are optional so that a missing field is reported with its own
/// message instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(rename = "firstname")]
    pub first_name: Option<String>,
    #[serde(rename = "lastname")]
    pub last_name: Option<String>,
    /// Only the JSON numbers 1 and 2 are valid (`2.0` counts as 2)
    pub role_id: Option<serde_json::Value>,
    pub email: Option<String>,
    pub phone_number: Option<TextOrNumber>,
    pub password: Option<String>,

    // Admin
    pub department: Option<String>,

    // Graduate
    pub batch_number: Option<TextOrNumber>,
    pub institute: Option<String>,
    pub major: Option<String>,
    pub age: Option<TextOrNumber>,
    pub region: Option<String>,
    pub graduation_date: Option<String>,
    pub national_id: Option<TextOrNumber>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            first_name: req.first_name,
            last_name: req.last_name,
            role_id: req
                .role_id
                .as_ref()
                .and_then(serde_json::Value::as_number)
                .and_then(integral),
            email: req.email,
            phone_number: text(req.phone_number),
            password: req.password,
            role_fields: RoleFields {
                department: req.department,
                batch_number: text(req.batch_number),
                institute: req.institute,
                major: req.major,
                age: text(req.age),
                region: req.region,
                graduation_date: req.graduation_date,
                national_id: text(req.national_id),
            },
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            email: req.email,
            password: req.password,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile response; `user` is the verified token payload
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub user: AuthenticatedSession,
}
