//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    profile::{AdminProfile, GraduateProfile, RoleProfile},
    user::{NewUser, User},
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, person_name::PersonName, phone_number::PhoneNumber, user_id::UserId,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    first_name,
    last_name,
    email,
    phone_number,
    password_hash,
    role_id,
    created_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A UNIQUE violation on insert means the contact was taken concurrently
fn map_insert_error(e: sqlx::Error) -> AuthError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => AuthError::UserAlreadyExists,
        _ => AuthError::Database(e),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser, profile: &RoleProfile) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                first_name,
                last_name,
                email,
                phone_number,
                password_hash,
                role_id
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.phone_number.as_ref().map(PhoneNumber::as_str))
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.id())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        match profile {
            RoleProfile::Admin(admin) => {
                sqlx::query("INSERT INTO admins (user_id, department) VALUES ($1, $2)")
                    .bind(row.user_id)
                    .bind(&admin.department)
                    .execute(&mut *tx)
                    .await?;
            }
            RoleProfile::Graduate(graduate) => {
                sqlx::query(
                    r#"
                    INSERT INTO graduates (
                        user_id,
                        batch_number,
                        institute,
                        major,
                        age,
                        region,
                        graduation_date,
                        national_id
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(row.user_id)
                .bind(&graduate.batch_number)
                .bind(&graduate.institute)
                .bind(&graduate.major)
                .bind(graduate.age)
                .bind(&graduate.region)
                .bind(&graduate.graduation_date)
                .bind(&graduate.national_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        row.into_user()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_contact(
        &self,
        email: Option<&Email>,
        phone_number: Option<&PhoneNumber>,
    ) -> AuthResult<bool> {
        if email.is_none() && phone_number.is_none() {
            return Ok(false);
        }

        // NULL never compares equal, so an absent identifier matches nothing
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 OR phone_number = $2
            )
            "#,
        )
        .bind(email.map(Email::as_str))
        .bind(phone_number.map(PhoneNumber::as_str))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_profile(&self, user_id: &UserId) -> AuthResult<Option<RoleProfile>> {
        let admin = sqlx::query_as::<_, AdminRow>(
            "SELECT department FROM admins WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(admin) = admin {
            return Ok(Some(RoleProfile::Admin(admin.into_profile())));
        }

        let graduate = sqlx::query_as::<_, GraduateRow>(
            r#"
            SELECT
                batch_number,
                institute,
                major,
                age,
                region,
                graduation_date,
                national_id
            FROM graduates
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(graduate.map(|g| RoleProfile::Graduate(g.into_profile())))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone_number: Option<String>,
    password_hash: String,
    role_id: i16,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::try_from(self.role_id)
            .map_err(|_| AuthError::Internal(format!("Invalid role_id: {}", self.role_id)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            email: self.email.map(Email::from_db),
            phone_number: self.phone_number.map(PhoneNumber::from_db),
            password_hash: UserPassword::from_db(self.password_hash),
            role,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    department: String,
}

impl AdminRow {
    fn into_profile(self) -> AdminProfile {
        AdminProfile {
            department: self.department,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GraduateRow {
    batch_number: String,
    institute: String,
    major: String,
    age: i32,
    region: String,
    graduation_date: String,
    national_id: String,
}

impl GraduateRow {
    fn into_profile(self) -> GraduateProfile {
        GraduateProfile {
            batch_number: self.batch_number,
            institute: self.institute,
            major: self.major,
            age: self.age,
            region: self.region,
            graduation_date: self.graduation_date,
            national_id: self.national_id,
        }
    }
}
