// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Chair,     // Ketua RT (admin)
    Treasurer, // Bendahara
    Resident,  // Warga
    Security,  // Keamanan
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        self == UserRole::Chair
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "account_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "kebab-case")]
pub enum AccountStatus {
    Active,
    Inactive,
    PendingVerification,
}

// "" ou só espaços no JSON vira None (telefone é UNIQUE, vazio não pode ocupar a vaga)
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

// Membro da família (array embutido, guardado como JSONB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMember {
    #[validate(length(min = 1, message = "Household member national ID is required."))]
    #[schema(example = "3201010101010002")]
    pub national_id: String,

    #[validate(length(min = 1, message = "Household member name is required."))]
    #[schema(example = "Siti Aminah")]
    pub full_name: String,

    #[validate(length(min = 1, message = "Relationship status is required."))]
    #[schema(example = "Wife")]
    pub relationship_status: String,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "3201010101010001")]
    pub national_id: String,

    #[schema(example = "3201010101010000")]
    pub family_card_id: String,

    #[schema(example = "Budi Santoso")]
    pub full_name: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    #[schema(example = "Jl. Melati No. 10")]
    pub address: Option<String>,

    #[schema(example = "003")]
    pub rt_code: String,

    #[schema(example = "007")]
    pub rw_code: String,

    #[schema(example = "081234567890")]
    pub phone: Option<String>,

    #[schema(example = "budi@example.com")]
    pub email: String,

    pub role: UserRole,
    pub account_status: AccountStatus,

    #[schema(value_type = Vec<HouseholdMember>)]
    pub household_members: Json<Vec<HouseholdMember>>,

    pub created_at: DateTime<Utc>,
}

/// Identidade do chamador anexada à requisição pelo middleware de autenticação.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub full_name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            full_name: user.full_name.clone(),
        }
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "National ID is required."))]
    #[schema(example = "3201010101010001")]
    pub national_id: String,

    #[validate(length(min = 1, message = "Family card number is required."))]
    #[schema(example = "3201010101010000")]
    pub family_card_id: String,

    #[validate(length(min = 1, message = "Full name is required."))]
    #[schema(example = "Budi Santoso")]
    pub full_name: String,

    #[validate(email(message = "The email address is invalid."))]
    #[schema(example = "budi@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    #[schema(example = "rahasia123")]
    pub password: String,

    #[validate(length(min = 1, message = "RT code is required."))]
    #[schema(example = "003")]
    pub rt_code: String,

    #[validate(length(min = 1, message = "RW code is required."))]
    #[schema(example = "007")]
    pub rw_code: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[schema(example = "081234567890")]
    pub phone: Option<String>,

    pub address: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "Email is required."))]
    #[schema(example = "budi@example.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required."))]
    #[schema(example = "rahasia123")]
    pub password: String,
}

// Resposta de registro/login com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

// O próprio morador só mexe nesses campos
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, message = "Full name cannot be empty."))]
    pub full_name: Option<String>,

    pub address: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,

    #[validate(nested)]
    pub household_members: Option<Vec<HouseholdMember>>,
}

// O admin pode mexer em qualquer campo, inclusive role e status da conta
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserPayload {
    #[validate(length(min = 1, message = "National ID cannot be empty."))]
    pub national_id: Option<String>,

    #[validate(length(min = 1, message = "Family card number cannot be empty."))]
    pub family_card_id: Option<String>,

    #[validate(length(min = 1, message = "Full name cannot be empty."))]
    pub full_name: Option<String>,

    pub address: Option<String>,

    #[validate(length(min = 1, message = "RT code cannot be empty."))]
    pub rt_code: Option<String>,

    #[validate(length(min = 1, message = "RW code cannot be empty."))]
    pub rw_code: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,

    #[validate(email(message = "The email address is invalid."))]
    pub email: Option<String>,

    pub role: Option<UserRole>,

    pub account_status: Option<AccountStatus>,

    #[validate(nested)]
    pub household_members: Option<Vec<HouseholdMember>>,
}

impl From<UpdateProfilePayload> for AdminUpdateUserPayload {
    fn from(p: UpdateProfilePayload) -> Self {
        Self {
            full_name: p.full_name,
            address: p.address,
            phone: p.phone,
            household_members: p.household_members,
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // Subject (ID do usuário)
    pub role: UserRole, // Informativo; o middleware relê o usuário no banco
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_value(UserRole::Chair).unwrap(), "chair");
        let role: UserRole = serde_json::from_str("\"security\"").unwrap();
        assert_eq!(role, UserRole::Security);
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }

    #[test]
    fn only_the_chair_is_admin() {
        assert!(UserRole::Chair.is_admin());
        assert!(!UserRole::Treasurer.is_admin());
        assert!(!UserRole::Resident.is_admin());
        assert!(!UserRole::Security.is_admin());
    }

    #[test]
    fn account_status_is_kebab_case() {
        assert_eq!(
            serde_json::to_value(AccountStatus::PendingVerification).unwrap(),
            "pending-verification"
        );
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            national_id: "1".into(),
            family_card_id: "2".into(),
            full_name: "Budi".into(),
            password_hash: "$2b$secret".into(),
            address: None,
            rt_code: "003".into(),
            rw_code: "007".into(),
            phone: None,
            email: "budi@example.com".into(),
            role: UserRole::Resident,
            account_status: AccountStatus::Active,
            household_members: Json(vec![]),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["fullName"], "Budi");
        assert_eq!(value["householdMembers"], serde_json::json!([]));
    }

    #[test]
    fn register_payload_is_validated() {
        let payload = RegisterUserPayload {
            national_id: "".into(),
            family_card_id: "kk".into(),
            full_name: "Budi".into(),
            email: "not-an-email".into(),
            password: "123".into(),
            rt_code: "003".into(),
            rw_code: "007".into(),
            phone: None,
            address: None,
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("national_id"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn blank_phone_numbers_are_treated_as_absent() {
        let body = serde_json::json!({
            "nationalId": "1",
            "familyCardId": "2",
            "fullName": "Budi",
            "email": "budi@example.com",
            "password": "rahasia123",
            "rtCode": "003",
            "rwCode": "007",
            "phone": "   "
        });
        let register: RegisterUserPayload = serde_json::from_value(body).unwrap();
        assert_eq!(register.phone, None);

        let profile: UpdateProfilePayload = serde_json::from_str(r#"{"phone": ""}"#).unwrap();
        assert_eq!(profile.phone, None);

        let admin: AdminUpdateUserPayload = serde_json::from_str(r#"{"phone": " 0812 "}"#).unwrap();
        assert_eq!(admin.phone.as_deref(), Some("0812"));

        let missing: UpdateProfilePayload = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.phone, None);
    }
}
