// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::catalog::Seller;

// Papel do principal autenticado. Também é o tipo `user_role` do banco.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Seller,
}

// Representa um usuário administrador vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub full_name: String,
    pub role: UserRole,
    // Admins nascem vinculados à organização criada no registro.
    pub organization_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// O principal autenticado de uma requisição: um usuário administrador
/// ou um vendedor logado pelo código numérico.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Principal {
    User(User),
    Seller(Seller),
}

impl Principal {
    /// Organização à qual o principal está vinculado, se houver.
    pub fn organization_id(&self) -> Option<Uuid> {
        match self {
            Principal::User(user) => user.organization_id,
            Principal::Seller(seller) => Some(seller.organization_id),
        }
    }
}

// Dados para registro: cria a organização, a sucursal PRINCIPAL e o
// usuário admin numa única operação.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "dona@tienda.com")]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "María García")]
    pub full_name: String,

    #[validate(length(min = 2, message = "O nome da organização deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Tienda Central")]
    pub organization_name: String,

    #[validate(length(equal = 7, message = "A cor deve estar no formato #rrggbb."))]
    #[schema(example = "#3b82f6")]
    pub primary_color: Option<String>,
}

// Dados para login de administrador
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Login de vendedor: código numérico + slug opcional da organização
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerLoginPayload {
    #[validate(length(min = 1, message = "O código numérico é obrigatório."))]
    #[schema(example = "1001")]
    pub numeric_code: String,

    #[schema(example = "tienda-central")]
    pub organization_slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    #[validate(length(min = 1, message = "O refresh token é obrigatório."))]
    pub refresh: String,
}

// Resposta de autenticação de administrador
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
}

// Resposta de autenticação de vendedor
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerAuthResponse {
    pub seller: Seller,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access: String,
}

// Distingue o token de acesso do token de renovação.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // ID do usuário ou do vendedor
    pub role: UserRole, // Decide em qual tabela buscar o principal
    pub kind: TokenKind,
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
