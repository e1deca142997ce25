use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante representa um desfecho de negócio; a conversão para HTTP
// acontece uma única vez, no IntoResponse.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Filtro de data inválido")]
    InvalidDateFilter,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Organização não encontrada")]
    OrganizationNotFound,

    #[error("Sucursal não encontrada")]
    BranchNotFound,

    #[error("Vendedor não encontrado")]
    SellerNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Método de pagamento não encontrado")]
    PaymentMethodNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    // Resolução de tenant é uma função total: ou temos uma organização,
    // ou a requisição é recusada. Nunca operamos "sem escopo".
    #[error("Não foi possível resolver a organização da requisição")]
    TenantUnresolved,

    // Exclusão barrada por vendas que ainda referenciam o registro.
    #[error("Registro protegido contra exclusão: {0}")]
    ProtectedDelete(&'static str),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidDateFilter => {
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": { "date": ["Data inválida. Use YYYY-MM-DD ou ISO-8601."] },
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ProtectedDelete(entity) => {
                let body = Json(json!({
                    "error": format!(
                        "Não é possível excluir este registro de {} porque existem vendas associadas. \
                         Você pode desativá-lo em vez de excluir.",
                        entity
                    ),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::UniqueConstraintViolation(msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Credenciais inválidas."),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::TenantUnresolved => (
                StatusCode::FORBIDDEN,
                "Não foi possível determinar a organização desta requisição.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::OrganizationNotFound => {
                (StatusCode::NOT_FOUND, "Organização não encontrada.")
            }
            AppError::BranchNotFound => (StatusCode::NOT_FOUND, "Sucursal não encontrada."),
            AppError::SellerNotFound => (StatusCode::NOT_FOUND, "Vendedor não encontrado."),
            AppError::ClientNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado."),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Produto não encontrado."),
            AppError::PaymentMethodNotFound => {
                (StatusCode::NOT_FOUND, "Método de pagamento não encontrado.")
            }
            AppError::SaleNotFound => (StatusCode::NOT_FOUND, "Venda não encontrada."),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Converte um erro do sqlx em `ProtectedDelete` quando a exclusão bateu
/// numa foreign key RESTRICT (vendas ainda apontam para o registro).
pub fn map_protected_delete(e: sqlx::Error, entity: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::ProtectedDelete(entity);
        }
    }
    e.into()
}
