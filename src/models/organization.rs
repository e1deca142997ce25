// src/models/organization.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Raiz da tenancy: todo o resto do modelo pertence a exatamente uma organização.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub primary_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gera o slug a partir do nome quando o cadastro não informa um.
/// Minúsculas, ASCII alfanumérico, espaços viram hífen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true; // evita hífen no início

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slug_basico() {
        assert_eq!(slugify("Tienda Central"), "tienda-central");
    }

    #[test]
    fn slug_normaliza_separadores_e_maiusculas() {
        assert_eq!(slugify("  Mi   Tienda_2024  "), "mi-tienda-2024");
        assert_eq!(slugify("VNTS!!!"), "vnts");
    }
}
