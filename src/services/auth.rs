// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BranchRepository, OrganizationRepository, SellerRepository, UserRepository},
    models::{
        auth::{Claims, Principal, TokenKind, User, UserRole},
        catalog::Seller,
        organization::slugify,
    },
};

// Par de credenciais emitido nos logins
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    seller_repo: SellerRepository,
    organization_repo: OrganizationRepository,
    branch_repo: BranchRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        seller_repo: SellerRepository,
        organization_repo: OrganizationRepository,
        branch_repo: BranchRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            seller_repo,
            organization_repo,
            branch_repo,
            jwt_secret,
            pool,
        }
    }

    /// Registro: cria a organização, a sucursal PRINCIPAL e o usuário
    /// admin numa única transação. Ou os três existem, ou nenhum.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        organization_name: &str,
        primary_color: Option<&str>,
    ) -> Result<(User, TokenPair), AppError> {
        // O hashing é pesado: sai do runtime assíncrono
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let slug = slugify(organization_name);

        let mut tx = self.pool.begin().await?;

        let organization = self
            .organization_repo
            .create(
                &mut *tx,
                organization_name,
                &slug,
                primary_color.unwrap_or("#3b82f6"),
            )
            .await?;

        // A sucursal padrão nasce junto com a organização, na mesma
        // transação. Nada de hook reativo depois do commit.
        self.branch_repo
            .create(
                &mut *tx,
                organization.id,
                "Sucursal Principal",
                crate::models::catalog::PRINCIPAL_BRANCH_CODE,
                "",
                "",
                true,
            )
            .await?;

        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                email,
                &hashed_password,
                full_name,
                UserRole::Admin,
                Some(organization.id),
            )
            .await?;

        tx.commit().await?;

        tracing::info!("✅ Organização '{}' registrada (slug {})", organization.name, slug);

        let tokens = self.issue_pair(user.id, UserRole::Admin)?;
        Ok((user, tokens))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, TokenPair), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid || !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let tokens = self.issue_pair(user.id, UserRole::Admin)?;
        Ok((user, tokens))
    }

    /// Login de vendedor: código numérico ativo, com slug opcional da
    /// organização. Emite um principal de vendedor, sem usuário real.
    pub async fn seller_login(
        &self,
        numeric_code: &str,
        organization_slug: Option<&str>,
    ) -> Result<(Seller, TokenPair), AppError> {
        let seller = self
            .seller_repo
            .find_active_by_code(numeric_code, organization_slug)
            .await?
            .ok_or(AppError::SellerNotFound)?;

        let tokens = self.issue_pair(seller.id, UserRole::Seller)?;
        Ok((seller, tokens))
    }

    /// Troca um refresh token válido por um novo token de acesso.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self.decode_claims(refresh_token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AppError::InvalidToken);
        }

        // O principal precisa continuar existindo (e ativo) para renovar
        self.load_principal(&claims).await?;

        self.create_token(claims.sub, claims.role, TokenKind::Access)
    }

    /// Valida um token de acesso e reidrata o principal do banco.
    pub async fn validate_token(&self, token: &str) -> Result<Principal, AppError> {
        let claims = self.decode_claims(token)?;
        if claims.kind != TokenKind::Access {
            return Err(AppError::InvalidToken);
        }

        self.load_principal(&claims).await
    }

    async fn load_principal(&self, claims: &Claims) -> Result<Principal, AppError> {
        match claims.role {
            UserRole::Admin => {
                let user = self
                    .user_repo
                    .find_by_id(claims.sub)
                    .await?
                    .filter(|u| u.is_active)
                    .ok_or(AppError::UserNotFound)?;
                Ok(Principal::User(user))
            }
            UserRole::Seller => {
                let seller = self
                    .seller_repo
                    .find_by_id_global(claims.sub)
                    .await?
                    .filter(|s| s.active)
                    .ok_or(AppError::SellerNotFound)?;
                Ok(Principal::Seller(seller))
            }
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    fn issue_pair(&self, sub: Uuid, role: UserRole) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access: self.create_token(sub, role, TokenKind::Access)?,
            refresh: self.create_token(sub, role, TokenKind::Refresh)?,
        })
    }

    fn create_token(&self, sub: Uuid, role: UserRole, kind: TokenKind) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => chrono::Duration::days(1),
            TokenKind::Refresh => chrono::Duration::days(7),
        };
        let expires_at = now + ttl;

        let claims = Claims {
            sub,
            role,
            kind,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
