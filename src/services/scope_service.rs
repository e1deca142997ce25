// src/services/scope_service.rs
//
// Resolução do escopo de tenant: toda requisição opera sob exatamente
// uma organização. A resolução é uma função total: quando nenhuma
// organização pode ser determinada, a requisição é recusada em vez de
// prosseguir "sem escopo".

use uuid::Uuid;

use crate::{common::error::AppError, db::OrganizationRepository, models::auth::Principal};

// Decisão pura, separada do acesso a banco para ser testável.
#[derive(Debug, PartialEq)]
enum ScopeDecision {
    // O principal carrega a organização: ela vence qualquer parâmetro.
    FromPrincipal(Uuid),
    // Sem vínculo no principal: o id explícito precisa existir no banco.
    LookupExplicit(Uuid),
    Unresolved,
}

fn decide(principal_org: Option<Uuid>, explicit: Option<Uuid>) -> ScopeDecision {
    match (principal_org, explicit) {
        (Some(org), _) => ScopeDecision::FromPrincipal(org),
        (None, Some(id)) => ScopeDecision::LookupExplicit(id),
        (None, None) => ScopeDecision::Unresolved,
    }
}

#[derive(Clone)]
pub struct ScopeService {
    organization_repo: OrganizationRepository,
}

impl ScopeService {
    pub fn new(organization_repo: OrganizationRepository) -> Self {
        Self { organization_repo }
    }

    /// Resolve a organização efetiva da requisição:
    /// 1. organização do principal (admin vinculado ou vendedor);
    /// 2. `organization_id` explícito, se corresponder a uma organização real;
    /// 3. caso contrário, `TenantUnresolved`.
    pub async fn resolve(
        &self,
        principal: Option<&Principal>,
        explicit: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        match decide(principal.and_then(|p| p.organization_id()), explicit) {
            ScopeDecision::FromPrincipal(org) => Ok(org),
            ScopeDecision::LookupExplicit(id) => {
                let organization = self
                    .organization_repo
                    .find_by_id(id)
                    .await?
                    .ok_or(AppError::TenantUnresolved)?;
                Ok(organization.id)
            }
            ScopeDecision::Unresolved => Err(AppError::TenantUnresolved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organizacao_do_principal_vence_o_parametro_explicito() {
        let org = Uuid::new_v4();
        let outro = Uuid::new_v4();
        assert_eq!(
            decide(Some(org), Some(outro)),
            ScopeDecision::FromPrincipal(org)
        );
    }

    #[test]
    fn sem_principal_vinculado_usa_o_id_explicito() {
        let explicit = Uuid::new_v4();
        assert_eq!(
            decide(None, Some(explicit)),
            ScopeDecision::LookupExplicit(explicit)
        );
    }

    #[test]
    fn sem_nenhuma_fonte_o_escopo_fica_sem_resolucao() {
        assert_eq!(decide(None, None), ScopeDecision::Unresolved);
    }
}
