// src/common/validate.rs
//
// Validações customizadas compartilhadas pelos payloads.

use rust_decimal::Decimal;
use validator::ValidationError;

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive_price(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O preço deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

/// Percentual de comissão: precisa estar em [0, 100].
pub fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("O percentual deve estar entre 0 e 100.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentual_aceita_extremos_e_rejeita_fora_da_faixa() {
        assert!(validate_percentage(&Decimal::ZERO).is_ok());
        assert!(validate_percentage(&Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_percentage(&Decimal::from(101)).is_err());
        assert!(validate_percentage(&Decimal::from(-1)).is_err());
    }

    #[test]
    fn preco_precisa_ser_positivo() {
        assert!(validate_positive_price(&Decimal::from(10)).is_ok());
        assert!(validate_positive_price(&Decimal::ZERO).is_err());
    }
}
