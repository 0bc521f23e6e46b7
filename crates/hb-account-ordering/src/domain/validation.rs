//! # Field Validation
//!
//! Checks applied on every validated write (account creation and each
//! reorder update). The backfill migration writes raw records and skips them.

use super::entities::{Account, Family};
use super::errors::ValidationFailure;
use crate::config::OrderingConfig;

/// Validate an account record as it is about to be written.
pub fn validate_account(account: &Account, config: &OrderingConfig) -> Result<(), ValidationFailure> {
    validate_name(&account.name, config.max_name_len)?;
    validate_currency(&account.currency)?;
    if let Some(position) = account.position {
        validate_position(u64::from(position), config.max_position)?;
    }
    Ok(())
}

pub fn validate_family(family: &Family, config: &OrderingConfig) -> Result<(), ValidationFailure> {
    validate_name(&family.name, config.max_name_len)?;
    validate_currency(&family.currency)
}

pub fn validate_name(name: &str, max_len: usize) -> Result<(), ValidationFailure> {
    if name.trim().is_empty() {
        return Err(ValidationFailure::BlankName);
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(ValidationFailure::NameTooLong { len, max: max_len });
    }
    Ok(())
}

/// Currency must look like an ISO-4217 code: three uppercase ASCII letters.
pub fn validate_currency(code: &str) -> Result<(), ValidationFailure> {
    let well_formed = code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase());
    if well_formed {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidCurrency(code.to_string()))
    }
}

/// Positions are stored as `u32` but capped at the configured maximum so the
/// values stay representable as a signed 32-bit column elsewhere.
pub fn validate_position(position: u64, max: u32) -> Result<u32, ValidationFailure> {
    if position > u64::from(max) {
        return Err(ValidationFailure::PositionOutOfRange { position, max });
    }
    u32::try_from(position).map_err(|_| ValidationFailure::PositionOutOfRange { position, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AccountKind;
    use shared_types::{AccountId, FamilyId};

    fn account(name: &str, currency: &str, position: Option<u32>) -> Account {
        Account {
            id: AccountId::new(),
            family_id: FamilyId::new(),
            name: name.to_string(),
            kind: AccountKind::Depository,
            subtype: None,
            currency: currency.to_string(),
            balance: 0,
            position,
            created_at: 0,
        }
    }

    #[test]
    fn test_valid_account_passes() {
        let config = OrderingConfig::default();
        assert_eq!(validate_account(&account("Checking", "USD", Some(0)), &config), Ok(()));
        assert_eq!(validate_account(&account("Legacy", "EUR", None), &config), Ok(()));
    }

    #[test]
    fn test_blank_name_rejected() {
        let config = OrderingConfig::default();
        assert_eq!(
            validate_account(&account("   ", "USD", Some(0)), &config),
            Err(ValidationFailure::BlankName)
        );
    }

    #[test]
    fn test_long_name_rejected() {
        let config = OrderingConfig {
            max_name_len: 4,
            ..OrderingConfig::default()
        };
        assert_eq!(
            validate_account(&account("Savings", "USD", None), &config),
            Err(ValidationFailure::NameTooLong { len: 7, max: 4 })
        );
    }

    #[test]
    fn test_currency_codes() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("usd").is_err());
        assert!(validate_currency("US").is_err());
        assert!(validate_currency("USDT").is_err());
        assert!(validate_currency("").is_err());
    }

    #[test]
    fn test_position_bounds() {
        assert_eq!(validate_position(0, 10), Ok(0));
        assert_eq!(validate_position(10, 10), Ok(10));
        assert_eq!(
            validate_position(11, 10),
            Err(ValidationFailure::PositionOutOfRange { position: 11, max: 10 })
        );
        assert!(validate_position(u64::from(u32::MAX) + 1, u32::MAX).is_err());
    }
}
