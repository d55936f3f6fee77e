//! Treasurer registry and owner access control
//!
//! Treasurers are addresses the owner has authorized to fund dividend
//! rounds. Authorization is checked live at funding time: deactivating a
//! treasurer takes effect on their next call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, TokenError};

/// Address -> authorized-funder flag. The owner is authorized independently
/// of this table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreasurerRegistry {
    treasurers: HashMap<String, bool>,
}

impl TreasurerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active flag for an address. Idempotent.
    pub fn set(&mut self, address: &str, active: bool) {
        self.treasurers.insert(address.to_string(), active);
    }

    pub fn is_active(&self, address: &str) -> bool {
        self.treasurers.get(address).copied().unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.treasurers.values().filter(|active| **active).count()
    }
}

/// Owner identity and the authorization predicates derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessControl {
    owner: String,
}

impl AccessControl {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_owner(&self, caller: &str) -> bool {
        caller == self.owner
    }

    /// Fail with `Unauthorized` unless `caller` is the owner.
    pub fn require_owner(&self, caller: &str, action: &str) -> Result<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(TokenError::Unauthorized(format!(
                "{} may not {}",
                caller, action
            )))
        }
    }

    /// May `caller` deposit value into the dividend pool?
    pub fn is_authorized_funder(&self, caller: &str, registry: &TreasurerRegistry) -> bool {
        self.is_owner(caller) || registry.is_active(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_treasurer_idempotent() {
        let mut registry = TreasurerRegistry::new();

        registry.set("treasurer1", true);
        registry.set("treasurer1", true);

        assert!(registry.is_active("treasurer1"));
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_deactivate_treasurer() {
        let mut registry = TreasurerRegistry::new();

        registry.set("treasurer1", true);
        registry.set("treasurer1", false);

        assert!(!registry.is_active("treasurer1"));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_unknown_address_is_inactive() {
        let registry = TreasurerRegistry::new();
        assert!(!registry.is_active("nobody"));
    }

    #[test]
    fn test_owner_is_always_authorized() {
        let access = AccessControl::new("owner");
        let registry = TreasurerRegistry::new();

        assert!(access.is_authorized_funder("owner", &registry));
        assert!(!access.is_authorized_funder("stranger", &registry));
    }

    #[test]
    fn test_authorization_is_read_live() {
        let access = AccessControl::new("owner");
        let mut registry = TreasurerRegistry::new();

        registry.set("treasurer1", true);
        assert!(access.is_authorized_funder("treasurer1", &registry));

        registry.set("treasurer1", false);
        assert!(!access.is_authorized_funder("treasurer1", &registry));
    }

    #[test]
    fn test_require_owner() {
        let access = AccessControl::new("owner");

        assert!(access.require_owner("owner", "mint").is_ok());
        assert!(matches!(
            access.require_owner("stranger", "mint"),
            Err(TokenError::Unauthorized(_))
        ));
    }
}
