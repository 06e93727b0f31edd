//! Grouping of chains into the binder and target proteins.

use crate::error::{PisaError, Result};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Which partner of the complex a chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// The designed or probing protein, listed first in the groups
    Binder,
    /// The protein being bound, listed second in the groups
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Binder => write!(f, "Binder"),
            Role::Target => write!(f, "Target"),
        }
    }
}

/// Assignment of chain identifiers to the two proteins of a complex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRoles {
    /// Chains of the binder, checked first
    pub binder: BTreeSet<String>,
    /// Chains of the target
    pub target: BTreeSet<String>,
}

impl Default for ChainRoles {
    fn default() -> Self {
        Self {
            binder: BTreeSet::from(["A".to_string()]),
            target: BTreeSet::from(["B".to_string()]),
        }
    }
}

impl ChainRoles {
    /// Parse the chain groups from the input string, e.g. `A,B/C,D`.
    /// Only checks the first two fields separated by `/`.
    /// Chains before the slash are binder chains, chains after it are target chains.
    pub fn parse(groups: &str) -> Result<Self> {
        let invalid = |reason: &str| PisaError::InvalidGroups {
            groups: groups.to_string(),
            reason: reason.to_string(),
        };

        let sel_vec: Vec<&str> = groups.split('/').collect();
        if sel_vec.len() < 2 {
            return Err(invalid("expected binder and target chains separated by '/'"));
        }
        let to_set = |field: &str| -> BTreeSet<String> {
            field
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect()
        };
        let binder = to_set(sel_vec[0]);
        let target = to_set(sel_vec[1]);

        if binder.is_empty() && target.is_empty() {
            return Err(invalid("both chain groups are empty"));
        }

        Ok(Self { binder, target })
    }

    /// The protein a chain belongs to, if any group lists it.
    pub fn protein(&self, chain: &str) -> Option<Role> {
        if self.binder.contains(chain) {
            Some(Role::Binder)
        } else if self.target.contains(chain) {
            Some(Role::Target)
        } else {
            debug!("Chain {chain} corresponds to none of the proteins");
            None
        }
    }

    /// Whether `chain` is one of the binder chains.
    pub fn is_binder(&self, chain: &str) -> bool {
        self.binder.contains(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(chains: &[&str]) -> BTreeSet<String> {
        chains.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn good_group_splits() {
        let roles = ChainRoles::parse("A,B/C,D").unwrap();
        assert_eq!(roles.binder, set(&["A", "B"]));
        assert_eq!(roles.target, set(&["C", "D"]));

        // One side may stay empty
        let roles = ChainRoles::parse("/C").unwrap();
        assert!(roles.binder.is_empty());
        assert_eq!(roles.target, set(&["C"]));

        let roles = ChainRoles::parse(" H , L / A ").unwrap();
        assert_eq!(roles.binder, set(&["H", "L"]));
        assert_eq!(roles.target, set(&["A"]));
    }

    #[test]
    fn bad_group_splits() {
        assert!(matches!(
            ChainRoles::parse("A,B"),
            Err(PisaError::InvalidGroups { .. })
        ));
        assert!(matches!(
            ChainRoles::parse("/"),
            Err(PisaError::InvalidGroups { .. })
        ));
    }

    #[test]
    fn binder_wins_for_shared_chains() {
        let roles = ChainRoles::parse("A/A,B").unwrap();
        assert_eq!(roles.protein("A"), Some(Role::Binder));
        assert_eq!(roles.protein("B"), Some(Role::Target));
    }

    #[test]
    fn resolves_proteins() {
        let roles = ChainRoles::default();
        assert_eq!(roles.protein("A"), Some(Role::Binder));
        assert_eq!(roles.protein("B"), Some(Role::Target));
        assert_eq!(roles.protein("C"), None);
        assert_eq!(Role::Binder.to_string(), "Binder");
        assert!(roles.is_binder("A"));
        assert!(!roles.is_binder("B"));
    }
}
