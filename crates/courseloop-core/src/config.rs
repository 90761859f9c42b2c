//! Static account configuration
//!
//! Per-deployment facts that never change at runtime: which account owns the
//! records, which sources feed it and which of those is primary, and the
//! prefix used when deriving physical table and index names.

use crate::entities::CourseSupportType;
use crate::source::Source;

/// Environment variable naming the physical name prefix.
const NAME_PREFIX_VAR: &str = "COURSELOOP_NAME_PREFIX";

/// Static configuration for the account this deployment serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Slug of the owning account, stamped onto every entity.
    pub account_owner: String,

    /// The source whose external id drives reconciliation lookups.
    pub primary_source: Source,

    /// All sources this account accepts records from.
    pub account_sources: Vec<Source>,

    /// Prefix prepended to derived table and index names, e.g. `"Prod"`.
    pub name_prefix: String,

    /// Support model stamped onto newly created courses. Business-owned,
    /// never sourced.
    pub default_support_type: CourseSupportType,
}

impl AccountConfig {
    /// Build a config for the given account with the default source set.
    pub fn new(account_owner: impl Into<String>) -> Self {
        Self {
            account_owner: account_owner.into(),
            primary_source: Source::Crm,
            account_sources: vec![Source::Crm],
            name_prefix: String::new(),
            default_support_type: CourseSupportType::Facilitated,
        }
    }

    /// Build from the environment, falling back to defaults.
    ///
    /// Reads `COURSELOOP_NAME_PREFIX` for the physical name prefix; absence
    /// means no prefix.
    pub fn from_env(account_owner: impl Into<String>) -> Self {
        let mut config = Self::new(account_owner);
        if let Ok(prefix) = std::env::var(NAME_PREFIX_VAR) {
            config.name_prefix = prefix;
        }
        config
    }

    /// Whether records from the given source are accepted.
    #[must_use]
    pub fn accepts_source(&self, source: Source) -> bool {
        self.account_sources.contains(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccountConfig::new("apf");
        assert_eq!(config.primary_source, Source::Crm);
        assert!(config.accepts_source(Source::Crm));
        assert!(!config.accepts_source(Source::Community));
        assert!(config.name_prefix.is_empty());
    }

    #[test]
    fn test_extra_sources() {
        let mut config = AccountConfig::new("apf");
        config.account_sources.push(Source::Community);
        assert!(config.accepts_source(Source::Community));
    }
}
