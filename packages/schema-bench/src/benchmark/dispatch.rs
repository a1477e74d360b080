//! Version dispatch
//!
//! A test case's factory and runner may differ per library build. Resolution
//! is a pure function of the dispatch target and the loaded version string.

use thiserror::Error;

/// No prefix matched the loaded version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported library version {version} (supported prefixes: {})", .supported.join(", "))]
pub struct DispatchError {
    pub version: String,
    pub supported: Vec<String>,
}

/// Either one callable for every build, or callables keyed by version prefix
pub enum Versioned<F> {
    Any(F),
    ByVersion(Vec<(String, F)>),
}

impl<F> Versioned<F> {
    /// Empty prefix table; add entries with [`on`](Self::on)
    pub fn by_version() -> Self {
        Versioned::ByVersion(Vec::new())
    }

    /// Append a prefix entry. Entries are tried in insertion order.
    ///
    /// Calling this on `Any` discards the catch-all.
    pub fn on(self, prefix: impl Into<String>, f: F) -> Self {
        let mut table = match self {
            Versioned::ByVersion(table) => table,
            Versioned::Any(_) => Vec::new(),
        };
        table.push((prefix.into(), f));
        Versioned::ByVersion(table)
    }

    /// First entry whose prefix starts `version`
    pub fn resolve(&self, version: &str) -> Result<&F, DispatchError> {
        match self {
            Versioned::Any(f) => Ok(f),
            Versioned::ByVersion(table) => table
                .iter()
                .find(|(prefix, _)| version.starts_with(prefix.as_str()))
                .map(|(_, f)| f)
                .ok_or_else(|| DispatchError {
                    version: version.to_string(),
                    supported: table.iter().map(|(prefix, _)| prefix.clone()).collect(),
                }),
        }
    }
}

impl<F> From<F> for Versioned<F> {
    fn from(f: F) -> Self {
        Versioned::Any(f)
    }
}

impl<F> std::fmt::Debug for Versioned<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Versioned::Any(_) => f.write_str("Versioned::Any"),
            Versioned::ByVersion(table) => f
                .debug_list()
                .entries(table.iter().map(|(prefix, _)| prefix))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Versioned<&'static str> {
        Versioned::by_version().on("1", "fnA").on("2", "fnB")
    }

    #[test]
    fn test_any_resolves_for_every_version() {
        let target = Versioned::from("only");
        assert_eq!(*target.resolve("0.0.1").unwrap(), "only");
        assert_eq!(*target.resolve("").unwrap(), "only");
    }

    #[test]
    fn test_prefix_match() {
        assert_eq!(*table().resolve("2.3.0").unwrap(), "fnB");
        assert_eq!(*table().resolve("1.0.0").unwrap(), "fnA");
    }

    #[test]
    fn test_unmatched_version_is_error() {
        let err = table().resolve("3.0.0").unwrap_err();
        assert_eq!(err.version, "3.0.0");
        assert_eq!(err.supported, vec!["1".to_string(), "2".to_string()]);
        assert!(err.to_string().contains("3.0.0"));
    }

    #[test]
    fn test_first_matching_prefix_wins() {
        let target = Versioned::by_version().on("1", "broad").on("1.2", "narrow");
        assert_eq!(*target.resolve("1.2.0").unwrap(), "broad");
    }

    #[test]
    fn test_empty_table_rejects_everything() {
        let target: Versioned<()> = Versioned::by_version();
        assert!(target.resolve("1.0.0").is_err());
    }
}
