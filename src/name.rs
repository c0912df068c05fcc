use snafu::ensure;
use std::fmt;
use std::str::FromStr;

use crate::error;

/// A docker hub repository reference in the form `namespace/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName {
    namespace: String,
    name: String,
}

impl RepositoryName {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepositoryName {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        ensure!(
            parts.len() == 2 && parts.iter().all(|part| !part.is_empty()),
            error::MalformedRepositorySnafu { repository: s }
        );
        Ok(Self {
            namespace: parts[0].to_string(),
            name: parts[1].to_string(),
        })
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::RepositoryName;
    use crate::error::Error;

    #[test]
    fn test_repository_from_str() {
        let repository = RepositoryName::from_str("acme/app").unwrap();
        assert_eq!(repository.namespace(), "acme");
        assert_eq!(repository.name(), "app");
        assert_eq!(repository.to_string(), "acme/app");
    }

    #[test]
    fn test_repository_malformed() {
        for input in ["app", "", "/app", "acme/", "acme/app/extra", "/"] {
            let err = RepositoryName::from_str(input).unwrap_err();
            assert!(
                matches!(err, Error::MalformedRepository { ref repository } if repository == input),
                "unexpected result for {input:?}: {err:?}"
            );
        }
    }
}
