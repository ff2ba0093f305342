//! Host/container path mappings.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A directory as seen from this process (`host`) and from the media server
/// (`container`). Both are the same path when no mapping is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMapping {
    pub host: PathBuf,
    pub container: PathBuf,
}

impl PathMapping {
    pub fn new(host: impl Into<PathBuf>, container: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
        }
    }

    /// Same path on both sides.
    pub fn identity(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            host: path.clone(),
            container: path,
        }
    }

    /// Parse `host:container`, splitting on the first `:`. A value without a
    /// colon maps to itself. Returns `None` when the host side is empty.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let mapping = match value.split_once(':') {
            Some((host, container)) => {
                let host = host.trim();
                let container = container.trim();
                let container = if container.is_empty() { host } else { container };
                Self::new(host, container)
            }
            None => Self::identity(value),
        };
        if mapping.host.as_os_str().is_empty() {
            None
        } else {
            Some(mapping)
        }
    }

    /// Child `name` on both sides of the mapping.
    pub fn join(&self, name: impl AsRef<Path>) -> Self {
        let name = name.as_ref();
        Self {
            host: self.host.join(name),
            container: self.container.join(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_splits_host_and_container() {
        let mapping = PathMapping::parse("/mnt/tank/Movies : /media/Movies").unwrap();
        assert_eq!(mapping.host, PathBuf::from("/mnt/tank/Movies"));
        assert_eq!(mapping.container, PathBuf::from("/media/Movies"));
    }

    #[test]
    fn only_first_colon_splits() {
        let mapping = PathMapping::parse("/a:/b:c").unwrap();
        assert_eq!(mapping.host, PathBuf::from("/a"));
        assert_eq!(mapping.container, PathBuf::from("/b:c"));
    }

    #[test]
    fn plain_path_maps_to_itself() {
        let mapping = PathMapping::parse("/srv/Genres").unwrap();
        assert_eq!(mapping, PathMapping::identity("/srv/Genres"));
    }

    #[test]
    fn empty_values_are_rejected() {
        assert!(PathMapping::parse("").is_none());
        assert!(PathMapping::parse("   ").is_none());
        assert!(PathMapping::parse(":/media").is_none());
    }

    #[test]
    fn join_applies_to_both_sides() {
        let mapping = PathMapping::new("/host/Genres", "/media/Genres").join("Action");
        assert_eq!(mapping.host, PathBuf::from("/host/Genres/Action"));
        assert_eq!(mapping.container, PathBuf::from("/media/Genres/Action"));
    }
}
