use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path
    /// contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use scaffold::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Normalizes a relative path into its POSIX form: forward slashes, no `.`
    /// components and no leading `./`.
    ///
    /// Fails with [`Error::InvalidRenderedPath`] when the path is empty, absolute
    /// or climbs out of its root through `..`.
    ///
    /// # Examples
    /// ```
    /// use scaffold::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("./src/./main.py");
    /// assert_eq!(path.to_relative_posix().unwrap(), "src/main.py");
    /// assert!(Path::new("../outside").to_relative_posix().is_err());
    /// ```
    fn to_relative_posix(&self) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_relative_posix(&self) -> Result<String> {
        let invalid = |reason: &str| Error::InvalidRenderedPath {
            path: self.display().to_string(),
            reason: reason.to_string(),
        };

        let mut parts = Vec::new();
        for component in self.components() {
            match component {
                Component::Normal(part) => parts.push(
                    part.to_str().ok_or_else(|| invalid("path is not valid UTF-8"))?,
                ),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(invalid("parent directory references are not allowed"))
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("path must be relative"))
                }
            }
        }

        if parts.is_empty() {
            return Err(invalid("path is empty"));
        }

        Ok(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn normalizes_relative_paths() {
        assert_eq!(Path::new("README.md").to_relative_posix().unwrap(), "README.md");
        assert_eq!(Path::new("./a/b/c.txt").to_relative_posix().unwrap(), "a/b/c.txt");
        assert_eq!(Path::new("a//b/./c").to_relative_posix().unwrap(), "a/b/c");
    }

    #[test]
    fn rejects_paths_escaping_the_root() {
        for path in ["../etc/passwd", "a/../../b", "/etc/passwd", "", "."] {
            let err = Path::new(path).to_relative_posix().unwrap_err();
            assert!(
                matches!(err, Error::InvalidRenderedPath { .. }),
                "expected '{path}' to be rejected"
            );
        }
    }
}
