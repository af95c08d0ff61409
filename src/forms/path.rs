//! Dotted control paths such as `address.city` or `items.0.qty`

use std::{fmt, str::FromStr};

use super::FormError;

/// A validated, non-empty sequence of control names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlPath {
    segments: Vec<String>,
}

impl ControlPath {
    pub fn parse(path: &str) -> Result<Self, FormError> {
        let segments: Vec<String> = path.split('.').map(str::trim).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(FormError::InvalidPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path made of the first `len` segments, for error reporting
    pub(crate) fn prefix(&self, len: usize) -> String {
        self.segments[..len.min(self.segments.len())].join(".")
    }
}

impl FromStr for ControlPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ControlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_paths() {
        let path: ControlPath = "items.0.qty".parse().unwrap();
        assert_eq!(path.segments(), ["items", "0", "qty"]);
        assert_eq!(path.prefix(2), "items.0");
        assert_eq!(path.to_string(), "items.0.qty");
    }

    #[test]
    fn rejects_empty_segments() {
        for bad in ["", ".", "a..b", "a.", ".a"] {
            assert_eq!(ControlPath::parse(bad), Err(FormError::InvalidPath(bad.to_string())));
        }
    }
}
