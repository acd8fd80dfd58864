use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a line shipped to the remote ingest endpoint.
///
/// The facade only distinguishes the default (info) path from the error path,
/// so the remote wire format only ever carries these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineLevel {
    Info,
    Error,
}

impl LineLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineLevel::Info => "info",
            LineLevel::Error => "error",
        }
    }
}

impl fmt::Display for LineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LineLevel::Info).unwrap(), "\"info\"");
        assert_eq!(serde_json::to_string(&LineLevel::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(LineLevel::Error.to_string(), "error");
    }
}
