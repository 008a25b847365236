//! The closed set of transduction target formats.
//!
//! New output formats are new variants plus a match arm in the
//! template and mask builders; the set is small and closed, so a
//! plain enum beats a trait object here.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Output format of a transduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Pretty-printed JSON array of objects. The only implemented
    /// target.
    Json,
    /// CSV re-emission. Reserved; requesting it fails with
    /// [`UnsupportedTarget`](Error::UnsupportedTarget).
    Csv,
}

impl Target {
    /// Lower-case name, as written on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Json => "json",
            Target::Csv => "csv",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "json" => Ok(Target::Json),
            "csv" => Ok(Target::Csv),
            other => Err(Error::InvalidArgument(format!(
                "unknown target format {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("json".parse::<Target>().unwrap(), Target::Json);
        assert_eq!("csv".parse::<Target>().unwrap(), Target::Csv);
        assert_eq!(Target::Json.to_string(), "json");
    }

    #[test]
    fn unknown_target_is_an_argument_error() {
        let err = "xml".parse::<Target>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
    }
}
