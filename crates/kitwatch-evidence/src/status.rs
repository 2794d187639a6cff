//! Status tag derivation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary classification of a run's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTag {
    /// Exit status was exactly `0`.
    Confirmed,
    /// Anything else, including a process that never started.
    Bug,
}

impl StatusTag {
    /// Classify a textual status. Only the exact string `"0"` is success:
    /// `"00"`, `" 0"` or `"unknown"` are bugs.
    pub fn from_status(status: &str) -> Self {
        if status == "0" {
            Self::Confirmed
        } else {
            Self::Bug
        }
    }

    /// Classify a numeric exit code; `None` means the code is unknown.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Confirmed,
            _ => Self::Bug,
        }
    }

    /// Tag as written in the ledger, including the leading `#`.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Confirmed => "#Confirmed",
            Self::Bug => "#Bug",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_zero_is_confirmed() {
        assert_eq!(StatusTag::from_status("0"), StatusTag::Confirmed);
        assert_eq!(StatusTag::from_code(Some(0)), StatusTag::Confirmed);
    }

    #[test]
    fn test_near_zero_strings_are_bugs() {
        for status in ["00", " 0", "0 ", "", "unknown", "-0", "1"] {
            assert_eq!(StatusTag::from_status(status), StatusTag::Bug, "status {status:?}");
        }
        assert_eq!(StatusTag::from_code(None), StatusTag::Bug);
    }

    proptest! {
        #[test]
        fn test_every_nonzero_code_is_bug(code in any::<i32>().prop_filter("non-zero", |c| *c != 0)) {
            prop_assert_eq!(StatusTag::from_code(Some(code)), StatusTag::Bug);
            prop_assert_eq!(StatusTag::from_status(&code.to_string()), StatusTag::Bug);
        }
    }
}
