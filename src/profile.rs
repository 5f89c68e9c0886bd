//! Batch profiles.
//!
//! A profile sets the per-tier length budgets and feature flags of a batch
//! run. Profiles are TOML files; the built-in ones are embedded in the binary
//! at compile time. Fields omitted from a TOML file inherit the `Default`
//! impls below, which match the "default" profile.

use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;
use crate::program::ProgramComplexity;

/// Feature flags and length budgets for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Emit comments in Medium and larger fixtures.
    pub include_comments: bool,
    /// Mix catalog constructs into Extreme fixtures.
    pub obscure_features: bool,
    pub max_lengths: MaxLengths,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            include_comments: false,
            obscure_features: true,
            max_lengths: MaxLengths::default(),
        }
    }
}

impl Profile {
    /// Length budget for fixtures of `tier`.
    pub fn max_length(&self, tier: ProgramComplexity) -> usize {
        let lengths = &self.max_lengths;
        let len = match tier {
            ProgramComplexity::Minimal => lengths.minimal,
            ProgramComplexity::Simple => lengths.simple,
            ProgramComplexity::Medium => lengths.medium,
            ProgramComplexity::Complex => lengths.complex,
            ProgramComplexity::Extreme => lengths.extreme,
        };
        // A zero budget would always end in the fallback; treat it as one.
        len.max(1)
    }
}

/// Per-tier character budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxLengths {
    pub minimal: usize,
    pub simple: usize,
    pub medium: usize,
    pub complex: usize,
    pub extreme: usize,
}

impl Default for MaxLengths {
    fn default() -> Self {
        Self {
            minimal: ProgramComplexity::Minimal.default_max_length(),
            simple: ProgramComplexity::Simple.default_max_length(),
            medium: ProgramComplexity::Medium.default_max_length(),
            complex: ProgramComplexity::Complex.default_max_length(),
            extreme: ProgramComplexity::Extreme.default_max_length(),
        }
    }
}

// Embedded profile TOML data (compiled into the binary).
static PROFILES: &[(&str, &str)] = &[
    ("default", include_str!("../profiles/default.toml")),
    ("tiny", include_str!("../profiles/tiny.toml")),
    ("commented", include_str!("../profiles/commented.toml")),
];

/// Names of the embedded profiles.
pub fn available_profiles() -> Vec<&'static str> {
    PROFILES.iter().map(|(name, _)| *name).collect()
}

fn parse_profile_toml(name: &str, toml_str: &str) -> Result<Profile, ProfileError> {
    toml::from_str(toml_str).map_err(|source| ProfileError::Parse {
        name: name.to_string(),
        source,
    })
}

/// Look up an embedded profile by name, or load one from a file.
///
/// Anything containing `/` or ending in `.toml` is treated as a path.
pub fn get_profile(name_or_path: &str) -> Result<Profile, ProfileError> {
    if name_or_path.contains('/') || name_or_path.ends_with(".toml") {
        let content =
            std::fs::read_to_string(name_or_path).map_err(|source| ProfileError::Read {
                path: name_or_path.to_string(),
                source,
            })?;
        return parse_profile_toml(name_or_path, &content);
    }

    PROFILES
        .iter()
        .find(|(name, _)| *name == name_or_path)
        .map(|(name, toml_str)| parse_profile_toml(name, toml_str))
        .unwrap_or_else(|| {
            Err(ProfileError::Unknown {
                name: name_or_path.to_string(),
                available: available_profiles().join(", "),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_embedded_profiles_parse() {
        for name in available_profiles() {
            get_profile(name).unwrap_or_else(|e| panic!("profile '{name}' failed: {e}"));
        }
    }

    #[test]
    fn default_profile_matches_default_impl() {
        let profile = get_profile("default").unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.max_length(ProgramComplexity::Extreme), 1500);
        assert!(!profile.include_comments);
    }

    #[test]
    fn tiny_profile_shrinks_budgets() {
        let tiny = get_profile("tiny").unwrap();
        let default = Profile::default();
        for tier in ProgramComplexity::ALL {
            assert!(tiny.max_length(tier) < default.max_length(tier));
        }
        assert!(!tiny.obscure_features);
    }

    #[test]
    fn commented_profile_inherits_budgets() {
        let commented = get_profile("commented").unwrap();
        assert!(commented.include_comments);
        assert_eq!(commented.max_lengths, MaxLengths::default());
    }

    #[test]
    fn partial_toml_inherits_defaults() {
        let profile: Profile = toml::from_str("[max_lengths]\nmedium = 999\n").unwrap();
        assert_eq!(profile.max_length(ProgramComplexity::Medium), 999);
        assert_eq!(profile.max_length(ProgramComplexity::Simple), 150);
        assert!(profile.obscure_features);
    }

    #[test]
    fn zero_budget_is_clamped() {
        let profile: Profile = toml::from_str("[max_lengths]\nminimal = 0\n").unwrap();
        assert_eq!(profile.max_length(ProgramComplexity::Minimal), 1);
    }

    #[test]
    fn unknown_profile_lists_available() {
        let err = get_profile("enormous").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("enormous"));
        assert!(msg.contains("default") && msg.contains("tiny"));
    }

    #[test]
    fn profile_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "include_comments = true\n").unwrap();
        let profile = get_profile(path.to_str().unwrap()).unwrap();
        assert!(profile.include_comments);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = get_profile("/nonexistent/profile.toml").unwrap_err();
        assert!(matches!(err, ProfileError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "include_comments = \"yes\"\n").unwrap();
        let err = get_profile(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
    }
}
