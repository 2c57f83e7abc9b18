//! Domain value objects: Category, Architecture, LanguageKind, CommentStyle.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO derivation logic. What each category emits lives in
//! `categories.rs`; per-language command defaults live in `commands.rs`.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add its builder (category) or strategy (language) entry
//! 4. Done: nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Category ──────────────────────────────────────────────────────────────────

/// A semantic grouping of configuration-derived variables.
///
/// The set is closed: every category has a builder in `categories.rs`, so an
/// "unknown category" cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Common,
    Build,
    Runtime,
    Plugin,
    CiPaths,
    ServiceNetwork,
    Language,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 7] = [
        Self::Common,
        Self::Build,
        Self::Runtime,
        Self::Plugin,
        Self::CiPaths,
        Self::ServiceNetwork,
        Self::Language,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Build => "build",
            Self::Runtime => "runtime",
            Self::Plugin => "plugin",
            Self::CiPaths => "ci-paths",
            Self::ServiceNetwork => "service-network",
            Self::Language => "language",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Architecture ──────────────────────────────────────────────────────────────

/// A container build architecture.
///
/// Only `amd64` and `arm64` are accepted anywhere in the composition layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Amd64,
    Arm64,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Self::Amd64, Self::Arm64];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }

    /// Operating system tag paired with this architecture.
    pub const fn os(&self) -> &'static str {
        match self {
            Self::Amd64 | Self::Arm64 => "linux",
        }
    }

    /// Suffix used by architecture-tagged variable names (`_AMD64`).
    pub const fn key_suffix(&self) -> &'static str {
        match self {
            Self::Amd64 => "_AMD64",
            Self::Arm64 => "_ARM64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = DomainError;

    /// Exact match only: tags are an on-disk contract, not user prose.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amd64" => Ok(Self::Amd64),
            "arm64" => Ok(Self::Arm64),
            other => Err(DomainError::UnsupportedArchitecture {
                tag: other.to_string(),
            }),
        }
    }
}

// ── LanguageKind ──────────────────────────────────────────────────────────────

/// The language toolchain a service is built with.
///
/// Parsing never fails: anything unrecognised is `Generic`, which has no
/// default commands. Validation of the service description is not this
/// layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    Go,
    Rust,
    Python,
    Node,
    Java,
    #[default]
    Generic,
}

impl LanguageKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::Node => "node",
            Self::Java => "java",
            Self::Generic => "generic",
        }
    }

    /// Lenient parse used by the category builder.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Self::Go,
            "rust" | "rs" => Self::Rust,
            "python" | "py" => Self::Python,
            "node" | "nodejs" | "javascript" | "js" | "typescript" | "ts" => Self::Node,
            "java" | "jvm" => Self::Java,
            _ => Self::Generic,
        }
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CommentStyle ──────────────────────────────────────────────────────────────

/// Comment wrapper used to embed region markers in a file.
///
/// The marker literals are fixed; only the wrapper varies by file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// `# marker`: shell, Dockerfile, YAML, Makefile, TOML.
    Hash,
    /// `// marker`: Go, Rust, JavaScript.
    DoubleSlash,
    /// `-- marker`: SQL, Lua.
    DoubleDash,
    /// `<!-- marker -->`: XML, HTML, Markdown.
    Xml,
}

impl CommentStyle {
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Hash => "# ",
            Self::DoubleSlash => "// ",
            Self::DoubleDash => "-- ",
            Self::Xml => "<!-- ",
        }
    }

    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Xml => " -->",
            _ => "",
        }
    }

    /// Wrap a marker literal in this comment syntax.
    pub fn wrap(&self, marker: &str) -> String {
        format!("{}{}{}", self.prefix(), marker, self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn architecture_parses_exact_tags_only() {
        assert_eq!("amd64".parse::<Architecture>().unwrap(), Architecture::Amd64);
        assert_eq!("arm64".parse::<Architecture>().unwrap(), Architecture::Arm64);
        assert!("x86_64".parse::<Architecture>().is_err());
        assert!("AMD64".parse::<Architecture>().is_err());
        assert!("".parse::<Architecture>().is_err());
    }

    #[test]
    fn both_architectures_target_linux() {
        for arch in Architecture::ALL {
            assert_eq!(arch.os(), "linux");
        }
    }

    #[test]
    fn language_parse_is_lenient() {
        assert_eq!(LanguageKind::parse_lenient("Go"), LanguageKind::Go);
        assert_eq!(LanguageKind::parse_lenient("golang"), LanguageKind::Go);
        assert_eq!(LanguageKind::parse_lenient("ts"), LanguageKind::Node);
        assert_eq!(LanguageKind::parse_lenient("cobol"), LanguageKind::Generic);
        assert_eq!(LanguageKind::parse_lenient(""), LanguageKind::Generic);
    }

    #[test]
    fn category_names_are_kebab_case() {
        assert_eq!(Category::CiPaths.to_string(), "ci-paths");
        assert_eq!(Category::ServiceNetwork.to_string(), "service-network");
    }

    #[test]
    fn comment_wrapping() {
        assert_eq!(CommentStyle::Hash.wrap("X"), "# X");
        assert_eq!(CommentStyle::Xml.wrap("X"), "<!-- X -->");
        assert_eq!(CommentStyle::DoubleSlash.wrap("X"), "// X");
    }
}
