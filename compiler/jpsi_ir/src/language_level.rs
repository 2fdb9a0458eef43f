//! Java language levels.
//!
//! The level decides which version-dependent constructs the parser accepts
//! as syntax: records, sealed hierarchies, switch expressions, text blocks
//! and `var`. A construct that the level does not support is still parsed,
//! but the parser records a syntax error for it.

use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum LanguageLevel {
    Jdk8,
    Jdk11,
    Jdk17,
    #[default]
    Jdk21,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 4] = [
        LanguageLevel::Jdk8,
        LanguageLevel::Jdk11,
        LanguageLevel::Jdk17,
        LanguageLevel::Jdk21,
    ];

    /// Feature version number (`8`, `11`, ...).
    pub const fn feature(self) -> u32 {
        match self {
            LanguageLevel::Jdk8 => 8,
            LanguageLevel::Jdk11 => 11,
            LanguageLevel::Jdk17 => 17,
            LanguageLevel::Jdk21 => 21,
        }
    }

    pub const fn supports_var(self) -> bool {
        self.feature() >= 10
    }

    pub const fn supports_switch_expressions(self) -> bool {
        self.feature() >= 14
    }

    pub const fn supports_text_blocks(self) -> bool {
        self.feature() >= 15
    }

    pub const fn supports_records(self) -> bool {
        self.feature() >= 16
    }

    pub const fn supports_sealed(self) -> bool {
        self.feature() >= 17
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JDK_{}", self.feature())
    }
}

impl FromStr for LanguageLevel {
    type Err = String;

    /// Accepts `8`, `1.8`, `jdk8`, `JDK_8` and the same forms for 11, 17, 21.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .trim_start_matches("jdk")
            .trim_start_matches('_')
            .trim_start_matches("1.");
        match digits {
            "8" => Ok(LanguageLevel::Jdk8),
            "11" => Ok(LanguageLevel::Jdk11),
            "17" => Ok(LanguageLevel::Jdk17),
            "21" => Ok(LanguageLevel::Jdk21),
            _ => Err(format!("unknown language level `{s}` (expected 8, 11, 17 or 21)")),
        }
    }
}
