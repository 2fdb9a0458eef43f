//! PSI configuration.

use jpsi_ir::LanguageLevel;
use jpsi_stub::StubBuildOptions;

/// Settings shared by every file of a [`PsiManager`](crate::PsiManager).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PsiConfig {
    pub language_level: LanguageLevel,
    /// Field initializers longer than this are elided from stubs.
    pub initializer_text_limit: usize,
    /// Re-check syntax tree invariants after every mutation.
    pub validate_trees: bool,
}

impl Default for PsiConfig {
    fn default() -> Self {
        PsiConfig {
            language_level: LanguageLevel::default(),
            initializer_text_limit: StubBuildOptions::default().initializer_text_limit,
            validate_trees: cfg!(debug_assertions),
        }
    }
}

impl PsiConfig {
    #[must_use]
    pub fn with_language_level(mut self, level: LanguageLevel) -> Self {
        self.language_level = level;
        self
    }

    #[must_use]
    pub fn with_initializer_text_limit(mut self, limit: usize) -> Self {
        self.initializer_text_limit = limit;
        self
    }

    #[must_use]
    pub fn with_validate_trees(mut self, validate: bool) -> Self {
        self.validate_trees = validate;
        self
    }

    pub(crate) fn stub_options(&self) -> StubBuildOptions {
        StubBuildOptions::default().with_initializer_text_limit(self.initializer_text_limit)
    }
}
