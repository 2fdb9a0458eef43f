//! Boolean facts recorded on stubs.
//!
//! One flag word serves every stub kind. Modifier bits are only set on
//! `MODIFIER_LIST` stubs; declaration bits only on the declarations they
//! describe.

use bitflags::bitflags;
use jpsi_ir::ElementType;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct StubFlags: u32 {
        // === Modifiers (bits 0-13), on MODIFIER_LIST ===
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const NATIVE = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const STRICTFP = 1 << 8;
        const TRANSIENT = 1 << 9;
        const VOLATILE = 1 << 10;
        const DEFAULT = 1 << 11;
        const SEALED = 1 << 12;
        const NON_SEALED = 1 << 13;

        // === Documentation (bits 16-18), on declarations ===
        const HAS_DOC_COMMENT = 1 << 16;
        /// The doc comment carries an `@deprecated` tag.
        const DOC_DEPRECATED = 1 << 17;
        /// The modifier list carries `@Deprecated`.
        const ANNOTATION_DEPRECATED = 1 << 18;

        // === Classes (bits 20-24) ===
        const INTERFACE = 1 << 20;
        const ENUM = 1 << 21;
        const RECORD = 1 << 22;
        const ANNOTATION_TYPE = 1 << 23;
        /// Anonymous class created by `outer.new T() { ... }`.
        const ANON_IN_QUALIFIED_NEW = 1 << 24;

        // === Methods and parameters (bits 25-27) ===
        const CONSTRUCTOR = 1 << 25;
        const COMPACT_CONSTRUCTOR = 1 << 26;
        const VARARGS = 1 << 27;

        // === Imports (bit 28) ===
        const ON_DEMAND = 1 << 28;
    }
}

impl StubFlags {
    pub const MODIFIERS: Self = Self::from_bits_truncate((1 << 14) - 1);

    /// Modifier bit for a modifier keyword token.
    pub const fn from_modifier_keyword(kind: ElementType) -> Self {
        match kind {
            ElementType::PublicKeyword => Self::PUBLIC,
            ElementType::ProtectedKeyword => Self::PROTECTED,
            ElementType::PrivateKeyword => Self::PRIVATE,
            ElementType::StaticKeyword => Self::STATIC,
            ElementType::AbstractKeyword => Self::ABSTRACT,
            ElementType::FinalKeyword => Self::FINAL,
            ElementType::NativeKeyword => Self::NATIVE,
            ElementType::SynchronizedKeyword => Self::SYNCHRONIZED,
            ElementType::StrictfpKeyword => Self::STRICTFP,
            ElementType::TransientKeyword => Self::TRANSIENT,
            ElementType::VolatileKeyword => Self::VOLATILE,
            ElementType::DefaultKeyword => Self::DEFAULT,
            ElementType::SealedKeyword => Self::SEALED,
            ElementType::NonSealedKeyword => Self::NON_SEALED,
            _ => Self::empty(),
        }
    }

    /// Modifier bit for a modifier spelled as Java source (`"public"`).
    pub fn from_modifier_name(name: &str) -> Self {
        match name {
            "public" => Self::PUBLIC,
            "protected" => Self::PROTECTED,
            "private" => Self::PRIVATE,
            "static" => Self::STATIC,
            "abstract" => Self::ABSTRACT,
            "final" => Self::FINAL,
            "native" => Self::NATIVE,
            "synchronized" => Self::SYNCHRONIZED,
            "strictfp" => Self::STRICTFP,
            "transient" => Self::TRANSIENT,
            "volatile" => Self::VOLATILE,
            "default" => Self::DEFAULT,
            "sealed" => Self::SEALED,
            "non-sealed" => Self::NON_SEALED,
            _ => Self::empty(),
        }
    }

    #[inline]
    pub const fn is_deprecated(self) -> bool {
        self.intersects(Self::DOC_DEPRECATED.union(Self::ANNOTATION_DEPRECATED))
    }

    /// Only the modifier bits.
    #[inline]
    pub const fn modifiers(self) -> Self {
        self.intersection(Self::MODIFIERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_mask_covers_every_modifier_keyword() {
        for &kind in ElementType::ALL {
            let flag = StubFlags::from_modifier_keyword(kind);
            assert_eq!(kind.is_modifier_keyword(), !flag.is_empty(), "{kind:?}");
            assert!(StubFlags::MODIFIERS.contains(flag));
        }
    }

    #[test]
    fn names_match_keywords() {
        assert_eq!(StubFlags::from_modifier_name("non-sealed"), StubFlags::NON_SEALED);
        assert_eq!(StubFlags::from_modifier_name("static"), StubFlags::STATIC);
        assert!(StubFlags::from_modifier_name("record").is_empty());
    }

    #[test]
    fn deprecation_from_either_source() {
        assert!(StubFlags::DOC_DEPRECATED.is_deprecated());
        assert!(StubFlags::ANNOTATION_DEPRECATED.is_deprecated());
        assert!(!(StubFlags::PUBLIC | StubFlags::ENUM).is_deprecated());
        assert_eq!((StubFlags::PUBLIC | StubFlags::ENUM).modifiers(), StubFlags::PUBLIC);
    }
}
