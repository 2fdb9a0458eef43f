//! PSI façades for Java files.
//!
//! A [`PsiManager`] owns the configuration, the modification stamp and the
//! augmentation providers. Files added to it start out stub-only: class,
//! field and method queries are answered from the stub tree until one needs
//! detail the stubs do not keep (a method body, an initializer expression),
//! at which point the file's syntax tree is loaded and every stub is bound
//! to its node. Handles created before the switch stay valid.
//!
//! - [`JavaFile`]: stub-to-tree switch, edits, reparsing
//! - [`PsiElement`]: the handle every façade wraps
//! - [`PsiClass`], [`PsiField`], [`PsiMethod`], [`PsiParameter`]: declaration
//!   façades implementing the capability traits [`Named`], [`Typed`],
//!   [`ModifierOwner`] and [`Documented`]
//! - [`AugmentProvider`]: synthetic members merged into class member lists
//! - [`PsiVisitor`] and [`walk`]: double-dispatch traversal with
//!   cancellation
//!
//! Malformed source is never an error; it shows up as `ERROR_ELEMENT`
//! nodes. Accessors fail only for handles that went stale.

mod augment;
mod cache;
mod class;
mod code;
mod config;
mod element;
mod error;
mod field;
mod file;
mod manager;
mod member;
mod method;
mod modifiers;
mod parameter;
mod resolve;
mod traits;
mod types;
mod visitor;

pub use augment::{
    AugmentProvider, EnumMembers, LightMember, LightParameter, MemberKind, RecordMembers,
    Synthetic,
};
pub use cache::{CachedValue, StampedMap};
pub use class::PsiClass;
pub use code::{PsiCodeBlock, PsiLocalVariable};
pub use config::PsiConfig;
pub use element::{Backing, PsiElement};
pub use error::{PsiError, PsiResult};
pub use field::PsiField;
pub use file::{ErrorElement, ImportInfo, JavaFile, Reparse};
pub use manager::PsiManager;
pub use member::{ContainingClass, Member};
pub use method::PsiMethod;
pub use modifiers::{PsiAnnotation, PsiModifierList};
pub use parameter::PsiParameter;
pub use resolve::{PsiReferenceExpression, PsiVariable};
pub use traits::{Deprecation, Documented, ModifierOwner, Named, Typed};
pub use types::{PrimitiveType, PsiType, WildcardBound};
pub use visitor::{accept, walk, PsiVisitor};

pub use jpsi_ir::{Cancelled, CancellationToken, ElementType, LanguageLevel, Span, TextEdit};
pub use jpsi_stub::StubFlags;
pub use jpsi_tree::{ChildRole, WalkAction, WalkOutcome};
