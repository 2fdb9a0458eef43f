//! Types, code references, type parameters and reference lists.

use jpsi_ir::ElementType;

use super::Parser;
use crate::recovery::{PRIMITIVES, TYPE_ARGUMENT_TOKENS};

use ElementType as T;

/// Longest type-argument run the lookahead scans before giving up.
const MAX_TYPE_ARGS_SCAN: usize = 256;

impl Parser<'_> {
    /// `TYPE`: annotations, then a primitive, reference, `var` or wildcard,
    /// then array dimensions and an optional ellipsis.
    pub(super) fn type_element(&mut self, allow_var: bool) {
        jpsi_ir::ensure_sufficient_stack(|| self.type_element_inner(allow_var));
    }

    fn type_element_inner(&mut self, allow_var: bool) {
        self.start(T::TypeElement);
        while self.at(T::At) && !self.nth_at(1, T::InterfaceKeyword) {
            self.annotation();
        }
        match self.current() {
            Some(k) if PRIMITIVES.contains(k) => self.bump(),
            Some(T::Quest) => {
                self.bump();
                if self.at(T::ExtendsKeyword) || self.at(T::SuperKeyword) {
                    self.bump();
                    self.type_element(false);
                }
            }
            Some(T::Identifier)
                if allow_var
                    && self.level.supports_var()
                    && self.nth_ident(0, "var")
                    && self.nth_at(1, T::Identifier) =>
            {
                self.bump_as(T::VarKeyword);
            }
            Some(T::Identifier) => self.code_reference(true),
            _ => self.error("type expected"),
        }
        self.array_dims();
        self.eat(T::Ellipsis);
        self.finish_node();
    }

    /// `[]` pairs.
    pub(super) fn array_dims(&mut self) {
        while self.at(T::LBracket) && self.nth_at(1, T::RBracket) {
            self.bump();
            self.bump();
        }
    }

    /// `JAVA_CODE_REFERENCE`, nested left to right for qualified names.
    ///
    /// Stops before a `.` that is not followed by an identifier, which
    /// leaves `.*` of on-demand imports to the caller.
    pub(super) fn code_reference(&mut self, type_args: bool) {
        let cp = self.checkpoint();
        self.start(T::JavaCodeReference);
        self.reference_segment(type_args);
        self.finish_node();
        while self.at(T::Dot)
            && (self.nth_at(1, T::Identifier)
                || (self.nth_at(1, T::At) && !self.nth_at(2, T::InterfaceKeyword)))
        {
            self.start_at(cp, T::JavaCodeReference);
            self.bump();
            self.reference_segment(type_args);
            self.finish_node();
        }
    }

    fn reference_segment(&mut self, type_args: bool) {
        while self.at(T::At) {
            self.annotation();
        }
        self.expect(T::Identifier, "identifier");
        self.start(T::ReferenceParameterList);
        if type_args && self.at(T::Lt) {
            self.type_arguments();
        }
        self.finish_node();
    }

    /// `< type, ... >` or the diamond `<>`, inside an open parameter list.
    pub(super) fn type_arguments(&mut self) {
        self.bump();
        if self.eat(T::Gt) {
            return;
        }
        loop {
            self.type_element(false);
            if !self.eat(T::Comma) {
                break;
            }
        }
        self.expect(T::Gt, "'>'");
    }

    /// `TYPE_PARAMETER_LIST`, always present on classes and methods.
    pub(super) fn type_parameter_list(&mut self) {
        self.start(T::TypeParameterList);
        if self.eat(T::Lt) {
            loop {
                self.type_parameter();
                if !self.eat(T::Comma) {
                    break;
                }
            }
            self.expect(T::Gt, "'>'");
        }
        self.finish_node();
    }

    fn type_parameter(&mut self) {
        self.start(T::TypeParameter);
        while self.at(T::At) {
            self.annotation();
        }
        self.expect(T::Identifier, "type parameter name");
        self.start(T::ExtendsBoundList);
        if self.eat(T::ExtendsKeyword) {
            loop {
                self.code_reference(true);
                if !self.eat(T::And) {
                    break;
                }
            }
        }
        self.finish_node();
        self.finish_node();
    }

    /// A reference list node of `kind`; `keyword` introduces the entries.
    ///
    /// The node is emitted (empty) even without the keyword, except for
    /// `permits` which only appears when written.
    pub(super) fn reference_list(&mut self, kind: ElementType, keyword: ElementType) {
        self.start(kind);
        if self.eat(keyword) {
            self.reference_list_entries();
        }
        self.finish_node();
    }

    pub(super) fn reference_list_entries(&mut self) {
        loop {
            self.code_reference(true);
            if !self.eat(T::Comma) {
                break;
            }
        }
    }

    // ─── Lookahead ──────────────────────────────────────────────────────

    /// If a type starts at token `n`, the offset just past it.
    ///
    /// Recognizes primitive and qualified reference types with balanced
    /// type arguments and array dimensions. Purely a lookahead: nothing is
    /// consumed.
    pub(super) fn scan_type(&self, n: usize) -> Option<usize> {
        let mut k = n;
        match self.nth(k)? {
            kind if PRIMITIVES.contains(kind) => k += 1,
            T::Identifier => {
                k += 1;
                loop {
                    if self.nth_at(k, T::Lt) {
                        k = self.scan_type_arguments(k)?;
                    }
                    if self.nth_at(k, T::Dot) && self.nth_at(k + 1, T::Identifier) {
                        k += 2;
                        continue;
                    }
                    break;
                }
            }
            _ => return None,
        }
        while self.nth_at(k, T::LBracket) && self.nth_at(k + 1, T::RBracket) {
            k += 2;
        }
        Some(k)
    }

    fn scan_type_arguments(&self, start: usize) -> Option<usize> {
        let mut depth = 0usize;
        for k in start..start + MAX_TYPE_ARGS_SCAN {
            match self.nth(k)? {
                T::Lt => depth += 1,
                T::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(k + 1);
                    }
                }
                kind if TYPE_ARGUMENT_TOKENS.contains(kind) => {}
                _ => return None,
            }
        }
        None
    }

    /// A local variable declaration without modifiers starts here:
    /// `Type name` followed by `=`, `;`, `,`, `[` or `:`.
    pub(super) fn at_local_variable(&self, n: usize) -> bool {
        let Some(k) = self.scan_type(n) else {
            return false;
        };
        self.nth_at(k, T::Identifier)
            && matches!(
                self.nth(k + 1),
                Some(T::Eq | T::Semicolon | T::Comma | T::LBracket | T::Colon) | None
            )
    }
}
