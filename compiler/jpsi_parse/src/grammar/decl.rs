//! Compilation units, class declarations and members.

use jpsi_ir::ElementType;
use jpsi_tree::Checkpoint;

use super::Parser;
use crate::recovery::{DECL_RECOVERY, MEMBER_RECOVERY, MODIFIERS, PRIMITIVES};

use ElementType as T;

/// What kind of class body is being parsed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum BodyKind {
    Class,
    Enum,
    Record,
    Annotation,
}

impl Parser<'_> {
    pub(super) fn compilation_unit(&mut self) {
        if self.at(T::PackageKeyword) {
            self.start(T::PackageStatement);
            self.bump();
            self.code_reference(false);
            self.expect(T::Semicolon, "';'");
            self.finish_node();
        }

        // A doc comment before the first class belongs to the class.
        self.flush_trivia_before_doc();
        self.builder.start_node(T::ImportList);
        while self.at(T::ImportKeyword) || self.at(T::Semicolon) {
            if self.at(T::Semicolon) {
                self.bump();
            } else {
                self.import_statement();
            }
        }
        self.finish_node();

        while !self.at_end() {
            if self.eat(T::Semicolon) {
                continue;
            }
            if self.at_declaration_start() {
                self.progress("class or interface expected", MEMBER_RECOVERY, |p| {
                    let cp = p.decl_checkpoint();
                    p.modifier_list();
                    if p.at_class_keyword() {
                        p.class_rest(cp);
                    } else {
                        p.builder
                            .start_error_at(cp, "class or interface expected");
                        p.finish_node();
                    }
                });
            } else {
                self.error_until("class or interface expected", DECL_RECOVERY);
            }
        }
    }

    fn import_statement(&mut self) {
        let is_static = self.nth_at(1, T::StaticKeyword);
        self.start(if is_static {
            T::ImportStaticStatement
        } else {
            T::ImportStatement
        });
        self.bump();
        if is_static {
            self.bump();
        }
        self.code_reference(false);
        if self.at(T::Dot) && self.nth_at(1, T::Asterisk) {
            self.bump();
            self.bump();
        }
        self.expect(T::Semicolon, "';'");
        self.finish_node();
    }

    /// Modifiers, annotations, or a class keyword.
    fn at_declaration_start(&self) -> bool {
        self.at_set(MODIFIERS)
            || self.at(T::At)
            || self.at_class_keyword()
            || self.nth_sealed(0)
            || self.nth_non_sealed(0)
    }

    /// `class`, `interface`, `enum`, `@interface` or `record Name`.
    pub(super) fn at_class_keyword(&self) -> bool {
        matches!(
            self.current(),
            Some(T::ClassKeyword | T::InterfaceKeyword | T::EnumKeyword)
        ) || (self.at(T::At) && self.nth_at(1, T::InterfaceKeyword))
            || self.nth_record_start(0)
    }

    // ─── Modifiers and annotations ──────────────────────────────────────

    /// `MODIFIER_LIST`, always emitted (possibly empty).
    pub(super) fn modifier_list(&mut self) {
        self.start(T::ModifierList);
        loop {
            match self.current() {
                Some(k) if MODIFIERS.contains(k) => self.bump(),
                Some(T::At) if !self.nth_at(1, T::InterfaceKeyword) => self.annotation(),
                Some(T::Identifier) if self.nth_sealed(0) => self.bump_as(T::SealedKeyword),
                Some(T::Identifier) if self.nth_non_sealed(0) => {
                    self.bump_fused(T::NonSealedKeyword, 3);
                }
                _ => break,
            }
        }
        self.finish_node();
    }

    /// `@Name(args)`; the parameter list node is always present.
    pub(super) fn annotation(&mut self) {
        self.start(T::Annotation);
        self.bump();
        self.code_reference(false);
        self.start(T::AnnotationParameterList);
        if self.eat(T::LParenth) {
            if !self.at(T::RParenth) {
                loop {
                    self.name_value_pair();
                    if !self.eat(T::Comma) {
                        break;
                    }
                }
            }
            self.expect(T::RParenth, "')'");
        }
        self.finish_node();
        self.finish_node();
    }

    fn name_value_pair(&mut self) {
        self.start(T::NameValuePair);
        if self.at(T::Identifier) && self.nth_at(1, T::Eq) {
            self.bump();
            self.bump();
        }
        self.annotation_value();
        self.finish_node();
    }

    pub(super) fn annotation_value(&mut self) {
        jpsi_ir::ensure_sufficient_stack(|| self.annotation_value_inner());
    }

    fn annotation_value_inner(&mut self) {
        if self.at(T::At) {
            self.annotation();
        } else if self.at(T::LBrace) {
            self.start(T::AnnotationArrayInitializer);
            self.bump();
            while !self.at(T::RBrace) && !self.at_end() {
                self.annotation_value();
                if !self.eat(T::Comma) {
                    break;
                }
            }
            self.expect(T::RBrace, "'}'");
            self.finish_node();
        } else {
            self.conditional_expression();
        }
    }

    // ─── Classes ────────────────────────────────────────────────────────

    /// The rest of a class after its modifier list, wrapped from `cp`.
    pub(super) fn class_rest(&mut self, cp: Checkpoint) {
        self.start_at(cp, T::Class);
        let body = match self.current() {
            Some(T::At) => {
                self.bump();
                self.bump();
                BodyKind::Annotation
            }
            Some(T::EnumKeyword) => {
                self.bump();
                BodyKind::Enum
            }
            Some(T::Identifier) => {
                self.bump_as(T::RecordKeyword);
                BodyKind::Record
            }
            _ => {
                self.bump();
                BodyKind::Class
            }
        };
        self.expect(T::Identifier, "class name");
        self.type_parameter_list();
        if body == BodyKind::Record {
            self.record_header();
        }
        self.reference_list(T::ExtendsList, T::ExtendsKeyword);
        self.reference_list(T::ImplementsList, T::ImplementsKeyword);
        if self.level.supports_sealed() && self.nth_ident(0, "permits") {
            self.start(T::PermitsList);
            self.bump_as(T::PermitsKeyword);
            self.reference_list_entries();
            self.finish_node();
        }
        if self.at(T::LBrace) {
            self.class_body(body);
        } else {
            self.error("'{' expected");
        }
        self.finish_node();
    }

    fn record_header(&mut self) {
        self.start(T::RecordHeader);
        if self.expect(T::LParenth, "'('") {
            if !self.at(T::RParenth) {
                loop {
                    let cp = self.decl_checkpoint();
                    self.start_at(cp, T::RecordComponent);
                    self.modifier_list();
                    self.type_element(false);
                    self.expect(T::Identifier, "component name");
                    self.finish_node();
                    if !self.eat(T::Comma) {
                        break;
                    }
                }
            }
            self.expect(T::RParenth, "')'");
        }
        self.finish_node();
    }

    /// `{ members }` at the current `{`.
    pub(super) fn class_body(&mut self, body: BodyKind) {
        self.bump();
        if body == BodyKind::Enum {
            self.enum_constants();
        }
        while !self.at(T::RBrace) && !self.at_end() {
            self.progress("member declaration expected", MEMBER_RECOVERY, |p| {
                jpsi_ir::ensure_sufficient_stack(|| p.member(body));
            });
        }
        self.expect(T::RBrace, "'}'");
    }

    fn enum_constants(&mut self) {
        while self.at(T::Identifier) || (self.at(T::At) && !self.nth_at(1, T::InterfaceKeyword)) {
            let cp = self.decl_checkpoint();
            self.start_at(cp, T::EnumConstant);
            self.modifier_list();
            self.expect(T::Identifier, "enum constant name");
            if self.at(T::LParenth) {
                self.argument_list();
            }
            if self.at(T::LBrace) {
                self.start(T::EnumConstantInitializer);
                self.class_body(BodyKind::Class);
                self.finish_node();
            }
            self.finish_node();
            if !self.eat(T::Comma) {
                break;
            }
        }
        self.eat(T::Semicolon);
    }

    // ─── Members ────────────────────────────────────────────────────────

    fn member(&mut self, body: BodyKind) {
        if self.eat(T::Semicolon) {
            return;
        }
        let cp = self.decl_checkpoint();
        self.modifier_list();

        if self.at_class_keyword() {
            self.class_rest(cp);
            return;
        }
        if self.at(T::LBrace) {
            self.start_at(cp, T::ClassInitializer);
            self.lazy_block();
            self.finish_node();
            return;
        }

        let method_kind = if body == BodyKind::Annotation {
            T::AnnotationMethod
        } else {
            T::Method
        };
        let has_type_params = self.at(T::Lt);
        if self.at(T::Identifier) && self.nth_at(1, T::LParenth) {
            self.start_at(cp, method_kind);
            self.type_parameter_list();
            self.method_rest(method_kind);
            return;
        }
        if body == BodyKind::Record && self.at(T::Identifier) && self.nth_at(1, T::LBrace) {
            // Compact canonical constructor.
            self.start_at(cp, T::Method);
            self.type_parameter_list();
            self.bump();
            self.start(T::ThrowsList);
            self.finish_node();
            self.lazy_block();
            self.finish_node();
            return;
        }
        if has_type_params {
            self.start_at(cp, method_kind);
            self.type_parameter_list();
            if !(self.at(T::Identifier) && self.nth_at(1, T::LParenth)) {
                self.type_element(false);
            }
            self.method_rest(method_kind);
            return;
        }
        if !self.at(T::Identifier) && !self.at_set(PRIMITIVES) {
            self.builder.start_error_at(cp, "identifier or type expected");
            self.finish_node();
            return;
        }

        let is_method = self
            .scan_type(0)
            .is_some_and(|k| self.nth_at(k, T::Identifier) && self.nth_at(k + 1, T::LParenth));
        if is_method {
            self.start_at(cp, method_kind);
            self.type_parameter_list();
            self.type_element(false);
            self.method_rest(method_kind);
            return;
        }
        self.start_at(cp, T::Field);
        self.type_element(false);
        self.variable_declarators(T::Field, true);
    }

    /// Name, parameters, dims, throws and body of a method.
    fn method_rest(&mut self, kind: ElementType) {
        self.expect(T::Identifier, "method name");
        self.parameter_list();
        self.array_dims();
        self.start(T::ThrowsList);
        if self.eat(T::ThrowsKeyword) {
            self.reference_list_entries();
        }
        self.finish_node();
        if kind == T::AnnotationMethod && self.eat(T::DefaultKeyword) {
            self.annotation_value();
        }
        match self.current() {
            Some(T::LBrace) => self.lazy_block(),
            Some(T::Semicolon) => self.bump(),
            _ => self.error("'{' or ';' expected"),
        }
        self.finish_node();
    }

    /// Declarators after a type: `a = 1, b[], c;`.
    ///
    /// The first declarator's node is already open and owns the modifier
    /// list and type; every further declarator gets its own node holding
    /// only its name, dims and initializer. The `;` (when `terminated`)
    /// goes into the last node.
    pub(super) fn variable_declarators(&mut self, kind: ElementType, terminated: bool) {
        loop {
            self.expect(T::Identifier, "variable name");
            self.array_dims();
            if self.eat(T::Eq) {
                self.variable_initializer();
            }
            if self.at(T::Comma) {
                self.bump();
                self.finish_node();
                self.start(kind);
                continue;
            }
            if terminated {
                self.expect(T::Semicolon, "';'");
            }
            self.finish_node();
            break;
        }
    }

    pub(super) fn variable_initializer(&mut self) {
        if self.at(T::LBrace) {
            self.array_initializer();
        } else {
            self.expression();
        }
    }

    // ─── Parameters ─────────────────────────────────────────────────────

    /// `( params )`, including a leading receiver parameter.
    pub(super) fn parameter_list(&mut self) {
        self.start(T::ParameterList);
        if self.expect(T::LParenth, "'('") {
            if !self.at(T::RParenth) {
                loop {
                    self.parameter();
                    if !self.eat(T::Comma) {
                        break;
                    }
                }
            }
            self.expect(T::RParenth, "')'");
        }
        self.finish_node();
    }

    fn parameter(&mut self) {
        let cp = self.checkpoint();
        self.modifier_list();
        self.type_element(false);
        if self.at(T::ThisKeyword)
            || (self.at(T::Identifier) && self.nth_at(1, T::Dot) && self.nth_at(2, T::ThisKeyword))
        {
            self.start_at(cp, T::ReceiverParameter);
            if self.at(T::Identifier) {
                self.bump();
                self.bump();
            }
            self.bump();
            self.finish_node();
            return;
        }
        self.start_at(cp, T::Parameter);
        self.expect(T::Identifier, "parameter name");
        self.array_dims();
        self.finish_node();
    }

    /// A parameter of a lambda, catch clause or foreach loop.
    pub(super) fn single_parameter(&mut self, with_type: bool) {
        self.start(T::Parameter);
        self.modifier_list();
        if with_type {
            self.type_element(true);
        }
        self.expect(T::Identifier, "parameter name");
        self.array_dims();
        self.finish_node();
    }
}
