//! Statements. Blocks below a member body are parsed deep; only member and
//! lambda bodies are lazy.

use jpsi_ir::ElementType;

use super::Parser;
use crate::recovery::{EXPR_START, STMT_RECOVERY};

use ElementType as T;

impl Parser<'_> {
    /// Statements up to the closing `}` of the enclosing block.
    pub(super) fn block_statements(&mut self) {
        while !self.at(T::RBrace) && !self.at_end() {
            self.progress("statement expected", STMT_RECOVERY, Parser::statement);
        }
    }

    /// `CODE_BLOCK` parsed in place.
    pub(super) fn code_block(&mut self) {
        self.start(T::CodeBlock);
        if self.expect(T::LBrace, "'{'") {
            self.block_statements();
            self.expect(T::RBrace, "'}'");
        }
        self.finish_node();
    }

    pub(super) fn statement(&mut self) {
        jpsi_ir::ensure_sufficient_stack(|| self.statement_inner());
    }

    fn statement_inner(&mut self) {
        match self.current() {
            Some(T::LBrace) => {
                self.start(T::BlockStatement);
                self.code_block();
                self.finish_node();
            }
            Some(T::Semicolon) => {
                self.start(T::EmptyStatement);
                self.bump();
                self.finish_node();
            }
            Some(T::IfKeyword) => self.if_statement(),
            Some(T::WhileKeyword) => {
                self.start(T::WhileStatement);
                self.bump();
                self.parenthesized_condition();
                self.statement();
                self.finish_node();
            }
            Some(T::DoKeyword) => {
                self.start(T::DoWhileStatement);
                self.bump();
                self.statement();
                self.expect(T::WhileKeyword, "'while'");
                self.parenthesized_condition();
                self.expect(T::Semicolon, "';'");
                self.finish_node();
            }
            Some(T::ForKeyword) => self.for_statement(),
            Some(T::ReturnKeyword) => self.simple_statement(T::ReturnStatement, true),
            Some(T::ThrowKeyword) => self.simple_statement(T::ThrowStatement, true),
            Some(T::BreakKeyword) => self.jump_statement(T::BreakStatement),
            Some(T::ContinueKeyword) => self.jump_statement(T::ContinueStatement),
            Some(T::SwitchKeyword) => {
                self.start(T::SwitchStatement);
                self.switch_rest();
                self.finish_node();
            }
            Some(T::SynchronizedKeyword) if self.nth_at(1, T::LParenth) => {
                self.start(T::SynchronizedStatement);
                self.bump();
                self.parenthesized_condition();
                self.code_block();
                self.finish_node();
            }
            Some(T::TryKeyword) => self.try_statement(),
            Some(T::AssertKeyword) => {
                self.start(T::AssertStatement);
                self.bump();
                self.expression();
                if self.eat(T::Colon) {
                    self.expression();
                }
                self.expect(T::Semicolon, "';'");
                self.finish_node();
            }
            Some(T::Identifier) if self.at_yield() => {
                self.start(T::YieldStatement);
                self.bump_as(T::YieldKeyword);
                self.expression();
                self.expect(T::Semicolon, "';'");
                self.finish_node();
            }
            Some(T::Identifier) if self.nth_at(1, T::Colon) => {
                self.start(T::LabeledStatement);
                self.bump();
                self.bump();
                self.statement();
                self.finish_node();
            }
            // After a stray `.` the keyword is a broken class literal.
            Some(T::ClassKeyword | T::InterfaceKeyword | T::EnumKeyword)
                if self.previous() == Some(T::Dot) =>
            {
                self.error_bump("statement expected");
            }
            Some(T::ClassKeyword | T::InterfaceKeyword | T::EnumKeyword)
            | Some(T::FinalKeyword | T::AbstractKeyword | T::StaticKeyword | T::At) => {
                self.declaration_statement(true);
            }
            Some(T::Identifier) if self.nth_record_start(0) => self.declaration_statement(true),
            Some(T::Identifier) if self.nth_sealed(0) || self.nth_non_sealed(0) => {
                self.declaration_statement(true);
            }
            _ if self.at_local_variable(0) => self.declaration_statement(true),
            _ if !self.at_set(EXPR_START) => self.error_bump("statement expected"),
            _ => {
                self.start(T::ExpressionStatement);
                self.expression();
                self.expect(T::Semicolon, "';'");
                self.finish_node();
            }
        }
    }

    /// `yield` as a statement keyword (not `yield = 1` or `yield(...)`).
    fn at_yield(&self) -> bool {
        self.level.supports_switch_expressions()
            && self.nth_ident(0, "yield")
            && !matches!(
                self.nth(1),
                Some(
                    T::Eq
                        | T::LParenth
                        | T::Dot
                        | T::LBracket
                        | T::PlusPlus
                        | T::MinusMinus
                        | T::Semicolon
                ) | None
            )
            && !self.nth(1).is_some_and(ElementType::is_assignment_operator)
    }

    /// `DECLARATION_STATEMENT` holding a local class or local variables.
    pub(super) fn declaration_statement(&mut self, terminated: bool) {
        let outer = self.decl_checkpoint();
        self.start_at(outer, T::DeclarationStatement);
        let cp = self.builder.checkpoint();
        self.modifier_list();
        if self.at_class_keyword() {
            self.class_rest(cp);
        } else {
            self.start_at(cp, T::LocalVariable);
            self.type_element(true);
            self.variable_declarators(T::LocalVariable, terminated);
        }
        self.finish_node();
    }

    fn if_statement(&mut self) {
        self.start(T::IfStatement);
        self.bump();
        self.parenthesized_condition();
        self.statement();
        if self.eat(T::ElseKeyword) {
            self.statement();
        }
        self.finish_node();
    }

    /// `( expr )` directly inside the enclosing statement.
    fn parenthesized_condition(&mut self) {
        if self.expect(T::LParenth, "'('") {
            self.expression();
            self.expect(T::RParenth, "')'");
        }
    }

    fn simple_statement(&mut self, kind: ElementType, optional_value: bool) {
        self.start(kind);
        self.bump();
        if !(optional_value && self.at(T::Semicolon)) {
            self.expression();
        }
        self.expect(T::Semicolon, "';'");
        self.finish_node();
    }

    fn jump_statement(&mut self, kind: ElementType) {
        self.start(kind);
        self.bump();
        self.eat(T::Identifier);
        self.expect(T::Semicolon, "';'");
        self.finish_node();
    }

    fn for_statement(&mut self) {
        let cp = self.checkpoint();
        self.bump();
        if !self.expect(T::LParenth, "'('") {
            self.start_at(cp, T::ForStatement);
            self.finish_node();
            return;
        }
        if self.at_foreach() {
            self.start_at(cp, T::ForeachStatement);
            self.single_parameter(true);
            self.expect(T::Colon, "':'");
            self.expression();
        } else {
            self.start_at(cp, T::ForStatement);
            if !self.at(T::Semicolon) {
                if self.at_local_declaration() {
                    self.declaration_statement(false);
                } else {
                    self.expression_statements();
                }
            }
            self.expect(T::Semicolon, "';'");
            if !self.at(T::Semicolon) {
                self.expression();
            }
            self.expect(T::Semicolon, "';'");
            if !self.at(T::RParenth) {
                self.expression_statements();
            }
        }
        self.expect(T::RParenth, "')'");
        self.statement();
        self.finish_node();
    }

    /// `[final] [@A] Type name :` after `for (`.
    fn at_foreach(&self) -> bool {
        let mut n = 0;
        while self.nth_at(n, T::FinalKeyword) || self.nth_at(n, T::At) {
            n += if self.nth_at(n, T::At) { 2 } else { 1 };
        }
        self.scan_type(n)
            .is_some_and(|k| self.nth_at(k, T::Identifier) && self.nth_at(k + 1, T::Colon))
    }

    fn at_local_declaration(&self) -> bool {
        self.at(T::FinalKeyword) || self.at(T::At) || self.at_local_variable(0)
    }

    /// For-loop init or update: one expression statement, or several
    /// wrapped in an expression list.
    fn expression_statements(&mut self) {
        let cp = self.checkpoint();
        self.start(T::ExpressionStatement);
        self.expression();
        self.finish_node();
        if self.at(T::Comma) {
            self.start_at(cp, T::ExpressionList);
            while self.eat(T::Comma) {
                self.start(T::ExpressionStatement);
                self.expression();
                self.finish_node();
            }
            self.finish_node();
        }
    }

    // ─── try ────────────────────────────────────────────────────────────

    fn try_statement(&mut self) {
        self.start(T::TryStatement);
        self.bump();
        if self.at(T::LParenth) {
            self.resource_list();
        }
        self.code_block();
        while self.at(T::CatchKeyword) {
            self.start(T::CatchSection);
            self.bump();
            if self.expect(T::LParenth, "'('") {
                self.catch_parameter();
                self.expect(T::RParenth, "')'");
            }
            self.code_block();
            self.finish_node();
        }
        if self.eat(T::FinallyKeyword) {
            self.code_block();
        }
        self.finish_node();
    }

    fn resource_list(&mut self) {
        self.start(T::ResourceList);
        self.bump();
        while !self.at(T::RParenth) && !self.at_end() {
            if self.at_local_declaration() {
                self.start(T::ResourceVariable);
                self.modifier_list();
                self.type_element(true);
                self.expect(T::Identifier, "resource name");
                if self.expect(T::Eq, "'='") {
                    self.expression();
                }
                self.finish_node();
            } else {
                self.expression();
            }
            if !self.eat(T::Semicolon) {
                break;
            }
        }
        self.expect(T::RParenth, "')'");
        self.finish_node();
    }

    /// `final A | B e`: union alternatives nest inside one type element.
    fn catch_parameter(&mut self) {
        self.start(T::Parameter);
        self.modifier_list();
        let cp = self.checkpoint();
        self.type_element(false);
        if self.at(T::Or) {
            self.start_at(cp, T::TypeElement);
            while self.eat(T::Or) {
                self.type_element(false);
            }
            self.finish_node();
        }
        self.expect(T::Identifier, "parameter name");
        self.finish_node();
    }

    // ─── switch ─────────────────────────────────────────────────────────

    /// `switch ( expr ) { ... }` inside an open statement or expression node.
    pub(super) fn switch_rest(&mut self) {
        self.bump();
        self.parenthesized_condition();
        self.start(T::CodeBlock);
        if self.expect(T::LBrace, "'{'") {
            while !self.at(T::RBrace) && !self.at_end() {
                if self.at(T::CaseKeyword) || self.at(T::DefaultKeyword) {
                    self.switch_label();
                } else {
                    self.progress("statement expected", STMT_RECOVERY, Parser::statement);
                }
            }
            self.expect(T::RBrace, "'}'");
        }
        self.finish_node();
    }

    fn switch_label(&mut self) {
        let cp = self.checkpoint();
        if self.eat(T::CaseKeyword) {
            let saved = std::mem::replace(&mut self.no_lambda, true);
            loop {
                if self.at(T::DefaultKeyword) {
                    self.bump();
                } else {
                    self.conditional_expression();
                }
                if !self.eat(T::Comma) {
                    break;
                }
            }
            self.no_lambda = saved;
        } else {
            self.bump();
        }

        if self.at(T::Arrow) {
            self.start_at(cp, T::SwitchLabeledRule);
            self.bump();
            self.gate(self.level.supports_switch_expressions(), "switch rules");
            match self.current() {
                Some(T::LBrace) => {
                    self.start(T::BlockStatement);
                    self.code_block();
                    self.finish_node();
                }
                Some(T::ThrowKeyword) => self.simple_statement(T::ThrowStatement, false),
                _ => {
                    self.start(T::ExpressionStatement);
                    self.expression();
                    self.expect(T::Semicolon, "';'");
                    self.finish_node();
                }
            }
            self.finish_node();
        } else {
            self.start_at(cp, T::SwitchLabelStatement);
            self.expect(T::Colon, "':' or '->'");
            self.finish_node();
        }
    }
}
