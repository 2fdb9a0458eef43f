//! Expressions, by precedence climbing.
//!
//! Left-recursive forms (binary operators, selectors, calls) are built by
//! wrapping a checkpoint, so `a.b(c)[d]` nests outward without backtracking.

use jpsi_ir::ElementType;
use jpsi_tree::Checkpoint;

use super::decl::BodyKind;
use super::Parser;
use crate::recovery::{CAST_OPERAND_START, EXPR_FOLLOW, LITERALS, PRIMITIVES};

use ElementType as T;

/// Parenthesized lookahead gives up after this many tokens.
const MAX_PAREN_SCAN: usize = 512;

impl Parser<'_> {
    pub(super) fn expression(&mut self) {
        jpsi_ir::ensure_sufficient_stack(|| self.assignment());
    }

    fn assignment(&mut self) {
        let cp = self.checkpoint();
        self.conditional_expression();
        if let Some((op, count)) = self.assignment_operator() {
            self.start_at(cp, T::AssignmentExpression);
            self.bump_fused(op, count);
            self.expression();
            self.finish_node();
        }
    }

    fn assignment_operator(&self) -> Option<(ElementType, usize)> {
        match self.current()? {
            T::Gt => {
                let (kind, count) = self.gt_operator();
                kind.is_assignment_operator().then_some((kind, count))
            }
            kind if kind.is_assignment_operator() => Some((kind, 1)),
            _ => None,
        }
    }

    /// `cond ? a : b`, or any lower-precedence binary expression.
    pub(super) fn conditional_expression(&mut self) {
        let cp = self.checkpoint();
        self.binary(1);
        if self.at(T::Quest) {
            self.start_at(cp, T::ConditionalExpression);
            self.bump();
            self.expression();
            self.expect(T::Colon, "':'");
            self.expression();
            self.finish_node();
        }
    }

    // ─── Binary operators ───────────────────────────────────────────────

    /// Operator at the cursor: kind, token count and binding power.
    fn binary_operator(&self) -> Option<(ElementType, usize, u8)> {
        let current = self.current()?;
        let (kind, count) = if current == T::Gt {
            self.gt_operator()
        } else {
            (current, 1)
        };
        let precedence = match kind {
            T::OrOr => 1,
            T::AndAnd => 2,
            T::Or => 3,
            T::Xor => 4,
            T::And => 5,
            T::EqEq | T::Ne => 6,
            T::Lt | T::Gt | T::Le | T::Ge | T::InstanceofKeyword => 7,
            T::LtLt | T::GtGt | T::GtGtGt => 8,
            T::Plus | T::Minus => 9,
            T::Asterisk | T::Div | T::Perc => 10,
            _ => return None,
        };
        Some((kind, count, precedence))
    }

    fn binary(&mut self, min_precedence: u8) {
        let cp = self.checkpoint();
        self.unary();
        while let Some((op, count, precedence)) = self.binary_operator() {
            if precedence < min_precedence {
                break;
            }
            if op == T::InstanceofKeyword {
                self.start_at(cp, T::InstanceofExpression);
                self.bump();
                self.eat(T::FinalKeyword);
                self.type_element(false);
                // Pattern binding variable.
                self.eat(T::Identifier);
                self.finish_node();
                continue;
            }
            self.start_at(cp, T::BinaryExpression);
            self.bump_fused(op, count);
            self.binary(precedence + 1);
            self.finish_node();
        }
    }

    // ─── Unary, casts, postfix ──────────────────────────────────────────

    fn unary(&mut self) {
        match self.current() {
            Some(T::Plus | T::Minus | T::PlusPlus | T::MinusMinus | T::Excl | T::Tilde) => {
                self.start(T::PrefixExpression);
                self.bump();
                jpsi_ir::ensure_sufficient_stack(|| self.unary());
                self.finish_node();
            }
            Some(T::LParenth) if self.at_cast() => {
                self.start(T::TypeCastExpression);
                self.bump();
                self.type_element(false);
                while self.eat(T::And) {
                    self.type_element(false);
                }
                self.expect(T::RParenth, "')'");
                jpsi_ir::ensure_sufficient_stack(|| self.unary());
                self.finish_node();
            }
            _ => self.postfix(),
        }
    }

    /// `( Type )` followed by something a cast can apply to.
    fn at_cast(&self) -> bool {
        let Some(mut k) = self.scan_type(1) else {
            return false;
        };
        while self.nth_at(k, T::And) {
            match self.scan_type(k + 1) {
                Some(next) => k = next,
                None => return false,
            }
        }
        if !self.nth_at(k, T::RParenth) {
            return false;
        }
        if self.nth_in(1, PRIMITIVES) {
            return true;
        }
        self.nth_in(k + 1, CAST_OPERAND_START)
    }

    fn postfix(&mut self) {
        let cp = self.checkpoint();
        if !self.primary(cp) {
            return;
        }
        self.selectors(cp);
    }

    // ─── Primaries ──────────────────────────────────────────────────────

    /// Returns `false` when no expression could be started.
    fn primary(&mut self, cp: Checkpoint) -> bool {
        let Some(current) = self.current() else {
            self.error("expression expected");
            return false;
        };
        match current {
            kind if LITERALS.contains(kind) => {
                self.start(T::LiteralExpression);
                self.bump();
                self.finish_node();
                if kind == T::TextBlockLiteral {
                    self.gate(self.level.supports_text_blocks(), "text blocks");
                }
            }
            T::Identifier | T::LParenth if self.at_lambda() => self.lambda(),
            kind if PRIMITIVES.contains(kind) || self.at_array_type_expression() => {
                self.type_element(false);
                self.type_member_access(cp);
            }
            T::Identifier => {
                self.start(T::ReferenceExpression);
                self.bump();
                self.finish_node();
                self.call_suffix(cp);
            }
            T::ThisKeyword | T::SuperKeyword if self.nth_at(1, T::LParenth) => {
                self.start(T::ReferenceExpression);
                self.bump();
                self.finish_node();
                self.call_suffix(cp);
            }
            T::ThisKeyword => {
                self.start(T::ThisExpression);
                self.bump();
                self.finish_node();
            }
            T::SuperKeyword => {
                self.start(T::SuperExpression);
                self.bump();
                self.finish_node();
            }
            T::LParenth => {
                self.start(T::ParenthesizedExpression);
                self.bump();
                let saved = std::mem::replace(&mut self.no_lambda, false);
                self.expression();
                self.no_lambda = saved;
                self.expect(T::RParenth, "')'");
                self.finish_node();
            }
            T::NewKeyword => {
                self.start(T::NewExpression);
                self.new_rest();
                self.finish_node();
            }
            T::SwitchKeyword => {
                self.start(T::SwitchExpression);
                self.switch_rest();
                self.finish_node();
                self.gate(
                    self.level.supports_switch_expressions(),
                    "switch expressions",
                );
            }
            kind if EXPR_FOLLOW.contains(kind) => {
                self.error("expression expected");
                return false;
            }
            _ => {
                self.error_bump("expression expected");
                return false;
            }
        }
        true
    }

    /// `String[]::new`, `List<String>::new` or `int[].class`: a type that
    /// cannot be read as an expression, used before `::` or `.class`.
    fn at_array_type_expression(&self) -> bool {
        if !self.at(T::Identifier) {
            return false;
        }
        let Some(k) = self.scan_type(0) else {
            return false;
        };
        let complex = k > 0 && matches!(self.nth(k - 1), Some(T::RBracket | T::Gt));
        complex
            && (self.nth_at(k, T::DoubleColon)
                || (self.nth_at(k, T::Dot) && self.nth_at(k + 1, T::ClassKeyword)))
    }

    /// `::name` or `.class` after a type in expression position.
    fn type_member_access(&mut self, cp: Checkpoint) {
        if self.at(T::DoubleColon) {
            self.start_at(cp, T::MethodRefExpression);
            self.bump();
            self.method_ref_tail();
            self.finish_node();
        } else if self.at(T::Dot) && self.nth_at(1, T::ClassKeyword) {
            self.start_at(cp, T::ClassObjectAccessExpression);
            self.bump();
            self.bump();
            self.finish_node();
        } else {
            self.error("'.class' or '::' expected");
        }
    }

    fn call_suffix(&mut self, cp: Checkpoint) {
        if self.at(T::LParenth) {
            self.start_at(cp, T::MethodCallExpression);
            self.argument_list();
            self.finish_node();
        }
    }

    /// Member access, calls, indexing, method references and postfix
    /// operators applied to the expression started at `cp`.
    fn selectors(&mut self, cp: Checkpoint) {
        loop {
            match self.current() {
                Some(T::Dot) => match self.nth(1) {
                    Some(T::Identifier) => {
                        self.start_at(cp, T::ReferenceExpression);
                        self.bump();
                        self.bump();
                        self.finish_node();
                        self.call_suffix(cp);
                    }
                    Some(T::Lt) => {
                        self.start_at(cp, T::ReferenceExpression);
                        self.bump();
                        self.start(T::ReferenceParameterList);
                        self.type_arguments();
                        self.finish_node();
                        self.expect(T::Identifier, "method name");
                        self.finish_node();
                        self.call_suffix(cp);
                    }
                    Some(T::ClassKeyword) => {
                        self.start_at(cp, T::ClassObjectAccessExpression);
                        self.bump();
                        self.bump();
                        self.finish_node();
                    }
                    Some(T::ThisKeyword) => {
                        self.start_at(cp, T::ThisExpression);
                        self.bump();
                        self.bump();
                        self.finish_node();
                    }
                    Some(T::SuperKeyword) => {
                        self.start_at(cp, T::SuperExpression);
                        self.bump();
                        self.bump();
                        self.finish_node();
                    }
                    Some(T::NewKeyword) => {
                        self.start_at(cp, T::NewExpression);
                        self.bump();
                        self.new_rest();
                        self.finish_node();
                    }
                    _ => {
                        self.start_at(cp, T::ReferenceExpression);
                        self.bump();
                        self.error("identifier expected");
                        self.finish_node();
                        return;
                    }
                },
                Some(T::LBracket) => {
                    self.start_at(cp, T::ArrayAccessExpression);
                    self.bump();
                    self.expression();
                    self.expect(T::RBracket, "']'");
                    self.finish_node();
                }
                Some(T::DoubleColon) => {
                    self.start_at(cp, T::MethodRefExpression);
                    self.bump();
                    self.method_ref_tail();
                    self.finish_node();
                }
                Some(T::PlusPlus | T::MinusMinus) => {
                    self.start_at(cp, T::PostfixExpression);
                    self.bump();
                    self.finish_node();
                }
                _ => return,
            }
        }
    }

    fn method_ref_tail(&mut self) {
        if self.at(T::Lt) {
            self.start(T::ReferenceParameterList);
            self.type_arguments();
            self.finish_node();
        }
        if !self.eat(T::NewKeyword) {
            self.expect(T::Identifier, "method name");
        }
    }

    // ─── new ────────────────────────────────────────────────────────────

    /// After an open `NEW_EXPRESSION`: `new` and what it creates.
    fn new_rest(&mut self) {
        self.bump();
        if self.at(T::Lt) {
            self.start(T::ReferenceParameterList);
            self.type_arguments();
            self.finish_node();
        }
        while self.at(T::At) {
            self.annotation();
        }
        if self.at_set(PRIMITIVES) {
            self.bump();
            self.array_creation();
            return;
        }
        let cp = self.checkpoint();
        self.code_reference(true);
        match self.current() {
            Some(T::LBracket) => self.array_creation(),
            Some(T::LParenth) => {
                self.argument_list();
                if self.at(T::LBrace) {
                    self.start_at(cp, T::AnonymousClass);
                    self.class_body(BodyKind::Class);
                    self.finish_node();
                }
            }
            _ => self.error("'(' or '[' expected"),
        }
    }

    fn array_creation(&mut self) {
        if !self.at(T::LBracket) {
            self.error("'[' expected");
            return;
        }
        while self.eat(T::LBracket) {
            if !self.at(T::RBracket) {
                self.expression();
            }
            self.expect(T::RBracket, "']'");
        }
        if self.at(T::LBrace) {
            self.array_initializer();
        }
    }

    /// `{ a, b, }` as `ARRAY_INITIALIZER_EXPRESSION`.
    pub(super) fn array_initializer(&mut self) {
        self.start(T::ArrayInitializerExpression);
        self.bump();
        while !self.at(T::RBrace) && !self.at_end() {
            self.variable_initializer();
            if !self.eat(T::Comma) {
                break;
            }
        }
        self.expect(T::RBrace, "'}'");
        self.finish_node();
    }

    /// `( args )` as `EXPRESSION_LIST`.
    pub(super) fn argument_list(&mut self) {
        self.start(T::ExpressionList);
        self.bump();
        let saved = std::mem::replace(&mut self.no_lambda, false);
        if !self.at(T::RParenth) {
            loop {
                self.expression();
                if !self.eat(T::Comma) {
                    break;
                }
            }
        }
        self.no_lambda = saved;
        self.expect(T::RParenth, "')'");
        self.finish_node();
    }

    // ─── Lambdas ────────────────────────────────────────────────────────

    fn at_lambda(&self) -> bool {
        if self.no_lambda {
            return false;
        }
        match self.current() {
            Some(T::Identifier) => self.nth_at(1, T::Arrow),
            Some(T::LParenth) => self
                .matching_paren()
                .is_some_and(|k| self.nth_at(k + 1, T::Arrow)),
            _ => false,
        }
    }

    /// Offset of the `)` closing the `(` at the cursor.
    fn matching_paren(&self) -> Option<usize> {
        let mut depth = 0usize;
        for k in 0..MAX_PAREN_SCAN {
            match self.nth(k)? {
                T::LParenth => depth += 1,
                T::RParenth => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(k);
                    }
                }
                T::LBrace | T::RBrace | T::Semicolon => return None,
                _ => {}
            }
        }
        None
    }

    /// `params -> body`; a block body is a lazy region.
    fn lambda(&mut self) {
        self.start(T::LambdaExpression);
        self.start(T::ParameterList);
        if self.at(T::Identifier) {
            self.single_parameter(false);
        } else {
            self.bump();
            if !self.at(T::RParenth) {
                loop {
                    let inferred = self.at(T::Identifier)
                        && matches!(self.nth(1), Some(T::Comma | T::RParenth));
                    self.single_parameter(!inferred);
                    if !self.eat(T::Comma) {
                        break;
                    }
                }
            }
            self.expect(T::RParenth, "')'");
        }
        self.finish_node();
        self.expect(T::Arrow, "'->'");
        if self.at(T::LBrace) {
            self.lazy_block();
        } else {
            let saved = std::mem::replace(&mut self.no_lambda, false);
            self.expression();
            self.no_lambda = saved;
        }
        self.finish_node();
    }
}
