//! Structural child roles.
//!
//! A role names a child by what it means to its parent (the NAME of a
//! method, the CONDITION of an `if`) instead of by position. Lookup
//! dispatches on the parent's kind.

use jpsi_ir::ElementType;

use crate::syntax::{NodeId, SyntaxTree};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildRole {
    Name,
    Type,
    ModifierList,
    DocComment,
    ParameterList,
    MethodBody,
    Initializer,
    TypeParameterList,
    ExtendsList,
    ImplementsList,
    PermitsList,
    ThrowsList,
    RecordHeader,
    LBrace,
    RBrace,
    Condition,
    ThenBranch,
    ElseBranch,
    LoopBody,
    Operand,
    OperationSign,
    Qualifier,
    ArgumentList,
    ReferenceName,
    LOperand,
    ROperand,
}

impl SyntaxTree {
    /// Child of `parent` playing `role`, if any.
    pub fn find_child_by_role(&self, parent: NodeId, role: ChildRole) -> Option<NodeId> {
        use ElementType as T;
        let kind = self.kind(parent);
        match role {
            ChildRole::Name => match kind {
                T::JavaCodeReference | T::ReferenceExpression => {
                    self.find_child_by_role(parent, ChildRole::ReferenceName)
                }
                _ => self.first_child_of_kind(parent, T::Identifier),
            },
            ChildRole::Type => self.first_child_of_kind(parent, T::TypeElement),
            ChildRole::ModifierList => self.first_child_of_kind(parent, T::ModifierList),
            ChildRole::DocComment => self.first_child_of_kind(parent, T::DocComment),
            ChildRole::ParameterList => self.first_child_of_kind(parent, T::ParameterList),
            ChildRole::MethodBody => match kind {
                T::Method | T::ClassInitializer | T::LambdaExpression => {
                    self.first_child_of_kind(parent, T::CodeBlock)
                }
                _ => None,
            },
            ChildRole::Initializer => match kind {
                T::ClassInitializer => self.first_child_of_kind(parent, T::CodeBlock),
                T::AnnotationMethod => self.first_expression_after(parent, T::DefaultKeyword),
                _ => self.first_expression_after(parent, T::Eq),
            },
            ChildRole::TypeParameterList => self.first_child_of_kind(parent, T::TypeParameterList),
            ChildRole::ExtendsList => self.first_child_of_kind(parent, T::ExtendsList),
            ChildRole::ImplementsList => self.first_child_of_kind(parent, T::ImplementsList),
            ChildRole::PermitsList => self.first_child_of_kind(parent, T::PermitsList),
            ChildRole::ThrowsList => self.first_child_of_kind(parent, T::ThrowsList),
            ChildRole::RecordHeader => self.first_child_of_kind(parent, T::RecordHeader),
            ChildRole::LBrace => self.first_child_of_kind(parent, T::LBrace),
            ChildRole::RBrace => self.last_child_of_kind(parent, T::RBrace),
            ChildRole::Condition => match kind {
                T::ForStatement => self.first_expression_after(parent, T::Semicolon),
                T::IfStatement
                | T::WhileStatement
                | T::DoWhileStatement
                | T::ConditionalExpression
                | T::AssertStatement => self.nth_expression(parent, 0),
                _ => None,
            },
            ChildRole::ThenBranch => match kind {
                T::IfStatement => self.nth_statement(parent, 0),
                T::ConditionalExpression => self.nth_expression(parent, 1),
                _ => None,
            },
            ChildRole::ElseBranch => match kind {
                T::IfStatement => self.first_statement_after(parent, T::ElseKeyword),
                T::ConditionalExpression => self.nth_expression(parent, 2),
                _ => None,
            },
            ChildRole::LoopBody => match kind {
                T::DoWhileStatement => self.nth_statement(parent, 0),
                T::WhileStatement | T::ForStatement | T::ForeachStatement => {
                    self.first_statement_after(parent, T::RParenth)
                }
                _ => None,
            },
            ChildRole::Operand => match kind {
                T::PrefixExpression
                | T::PostfixExpression
                | T::ParenthesizedExpression
                | T::TypeCastExpression
                | T::InstanceofExpression => self.nth_expression(parent, 0),
                _ => None,
            },
            ChildRole::OperationSign => match kind {
                T::BinaryExpression
                | T::PrefixExpression
                | T::PostfixExpression
                | T::AssignmentExpression => self.children(parent).into_iter().find(|&c| {
                    let k = self.kind(c);
                    k.is_token() && !k.is_trivia()
                }),
                _ => None,
            },
            ChildRole::LOperand => match kind {
                T::BinaryExpression | T::AssignmentExpression => self.nth_expression(parent, 0),
                _ => None,
            },
            ChildRole::ROperand => match kind {
                T::BinaryExpression | T::AssignmentExpression => self.nth_expression(parent, 1),
                _ => None,
            },
            ChildRole::Qualifier => match kind {
                T::JavaCodeReference => self.first_child_of_kind(parent, T::JavaCodeReference),
                T::ReferenceExpression => {
                    let first = self.children(parent).into_iter().find(|&c| {
                        let k = self.kind(c);
                        k.is_expression() || k == T::JavaCodeReference
                    })?;
                    // Only a qualifier when followed by a dot.
                    self.first_child_of_kind(parent, T::Dot).map(|_| first)
                }
                T::MethodCallExpression => self.first_child_of_kind(parent, T::ReferenceExpression),
                _ => None,
            },
            ChildRole::ArgumentList => self.first_child_of_kind(parent, T::ExpressionList),
            ChildRole::ReferenceName => match kind {
                T::JavaCodeReference | T::ReferenceExpression => {
                    self.last_child_of_kind(parent, T::Identifier)
                }
                _ => None,
            },
        }
    }

    fn nth_expression(&self, parent: NodeId, n: usize) -> Option<NodeId> {
        self.children(parent)
            .into_iter()
            .filter(|&c| self.kind(c).is_expression())
            .nth(n)
    }

    fn nth_statement(&self, parent: NodeId, n: usize) -> Option<NodeId> {
        self.children(parent)
            .into_iter()
            .filter(|&c| self.kind(c).is_statement())
            .nth(n)
    }

    fn first_expression_after(&self, parent: NodeId, marker: ElementType) -> Option<NodeId> {
        self.children(parent)
            .into_iter()
            .skip_while(|&c| self.kind(c) != marker)
            .find(|&c| self.kind(c).is_expression())
    }

    fn first_statement_after(&self, parent: NodeId, marker: ElementType) -> Option<NodeId> {
        self.children(parent)
            .into_iter()
            .skip_while(|&c| self.kind(c) != marker)
            .find(|&c| self.kind(c).is_statement())
    }
}

#[cfg(test)]
mod tests;
