//! Double-dispatch visitors over PSI elements.
//!
//! [`walk`] visits every composite node below (and including) a start
//! element in pre-order, parsing collapsed bodies on the way. Each node is
//! dispatched to the `visit_*` method of its façade kind; every method
//! falls back to [`PsiVisitor::visit_element`], which continues into the
//! children. Returning [`WalkAction::SkipChildren`] skips a subtree (nested
//! classes or lambdas, say) and [`WalkAction::Abort`] ends the walk.
//!
//! The walk polls the manager's cancellation token before every node and
//! unwinds with [`Cancelled`](jpsi_ir::Cancelled) when it is set.

use jpsi_ir::ElementType;
use jpsi_tree::{WalkAction, WalkOutcome, Walker};

use crate::class::PsiClass;
use crate::code::{PsiCodeBlock, PsiLocalVariable};
use crate::element::PsiElement;
use crate::error::PsiResult;
use crate::field::PsiField;
use crate::method::PsiMethod;
use crate::parameter::PsiParameter;
use crate::resolve::PsiReferenceExpression;

use ElementType as T;

pub trait PsiVisitor {
    fn visit_element(&mut self, _element: &PsiElement) -> WalkAction {
        WalkAction::Continue
    }

    fn visit_class(&mut self, class: &PsiClass) -> WalkAction {
        self.visit_element(class.element())
    }

    fn visit_field(&mut self, field: &PsiField) -> WalkAction {
        self.visit_element(field.element())
    }

    fn visit_method(&mut self, method: &PsiMethod) -> WalkAction {
        self.visit_element(method.element())
    }

    fn visit_parameter(&mut self, parameter: &PsiParameter) -> WalkAction {
        self.visit_element(parameter.element())
    }

    fn visit_code_block(&mut self, block: &PsiCodeBlock) -> WalkAction {
        self.visit_element(block.element())
    }

    fn visit_local_variable(&mut self, variable: &PsiLocalVariable) -> WalkAction {
        self.visit_element(variable.element())
    }

    fn visit_reference_expression(&mut self, reference: &PsiReferenceExpression) -> WalkAction {
        self.visit_element(reference.element())
    }

    fn visit_lambda_expression(&mut self, lambda: &PsiElement) -> WalkAction {
        self.visit_element(lambda)
    }
}

/// Dispatch `element` to the visitor method of its kind.
pub fn accept<V: PsiVisitor + ?Sized>(element: &PsiElement, visitor: &mut V) -> WalkAction {
    match element.kind() {
        kind if kind.is_class() => match PsiClass::cast(element.clone()) {
            Some(class) => visitor.visit_class(&class),
            None => visitor.visit_element(element),
        },
        T::Field | T::EnumConstant => match PsiField::cast(element.clone()) {
            Some(field) => visitor.visit_field(&field),
            None => visitor.visit_element(element),
        },
        T::Method | T::AnnotationMethod => match PsiMethod::cast(element.clone()) {
            Some(method) => visitor.visit_method(&method),
            None => visitor.visit_element(element),
        },
        T::Parameter | T::RecordComponent => match PsiParameter::cast(element.clone()) {
            Some(parameter) => visitor.visit_parameter(&parameter),
            None => visitor.visit_element(element),
        },
        T::CodeBlock => match PsiCodeBlock::cast(element.clone()) {
            Some(block) => visitor.visit_code_block(&block),
            None => visitor.visit_element(element),
        },
        T::LocalVariable | T::ResourceVariable => match PsiLocalVariable::cast(element.clone()) {
            Some(variable) => visitor.visit_local_variable(&variable),
            None => visitor.visit_element(element),
        },
        T::ReferenceExpression => match PsiReferenceExpression::cast(element.clone()) {
            Some(reference) => visitor.visit_reference_expression(&reference),
            None => visitor.visit_element(element),
        },
        T::LambdaExpression => visitor.visit_lambda_expression(element),
        _ => visitor.visit_element(element),
    }
}

/// Walk the subtree of `start`. Tokens are not visited.
pub fn walk<V: PsiVisitor + ?Sized>(start: &PsiElement, visitor: &mut V) -> PsiResult<WalkOutcome> {
    let (ast, node) = start.tree_view()?;
    let tree = &ast.tree;
    let outcome = Walker::new(tree)
        .with_cancellation(start.manager().cancellation())
        .walk(node, |id| {
            if tree.kind(id).is_token() {
                return WalkAction::Continue;
            }
            accept(&start.tree_element(tree, id), visitor)
        });
    Ok(outcome)
}
