//! Simple-name resolution of reference expressions.
//!
//! A name resolves to the closest declaration visible at the reference,
//! searching outward:
//!
//! - locals declared earlier in each enclosing block
//! - `for` initializers, enhanced `for` variables, `catch` parameters and
//!   `try` resources
//! - lambda and method parameters (record components for compact
//!   constructors)
//! - fields of each enclosing class, including inherited ones
//!
//! A qualified reference resolves only when qualified by `this`.

use jpsi_ir::ElementType;
use jpsi_tree::{ChildRole, NodeId, SyntaxTree};

use crate::class::PsiClass;
use crate::code::PsiLocalVariable;
use crate::element::PsiElement;
use crate::error::PsiResult;
use crate::field::PsiField;
use crate::member::Member;
use crate::method::PsiMethod;
use crate::parameter::PsiParameter;
use crate::traits::Named;

use ElementType as T;

/// What a name resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PsiVariable {
    Local(PsiLocalVariable),
    Parameter(PsiParameter),
    Field(Member<PsiField>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PsiReferenceExpression {
    element: PsiElement,
}

/// A declaration found while walking up from the reference.
#[derive(Clone, Copy)]
enum Hit {
    Local,
    Parameter,
    /// Search the class's fields.
    Class,
    /// Compact constructor: search the record's components.
    Components,
}

impl PsiReferenceExpression {
    pub fn cast(element: PsiElement) -> Option<Self> {
        (element.kind() == T::ReferenceExpression).then_some(PsiReferenceExpression { element })
    }

    #[inline]
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    /// `x` of `a.b.x`.
    pub fn reference_name(&self) -> PsiResult<Option<String>> {
        self.element.read_tree(|tree, node| {
            tree.find_child_by_role(node, ChildRole::ReferenceName)
                .and_then(|name| tree.token_text(name))
                .map(|text| text.to_string())
        })
    }

    pub fn qualifier(&self) -> PsiResult<Option<PsiElement>> {
        self.element.find_child_by_role(ChildRole::Qualifier)
    }

    pub fn resolve(&self) -> PsiResult<Option<PsiVariable>> {
        let Some(name) = self.reference_name()? else {
            return Ok(None);
        };
        if let Some(qualifier) = self.qualifier()? {
            if qualifier.kind() != T::ThisExpression {
                return Ok(None);
            }
            return match self.element.containing_class()? {
                Some(class) => Ok(class.find_field_by_name(&name, true)?.map(PsiVariable::Field)),
                None => Ok(None),
            };
        }

        let hits = self.element.read_tree(|tree, node| {
            scope_hits(tree, node, &name)
                .into_iter()
                .map(|(hit, id)| (hit, self.element.tree_element(tree, id)))
                .collect::<Vec<_>>()
        })?;
        for (hit, element) in hits {
            let found = match hit {
                Hit::Local => Some(PsiVariable::Local(PsiLocalVariable::new(element))),
                Hit::Parameter => Some(PsiVariable::Parameter(PsiParameter::new(element))),
                Hit::Components => {
                    let mut found = None;
                    for component in PsiMethod::new(element).parameters()? {
                        if component.name()?.as_deref() == Some(name.as_str()) {
                            found = Some(PsiVariable::Parameter(component));
                            break;
                        }
                    }
                    found
                }
                Hit::Class => match PsiClass::cast(element) {
                    Some(class) => class
                        .find_field_by_name(&name, true)?
                        .map(PsiVariable::Field),
                    None => None,
                },
            };
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }
}

fn named(tree: &SyntaxTree, node: NodeId, name: &str) -> bool {
    tree.find_child_by_role(node, ChildRole::Name)
        .and_then(|id| tree.token_text(id))
        .is_some_and(|text| &*text == name)
}

fn locals_of(tree: &SyntaxTree, statement: NodeId) -> Vec<NodeId> {
    if tree.kind(statement) == T::DeclarationStatement {
        tree.children_of_kind(statement, T::LocalVariable)
    } else {
        Vec::new()
    }
}

/// Candidate declarations for `name`, innermost scope first. Locals and
/// parameters are matched here; classes are returned for a field lookup.
fn scope_hits(tree: &SyntaxTree, reference: NodeId, name: &str) -> Vec<(Hit, NodeId)> {
    let mut hits = Vec::new();
    let mut child = reference;
    for scope in tree.ancestors(reference) {
        match tree.kind(scope) {
            T::CodeBlock => {
                let before = tree
                    .children(scope)
                    .into_iter()
                    .take_while(|&c| c != child)
                    .collect::<Vec<_>>();
                for statement in before.into_iter().rev() {
                    for local in locals_of(tree, statement).into_iter().rev() {
                        if named(tree, local, name) {
                            hits.push((Hit::Local, local));
                        }
                    }
                }
            }
            T::DeclarationStatement => {
                // `int a = 1, b = a;`: earlier declarators are visible.
                for local in tree.children_of_kind(scope, T::LocalVariable) {
                    if local == child {
                        break;
                    }
                    if named(tree, local, name) {
                        hits.push((Hit::Local, local));
                    }
                }
            }
            T::ForStatement => {
                for init in tree.children_of_kind(scope, T::DeclarationStatement) {
                    if init == child {
                        continue;
                    }
                    for local in locals_of(tree, init) {
                        if named(tree, local, name) {
                            hits.push((Hit::Local, local));
                        }
                    }
                }
            }
            T::ForeachStatement | T::CatchSection => {
                for parameter in tree.children_of_kind(scope, T::Parameter) {
                    if parameter != child && named(tree, parameter, name) {
                        hits.push((Hit::Parameter, parameter));
                    }
                }
            }
            T::ResourceList => {
                for resource in tree.children_of_kind(scope, T::ResourceVariable) {
                    if resource == child {
                        break;
                    }
                    if named(tree, resource, name) {
                        hits.push((Hit::Local, resource));
                    }
                }
            }
            T::TryStatement => {
                if let Some(resources) = tree.first_child_of_kind(scope, T::ResourceList) {
                    if resources != child {
                        for resource in tree.children_of_kind(resources, T::ResourceVariable) {
                            if named(tree, resource, name) {
                                hits.push((Hit::Local, resource));
                            }
                        }
                    }
                }
            }
            T::LambdaExpression | T::Method => {
                match tree.first_child_of_kind(scope, T::ParameterList) {
                    Some(list) => {
                        for parameter in tree.children_of_kind(list, T::Parameter) {
                            if named(tree, parameter, name) {
                                hits.push((Hit::Parameter, parameter));
                            }
                        }
                    }
                    None if tree.kind(scope) == T::Method => hits.push((Hit::Components, scope)),
                    None => {}
                }
            }
            kind if kind.is_class() => hits.push((Hit::Class, scope)),
            _ => {}
        }
        child = scope;
    }
    hits
}

#[cfg(test)]
mod tests;
