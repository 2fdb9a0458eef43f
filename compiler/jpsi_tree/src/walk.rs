//! Pre-order traversal with early exit and cancellation.

use jpsi_ir::CancellationToken;

use crate::syntax::{NodeId, SyntaxTree};

/// What a visit callback wants the walker to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkAction {
    Continue,
    /// Do not descend into the node just visited.
    SkipChildren,
    /// Stop the whole walk.
    Abort,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Aborted,
}

/// Iterative pre-order walker.
///
/// The cancellation token is polled before every visit; a cancelled walk
/// unwinds with [`Cancelled`](jpsi_ir::Cancelled) rather than returning.
pub struct Walker<'a> {
    tree: &'a SyntaxTree,
    cancel: Option<&'a CancellationToken>,
    expand_lazy: bool,
}

impl<'a> Walker<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Walker {
            tree,
            cancel: None,
            expand_lazy: true,
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether collapsed regions are expanded to visit their content
    /// (default `true`).
    #[must_use]
    pub fn expand_lazy(mut self, expand: bool) -> Self {
        self.expand_lazy = expand;
        self
    }

    pub fn walk(&self, start: NodeId, mut visit: impl FnMut(NodeId) -> WalkAction) -> WalkOutcome {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if let Some(token) = self.cancel {
                token.check();
            }
            match visit(id) {
                WalkAction::Abort => return WalkOutcome::Aborted,
                WalkAction::SkipChildren => continue,
                WalkAction::Continue => {}
            }
            let children = if self.expand_lazy {
                self.tree.children(id)
            } else {
                self.tree.children_if_expanded(id)
            };
            stack.extend(children.into_iter().rev());
        }
        WalkOutcome::Completed
    }
}
