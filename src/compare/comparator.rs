//! Structural comparison of two expression trees.
//!
//! The right tree is linearized up front into a queue. The left tree is then walked in the same
//! pre-order, and every visited left node must match the node at the front of the queue, first
//! by `(kind, static type)` and then by its kind's field rule. The walk stops at the first
//! mismatch; nothing further is visited or dequeued. A complete walk that leaves nodes in the
//! queue is also a mismatch (the right tree is longer).

use std::collections::VecDeque;

use crate::compare::linearize::linearize;
use crate::tree::ident::TypeRef;
use crate::tree::node::{Expr, NewExpr, NodeKind};

/// Where and why two trees stopped being structurally equal.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Mismatch {
    /// Pre-order index of the left node at which the walk stopped. For
    /// [`MismatchReason::TrailingNodes`] this is the number of left nodes.
    pub position: usize,
    /// What differed.
    pub reason: MismatchReason,
}

/// Cause of a [`Mismatch`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum MismatchReason {
    /// The right tree ran out of nodes while the left walk continued.
    RightExhausted {
        /// Kind of the unmatched left node.
        left: NodeKind,
    },
    /// Kinds or static types of the paired nodes differ.
    Header {
        /// Kind of the left node.
        left: NodeKind,
        /// Kind of the right node.
        right: NodeKind,
        /// Static type of the left node.
        left_type: TypeRef,
        /// Static type of the right node.
        right_type: TypeRef,
    },
    /// Kinds and types agree but a kind-specific field differs.
    Field {
        /// Kind shared by both nodes.
        kind: NodeKind,
        /// The first differing field.
        field: Field,
    },
    /// The left walk completed with right nodes left over.
    TrailingNodes {
        /// Number of unconsumed right nodes.
        remaining: usize,
    },
}

/// Kind-specific fields inspected by the comparator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Operator implementation or called method.
    Method,
    /// Operand lifting flag.
    IsLifted,
    /// Lifted-to-null flag.
    IsLiftedToNull,
    /// Constant value.
    Value,
    /// Accessed member.
    Member,
    /// Parameter name.
    Name,
    /// Type operand of a type test.
    TypeOperand,
    /// Constructor.
    Ctor,
    /// Keyed-construction member list.
    Members,
    /// Element initializer count or add methods.
    Initializers,
    /// Object initializer binding count or members.
    ///
    /// Stricter than a `(kind, static type)` check: `new B { Name = "x" }` and
    /// `new B { Gender = "x" }` differ here, as do the same bindings in another order. The
    /// structural hash folds only the binding count.
    Bindings,
}

struct Comparison<'r> {
    candidates: VecDeque<&'r Expr>,
    visited: usize,
    mismatch: Option<Mismatch>,
}

impl Comparison<'_> {
    fn visit(&mut self, node: &Expr) {
        if self.mismatch.is_some() {
            return;
        }

        let position = self.visited;
        let Some(&candidate) = self.candidates.front() else {
            self.fail(position, MismatchReason::RightExhausted { left: node.kind() });
            return;
        };

        if node.kind() != candidate.kind() || node.static_type() != candidate.static_type() {
            self.fail(
                position,
                MismatchReason::Header {
                    left: node.kind(),
                    right: candidate.kind(),
                    left_type: node.static_type().clone(),
                    right_type: candidate.static_type().clone(),
                },
            );
            return;
        }

        self.candidates.pop_front();
        self.visited += 1;

        if let Some(field) = field_mismatch(node, candidate) {
            self.fail(
                position,
                MismatchReason::Field {
                    kind: node.kind(),
                    field,
                },
            );
            return;
        }

        for child in node.children() {
            self.visit(child);
            if self.mismatch.is_some() {
                return;
            }
        }
    }

    fn fail(&mut self, position: usize, reason: MismatchReason) {
        tracing::trace!(position, ?reason, "expression trees diverge");
        self.mismatch = Some(Mismatch { position, reason });
    }
}

fn field_mismatch(node: &Expr, candidate: &Expr) -> Option<Field> {
    match (node, candidate) {
        (Expr::Binary(l), Expr::Binary(r)) => operator_mismatch(
            (&l.method, l.is_lifted, l.is_lifted_to_null),
            (&r.method, r.is_lifted, r.is_lifted_to_null),
        ),
        (Expr::Unary(l), Expr::Unary(r)) => operator_mismatch(
            (&l.method, l.is_lifted, l.is_lifted_to_null),
            (&r.method, r.is_lifted, r.is_lifted_to_null),
        ),
        (Expr::Constant(l), Expr::Constant(r)) => (l.value != r.value).then_some(Field::Value),
        (Expr::Member(l), Expr::Member(r)) => (l.member != r.member).then_some(Field::Member),
        (Expr::Call(l), Expr::Call(r)) => (l.method != r.method).then_some(Field::Method),
        (Expr::Parameter(l), Expr::Parameter(r)) => (l.name != r.name).then_some(Field::Name),
        (Expr::TypeBinary(l), Expr::TypeBinary(r)) => {
            (l.type_operand != r.type_operand).then_some(Field::TypeOperand)
        }
        (Expr::New(l), Expr::New(r)) => new_mismatch(l, r),
        (Expr::ListInit(l), Expr::ListInit(r)) => {
            let same = l.initializers.len() == r.initializers.len()
                && l
                    .initializers
                    .iter()
                    .zip(&r.initializers)
                    .all(|(a, b)| a.add_method == b.add_method);
            (!same).then_some(Field::Initializers)
        }
        (Expr::MemberInit(l), Expr::MemberInit(r)) => {
            let same = l.bindings.len() == r.bindings.len()
                && l
                    .bindings
                    .iter()
                    .zip(&r.bindings)
                    .all(|(a, b)| a.member == b.member);
            (!same).then_some(Field::Bindings)
        }
        (Expr::Lambda(_), Expr::Lambda(_))
        | (Expr::Conditional(_), Expr::Conditional(_))
        | (Expr::Invocation(_), Expr::Invocation(_))
        | (Expr::NewArray(_), Expr::NewArray(_))
        | (Expr::Default(_), Expr::Default(_)) => None,
        _ => unreachable!(
            "kind check paired {} with {}",
            node.kind(),
            candidate.kind()
        ),
    }
}

fn operator_mismatch<M: PartialEq>(l: (&M, bool, bool), r: (&M, bool, bool)) -> Option<Field> {
    if l.0 != r.0 {
        Some(Field::Method)
    } else if l.1 != r.1 {
        Some(Field::IsLifted)
    } else if l.2 != r.2 {
        Some(Field::IsLiftedToNull)
    } else {
        None
    }
}

fn new_mismatch(l: &NewExpr, r: &NewExpr) -> Option<Field> {
    if l.ctor != r.ctor {
        return Some(Field::Ctor);
    }
    // An absent member list is the same as an empty one.
    let lm = l.members.as_deref().unwrap_or_default();
    let rm = r.members.as_deref().unwrap_or_default();
    (lm != rm).then_some(Field::Members)
}

/// Compare two trees, reporting the first point of divergence.
pub(crate) fn diff(left: Option<&Expr>, right: Option<&Expr>) -> Option<Mismatch> {
    let mut cmp = Comparison {
        candidates: linearize(right).into(),
        visited: 0,
        mismatch: None,
    };

    if let Some(left) = left {
        cmp.visit(left);
    }

    if cmp.mismatch.is_none() && !cmp.candidates.is_empty() {
        let remaining = cmp.candidates.len();
        cmp.fail(cmp.visited, MismatchReason::TrailingNodes { remaining });
    }
    cmp.mismatch
}

/// Structural equality of two trees.
pub(crate) fn equals(left: Option<&Expr>, right: Option<&Expr>) -> bool {
    diff(left, right).is_none()
}

#[cfg(test)]
#[path = "../../tests/unit/compare/comparator.rs"]
mod tests;
