//! Structural hash consistent with the comparator.
//!
//! Every node contributes its kind code, its static type and the same fields the comparator
//! inspects for its kind (or a coarser summary of them). Trees the comparator accepts therefore
//! always hash equally.

use crate::compare::linearize::linearize;
use crate::foundation::stable_hash::StableHash;
use crate::tree::node::Expr;

const MULTIPLIER_A: u32 = 53;
const MULTIPLIER_B: u32 = 211;

fn fold(acc: u32, contribution: u32) -> u32 {
    acc.wrapping_mul(MULTIPLIER_A)
        .wrapping_mul(MULTIPLIER_B)
        .wrapping_add(contribution)
}

fn fold_flag(acc: u32, flag: bool) -> u32 {
    if flag { fold(acc, 1) } else { acc }
}

fn fold_node(mut acc: u32, node: &Expr) -> u32 {
    acc = fold(acc, node.kind().code());
    acc = fold(acc, node.static_type().stable_hash());

    match node {
        Expr::Binary(b) => {
            if let Some(method) = &b.method {
                acc = fold(acc, method.stable_hash());
            }
            acc = fold_flag(acc, b.is_lifted);
            acc = fold_flag(acc, b.is_lifted_to_null);
        }
        Expr::Unary(u) => {
            if let Some(method) = &u.method {
                acc = fold(acc, method.stable_hash());
            }
            acc = fold_flag(acc, u.is_lifted);
            acc = fold_flag(acc, u.is_lifted_to_null);
        }
        Expr::Constant(c) => {
            if let Some(value) = &c.value {
                acc = fold(acc, value.stable_hash());
            }
        }
        Expr::Member(m) => acc = fold(acc, m.member.stable_hash()),
        Expr::Call(c) => acc = fold(acc, c.method.stable_hash()),
        Expr::New(n) => {
            if let Some(ctor) = &n.ctor {
                acc = fold(acc, ctor.stable_hash());
            }
        }
        Expr::Parameter(p) => {
            if let Some(name) = &p.name {
                acc = fold(acc, name.stable_hash());
            }
        }
        Expr::TypeBinary(t) => acc = fold(acc, t.type_operand.stable_hash()),
        Expr::ListInit(l) => acc = fold(acc, l.initializers.len() as u32),
        Expr::MemberInit(m) => acc = fold(acc, m.bindings.len() as u32),
        Expr::Lambda(_)
        | Expr::Conditional(_)
        | Expr::Invocation(_)
        | Expr::NewArray(_)
        | Expr::Default(_) => {}
    }
    acc
}

/// Structural hash of a tree; `0` for an absent tree.
pub(crate) fn hash_of(root: Option<&Expr>) -> u32 {
    linearize(root).into_iter().fold(0, fold_node)
}

#[cfg(test)]
#[path = "../../tests/unit/compare/hasher.rs"]
mod tests;
