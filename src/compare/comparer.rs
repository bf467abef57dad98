use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rayon::prelude::*;

use crate::compare::{comparator, hasher};
use crate::compare::comparator::Mismatch;
use crate::tree::node::{Expr, ExprRef};

/// Structural equality and hashing of expression trees.
///
/// Stateless and zero-sized: copy it freely or use [`COMPARER`]. Every call is independent, so
/// one value may be shared across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExprComparer;

/// Shared [`ExprComparer`].
pub const COMPARER: ExprComparer = ExprComparer::new();

impl ExprComparer {
    /// A comparer.
    pub const fn new() -> Self {
        Self
    }

    /// Whether two trees are structurally equal.
    pub fn equals(&self, left: &Expr, right: &Expr) -> bool {
        comparator::equals(Some(left), Some(right))
    }

    /// [`equals`](Self::equals) over possibly absent roots. Two absent roots are equal.
    pub fn equals_opt(&self, left: Option<&Expr>, right: Option<&Expr>) -> bool {
        comparator::equals(left, right)
    }

    /// Structural hash of a tree. Structurally equal trees hash equally.
    pub fn hash_of(&self, expr: &Expr) -> u32 {
        hasher::hash_of(Some(expr))
    }

    /// [`hash_of`](Self::hash_of) over a possibly absent root; `0` when absent.
    pub fn hash_of_opt(&self, expr: Option<&Expr>) -> u32 {
        hasher::hash_of(expr)
    }

    /// First point at which two trees diverge, or `None` when they are structurally equal.
    #[tracing::instrument(
        level = "debug",
        skip(self, left, right),
        fields(left = %left.kind(), right = %right.kind())
    )]
    pub fn diff(&self, left: &Expr, right: &Expr) -> Option<Mismatch> {
        comparator::diff(Some(left), Some(right))
    }

    /// Keep the first occurrence of each structurally distinct tree, in input order.
    ///
    /// Hashes are computed on the rayon pool; equality probes run on the calling thread.
    #[tracing::instrument(skip(self, exprs), fields(input = exprs.len()))]
    pub fn dedup(&self, exprs: &[ExprRef]) -> Vec<ExprRef> {
        let keys: Vec<ExprKey> = exprs
            .par_iter()
            .map(|e| ExprKey::new(Arc::clone(e)))
            .collect();

        let mut seen = HashSet::with_capacity(keys.len());
        let mut out = Vec::new();
        for key in keys {
            let expr = Arc::clone(key.expr());
            if seen.insert(key) {
                out.push(expr);
            }
        }

        tracing::debug!(
            input = exprs.len(),
            output = out.len(),
            "deduplicated expression trees"
        );
        out
    }
}

/// Map key that compares and hashes an expression tree structurally.
///
/// The structural hash is computed once, on construction.
#[derive(Clone, Debug)]
pub struct ExprKey {
    expr: ExprRef,
    hash: u32,
}

impl ExprKey {
    /// Wrap a tree, hashing it.
    pub fn new(expr: ExprRef) -> Self {
        let hash = COMPARER.hash_of(&expr);
        Self { expr, hash }
    }

    /// The wrapped tree.
    pub fn expr(&self) -> &ExprRef {
        &self.expr
    }

    /// Cached [`ExprComparer::hash_of`] of the wrapped tree.
    pub fn structural_hash(&self) -> u32 {
        self.hash
    }

    /// Unwrap the tree.
    pub fn into_inner(self) -> ExprRef {
        self.expr
    }
}

impl From<ExprRef> for ExprKey {
    fn from(expr: ExprRef) -> Self {
        Self::new(expr)
    }
}

impl PartialEq for ExprKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && (Arc::ptr_eq(&self.expr, &other.expr) || COMPARER.equals(&self.expr, &other.expr))
    }
}

impl Eq for ExprKey {}

impl Hash for ExprKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compare/comparer.rs"]
mod tests;
