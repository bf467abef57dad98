//! Structural equality and hashing for typed expression trees.
//!
//! Two trees built independently (say, the same predicate assembled in two code paths) compare
//! equal when they have the same shape, the same node kinds and static types, and the same
//! kind-specific payload: operator methods, members, constants, parameter names and so on. The
//! matching structural hash makes trees usable as keys in caches and maps.
//!
//! - Build trees with the helpers in [`build`]
//! - Compare and hash them with an [`ExprComparer`] (or the shared [`COMPARER`])
//! - Key maps with [`ExprKey`], or collapse duplicates with [`ExprComparer::dedup`]
//!
//! ```
//! use expr_compare::{COMPARER, TypeRef, BinaryOp, build};
//!
//! let x = build::parameter("x", TypeRef::int32());
//! let a = build::binary(BinaryOp::Add, x.clone(), build::constant(2, TypeRef::int32()), TypeRef::int32());
//! let b = build::binary(BinaryOp::Add, x, build::constant(2, TypeRef::int32()), TypeRef::int32());
//!
//! assert!(COMPARER.equals(&a, &b));
//! assert_eq!(COMPARER.hash_of(&a), COMPARER.hash_of(&b));
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compare;
mod foundation;
mod tree;

pub use crate::tree::build;

pub use crate::compare::comparator::{Field, Mismatch, MismatchReason};
pub use crate::compare::comparer::{COMPARER, ExprComparer, ExprKey};
pub use crate::compare::linearize::linearize;
pub use crate::foundation::error::{ExprError, ExprResult};
pub use crate::foundation::stable_hash::StableHash;
pub use crate::tree::ident::{CtorRef, MemberKind, MemberRef, MethodRef, TypeRef};
pub use crate::tree::node::{
    BinaryExpr, BinaryOp, CallExpr, ConditionalExpr, ConstantExpr, DefaultExpr, ElementInit, Expr,
    ExprRef, InvocationExpr, LambdaExpr, ListInitExpr, MemberBinding, MemberExpr, MemberInitExpr,
    NewArrayExpr, NewArrayKind, NewExpr, NodeKind, ParameterExpr, TypeBinaryExpr, TypeTestOp,
    UnaryExpr, UnaryOp,
};
pub use crate::tree::value::{ConstValue, CustomValue, ObjectRef};
