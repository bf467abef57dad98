//! The expression node model.
//!
//! [`Expr`] is a closed sum type: one variant per node family, each carrying its static type and
//! kind-specific payload. Children are shared [`ExprRef`]s, so the same sub-tree may appear at
//! several positions; traversals visit it once per occurrence.
//!
//! [`Expr::children`] is the single definition of canonical child order. The linearizer, the
//! comparator and the hasher all walk through it.

use std::fmt;
use std::iter::once;
use std::sync::Arc;

use smallvec::{SmallVec, smallvec};

use crate::foundation::error::{ExprError, ExprResult};
use crate::tree::ident::{CtorRef, MemberRef, MethodRef, TypeRef};
use crate::tree::value::ConstValue;

/// Shared handle to an immutable expression node.
pub type ExprRef = Arc<Expr>;

/// Operators of [`BinaryExpr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a + b` with overflow checking.
    AddChecked,
    /// `a - b`
    Subtract,
    /// `a - b` with overflow checking.
    SubtractChecked,
    /// `a * b`
    Multiply,
    /// `a * b` with overflow checking.
    MultiplyChecked,
    /// `a / b`
    Divide,
    /// `a % b`
    Modulo,
    /// `a ^ b` as exponentiation.
    Power,
    /// Bitwise or logical `a & b`.
    And,
    /// Bitwise or logical `a | b`.
    Or,
    /// `a ^ b` as exclusive or.
    ExclusiveOr,
    /// Short-circuiting `a && b`.
    AndAlso,
    /// Short-circuiting `a || b`.
    OrElse,
    /// `a == b`
    Equal,
    /// `a != b`
    NotEqual,
    /// `a < b`
    LessThan,
    /// `a <= b`
    LessThanOrEqual,
    /// `a > b`
    GreaterThan,
    /// `a >= b`
    GreaterThanOrEqual,
    /// `a << b`
    LeftShift,
    /// `a >> b`
    RightShift,
    /// `a ?? b`
    Coalesce,
    /// `a[b]` on a one-dimensional array.
    ArrayIndex,
    /// `a = b`
    Assign,
}

/// Operators of [`UnaryExpr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum UnaryOp {
    /// `-a`
    Negate,
    /// `-a` with overflow checking.
    NegateChecked,
    /// `+a`
    UnaryPlus,
    /// Logical or bitwise `!a`.
    Not,
    /// `~a`
    OnesComplement,
    /// Truth test used by user-defined `&&`/`||`.
    IsTrue,
    /// Falsity test used by user-defined `&&`/`||`.
    IsFalse,
    /// Conversion to the node's static type.
    Convert,
    /// Conversion with overflow checking.
    ConvertChecked,
    /// `a as T`
    TypeAs,
    /// Unboxing to a value type.
    Unbox,
    /// Length of a one-dimensional array.
    ArrayLength,
    /// A quoted nested expression.
    Quote,
    /// `a + 1` without assignment.
    Increment,
    /// `a - 1` without assignment.
    Decrement,
    /// `++a`
    PreIncrementAssign,
    /// `--a`
    PreDecrementAssign,
    /// `a++`
    PostIncrementAssign,
    /// `a--`
    PostDecrementAssign,
}

/// Operators of [`TypeBinaryExpr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TypeTestOp {
    /// `a is T`, including subtypes.
    TypeIs,
    /// Exact runtime type equality.
    TypeEqual,
}

/// Flavors of [`NewArrayExpr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum NewArrayKind {
    /// `new[] { a, b, c }`: children are the elements.
    Init,
    /// `new T[n, m]`: children are the bounds.
    Bounds,
}

/// Concrete node kind: the variant plus its operator, if any.
///
/// Two nodes can only be structurally equal when their kinds are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum NodeKind {
    /// [`Expr::Constant`]
    Constant,
    /// [`Expr::Parameter`]
    Parameter,
    /// [`Expr::Binary`]
    Binary(BinaryOp),
    /// [`Expr::Unary`]
    Unary(UnaryOp),
    /// [`Expr::Member`]
    MemberAccess,
    /// [`Expr::Call`]
    Call,
    /// [`Expr::New`]
    New,
    /// [`Expr::TypeBinary`]
    TypeBinary(TypeTestOp),
    /// [`Expr::ListInit`]
    ListInit,
    /// [`Expr::MemberInit`]
    MemberInit,
    /// [`Expr::Lambda`]
    Lambda,
    /// [`Expr::Conditional`]
    Conditional,
    /// [`Expr::Invocation`]
    Invoke,
    /// [`Expr::NewArray`]
    NewArray(NewArrayKind),
    /// [`Expr::Default`]
    Default,
}

impl NodeKind {
    /// Stable integer code, folded into structural hashes.
    ///
    /// Operator kinds share a family prefix in the upper byte.
    pub fn code(self) -> u32 {
        match self {
            Self::Constant => 0,
            Self::Parameter => 1,
            Self::MemberAccess => 2,
            Self::Call => 3,
            Self::New => 4,
            Self::ListInit => 5,
            Self::MemberInit => 6,
            Self::Lambda => 7,
            Self::Conditional => 8,
            Self::Invoke => 9,
            Self::Default => 10,
            Self::Binary(op) => 0x100 | op as u32,
            Self::Unary(op) => 0x200 | op as u32,
            Self::TypeBinary(op) => 0x300 | op as u32,
            Self::NewArray(kind) => 0x400 | kind as u32,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(op) => write!(f, "Binary({op:?})"),
            Self::Unary(op) => write!(f, "Unary({op:?})"),
            Self::TypeBinary(op) => write!(f, "TypeBinary({op:?})"),
            Self::NewArray(kind) => write!(f, "NewArray({kind:?})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A literal or captured value.
#[derive(Clone, Debug)]
pub struct ConstantExpr {
    /// Static type.
    pub ty: TypeRef,
    /// The value; `None` for a null constant.
    pub value: Option<ConstValue>,
}

/// A lambda parameter or local variable.
#[derive(Clone, Debug)]
pub struct ParameterExpr {
    /// Static type.
    pub ty: TypeRef,
    /// Declared name; `None` for compiler-generated parameters.
    pub name: Option<Arc<str>>,
}

/// A binary operator application.
#[derive(Clone, Debug)]
pub struct BinaryExpr {
    /// Operator.
    pub op: BinaryOp,
    /// Result type.
    pub ty: TypeRef,
    /// User-defined operator implementation, if any.
    pub method: Option<MethodRef>,
    /// Operands were lifted from nullable value types.
    pub is_lifted: bool,
    /// The lifted result is nullable rather than plain.
    pub is_lifted_to_null: bool,
    /// Left operand.
    pub left: ExprRef,
    /// Right operand.
    pub right: ExprRef,
}

/// A unary operator application or conversion.
#[derive(Clone, Debug)]
pub struct UnaryExpr {
    /// Operator.
    pub op: UnaryOp,
    /// Result type.
    pub ty: TypeRef,
    /// User-defined operator or conversion implementation, if any.
    pub method: Option<MethodRef>,
    /// Operand was lifted from a nullable value type.
    pub is_lifted: bool,
    /// The lifted result is nullable rather than plain.
    pub is_lifted_to_null: bool,
    /// Operand.
    pub operand: ExprRef,
}

/// Field or property access.
#[derive(Clone, Debug)]
pub struct MemberExpr {
    /// Static type (the member's type).
    pub ty: TypeRef,
    /// Accessed member.
    pub member: MemberRef,
    /// Receiver; `None` for static members.
    pub target: Option<ExprRef>,
}

/// Method call.
#[derive(Clone, Debug)]
pub struct CallExpr {
    /// Static type (the method's return type).
    pub ty: TypeRef,
    /// Called method.
    pub method: MethodRef,
    /// Receiver; `None` for static methods.
    pub target: Option<ExprRef>,
    /// Arguments in order.
    pub args: Vec<ExprRef>,
}

/// Object construction, optionally keyed by member (anonymous-record style).
#[derive(Clone, Debug)]
pub struct NewExpr {
    /// Constructed type.
    pub ty: TypeRef,
    /// Constructor; `None` for value types constructed without one.
    pub ctor: Option<CtorRef>,
    /// Constructor arguments in order.
    pub args: Vec<ExprRef>,
    /// Member initialized by each argument; same length as `args` when present.
    pub members: Option<Vec<MemberRef>>,
}

/// Runtime type test of an operand.
#[derive(Clone, Debug)]
pub struct TypeBinaryExpr {
    /// Test flavor.
    pub op: TypeTestOp,
    /// Static type (always boolean).
    pub ty: TypeRef,
    /// Type tested against.
    pub type_operand: TypeRef,
    /// Tested operand.
    pub operand: ExprRef,
}

/// One `Add(...)` call of a collection initializer.
#[derive(Clone, Debug)]
pub struct ElementInit {
    /// The add method invoked.
    pub add_method: MethodRef,
    /// Arguments passed to it.
    pub args: Vec<ExprRef>,
}

/// Collection construction followed by element initializers.
#[derive(Clone, Debug)]
pub struct ListInitExpr {
    /// Static type (the collection type).
    pub ty: TypeRef,
    /// The [`Expr::New`] node that creates the collection.
    pub new_expr: ExprRef,
    /// Element initializers in order.
    pub initializers: Vec<ElementInit>,
}

/// One `Member = value` assignment of an object initializer.
#[derive(Clone, Debug)]
pub struct MemberBinding {
    /// Assigned member.
    pub member: MemberRef,
    /// Assigned value.
    pub value: ExprRef,
}

/// Object construction followed by member assignments.
#[derive(Clone, Debug)]
pub struct MemberInitExpr {
    /// Static type (the constructed type).
    pub ty: TypeRef,
    /// The [`Expr::New`] node that creates the object.
    pub new_expr: ExprRef,
    /// Member assignments in order.
    pub bindings: Vec<MemberBinding>,
}

/// A lambda: body plus parameter list.
#[derive(Clone, Debug)]
pub struct LambdaExpr {
    /// Delegate type.
    pub ty: TypeRef,
    /// Body.
    pub body: ExprRef,
    /// Parameters, each an [`Expr::Parameter`].
    pub params: Vec<ExprRef>,
}

/// `test ? if_true : if_false`.
#[derive(Clone, Debug)]
pub struct ConditionalExpr {
    /// Result type.
    pub ty: TypeRef,
    /// Condition.
    pub test: ExprRef,
    /// Value when the condition holds.
    pub if_true: ExprRef,
    /// Value otherwise.
    pub if_false: ExprRef,
}

/// Invocation of a delegate or lambda value.
#[derive(Clone, Debug)]
pub struct InvocationExpr {
    /// Result type.
    pub ty: TypeRef,
    /// Invoked delegate expression.
    pub target: ExprRef,
    /// Arguments in order.
    pub args: Vec<ExprRef>,
}

/// Array construction.
#[derive(Clone, Debug)]
pub struct NewArrayExpr {
    /// Elements or bounds.
    pub kind: NewArrayKind,
    /// Array type.
    pub ty: TypeRef,
    /// Element or bound expressions in order.
    pub exprs: Vec<ExprRef>,
}

/// The default value of a type.
#[derive(Clone, Debug)]
pub struct DefaultExpr {
    /// The type whose default is produced.
    pub ty: TypeRef,
}

/// One node of an expression tree.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Literal or captured value.
    Constant(ConstantExpr),
    /// Parameter reference.
    Parameter(ParameterExpr),
    /// Binary operator.
    Binary(BinaryExpr),
    /// Unary operator or conversion.
    Unary(UnaryExpr),
    /// Field or property access.
    Member(MemberExpr),
    /// Method call.
    Call(CallExpr),
    /// Object construction.
    New(NewExpr),
    /// Runtime type test.
    TypeBinary(TypeBinaryExpr),
    /// Collection initializer.
    ListInit(ListInitExpr),
    /// Object initializer.
    MemberInit(MemberInitExpr),
    /// Lambda.
    Lambda(LambdaExpr),
    /// Ternary conditional.
    Conditional(ConditionalExpr),
    /// Delegate invocation.
    Invocation(InvocationExpr),
    /// Array construction.
    NewArray(NewArrayExpr),
    /// Default value of a type.
    Default(DefaultExpr),
}

impl Expr {
    /// Concrete kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Constant(_) => NodeKind::Constant,
            Self::Parameter(_) => NodeKind::Parameter,
            Self::Binary(b) => NodeKind::Binary(b.op),
            Self::Unary(u) => NodeKind::Unary(u.op),
            Self::Member(_) => NodeKind::MemberAccess,
            Self::Call(_) => NodeKind::Call,
            Self::New(_) => NodeKind::New,
            Self::TypeBinary(t) => NodeKind::TypeBinary(t.op),
            Self::ListInit(_) => NodeKind::ListInit,
            Self::MemberInit(_) => NodeKind::MemberInit,
            Self::Lambda(_) => NodeKind::Lambda,
            Self::Conditional(_) => NodeKind::Conditional,
            Self::Invocation(_) => NodeKind::Invoke,
            Self::NewArray(n) => NodeKind::NewArray(n.kind),
            Self::Default(_) => NodeKind::Default,
        }
    }

    /// Static (result) type of this node.
    pub fn static_type(&self) -> &TypeRef {
        match self {
            Self::Constant(e) => &e.ty,
            Self::Parameter(e) => &e.ty,
            Self::Binary(e) => &e.ty,
            Self::Unary(e) => &e.ty,
            Self::Member(e) => &e.ty,
            Self::Call(e) => &e.ty,
            Self::New(e) => &e.ty,
            Self::TypeBinary(e) => &e.ty,
            Self::ListInit(e) => &e.ty,
            Self::MemberInit(e) => &e.ty,
            Self::Lambda(e) => &e.ty,
            Self::Conditional(e) => &e.ty,
            Self::Invocation(e) => &e.ty,
            Self::NewArray(e) => &e.ty,
            Self::Default(e) => &e.ty,
        }
    }

    /// Direct children in canonical order.
    ///
    /// Optional receivers come before arguments; a list/member initializer yields its `New`
    /// node before the initializer values; a lambda yields its body before its parameters.
    pub fn children(&self) -> SmallVec<[&Expr; 4]> {
        match self {
            Self::Constant(_) | Self::Parameter(_) | Self::Default(_) => SmallVec::new(),
            Self::Binary(b) => smallvec![&*b.left, &*b.right],
            Self::Unary(u) => smallvec![&*u.operand],
            Self::Member(m) => m.target.iter().map(|t| &**t).collect(),
            Self::Call(c) => c.target.iter().chain(&c.args).map(|e| &**e).collect(),
            Self::New(n) => n.args.iter().map(|e| &**e).collect(),
            Self::TypeBinary(t) => smallvec![&*t.operand],
            Self::ListInit(l) => once(&*l.new_expr)
                .chain(
                    l.initializers
                        .iter()
                        .flat_map(|init| init.args.iter().map(|a| &**a)),
                )
                .collect(),
            Self::MemberInit(m) => once(&*m.new_expr)
                .chain(m.bindings.iter().map(|b| &*b.value))
                .collect(),
            Self::Lambda(l) => once(&*l.body)
                .chain(l.params.iter().map(|p| &**p))
                .collect(),
            Self::Conditional(c) => smallvec![&*c.test, &*c.if_true, &*c.if_false],
            Self::Invocation(i) => once(&*i.target)
                .chain(i.args.iter().map(|a| &**a))
                .collect(),
            Self::NewArray(n) => n.exprs.iter().map(|e| &**e).collect(),
        }
    }

    /// Check the payload invariants of this node and all of its descendants.
    ///
    /// Comparison and hashing assume these hold; they never call `validate` themselves.
    pub fn validate(&self) -> ExprResult<()> {
        match self {
            Self::New(n) => {
                if let Some(members) = &n.members
                    && members.len() != n.args.len()
                {
                    return Err(ExprError::arity(
                        "keyed construction members",
                        n.args.len(),
                        members.len(),
                    ));
                }
            }
            Self::ListInit(l) => {
                expect_new(&l.new_expr)?;
                if let Some(i) = l.initializers.iter().position(|init| init.args.is_empty()) {
                    return Err(ExprError::validation(format!(
                        "element initializer {i} has no arguments"
                    )));
                }
            }
            Self::MemberInit(m) => expect_new(&m.new_expr)?,
            Self::Lambda(l) => {
                if let Some(p) = l
                    .params
                    .iter()
                    .find(|p| !matches!(***p, Self::Parameter(_)))
                {
                    return Err(ExprError::unexpected_kind("Parameter", p.kind()));
                }
            }
            _ => {}
        }

        for child in self.children() {
            child.validate()?;
        }
        Ok(())
    }
}

fn expect_new(e: &Expr) -> ExprResult<()> {
    match e {
        Expr::New(_) => Ok(()),
        other => Err(ExprError::unexpected_kind("New", other.kind())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/node.rs"]
mod tests;
