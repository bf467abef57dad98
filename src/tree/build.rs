//! Free-function constructors for expression trees.
//!
//! Each helper returns a fresh [`ExprRef`]. Helpers whose inputs can break a payload invariant
//! validate the new node and return [`ExprResult`].

use std::sync::Arc;

use crate::foundation::error::ExprResult;
use crate::tree::ident::{CtorRef, MemberRef, MethodRef, TypeRef};
use crate::tree::node::{
    BinaryExpr, BinaryOp, CallExpr, ConditionalExpr, ConstantExpr, DefaultExpr, ElementInit, Expr,
    ExprRef, InvocationExpr, LambdaExpr, ListInitExpr, MemberBinding, MemberExpr, MemberInitExpr,
    NewArrayExpr, NewArrayKind, NewExpr, ParameterExpr, TypeBinaryExpr, TypeTestOp, UnaryExpr,
    UnaryOp,
};
use crate::tree::value::ConstValue;

fn validated(e: Expr) -> ExprResult<ExprRef> {
    e.validate()?;
    Ok(Arc::new(e))
}

/// Constant of static type `ty`.
pub fn constant(value: impl Into<ConstValue>, ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Constant(ConstantExpr {
        ty,
        value: Some(value.into()),
    }))
}

/// Null constant of static type `ty`.
pub fn null(ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Constant(ConstantExpr { ty, value: None }))
}

/// Named parameter.
pub fn parameter(name: &str, ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Parameter(ParameterExpr {
        ty,
        name: Some(name.into()),
    }))
}

/// Parameter without a name.
pub fn unnamed_parameter(ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Parameter(ParameterExpr { ty, name: None }))
}

/// Built-in binary operator (no user-defined method, not lifted).
pub fn binary(op: BinaryOp, left: ExprRef, right: ExprRef, ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Binary(BinaryExpr {
        op,
        ty,
        method: None,
        is_lifted: false,
        is_lifted_to_null: false,
        left,
        right,
    }))
}

/// Binary operator implemented by a user-defined `method`.
pub fn binary_with_method(
    op: BinaryOp,
    left: ExprRef,
    right: ExprRef,
    method: MethodRef,
) -> ExprRef {
    Arc::new(Expr::Binary(BinaryExpr {
        op,
        ty: method.return_type.clone(),
        method: Some(method),
        is_lifted: false,
        is_lifted_to_null: false,
        left,
        right,
    }))
}

/// Built-in binary operator over nullable operands.
///
/// Comparisons lifted "to null" produce `Nullable<bool>`; otherwise the plain result type is
/// kept and `is_lifted_to_null` stays false.
pub fn lifted_binary(
    op: BinaryOp,
    left: ExprRef,
    right: ExprRef,
    ty: TypeRef,
    to_null: bool,
) -> ExprRef {
    Arc::new(Expr::Binary(BinaryExpr {
        op,
        ty,
        method: None,
        is_lifted: true,
        is_lifted_to_null: to_null,
        left,
        right,
    }))
}

/// Built-in unary operator.
pub fn unary(op: UnaryOp, operand: ExprRef, ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Unary(UnaryExpr {
        op,
        ty,
        method: None,
        is_lifted: false,
        is_lifted_to_null: false,
        operand,
    }))
}

/// Conversion of `operand` to `ty`.
pub fn convert(operand: ExprRef, ty: TypeRef) -> ExprRef {
    unary(UnaryOp::Convert, operand, ty)
}

/// Access to `member` on `target`, or a static member when `target` is `None`.
pub fn member(target: Option<ExprRef>, member: MemberRef) -> ExprRef {
    Arc::new(Expr::Member(MemberExpr {
        ty: member.member_type.clone(),
        member,
        target,
    }))
}

/// Instance method call.
pub fn call(target: ExprRef, method: MethodRef, args: Vec<ExprRef>) -> ExprRef {
    Arc::new(Expr::Call(CallExpr {
        ty: method.return_type.clone(),
        method,
        target: Some(target),
        args,
    }))
}

/// Static method call.
pub fn static_call(method: MethodRef, args: Vec<ExprRef>) -> ExprRef {
    Arc::new(Expr::Call(CallExpr {
        ty: method.return_type.clone(),
        method,
        target: None,
        args,
    }))
}

/// Positional construction through `ctor`.
pub fn new_object(ctor: CtorRef, args: Vec<ExprRef>) -> ExprRef {
    Arc::new(Expr::New(NewExpr {
        ty: ctor.declaring_type.clone(),
        ctor: Some(ctor),
        args,
        members: None,
    }))
}

/// Keyed construction: `args[i]` initializes `members[i]`.
pub fn new_keyed(
    ctor: CtorRef,
    args: Vec<ExprRef>,
    members: Vec<MemberRef>,
) -> ExprResult<ExprRef> {
    validated(Expr::New(NewExpr {
        ty: ctor.declaring_type.clone(),
        ctor: Some(ctor),
        args,
        members: Some(members),
    }))
}

/// Construction of a value type without a constructor.
pub fn new_value(ty: TypeRef) -> ExprRef {
    Arc::new(Expr::New(NewExpr {
        ty,
        ctor: None,
        args: Vec::new(),
        members: None,
    }))
}

/// `operand is type_operand`.
pub fn type_is(operand: ExprRef, type_operand: TypeRef) -> ExprRef {
    type_test(TypeTestOp::TypeIs, operand, type_operand)
}

/// Runtime type test of either flavor.
pub fn type_test(op: TypeTestOp, operand: ExprRef, type_operand: TypeRef) -> ExprRef {
    Arc::new(Expr::TypeBinary(TypeBinaryExpr {
        op,
        ty: TypeRef::boolean(),
        type_operand,
        operand,
    }))
}

/// One element initializer of a collection initializer.
pub fn element_init(add_method: MethodRef, args: Vec<ExprRef>) -> ElementInit {
    ElementInit { add_method, args }
}

/// Collection initializer over `new_expr`, which must be a `New` node.
pub fn list_init(new_expr: ExprRef, initializers: Vec<ElementInit>) -> ExprResult<ExprRef> {
    validated(Expr::ListInit(ListInitExpr {
        ty: new_expr.static_type().clone(),
        new_expr,
        initializers,
    }))
}

/// One `member = value` binding of an object initializer.
pub fn bind(member: MemberRef, value: ExprRef) -> MemberBinding {
    MemberBinding { member, value }
}

/// Object initializer over `new_expr`, which must be a `New` node.
pub fn member_init(new_expr: ExprRef, bindings: Vec<MemberBinding>) -> ExprResult<ExprRef> {
    validated(Expr::MemberInit(MemberInitExpr {
        ty: new_expr.static_type().clone(),
        new_expr,
        bindings,
    }))
}

/// Lambda with delegate type `Func<param types..., body type>`.
pub fn lambda(body: ExprRef, params: Vec<ExprRef>) -> ExprResult<ExprRef> {
    let ty = TypeRef::func(
        params.iter().map(|p| p.static_type().clone()).collect(),
        body.static_type().clone(),
    );
    validated(Expr::Lambda(LambdaExpr { ty, body, params }))
}

/// `test ? if_true : if_false`, typed after `if_true`.
pub fn conditional(test: ExprRef, if_true: ExprRef, if_false: ExprRef) -> ExprRef {
    Arc::new(Expr::Conditional(ConditionalExpr {
        ty: if_true.static_type().clone(),
        test,
        if_true,
        if_false,
    }))
}

/// Invocation of a delegate-valued expression.
pub fn invoke(target: ExprRef, args: Vec<ExprRef>, ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Invocation(InvocationExpr { ty, target, args }))
}

/// Array construction of the given flavor.
pub fn new_array(kind: NewArrayKind, ty: TypeRef, exprs: Vec<ExprRef>) -> ExprRef {
    Arc::new(Expr::NewArray(NewArrayExpr { kind, ty, exprs }))
}

/// Default value of `ty`.
pub fn default_value(ty: TypeRef) -> ExprRef {
    Arc::new(Expr::Default(DefaultExpr { ty }))
}

#[cfg(test)]
#[path = "../../tests/unit/tree/build.rs"]
mod tests;
