use super::*;
use crate::tree::build;

fn int() -> TypeRef {
    TypeRef::int32()
}

#[test]
fn kind_codes_are_unique() {
    let kinds = [
        NodeKind::Constant,
        NodeKind::Parameter,
        NodeKind::MemberAccess,
        NodeKind::Call,
        NodeKind::New,
        NodeKind::ListInit,
        NodeKind::MemberInit,
        NodeKind::Lambda,
        NodeKind::Conditional,
        NodeKind::Invoke,
        NodeKind::Default,
        NodeKind::Binary(BinaryOp::Add),
        NodeKind::Binary(BinaryOp::Assign),
        NodeKind::Unary(UnaryOp::Negate),
        NodeKind::Unary(UnaryOp::PostDecrementAssign),
        NodeKind::TypeBinary(TypeTestOp::TypeIs),
        NodeKind::TypeBinary(TypeTestOp::TypeEqual),
        NodeKind::NewArray(NewArrayKind::Init),
        NodeKind::NewArray(NewArrayKind::Bounds),
    ];
    let codes: std::collections::HashSet<u32> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
}

#[test]
fn kind_display() {
    assert_eq!(NodeKind::Binary(BinaryOp::OrElse).to_string(), "Binary(OrElse)");
    assert_eq!(NodeKind::MemberAccess.to_string(), "MemberAccess");
}

#[test]
fn call_children_put_target_before_args() {
    let recv = build::parameter("s", TypeRef::string());
    let arg = build::constant(1, int());
    let m = MethodRef::new(TypeRef::string(), "Substring", vec![int()], TypeRef::string());
    let call = build::call(recv.clone(), m.clone(), vec![arg.clone()]);
    let kids = call.children();
    assert_eq!(kids.len(), 2);
    assert!(std::ptr::eq(kids[0], &*recv));
    assert!(std::ptr::eq(kids[1], &*arg));

    let stat = build::static_call(m, vec![arg.clone()]);
    assert_eq!(stat.children().len(), 1);
}

#[test]
fn static_member_has_no_children() {
    let m = MemberRef::property(TypeRef::named("DateTime"), "Now", TypeRef::named("DateTime"));
    assert!(build::member(None, m).children().is_empty());
}

#[test]
fn list_init_children_flatten_initializer_args() {
    let list = TypeRef::generic("List", vec![int()]);
    let add = MethodRef::new(list.clone(), "Add", vec![int()], TypeRef::named("Void"));
    let new = build::new_object(CtorRef::new(list, vec![]), vec![]);
    let one = build::constant(1, int());
    let two = build::constant(2, int());
    let li = build::list_init(
        new.clone(),
        vec![
            build::element_init(add.clone(), vec![one.clone()]),
            build::element_init(add, vec![two.clone()]),
        ],
    )
    .unwrap();
    let kids = li.children();
    assert_eq!(kids.len(), 3);
    assert!(std::ptr::eq(kids[0], &*new));
    assert!(std::ptr::eq(kids[1], &*one));
    assert!(std::ptr::eq(kids[2], &*two));
}

#[test]
fn lambda_children_put_body_before_params() {
    let x = build::parameter("x", int());
    let body = build::binary(BinaryOp::Add, x.clone(), x.clone(), int());
    let lam = build::lambda(body.clone(), vec![x.clone()]).unwrap();
    let kids = lam.children();
    assert!(std::ptr::eq(kids[0], &*body));
    assert!(std::ptr::eq(kids[1], &*x));
}

#[test]
fn conditional_children_order() {
    let t = build::constant(true, TypeRef::boolean());
    let a = build::constant(1, int());
    let b = build::constant(2, int());
    let c = build::conditional(t.clone(), a.clone(), b.clone());
    let kids = c.children();
    assert!(std::ptr::eq(kids[0], &*t));
    assert!(std::ptr::eq(kids[1], &*a));
    assert!(std::ptr::eq(kids[2], &*b));
}

#[test]
fn validate_rejects_members_args_length_mismatch() {
    let ctor = CtorRef::new(TypeRef::named("Anon"), vec![int(), int()]);
    let bad = Expr::New(NewExpr {
        ty: TypeRef::named("Anon"),
        ctor: Some(ctor),
        args: vec![build::constant(1, int()), build::constant(2, int())],
        members: Some(vec![MemberRef::property(TypeRef::named("Anon"), "A", int())]),
    });
    assert_eq!(
        bad.validate(),
        Err(ExprError::arity("keyed construction members", 2, 1))
    );
}

#[test]
fn validate_rejects_non_new_initializer_target() {
    let bad = Expr::MemberInit(MemberInitExpr {
        ty: int(),
        new_expr: build::constant(1, int()),
        bindings: vec![],
    });
    assert_eq!(
        bad.validate(),
        Err(ExprError::unexpected_kind("New", NodeKind::Constant))
    );
}

#[test]
fn validate_rejects_empty_element_initializer() {
    let list = TypeRef::generic("List", vec![int()]);
    let add = MethodRef::new(list.clone(), "Add", vec![int()], TypeRef::named("Void"));
    let bad = Expr::ListInit(ListInitExpr {
        ty: list.clone(),
        new_expr: build::new_object(CtorRef::new(list, vec![]), vec![]),
        initializers: vec![ElementInit {
            add_method: add,
            args: vec![],
        }],
    });
    assert!(matches!(bad.validate(), Err(ExprError::Validation(_))));
}

#[test]
fn validate_rejects_non_parameter_lambda_params() {
    let bad = Expr::Lambda(LambdaExpr {
        ty: TypeRef::func(vec![int()], int()),
        body: build::constant(1, int()),
        params: vec![build::constant(2, int())],
    });
    assert_eq!(
        bad.validate(),
        Err(ExprError::unexpected_kind("Parameter", NodeKind::Constant))
    );
}

#[test]
fn validate_recurses_into_children() {
    let bad_inner = std::sync::Arc::new(Expr::Lambda(LambdaExpr {
        ty: TypeRef::func(vec![int()], int()),
        body: build::constant(1, int()),
        params: vec![build::constant(2, int())],
    }));
    let outer = build::invoke(bad_inner, vec![build::constant(3, int())], int());
    assert!(outer.validate().is_err());
}
