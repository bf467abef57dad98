use super::*;
use crate::foundation::error::ExprError;
use crate::tree::node::NodeKind;

#[test]
fn member_takes_the_member_type() {
    let id = MemberRef::property(TypeRef::named("A"), "Id", TypeRef::int32());
    let e = member(Some(parameter("a", TypeRef::named("A"))), id);
    assert_eq!(e.kind(), NodeKind::MemberAccess);
    assert_eq!(e.static_type(), &TypeRef::int32());
}

#[test]
fn operator_method_sets_result_type() {
    let s = TypeRef::string();
    let ne = MethodRef::new(s.clone(), "op_Inequality", vec![s.clone(), s.clone()], TypeRef::boolean());
    let e = binary_with_method(
        BinaryOp::NotEqual,
        parameter("a", s.clone()),
        constant("b", s),
        ne.clone(),
    );
    let Expr::Binary(b) = &*e else {
        panic!("expected a binary node");
    };
    assert_eq!(b.method.as_ref(), Some(&ne));
    assert_eq!(b.ty, TypeRef::boolean());
}

#[test]
fn lifted_binary_sets_flags() {
    let n = TypeRef::nullable(TypeRef::int32());
    let e = lifted_binary(
        BinaryOp::Equal,
        parameter("a", n.clone()),
        parameter("b", n.clone()),
        TypeRef::nullable(TypeRef::boolean()),
        true,
    );
    let Expr::Binary(b) = &*e else {
        panic!("expected a binary node");
    };
    assert!(b.is_lifted);
    assert!(b.is_lifted_to_null);
}

#[test]
fn lambda_type_is_func_of_params_and_body() {
    let x = parameter("x", TypeRef::int32());
    let body = type_is(x.clone(), TypeRef::object());
    let lam = lambda(body, vec![x]).unwrap();
    assert_eq!(
        lam.static_type(),
        &TypeRef::func(vec![TypeRef::int32()], TypeRef::boolean())
    );
}

#[test]
fn keyed_construction_checks_lengths() {
    let anon = TypeRef::named("Anon");
    let ctor = CtorRef::new(anon.clone(), vec![TypeRef::int32()]);
    let a = MemberRef::property(anon.clone(), "A", TypeRef::int32());
    let b = MemberRef::property(anon, "B", TypeRef::int32());

    assert!(new_keyed(ctor.clone(), vec![constant(1, TypeRef::int32())], vec![a.clone()]).is_ok());
    let err = new_keyed(ctor, vec![constant(1, TypeRef::int32())], vec![a, b]).unwrap_err();
    assert_eq!(err, ExprError::arity("keyed construction members", 1, 2));
}

#[test]
fn member_init_requires_new() {
    let target = TypeRef::named("Person");
    let name = MemberRef::property(target.clone(), "Name", TypeRef::string());
    let ok = member_init(
        new_object(CtorRef::new(target.clone(), vec![]), vec![]),
        vec![bind(name.clone(), constant("Ann", TypeRef::string()))],
    );
    assert_eq!(ok.unwrap().static_type(), &target);

    let err = member_init(default_value(target), vec![bind(name, null(TypeRef::string()))])
        .unwrap_err();
    assert_eq!(err, ExprError::unexpected_kind("New", NodeKind::Default));
}

#[test]
fn value_type_construction_has_no_ctor() {
    let e = new_value(TypeRef::named("Point"));
    let Expr::New(n) = &*e else {
        panic!("expected a new node");
    };
    assert!(n.ctor.is_none());
    assert!(n.args.is_empty());
}

#[test]
fn convert_is_a_unary_node() {
    let e = convert(parameter("x", TypeRef::int32()), TypeRef::int64());
    assert_eq!(e.kind(), NodeKind::Unary(UnaryOp::Convert));
    assert_eq!(e.static_type(), &TypeRef::int64());
}

#[test]
fn new_array_kind_is_part_of_the_node_kind() {
    let arr = TypeRef::generic("Array", vec![TypeRef::int32()]);
    let init = new_array(NewArrayKind::Init, arr.clone(), vec![constant(1, TypeRef::int32())]);
    let bounds = new_array(NewArrayKind::Bounds, arr, vec![constant(1, TypeRef::int32())]);
    assert_ne!(init.kind(), bounds.kind());
}

#[test]
fn unnamed_parameter_has_no_name() {
    let e = unnamed_parameter(TypeRef::int32());
    let Expr::Parameter(p) = &*e else {
        panic!("expected a parameter node");
    };
    assert!(p.name.is_none());
}
