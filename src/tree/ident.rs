//! Value identities for types and declared members.
//!
//! Comparison needs a stable key for "which type / member / method / constructor is this".
//! Each identity here is a plain value (declaring type plus signature) that compares and hashes
//! structurally, so two independently resolved references to the same declaration are equal.

use std::fmt;
use std::sync::Arc;

/// Identity of a static type: a fully-qualified name plus generic arguments.
///
/// Cheap to clone; the payload is shared.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(Arc<TypeInfo>);

#[derive(PartialEq, Eq, Hash)]
struct TypeInfo {
    name: Box<str>,
    args: Box<[TypeRef]>,
}

impl TypeRef {
    /// A non-generic type, e.g. `TypeRef::named("System.Int32")`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    /// A constructed generic type, e.g. `List<Int32>`.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self(Arc::new(TypeInfo {
            name: name.into().into_boxed_str(),
            args: args.into_boxed_slice(),
        }))
    }

    /// `Boolean`.
    pub fn boolean() -> Self {
        Self::named("Boolean")
    }

    /// `Int32`.
    pub fn int32() -> Self {
        Self::named("Int32")
    }

    /// `Int64`.
    pub fn int64() -> Self {
        Self::named("Int64")
    }

    /// `Double`.
    pub fn float64() -> Self {
        Self::named("Double")
    }

    /// `String`.
    pub fn string() -> Self {
        Self::named("String")
    }

    /// `Object`, the top type.
    pub fn object() -> Self {
        Self::named("Object")
    }

    /// `Nullable<inner>`, the lifted form of a value type.
    pub fn nullable(inner: TypeRef) -> Self {
        Self::generic("Nullable", vec![inner])
    }

    /// `Func<params..., ret>`, the delegate type of a lambda.
    pub fn func(params: Vec<TypeRef>, ret: TypeRef) -> Self {
        let mut args = params;
        args.push(ret);
        Self::generic("Func", args)
    }

    /// Fully-qualified name without generic arguments.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Generic arguments, empty for non-generic types.
    pub fn args(&self) -> &[TypeRef] {
        &self.0.args
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if !self.args().is_empty() {
            write!(f, "<")?;
            for (i, a) in self.args().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{a}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({self})")
    }
}

// Serialized as its display form, e.g. `"Nullable<Int32>"`.
impl serde::Serialize for TypeRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether a member is a stored field or an accessor-backed property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum MemberKind {
    /// A field.
    Field,
    /// A property.
    Property,
}

/// Identity of a field or property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberRef {
    /// Type that declares the member.
    pub declaring_type: TypeRef,
    /// Member name.
    pub name: Arc<str>,
    /// Field or property.
    pub kind: MemberKind,
    /// Type of the member's value.
    pub member_type: TypeRef,
}

impl MemberRef {
    /// A property `declaring_type.name` of type `member_type`.
    pub fn property(declaring_type: TypeRef, name: &str, member_type: TypeRef) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            kind: MemberKind::Property,
            member_type,
        }
    }

    /// A field `declaring_type.name` of type `member_type`.
    pub fn field(declaring_type: TypeRef, name: &str, member_type: TypeRef) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            kind: MemberKind::Field,
            member_type,
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

/// Identity of a method, including static operator overloads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Type that declares the method.
    pub declaring_type: TypeRef,
    /// Method name.
    pub name: Arc<str>,
    /// Generic method arguments, empty for non-generic methods.
    pub generic_args: Vec<TypeRef>,
    /// Parameter types in declaration order.
    pub params: Vec<TypeRef>,
    /// Return type.
    pub return_type: TypeRef,
}

impl MethodRef {
    /// A non-generic method.
    pub fn new(declaring_type: TypeRef, name: &str, params: Vec<TypeRef>, ret: TypeRef) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            generic_args: Vec::new(),
            params,
            return_type: ret,
        }
    }

    /// Attach generic method arguments.
    pub fn with_generic_args(mut self, args: Vec<TypeRef>) -> Self {
        self.generic_args = args;
        self
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)?;
        if !self.generic_args.is_empty() {
            write!(f, "<")?;
            for (i, a) in self.generic_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{a}")?;
            }
            write!(f, ">")?;
        }
        write!(f, "(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// Identity of a constructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CtorRef {
    /// Type being constructed.
    pub declaring_type: TypeRef,
    /// Parameter types in declaration order.
    pub params: Vec<TypeRef>,
}

impl CtorRef {
    /// Constructor of `declaring_type` taking `params`.
    pub fn new(declaring_type: TypeRef, params: Vec<TypeRef>) -> Self {
        Self {
            declaring_type,
            params,
        }
    }
}

impl fmt::Display for CtorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new {}(", self.declaring_type)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/ident.rs"]
mod tests;
