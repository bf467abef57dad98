//! Payload of constant nodes.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::tree::ident::TypeRef;

/// A caller-defined constant with its own equality and hash.
///
/// Implement this for domain objects that should compare by value inside a constant node. The
/// two methods must agree: `eq_value` true implies equal `hash_value`.
pub trait CustomValue: Any + fmt::Debug + Send + Sync {
    /// Structural equality against another custom value (usually via downcast to `Self`).
    fn eq_value(&self, other: &dyn CustomValue) -> bool;

    /// Hash consistent with [`CustomValue::eq_value`].
    fn hash_value(&self) -> u64;
}

/// Shared opaque object captured in a constant, compared by reference identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Any + Send + Sync>);

impl ObjectRef {
    /// Wrap a fresh object. Clones of the returned handle are equal; another `new` is not.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Downcast to the concrete object type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ObjectRef {}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.addr());
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({:#x})", self.addr())
    }
}

/// Value held by a constant node.
#[derive(Clone, Debug)]
pub enum ConstValue {
    /// Boolean literal.
    Bool(bool),
    /// Character literal.
    Char(char),
    /// Signed integer literal (all widths).
    Int(i64),
    /// Unsigned integer literal (all widths).
    UInt(u64),
    /// Floating point literal. NaN equals NaN, `0.0` equals `-0.0`.
    Float(f64),
    /// String literal.
    Str(Arc<str>),
    /// A type used as a value (e.g. `typeof(T)`).
    Type(TypeRef),
    /// Captured object compared by reference.
    Object(ObjectRef),
    /// Captured object with caller-defined equality.
    Custom(Arc<dyn CustomValue>),
}

impl ConstValue {
    /// Wrap a [`CustomValue`].
    pub fn custom(value: impl CustomValue) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Wrap an opaque object compared by reference.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::Object(ObjectRef::new(value))
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn float_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

impl PartialEq for ConstValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_eq(*a, *b),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Type(a), Self::Type(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => a.eq_value(b.as_ref()),
            _ => false,
        }
    }
}

impl Eq for ConstValue {}

impl Hash for ConstValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::UInt(v) => v.hash(state),
            Self::Float(v) => float_bits(*v).hash(state),
            Self::Str(v) => v.hash(state),
            Self::Type(v) => v.hash(state),
            Self::Object(v) => v.hash(state),
            Self::Custom(v) => state.write_u64(v.hash_value()),
        }
    }
}

impl From<bool> for ConstValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for ConstValue {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<i32> for ConstValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for ConstValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for ConstValue {
    fn from(v: u32) -> Self {
        Self::UInt(u64::from(v))
    }
}

impl From<u64> for ConstValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for ConstValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ConstValue {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for ConstValue {
    fn from(v: String) -> Self {
        Self::Str(v.into())
    }
}

impl From<TypeRef> for ConstValue {
    fn from(v: TypeRef) -> Self {
        Self::Type(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/value.rs"]
mod tests;
