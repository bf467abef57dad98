pub mod build;
pub(crate) mod ident;
pub(crate) mod node;
pub(crate) mod value;
