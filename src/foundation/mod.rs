pub(crate) mod error;
pub(crate) mod stable_hash;
