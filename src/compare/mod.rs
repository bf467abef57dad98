pub(crate) mod comparator;
pub(crate) mod comparer;
pub(crate) mod hasher;
pub(crate) mod linearize;
