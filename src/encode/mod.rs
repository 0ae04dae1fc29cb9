pub(crate) mod artifact;
pub(crate) mod gif;
pub(crate) mod sink;
