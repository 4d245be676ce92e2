pub(crate) mod cors;
pub(crate) mod trace;
