pub(crate) mod collect;
pub(crate) mod generator;
pub(crate) mod record;
pub(crate) mod source;
