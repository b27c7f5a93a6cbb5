pub(crate) mod sampler;
pub(crate) mod schedule;
