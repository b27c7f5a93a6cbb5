pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod input;
pub(crate) mod prepared;
pub(crate) mod snapshot;
