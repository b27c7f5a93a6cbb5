pub(crate) mod artifact;
pub(crate) mod autofit;
pub(crate) mod length;
