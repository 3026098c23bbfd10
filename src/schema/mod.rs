//! Stored block format and the codec between it and live blocks.

pub(crate) mod codec;
pub(crate) mod model;
