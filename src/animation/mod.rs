pub(crate) mod audio;
pub(crate) mod ease;
pub(crate) mod palette;
pub(crate) mod periodic;
pub(crate) mod spline;
pub(crate) mod timeline;
pub(crate) mod variation;
