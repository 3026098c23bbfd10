pub mod builtin;
pub(crate) mod catalog;
pub(crate) mod param;
pub(crate) mod template;
