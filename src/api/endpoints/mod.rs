//! Request handlers, one module per route family.

pub mod ask;
pub mod assets;
pub mod code;
pub mod pdf;
pub mod save;
