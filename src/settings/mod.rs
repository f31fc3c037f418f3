//! Settings model for SqlPackage invocations.
//!
//! The model is deliberately permissive: every parameter is optional and
//! no cross-field validation happens at construction time. A settings
//! instance may hold a connection string, a file and discrete server
//! fields for the same endpoint at once; the argument builder decides
//! which form wins when the command line is emitted.

mod action;
mod kv;
mod model;

pub use action::SqlPackageAction;
pub use kv::ParamMap;
pub use model::{EndpointSettings, SqlPackageSettings};
