//! Translation of host method calls into SQL.
//!
//! Every method a query can call is described by a [`MethodInfo`] declared once as a
//! `static`. Translators recognize methods by their full signature, so overloads sharing a
//! name are told apart.
mod method;
pub mod methods;
mod provider;

pub use method::{MethodCatalog, MethodInfo};
pub use provider::{MethodCallTranslator, MethodCallTranslatorProvider};
