//! Shared models

mod id_set;

pub use id_set::{IdSet, Ident};
