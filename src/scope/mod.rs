//! Scope chains shared by the type checker (over types) and the
//! interpreter (over values).

pub mod scope;
