//! The fixed set of native functions visible to every program.

pub mod builtins;

#[cfg(test)]
mod tests;
