//! Command bodies. Each reads its settings from an already prepared
//! [`KeyStore`](crate::config::KeyStore) and writes to the given output.

pub mod add;
pub mod spin;
