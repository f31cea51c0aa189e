//! Wire types and business computations shared by the Rapid-global client.
//!
//! Nothing in this crate touches the browser: everything here compiles and
//! is tested natively.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
