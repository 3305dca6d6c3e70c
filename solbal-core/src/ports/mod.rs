//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod registry;
mod rpc;

pub use registry::ProgramRegistry;
pub use rpc::RpcConnection;
