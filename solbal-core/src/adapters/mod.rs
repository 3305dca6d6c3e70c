//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - solana-client's nonblocking RpcClient for RpcConnection
//! - Anchor workspace files (Anchor.toml, target/idl) for ProgramRegistry
//! - Mock JSON-RPC server for testing

pub mod anchor_workspace;
pub mod solana_rpc;

#[cfg(test)]
pub mod json_rpc_mock;
