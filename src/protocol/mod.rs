//! Protocol layer - MCP over stdio
//!
//! This module provides:
//! - JSON-RPC 2.0 request/response types and MCP tool-call payloads
//! - Newline-delimited JSON codec

pub mod codec;
pub mod messages;

pub use codec::{DEFAULT_MAX_FRAME_BYTES, Decoded, NdJsonCodec};
pub use messages::{
    CallToolParams, CallToolResult, ErrorCode, JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    Methods, TextContent,
};
