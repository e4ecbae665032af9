//! obs-websocket v5 message envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// RPC version this client speaks.
pub(crate) const RPC_VERSION: u32 = 1;

/// Frame opcodes used by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// Server greeting with optional auth challenge
    Hello = 0,
    /// Client identification
    Identify = 1,
    /// Server accepted identification
    Identified = 2,
    /// Server event
    Event = 5,
    /// Client request
    Request = 6,
    /// Server answer to a request
    RequestResponse = 7,
}

impl OpCode {
    /// Numeric value on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Any frame, with `d` left undecoded until `op` is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Frame<T = Value> {
    pub op: u8,
    pub d: T,
}

impl<T> Frame<T> {
    pub fn new(op: OpCode, d: T) -> Self {
        Self { op: op.code(), d }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Hello {
    #[serde(default)]
    pub obs_web_socket_version: String,
    pub rpc_version: u32,
    #[serde(default)]
    pub authentication: Option<AuthChallenge>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthChallenge {
    pub challenge: String,
    pub salt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identify {
    pub rpc_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    /// Bitmask of event categories; zero subscribes to none.
    pub event_subscriptions: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identified {
    pub negotiated_rpc_version: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Request<'a> {
    pub request_type: &'a str,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestResponse {
    pub request_type: String,
    pub request_id: String,
    pub request_status: RequestStatus,
    #[serde(default)]
    pub response_data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RequestStatus {
    pub result: bool,
    pub code: u16,
    #[serde(default)]
    pub comment: Option<String>,
}
