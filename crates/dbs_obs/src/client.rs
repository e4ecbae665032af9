//! obs-websocket v5 session.

use crate::auth::authentication_string;
use crate::protocol::{
    Frame, Hello, Identified, Identify, OpCode, RPC_VERSION, Request, RequestResponse,
};
use async_trait::async_trait;
use dbs_error::{ObsError, ObsErrorKind};
use dbs_interface::{InputSettings, SceneConnector, SceneControl, SceneItem};
use derive_getters::Getters;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, error, info, instrument, trace};

/// Opens [`ObsClient`] sessions against one obs-websocket server.
#[derive(Clone, Getters)]
pub struct ObsConnector {
    /// Host name or address
    host: String,
    /// TCP port, 4455 by default in OBS
    port: u16,
    /// Server password, when authentication is enabled
    #[getter(skip)]
    password: Option<String>,
}

impl ObsConnector {
    /// Create a connector.
    pub fn new(host: impl Into<String>, port: u16, password: Option<String>) -> Self {
        Self {
            host: host.into(),
            port,
            password,
        }
    }

    /// WebSocket URL of the server.
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for ObsConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObsConnector")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl SceneConnector for ObsConnector {
    type Control = ObsClient;

    async fn connect(&self) -> Result<ObsClient, ObsError> {
        ObsClient::connect(&self.url(), self.password.as_deref()).await
    }
}

/// An identified obs-websocket session.
///
/// Requests are sent one at a time; each call waits for the response with
/// the matching request id. Events are discarded.
pub struct ObsClient {
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    rpc_version: u32,
}

impl std::fmt::Debug for ObsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObsClient")
            .field("rpc_version", &self.rpc_version)
            .finish_non_exhaustive()
    }
}

impl ObsClient {
    /// Connect to `url` and complete the Hello/Identify handshake.
    #[instrument(skip(password))]
    pub async fn connect(url: &str, password: Option<&str>) -> Result<Self, ObsError> {
        info!("Connecting to OBS");

        let (ws_stream, _) = connect_async(url).await.map_err(|e| {
            error!("WebSocket connection failed: {}", e);
            ObsError::new(ObsErrorKind::Connection(format!("{}: {}", url, e)))
        })?;

        let mut client = Self {
            ws_stream,
            rpc_version: RPC_VERSION,
        };
        client.handshake(password).await?;

        info!(rpc_version = client.rpc_version, "Connected to OBS");
        Ok(client)
    }

    /// RPC version agreed with the server.
    pub fn rpc_version(&self) -> u32 {
        self.rpc_version
    }

    async fn handshake(&mut self, password: Option<&str>) -> Result<(), ObsError> {
        let hello: Hello = self.expect_frame(OpCode::Hello).await?;
        debug!(
            server_version = %hello.obs_web_socket_version,
            rpc_version = hello.rpc_version,
            auth_required = hello.authentication.is_some(),
            "Received Hello"
        );

        let authentication = match (&hello.authentication, password) {
            (Some(challenge), Some(password)) => Some(authentication_string(
                password,
                &challenge.salt,
                &challenge.challenge,
            )),
            (Some(_), None) => {
                return Err(ObsError::new(ObsErrorKind::Authentication(
                    "server requires a password but OBS_PASSWORD is not set".to_string(),
                )));
            }
            (None, _) => None,
        };

        let identify = Identify {
            rpc_version: RPC_VERSION,
            authentication,
            event_subscriptions: 0,
        };
        self.send_frame(OpCode::Identify, &identify)
            .await
            .map_err(|e| ObsError::new(ObsErrorKind::Handshake(e.kind.to_string())))?;

        // A rejected password closes the socket instead of answering.
        let identified: Identified =
            self.expect_frame(OpCode::Identified)
                .await
                .map_err(|e| match e.kind {
                    ObsErrorKind::Closed(reason) if hello.authentication.is_some() => {
                        ObsError::new(ObsErrorKind::Authentication(reason))
                    }
                    other => ObsError::new(other),
                })?;
        self.rpc_version = identified.negotiated_rpc_version;
        Ok(())
    }

    async fn send_frame<T: Serialize>(&mut self, op: OpCode, d: &T) -> Result<(), ObsError> {
        let json = serde_json::to_string(&Frame::new(op, d)).map_err(|e| {
            ObsError::new(ObsErrorKind::InvalidMessage(format!(
                "Serialization error: {}",
                e
            )))
        })?;
        trace!("Sending frame: {}", json);

        self.ws_stream
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ObsError::new(ObsErrorKind::Connection(format!("Send error: {}", e))))
    }

    /// Next text frame from the server.
    async fn next_frame(&mut self) -> Result<Frame, ObsError> {
        while let Some(msg_result) = self.ws_stream.next().await {
            let msg = msg_result.map_err(|e| {
                ObsError::new(ObsErrorKind::Closed(format!("Receive error: {}", e)))
            })?;

            match msg {
                Message::Text(text) => {
                    trace!("Received frame: {}", text);
                    return serde_json::from_str(&text).map_err(|e| {
                        ObsError::new(ObsErrorKind::InvalidMessage(format!(
                            "Parse error: {}",
                            e
                        )))
                    });
                }
                Message::Close(frame) => {
                    let reason = frame
                        .map(|f| format!("{} {}", u16::from(f.code), f.reason))
                        .unwrap_or_else(|| "no close frame".to_string());
                    return Err(ObsError::new(ObsErrorKind::Closed(reason)));
                }
                _ => {}
            }
        }

        Err(ObsError::new(ObsErrorKind::Closed(
            "connection ended".to_string(),
        )))
    }

    /// Wait for a frame with opcode `op`, skipping events.
    async fn expect_frame<T: DeserializeOwned>(&mut self, op: OpCode) -> Result<T, ObsError> {
        loop {
            let frame = self.next_frame().await?;
            if frame.op == OpCode::Event.code() {
                continue;
            }
            if frame.op != op.code() {
                return Err(ObsError::new(ObsErrorKind::Handshake(format!(
                    "expected op {} but received op {}",
                    op.code(),
                    frame.op
                ))));
            }
            return serde_json::from_value(frame.d).map_err(|e| {
                ObsError::new(ObsErrorKind::InvalidMessage(format!(
                    "Unexpected payload for op {}: {}",
                    op.code(),
                    e
                )))
            });
        }
    }

    /// Send a request and return its `responseData` (or `null`).
    #[instrument(skip(self, request_data))]
    pub async fn request(
        &mut self,
        request_type: &str,
        request_data: Option<Value>,
    ) -> Result<Value, ObsError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let request = Request {
            request_type,
            request_id: request_id.clone(),
            request_data,
        };
        self.send_frame(OpCode::Request, &request).await?;

        loop {
            let frame = self.next_frame().await?;
            if frame.op != OpCode::RequestResponse.code() {
                trace!(op = frame.op, "Ignoring frame while awaiting response");
                continue;
            }

            let response: RequestResponse = serde_json::from_value(frame.d).map_err(|e| {
                ObsError::new(ObsErrorKind::InvalidMessage(format!(
                    "Invalid RequestResponse: {}",
                    e
                )))
            })?;
            if response.request_id != request_id {
                trace!(request_id = %response.request_id, "Ignoring response to another request");
                continue;
            }

            if !response.request_status.result {
                return Err(ObsError::new(ObsErrorKind::Request {
                    request_type: response.request_type,
                    code: response.request_status.code,
                    comment: response.request_status.comment.unwrap_or_default(),
                }));
            }
            return Ok(response.response_data.unwrap_or(Value::Null));
        }
    }

    async fn request_as<T: DeserializeOwned>(
        &mut self,
        request_type: &str,
        request_data: Value,
    ) -> Result<T, ObsError> {
        let data = self.request(request_type, Some(request_data)).await?;
        serde_json::from_value(data).map_err(|e| {
            ObsError::new(ObsErrorKind::InvalidMessage(format!(
                "Unexpected {} response: {}",
                request_type, e
            )))
        })
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneItemList {
    scene_items: Vec<SceneItem>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneItemCreated {
    scene_item_id: i64,
}

#[async_trait]
impl SceneControl for ObsClient {
    async fn create_scene(&mut self, scene_name: &str) -> Result<(), ObsError> {
        self.request("CreateScene", Some(json!({ "sceneName": scene_name })))
            .await
            .map(|_| ())
    }

    async fn get_scene_item_list(&mut self, scene_name: &str) -> Result<Vec<SceneItem>, ObsError> {
        let list: SceneItemList = self
            .request_as("GetSceneItemList", json!({ "sceneName": scene_name }))
            .await?;
        Ok(list.scene_items)
    }

    async fn get_input_settings(&mut self, input_name: &str) -> Result<InputSettings, ObsError> {
        self.request_as("GetInputSettings", json!({ "inputName": input_name }))
            .await
    }

    async fn set_input_settings(
        &mut self,
        input_name: &str,
        settings: Value,
        overlay: bool,
    ) -> Result<(), ObsError> {
        self.request(
            "SetInputSettings",
            Some(json!({
                "inputName": input_name,
                "inputSettings": settings,
                "overlay": overlay,
            })),
        )
        .await
        .map(|_| ())
    }

    async fn create_input(
        &mut self,
        scene_name: &str,
        input_name: &str,
        input_kind: &str,
        settings: Value,
        enabled: bool,
    ) -> Result<i64, ObsError> {
        let created: SceneItemCreated = self
            .request_as(
                "CreateInput",
                json!({
                    "sceneName": scene_name,
                    "inputName": input_name,
                    "inputKind": input_kind,
                    "inputSettings": settings,
                    "sceneItemEnabled": enabled,
                }),
            )
            .await?;
        Ok(created.scene_item_id)
    }

    async fn create_scene_item(
        &mut self,
        scene_name: &str,
        source_name: &str,
    ) -> Result<i64, ObsError> {
        let created: SceneItemCreated = self
            .request_as(
                "CreateSceneItem",
                json!({
                    "sceneName": scene_name,
                    "sourceName": source_name,
                    "sceneItemEnabled": true,
                }),
            )
            .await?;
        Ok(created.scene_item_id)
    }

    async fn set_current_program_scene(&mut self, scene_name: &str) -> Result<(), ObsError> {
        self.request(
            "SetCurrentProgramScene",
            Some(json!({ "sceneName": scene_name })),
        )
        .await
        .map(|_| ())
    }

    async fn close(&mut self) -> Result<(), ObsError> {
        debug!("Closing OBS session");
        self.ws_stream
            .close(None)
            .await
            .map_err(|e| ObsError::new(ObsErrorKind::Closed(format!("Close error: {}", e))))
    }
}
