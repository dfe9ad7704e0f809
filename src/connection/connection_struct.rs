use crate::connection::{
    ConnectionError, ConnectionEvent, ConnectionEventIterator, ConnectionOptions, WireEmit,
};
use crate::constants::{CONTROL_CHANNEL, FRAME_OVERHEAD, PROTOCOL_HEADER, SASL_MECHANISM};
use crate::field::{FieldTable, FieldValue, MethodArguments};
use crate::frame::{Frame, FrameCodec, FrameEncodeError, FrameKind, FrameStreamDecoder};
use crate::protocol::{MethodCodec, MethodRegistry, MethodSchema, ProtocolError};
use std::collections::VecDeque;
use std::sync::Arc;

/// Client-side handshake states, in negotiation order. `Closed` is the
/// absorbing state for user-initiated `end()`, protocol errors, and
/// peer-initiated close alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakePhase {
    Idle,
    HeaderSent,
    StartOkSent,
    TuneOkAndOpenSent,
    Open,
    Closed,
}

/// One AMQP client connection: the handshake state machine plus frame
/// routing for everything after the handshake.
///
/// The connection never performs I/O. Outbound bytes go through the
/// `on_emit` callback; inbound bytes are handed to [`Connection::read_bytes`],
/// which returns the events they produced. Connections are independent of
/// one another; the registry they share is read-only.
pub struct Connection<'a, F: WireEmit> {
    options: ConnectionOptions,
    registry: &'a MethodRegistry,
    decoder: FrameStreamDecoder,
    phase: HandshakePhase,
    server_properties: Option<FieldTable>,
    server_channel_max: u16,
    server_frame_max: u32,
    server_heartbeat: u16,
    on_emit: F,
}

impl<'a, F: WireEmit> Connection<'a, F> {
    pub fn new(options: ConnectionOptions, registry: &'a MethodRegistry, on_emit: F) -> Self {
        let decoder = FrameStreamDecoder::new(options.max_frame_size);
        Self {
            options,
            registry,
            decoder,
            phase: HandshakePhase::Idle,
            server_properties: None,
            server_channel_max: 0,
            server_frame_max: 0,
            server_heartbeat: 0,
            on_emit,
        }
    }

    pub fn phase(&self) -> HandshakePhase {
        self.phase
    }

    /// The table the peer advertised in `connectionStart`, once received.
    pub fn server_properties(&self) -> Option<&FieldTable> {
        self.server_properties.as_ref()
    }

    /// Negotiated max frame size (the value this client sent in
    /// `connectionTuneOk`).
    pub fn frame_max(&self) -> usize {
        self.options.max_frame_size
    }

    /// Negotiated heartbeat interval in seconds; 0 = disabled.
    pub fn heartbeat(&self) -> u16 {
        self.options.heartbeat
    }

    /// The tuning limits the peer advertised in `connectionTune`
    /// (channel max, frame max, heartbeat), once received. Recorded
    /// verbatim; this client replies with its own configured values.
    pub fn server_tune(&self) -> (u16, u32, u16) {
        (
            self.server_channel_max,
            self.server_frame_max,
            self.server_heartbeat,
        )
    }

    /// Starts the handshake by emitting the fixed 8-byte protocol header.
    pub fn connect(&mut self) -> Result<(), ConnectionError> {
        if self.phase != HandshakePhase::Idle {
            return Err(ConnectionError::AlreadyConnected);
        }

        tracing::debug!("sending protocol header");
        (self.on_emit)(&PROTOCOL_HEADER);
        self.phase = HandshakePhase::HeaderSent;
        Ok(())
    }

    /// User-initiated shutdown. Best-effort: stops all further frame
    /// processing; releasing the transport is the caller's side of the
    /// boundary. May be called in any state.
    pub fn end(&mut self) {
        tracing::debug!("connection ended by user");
        self.phase = HandshakePhase::Closed;
    }

    /// Feeds inbound transport bytes to the connection and returns the
    /// events they produced, in arrival order. After a fatal error (or
    /// `end()`) this yields nothing.
    pub fn read_bytes(&mut self, data: &[u8]) -> ConnectionEventIterator {
        let mut queue = VecDeque::new();

        if self.phase == HandshakePhase::Closed {
            return ConnectionEventIterator { queue };
        }

        let frames: Vec<_> = self.decoder.read_bytes(data).collect();
        for result in frames {
            if self.phase == HandshakePhase::Closed {
                break;
            }

            match result {
                Ok(frame) => self.dispatch_frame(frame, &mut queue),
                Err(error) => {
                    self.fail(error.into(), &mut queue);
                    break;
                }
            }
        }

        ConnectionEventIterator { queue }
    }

    /// Encodes and emits one method frame. Used internally by the
    /// handshake and by channel-level callers once the connection is open.
    pub fn send_method(
        &mut self,
        channel: u16,
        method_name: &str,
        arguments: &MethodArguments,
    ) -> Result<(), ConnectionError> {
        if self.phase == HandshakePhase::Closed {
            return Err(ConnectionError::Closed);
        }

        let schema = self
            .registry
            .method_by_name(method_name)
            .ok_or_else(|| ProtocolError::UnknownMethodName(method_name.to_string()))?;
        let schema = Arc::clone(schema);

        let payload = MethodCodec::encode_method(&schema, arguments)?;
        tracing::trace!(method = %schema.name, channel, "sending method");
        (self.on_emit)(&FrameCodec::encode(FrameKind::Method, channel, &payload));
        Ok(())
    }

    /// Encodes and emits one content-header frame for `class_id`.
    pub fn send_content_header(
        &mut self,
        channel: u16,
        class_id: u16,
        body_size: u64,
        properties: &MethodArguments,
    ) -> Result<(), ConnectionError> {
        if self.phase == HandshakePhase::Closed {
            return Err(ConnectionError::Closed);
        }

        let class = self
            .registry
            .content_class(class_id)
            .ok_or(ProtocolError::UnknownContentClass(class_id))?;
        let class = Arc::clone(class);

        let payload = MethodCodec::encode_content_header(&class, 0, body_size, properties)?;
        (self.on_emit)(&FrameCodec::encode(FrameKind::Header, channel, &payload));
        Ok(())
    }

    /// Emits one content-body frame. The payload must fit a single frame;
    /// splitting larger bodies is the channel layer's responsibility.
    pub fn send_content_body(&mut self, channel: u16, payload: &[u8]) -> Result<(), ConnectionError> {
        if self.phase == HandshakePhase::Closed {
            return Err(ConnectionError::Closed);
        }

        let max = self.options.max_frame_size - FRAME_OVERHEAD;
        if payload.len() > max {
            return Err(FrameEncodeError::PayloadTooLarge {
                size: payload.len(),
                max,
            }
            .into());
        }

        (self.on_emit)(&FrameCodec::encode(FrameKind::Body, channel, payload));
        Ok(())
    }

    /// Emits a heartbeat frame on channel 0.
    pub fn send_heartbeat(&mut self) -> Result<(), ConnectionError> {
        if self.phase == HandshakePhase::Closed {
            return Err(ConnectionError::Closed);
        }

        (self.on_emit)(&FrameCodec::encode(
            FrameKind::Heartbeat,
            CONTROL_CHANNEL,
            &[],
        ));
        Ok(())
    }

    fn dispatch_frame(&mut self, frame: Frame, queue: &mut VecDeque<ConnectionEvent>) {
        match frame.kind {
            FrameKind::Heartbeat => {
                tracing::debug!("heartbeat");
                queue.push_back(ConnectionEvent::Heartbeat);
            }
            FrameKind::Body => {
                queue.push_back(ConnectionEvent::ContentBody {
                    channel: frame.channel,
                    payload: frame.payload,
                });
            }
            FrameKind::Header => {
                match MethodCodec::decode_content_header(self.registry, &frame.payload) {
                    Ok(header) => {
                        tracing::trace!(
                            channel = frame.channel,
                            class = %header.class.name,
                            body_size = header.body_size,
                            "content header"
                        );
                        queue.push_back(ConnectionEvent::ContentHeader {
                            channel: frame.channel,
                            header,
                        });
                    }
                    Err(error) => self.fail(error.into(), queue),
                }
            }
            FrameKind::Method => match MethodCodec::decode_method(self.registry, &frame.payload) {
                Ok((schema, arguments)) => {
                    self.handle_method(frame.channel, schema, arguments, queue);
                }
                Err(error) => self.fail(error.into(), queue),
            },
        }
    }

    fn handle_method(
        &mut self,
        channel: u16,
        schema: Arc<MethodSchema>,
        arguments: MethodArguments,
        queue: &mut VecDeque<ConnectionEvent>,
    ) {
        if channel != CONTROL_CHANNEL {
            queue.push_back(ConnectionEvent::Method {
                channel,
                method: schema,
                arguments,
            });
            return;
        }

        match (schema.name.as_str(), self.phase) {
            ("connectionStart", HandshakePhase::HeaderSent) => {
                self.on_connection_start(arguments, queue);
            }
            ("connectionTune", HandshakePhase::StartOkSent) => {
                self.on_connection_tune(arguments, queue);
            }
            ("connectionOpenOk", HandshakePhase::TuneOkAndOpenSent) => {
                tracing::debug!("handshake complete");
                self.phase = HandshakePhase::Open;
                queue.push_back(ConnectionEvent::Ready);
            }
            ("connectionClose", _) => {
                let reply_code = uint_arg(&arguments, "replyCode") as u16;
                let reply_text = str_arg(&arguments, "replyText");
                self.fail(
                    ConnectionError::PeerClosed {
                        reply_code,
                        reply_text,
                    },
                    queue,
                );
            }
            _ => {
                tracing::warn!(method = %schema.name, phase = ?self.phase, "unhandled method");
                queue.push_back(ConnectionEvent::Error(ConnectionError::UnhandledMethod {
                    method: schema.name.clone(),
                }));
            }
        }
    }

    fn on_connection_start(
        &mut self,
        arguments: MethodArguments,
        queue: &mut VecDeque<ConnectionEvent>,
    ) {
        let major = uint_arg(&arguments, "versionMajor") as u8;
        let minor = uint_arg(&arguments, "versionMinor") as u8;
        if (major, minor) != (crate::constants::VERSION_MAJOR, crate::constants::VERSION_MINOR) {
            self.fail(ConnectionError::VersionMismatch { major, minor }, queue);
            return;
        }

        if let Some(FieldValue::Table(properties)) = arguments.get("serverProperties") {
            self.server_properties = Some(properties.clone());
        }

        let mut client_properties = FieldTable::new();
        client_properties.insert("product".to_string(), FieldValue::from("amqp-wire"));
        client_properties.insert(
            "version".to_string(),
            FieldValue::from(env!("CARGO_PKG_VERSION")),
        );
        client_properties.insert("platform".to_string(), FieldValue::from("Rust"));

        // AMQPLAIN: the SASL response is itself an encoded field table of
        // LOGIN and PASSWORD, sent in a longstr slot.
        let mut response = FieldTable::new();
        response.insert(
            "LOGIN".to_string(),
            FieldValue::from(self.options.login.as_str()),
        );
        response.insert(
            "PASSWORD".to_string(),
            FieldValue::from(self.options.password.as_str()),
        );

        let mut args = MethodArguments::new();
        args.insert(
            "clientProperties".to_string(),
            FieldValue::Table(client_properties),
        );
        args.insert(
            "mechanism".to_string(),
            FieldValue::ShortString(SASL_MECHANISM.to_string()),
        );
        args.insert("response".to_string(), FieldValue::Table(response));
        args.insert(
            "locale".to_string(),
            FieldValue::ShortString(self.options.locale.clone()),
        );

        tracing::debug!("sending connectionStartOk");
        if let Err(error) = self.send_method(CONTROL_CHANNEL, "connectionStartOk", &args) {
            self.fail(error, queue);
            return;
        }
        self.phase = HandshakePhase::StartOkSent;
    }

    fn on_connection_tune(
        &mut self,
        arguments: MethodArguments,
        queue: &mut VecDeque<ConnectionEvent>,
    ) {
        self.server_channel_max = uint_arg(&arguments, "channelMax") as u16;
        self.server_frame_max = uint_arg(&arguments, "frameMax") as u32;
        self.server_heartbeat = uint_arg(&arguments, "heartbeat") as u16;

        let mut tune_ok = MethodArguments::new();
        // channelMax 0 = no limit.
        tune_ok.insert("channelMax".to_string(), FieldValue::Int(0));
        tune_ok.insert(
            "frameMax".to_string(),
            FieldValue::Int(self.options.max_frame_size as u32),
        );
        tune_ok.insert(
            "heartbeat".to_string(),
            FieldValue::Int(u32::from(self.options.heartbeat)),
        );

        let mut open = MethodArguments::new();
        open.insert(
            "virtualHost".to_string(),
            FieldValue::ShortString(self.options.vhost.clone()),
        );
        // Reserved/legacy fields.
        open.insert(
            "capabilities".to_string(),
            FieldValue::ShortString(String::new()),
        );
        open.insert("insist".to_string(), FieldValue::Bool(false));

        tracing::debug!(
            frame_max = self.options.max_frame_size,
            heartbeat = self.options.heartbeat,
            "sending connectionTuneOk and connectionOpen"
        );
        if let Err(error) = self
            .send_method(CONTROL_CHANNEL, "connectionTuneOk", &tune_ok)
            .and_then(|()| self.send_method(CONTROL_CHANNEL, "connectionOpen", &open))
        {
            self.fail(error, queue);
            return;
        }
        self.phase = HandshakePhase::TuneOkAndOpenSent;
    }

    fn fail(&mut self, error: ConnectionError, queue: &mut VecDeque<ConnectionEvent>) {
        tracing::debug!(%error, "connection failed");
        self.phase = HandshakePhase::Closed;
        queue.push_back(ConnectionEvent::Error(error));
    }
}

fn uint_arg(arguments: &MethodArguments, name: &str) -> u64 {
    arguments
        .get(name)
        .and_then(FieldValue::as_u64)
        .unwrap_or(0)
}

fn str_arg(arguments: &MethodArguments, name: &str) -> String {
    arguments
        .get(name)
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
        .to_string()
}
