use crate::constants::{
    DEFAULT_HOST, DEFAULT_LOCALE, DEFAULT_LOGIN, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_VHOST,
    MAX_FRAME_BUFFER,
};

/// Connection parameters. The host and port are carried for the transport
/// collaborator's benefit; this crate never opens sockets itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    pub login: String,
    pub password: String,
    pub vhost: String,
    pub locale: String,

    /// Largest frame accepted from the peer and offered in
    /// `connectionTuneOk`.
    pub max_frame_size: usize,

    /// Heartbeat interval in seconds offered in `connectionTuneOk`;
    /// 0 disables heartbeats.
    pub heartbeat: u16,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            login: DEFAULT_LOGIN.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            vhost: DEFAULT_VHOST.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            max_frame_size: MAX_FRAME_BUFFER,
            heartbeat: 0,
        }
    }
}
