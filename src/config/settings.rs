use serde::Deserialize;

use crate::relay::state::DEFAULT_MAX_BODY_BYTES;
use crate::utils::error::RelayError;

/// Largest expiry whose length in seconds still fits in a `u64`.
pub const MAX_EXPIRY_MINUTES: u64 = u64::MAX / 60;

/// Top-level configuration settings for the application.
///
/// Includes settings for the listeners, the message buffer, consumer liveness,
/// the internal surface's shared secret and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub buffer: BufferSettings,
    pub liveness: LivenessSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the two HTTP listeners.
///
/// The public webhook and the internal retrieval API must listen on
/// different ports.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub public_port: u16,
    pub internal_port: u16,
}

/// Buffer settings.
///
/// `max_messages` bounds how many messages are held; `max_body_bytes` bounds
/// the size of each one.
#[derive(Debug, Deserialize, Clone)]
pub struct BufferSettings {
    pub max_messages: usize,
    pub max_body_bytes: usize,
}

/// Consumer liveness settings.
///
/// `expiry_minutes` of silence make the consumer unreachable; the check runs
/// every `check_interval_secs`.
#[derive(Debug, Deserialize, Clone)]
pub struct LivenessSettings {
    pub expiry_minutes: u64,
    pub check_interval_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct AuthSettings {
    pub api_token: String,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("api_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub buffer: Option<PartialBufferSettings>,
    pub liveness: Option<PartialLivenessSettings>,
    pub auth: Option<PartialAuthSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub public_port: Option<u16>,
    pub internal_port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBufferSettings {
    pub max_messages: Option<usize>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLivenessSettings {
    pub expiry_minutes: Option<u64>,
    pub check_interval_secs: Option<u64>,
}

#[derive(Deserialize)]
pub struct PartialAuthSettings {
    pub api_token: Option<String>,
}

impl std::fmt::Debug for PartialAuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialAuthSettings")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// There is no default shared secret, so `validate` rejects the defaults
/// until `auth.api_token` is supplied.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                public_port: 8080,
                internal_port: 8081,
            },
            buffer: BufferSettings {
                max_messages: 1000,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
            liveness: LivenessSettings {
                expiry_minutes: 5,
                check_interval_secs: 5,
            },
            auth: AuthSettings {
                api_token: String::new(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Rejects combinations the relay cannot run with.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.auth.api_token.trim().is_empty() {
            return Err(invalid("auth.api_token must be set"));
        }
        if self.server.public_port == self.server.internal_port {
            return Err(invalid(
                "server.public_port and server.internal_port must differ",
            ));
        }
        if self.buffer.max_messages == 0 {
            return Err(invalid("buffer.max_messages must be positive"));
        }
        if self.buffer.max_body_bytes == 0 {
            return Err(invalid("buffer.max_body_bytes must be positive"));
        }
        if self.liveness.expiry_minutes == 0 {
            return Err(invalid("liveness.expiry_minutes must be positive"));
        }
        if self.liveness.expiry_minutes > MAX_EXPIRY_MINUTES {
            return Err(invalid("liveness.expiry_minutes is too large"));
        }
        if self.liveness.check_interval_secs == 0 {
            return Err(invalid("liveness.check_interval_secs must be positive"));
        }
        Ok(())
    }

    pub fn public_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.public_port)
    }

    pub fn internal_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.internal_port)
    }
}

fn invalid(reason: &str) -> RelayError {
    RelayError::InvalidConfig(reason.to_string())
}
