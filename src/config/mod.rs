mod settings;


use crate::config::settings::PartialSettings;
use crate::utils::error::RelayError;
use config::{Config, Environment, File};

pub use settings::{
    AuthSettings, BufferSettings, LivenessSettings, LoggingSettings, ServerSettings, Settings,
};

/// Default location of the optional configuration file, without extension.
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Prefix for environment overrides, e.g. `HOOKBUF_BUFFER__MAX_MESSAGES`.
pub const ENV_PREFIX: &str = "HOOKBUF";

/// Loads the configuration from the default file and environment variables.
pub fn load_config() -> Result<Settings, RelayError> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

/// Loads the configuration from `path` (optional, any format `config`
/// recognises by extension) and `HOOKBUF_*` environment variables,
/// merges it with default values and validates the result.
pub fn load_config_from(path: &str) -> Result<Settings, RelayError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    let settings = merge_with_defaults(partial);
    settings.validate()?;
    Ok(settings)
}

fn merge_with_defaults(partial: PartialSettings) -> Settings {
    let default = Settings::default();

    Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            public_port: partial
                .server
                .as_ref()
                .and_then(|s| s.public_port)
                .unwrap_or(default.server.public_port),
            internal_port: partial
                .server
                .as_ref()
                .and_then(|s| s.internal_port)
                .unwrap_or(default.server.internal_port),
        },
        buffer: BufferSettings {
            max_messages: partial
                .buffer
                .as_ref()
                .and_then(|b| b.max_messages)
                .unwrap_or(default.buffer.max_messages),
            max_body_bytes: partial
                .buffer
                .as_ref()
                .and_then(|b| b.max_body_bytes)
                .unwrap_or(default.buffer.max_body_bytes),
        },
        liveness: LivenessSettings {
            expiry_minutes: partial
                .liveness
                .as_ref()
                .and_then(|l| l.expiry_minutes)
                .unwrap_or(default.liveness.expiry_minutes),
            check_interval_secs: partial
                .liveness
                .as_ref()
                .and_then(|l| l.check_interval_secs)
                .unwrap_or(default.liveness.check_interval_secs),
        },
        auth: AuthSettings {
            api_token: partial
                .auth
                .as_ref()
                .and_then(|a| a.api_token.clone())
                .unwrap_or(default.auth.api_token),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    }
}
