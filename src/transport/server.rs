//! Relay server
//!
//! Owns both listeners and the expiry monitor, and runs them together until
//! the shutdown channel flips to `true`.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::error;

use crate::config::Settings;
use crate::liveness::spawn_expiry_monitor;
use crate::relay::RelayState;
use crate::transport::http::{bind_listener, serve};
use crate::transport::surface::Surface;
use crate::utils::error::RelayError;

#[derive(Debug)]
pub struct RelayServer {
    public: TcpListener,
    internal: TcpListener,
    state: Arc<RelayState>,
    check_interval: Duration,
}

impl RelayServer {
    /// Binds both listeners from `settings`.
    pub fn bind(settings: &Settings, state: Arc<RelayState>) -> Result<Self, RelayError> {
        Ok(Self::from_listeners(
            bind_listener(&settings.public_addr())?,
            bind_listener(&settings.internal_addr())?,
            state,
            Duration::from_secs(settings.liveness.check_interval_secs),
        ))
    }

    pub fn from_listeners(
        public: TcpListener,
        internal: TcpListener,
        state: Arc<RelayState>,
        check_interval: Duration,
    ) -> Self {
        Self {
            public,
            internal,
            state,
            check_interval,
        }
    }

    pub fn public_addr(&self) -> Result<SocketAddr, RelayError> {
        Ok(self.public.local_addr()?)
    }

    pub fn internal_addr(&self) -> Result<SocketAddr, RelayError> {
        Ok(self.internal.local_addr()?)
    }

    /// Serves both surfaces and runs the expiry monitor until `shutdown`
    /// becomes `true` (or its sender is dropped).
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<(), RelayError> {
        let monitor = spawn_expiry_monitor(
            self.state.liveness.clone(),
            self.check_interval,
            shutdown.clone(),
        );

        let served = tokio::try_join!(
            serve(
                self.public,
                Surface::Public,
                self.state.clone(),
                wait_for_shutdown(shutdown.clone()),
            ),
            serve(
                self.internal,
                Surface::Internal,
                self.state,
                wait_for_shutdown(shutdown),
            ),
        );

        if let Err(e) = &served {
            error!("relay server failed: {}", e);
            monitor.abort();
        }
        let _ = monitor.await;

        served.map(|_| ())
    }
}

/// Resolves once shutdown is requested or the sender is gone.
async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
