use std::fmt::{Debug, Formatter};
use std::time::Duration;

use custom_error::custom_error;
use log::{info, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

custom_error! {pub ConnectionError
    Insecure{endpoint: String} = "refusing insecure connection to {endpoint}",
    EmptyPayload = "no data to send",
}

/// Descriptor of a connection to a remote API endpoint.
///
/// Nothing is validated on construction and no socket is ever opened: each
/// operation only reports what it would do. Operations are independent of
/// each other, so `send_data` does not require a prior `connect`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureConnection {
    endpoint: String,
    api_key: String,
    secure: bool,
    timeout_secs: u64,
}

impl Debug for SecureConnection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureConnection")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***redacted***")
            .field("secure", &self.secure)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SecureConnection {
    /// Creates a secure connection with the default timeout.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            secure: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_security(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The steps a session drives against a connection.
pub trait ConnectionOperations {
    fn endpoint(&self) -> &str;
    fn connect(&self) -> Result<(), ConnectionError>;
    /// Returns the number of items sent.
    fn send_data<S: AsRef<str>>(&self, items: &[S]) -> Result<usize, ConnectionError>;
    fn disconnect(&self);
}

impl ConnectionOperations for SecureConnection {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn connect(&self) -> Result<(), ConnectionError> {
        if !self.secure {
            warn!("Refusing insecure connection to {}", self.endpoint);
            eprintln!("⚠️ Warning: insecure connection");
            return Err(ConnectionError::Insecure {
                endpoint: self.endpoint.clone(),
            });
        }

        if self.api_key.is_empty() {
            warn!("No API key set for {}", self.endpoint);
        }
        info!(
            "🔗 Connecting to {} (timeout={}s)",
            self.endpoint, self.timeout_secs
        );
        println!(
            "Connecting to {} with a timeout of {} seconds",
            self.endpoint, self.timeout_secs
        );
        Ok(())
    }

    fn send_data<S: AsRef<str>>(&self, items: &[S]) -> Result<usize, ConnectionError> {
        if items.is_empty() {
            warn!("Empty payload for {}", self.endpoint);
            eprintln!("❌ Error: no data to send");
            return Err(ConnectionError::EmptyPayload);
        }

        info!("📤 Sending {} item(s) to {}", items.len(), self.endpoint);
        println!("Sending {} data items", items.len());
        Ok(items.len())
    }

    fn disconnect(&self) {
        info!("Disconnecting from {}", self.endpoint);
        println!("Disconnecting from {}", self.endpoint);
    }
}
