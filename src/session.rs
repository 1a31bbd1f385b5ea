use anyhow::{Context, Result};
use log::info;

use crate::connection::ConnectionOperations;

/// Items sent when none are given on the command line.
pub const DEFAULT_ITEMS: [&str; 3] = ["dato1", "dato2", "dato3"];

/// Connects, sends `items` and disconnects.
///
/// A failed connect returns immediately. A failed send still disconnects
/// before returning the error.
pub fn run_session<C, S>(conn: &C, items: &[S]) -> Result<()>
where
    C: ConnectionOperations,
    S: AsRef<str>,
{
    conn.connect().context("failed to connect")?;

    if let Err(e) = conn.send_data(items) {
        conn.disconnect();
        return Err(e).context("failed to send data");
    }

    conn.disconnect();
    info!("Session with {} completed", conn.endpoint());
    println!("✅ Operation completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{ConnectionError, SecureConnection};
    use rstest::rstest;
    use std::cell::RefCell;

    fn demo_connection() -> SecureConnection {
        SecureConnection::new("https://api.example.com", "api_key_example").with_timeout(60)
    }

    #[test]
    fn literal_inputs_succeed() {
        assert!(run_session(&demo_connection(), &DEFAULT_ITEMS).is_ok());
    }

    #[rstest]
    #[case(true, 3, true)]
    #[case(true, 1, true)]
    #[case(false, 3, false)]
    #[case(true, 0, false)]
    #[case(false, 0, false)]
    fn succeeds_iff_secure_and_non_empty(
        #[case] secure: bool,
        #[case] num_items: usize,
        #[case] expected_ok: bool,
    ) {
        let conn = demo_connection().with_security(secure);
        let items: Vec<String> = (0..num_items).map(|i| format!("item{i}")).collect();
        assert_eq!(run_session(&conn, &items).is_ok(), expected_ok);
    }

    #[test]
    fn connect_failure_has_context() {
        let conn = demo_connection().with_security(false);
        let err = run_session(&conn, &DEFAULT_ITEMS).unwrap_err();
        assert_eq!(err.to_string(), "failed to connect");
        assert!(matches!(
            err.downcast_ref::<ConnectionError>(),
            Some(ConnectionError::Insecure { .. })
        ));
    }

    #[test]
    fn send_failure_has_context() {
        let items: [&str; 0] = [];
        let err = run_session(&demo_connection(), &items).unwrap_err();
        assert_eq!(err.to_string(), "failed to send data");
        assert!(matches!(
            err.downcast_ref::<ConnectionError>(),
            Some(ConnectionError::EmptyPayload)
        ));
    }

    /// Records the order in which session steps are called.
    struct RecordingConnection {
        inner: SecureConnection,
        calls: RefCell<Vec<&'static str>>,
    }

    impl RecordingConnection {
        fn new(inner: SecureConnection) -> Self {
            Self {
                inner,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    impl ConnectionOperations for RecordingConnection {
        fn endpoint(&self) -> &str {
            self.inner.endpoint()
        }

        fn connect(&self) -> Result<(), ConnectionError> {
            self.calls.borrow_mut().push("connect");
            self.inner.connect()
        }

        fn send_data<S: AsRef<str>>(&self, items: &[S]) -> Result<usize, ConnectionError> {
            self.calls.borrow_mut().push("send_data");
            self.inner.send_data(items)
        }

        fn disconnect(&self) {
            self.calls.borrow_mut().push("disconnect");
            self.inner.disconnect();
        }
    }

    #[test]
    fn success_disconnects_after_send() {
        let conn = RecordingConnection::new(demo_connection());
        run_session(&conn, &DEFAULT_ITEMS).unwrap();
        assert_eq!(conn.calls(), vec!["connect", "send_data", "disconnect"]);
    }

    #[test]
    fn failed_connect_does_not_disconnect() {
        let conn = RecordingConnection::new(demo_connection().with_security(false));
        assert!(run_session(&conn, &DEFAULT_ITEMS).is_err());
        assert_eq!(conn.calls(), vec!["connect"]);
    }

    #[test]
    fn failed_send_still_disconnects() {
        let conn = RecordingConnection::new(demo_connection());
        let items: [&str; 0] = [];
        assert!(run_session(&conn, &items).is_err());
        assert_eq!(conn.calls(), vec!["connect", "send_data", "disconnect"]);
    }
}
