//! # Lock RPC Flow
//!
//! Lock arguments travel inside a `LockCallEnvelope`. The lock subsystem is
//! only reached once the envelope has been authenticated, so no lock state is
//! touched by an unauthenticated caller.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, ACCESS_KEY, SECRET_KEY, SERVER_VERSION};
    use chrono::TimeDelta;
    use rpc_auth::{
        AuthEnvelope, AuthError, AuthenticatedArgs, LockCallEnvelope, LockGateway,
        LockGatewayError, RpcAuthApi,
    };
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Lock-protocol arguments as the lock subsystem defines them.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct LockArgs {
        uid: String,
        resource: String,
        server_addr: String,
        service_endpoint: String,
    }

    fn lock_args(resource: &str) -> LockArgs {
        LockArgs {
            uid: "6fd3c6a4-4e8b-4bba-9b7c-d7d9ac3a0d63".to_string(),
            resource: resource.to_string(),
            server_addr: "node-1:9000".to_string(),
            service_endpoint: "/minio/lock".to_string(),
        }
    }

    /// Minimal stand-in for the lock subsystem's state.
    #[derive(Default)]
    struct LockTable {
        held: Mutex<HashMap<String, String>>,
    }

    impl LockTable {
        fn holder(&self, resource: &str) -> Option<String> {
            self.held.lock().ok()?.get(resource).cloned()
        }
    }

    impl LockGateway<LockArgs> for LockTable {
        type Reply = bool;

        fn handle(&self, args: LockArgs) -> Result<bool, LockGatewayError> {
            let mut held = self
                .held
                .lock()
                .map_err(|e| LockGatewayError::CommunicationError(e.to_string()))?;
            if held.contains_key(&args.resource) {
                return Ok(false);
            }
            held.insert(args.resource, args.uid);
            Ok(true)
        }
    }

    #[test]
    fn test_authenticated_lock_call_acquires_lock() {
        let server = fixtures::server();
        let mut client = fixtures::client();
        client.accept_login(
            server
                .login(&client.login_request(ACCESS_KEY, SECRET_KEY, SERVER_VERSION))
                .unwrap(),
        );
        let table = LockTable::default();

        let mut call = LockCallEnvelope::wrap(lock_args("bucket/object"));
        assert!(client.stamp(&mut call));

        assert_eq!(server.dispatch_lock_call(call.clone(), &table), Ok(true));
        assert_eq!(server.dispatch_lock_call(call, &table), Ok(false));
        assert_eq!(
            table.holder("bucket/object").as_deref(),
            Some("6fd3c6a4-4e8b-4bba-9b7c-d7d9ac3a0d63")
        );
    }

    #[test]
    fn test_unauthenticated_lock_call_never_mutates_lock_state() {
        let server = fixtures::server();
        let table = LockTable::default();

        let mut call = LockCallEnvelope::wrap(lock_args("bucket/object"));
        call.set_auth_token("forged".to_string());
        call.set_request_time(fixtures::epoch());

        assert_eq!(
            server.dispatch_lock_call(call, &table),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(table.holder("bucket/object"), None);
    }

    #[test]
    fn test_skewed_lock_call_never_mutates_lock_state() {
        let server = fixtures::server();
        let mut client = fixtures::client();
        client.accept_login(
            server
                .login(&client.login_request(ACCESS_KEY, SECRET_KEY, SERVER_VERSION))
                .unwrap(),
        );
        client.clock().advance(TimeDelta::seconds(-10));
        let table = LockTable::default();

        let mut call = LockCallEnvelope::wrap(lock_args("bucket/object"));
        client.stamp(&mut call);

        assert!(server
            .dispatch_lock_call(call, &table)
            .is_err_and(|e| e.is_clock_skew()));
        assert_eq!(table.holder("bucket/object"), None);
    }

    #[test]
    fn test_wrap_preserves_payload_and_auth_is_independent() {
        let server = fixtures::server();
        let mut call = LockCallEnvelope::wrap(lock_args("bucket/object"));
        assert_eq!(call.auth(), &AuthEnvelope::default());

        call.auth_mut().set_auth_token("forged");
        call.auth_mut().set_request_time(fixtures::epoch());
        assert_eq!(call.lock_args(), &lock_args("bucket/object"));

        // Envelope validated on its own; payload content plays no part.
        assert_eq!(server.authenticate(&call), Err(AuthError::InvalidToken));
        assert_eq!(server.authenticate(call.auth()), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_lock_call_survives_the_wire() {
        let server = fixtures::server();
        let mut client = fixtures::client();
        client.accept_login(
            server
                .login(&client.login_request(ACCESS_KEY, SECRET_KEY, SERVER_VERSION))
                .unwrap(),
        );
        let table = LockTable::default();

        let mut call = LockCallEnvelope::wrap(lock_args("bucket/object"));
        client.stamp(&mut call);

        let bytes = serde_json::to_vec(&call).unwrap();
        let received: LockCallEnvelope<LockArgs> = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(received, call);
        assert_eq!(server.dispatch_lock_call(received, &table), Ok(true));
    }
}
