//! # Authenticated RPC Flow
//!
//! Every call after login carries the token and the client's send time. The
//! server checks the token first, then the skew.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, NodeAuth, ACCESS_KEY, SECRET_KEY, SERVER_VERSION};
    use chrono::TimeDelta;
    use rpc_auth::adapters::clock::FixedClock;
    use rpc_auth::{AuthEnvelope, AuthError, AuthReply, Clock, RequestStamper, RpcAuthApi};
    use std::sync::Arc;

    fn logged_in() -> (NodeAuth, RequestStamper<FixedClock>) {
        let server = fixtures::server();
        let mut client = fixtures::client();
        let request = client.login_request(ACCESS_KEY, SECRET_KEY, SERVER_VERSION);
        client.accept_login(server.login(&request).unwrap());
        (server, client)
    }

    #[test]
    fn test_skew_window_is_symmetric_and_inclusive() {
        let (server, client) = logged_in();

        let cases = [
            (TimeDelta::zero(), true),
            (TimeDelta::seconds(3), true),
            (TimeDelta::seconds(-3), true),
            (TimeDelta::milliseconds(3001), false),
            (TimeDelta::milliseconds(-3001), false),
            (TimeDelta::seconds(5), false),
        ];

        for (offset, allowed) in cases {
            client.clock().set(fixtures::epoch() + offset);
            let mut envelope = AuthEnvelope::default();
            client.stamp(&mut envelope);

            assert_eq!(
                server.authenticate(&envelope).is_ok(),
                allowed,
                "client clock offset {offset}"
            );
        }
    }

    #[test]
    fn test_future_request_time_is_time_mismatch() {
        let (server, client) = logged_in();
        client.clock().advance(TimeDelta::seconds(5));

        let mut envelope = AuthEnvelope::default();
        client.stamp(&mut envelope);

        assert_eq!(
            server.authenticate(&envelope),
            Err(AuthError::TimeMismatch {
                request_time: fixtures::epoch() + TimeDelta::seconds(5),
                server_time: fixtures::epoch(),
            })
        );
    }

    #[test]
    fn test_invalid_token_reported_even_when_far_in_future() {
        let server = fixtures::server();
        let envelope = AuthEnvelope::new(
            "forged-token",
            server.clock().now_utc() + TimeDelta::minutes(10),
        );

        assert_eq!(server.authenticate(&envelope), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_server_clock_drift_after_stamping() {
        let (server, client) = logged_in();
        let mut envelope = AuthEnvelope::default();
        client.stamp(&mut envelope);

        assert!(server.authenticate(&envelope).is_ok());
        server.clock().advance(TimeDelta::seconds(4));
        assert!(server
            .authenticate(&envelope)
            .is_err_and(|e| e.is_clock_skew()));
    }

    #[test]
    fn test_repeated_validation_gives_same_answer() {
        let (server, client) = logged_in();
        let mut envelope = AuthEnvelope::default();
        client.stamp(&mut envelope);

        let first = server.authenticate(&envelope);
        let second = server.authenticate(&envelope);
        assert_eq!(first, second);
        assert!(first.is_ok());
    }

    #[test]
    fn test_envelope_survives_the_wire() {
        let (server, client) = logged_in();
        let mut envelope = AuthEnvelope::default();
        client.stamp(&mut envelope);

        let json = serde_json::to_string(&envelope).unwrap();
        let received: AuthEnvelope = serde_json::from_str(&json).unwrap();

        assert_eq!(received, envelope);
        assert_eq!(server.authenticate(&received), Ok(()));

        let reply = serde_json::to_string(&AuthReply::default()).unwrap();
        assert_eq!(reply, "{}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_validate_independently() {
        let (server, client) = logged_in();
        let server = Arc::new(server);

        let mut good = AuthEnvelope::default();
        client.stamp(&mut good);
        let bad = AuthEnvelope::new("forged", good.request_time);

        let mut handles = Vec::new();
        for i in 0..64 {
            let server = Arc::clone(&server);
            let envelope = if i % 2 == 0 { good.clone() } else { bad.clone() };
            handles.push(tokio::spawn(async move {
                (i, server.authenticate(&envelope))
            }));
        }

        for handle in handles {
            let (i, result) = handle.await.unwrap();
            if i % 2 == 0 {
                assert_eq!(result, Ok(()));
            } else {
                assert_eq!(result, Err(AuthError::InvalidToken));
            }
        }
    }
}
