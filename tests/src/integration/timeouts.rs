//! # Timeout Handling
//!
//! Requests whose replies arrive too late:
//!
//! 1. **Late reply**: the caller times out and the reply is dropped on arrival
//! 2. **Stale reply**: a late reply never completes a later request
//! 3. **Races**: reply and timeout landing together produce one outcome
//! 4. **Silent module**: unknown opcodes are answered by nobody

#[cfg(test)]
mod tests {
    use crate::harness::{Loopback, ReplyDelay};
    use jetbridge_client::{ClientConfig, ClientError, InboundOutcome};
    use jetbridge_types::Opcode;
    use std::time::Duration;

    #[tokio::test]
    async fn test_late_reply_is_dropped_after_timeout() {
        let loopback = Loopback::start(ReplyDelay::Fixed(Duration::from_millis(200)));

        let err = loopback
            .client
            .send_request(&[Opcode::ExecuteCalculatorCode.as_u8()], Duration::from_millis(10))
            .await
            .unwrap_err();
        let ClientError::TimedOut { id, .. } = &err else {
            panic!("expected timeout, got {err}");
        };
        assert_eq!(loopback.client.pending().pending_count(), 0);

        // Wait for the reply to land
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(loopback.outcomes(), vec![InboundOutcome::Unmatched(*id)]);
        assert_eq!(loopback.client.pending().pending_count(), 0);

        let stats = loopback.client.pending().stats().snapshot();
        assert_eq!(stats.timeouts, 1);
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.resolved, 0);
    }

    #[tokio::test]
    async fn test_late_reply_does_not_complete_next_request() {
        let loopback = Loopback::start(ReplyDelay::Fixed(Duration::from_millis(100)));
        loopback.engine.set("L:FIRST", 1.0);
        loopback.engine.set("L:SECOND", 2.0);

        let first = loopback
            .client
            .send_request(
                &jetbridge_types::encode_request(Opcode::GetNamedVariable, "(L:FIRST)").unwrap(),
                Duration::from_millis(10),
            )
            .await;
        assert!(first.unwrap_err().is_timeout());

        // Second request is in flight when the first reply lands
        let second = loopback
            .client
            .send_request(
                &jetbridge_types::encode_request(Opcode::GetNamedVariable, "(L:SECOND)").unwrap(),
                Duration::from_millis(500),
            )
            .await
            .unwrap();

        assert_eq!(second.value(), 2.0);
        assert_eq!(
            loopback.count_outcomes(|o| matches!(o, InboundOutcome::Unmatched(_))),
            1
        );
        assert_eq!(
            loopback.count_outcomes(|o| matches!(o, InboundOutcome::Delivered(_))),
            1
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reply_timeout_race_has_one_outcome() {
        let loopback = Loopback::start(ReplyDelay::Random {
            min: Duration::from_millis(5),
            max: Duration::from_millis(15),
        });
        for i in 0..200 {
            loopback.engine.set(&format!("L:R{i}"), i as f64);
        }

        let handles: Vec<_> = (0..200)
            .map(|i| {
                let client = loopback.client.clone();
                tokio::spawn(async move {
                    let payload = jetbridge_types::encode_request(
                        Opcode::GetNamedVariable,
                        &format!("(L:R{i})"),
                    )
                    .unwrap();
                    (i, client.send_request(&payload, Duration::from_millis(10)).await)
                })
            })
            .collect();

        let mut ok = 0u64;
        let mut timed_out = 0u64;
        for handle in handles {
            match handle.await.unwrap() {
                (i, Ok(reply)) => {
                    assert_eq!(reply.value(), i as f64);
                    ok += 1;
                }
                (_, Err(e)) => {
                    assert!(e.is_timeout(), "unexpected error: {e}");
                    timed_out += 1;
                }
            }
        }

        // Let every straggling reply land
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(ok + timed_out, 200);
        assert_eq!(loopback.client.pending().pending_count(), 0);

        let stats = loopback.client.pending().stats().snapshot();
        assert_eq!(stats.registered, 200);
        assert_eq!(stats.resolved + stats.timeouts, 200);
        assert_eq!(stats.resolved, ok);
        assert_eq!(
            loopback.count_outcomes(|o| matches!(o, InboundOutcome::Delivered(_))) as u64,
            ok
        );
    }

    #[tokio::test]
    async fn test_unknown_opcode_times_out() {
        let config = ClientConfig {
            default_timeout_ms: 50,
            ..Default::default()
        };
        let loopback = Loopback::start_with(config, ReplyDelay::Fixed(Duration::ZERO));

        let err = loopback.client.request(&[0x7F, b'x']).await.unwrap_err();

        assert!(err.is_timeout());
        assert!(loopback.outcomes().is_empty());
        assert_eq!(loopback.client.pending().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_abandoned_call_cleans_up() {
        let loopback = Loopback::start(ReplyDelay::Fixed(Duration::from_millis(100)));

        // Caller gives up through an outer timeout instead of the client's
        let call = loopback.client.send_request(&[0], Duration::from_secs(10));
        assert!(tokio::time::timeout(Duration::from_millis(10), call).await.is_err());
        assert_eq!(loopback.client.pending().pending_count(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(
            loopback.count_outcomes(|o| matches!(o, InboundOutcome::Unmatched(_))),
            1
        );
    }
}
