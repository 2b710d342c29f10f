//! # Loopback Harness
//!
//! Wires a [`JetBridgeClient`] to a [`Responder`] inside one process:
//!
//! ```text
//! client ──transmit──▶ MemoryUplink ──▶ module task ──(delay)──▶ Responder
//!   ▲                                                              │
//!   └──── InboundHandler::on_frame_received ◀──── reply bytes ─────┘
//! ```
//!
//! Every reply is delivered from its own task after the configured delay, so
//! replies to concurrent requests arrive in whatever order the delays
//! produce. Each inbound outcome is recorded for assertions.

use jetbridge_client::{
    ClientConfig, ClientDataEvent, InboundHandler, InboundOutcome, JetBridgeClient, MemoryUplink,
};
use jetbridge_responder::{InMemoryEngine, Responder};
use jetbridge_telemetry::{init_logging, LogConfig};
use jetbridge_types::{ChannelConfig, Frame};
use parking_lot::Mutex;
use rand::Rng;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::task::JoinHandle;

static LOGGING: Once = Once::new();

/// Install logging once per test binary, honouring `JETBRIDGE_LOG_LEVEL`.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = LogConfig::from_env();
        // Another test harness may already own the global subscriber
        let _ = init_logging(&config);
    });
}

/// How long the module takes to answer
#[derive(Debug, Clone, Copy)]
pub enum ReplyDelay {
    Fixed(Duration),
    /// Uniform in `[min, max]`
    Random { min: Duration, max: Duration },
}

impl ReplyDelay {
    fn sample(&self) -> Duration {
        match *self {
            ReplyDelay::Fixed(delay) => delay,
            ReplyDelay::Random { min, max } => {
                let min_us = min.as_micros() as u64;
                let max_us = max.as_micros() as u64;
                Duration::from_micros(rand::thread_rng().gen_range(min_us..=max_us))
            }
        }
    }
}

/// Client and module running against each other in memory
pub struct Loopback {
    pub client: Arc<JetBridgeClient>,
    pub engine: Arc<InMemoryEngine>,
    pub uplink: Arc<MemoryUplink>,
    handler: InboundHandler,
    channel: ChannelConfig,
    outcomes: Arc<Mutex<Vec<InboundOutcome>>>,
    module: JoinHandle<()>,
}

impl Loopback {
    /// Start with the default client configuration.
    pub fn start(delay: ReplyDelay) -> Self {
        Self::start_with(ClientConfig::default(), delay)
    }

    /// Start the module task. Must be called inside a Tokio runtime.
    pub fn start_with(config: ClientConfig, delay: ReplyDelay) -> Self {
        init_test_logging();
        let channel = config.channel.clone();
        let (uplink, mut uplink_rx) = MemoryUplink::channel();
        let uplink = Arc::new(uplink);

        let client = Arc::new(
            JetBridgeClient::new(uplink.clone(), config).expect("valid client config"),
        );
        let handler = client.inbound_handler();
        let engine = Arc::new(InMemoryEngine::new());
        let responder = Arc::new(Responder::with_channel(engine.clone(), &channel));
        let outcomes = Arc::new(Mutex::new(Vec::new()));

        let module = {
            let handler = handler.clone();
            let channel = channel.clone();
            let outcomes = outcomes.clone();
            tokio::spawn(async move {
                while let Some(bytes) = uplink_rx.recv().await {
                    let responder = responder.clone();
                    let handler = handler.clone();
                    let channel = channel.clone();
                    let outcomes = outcomes.clone();
                    let delay = delay.sample();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let Some(reply) = responder.on_uplink_data(
                            channel.uplink_request,
                            channel.packet_definition,
                            &bytes,
                        ) else {
                            return;
                        };
                        let wire = reply.to_bytes();
                        let outcome = handler.on_frame_received(ClientDataEvent::new(
                            channel.downlink_request,
                            channel.packet_definition,
                            &wire,
                        ));
                        outcomes.lock().push(outcome);
                    });
                }
            })
        };

        Self {
            client,
            engine,
            uplink,
            handler,
            channel,
            outcomes,
            module,
        }
    }

    /// Deliver an arbitrary frame on the downlink, as foreign traffic would.
    pub fn inject_reply(&self, frame: &Frame) -> InboundOutcome {
        let wire = frame.to_bytes();
        let outcome = self.handler.on_frame_received(ClientDataEvent::new(
            self.channel.downlink_request,
            self.channel.packet_definition,
            &wire,
        ));
        self.outcomes.lock().push(outcome);
        outcome
    }

    /// Outcomes of every downlink delivery so far.
    pub fn outcomes(&self) -> Vec<InboundOutcome> {
        self.outcomes.lock().clone()
    }

    pub fn count_outcomes(&self, pred: impl Fn(&InboundOutcome) -> bool) -> usize {
        self.outcomes.lock().iter().filter(|o| pred(o)).count()
    }
}

impl Drop for Loopback {
    fn drop(&mut self) {
        self.module.abort();
    }
}
