//! Fire-and-forget webhook delivery.
//!
//! # Architecture
//!
//! ```text
//! event path ──submit()──► unbounded queue ──► worker task ──► WebhookTransport::post
//!   (never waits)                               (logs result, drops it)
//! ```
//!
//! The event path only enqueues. Delivery outcomes are logged and counted,
//! never retried, and never reported back to the caller.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::CONTENT_TYPE;
use stashwarn_webhook::WebhookMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::DeliveryError;

/// Accepts alerts for asynchronous delivery.
pub trait DeliveryGateway: Send + Sync {
    /// Queue `message` for delivery. Returns immediately; the outcome is
    /// never observed by the caller.
    fn submit(&self, message: WebhookMessage);
}

/// Performs a single delivery attempt.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post(&self, url: &str, message: &WebhookMessage) -> Result<(), DeliveryError>;
}

/// JSON-over-HTTP transport.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stashwarn/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, timeout }
    }
}

#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn post(&self, url: &str, message: &WebhookMessage) -> Result<(), DeliveryError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(message)
            .send();

        let response = match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result?,
            Err(_) => return Err(DeliveryError::Timeout),
        };

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status(status.as_u16()))
        }
    }
}

/// Queue-backed gateway that posts every alert to one webhook URL.
pub struct WebhookGateway {
    tx: Mutex<Option<mpsc::UnboundedSender<WebhookMessage>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl WebhookGateway {
    /// Spawn the delivery worker on the current tokio runtime.
    pub fn spawn(url: impl Into<String>, transport: Arc<dyn WebhookTransport>) -> Self {
        let url = url.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<WebhookMessage>();

        let worker = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match transport.post(&url, &message).await {
                    Ok(()) => {
                        debug!("Webhook notification delivered");
                        crate::metrics::record_notification("sent");
                    }
                    Err(e) => {
                        warn!(error = %e, code = e.error_code(), "Webhook notification failed");
                        crate::metrics::record_notification("failed");
                    }
                }
            }
            debug!("Webhook delivery worker stopped");
        });

        Self {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Stop accepting alerts and wait for queued ones to be attempted.
    ///
    /// Alerts submitted afterwards are dropped.
    pub async fn shutdown(&self) {
        self.tx.lock().take();
        let worker = self.worker.lock().take();
        if let Some(worker) = worker
            && let Err(e) = worker.await
        {
            warn!(error = %e, "Webhook delivery worker panicked");
        }
    }
}

impl DeliveryGateway for WebhookGateway {
    fn submit(&self, message: WebhookMessage) {
        let sent = match self.tx.lock().as_ref() {
            Some(tx) => tx.send(message).is_ok(),
            None => false,
        };
        if !sent {
            warn!("Webhook delivery worker is gone, dropping notification");
            crate::metrics::record_notification("dropped");
        }
    }
}

/// Gateway used when no webhook is configured.
#[derive(Debug, Default)]
pub struct NullGateway;

impl DeliveryGateway for NullGateway {
    fn submit(&self, _message: WebhookMessage) {
        debug!("No webhook configured, notification discarded");
        crate::metrics::record_notification("disabled");
    }
}
