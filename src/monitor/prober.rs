//! HTTP probing of a single target.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;

use super::error::ProbeError;
use super::{Classification, ProbeOutcome, Target};

/// Executes exactly one probe against one target and classifies it.
/// No retries, no storage side effects.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &Target) -> Result<ProbeOutcome, ProbeError>;
}

/// Production prober: one shared `reqwest` client with a per-probe timeout,
/// so an unresponsive target cannot stall a whole tick.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, target: &Target) -> Result<ProbeOutcome, ProbeError> {
        let timestamp = Utc::now().timestamp();
        let started = Instant::now();
        let result = self.client.get(&target.url).send().await;
        let elapsed_ms = started.elapsed().as_millis() as i64;

        let classification = match result {
            Ok(response) => match classify_status(response.status().as_u16()) {
                StatusClass::Success => Classification::Success {
                    latency_ms: elapsed_ms,
                },
                StatusClass::Failure => Classification::Failure,
            },
            // The request never went out (e.g. unparseable URL): the probe
            // was not attempted, which is an error rather than an incident.
            Err(e) if e.is_builder() => return Err(ProbeError::InvalidTarget(e.to_string())),
            // Timeout, connection refused, DNS failure and friends.
            Err(_) => Classification::Failure,
        };

        Ok(ProbeOutcome {
            target_id: target.id,
            owner: target.owner,
            timestamp,
            classification,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusClass {
    Success,
    Failure,
}

/// 400..=599 means the target is considered down; any other received
/// status counts as reachable.
pub(crate) fn classify_status(status: u16) -> StatusClass {
    if (400..=599).contains(&status) {
        StatusClass::Failure
    } else {
        StatusClass::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn status_classification_boundaries() {
        for status in [100, 200, 204, 301, 399] {
            assert_eq!(classify_status(status), StatusClass::Success, "{status}");
        }
        for status in [400, 404, 500, 503, 599] {
            assert_eq!(classify_status(status), StatusClass::Failure, "{status}");
        }
    }

    fn target_with_url(url: String) -> Target {
        Target {
            id: 7,
            owner: 1,
            name: "probe-test".to_string(),
            url,
            interval_seconds: 60,
        }
    }

    /// Serves one canned HTTP response on a local port and returns the URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn ok_response_yields_success_with_latency() {
        let url =
            serve_once("HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n").await;
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();

        let outcome = prober.probe(&target_with_url(url)).await.unwrap();
        match outcome.classification {
            Classification::Success { latency_ms } => assert!(latency_ms >= 0),
            Classification::Failure => panic!("200 must classify as success"),
        }
    }

    #[tokio::test]
    async fn service_unavailable_yields_failure() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();

        let outcome = prober.probe(&target_with_url(url)).await.unwrap();
        assert_eq!(outcome.classification, Classification::Failure);
    }

    #[tokio::test]
    async fn connection_refused_yields_failure() {
        // Bind to grab a free port, then drop the listener before probing.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        let outcome = prober
            .probe(&target_with_url(format!("http://{addr}/")))
            .await
            .unwrap();
        assert_eq!(outcome.classification, Classification::Failure);
    }

    #[tokio::test]
    async fn unparseable_url_is_a_probe_error() {
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        let result = prober
            .probe(&target_with_url("not a url".to_string()))
            .await;
        assert!(matches!(result, Err(ProbeError::InvalidTarget(_))));
    }
}
