use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::{
    error::RequestError,
    transport::{HttpResponse, HttpTransport},
    types::{should_auto_invoke, RequestConfig, RequestEvent, RequestState},
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct RequestStateController<T> {
    target: String,
    config: Option<RequestConfig>,
    initial: T,
    transport: Arc<dyn HttpTransport>,
    state: watch::Sender<RequestState<T>>,
    events: broadcast::Sender<RequestEvent>,
    started: AtomicU64,
    disposed: AtomicBool,
}

impl<T> RequestStateController<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Read requests are marked started before this returns. Needs a Tokio runtime.
    pub fn new(
        target: impl Into<String>,
        config: Option<RequestConfig>,
        initial: T,
        transport: Arc<dyn HttpTransport>,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(RequestState::new(initial.clone()));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let controller = Arc::new(Self {
            target: target.into(),
            config,
            initial,
            transport,
            state,
            events,
            started: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        });

        if should_auto_invoke(controller.config.as_ref()) {
            let invocation = controller.begin();
            let worker = Arc::clone(&controller);
            tokio::spawn(async move {
                worker.run(invocation, None).await;
            });
        } else {
            debug!(
                url = %controller.target,
                method = controller.config.as_ref().map(RequestConfig::method_or_default),
                "request: auto-invocation suppressed"
            );
        }

        controller
    }

    pub async fn invoke(&self) {
        if let Some(invocation) = self.try_begin() {
            self.run(invocation, None).await;
        }
    }

    pub async fn invoke_with_body(&self, body: Value) {
        if let Some(invocation) = self.try_begin() {
            self.run(invocation, Some(body)).await;
        }
    }

    pub fn clear_data(&self) {
        if self.is_disposed() {
            return;
        }
        let initial = self.initial.clone();
        self.state.send_modify(|state| {
            state.data = initial;
            state.error = None;
        });
        let _ = self.events.send(RequestEvent::Cleared);
    }

    // In-flight calls still settle, but only clear `is_loading`.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            debug!(url = %self.target, "request: controller disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn state(&self) -> RequestState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.state.subscribe()
    }

    /// Snapshots may be coalesced; `subscribe_events` sees every transition.
    pub fn updates(&self) -> impl Stream<Item = RequestState<T>> + Send + 'static {
        WatchStream::new(self.state.subscribe())
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RequestEvent> {
        self.events.subscribe()
    }

    pub async fn wait_until_settled(&self) {
        let mut rx = self.state.subscribe();
        let _ = rx.wait_for(|state| !state.is_loading).await;
    }

    pub fn invocations(&self) -> u64 {
        self.started.load(Ordering::Acquire)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn config(&self) -> Option<&RequestConfig> {
        self.config.as_ref()
    }

    fn try_begin(&self) -> Option<u64> {
        if self.is_disposed() {
            warn!(url = %self.target, "request: invoke on disposed controller ignored");
            return None;
        }
        Some(self.begin())
    }

    fn begin(&self) -> u64 {
        let invocation = self.started.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.send_modify(|state| state.is_loading = true);
        debug!(url = %self.target, invocation, "request: started");
        let _ = self.events.send(RequestEvent::Started { invocation });
        invocation
    }

    async fn run(&self, invocation: u64, body: Option<Value>) {
        let mut config = self.config.clone().unwrap_or_default();
        if body.is_some() {
            config.body = body;
        }
        let outcome = self.fetch(&config).await;
        self.settle(invocation, outcome);
    }

    async fn fetch(&self, config: &RequestConfig) -> Result<T, RequestError> {
        let response = self.transport.send(&self.target, config).await?;
        decode_response(response)
    }

    fn settle(&self, invocation: u64, outcome: Result<T, RequestError>) {
        if self.is_disposed() {
            // Result is dropped, but the call has settled.
            self.state.send_modify(|state| state.is_loading = false);
            debug!(
                url = %self.target,
                invocation,
                "request: settled after dispose, result dropped"
            );
            return;
        }

        let event = match outcome {
            Ok(data) => {
                self.state.send_modify(|state| {
                    state.data = data;
                    state.error = None;
                    state.is_loading = false;
                });
                info!(url = %self.target, invocation, "request: succeeded");
                RequestEvent::Succeeded { invocation }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(url = %self.target, invocation, error = %err, "request: failed");
                self.state.send_modify(|state| {
                    state.error = Some(message.clone());
                    state.is_loading = false;
                });
                RequestEvent::Failed {
                    invocation,
                    message,
                }
            }
        };
        let _ = self.events.send(event);
    }
}

fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, RequestError> {
    if !response.is_success() {
        return Err(RequestError::from_status(response.status, &response.body));
    }
    // An empty success body decodes as JSON `null`.
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(test)]
#[path = "tests/request_state_tests.rs"]
mod tests;
