//! The QR-code login session flow.
//!
//! A flow drives one short-lived login handshake at a time:
//!
//! ```text
//! Idle -> Loading -> Waiting -> Success -> Idle (closed)
//!                       |
//!                       +-> Error -> Loading (retry)
//! ```
//!
//! - [`QrLoginFlow::start`] asks the backend for a new session and starts polling.
//! - The polling task checks the session status every [`FlowOptions::poll_millis`]. It stops on
//!   `success`, `expired`, `error` or any request failure.
//! - After `success`, the flow waits [`FlowOptions::success_delay_millis`], closes itself and fires
//!   [`EventHandler::on_complete`] to refresh dependent data.
//! - [`QrLoginFlow::cancel`] stops polling and discards the session.
//!
//! Each start increases the attempt token of the flow. Results of previous attempts are ignored so
//! that only one polling task can change the flow state.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::{
    task::{self, JoinHandle},
    time::{self, Instant, MissedTickBehavior},
};

use crate::api::{
    http::Error,
    qrlogin::{QrSession, QrStatus},
};

/// The backend operations that the flow depends on.
#[async_trait]
pub trait LoginBackend: Send + Sync {
    /// To create a new login session.
    async fn generate(&self) -> Result<QrSession, Error>;

    /// To query the status of the session.
    async fn check(&self, session_id: &str) -> Result<QrStatus, Error>;
}

/// Event handler trait for the [`QrLoginFlow`].
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Fired when the flow status is changed.
    async fn on_status_change(&self, flow: &QrLoginFlow, status: FlowStatus);

    /// Fired after the flow is closed with a successful login. Use this to refresh the account
    /// list.
    async fn on_complete(&self, flow: &QrLoginFlow);
}

/// Flow status.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlowStatus {
    /// Not started, cancelled or closed.
    Idle,
    /// Requesting a new session.
    Loading,
    /// The code is ready and the flow is polling.
    Waiting,
    /// Login succeeded. The flow will be closed after the success delay.
    Success,
    /// Failed or expired. Use [`QrLoginFlow::retry`] to start again.
    Error,
}

/// The login session of the current attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginSession {
    pub session_id: String,
    pub qr_code_url: String,
    /// The latest status from the backend.
    pub status: QrStatus,
}

/// Options of the flow.
#[derive(Clone)]
pub struct FlowOptions {
    /// The polling interval in milliseconds.
    ///
    /// Default or zero value is `2000`.
    pub poll_millis: u64,
    /// Time in milliseconds from success to closing the flow.
    ///
    /// Default or zero value is `1000`.
    pub success_delay_millis: u64,
}

/// Manages the QR-code login handshake.
#[derive(Clone)]
pub struct QrLoginFlow {
    /// Options of the flow.
    opts: FlowOptions,
    /// The backend.
    backend: Arc<dyn LoginBackend>,
    /// The event handler.
    handler: Arc<Mutex<Option<Arc<dyn EventHandler>>>>,
    /// Status, session and attempt token.
    state: Arc<Mutex<FlowState>>,
    /// The polling task of the current attempt.
    poll_loop: Arc<Mutex<Option<JoinHandle<()>>>>,
}

struct FlowState {
    status: FlowStatus,
    session: Option<LoginSession>,
    attempt: u64,
}

/// Default polling interval in milliseconds.
pub const DEF_POLL_MS: u64 = 2000;
/// Default delay after success in milliseconds.
pub const DEF_SUCCESS_DELAY_MS: u64 = 1000;

impl QrLoginFlow {
    /// Create a flow instance in [`FlowStatus::Idle`].
    pub fn new(backend: Arc<dyn LoginBackend>, opts: FlowOptions) -> Self {
        let mut opts = opts;
        if opts.poll_millis == 0 {
            opts.poll_millis = DEF_POLL_MS;
        }
        if opts.success_delay_millis == 0 {
            opts.success_delay_millis = DEF_SUCCESS_DELAY_MS;
        }

        QrLoginFlow {
            opts,
            backend,
            handler: Arc::new(Mutex::new(None)),
            state: Arc::new(Mutex::new(FlowState {
                status: FlowStatus::Idle,
                session: None,
                attempt: 0,
            })),
            poll_loop: Arc::new(Mutex::new(None)),
        }
    }

    /// To set or remove the event handler.
    pub fn set_handler(&self, handler: Option<Arc<dyn EventHandler>>) {
        *lock(&self.handler) = handler;
    }

    /// Flow status.
    pub fn status(&self) -> FlowStatus {
        lock(&self.state).status
    }

    /// The session of the current attempt.
    pub fn session(&self) -> Option<LoginSession> {
        lock(&self.state).session.clone()
    }

    /// To start a new login session. The previous attempt (if any) is cancelled.
    ///
    /// Returns the flow status after the session request, which is [`FlowStatus::Waiting`] or
    /// [`FlowStatus::Error`] unless another attempt replaced this one.
    pub async fn start(&self) -> FlowStatus {
        const FN_NAME: &'static str = "QrLoginFlow.start";

        let attempt = {
            let mut state = lock(&self.state);
            state.attempt += 1;
            state.status = FlowStatus::Loading;
            state.session = None;
            state.attempt
        };
        self.abort_poll_loop();
        self.emit_status(FlowStatus::Loading).await;

        let session = match self.backend.generate().await {
            Err(e) => {
                warn!("[{}] generate session error: {}", FN_NAME, e);
                if let Some(true) = self.apply(attempt, QrStatus::Error, FlowStatus::Error) {
                    self.emit_status(FlowStatus::Error).await;
                }
                return self.status();
            }
            Ok(session) => session,
        };

        let applied = {
            let mut state = lock(&self.state);
            match state.attempt == attempt {
                false => false,
                true => {
                    state.session = Some(LoginSession {
                        session_id: session.session_id.clone(),
                        qr_code_url: session.qr_code_url.clone(),
                        status: QrStatus::Waiting,
                    });
                    state.status = FlowStatus::Waiting;
                    true
                }
            }
        };
        if !applied {
            debug!("[{}] attempt {} replaced before polling", FN_NAME, attempt);
            return self.status();
        }
        self.emit_status(FlowStatus::Waiting).await;

        {
            let mut poll_loop = lock(&self.poll_loop);
            if self.is_current(attempt) {
                if let Some(handle) = poll_loop.take() {
                    handle.abort();
                }
                *poll_loop = Some(create_poll_loop(self, attempt, session.session_id));
            }
        }
        self.status()
    }

    /// To start again from [`FlowStatus::Error`]. Does nothing in other statuses.
    pub async fn retry(&self) -> FlowStatus {
        match self.status() {
            FlowStatus::Error => self.start().await,
            status => status,
        }
    }

    /// To stop polling and discard the session. No events are fired.
    pub fn cancel(&self) {
        {
            let mut state = lock(&self.state);
            state.attempt += 1;
            state.status = FlowStatus::Idle;
            state.session = None;
        }
        self.abort_poll_loop();
    }

    fn is_current(&self, attempt: u64) -> bool {
        lock(&self.state).attempt == attempt
    }

    fn abort_poll_loop(&self) {
        if let Some(handle) = { lock(&self.poll_loop).take() } {
            handle.abort();
        }
    }

    /// To apply a backend status of the attempt.
    ///
    /// Returns `None` for a stale attempt or a transition that leaves a terminal status, otherwise
    /// returns whether the flow status is changed.
    fn apply(&self, attempt: u64, qr_status: QrStatus, status: FlowStatus) -> Option<bool> {
        let mut state = lock(&self.state);
        if state.attempt != attempt {
            return None;
        }
        match state.status {
            FlowStatus::Success | FlowStatus::Error if status == FlowStatus::Waiting => {
                return None;
            }
            _ => (),
        }
        if let Some(session) = state.session.as_mut() {
            session.status = qr_status;
        }
        let changed = state.status != status;
        state.status = status;
        Some(changed)
    }

    /// To close the flow after success.
    fn close(&self, attempt: u64) -> bool {
        let mut state = lock(&self.state);
        if state.attempt != attempt {
            return false;
        }
        state.status = FlowStatus::Idle;
        state.session = None;
        true
    }

    fn handler(&self) -> Option<Arc<dyn EventHandler>> {
        lock(&self.handler).clone()
    }

    async fn emit_status(&self, status: FlowStatus) {
        if let Some(handler) = self.handler() {
            handler.on_status_change(self, status).await;
        }
    }

    /// Handlers are fired in new tasks so that they can call [`QrLoginFlow::start`] or
    /// [`QrLoginFlow::cancel`] without aborting themselves.
    fn spawn_status(&self, status: FlowStatus) {
        if let Some(handler) = self.handler() {
            let flow = self.clone();
            task::spawn(async move {
                handler.on_status_change(&flow, status).await;
            });
        }
    }

    fn spawn_complete(&self) {
        if let Some(handler) = self.handler() {
            let flow = self.clone();
            task::spawn(async move {
                handler.on_complete(&flow).await;
            });
        }
    }
}

impl Default for FlowOptions {
    fn default() -> Self {
        FlowOptions {
            poll_millis: DEF_POLL_MS,
            success_delay_millis: DEF_SUCCESS_DELAY_MS,
        }
    }
}

/// To create the polling task of the attempt.
fn create_poll_loop(flow: &QrLoginFlow, attempt: u64, session_id: String) -> JoinHandle<()> {
    let this = flow.clone();
    task::spawn(async move {
        const FN_NAME: &'static str = "QrLoginFlow.poll_loop";

        let period = Duration::from_millis(this.opts.poll_millis);
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if !this.is_current(attempt) {
                return;
            }
            let qr_status = match this.backend.check(session_id.as_str()).await {
                Err(e) => {
                    warn!("[{}] check session {} error: {}", FN_NAME, session_id, e);
                    QrStatus::Error
                }
                Ok(qr_status) => qr_status,
            };
            let status = match qr_status {
                QrStatus::Success => FlowStatus::Success,
                status if status.is_terminal() => FlowStatus::Error,
                _ => FlowStatus::Waiting,
            };
            let changed = match this.apply(attempt, qr_status, status) {
                None => {
                    debug!("[{}] ignore {:?} of attempt {}", FN_NAME, qr_status, attempt);
                    return;
                }
                Some(changed) => changed,
            };
            if changed {
                debug!("[{}] attempt {} to {:?}", FN_NAME, attempt, status);
                this.spawn_status(status);
            }

            match status {
                FlowStatus::Success => {
                    time::sleep(Duration::from_millis(this.opts.success_delay_millis)).await;
                    if this.close(attempt) {
                        this.spawn_status(FlowStatus::Idle);
                        this.spawn_complete();
                    }
                    return;
                }
                FlowStatus::Error => return,
                _ => (),
            }
        }
    })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Err(e) => e.into_inner(),
        Ok(guard) => guard,
    }
}
