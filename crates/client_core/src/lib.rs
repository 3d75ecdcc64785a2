use std::{fmt, sync::Arc, time::Duration};

use shared::{
    domain::{Printer, PrinterId, PrinterStatus, Spool, SpoolId},
    protocol::AssignRequest,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

pub mod api;
pub mod error;
pub mod navigation;
pub mod presentation;

pub use api::{HttpSpoolApi, SpoolApi};
pub use error::{ControllerError, ASSIGN_FALLBACK_MESSAGE, LOAD_FALLBACK_MESSAGE};
pub use navigation::{NavigationTarget, Navigator};
pub use presentation::{format_weight, printer_status_color, printer_status_emoji};

pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(3000);
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Loading,
    SelectPrinter,
    Confirming,
    Success,
    Error,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::SelectPrinter => "select-printer",
            Self::Confirming => "confirming",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the picker screen renders from. `step` and `error` together
/// decide which view is shown.
#[derive(Debug, Clone)]
pub struct AssignmentState {
    pub step: Step,
    pub loading: bool,
    pub error: Option<String>,
    pub spool_id: SpoolId,
    pub spool: Option<Spool>,
    pub printers: Vec<Printer>,
    pub selected_printer: Option<Printer>,
}

impl AssignmentState {
    fn new(spool_id: SpoolId) -> Self {
        Self {
            step: Step::Loading,
            loading: true,
            error: None,
            spool_id,
            spool: None,
            printers: Vec::new(),
            selected_printer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentEvent {
    StateChanged {
        step: Step,
        error: Option<String>,
    },
    SelectionChanged {
        printer_id: PrinterId,
    },
    RedirectScheduled {
        target: NavigationTarget,
        delay: Duration,
    },
    Navigated {
        target: NavigationTarget,
    },
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub redirect_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

/// Drives the spool -> printer assignment screen: load, pick, confirm,
/// redirect.
///
/// Failures never escape the operations; they land in
/// [`AssignmentState::error`] and are announced on the event channel.
pub struct SpoolAssignmentController {
    spool_id: SpoolId,
    api: Arc<dyn SpoolApi>,
    navigator: Arc<dyn Navigator>,
    options: ControllerOptions,
    inner: Mutex<AssignmentState>,
    redirect: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<AssignmentEvent>,
}

impl SpoolAssignmentController {
    pub fn new(
        spool_id: SpoolId,
        api: Arc<dyn SpoolApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Arc<Self> {
        Self::with_options(spool_id, api, navigator, ControllerOptions::default())
    }

    pub fn with_options(
        spool_id: SpoolId,
        api: Arc<dyn SpoolApi>,
        navigator: Arc<dyn Navigator>,
        options: ControllerOptions,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            inner: Mutex::new(AssignmentState::new(spool_id.clone())),
            spool_id,
            api,
            navigator,
            options,
            redirect: Mutex::new(None),
            events,
        })
    }

    pub fn spool_id(&self) -> &SpoolId {
        &self.spool_id
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<AssignmentEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> AssignmentState {
        self.inner.lock().await.clone()
    }

    pub async fn step(&self) -> Step {
        self.inner.lock().await.step
    }

    /// Loads the spool and the printer list concurrently and moves to
    /// printer selection, or to `Error` if either read fails.
    ///
    /// Calling it again starts over from a fresh `Loading` state.
    pub async fn init(&self) -> Step {
        info!(spool_id = %self.spool_id, "initializing spool assignment");
        self.cancel_redirect().await;
        {
            let mut state = self.inner.lock().await;
            *state = AssignmentState::new(self.spool_id.clone());
            self.publish_state(&state);
        }

        let loaded = tokio::try_join!(self.fetch_spool(), self.fetch_printers());

        let mut state = self.inner.lock().await;
        state.loading = false;
        match loaded {
            Ok((spool, printers)) => {
                state.selected_printer = default_selection(&printers);
                if let Some(printer) = &state.selected_printer {
                    debug!(printer_id = %printer.id, "preselected the only ready printer");
                }
                info!(printers = printers.len(), "spool assignment data loaded");
                state.spool = Some(spool);
                state.printers = printers;
                state.step = Step::SelectPrinter;
            }
            Err(err) => {
                error!(spool_id = %self.spool_id, "initialization failed: {err}");
                state.error = Some(err.user_message(LOAD_FALLBACK_MESSAGE));
                state.step = Step::Error;
            }
        }
        self.publish_state(&state);
        state.step
    }

    pub async fn fetch_spool(&self) -> Result<Spool, ControllerError> {
        debug!(spool_id = %self.spool_id, "fetching spool");
        self.api.get_spool(&self.spool_id).await
    }

    pub async fn fetch_printers(&self) -> Result<Vec<Printer>, ControllerError> {
        debug!("fetching printers");
        self.api.list_printers().await
    }

    /// Replaces the current selection. Membership in the loaded list is the
    /// caller's responsibility.
    pub async fn select_printer(&self, printer: Printer) {
        let printer_id = printer.id.clone();
        self.inner.lock().await.selected_printer = Some(printer);
        let _ = self
            .events
            .send(AssignmentEvent::SelectionChanged { printer_id });
    }

    /// Posts the assignment for the selected printer.
    ///
    /// Only acts while the picker is showing; in any other step the call is
    /// ignored and the current step is returned unchanged.
    pub async fn confirm_assignment(&self) -> Step {
        let printer = {
            let mut state = self.inner.lock().await;
            if state.step != Step::SelectPrinter {
                debug!(step = %state.step, "ignoring confirmation outside printer selection");
                return state.step;
            }
            let Some(printer) = state.selected_printer.clone() else {
                warn!("confirmation requested without a selected printer");
                state.error = Some(ControllerError::NoPrinterSelected.to_string());
                self.publish_state(&state);
                return state.step;
            };
            state.step = Step::Confirming;
            state.error = None;
            self.publish_state(&state);
            printer
        };

        let request = AssignRequest {
            spool_id: self.spool_id.clone(),
            printer_id: printer.id.clone(),
        };

        match self.api.assign(&request).await {
            Ok(response) => {
                info!(
                    spool_id = %request.spool_id,
                    printer_id = %request.printer_id,
                    message = response.message.as_deref().unwrap_or_default(),
                    "spool assigned"
                );
                {
                    let mut state = self.inner.lock().await;
                    state.step = Step::Success;
                    self.publish_state(&state);
                }
                self.schedule_redirect(NavigationTarget::for_printer(&printer))
                    .await;
                Step::Success
            }
            Err(err) => {
                warn!(printer_id = %request.printer_id, "assignment failed: {err}");
                let mut state = self.inner.lock().await;
                state.error = Some(err.user_message(ASSIGN_FALLBACK_MESSAGE));
                state.step = Step::SelectPrinter;
                self.publish_state(&state);
                state.step
            }
        }
    }

    /// Aborts a pending redirect. Returns whether one was still waiting.
    pub async fn cancel_redirect(&self) -> bool {
        match self.redirect.lock().await.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                if pending {
                    info!("pending redirect cancelled");
                }
                pending
            }
            None => false,
        }
    }

    /// Waits for the scheduled redirect to fire. Returns `false` when none
    /// was scheduled or it was cancelled.
    pub async fn wait_for_redirect(&self) -> bool {
        let handle = self.redirect.lock().await.take();
        match handle {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }

    async fn schedule_redirect(&self, target: NavigationTarget) {
        let delay = self.options.redirect_delay;
        info!(destination = target.as_str(), ?delay, "scheduling redirect");
        let _ = self.events.send(AssignmentEvent::RedirectScheduled {
            target: target.clone(),
            delay,
        });

        let navigator = Arc::clone(&self.navigator);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(destination = target.as_str(), "redirecting");
            navigator.navigate(&target);
            let _ = events.send(AssignmentEvent::Navigated { target });
        });

        if let Some(previous) = self.redirect.lock().await.replace(handle) {
            previous.abort();
        }
    }

    fn publish_state(&self, state: &AssignmentState) {
        let _ = self.events.send(AssignmentEvent::StateChanged {
            step: state.step,
            error: state.error.clone(),
        });
    }
}

impl Drop for SpoolAssignmentController {
    fn drop(&mut self) {
        if let Some(handle) = self.redirect.get_mut().take() {
            handle.abort();
        }
    }
}

/// Preselects a printer only when exactly one is `Ready`.
fn default_selection(printers: &[Printer]) -> Option<Printer> {
    let mut ready = printers
        .iter()
        .filter(|printer| printer.status == PrinterStatus::Ready);
    match (ready.next(), ready.next()) {
        (Some(only), None) => Some(only.clone()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod api_tests;

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod presentation_tests;
