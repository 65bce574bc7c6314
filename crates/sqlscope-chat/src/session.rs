//! The per-turn coordinator: submit, edit, run, archive.
//!
//! Backend calls are split into a begin phase (synchronous state change)
//! and a complete phase (applies a finished call's outcome). Execute
//! completions carry a correlation token; a completion whose token is not
//! the latest issued one is discarded as stale instead of overwriting
//! newer state. The async `submit`/`run` wrappers drive both phases.
//!
//! Failures are logged and otherwise swallowed: no message bubble, no
//! state change beyond returning to the pre-call state. An opt-in failure
//! hook exposes them to observability without changing that default.

use chrono::Utc;
use tracing::{debug, warn};

use sqlscope_core::{ChartType, ExecutionResult, MessageId, Row};
use sqlscope_gateway::{GatewayError, QueryBackend};
use sqlscope_viz::{bind_with, BindOptions, ChartSpec, HistoryArchive, HistoryEntry, TableProjection};

use crate::store::ConversationStore;

/// Where the current conversational turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingTranslation,
    EditableDraft,
    AwaitingExecution,
    Settled,
}

/// Correlation token for one execute request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunToken(u64);

/// The single live chart/table slot shown outside history.
///
/// Overwritten by each settled run; the coordinator archives the previous
/// content before the overwrite.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentView {
    pub chart: ChartSpec,
    pub table: Option<TableProjection>,
    pub rows: Vec<Row>,
    pub generated_sql: String,
    pub chart_type: ChartType,
}

/// Observability hook invoked on swallowed gateway failures.
pub type FailureHook = Box<dyn Fn(&GatewayError) + Send + Sync>;

/// One user's conversation with the backend, from question to chart.
pub struct Session<G> {
    gateway: G,
    store: ConversationStore,
    archive: HistoryArchive,
    current: Option<CurrentView>,
    state: TurnState,
    /// State to restore when an in-flight call fails.
    resting: TurnState,
    /// Latest issued run token; older completions are stale.
    run_seq: u64,
    bind_options: BindOptions,
    on_failure: Option<FailureHook>,
}

impl<G> Session<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_bind_options(gateway, BindOptions::default())
    }

    pub fn with_bind_options(gateway: G, bind_options: BindOptions) -> Self {
        Self {
            gateway,
            store: ConversationStore::new(),
            archive: HistoryArchive::new(),
            current: None,
            state: TurnState::Idle,
            resting: TurnState::Idle,
            run_seq: 0,
            bind_options,
            on_failure: None,
        }
    }

    /// Install an observability hook for swallowed failures.
    pub fn set_failure_hook(&mut self, hook: FailureHook) {
        self.on_failure = Some(hook);
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn history(&self) -> &HistoryArchive {
        &self.archive
    }

    pub fn current(&self) -> Option<&CurrentView> {
        self.current.as_ref()
    }

    /// Edit an editable draft's SQL text. Unknown ids are a silent no-op.
    pub fn edit_draft(&mut self, id: MessageId, new_text: &str) {
        self.store.edit_message(id, new_text);
    }

    /// Start a submit: append the user message and move to
    /// `AwaitingTranslation`. Returns false when the input is blank or a
    /// request is already in flight.
    pub fn begin_submit(&mut self, text: &str) -> bool {
        if matches!(
            self.state,
            TurnState::AwaitingTranslation | TurnState::AwaitingExecution
        ) {
            debug!("submit ignored: a request is in flight");
            return false;
        }
        if text.trim().is_empty() {
            debug!("submit ignored: blank input");
            return false;
        }
        self.resting = self.state;
        self.store.append_user(text);
        self.state = TurnState::AwaitingTranslation;
        true
    }

    /// Apply a finished translate call.
    ///
    /// Success appends one formatted, editable assistant message and
    /// returns its id. Failure restores the pre-submit state; the user
    /// message stays, nothing else changes.
    pub fn complete_translate(
        &mut self,
        outcome: Result<String, GatewayError>,
    ) -> Option<MessageId> {
        match outcome {
            Ok(sql) => {
                let id = self.store.append_assistant(&format_sql(&sql), true);
                self.state = TurnState::EditableDraft;
                Some(id)
            }
            Err(err) => {
                warn!(error = %err, "translate failed");
                self.notify_failure(&err);
                self.state = self.resting;
                None
            }
        }
    }

    /// Start a run of the draft with the given id, taking the (possibly
    /// user-edited) text as the SQL to execute.
    ///
    /// Returns the correlation token, or `None` when the id does not name
    /// an editable draft or a request is already in flight.
    pub fn begin_run(&mut self, message_id: MessageId, text: &str) -> Option<RunToken> {
        if matches!(
            self.state,
            TurnState::AwaitingTranslation | TurnState::AwaitingExecution
        ) {
            debug!("run ignored: a request is in flight");
            return None;
        }
        match self.store.get(message_id) {
            Some(message) if message.editable => {}
            _ => {
                debug!(%message_id, "run ignored: not an editable draft");
                return None;
            }
        }
        // Keep the draft in sync with what actually runs.
        self.store.edit_message(message_id, text);
        self.resting = self.state;
        self.state = TurnState::AwaitingExecution;
        self.run_seq += 1;
        Some(RunToken(self.run_seq))
    }

    /// Apply a finished execute call.
    ///
    /// A stale token (older than the latest issued) discards the
    /// completion entirely. Success archives the existing current view,
    /// replaces it with the new one, and settles the turn. Failure
    /// returns to `EditableDraft` with stores untouched.
    pub fn complete_run(
        &mut self,
        token: RunToken,
        outcome: Result<ExecutionResult, GatewayError>,
    ) -> bool {
        if token.0 != self.run_seq {
            debug!(
                token = token.0,
                latest = self.run_seq,
                "stale execute completion discarded"
            );
            return false;
        }
        match outcome {
            Ok(result) => {
                let viz = bind_with(&result, &self.bind_options);
                if let Some(previous) = self.current.take() {
                    self.archive.append(HistoryEntry {
                        chart: previous.chart,
                        rows: previous.rows,
                        generated_sql: previous.generated_sql,
                        chart_type: previous.chart_type,
                        archived_at: Utc::now(),
                    });
                }
                self.current = Some(CurrentView {
                    chart: viz.chart,
                    table: viz.table,
                    rows: result.rows,
                    generated_sql: result.generated_sql,
                    chart_type: result.chart_type,
                });
                self.state = TurnState::Settled;
                true
            }
            Err(err) => {
                warn!(error = %err, "execute failed");
                self.notify_failure(&err);
                self.state = TurnState::EditableDraft;
                false
            }
        }
    }

    fn notify_failure(&self, err: &GatewayError) {
        if let Some(hook) = &self.on_failure {
            hook(err);
        }
    }
}

impl<G: QueryBackend> Session<G> {
    /// Submit a natural-language question: translate it and append the
    /// generated SQL as an editable draft. Returns the draft's id.
    pub async fn submit(&mut self, text: &str) -> Option<MessageId> {
        if !self.begin_submit(text) {
            return None;
        }
        let outcome = self.gateway.translate(text).await;
        self.complete_translate(outcome)
    }

    /// Run a draft's SQL and settle the result into the current view,
    /// archiving whatever was there before. Returns whether the run
    /// settled.
    pub async fn run(&mut self, message_id: MessageId, text: &str) -> bool {
        let Some(token) = self.begin_run(message_id, text) else {
            return false;
        };
        let outcome = self.gateway.execute(text).await;
        self.complete_run(token, outcome)
    }

    /// Probe backend liveness. Failures are logged and swallowed like any
    /// other gateway failure.
    pub async fn health(&self) -> bool {
        match self.gateway.health().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "health probe failed");
                self.notify_failure(&err);
                false
            }
        }
    }
}

/// Pretty-print SQL the way the draft editor presents it.
fn format_sql(sql: &str) -> String {
    sqlformat::format(
        sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    )
}

// =============================================================================
// Tests
// =============================================================================
