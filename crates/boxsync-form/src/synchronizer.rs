//! Keeps the box dropdown in step with the edition dropdown.
//!
//! Every change bumps a sequence counter and the fetch it starts carries
//! that number. A finished fetch is applied only while it is still the
//! newest one and the edition control still shows the edition it was issued
//! for, so a slow response for an earlier edition can never overwrite the
//! options of a later one. The check and the write happen under `apply`,
//! which is never held across an `.await`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use boxsync_core::{box_options, AppConfig, ClearPolicy, EditionId, SelectOption};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::control::{FormDocument, NoticeSink, SelectControl};
use crate::error::SyncError;
use crate::source::{BoxSource, FetchError};

/// Inline notice shown after a failed load.
pub const LOAD_FAILED_NOTICE: &str = "Could not load the boxes for the selected edition.";

/// Which controls to bind and how to behave while a fetch is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub edition_control_id: String,
    pub box_control_id: String,
    pub clear_policy: ClearPolicy,
}

impl SyncSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            edition_control_id: config.edition_control_id.clone(),
            box_control_id: config.box_control_id.clone(),
            clear_policy: config.clear_policy,
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            edition_control_id: "id_edition".to_owned(),
            box_control_id: "id_box".to_owned(),
            clear_policy: ClearPolicy::Retain,
        }
    }
}

/// What a single change event ended up doing to the box control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Empty edition; the box control was reset to the placeholder.
    Cleared,
    /// The response was applied; `boxes` options follow the placeholder.
    Applied { edition: EditionId, boxes: usize },
    /// A newer change superseded this one; nothing was touched.
    Discarded { edition: EditionId },
    /// The load failed; the box control was reset and a notice shown.
    Recovered { error: SyncError },
}

/// A load that holds its sequence number but has not been fetched yet.
#[derive(Debug)]
struct PendingLoad {
    seq: u64,
    edition: EditionId,
}

enum Started {
    Cleared,
    Load(PendingLoad),
}

pub struct Synchronizer<S> {
    edition: Arc<dyn SelectControl>,
    boxes: Arc<dyn SelectControl>,
    source: S,
    notices: Arc<dyn NoticeSink>,
    clear_policy: ClearPolicy,
    latest: AtomicU64,
    apply: Mutex<()>,
}

impl<S: BoxSource> Synchronizer<S> {
    #[must_use]
    pub fn new(
        edition: Arc<dyn SelectControl>,
        boxes: Arc<dyn SelectControl>,
        source: S,
        notices: Arc<dyn NoticeSink>,
        clear_policy: ClearPolicy,
    ) -> Self {
        Self {
            edition,
            boxes,
            source,
            notices,
            clear_policy,
            latest: AtomicU64::new(0),
            apply: Mutex::new(()),
        }
    }

    /// Resolves both controls from `document` and builds a synchronizer.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] naming the first control that is
    /// missing. The failure is logged once here; callers should not attach
    /// a listener.
    pub fn attach(
        document: &impl FormDocument,
        settings: &SyncSettings,
        source: S,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, SyncError> {
        let resolve = |id: &str| {
            document.select(id).ok_or_else(|| {
                tracing::error!(control = id, "required form control is missing; box sync disabled");
                SyncError::Configuration { id: id.to_owned() }
            })
        };

        let edition = resolve(&settings.edition_control_id)?;
        let boxes = resolve(&settings.box_control_id)?;
        tracing::debug!(
            edition_control = %settings.edition_control_id,
            box_control = %settings.box_control_id,
            clear_policy = %settings.clear_policy,
            "box sync attached"
        );

        Ok(Self::new(
            edition,
            boxes,
            source,
            notices,
            settings.clear_policy,
        ))
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Handles a change using the edition control's current value.
    pub async fn on_change(&self) -> ChangeOutcome {
        let value = self.edition.value();
        self.on_edition_change(&value).await
    }

    /// Handles a change of the edition control to `value`.
    ///
    /// Never fails: load errors are recovered here (see [`ChangeOutcome`]).
    pub async fn on_edition_change(&self, value: &str) -> ChangeOutcome {
        match self.begin(value) {
            Started::Cleared => ChangeOutcome::Cleared,
            Started::Load(load) => self.finish(load).await,
        }
    }

    /// Synchronous half of a change: takes the sequence number and applies
    /// the empty-value reset or the eager clear. Must run in event order.
    fn begin(&self, value: &str) -> Started {
        let Some(edition) = EditionId::parse(value) else {
            let _guard = self.lock_apply();
            self.next_seq();
            self.boxes.replace_options(vec![SelectOption::placeholder()]);
            self.notices.clear();
            return Started::Cleared;
        };

        let seq = match self.clear_policy {
            ClearPolicy::Retain => self.next_seq(),
            ClearPolicy::Eager => {
                let _guard = self.lock_apply();
                self.boxes.replace_options(vec![SelectOption::placeholder()]);
                self.next_seq()
            }
        };
        Started::Load(PendingLoad { seq, edition })
    }

    /// Fetches a sequenced load and applies it if it is still current.
    async fn finish(&self, load: PendingLoad) -> ChangeOutcome {
        let PendingLoad { seq, edition } = load;
        let result = self.source.fetch_boxes(&edition).await;

        let _guard = self.lock_apply();
        if !self.is_current(seq, &edition) {
            tracing::debug!(%edition, seq, "discarding superseded boxes response");
            return ChangeOutcome::Discarded { edition };
        }

        match result {
            Ok(records) => {
                self.boxes.replace_options(box_options(&records));
                self.notices.clear();
                ChangeOutcome::Applied {
                    edition,
                    boxes: records.len(),
                }
            }
            Err(err) => {
                let error = match err {
                    FetchError::Network(reason) => SyncError::Network { edition, reason },
                    FetchError::InvalidResponse(reason) => {
                        SyncError::InvalidResponse { edition, reason }
                    }
                };
                tracing::warn!(%error, "failed to load boxes; box list reset");
                self.boxes.replace_options(vec![SelectOption::placeholder()]);
                self.notices.show(LOAD_FAILED_NOTICE);
                ChangeOutcome::Recovered { error }
            }
        }
    }

    fn next_seq(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, seq: u64, edition: &EditionId) -> bool {
        self.latest.load(Ordering::SeqCst) == seq && self.edition.value() == edition.as_str()
    }

    fn lock_apply(&self) -> MutexGuard<'_, ()> {
        self.apply.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: BoxSource + 'static> Synchronizer<S> {
    /// Subscribes to the edition control and fetches for every change on its
    /// own task, so overlapping loads are in flight together.
    ///
    /// The subscription is taken before this returns; the listener runs until
    /// the control's change channel closes.
    pub fn listen(self: Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.edition.subscribe();
        tokio::spawn(async move {
            loop {
                let value = match changes.recv().await {
                    Ok(value) => value,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "edition change events dropped; resyncing");
                        self.edition.value()
                    }
                    Err(RecvError::Closed) => break,
                };

                // Sequenced here, in arrival order; only the fetch runs on
                // its own task.
                if let Started::Load(load) = self.begin(&value) {
                    let sync = Arc::clone(&self);
                    tokio::spawn(async move {
                        sync.finish(load).await;
                    });
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "synchronizer_test.rs"]
mod tests;
