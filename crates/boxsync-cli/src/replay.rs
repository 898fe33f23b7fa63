//! `replay` command: drives the synchronizer on an in-memory form.
//!
//! Every edition is selected in order and all of their loads are started
//! together, the way a user flicking through the dropdown would. Only the
//! last selection may end up in the box dropdown.

use std::sync::Arc;

use boxsync_client::BoxesClient;
use boxsync_core::AppConfig;
use boxsync_form::{
    ChangeOutcome, MemoryForm, MemoryNotice, MemorySelect, SelectControl, SyncSettings, Synchronizer,
};

use crate::boxes::print_options;

/// Replay `editions` as change events and print the final box dropdown,
/// followed by the inline notice if one is showing.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the form controls
/// cannot be bound.
pub(crate) async fn run_replay(config: &AppConfig, editions: &[String]) -> anyhow::Result<()> {
    let settings = SyncSettings::from_app_config(config);
    let edition_control = Arc::new(MemorySelect::default());
    let box_control = Arc::new(MemorySelect::default());
    let notice = Arc::new(MemoryNotice::default());

    let mut form = MemoryForm::new();
    form.insert(&settings.edition_control_id, edition_control.clone());
    form.insert(&settings.box_control_id, box_control.clone());

    let client = BoxesClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build boxes client: {e}"))?;
    let sync = Synchronizer::attach(&form, &settings, client, notice.clone())?;

    for edition in editions {
        edition_control.select(edition);
    }

    let outcomes =
        futures::future::join_all(editions.iter().map(|e| sync.on_edition_change(e))).await;
    for (edition, outcome) in editions.iter().zip(&outcomes) {
        match outcome {
            ChangeOutcome::Cleared => tracing::info!(edition = %edition, "cleared"),
            ChangeOutcome::Applied { boxes, .. } => {
                tracing::info!(edition = %edition, boxes, "applied");
            }
            ChangeOutcome::Discarded { .. } => tracing::info!(edition = %edition, "superseded"),
            ChangeOutcome::Recovered { error } => {
                tracing::info!(edition = %edition, %error, "recovered");
            }
        }
    }

    print_options(&box_control.options());
    if let Some(message) = notice.current() {
        println!("notice: {message}");
    }
    Ok(())
}
