//! `boxes` command: one fetch, printed as dropdown options.

use boxsync_client::BoxesClient;
use boxsync_core::{box_options, AppConfig, EditionId, SelectOption};

/// Print each option as `value<TAB>label`, placeholder first.
pub(crate) fn print_options(options: &[SelectOption]) {
    for option in options {
        println!("{}\t{}", option.value, option.label);
    }
}

/// Fetch the boxes of `edition` and print the dropdown they produce.
///
/// An empty `edition` prints the placeholder without contacting the server.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the fetch fails.
pub(crate) async fn run_boxes(config: &AppConfig, edition: &str) -> anyhow::Result<()> {
    let Some(edition) = EditionId::parse(edition) else {
        print_options(&[SelectOption::placeholder()]);
        return Ok(());
    };

    let client = BoxesClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build boxes client: {e}"))?;
    let records = client.fetch_boxes(&edition).await?;
    tracing::info!(%edition, count = records.len(), "fetched boxes");

    print_options(&box_options(&records));
    Ok(())
}
