//! Dataset details: metadata record, configurations and file listing.

mod report;

pub use report::InfoReport;

use crate::hub::Registry;

/// Fetch everything `info` shows about a dataset.
///
/// The metadata, configuration and file listing calls are independent: each
/// failure is kept in the report and never stops the other two.
pub fn show_info<R: Registry + ?Sized>(registry: &R, dataset_id: &str) -> InfoReport {
    log::info!("fetching details for '{dataset_id}'");

    let detail = registry.dataset_info(dataset_id).map_err(|err| {
        log::warn!("metadata fetch failed: {err}");
        err.to_string()
    });
    let configs = registry.config_names(dataset_id).map_err(|err| {
        log::warn!("config listing failed: {err}");
        err.to_string()
    });
    let files = registry.list_files(dataset_id).map_err(|err| {
        log::warn!("file listing failed: {err}");
        err.to_string()
    });

    InfoReport {
        dataset_id: dataset_id.to_string(),
        detail,
        configs,
        files,
        endpoint: crate::hub::client::DEFAULT_ENDPOINT.to_string(),
    }
}
