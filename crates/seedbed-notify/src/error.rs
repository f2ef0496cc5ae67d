use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build webhook http client")]
    Client(#[source] reqwest::Error),

    /// At least one webhook rejected the announcement. Partial delivery
    /// still happened for the rest.
    #[error("webhook delivery failed for {failed} of {total} destinations")]
    Delivery { failed: usize, total: usize },
}
