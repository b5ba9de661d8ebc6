//! Background worker that turns click events into counter increments.
//!
//! Redirect handlers stay on the fast path: they enqueue a [`ClickEvent`]
//! and move on. This worker drains the queue and bumps the matching
//! counter, retrying transient database failures with exponential backoff.
//! Clicks are best-effort; an increment that still fails after the retries
//! is logged and dropped.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};

use crate::domain::click_event::{ClickEvent, ClickTarget};
use crate::domain::repositories::{LinkRepository, ProductRepository};

/// Retry schedule for failed increments: 3 retries, 50ms base, jittered.
fn retry_strategy() -> impl Iterator<Item = std::time::Duration> {
    ExponentialBackoff::from_millis(50).map(jitter).take(3)
}

/// Runs until the sending side of the channel is dropped.
pub async fn run_click_worker<L, P>(
    mut rx: mpsc::Receiver<ClickEvent>,
    link_repository: Arc<L>,
    product_repository: Arc<P>,
) where
    L: LinkRepository,
    P: ProductRepository,
{
    while let Some(event) = rx.recv().await {
        let result = match event.target {
            ClickTarget::Link(id) => {
                Retry::spawn(retry_strategy(), || link_repository.increment_clicks(id)).await
            }
            ClickTarget::Product(id) => {
                Retry::spawn(retry_strategy(), || {
                    product_repository.increment_clicks(id)
                })
                .await
            }
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, target = ?event.target, "Dropping click event");
        }
    }

    tracing::debug!("Click worker stopped: channel closed");
}
