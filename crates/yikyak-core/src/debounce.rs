use std::time::Duration;

use tokio::sync::watch;

/// Calls `on_settled` with the latest value once `rx` has been quiet for
/// `quiet`, skipping values equal to the previously settled one.
///
/// Returns when the sender side is dropped.
pub async fn debounce<T, F>(mut rx: watch::Receiver<T>, quiet: Duration, mut on_settled: F)
where
    T: Clone + PartialEq,
    F: FnMut(T),
{
    let mut last: Option<T> = None;

    loop {
        if rx.changed().await.is_err() {
            return;
        }

        // Restart the quiet period on every change
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = tokio::time::sleep(quiet) => break,
            }
        }

        let value = rx.borrow_and_update().clone();
        if last.as_ref() == Some(&value) {
            tracing::trace!("debounced value unchanged, skipping");
            continue;
        }

        last = Some(value.clone());
        on_settled(value);
    }
}
