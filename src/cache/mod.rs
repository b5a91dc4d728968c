use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::ClientError;
use crate::outcome::Outcome;

enum Miss<T> {
    Failed(Outcome<Arc<T>>),
    Error(ClientError),
}

/// Reference data fetched at most once per owner.
///
/// Concurrent first accesses share one fetch. A failed fetch leaves the cell
/// empty, so the next access tries again.
pub struct LazyResource<T> {
    cell: OnceCell<Arc<T>>,
}

impl<T> LazyResource<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    pub fn is_realized(&self) -> bool {
        self.cell.initialized()
    }

    /// Forgets the realized value.
    pub fn reset(&mut self) {
        self.cell.take();
    }

    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Outcome<Arc<T>>, ClientError>
    where
        T: Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Outcome<T>, ClientError>>,
    {
        let realized = self
            .cell
            .get_or_try_init(|| async move {
                let outcome = fetch().await.map_err(Miss::Error)?;
                if !outcome.is_ok() {
                    return Err(Miss::Failed(outcome.cast_failure()));
                }
                tracing::trace!("cache realized");
                Ok(Arc::new(outcome.into_payload().unwrap_or_default()))
            })
            .await;

        match realized {
            Ok(value) => Ok(Outcome::ok(Some(Arc::clone(value)))),
            Err(Miss::Failed(outcome)) => Ok(outcome),
            Err(Miss::Error(err)) => Err(err),
        }
    }
}

impl<T> Default for LazyResource<T> {
    fn default() -> Self {
        Self::new()
    }
}
