use tokio::runtime::{Builder, Runtime as TokioRuntime};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Failed to create runtime: {0}")]
    Creation(String),
}

/// Single-threaded runtime. The checks run one after another on the calling
/// thread; the only suspension point is the outbound HTTP request.
pub struct Runtime {
    inner: TokioRuntime,
}

impl Runtime {
    pub fn new() -> Result<Self, RuntimeError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RuntimeError::Creation(e.to_string()))?;

        debug!("Runtime initialized on current thread");

        Ok(Self { inner: runtime })
    }

    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        self.inner.block_on(future)
    }
}
