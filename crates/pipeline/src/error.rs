/// Errors returned by [`ConversionQueue::run_queue`](crate::queue::ConversionQueue::run_queue).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Another dispatch pass holds the queue.
    #[error("A dispatch pass is already running")]
    AlreadyRunning,
}
