use std::panic;
use std::thread;

/// Runs a blocking call to completion on a helper thread and waits for it.
///
/// The caller still blocks, but the blocking HTTP client never executes
/// inside the UI runtime's async context. Panics are re-raised here.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    thread::scope(|scope| match scope.spawn(f).join() {
        Ok(value) => value,
        Err(payload) => panic::resume_unwind(payload),
    })
}
