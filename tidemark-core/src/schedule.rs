use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Handle to a running periodic trigger loop.
///
/// Dropping the handle signals the loop and aborts it if it is still alive. A
/// run already spawned by the loop is not cancelled; it finishes on its own and
/// releases the run gate.
#[derive(Debug)]
pub struct ScheduleHandle {
    task: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl ScheduleHandle {
    /// Wrap a loop task and the sender half of its stop channel.
    #[must_use]
    pub const fn new(task: JoinHandle<()>, stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            task: Some(task),
            stop_tx: Some(stop_tx),
        }
    }

    /// Signal the loop to exit and wait for it.
    pub async fn stop(mut self) {
        self.signal();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Returns `true` once the loop task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    // The loop may already be gone; a closed channel is fine.
    fn signal(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.signal();
        if let Some(task) = self.task.take()
            && !task.is_finished()
        {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn stop_signals_and_waits_for_loop_exit() {
        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _ = rx.await;
        });
        let handle = ScheduleHandle::new(task, tx);
        assert!(!handle.is_finished());
        tokio::time::timeout(Duration::from_secs(1), handle.stop())
            .await
            .expect("stop completes");
    }

    #[tokio::test]
    async fn stop_tolerates_loop_that_already_exited() {
        let (tx, rx) = oneshot::channel::<()>();
        drop(rx);
        let task = tokio::spawn(async {});
        let handle = ScheduleHandle::new(task, tx);
        tokio::time::timeout(Duration::from_secs(1), handle.stop())
            .await
            .expect("stop completes");
    }

    #[tokio::test]
    async fn drop_aborts_loop_that_ignores_the_signal() {
        let (tx, _rx) = oneshot::channel::<()>();
        let (done_tx, done_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            // Never exits on its own; `done_tx` drops only when aborted.
            let _guard = done_tx;
            std::future::pending::<()>().await;
        });
        drop(ScheduleHandle::new(task, tx));
        let res = tokio::time::timeout(Duration::from_secs(1), done_rx).await;
        assert!(matches!(res, Ok(Err(_))), "task aborted and its sender dropped");
    }
}
