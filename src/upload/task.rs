// Background upload task
//
// One thread per request, mirroring one fire-and-forget request per
// button press. Dropping the handle abandons the request; whatever the
// server eventually answers is discarded.

use std::thread;

use crate::error::{DayreelError, Result};

/// Handle to one in-flight upload running on its own thread.
pub struct UploadTask<T> {
    handle: thread::JoinHandle<Result<T>>,
}

impl<T: Send + 'static> UploadTask<T> {
    /// Run `job` on a named background thread.
    pub fn spawn<F>(name: &str, job: F) -> Result<Self>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let handle = thread::Builder::new().name(name.to_string()).spawn(job)?;
        Ok(Self { handle })
    }

    /// True once the request has finished, without blocking.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the request completes and return its outcome.
    ///
    /// A panic on the upload thread is contained here and reported as an
    /// upload error instead of propagating.
    pub fn join(self) -> Result<T> {
        self.handle
            .join()
            .map_err(|_| DayreelError::Upload("upload thread panicked".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_runs_and_joins() {
        let task = UploadTask::spawn("test-upload", || Ok(7)).unwrap();
        assert_eq!(task.join().unwrap(), 7);
    }

    #[test]
    fn test_task_is_finished_after_release() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let task = UploadTask::spawn("test-upload-blocked", move || {
            rx.recv().ok();
            Ok("done")
        })
        .unwrap();

        assert!(!task.is_finished(), "task is still waiting on the channel");
        tx.send(()).unwrap();
        assert_eq!(task.join().unwrap(), "done");
    }

    #[test]
    fn test_task_error_passes_through() {
        let task = UploadTask::<i32>::spawn("test-upload-error", || {
            Err(DayreelError::Http("connection refused".to_string()))
        })
        .unwrap();

        let err = task.join().unwrap_err();
        assert!(matches!(err, DayreelError::Http(_)));
    }

    #[test]
    fn test_task_panic_becomes_error() {
        let task = UploadTask::<i32>::spawn("test-upload-panic", || panic!("boom")).unwrap();

        let err = task.join().unwrap_err();
        assert!(matches!(err, DayreelError::Upload(_)));
    }
}
