//! Write operations with settlement callbacks.
//!
//! A mutation never invalidates anything by itself. Callers register an
//! `on_success` callback that invalidates the keys the write affects.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tracing::debug;

use kabphone_core::error::ErrorInfo;
use kabphone_core::result::AppResult;

/// Lifecycle of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    /// Not run yet, or the last run was rejected with a 401.
    Idle,
    /// Running.
    Pending,
    /// The last run succeeded.
    Success,
    /// The last run failed.
    Error,
}

type MutationFn<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, AppResult<O>> + Send + Sync>;
type SuccessFn<I, O> = Arc<dyn Fn(&O, &I) + Send + Sync>;
type ErrorFn<I> = Arc<dyn Fn(&ErrorInfo, &I) + Send + Sync>;
type SettledFn<I> = Arc<dyn Fn(&I) + Send + Sync>;

struct State {
    status: MutationStatus,
    error: Option<ErrorInfo>,
}

/// A server write bound to its callbacks.
pub struct Mutation<I, O> {
    run: MutationFn<I, O>,
    on_success: Vec<SuccessFn<I, O>>,
    on_error: Vec<ErrorFn<I>>,
    on_settled: Vec<SettledFn<I>>,
    state: Arc<Mutex<State>>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            on_settled: self.on_settled.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<I, O> Mutation<I, O> {
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<I, O> fmt::Debug for Mutation<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation")
            .field("status", &self.lock().status)
            .field("callbacks", &(self.on_success.len() + self.on_error.len() + self.on_settled.len()))
            .finish()
    }
}

impl<I, O> Mutation<I, O>
where
    I: Clone + Send + Sync + 'static,
    O: Send + 'static,
{
    /// Wrap `f` as a mutation.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<O>> + Send + 'static,
    {
        Self {
            run: Arc::new(move |input| f(input).boxed()),
            on_success: Vec::new(),
            on_error: Vec::new(),
            on_settled: Vec::new(),
            state: Arc::new(Mutex::new(State {
                status: MutationStatus::Idle,
                error: None,
            })),
        }
    }

    /// Called with the output and input after a successful run.
    pub fn on_success(mut self, f: impl Fn(&O, &I) + Send + Sync + 'static) -> Self {
        self.on_success.push(Arc::new(f));
        self
    }

    /// Called with the displayable error after a failed run. Not called for
    /// a 401, which the gateway handles globally.
    pub fn on_error(mut self, f: impl Fn(&ErrorInfo, &I) + Send + Sync + 'static) -> Self {
        self.on_error.push(Arc::new(f));
        self
    }

    /// Called after every run, after `on_success` or `on_error`.
    pub fn on_settled(mut self, f: impl Fn(&I) + Send + Sync + 'static) -> Self {
        self.on_settled.push(Arc::new(f));
        self
    }

    /// Current status.
    pub fn status(&self) -> MutationStatus {
        self.lock().status
    }

    /// Error of the last run, if it failed.
    pub fn error(&self) -> Option<ErrorInfo> {
        self.lock().error.clone()
    }

    /// Run the mutation and wait for it, invoking callbacks on settlement.
    pub async fn mutate_async(&self, input: I) -> AppResult<O> {
        self.set_state(MutationStatus::Pending, None);
        let result = (self.run)(input.clone()).await;
        self.settle(&input, &result);
        result
    }

    /// Run the mutation in the background.
    pub fn mutate(&self, input: I) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let _ = this.mutate_async(input).await;
        })
    }

    fn settle(&self, input: &I, result: &AppResult<O>) {
        match result {
            Ok(output) => {
                self.set_state(MutationStatus::Success, None);
                for f in &self.on_success {
                    f(output, input);
                }
            }
            Err(err) if err.is_unauthorized() => {
                debug!("Mutation rejected as unauthorized");
                self.set_state(MutationStatus::Idle, None);
            }
            Err(err) => {
                let info = err.info();
                self.set_state(MutationStatus::Error, Some(info.clone()));
                for f in &self.on_error {
                    f(&info, input);
                }
            }
        }
        for f in &self.on_settled {
            f(input);
        }
    }

    fn set_state(&self, status: MutationStatus, error: Option<ErrorInfo>) {
        let mut state = self.lock();
        state.status = status;
        state.error = error;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kabphone_core::error::AppError;

    use super::*;

    #[tokio::test]
    async fn test_success_runs_callbacks_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        let mutation = Mutation::new(|n: u64| async move { Ok(n * 2) })
            .on_success(move |out, input| a.lock().unwrap().push(format!("ok {input}->{out}")))
            .on_settled(move |input| b.lock().unwrap().push(format!("settled {input}")));

        assert_eq!(mutation.status(), MutationStatus::Idle);
        assert_eq!(mutation.mutate_async(21).await.unwrap(), 42);
        assert_eq!(mutation.status(), MutationStatus::Success);
        assert_eq!(*log.lock().unwrap(), vec!["ok 21->42", "settled 21"]);
    }

    #[tokio::test]
    async fn test_error_reports_info() {
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let mutation = Mutation::new(|_: ()| async {
            Err::<(), _>(AppError::server(400, "Phone out of stock"))
        })
        .on_error(move |info, _| *sink.lock().unwrap() = Some(info.clone()));

        assert!(mutation.mutate_async(()).await.is_err());
        assert_eq!(mutation.status(), MutationStatus::Error);
        let info = seen.lock().unwrap().clone().unwrap();
        assert_eq!(info.status, Some(400));
        assert_eq!(info.message, "Phone out of stock");
        assert_eq!(mutation.error(), Some(info));
    }

    #[tokio::test]
    async fn test_unauthorized_skips_error_callback() {
        let errors = Arc::new(AtomicUsize::new(0));
        let settled = Arc::new(AtomicUsize::new(0));
        let (e, s) = (errors.clone(), settled.clone());
        let mutation = Mutation::new(|_: ()| async {
            Err::<(), _>(AppError::unauthorized("Unauthorized"))
        })
        .on_error(move |_, _| {
            e.fetch_add(1, Ordering::SeqCst);
        })
        .on_settled(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        });

        assert!(mutation.mutate_async(()).await.unwrap_err().is_unauthorized());
        assert_eq!(mutation.status(), MutationStatus::Idle);
        assert_eq!(errors.load(Ordering::SeqCst), 0);
        assert_eq!(settled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mutate_runs_in_background() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let mutation = Mutation::new(|_: ()| async { Ok(()) }).on_success(move |_, _| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        mutation.mutate(()).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_debug_reports_status_for_any_payload() {
        struct Opaque;
        let mutation = Mutation::new(|_: u32| async { Ok(Opaque) }).on_settled(|_| {});

        assert_eq!(format!("{mutation:?}"), "Mutation { status: Idle, callbacks: 1 }");
        assert!(mutation.mutate_async(1).await.is_ok());
        assert!(format!("{mutation:?}").contains("Success"));
    }
}
