//! Single-value actor: owns a `Mutable<T>` and processes relay events in
//! order.

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Reactive state container whose only writer is its own processor task.
///
/// Dropping the last clone drops the task handle, which aborts the processor.
///
/// ```rust
/// let (next_page_clicked_relay, mut next_page_clicked_stream) = relay();
///
/// let table = Actor::new(TableFetcher::new(kind), async move |state| {
///     while let Some(()) = next_page_clicked_stream.next().await {
///         let request = state.lock_mut().next_page();
///         // spawn `request`...
///     }
/// });
///
/// El::new().child_signal(table.signal_ref(|fetcher| fetcher.page_label()).map(Text::new))
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));
        Self { state, task_handle }
    }

    pub fn signal(&self) -> impl Signal<Item = T> + Send {
        self.state.signal_cloned()
    }

    /// Project the state without cloning all of it on every change.
    pub fn signal_ref<U>(
        &self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> impl Signal<Item = U> + Send
    where
        U: PartialEq + Send + Sync + 'static,
    {
        self.state.signal_ref(f)
    }
}
