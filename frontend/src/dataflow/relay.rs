//! Event streaming from UI elements and fetch tasks into actors.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Typed event channel feeding one actor.
///
/// ```rust
/// let (warehouse_selected_relay, mut warehouse_selected_stream) = relay::<Option<String>>();
///
/// warehouse_selected_relay.send(Some("B1".to_string()));
///
/// while let Some(warehouse) = warehouse_selected_stream.next().await {
///     controller.lock_mut().apply(FilterEvent::WarehouseSelected(warehouse));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

#[derive(Debug, Clone)]
pub enum RelayError {
    /// The receiving actor is gone.
    ChannelClosed,
    /// Relay sent from two different code locations (debug builds only).
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Send an event; it is dropped silently once the actor is gone.
    ///
    /// Panics in debug builds when the relay was already sent from another
    /// location.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(e) = self.check_single_source() {
            panic!("{:?}", e);
        }

        let _ = self.sender.unbounded_send(value);
    }

    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Disconnected relay; every event is discarded.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_relay_delivers_in_order() {
        let (page_relay, mut page_stream) = relay::<u32>();

        for page in 1..=3 {
            page_relay.send(page);
        }

        assert_eq!(page_stream.next().await, Some(1));
        assert_eq!(page_stream.next().await, Some(2));
        assert_eq!(page_stream.next().await, Some(3));
    }

    #[tokio::test]
    async fn test_relay_try_send_after_actor_dropped() {
        let (warehouse_relay, mut warehouse_stream) = relay::<Option<String>>();
        let select_warehouse = |warehouse| warehouse_relay.try_send(warehouse);

        assert!(select_warehouse(Some("B1".to_string())).is_ok());
        assert_eq!(warehouse_stream.next().await, Some(Some("B1".to_string())));

        drop(warehouse_stream);

        assert!(matches!(
            select_warehouse(None),
            Err(RelayError::ChannelClosed)
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "MultipleEmitters")]
    fn test_relay_rejects_second_emitter() {
        let (unmounted_relay, _unmounted_stream) = relay::<()>();
        unmounted_relay.send(());
        unmounted_relay.send(());
    }

    #[test]
    fn test_default_relay_discards_events() {
        let closed = Relay::<String>::default();
        assert!(matches!(
            closed.try_send("lost".to_string()),
            Err(RelayError::ChannelClosed)
        ));
    }
}
