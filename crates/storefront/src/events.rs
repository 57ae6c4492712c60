//! Page-wide UI events.
//!
//! Some UI changes concern every open component: a new display currency,
//! or one dropdown opening and asking the others to close. They go through
//! an explicit broadcast channel; components subscribe to what they need.

use catalog::Currency;
use tokio::sync::broadcast;
use tracing::debug;

/// Dropdowns and panels that close each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Popup {
    SortMenu,
    FilterPanel,
    CurrencyPicker,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The buyer picked a different display currency
    CurrencyChanged(Currency),
    /// Close every popup except `except`
    ClosePopups { except: Option<Popup> },
}

/// Publish/subscribe channel for `UiEvent`s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    /// `capacity` events are buffered per subscriber; a subscriber that
    /// falls further behind skips the oldest ones.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    /// Send to every current subscriber. Returns how many received it;
    /// publishing with nobody listening is not an error.
    pub fn publish(&self, event: UiEvent) -> usize {
        debug!("Publishing {:?}", event);
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let bus = EventBus::new(8);
        let mut header = bus.subscribe();
        let mut catalog_page = bus.subscribe();

        let delivered = bus.publish(UiEvent::CurrencyChanged(Currency::Eur));
        assert_eq!(delivered, 2);

        assert_eq!(
            header.recv().await.unwrap(),
            UiEvent::CurrencyChanged(Currency::Eur)
        );
        assert_eq!(
            catalog_page.recv().await.unwrap(),
            UiEvent::CurrencyChanged(Currency::Eur)
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(UiEvent::ClosePopups { except: None }), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::new(8);
        let mut early = bus.subscribe();
        bus.publish(UiEvent::ClosePopups { except: Some(Popup::SortMenu) });

        let mut late = bus.subscribe();
        bus.publish(UiEvent::CurrencyChanged(Currency::Gbp));

        assert_eq!(
            early.recv().await.unwrap(),
            UiEvent::ClosePopups { except: Some(Popup::SortMenu) }
        );
        assert_eq!(
            late.recv().await.unwrap(),
            UiEvent::CurrencyChanged(Currency::Gbp)
        );
    }
}
