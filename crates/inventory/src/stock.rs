use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use thiserror::Error;

use videoshop_catalog::Movie;

/// Inventory ledger failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// Attempted to remove a copy of a title the shop has none of.
    #[error("no copies of {title:?} in stock")]
    OutOfStock { title: String },
}

/// Observer of falling stock levels.
///
/// Each listener carries its own threshold; thresholds are evaluated
/// independently per listener, so two listeners with different thresholds
/// fire at different counts.
pub trait LowStockListener: Send + Sync {
    /// Notify as soon as a title's count drops to this value or below.
    fn threshold(&self) -> u32;

    /// Called with the movie whose stock fell and the remaining count.
    fn stock_low(&self, movie: &Movie, remaining: u32);
}

/// Manages the stock of videos of the rental shop.
///
/// One counter (and one lock) per title, so unrelated titles never contend;
/// the outer map lock is held only long enough to look a counter up.
/// Listeners are invoked synchronously inside [`Stock::remove_from_stock`],
/// in registration order, after the counter lock has been released — a
/// listener that blocks delays only its own caller, and one that panics
/// cannot poison the ledger (the decrement is already committed).
#[derive(Default)]
pub struct Stock {
    counts: RwLock<HashMap<String, Arc<Mutex<u32>>>>,
    listeners: RwLock<Vec<Arc<dyn LowStockListener>>>,
}

impl Stock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a copy of `movie` to the stock. Returns the post-increment count.
    /// Absent titles start at 0, so this never fails.
    pub fn add_to_stock(&self, movie: &Movie) -> u32 {
        let counter = self.counter(movie.title());
        // A poisoned counter still holds a consistent count: every mutation
        // completes before anything that could panic runs.
        let mut count = counter.lock().unwrap_or_else(PoisonError::into_inner);
        *count += 1;
        *count
    }

    /// Remove a copy of `movie` from the stock and return the post-decrement
    /// count. Fails if the shop holds no copy; the count never goes negative.
    ///
    /// On success, every listener whose threshold is at or above the new
    /// count is notified, in registration order.
    pub fn remove_from_stock(&self, movie: &Movie) -> Result<u32, StockError> {
        let remaining = {
            let counts = self.counts.read().unwrap_or_else(PoisonError::into_inner);
            let Some(counter) = counts.get(movie.title()) else {
                return Err(StockError::OutOfStock {
                    title: movie.title().to_string(),
                });
            };
            let mut count = counter.lock().unwrap_or_else(PoisonError::into_inner);
            if *count == 0 {
                return Err(StockError::OutOfStock {
                    title: movie.title().to_string(),
                });
            }
            *count -= 1;
            *count
        };

        self.notify_listeners(movie, remaining);
        Ok(remaining)
    }

    /// Copies of `title` still in stock; 0 for unknown titles.
    pub fn get_in_stock(&self, title: &str) -> u32 {
        let counts = self.counts.read().unwrap_or_else(PoisonError::into_inner);
        counts
            .get(title)
            .map(|counter| *counter.lock().unwrap_or_else(PoisonError::into_inner))
            .unwrap_or(0)
    }

    /// Register a listener. Adding the same listener (by identity) twice is
    /// a no-op.
    pub fn add_low_stock_listener(&self, listener: Arc<dyn LowStockListener>) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if !listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            listeners.push(listener);
        }
    }

    /// Deregister a listener (by identity).
    pub fn remove_low_stock_listener(&self, listener: &Arc<dyn LowStockListener>) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
    }

    fn counter(&self, title: &str) -> Arc<Mutex<u32>> {
        {
            let counts = self.counts.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(counter) = counts.get(title) {
                return Arc::clone(counter);
            }
        }
        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(counts.entry(title.to_string()).or_default())
    }

    fn notify_listeners(&self, movie: &Movie, remaining: u32) {
        let listeners: Vec<_> = {
            let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
            listeners.clone()
        };
        for listener in listeners {
            if listener.threshold() >= remaining {
                listener.stock_low(movie, remaining);
            }
        }
    }
}

impl core::fmt::Debug for Stock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let counts = self.counts.read().unwrap_or_else(PoisonError::into_inner);
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Stock")
            .field("titles", &counts.len())
            .field("listeners", &listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use videoshop_pricing::Regular;

    fn movie(title: &str) -> Movie {
        Movie::new(
            title,
            NaiveDate::from_ymd_opt(1997, 12, 19).unwrap(),
            Arc::new(Regular),
            12,
        )
        .unwrap()
    }

    struct RecordingListener {
        threshold: u32,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl RecordingListener {
        fn new(threshold: u32) -> Arc<Self> {
            Arc::new(Self {
                threshold,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl LowStockListener for RecordingListener {
        fn threshold(&self) -> u32 {
            self.threshold
        }

        fn stock_low(&self, movie: &Movie, remaining: u32) {
            self.calls
                .lock()
                .unwrap()
                .push((movie.title().to_string(), remaining));
        }
    }

    #[test]
    fn adding_twice_counts_two_copies() {
        let stock = Stock::new();
        let m = movie("Titanic");
        assert_eq!(stock.add_to_stock(&m), 1);
        assert_eq!(stock.add_to_stock(&m), 2);
        assert_eq!(stock.get_in_stock("Titanic"), 2);
    }

    #[test]
    fn unknown_title_counts_zero() {
        let stock = Stock::new();
        assert_eq!(stock.get_in_stock("Avatar"), 0);
    }

    #[test]
    fn removing_from_empty_stock_fails() {
        let stock = Stock::new();
        let titanic = movie("Titanic");
        let avatar = movie("Avatar");
        stock.add_to_stock(&titanic);

        let err = stock.remove_from_stock(&avatar).unwrap_err();
        assert_eq!(
            err,
            StockError::OutOfStock {
                title: "Avatar".to_string()
            }
        );

        // Drain the tracked title, then one more must fail too.
        assert_eq!(stock.remove_from_stock(&titanic).unwrap(), 0);
        assert!(stock.remove_from_stock(&titanic).is_err());
        assert_eq!(stock.get_in_stock("Titanic"), 0);
    }

    #[test]
    fn listener_fires_at_and_below_its_threshold() {
        let stock = Stock::new();
        let m = movie("Titanic");
        let listener = RecordingListener::new(2);
        stock.add_low_stock_listener(listener.clone());

        for _ in 0..4 {
            stock.add_to_stock(&m);
        }

        // 4 -> 3: above threshold, no call.
        stock.remove_from_stock(&m).unwrap();
        assert!(listener.calls().is_empty());

        // 3 -> 2 and 2 -> 1: at/below threshold.
        stock.remove_from_stock(&m).unwrap();
        stock.remove_from_stock(&m).unwrap();
        assert_eq!(
            listener.calls(),
            vec![("Titanic".to_string(), 2), ("Titanic".to_string(), 1)]
        );

        // Deregistered listeners stay silent.
        let handle: Arc<dyn LowStockListener> = listener.clone();
        stock.remove_low_stock_listener(&handle);
        stock.remove_from_stock(&m).unwrap();
        assert_eq!(stock.get_in_stock("Titanic"), 0);
        assert_eq!(listener.calls().len(), 2);
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let stock = Stock::new();
        let m = movie("Titanic");
        let listener = RecordingListener::new(5);
        stock.add_low_stock_listener(listener.clone());
        stock.add_low_stock_listener(listener.clone());

        stock.add_to_stock(&m);
        stock.remove_from_stock(&m).unwrap();
        assert_eq!(listener.calls().len(), 1);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let stock = Stock::new();
        let m = movie("Titanic");
        let order = Arc::new(Mutex::new(Vec::new()));

        struct Tagged {
            tag: &'static str,
            order: Arc<Mutex<Vec<&'static str>>>,
        }
        impl LowStockListener for Tagged {
            fn threshold(&self) -> u32 {
                5
            }
            fn stock_low(&self, _movie: &Movie, _remaining: u32) {
                self.order.lock().unwrap().push(self.tag);
            }
        }

        stock.add_low_stock_listener(Arc::new(Tagged {
            tag: "first",
            order: order.clone(),
        }));
        stock.add_low_stock_listener(Arc::new(Tagged {
            tag: "second",
            order: order.clone(),
        }));

        stock.add_to_stock(&m);
        stock.remove_from_stock(&m).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn titles_are_tracked_independently() {
        let stock = Stock::new();
        let titanic = movie("Titanic");
        let avatar = movie("Avatar");
        let listener = RecordingListener::new(0);
        stock.add_low_stock_listener(listener.clone());

        stock.add_to_stock(&titanic);
        stock.add_to_stock(&titanic);
        stock.add_to_stock(&avatar);
        assert_eq!(stock.get_in_stock("Titanic"), 2);
        assert_eq!(stock.get_in_stock("Avatar"), 1);

        stock.remove_from_stock(&avatar).unwrap();
        assert_eq!(stock.get_in_stock("Titanic"), 2);
        assert_eq!(listener.calls(), vec![("Avatar".to_string(), 0)]);
    }
}
