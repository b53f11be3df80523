//! 単一スロットのリアクティブセル
//!
//! `set` のたびに（同じ値であっても）購読者へ同期的に通知する。
//! 通知中に購読者がセルを読む・別の購読を追加することは許される。

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// 購読解除用のID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // 通知中の subscribe/unsubscribe で借用が衝突しないようスナップショットを取る
        let snapshot = self.get();
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();
        for f in subscribers {
            f(&snapshot);
        }
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_subscribers() {
        let cell = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(1);
        cell.set(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn test_same_value_still_notifies() {
        let cell = Observable::new("a".to_string());
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        cell.subscribe(move |_| counter.set(counter.get() + 1));

        cell.set("a".to_string());
        cell.set("a".to_string());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let cell = Observable::new(false);
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let id = cell.subscribe(move |_| counter.set(counter.get() + 1));

        cell.set(true);
        assert!(cell.unsubscribe(id));
        assert!(!cell.unsubscribe(id));
        cell.set(false);
        assert_eq!(count.get(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_read_cell() {
        let cell = Rc::new(Observable::new(1));
        let seen = Rc::new(Cell::new(0));
        let (inner, sink) = (Rc::clone(&cell), Rc::clone(&seen));
        cell.subscribe(move |_| sink.set(inner.get() * 10));

        cell.update(|v| *v += 1);
        assert_eq!(seen.get(), 20);
    }
}
