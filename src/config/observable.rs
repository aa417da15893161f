//! Observable value with an observer list
//!
//! Observers are replayed the current value on subscribe and then called once
//! per `set`. Callbacks always run with no lock held, so they may read the
//! value back or unsubscribe themselves.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type ObserverId = u64;

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Observers<T> {
    entries: Vec<(ObserverId, Observer<T>)>,
    next_id: ObserverId,
}

pub struct Observable<T> {
    value: Mutex<T>,
    observers: Mutex<Observers<T>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            observers: Mutex::new(Observers {
                entries: Vec::new(),
                next_id: 0,
            }),
        }
    }

    pub fn get(&self) -> T {
        lock(&self.value).clone()
    }

    /// Store `value` and notify every observer with it
    pub fn set(&self, value: T) {
        *lock(&self.value) = value.clone();
        self.notify(&value);
    }

    /// Store `value` without notifying; pair with [`Observable::notify`]
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *lock(&self.value), value)
    }

    pub fn notify(&self, value: &T) {
        let observers: Vec<Observer<T>> = lock(&self.observers)
            .entries
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();
        for observer in observers {
            observer(value);
        }
    }

    /// Register `observer` and immediately call it with the current value
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let observer: Observer<T> = Arc::new(observer);
        let id = {
            let mut observers = lock(&self.observers);
            let id = observers.next_id;
            observers.next_id += 1;
            observers.entries.push((id, Arc::clone(&observer)));
            id
        };
        let current = self.get();
        observer(&current);
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = lock(&self.observers);
        let before = observers.entries.len();
        observers.entries.retain(|(oid, _)| *oid != id);
        observers.entries.len() != before
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.observers).entries.len()
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Store and notify only if `value` differs from the current one
    pub fn refresh(&self, value: T) -> bool {
        {
            let mut current = lock(&self.value);
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.notify(&value);
        true
    }
}
