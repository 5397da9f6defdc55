use std::collections::HashMap;

use notin_core::{ContentId, NotinError};
use serde::Serialize;
use tracing::debug;

use crate::manager::ContentManager;

/// Handle returned by [`ContentNavigator::subscribe`]; used to unsubscribe.
pub type ObserverId = u64;

type NavigationObserver = Box<dyn FnMut(ContentId, &str)>;

/// Pure snapshot of the navigation state.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationInfo {
    pub current_index: usize,
    pub current_id: ContentId,
    pub total: usize,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    /// Human-readable position, e.g. `"2 of 3"`.
    pub progress: String,
}

/// Sequences through the fixed document set, notifying observers on change.
///
/// Wraps (and owns) a [`ContentManager`] without duplicating its cache.
/// Observers form an explicit list with per-subscription handles, so
/// multiple listeners and clean teardown are structural rather than
/// convention-based.
pub struct ContentNavigator {
    manager: ContentManager,
    current_index: usize,
    observers: Vec<(ObserverId, NavigationObserver)>,
    next_observer_id: ObserverId,
}

impl ContentNavigator {
    pub fn new(manager: ContentManager) -> Self {
        let current_index = manager.current_index().unwrap_or(0);
        Self {
            manager,
            current_index,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    /// Navigate to `id`.
    ///
    /// On success the index is updated and every observer is invoked once
    /// with `(id, text)`. On failure the error propagates, the index is
    /// untouched, and no observer runs.
    pub fn go_to(&mut self, id: ContentId) -> Result<(), NotinError> {
        let text = self.manager.load(id, None)?;
        self.current_index = id.index();
        debug!(id = %id, index = self.current_index, "navigated");
        for (_, observer) in &mut self.observers {
            observer(id, &text);
        }
        Ok(())
    }

    /// Advance to the next document; a no-op at the last position.
    pub fn next(&mut self) -> Result<(), NotinError> {
        if !self.can_go_next() {
            return Ok(());
        }
        self.go_to(ContentId::ALL[self.current_index + 1])
    }

    /// Step back to the previous document; a no-op at the first position.
    pub fn previous(&mut self) -> Result<(), NotinError> {
        if !self.can_go_previous() {
            return Ok(());
        }
        self.go_to(ContentId::ALL[self.current_index - 1])
    }

    pub fn go_to_index(&mut self, index: usize) -> Result<(), NotinError> {
        let len = self.manager.count();
        if index >= len {
            return Err(NotinError::IndexOutOfRange { index, len });
        }
        self.go_to(ContentId::ALL[index])
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.manager.count()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_id(&self) -> ContentId {
        ContentId::ALL[self.current_index]
    }

    pub fn total(&self) -> usize {
        self.manager.count()
    }

    pub fn navigation_info(&self) -> NavigationInfo {
        NavigationInfo {
            current_index: self.current_index,
            current_id: self.current_id(),
            total: self.total(),
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
            progress: format!("{} of {}", self.current_index + 1, self.total()),
        }
    }

    /// Register an observer; it fires after every successful navigation.
    pub fn subscribe(&mut self, observer: impl FnMut(ContentId, &str) + 'static) -> ObserverId {
        let id = self.next_observer_id;
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove one observer; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Best-effort bulk preload; never fails.
    pub fn preload_all(&mut self, all: HashMap<ContentId, String>) {
        let count = all.len();
        self.manager.load_all(all);
        debug!(count, "preloaded content into session");
    }

    pub fn manager(&self) -> &ContentManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ContentManager {
        &mut self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn loaded_navigator() -> ContentNavigator {
        let mut manager = ContentManager::new();
        let mut all = HashMap::new();
        for id in ContentId::ALL {
            all.insert(id, format!("{id} text"));
        }
        manager.load_all(all);
        manager.load(ContentId::Demo, None).unwrap();
        ContentNavigator::new(manager)
    }

    #[test]
    fn previous_is_a_noop_at_the_first_position() {
        let mut nav = loaded_navigator();
        assert!(!nav.can_go_previous());
        nav.previous().unwrap();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn next_is_a_noop_at_the_last_position() {
        let mut nav = loaded_navigator();
        nav.go_to_index(ContentId::ALL.len() - 1).unwrap();
        assert!(!nav.can_go_next());
        nav.next().unwrap();
        assert_eq!(nav.current_index(), ContentId::ALL.len() - 1);
    }

    #[test]
    fn next_and_previous_walk_the_set() {
        let mut nav = loaded_navigator();
        nav.next().unwrap();
        assert_eq!(nav.current_id(), ContentId::ShortDemo);
        nav.next().unwrap();
        assert_eq!(nav.current_id(), ContentId::MathTest);
        nav.previous().unwrap();
        assert_eq!(nav.current_id(), ContentId::ShortDemo);
    }

    #[test]
    fn go_to_index_checks_bounds() {
        let mut nav = loaded_navigator();
        let err = nav.go_to_index(ContentId::ALL.len()).unwrap_err();
        assert!(matches!(err, NotinError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn observer_fires_once_per_successful_navigation() {
        let mut nav = loaded_navigator();
        let calls: Rc<RefCell<Vec<(ContentId, String)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        nav.subscribe(move |id, text| sink.borrow_mut().push((id, text.to_string())));

        nav.go_to(ContentId::MathTest).unwrap();
        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (ContentId::MathTest, "math-test text".to_string()));
    }

    #[test]
    fn failed_navigation_notifies_nobody_and_keeps_index() {
        let manager = ContentManager::new(); // nothing loaded
        let mut nav = ContentNavigator::new(manager);
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        nav.subscribe(move |_, _| *sink.borrow_mut() += 1);

        let err = nav.go_to(ContentId::MathTest).unwrap_err();
        assert!(matches!(err, NotinError::ContentNotLoaded(_)));
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn multiple_observers_and_unsubscribe() {
        let mut nav = loaded_navigator();
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let sink1 = Rc::clone(&first);
        let sink2 = Rc::clone(&second);
        let id1 = nav.subscribe(move |_, _| *sink1.borrow_mut() += 1);
        nav.subscribe(move |_, _| *sink2.borrow_mut() += 1);

        nav.go_to(ContentId::ShortDemo).unwrap();
        assert!(nav.unsubscribe(id1));
        assert!(!nav.unsubscribe(id1));
        nav.go_to(ContentId::Demo).unwrap();

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 2);
    }

    #[test]
    fn navigation_info_is_a_pure_snapshot() {
        let mut nav = loaded_navigator();
        nav.next().unwrap();
        let info = nav.navigation_info();
        assert_eq!(info.current_index, 1);
        assert_eq!(info.current_id, ContentId::ShortDemo);
        assert_eq!(info.total, 3);
        assert!(info.can_go_next);
        assert!(info.can_go_previous);
        assert_eq!(info.progress, "2 of 3");
        // Taking the snapshot twice changes nothing.
        assert_eq!(info.progress, nav.navigation_info().progress);
    }

    #[test]
    fn preload_all_feeds_the_manager() {
        let mut nav = ContentNavigator::new(ContentManager::new());
        let mut all = HashMap::new();
        all.insert(ContentId::MathTest, "math".to_string());
        nav.preload_all(all);
        assert!(nav.manager().is_cached(ContentId::MathTest));
        nav.go_to(ContentId::MathTest).unwrap();
        assert_eq!(nav.manager().current_text(), "math");
    }
}
