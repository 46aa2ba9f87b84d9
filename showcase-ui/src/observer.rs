//! Resize observation
//!
//! The host measures element boxes while laying out a frame and reports them
//! here. Observers pick the queued notifications up on the next frame, so size
//! changes reach widgets asynchronously, the way a browser `ResizeObserver`
//! delivers them after layout.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::effects::ElementSize;

/// Identifies one observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(u64);

impl TargetId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    /// Observed targets and their last reported size
    targets: HashMap<TargetId, Option<ElementSize>>,
    pending: Vec<(TargetId, ElementSize)>,
}

impl Registry {
    fn unobserve(&mut self, target: TargetId) {
        self.targets.remove(&target);
        self.pending.retain(|(id, _)| *id != target);
    }
}

/// Shared registry of observed elements (single-threaded).
#[derive(Clone, Default)]
pub struct ResizeObserver {
    registry: Rc<RefCell<Registry>>,
}

impl ResizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing a new target. Observation ends when the guard drops.
    pub fn observe(&self) -> Observation {
        let mut registry = self.registry.borrow_mut();
        let target = TargetId(registry.next_id);
        registry.next_id += 1;
        registry.targets.insert(target, None);
        log::debug!("Observing resize target {}", target.0);

        Observation {
            target,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Record a measured size. Queues a notification if the target is observed
    /// and its size changed since the last report.
    pub fn report(&self, target: TargetId, size: ElementSize) -> bool {
        let mut registry = self.registry.borrow_mut();
        let Some(last) = registry.targets.get_mut(&target) else {
            return false;
        };
        if *last == Some(size) {
            return false;
        }
        *last = Some(size);
        registry.pending.push((target, size));
        true
    }

    /// Drain queued notifications in report order.
    pub fn take_notifications(&self) -> Vec<(TargetId, ElementSize)> {
        std::mem::take(&mut self.registry.borrow_mut().pending)
    }

    pub fn is_observing(&self, target: TargetId) -> bool {
        self.registry.borrow().targets.contains_key(&target)
    }

    /// Number of observed targets.
    pub fn len(&self) -> usize {
        self.registry.borrow().targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for one observed target; unobserves on drop.
pub struct Observation {
    target: TargetId,
    registry: Weak<RefCell<Registry>>,
}

impl Observation {
    pub fn target(&self) -> TargetId {
        self.target
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().unobserve(self.target);
            log::debug!("Stopped observing resize target {}", self.target.0);
        }
    }
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation")
            .field("target", &self.target)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_queues_changes_only() {
        let observer = ResizeObserver::new();
        let observation = observer.observe();
        let target = observation.target();

        assert!(observer.report(target, ElementSize::new(220.0, 300.0)));
        assert!(!observer.report(target, ElementSize::new(220.0, 300.0)));
        assert!(observer.report(target, ElementSize::new(110.0, 150.0)));

        assert_eq!(
            observer.take_notifications(),
            vec![
                (target, ElementSize::new(220.0, 300.0)),
                (target, ElementSize::new(110.0, 150.0)),
            ]
        );
        assert!(observer.take_notifications().is_empty());
    }

    #[test]
    fn test_drop_unobserves_and_discards_pending() {
        let observer = ResizeObserver::new();
        let observation = observer.observe();
        let target = observation.target();
        observer.report(target, ElementSize::new(10.0, 10.0));

        drop(observation);

        assert!(!observer.is_observing(target));
        assert!(observer.is_empty());
        assert!(observer.take_notifications().is_empty());
        assert!(!observer.report(target, ElementSize::new(20.0, 20.0)));
    }

    #[test]
    fn test_targets_are_independent() {
        let observer = ResizeObserver::new();
        let first = observer.observe();
        let second = observer.observe();
        assert_ne!(first.target(), second.target());

        observer.report(first.target(), ElementSize::new(1.0, 1.0));
        observer.report(second.target(), ElementSize::new(2.0, 2.0));
        drop(first);

        assert_eq!(
            observer.take_notifications(),
            vec![(second.target(), ElementSize::new(2.0, 2.0))]
        );
    }

    #[test]
    fn test_guard_outliving_observer() {
        let observer = ResizeObserver::new();
        let observation = observer.observe();
        drop(observer);
        // Nothing left to unregister from.
        drop(observation);
    }
}
