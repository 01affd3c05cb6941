use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// A single-threaded, reference-counted handle with interior mutability.
///
/// The game core runs on one thread and ticks once per frame, so shared state
/// (event subscribers, dirty-chunk sets, listener counters) lives behind
/// `Rc<RefCell<T>>` instead of atomics and locks. Cloning the handle shares
/// the same value.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::core::StResource;
///
/// let counter = StResource::new(0);
/// let captured = counter.clone();
///
/// *captured.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// # Panics
/// `get_mut` panics if a `get` or `get_mut` guard for the same value is still
/// alive. Guards must not be held across calls that may re-enter the owner.
pub struct StResource<T> {
    pub resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    /// Wraps `resource` in a new shared handle.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Borrows the value immutably.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Borrows the value mutably.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }

    /// Replaces the value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.resource.replace(value)
    }

    /// Returns `true` if both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resource, &other.resource)
    }
}

impl<T: Default> Default for StResource<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
