//! # Event Bus
//!
//! Fire-and-forget notifications for block edits.
//!
//! The chunk store publishes after every committed edit; peripheral systems
//! (mesh invalidation, achievements, audio cues) subscribe per topic. A
//! subscription is a plain callback stored in insertion order and removed by
//! the handle returned from [`EventBus::subscribe`].
//!
//! ## Re-entrancy
//!
//! `publish` iterates over a snapshot of the topic's subscribers, so callbacks
//! may subscribe or unsubscribe (themselves or others) while a dispatch is in
//! flight. A subscriber removed mid-dispatch is not called afterwards; every
//! other subscriber still receives the event exactly once.

use std::{collections::HashMap, rc::Rc};

use cgmath::Point3;

use crate::core::StResource;

use super::voxels::block::block_type::BlockKind;

/// Event channels offered by the bus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// A block was added to (or replaced in) the world.
    BlockPlaced,
    /// A block was removed from the world.
    BlockRemoved,
}

/// Payload carried by a published event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockEvent {
    /// `blockPlaced {x, y, z, kind}`
    Placed {
        position: Point3<i32>,
        kind: BlockKind,
    },
    /// `blockRemoved {x, y, z}`
    Removed { position: Point3<i32> },
}

impl BlockEvent {
    /// The topic this event is delivered on.
    pub fn topic(&self) -> Topic {
        match self {
            BlockEvent::Placed { .. } => Topic::BlockPlaced,
            BlockEvent::Removed { .. } => Topic::BlockRemoved,
        }
    }

    /// The lattice position the event refers to.
    pub fn position(&self) -> Point3<i32> {
        match *self {
            BlockEvent::Placed { position, .. } | BlockEvent::Removed { position } => position,
        }
    }
}

/// Callback invoked for every event on a subscribed topic.
pub type EventCallback = Rc<dyn Fn(&BlockEvent)>;

/// Handle identifying one subscription. Pass it to [`EventBus::unsubscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    topic: Topic,
    id: u64,
}

impl SubscriptionHandle {
    /// The topic this subscription listens on.
    pub fn topic(&self) -> Topic {
        self.topic
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    channels: HashMap<Topic, Vec<(u64, EventCallback)>>,
}

impl Registry {
    fn is_subscribed(&self, topic: Topic, id: u64) -> bool {
        self.channels
            .get(&topic)
            .is_some_and(|subscribers| subscribers.iter().any(|(sid, _)| *sid == id))
    }
}

/// Publish/subscribe registry keyed by [`Topic`].
///
/// Cloning the bus yields another handle to the same registry.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::core::StResource;
/// use voxel_sandbox::engine_state::events::{BlockEvent, EventBus, Topic};
/// use cgmath::Point3;
///
/// let bus = EventBus::new();
/// let removed = StResource::new(0);
/// let counter = removed.clone();
/// let handle = bus.subscribe(Topic::BlockRemoved, move |_| *counter.get_mut() += 1);
///
/// bus.publish(&BlockEvent::Removed { position: Point3::new(0, 0, 0) });
/// bus.unsubscribe(handle);
/// bus.publish(&BlockEvent::Removed { position: Point3::new(0, 0, 0) });
/// assert_eq!(*removed.get(), 1);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    registry: StResource<Registry>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every future event on `topic`.
    pub fn subscribe<F>(&self, topic: Topic, callback: F) -> SubscriptionHandle
    where
        F: Fn(&BlockEvent) + 'static,
    {
        let mut registry = self.registry.get_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .channels
            .entry(topic)
            .or_default()
            .push((id, Rc::new(callback)));
        SubscriptionHandle { topic, id }
    }

    /// Removes a subscription.
    ///
    /// Returns `true` if the subscription was active. Removing an already
    /// removed subscription is a no-op that returns `false`.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut registry = self.registry.get_mut();
        let Some(subscribers) = registry.channels.get_mut(&handle.topic) else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != handle.id);
        before != subscribers.len()
    }

    /// Delivers `event` to every current subscriber of its topic.
    pub fn publish(&self, event: &BlockEvent) {
        let topic = event.topic();
        let snapshot: Vec<(u64, EventCallback)> = match self.registry.get().channels.get(&topic) {
            Some(subscribers) => subscribers.clone(),
            None => return,
        };

        for (id, callback) in snapshot {
            // The registry borrow must be released before the callback runs.
            let still_subscribed = self.registry.get().is_subscribed(topic, id);
            if still_subscribed {
                callback(event);
            }
        }
    }

    /// Number of active subscriptions on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry
            .get()
            .channels
            .get(&topic)
            .map_or(0, |subscribers| subscribers.len())
    }
}
