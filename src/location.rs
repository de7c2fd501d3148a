use crate::extensions::LockOrRecover;
use crate::geo::GeoPoint;
use std::collections::VecDeque;
use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, trace};

/// Identifies a view surface that renders, and can change, the impact location.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SurfaceId(&'static str);

impl SurfaceId {
    pub const MAP: SurfaceId = SurfaceId("map");
    pub const GLOBE: SurfaceId = SurfaceId("globe");

    #[cfg(test)]
    pub const fn new(name: &'static str) -> Self {
        SurfaceId(name)
    }
}

impl Display for SurfaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// What caused the most recent location change.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Origin {
    None,
    Surface(SurfaceId),
    Programmatic,
}

impl Origin {
    fn is_surface(&self, id: SurfaceId) -> bool {
        matches!(self, Origin::Surface(origin) if *origin == id)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LocationUpdate {
    pub location: GeoPoint,
    pub origin: Origin,
}

type Callback = Arc<dyn Fn(&LocationUpdate) + Send + Sync>;

struct Subscriber {
    key: u64,
    id: SurfaceId,
    callback: Callback,
}

struct Inner {
    current: LocationUpdate,
    subscribers: Vec<Subscriber>,
    next_key: u64,
    notifying: bool,
    pending: VecDeque<LocationUpdate>,
}

/// The single source of truth for where the asteroid hits.
///
/// Every change goes through [`ImpactLocationState::set`], which notifies all subscribers
/// except the surface that caused the change. Notification is synchronous and happens in
/// registration order. [`ImpactLocationState::get`] sees a new location as soon as `set` is
/// called, but the notifications of a `set` issued while a round is running are queued and
/// delivered by the thread running that round once it completes, so two rounds never interleave.
/// Callers must not hold a lock that a subscriber takes while calling `set`.
pub struct ImpactLocationState {
    inner: Mutex<Inner>,
}

impl ImpactLocationState {
    pub fn new(initial: GeoPoint) -> Arc<Self> {
        Arc::new(ImpactLocationState {
            inner: Mutex::new(Inner {
                current: LocationUpdate {
                    location: initial,
                    origin: Origin::None,
                },
                subscribers: Vec::new(),
                next_key: 0,
                notifying: false,
                pending: VecDeque::new(),
            }),
        })
    }

    pub fn get(&self) -> GeoPoint {
        self.inner.lock_or_recover().current.location
    }

    pub fn origin(&self) -> Origin {
        self.inner.lock_or_recover().current.origin
    }

    pub fn set(&self, location: GeoPoint, origin: Origin) {
        let mut inner = self.inner.lock_or_recover();
        let update = LocationUpdate { location, origin };
        inner.current = update;
        inner.pending.push_back(update);

        if inner.notifying {
            trace!(?origin, "📍 Queued notification for {} until the current round completes", location);
            return;
        }

        inner.notifying = true;
        let _round = NotificationRound(self);
        while let Some(update) = inner.pending.pop_front() {
            let recipients = inner
                .subscribers
                .iter()
                .filter(|subscriber| !update.origin.is_surface(subscriber.id))
                .map(|subscriber| Arc::clone(&subscriber.callback))
                .collect::<Vec<Callback>>();
            drop(inner);

            debug!(origin = ?update.origin, "📍 Impact location set to {}, notifying {} view(s)", update.location, recipients.len());
            for callback in recipients {
                callback(&update);
            }

            inner = self.inner.lock_or_recover();
        }
        drop(inner);
    }

    /// Registers `callback` for every update not caused by the surface `id`.
    ///
    /// The callback stays registered until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(self: &Arc<Self>, id: SurfaceId, callback: F) -> Subscription
    where
        F: Fn(&LocationUpdate) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock_or_recover();
        let key = inner.next_key;
        inner.next_key += 1;
        inner.subscribers.push(Subscriber {
            key,
            id,
            callback: Arc::new(callback),
        });
        debug!(surface = %id, "📍 Subscribed to impact location updates");

        Subscription {
            state: Arc::downgrade(self),
            key,
        }
    }

    fn unsubscribe(&self, key: u64) {
        self.inner.lock_or_recover().subscribers.retain(|subscriber| subscriber.key != key);
    }
}

impl Debug for ImpactLocationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock_or_recover();
        f.debug_struct("ImpactLocationState")
            .field("current", &inner.current)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Ends a notification round, also when a subscriber panicked halfway through it.
struct NotificationRound<'a>(&'a ImpactLocationState);

impl Drop for NotificationRound<'_> {
    fn drop(&mut self) {
        let mut inner = self.0.inner.lock_or_recover();
        inner.notifying = false;
        inner.pending.clear();
    }
}

/// Keeps a subscriber registered; dropping it deregisters the callback.
#[must_use = "the subscriber is removed as soon as the subscription is dropped"]
#[derive(Debug)]
pub struct Subscription {
    state: Weak<ImpactLocationState>,
    key: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.unsubscribe(self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::panic::{self, AssertUnwindSafe};

    const A: SurfaceId = SurfaceId::new("A");
    const B: SurfaceId = SurfaceId::new("B");
    const C: SurfaceId = SurfaceId::new("C");

    type Calls = Arc<Mutex<Vec<(SurfaceId, GeoPoint)>>>;

    fn geo(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).unwrap()
    }

    fn record(state: &Arc<ImpactLocationState>, id: SurfaceId, calls: &Calls) -> Subscription {
        let calls = Arc::clone(calls);
        state.subscribe(id, move |update| calls.lock().unwrap().push((id, update.location)))
    }

    #[test]
    fn get_returns_the_initial_location() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));

        assert_eq!(state.get(), geo(28.7, 77.1));
        assert_eq!(state.origin(), Origin::None);
    }

    #[test]
    fn set_notifies_every_subscriber_except_the_origin() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));
        let calls = Calls::default();
        let _a = record(&state, A, &calls);
        let _b = record(&state, B, &calls);
        let _c = record(&state, C, &calls);

        state.set(geo(10.0, 20.0), Origin::Surface(A));

        assert_eq!(*calls.lock().unwrap(), vec![(B, geo(10.0, 20.0)), (C, geo(10.0, 20.0))]);
        assert_eq!(state.origin(), Origin::Surface(A));
    }

    #[test]
    fn programmatic_set_notifies_all_subscribers_in_registration_order() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));
        let calls = Calls::default();
        let _c = record(&state, C, &calls);
        let _a = record(&state, A, &calls);

        state.set(geo(-5.0, 5.0), Origin::Programmatic);

        assert_eq!(*calls.lock().unwrap(), vec![(C, geo(-5.0, 5.0)), (A, geo(-5.0, 5.0))]);
    }

    #[test]
    fn last_write_wins() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));

        state.set(geo(1.0, 2.0), Origin::Surface(A));
        state.set(geo(3.0, 4.0), Origin::Surface(B));

        assert_eq!(state.get(), geo(3.0, 4.0));
        assert_eq!(state.origin(), Origin::Surface(B));
    }

    #[test]
    fn dropping_the_subscription_stops_notifications() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));
        let calls = Calls::default();
        let a = record(&state, A, &calls);
        let _b = record(&state, B, &calls);

        drop(a);
        state.set(geo(1.0, 1.0), Origin::Programmatic);

        assert_eq!(*calls.lock().unwrap(), vec![(B, geo(1.0, 1.0))]);
    }

    #[test]
    fn set_from_a_subscriber_is_applied_after_the_current_round() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));
        let calls = Calls::default();

        let weak = Arc::downgrade(&state);
        let _a = state.subscribe(A, move |update| {
            if update.location == geo(1.0, 1.0) {
                if let Some(state) = weak.upgrade() {
                    state.set(geo(2.0, 2.0), Origin::Surface(A));
                }
            }
        });
        let _b = record(&state, B, &calls);
        let _c = record(&state, C, &calls);

        state.set(geo(1.0, 1.0), Origin::Programmatic);

        assert_eq!(
            *calls.lock().unwrap(),
            vec![(B, geo(1.0, 1.0)), (C, geo(1.0, 1.0)), (B, geo(2.0, 2.0)), (C, geo(2.0, 2.0))]
        );
        assert_eq!(state.get(), geo(2.0, 2.0));
    }

    #[test]
    fn panicking_subscriber_does_not_stall_later_updates() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));
        let calls = Calls::default();
        let _a = state.subscribe(A, |update| {
            if update.location == geo(1.0, 1.0) {
                panic!("subscriber failed");
            }
        });
        let _b = record(&state, B, &calls);

        let result = panic::catch_unwind(AssertUnwindSafe(|| state.set(geo(1.0, 1.0), Origin::Programmatic)));
        assert!(result.is_err());

        state.set(geo(5.0, 5.0), Origin::Programmatic);

        assert_eq!(state.get(), geo(5.0, 5.0));
        assert_eq!(*calls.lock().unwrap(), vec![(B, geo(5.0, 5.0))]);
    }

    #[test]
    fn subscription_outliving_the_state_is_harmless() {
        let state = ImpactLocationState::new(geo(28.7, 77.1));
        let subscription = state.subscribe(A, |_| {});

        drop(state);
        drop(subscription);
    }
}
