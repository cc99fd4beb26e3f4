//! Metrics for the prefab pool.
//!
//! These events count how often the pool manages to recycle an instance versus how often it has
//! to fall back to the host, which is the main signal for tuning initial pool sizes.

use nm::Event;

thread_local! {
    /// An acquired instance was taken from a free-list.
    pub(crate) static ACQUIRE_REUSED: Event = Event::builder()
        .name("prefab_pool_acquire_reused")
        .build();

    /// An acquired instance had to be instantiated because no free-list entry was available.
    pub(crate) static ACQUIRE_INSTANTIATED: Event = Event::builder()
        .name("prefab_pool_acquire_instantiated")
        .build();

    /// A free-list entry was found to have been destroyed behind the pool's back and was discarded.
    pub(crate) static STALE_DISCARDED: Event = Event::builder()
        .name("prefab_pool_stale_discarded")
        .build();

    /// A checked out instance was returned to its free-list.
    pub(crate) static RELEASED: Event = Event::builder()
        .name("prefab_pool_released")
        .build();

    /// An instance unknown to the pool was released and therefore destroyed.
    pub(crate) static RELEASE_DESTROYED: Event = Event::builder()
        .name("prefab_pool_release_destroyed")
        .build();

    /// A parked instance was destroyed by resetting its free-list.
    pub(crate) static RESET_DESTROYED: Event = Event::builder()
        .name("prefab_pool_reset_destroyed")
        .build();

    /// A parked instance was destroyed by shutting the pool down.
    pub(crate) static SHUTDOWN_DESTROYED: Event = Event::builder()
        .name("prefab_pool_shutdown_destroyed")
        .build();
}
