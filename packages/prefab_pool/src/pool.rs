use std::collections::VecDeque;
use std::thread;

use nm::Event;
use tracing::{debug, trace};

use crate::metrics::{
    ACQUIRE_INSTANTIATED, ACQUIRE_REUSED, RELEASE_DESTROYED, RELEASED, RESET_DESTROYED,
    SHUTDOWN_DESTROYED, STALE_DISCARDED,
};
use crate::{
    ComponentAccess, ContainerId, DropPolicy, Error, Host, InstanceId, Ledger, PrefabPoolBuilder,
    Result, TemplateId,
};

/// Recycles instances created from templates so they do not have to be repeatedly instantiated
/// and destroyed.
///
/// For every template, the pool keeps a free-list of inactive instances parked under the pool's
/// container. [`acquire()`](Self::acquire) hands out the oldest parked instance (or a brand new
/// one if none is available) and [`release()`](Self::release) parks it again.
///
/// The pool does not own the host. Every operation that needs to touch instances takes the host
/// as a parameter.
///
/// # Lifetime
///
/// The pool is created by [`PrefabPoolBuilder::build()`] and should be finished with
/// [`shutdown()`](Self::shutdown), which destroys all parked instances and the container. A pool
/// that is merely dropped leaves its parked instances in the host, subject to its
/// [`DropPolicy`].
///
/// # Stale entries
///
/// Parked instances may be destroyed by code other than the pool. The pool does not go looking
/// for such instances. They are discarded when they reach the front of their free-list.
///
/// # Example
///
/// ```
/// use prefab_pool::PrefabPool;
/// use testing::FakeScene;
///
/// let mut scene = FakeScene::new();
/// let bullet = scene.register_template("bullet");
///
/// let mut pool = PrefabPool::builder().build(&mut scene);
/// pool.create_pool(&mut scene, bullet, 2).unwrap();
///
/// let first = pool.acquire(&mut scene, bullet);
/// assert!(scene.is_active(first));
///
/// pool.release(&mut scene, first);
/// assert!(!scene.is_active(first));
///
/// pool.shutdown(&mut scene);
/// ```
///
/// # Thread safety
///
/// The pool is not designed for concurrent use. Every operation that changes the pool requires
/// exclusive access to it.
#[derive(Debug)]
pub struct PrefabPool {
    ledger: Ledger,
    container: ContainerId,
    drop_policy: DropPolicy,
}

impl PrefabPool {
    /// Creates a builder for configuring and constructing a [`PrefabPool`].
    pub fn builder() -> PrefabPoolBuilder {
        PrefabPoolBuilder::new()
    }

    #[must_use]
    pub(crate) fn new_inner(container: ContainerId, drop_policy: DropPolicy) -> Self {
        debug!(%container, ?drop_policy, "prefab pool initialized");

        Self {
            ledger: Ledger::new(),
            container,
            drop_policy,
        }
    }

    /// The container that inactive pooled instances are attached to.
    #[must_use]
    #[inline]
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Prewarms a free-list for the template with `size` inactive instances.
    ///
    /// If the template already has a free-list, nothing happens: the existing free-list is
    /// neither topped up nor reset, whatever `size` is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the host does not know the template or if `size` is
    /// zero. The host is not asked to instantiate anything in that case.
    pub fn create_pool<H>(&mut self, host: &mut H, template: TemplateId, size: usize) -> Result<()>
    where
        H: Host + ?Sized,
    {
        if !host.has_template(template) {
            return Err(Error::InvalidArgument {
                argument: "template",
                problem: format!("template {template} is not known to the host"),
            });
        }

        if size == 0 {
            return Err(Error::InvalidArgument {
                argument: "size",
                problem: "pool size must be greater than zero".to_string(),
            });
        }

        if self.ledger.has_free_list(template) {
            trace!(%template, "free-list already exists, not creating another");
            return Ok(());
        }

        let mut entries = VecDeque::with_capacity(size);

        for _ in 0..size {
            let instance = host.instantiate(template);
            host.set_active(instance, false);
            host.attach(instance, self.container);
            entries.push_back(instance);
        }

        self.ledger.insert_free_list(template, entries);

        debug!(%template, size, "created free-list");

        Ok(())
    }

    /// Checks out an active instance of the template.
    ///
    /// The oldest live instance in the template's free-list is reactivated and returned. Entries
    /// destroyed behind the pool's back are discarded along the way. If the free-list is missing
    /// or runs dry, a new instance is instantiated instead; the pool grows without bound.
    ///
    /// The returned instance stays attached wherever it was: detaching it from the pool container
    /// is up to the caller.
    pub fn acquire<H>(&mut self, host: &mut H, template: TemplateId) -> InstanceId
    where
        H: Host + ?Sized,
    {
        let popped = self
            .ledger
            .pop_free(template, |candidate| host.is_alive(candidate));

        if popped.stale > 0 {
            trace!(%template, stale = popped.stale, "discarded stale free-list entries");
            STALE_DISCARDED.with(|event| event.batch(popped.stale).observe_once());
        }

        let instance = if let Some(instance) = popped.instance {
            host.set_active(instance, true);
            ACQUIRE_REUSED.with(Event::observe_once);
            trace!(%template, %instance, "reused pooled instance");
            instance
        } else {
            let instance = host.instantiate(template);
            ACQUIRE_INSTANTIATED.with(Event::observe_once);
            trace!(%template, %instance, "instantiated new instance");
            instance
        };

        self.ledger.check_out(instance, template);

        instance
    }

    /// Checks out an active instance of the template, together with its component of type `C`.
    ///
    /// This is [`acquire()`](Self::acquire) followed by a
    /// [`ComponentAccess::component_mut()`] lookup. The component is `None` if the instance
    /// does not have one; the instance is checked out either way and must be released as usual.
    pub fn acquire_component<'h, C, H>(
        &mut self,
        host: &'h mut H,
        template: TemplateId,
    ) -> (InstanceId, Option<&'h mut C>)
    where
        C: ?Sized,
        H: Host + ComponentAccess<C> + ?Sized,
    {
        let instance = self.acquire(host, template);
        (instance, host.component_mut(instance))
    }

    /// Returns a checked out instance to the pool.
    ///
    /// The instance is deactivated, attached to the pool container and appended to the back of
    /// its template's free-list, which is created if the template did not have one yet.
    ///
    /// An instance the pool does not consider checked out (never acquired from this pool, or
    /// already released) is destroyed instead.
    pub fn release<H>(&mut self, host: &mut H, instance: InstanceId)
    where
        H: Host + ?Sized,
    {
        if let Some(template) = self.ledger.check_in(instance) {
            host.set_active(instance, false);
            host.attach(instance, self.container);

            RELEASED.with(Event::observe_once);
            trace!(%template, %instance, "returned instance to free-list");
        } else {
            host.destroy(instance);

            RELEASE_DESTROYED.with(Event::observe_once);
            debug!(%instance, "destroyed instance that was not checked out from the pool");
        }
    }

    /// Destroys every instance parked in the template's free-list.
    ///
    /// The free-list is left empty but still exists. Checked out instances of the template are
    /// not affected; releasing them later refills the free-list. A template without a free-list
    /// is left alone.
    pub fn reset_pool<H>(&mut self, host: &mut H, template: TemplateId)
    where
        H: Host + ?Sized,
    {
        let Some(entries) = self.ledger.take_free(template) else {
            trace!(%template, "no free-list to reset");
            return;
        };

        let destroyed = destroy_live(host, entries);

        if destroyed > 0 {
            RESET_DESTROYED.with(|event| event.batch(destroyed).observe_once());
        }

        debug!(%template, destroyed, "reset free-list");
    }

    /// Shuts the pool down, destroying every parked instance and then the pool container.
    ///
    /// Checked out instances are not destroyed, as they belong to whoever acquired them. They are
    /// returned, ordered by handle, so the caller can dispose of them.
    pub fn shutdown<H>(mut self, host: &mut H) -> Vec<InstanceId>
    where
        H: Host + ?Sized,
    {
        let (free, mut live) = self.ledger.take_all();

        let destroyed = destroy_live(host, free);
        host.destroy_container(self.container);

        if destroyed > 0 {
            SHUTDOWN_DESTROYED.with(|event| event.batch(destroyed).observe_once());
        }

        live.sort_unstable();

        debug!(
            container = %self.container,
            destroyed,
            checked_out = live.len(),
            "prefab pool shut down"
        );

        live
    }

    /// Whether the template has a free-list, possibly an empty one.
    #[must_use]
    #[inline]
    pub fn has_pool(&self, template: TemplateId) -> bool {
        self.ledger.has_free_list(template)
    }

    /// The number of entries in the template's free-list, or `None` if it has no free-list.
    ///
    /// Stale entries that have not been discarded yet are included in the count.
    #[must_use]
    #[inline]
    pub fn free_len(&self, template: TemplateId) -> Option<usize> {
        self.ledger.free_len(template)
    }

    /// The number of instances currently checked out, across all templates.
    #[must_use]
    #[inline]
    pub fn live_len(&self) -> usize {
        self.ledger.live_len()
    }

    /// The template a checked out instance was created from, or `None` if the instance is not
    /// checked out from this pool.
    #[must_use]
    #[inline]
    pub fn template_of(&self, instance: InstanceId) -> Option<TemplateId> {
        self.ledger.template_of(instance)
    }

    /// Whether the instance is checked out from this pool.
    #[must_use]
    #[inline]
    pub fn is_live(&self, instance: InstanceId) -> bool {
        self.ledger.template_of(instance).is_some()
    }

    /// The templates that have a free-list, in no particular order.
    pub fn templates(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.ledger.templates()
    }

    /// Whether the pool tracks no instances, neither parked nor checked out.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}

/// Destroys the entries that are still alive, returning how many were destroyed.
fn destroy_live<H>(host: &mut H, entries: impl IntoIterator<Item = InstanceId>) -> usize
where
    H: Host + ?Sized,
{
    let mut destroyed: usize = 0;

    for instance in entries {
        if host.is_alive(instance) {
            host.destroy(instance);
            destroyed = destroyed.saturating_add(1);
        }
    }

    destroyed
}

impl Drop for PrefabPool {
    #[cfg_attr(test, mutants::skip)] // Mutations can panic during unwinding, aborting the run.
    fn drop(&mut self) {
        if matches!(self.drop_policy, DropPolicy::MustNotDropItems) && !thread::panicking() {
            assert!(
                self.is_empty(),
                "PrefabPool dropped while still tracking instances under MustNotDropItems"
            );
        }
    }
}
