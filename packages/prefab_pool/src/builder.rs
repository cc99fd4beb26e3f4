use std::borrow::Cow;
use std::cell::Cell;
use std::marker::PhantomData;

use crate::{DropPolicy, Host, PrefabPool};

const DEFAULT_CONTAINER_NAME: &str = "PrefabPool";

/// Builder for creating an instance of [`PrefabPool`].
///
/// All settings are optional. Building the pool is the initialization step: it asks the host to
/// create the container that inactive pooled instances are parked under.
///
/// # Examples
///
/// ```
/// use prefab_pool::{DropPolicy, PrefabPool};
/// # use prefab_pool::{ContainerId, Host, InstanceId, TemplateId};
/// # struct NoScene;
/// # impl Host for NoScene {
/// #     fn has_template(&self, _: TemplateId) -> bool { false }
/// #     fn instantiate(&mut self, _: TemplateId) -> InstanceId { unreachable!() }
/// #     fn destroy(&mut self, _: InstanceId) {}
/// #     fn is_alive(&self, _: InstanceId) -> bool { false }
/// #     fn set_active(&mut self, _: InstanceId, _: bool) {}
/// #     fn attach(&mut self, _: InstanceId, _: ContainerId) {}
/// #     fn create_container(&mut self, _: &str) -> ContainerId { ContainerId::new(0) }
/// #     fn destroy_container(&mut self, _: ContainerId) {}
/// # }
/// # let mut scene = NoScene;
///
/// let pool = PrefabPool::builder()
///     .container_name("Projectiles")
///     .drop_policy(DropPolicy::MustNotDropItems)
///     .build(&mut scene);
/// # pool.shutdown(&mut scene);
/// ```
///
/// # Thread safety
///
/// The builder is thread-mobile ([`Send`]) and can be safely transferred between threads,
/// allowing pool configuration to happen on different threads than where the pool is used.
/// However, it is not thread-safe ([`Sync`]) as it contains mutable configuration state.
#[derive(Debug)]
#[must_use]
pub struct PrefabPoolBuilder {
    container_name: Cow<'static, str>,
    drop_policy: DropPolicy,

    // Prevents Sync while allowing Send - builders are thread-mobile but not thread-safe
    _not_sync: PhantomData<Cell<()>>,
}

impl PrefabPoolBuilder {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            container_name: Cow::Borrowed(DEFAULT_CONTAINER_NAME),
            drop_policy: DropPolicy::default(),
            _not_sync: PhantomData,
        }
    }

    /// Sets the name of the container that holds inactive pooled instances.
    ///
    /// Defaults to `"PrefabPool"`.
    ///
    /// # Panics
    ///
    /// Panics if the name is empty.
    #[inline]
    pub fn container_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        assert!(
            !name.is_empty(),
            "PrefabPool container name must not be empty"
        );
        self.container_name = name;
        self
    }

    /// Sets the [drop policy][DropPolicy] for the pool. This governs how to treat instances
    /// still tracked by the pool when the pool is dropped without being shut down.
    #[inline]
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Builds the pool, creating its container in the host.
    #[must_use]
    pub fn build<H>(self, host: &mut H) -> PrefabPool
    where
        H: Host + ?Sized,
    {
        let container = host.create_container(&self.container_name);
        PrefabPool::new_inner(container, self.drop_policy)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::{ContainerId, MockHost};

    assert_impl_all!(PrefabPoolBuilder: Send, std::fmt::Debug);
    assert_not_impl_any!(PrefabPoolBuilder: Sync);

    #[test]
    fn builder_new_creates_default_state() {
        let builder = PrefabPoolBuilder::new();
        assert_eq!(builder.container_name, DEFAULT_CONTAINER_NAME);
        assert_eq!(builder.drop_policy, DropPolicy::default());
    }

    #[test]
    fn container_name_accepts_borrowed_and_owned() {
        let builder = PrefabPoolBuilder::new().container_name("Bullets");
        assert_eq!(builder.container_name, "Bullets");

        let builder = PrefabPoolBuilder::new().container_name(format!("Wave{}", 3));
        assert_eq!(builder.container_name, "Wave3");
    }

    #[test]
    #[should_panic]
    fn empty_container_name_panics() {
        let _builder = PrefabPoolBuilder::new().container_name("");
    }

    #[test]
    fn drop_policy_can_be_overridden() {
        let builder = PrefabPoolBuilder::new()
            .drop_policy(DropPolicy::MustNotDropItems)
            .drop_policy(DropPolicy::MayDropItems);
        assert_eq!(builder.drop_policy, DropPolicy::MayDropItems);
    }

    #[test]
    fn build_creates_exactly_one_container() {
        let mut host = MockHost::new();
        host.expect_create_container()
            .times(1)
            .return_const(ContainerId::new(42));

        let pool = PrefabPoolBuilder::new().build(&mut host);

        assert_eq!(pool.container(), ContainerId::new(42));
    }

    #[test]
    fn builder_is_debug() {
        let builder = PrefabPoolBuilder::new().container_name("Enemies");
        let debug_output = format!("{builder:?}");
        assert!(debug_output.contains("PrefabPoolBuilder"));
        assert!(debug_output.contains("Enemies"));
    }
}
