/// Determines what happens when a [`PrefabPool`][crate::PrefabPool] is dropped without
/// [`shutdown()`][crate::PrefabPool::shutdown] while it still tracks instances.
///
/// Dropping a pool never destroys instances, because that requires access to the host. Pooled
/// instances left behind stay in the host's pool container until the host itself disposes of it.
///
/// By default, the pool may be dropped at any time.
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
/// // The drop policy is set at pool creation time.
/// let pool = PrefabPool::builder()
///     .drop_policy(DropPolicy::MustNotDropItems)
///     .build(&mut scene);
///
/// pool.shutdown(&mut scene);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum DropPolicy {
    /// The pool may be dropped while it still tracks instances. This is the default.
    #[default]
    MayDropItems,

    /// The pool will panic if it still tracks instances when it is dropped.
    ///
    /// This may be valuable if every instance must be accounted for, for example when the host
    /// reports leaked entities as errors and the pool is expected to be shut down explicitly.
    MustNotDropItems,
}
