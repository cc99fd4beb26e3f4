use crate::{ContainerId, InstanceId, TemplateId};

/// The scene that the pool recycles instances of.
///
/// The pool does not know how instances are created, shown, hidden, parented or destroyed. It
/// asks the host to do all of that and only keeps track of which instances are parked in the pool
/// and which are checked out.
///
/// # Contract
///
/// * [`instantiate()`](Self::instantiate) returns a new instance that is active and not attached
///   to any pool container.
/// * [`is_alive()`](Self::is_alive) returns `false` for any handle whose instance has been
///   destroyed, including when the underlying slot has since been reused by another instance.
/// * [`destroy()`](Self::destroy) may be called with a handle that is no longer alive, in which
///   case it does nothing.
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    /// Whether the host can instantiate the given template.
    ///
    /// A template the host does not know about is treated like a null template reference.
    fn has_template(&self, template: TemplateId) -> bool;

    /// Creates a new active instance from a template.
    fn instantiate(&mut self, template: TemplateId) -> InstanceId;

    /// Destroys an instance, releasing its resources.
    fn destroy(&mut self, instance: InstanceId);

    /// Whether the instance still exists.
    fn is_alive(&self, instance: InstanceId) -> bool;

    /// Toggles whether the instance is visible and processed, without destroying it.
    fn set_active(&mut self, instance: InstanceId, active: bool);

    /// Reparents the instance under the given container.
    fn attach(&mut self, instance: InstanceId, container: ContainerId);

    /// Creates a container to hold inactive pooled instances.
    fn create_container(&mut self, name: &str) -> ContainerId;

    /// Destroys a container created by [`create_container()`](Self::create_container).
    fn destroy_container(&mut self, container: ContainerId);
}

/// Typed access to a capability (component) of an instance.
///
/// The pool itself is agnostic of what instances contain. Hosts that can resolve a component of
/// type `C` for an instance implement this trait, which enables
/// [`PrefabPool::acquire_component()`][crate::PrefabPool::acquire_component].
pub trait ComponentAccess<C: ?Sized> {
    /// Returns the component of the instance, if the instance is alive and has one.
    fn component(&self, instance: InstanceId) -> Option<&C>;

    /// Returns the component of the instance for modification, if the instance is alive and has
    /// one.
    fn component_mut(&mut self, instance: InstanceId) -> Option<&mut C>;
}
