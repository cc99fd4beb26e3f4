#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for testing and examples in `prefab_pool` packages.
//!
//! The main item is [`FakeScene`], an in-memory [`Host`] that stores entities in generation-checked
//! slots and records every operation the pool asks of it.

use std::num::NonZero;

use foldhash::{HashMap, HashMapExt};
use new_zealand::nz;
use prefab_pool::{ComponentAccess, ContainerId, Host, InstanceId, TemplateId};

/// A component every [`FakeScene`] entity carries: the name of the template it was created from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(
    clippy::exhaustive_structs,
    reason = "plain newtype that tests and examples construct and destructure directly"
)]
pub struct Label(pub String);

/// An operation a pool performed on a [`FakeScene`] through the [`Host`] trait.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SceneOp {
    /// `Host::instantiate()` created the instance from the template.
    Instantiate(TemplateId, InstanceId),

    /// `Host::destroy()` was called for the instance, whether or not it was still alive.
    Destroy(InstanceId),

    /// `Host::set_active()` was called.
    SetActive(InstanceId, bool),

    /// `Host::attach()` was called.
    Attach(InstanceId, ContainerId),

    /// `Host::create_container()` created the container.
    CreateContainer(ContainerId),

    /// `Host::destroy_container()` was called for the container.
    DestroyContainer(ContainerId),
}

#[derive(Debug)]
struct Entity {
    template: TemplateId,
    label: Label,
    active: bool,
    parent: Option<ContainerId>,
}

#[derive(Debug)]
struct Slot {
    generation: NonZero<u32>,
    entity: Option<Entity>,
}

/// An in-memory scene for exercising a pool.
///
/// Entities live in slots that are reused after the occupant is destroyed, with the slot
/// generation bumped on every reuse. Operations requested through [`Host`] are recorded and can be
/// inspected via [`ops()`](Self::ops). Entities created or destroyed directly via
/// [`spawn()`](Self::spawn) and [`despawn()`](Self::despawn) are not recorded, as they stand in
/// for code outside the pool.
#[derive(Debug)]
pub struct FakeScene {
    templates: HashMap<TemplateId, String>,
    slots: Vec<Slot>,
    vacant: Vec<u32>,
    containers: HashMap<ContainerId, String>,
    next_container: u32,
    ops: Vec<SceneOp>,
}

impl FakeScene {
    /// Creates an empty scene with no templates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
            slots: Vec::new(),
            vacant: Vec::new(),
            containers: HashMap::new(),
            next_container: 0,
            ops: Vec::new(),
        }
    }

    /// Registers a template that entities can be created from.
    pub fn register_template(&mut self, name: impl Into<String>) -> TemplateId {
        let raw = u32::try_from(self.templates.len())
            .ok()
            .and_then(|count| count.checked_add(1))
            .expect("test scenes never register that many templates");

        let template = TemplateId::new(raw);
        self.templates.insert(template, name.into());
        template
    }

    /// Creates an entity without going through a pool.
    pub fn spawn(&mut self, template: TemplateId) -> InstanceId {
        self.create_entity(template)
    }

    /// Destroys an entity without going through a pool.
    ///
    /// Returns whether the entity was still alive.
    pub fn despawn(&mut self, instance: InstanceId) -> bool {
        self.remove_entity(instance)
    }

    /// Whether the entity is alive and active.
    #[must_use]
    pub fn is_active(&self, instance: InstanceId) -> bool {
        self.entity(instance).is_some_and(|entity| entity.active)
    }

    /// The container the entity is attached to, if it is alive and attached.
    #[must_use]
    pub fn parent(&self, instance: InstanceId) -> Option<ContainerId> {
        self.entity(instance).and_then(|entity| entity.parent)
    }

    /// The template the entity was created from, if it is alive.
    #[must_use]
    pub fn template_of(&self, instance: InstanceId) -> Option<TemplateId> {
        self.entity(instance).map(|entity| entity.template)
    }

    /// The number of entities currently alive.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.entity.is_some())
            .count()
    }

    /// The name the container was created with, if it still exists.
    #[must_use]
    pub fn container_name(&self, container: ContainerId) -> Option<&str> {
        self.containers.get(&container).map(String::as_str)
    }

    /// Every operation performed through [`Host`], oldest first.
    #[must_use]
    pub fn ops(&self) -> &[SceneOp] {
        &self.ops
    }

    /// Forgets the recorded operations.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// The number of [`SceneOp::Instantiate`] operations recorded.
    #[must_use]
    pub fn instantiate_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SceneOp::Instantiate(..)))
            .count()
    }

    /// The number of [`SceneOp::Destroy`] operations recorded.
    #[must_use]
    pub fn destroy_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SceneOp::Destroy(..)))
            .count()
    }

    fn entity(&self, instance: InstanceId) -> Option<&Entity> {
        let slot = self
            .slots
            .get(instance.index() as usize)
            .filter(|slot| slot.generation == instance.generation())?;

        slot.entity.as_ref()
    }

    fn entity_mut(&mut self, instance: InstanceId) -> Option<&mut Entity> {
        let slot = self
            .slots
            .get_mut(instance.index() as usize)
            .filter(|slot| slot.generation == instance.generation())?;

        slot.entity.as_mut()
    }

    fn create_entity(&mut self, template: TemplateId) -> InstanceId {
        let name = self
            .templates
            .get(&template)
            .unwrap_or_else(|| panic!("FakeScene cannot instantiate unknown template {template}"));

        let entity = Entity {
            template,
            label: Label(name.clone()),
            active: true,
            parent: None,
        };

        if let Some(index) = self.vacant.pop() {
            let slot = self
                .slots
                .get_mut(index as usize)
                .expect("vacant slots always exist");
            slot.entity = Some(entity);
            return InstanceId::new(index, slot.generation);
        }

        let index =
            u32::try_from(self.slots.len()).expect("test scenes never hold that many entities");
        self.slots.push(Slot {
            generation: nz!(1),
            entity: Some(entity),
        });

        InstanceId::new(index, nz!(1))
    }

    fn remove_entity(&mut self, instance: InstanceId) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(instance.index() as usize)
            .filter(|slot| slot.generation == instance.generation() && slot.entity.is_some())
        else {
            return false;
        };

        slot.entity = None;

        // A slot whose generation cannot advance any further is retired for good.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.vacant.push(instance.index());
        }

        true
    }
}

impl Default for FakeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for FakeScene {
    fn has_template(&self, template: TemplateId) -> bool {
        self.templates.contains_key(&template)
    }

    fn instantiate(&mut self, template: TemplateId) -> InstanceId {
        let instance = self.create_entity(template);
        self.ops.push(SceneOp::Instantiate(template, instance));
        instance
    }

    fn destroy(&mut self, instance: InstanceId) {
        self.ops.push(SceneOp::Destroy(instance));
        self.remove_entity(instance);
    }

    fn is_alive(&self, instance: InstanceId) -> bool {
        self.entity(instance).is_some()
    }

    fn set_active(&mut self, instance: InstanceId, active: bool) {
        self.ops.push(SceneOp::SetActive(instance, active));

        if let Some(entity) = self.entity_mut(instance) {
            entity.active = active;
        }
    }

    fn attach(&mut self, instance: InstanceId, container: ContainerId) {
        self.ops.push(SceneOp::Attach(instance, container));

        if let Some(entity) = self.entity_mut(instance) {
            entity.parent = Some(container);
        }
    }

    fn create_container(&mut self, name: &str) -> ContainerId {
        let container = ContainerId::new(self.next_container);
        self.next_container = self
            .next_container
            .checked_add(1)
            .expect("test scenes never create that many containers");

        self.containers.insert(container, name.to_string());
        self.ops.push(SceneOp::CreateContainer(container));
        container
    }

    fn destroy_container(&mut self, container: ContainerId) {
        self.ops.push(SceneOp::DestroyContainer(container));
        self.containers.remove(&container);
    }
}

impl ComponentAccess<Label> for FakeScene {
    fn component(&self, instance: InstanceId) -> Option<&Label> {
        self.entity(instance).map(|entity| &entity.label)
    }

    fn component_mut(&mut self, instance: InstanceId) -> Option<&mut Label> {
        self.entity_mut(instance).map(|entity| &mut entity.label)
    }
}
