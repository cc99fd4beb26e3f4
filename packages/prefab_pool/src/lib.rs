#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Recycles scene instances created from templates ("prefabs") instead of repeatedly
//! instantiating and destroying them.
//!
//! This crate provides [`PrefabPool`], which keeps a free-list of inactive instances per template
//! and tracks which template every checked out instance came from. The scene itself stays outside
//! the pool: creating, destroying, showing, hiding and parenting instances is delegated to a
//! [`Host`] that the caller passes into every operation.
//!
//! # Lifecycle
//!
//! * [`PrefabPool::builder()`] creates the pool and its container in the host.
//! * [`PrefabPool::create_pool()`] prewarms a free-list for a template.
//! * [`PrefabPool::acquire()`] checks out the oldest parked instance, or instantiates a new one.
//! * [`PrefabPool::release()`] parks a checked out instance again. Instances the pool did not
//!   hand out are destroyed instead.
//! * [`PrefabPool::reset_pool()`] destroys the parked instances of a template.
//! * [`PrefabPool::shutdown()`] destroys everything parked and the container.
//!
//! # Handles
//!
//! Templates and instances are identified by small value types, [`TemplateId`] and
//! [`InstanceId`]. Instance handles carry a generation, so an instance destroyed behind the pool's
//! back is recognized as stale even if the host has since reused its slot.
//!
//! # Example
//!
//! ```
//! use prefab_pool::PrefabPool;
//! use testing::{FakeScene, Label};
//!
//! let mut scene = FakeScene::new();
//! let enemy = scene.register_template("enemy");
//!
//! let mut pool = PrefabPool::builder().container_name("Enemies").build(&mut scene);
//! pool.create_pool(&mut scene, enemy, 4).unwrap();
//!
//! // Typed access, analogous to asking for a specific component of the pooled object.
//! let (grunt, label) = pool.acquire_component::<Label, _>(&mut scene, enemy);
//! assert_eq!(label.map(|label| label.0.as_str()), Some("enemy"));
//!
//! pool.release(&mut scene, grunt);
//! assert_eq!(pool.free_len(enemy), Some(4));
//!
//! let still_checked_out = pool.shutdown(&mut scene);
//! assert!(still_checked_out.is_empty());
//! ```
//!
//! # Thread safety
//!
//! The pool is meant to be driven from a single host loop. It can be moved between threads but
//! every mutating operation takes `&mut self`.

mod builder;
mod drop_policy;
mod error;
mod handles;
mod host;
mod ledger;
mod metrics;
mod pool;

pub use builder::*;
pub use drop_policy::*;
pub use error::Error;
pub(crate) use error::Result;
pub use handles::*;
pub use host::*;
pub(crate) use ledger::*;
pub use pool::PrefabPool;
