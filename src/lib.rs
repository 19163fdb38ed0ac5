//! Type-directed dependency resolution with scoped lifecycles.
//!
//! A [`Scope`] maps types to bindings: a fixed [`Instance`], a [`Factory`] called per resolution,
//! a [`Singleton`] created once, or an [`Alias`] of another type. Resolving a type recursively
//! resolves the inputs of its creator, rejecting cycles, and records teardown actions that
//! [`Scope::destroy`] later runs in reverse order.
//!
//! ```
//! use depscope::{Factory, Instance, Scope};
//!
//! struct Config {
//!     port: u16,
//! }
//!
//! let scope = Scope::new("app");
//! scope
//!     .register((
//!         Instance::<u16>::new(8080u16),
//!         Factory::<Config>::new(|port: u16| Ok(Config { port })),
//!     ))
//!     .unwrap();
//!
//! assert_eq!(scope.resolve::<Config>().unwrap().port, 8080);
//! ```

#[macro_use]
pub(crate) mod macros;

pub(crate) mod alias;
pub(crate) mod any;
pub(crate) mod binding;
pub(crate) mod create;
pub(crate) mod dependency_resolver;
pub(crate) mod destroy;
pub(crate) mod errors;
pub(crate) mod factory;
pub(crate) mod instance;
pub(crate) mod invoke;
pub(crate) mod provider;
pub(crate) mod scope;
pub(crate) mod singleton;
pub(crate) mod trace;
pub mod validate;

#[cfg(feature = "global")]
pub mod global;

pub use alias::Alias;
pub use any::TypeInfo;
pub use binding::{Binding, Bindings};
pub use create::{Create, CreateOutput, Fallible, Plain};
pub use dependency_resolver::DependencyResolver;
pub use destroy::{Destroy, DestroyOutput};
pub use errors::{
    CreateErrorKind, DestroyError, DestroyErrorKind, DestroyErrors, Errors, InvokeError, RegisterError, RegisterErrors,
    ResolveError, ResolveErrorKind, ValidateErrorKind,
};
pub use factory::Factory;
pub use instance::Instance;
pub use invoke::Invoke;
pub use scope::Scope;
pub use singleton::Singleton;
pub use trace::Trace;
pub use validate::is_valid_value;
