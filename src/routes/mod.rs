//! Route table handling.
//!
//! A request path goes through three steps before anything touches the
//! served file:
//!
//! - **`key`**: validates the raw URI and normalizes it into a [`RouteKey`]
//! - **`descriptor`**: reads the routing descriptor from disk on every call
//! - **`resolver`**: ties the two together into a found / not-found answer
//!
//! Nothing here is cached. The descriptor is re-read for each lookup so an
//! edit shows up on the very next request.

pub mod descriptor;
pub mod key;
pub mod resolver;

pub use descriptor::{LoadError, RouteDescriptor, RouteEntry};
pub use key::{PathError, RouteKey};
pub use resolver::{ResolvedResource, Resolver};
