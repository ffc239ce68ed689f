//! Core of the template catalog.
//!
//! # Core Concepts
//!
//! - [`Manifest`]: Static, ordered list of [`Group`]s, each declaring the files it
//!   contributes, the owner they belong to and the [`NamingRule`] used to title them.
//! - [`ContentSource`]: Resolves a manifest-relative path to raw text. Filesystem and
//!   HTTP implementations live in the application crate; [`MemorySource`] lives here.
//! - [`Loader`]: Walks the manifest once, fetching every row in order and tolerating
//!   per-row failures.
//! - [`Catalog`]: Immutable snapshot of the loaded [`TemplateEntry`] values, answering
//!   owner + free-text [`Query`]s without ever mutating.

mod catalog;
mod loader;
mod manifest;
mod models;
mod naming;
mod source;

pub use catalog::*;
pub use loader::*;
pub use manifest::*;
pub use models::*;
pub use naming::*;
pub use source::*;
