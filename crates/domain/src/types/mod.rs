//! Domain types and models

pub mod auth;
pub mod facets;
pub mod resource;
pub mod source;

pub use auth::{Credentials, GrantType, TokenSet};
pub use facets::{
    Archivable, Archival, BackgroundTask, BackgroundTasked, Owned, Owner, Ownership,
};
pub use resource::{
    hydrate, hydrate_over, hydrate_value, null_as_default, RawRecord, Resource, ResourceMeta,
};
pub use source::{NewSource, Source, SourceBuilder, SourceInput};
