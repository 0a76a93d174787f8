//! Resource definitions module.
//!
//! Each resource is defined in its own file with:
//! - URI and metadata
//! - The kind of content it resolves to
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

pub mod server_info;

pub use server_info::{ServerIdentity, ServerInfo, ServerInfoResource, Uptime};

use super::service::DynamicResourceType;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata and content.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// How the content of this resource is produced.
    fn content() -> DynamicResourceType;
}
