//! Completion credential resolution.
//!
//! Resolution order, first success wins:
//! 1. A user-supplied override kept in the preference store.
//! 2. A `KEY=value` development resource, only on a local host.
//! 3. Base64 fragments compiled or configured into the app. This is
//!    obfuscation, not protection: anyone holding the binary or config can
//!    rebuild the key. Real deployments should use an override or a proxy.
//! 4. Nothing; callers fall back to canned replies.

mod credential;
mod dev_resource;
mod embedded;
mod resolver;


pub use credential::Credential;
pub use dev_resource::{is_local_host, parse_key_value, DevResource};
pub use embedded::decode_fragments;
pub use resolver::{CredentialResolver, ResolverSettings};
