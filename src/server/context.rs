use std::fmt;

use uuid::Uuid;

use crate::config::Config;
use crate::content::ContentResolver;

/// Opaque token identifying one running server instance.
///
/// Sent as the `Etag` of every response. It is the same for every resource,
/// so it tells clients which server process answered, not which version of
/// a file they got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity(String);

impl ServerIdentity {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only state shared by every connection.
#[derive(Debug)]
pub struct ServerContext {
    pub config: Config,
    pub identity: ServerIdentity,
    pub resolver: ContentResolver,
}

impl ServerContext {
    pub fn new(config: Config) -> Self {
        let resolver = ContentResolver::new(config.web_root.clone());
        Self {
            config,
            identity: ServerIdentity::generate(),
            resolver,
        }
    }
}
