pub use ldapaccess_types::error::{Error, LaResult};
pub use ldapaccess_types::types::{Site, SiteId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
