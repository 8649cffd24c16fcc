pub use crate::error::{Error, LaResult};
pub use crate::types::{Site, SiteId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
