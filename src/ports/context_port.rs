//! User context source port trait.

use crate::domain::context::UserContext;
use crate::domain::error::WealthError;

/// Port for loading the user context an analysis runs over.
pub trait ContextPort {
    fn load_context(&self) -> Result<UserContext, WealthError>;

    /// Human-readable origin used in log lines.
    fn describe(&self) -> String;
}
