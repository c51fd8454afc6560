//! User context from a JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::context::UserContext;
use crate::domain::error::WealthError;
use crate::ports::context_port::ContextPort;

pub struct JsonContextAdapter {
    path: PathBuf,
}

impl JsonContextAdapter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Parses a context document. Absent sections and fields take their defaults.
pub fn parse_context(json: &str, source_name: &str) -> Result<UserContext, WealthError> {
    serde_json::from_str(json).map_err(|e| WealthError::ContextParse {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

impl ContextPort for JsonContextAdapter {
    fn load_context(&self) -> Result<UserContext, WealthError> {
        let content = fs::read_to_string(&self.path)?;
        let ctx = parse_context(&content, &self.describe())?;
        tracing::debug!(
            source = %self.path.display(),
            stocks = ctx.portfolio.stocks.len(),
            funds = ctx.portfolio.mutual_funds.len(),
            goals = ctx.goals().len(),
            "loaded user context"
        );
        Ok(ctx)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
