//! Platform environment selection.

use std::fmt;

use crate::constants::{DEV_API_BASE_URL, DEV_SSH_PROXY, PROD_API_BASE_URL, PROD_SSH_PROXY};

/// Which Runloop platform deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Dev,
}

impl Environment {
    /// Interpret a `RUNLOOP_ENV` value. Only `dev` (any case) selects development.
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dev") {
            Self::Dev
        } else {
            Self::Production
        }
    }

    pub fn api_base_url(self) -> &'static str {
        match self {
            Self::Production => PROD_API_BASE_URL,
            Self::Dev => DEV_API_BASE_URL,
        }
    }

    pub fn ssh_proxy(self) -> &'static str {
        match self {
            Self::Production => PROD_SSH_PROXY,
            Self::Dev => DEV_SSH_PROXY,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Dev => f.write_str("dev"),
        }
    }
}
