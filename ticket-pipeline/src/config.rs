use std::env;
use std::str::FromStr;

use crate::errors::{PipelineError, Result};

// Default table names, overridable per environment
const DEFAULT_USERS_TABLE: &str = "users-table";
const DEFAULT_INCIDENT_TABLE: &str = "incident-table";
const DEFAULT_SERVICE_TABLE: &str = "service-table";

/// Which part of the pipeline this deployment runs.
///
/// Each stage can be deployed as its own function behind a state machine, or
/// `Full` runs the whole chain in one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalize,
    CheckUser,
    ProcessTicket,
    Respond,
    Full,
}

impl FromStr for Stage {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normalize" | "convert-xml-to-json" => Ok(Stage::Normalize),
            "check-user" => Ok(Stage::CheckUser),
            "process-ticket" => Ok(Stage::ProcessTicket),
            "respond" | "convert-json-to-xml" => Ok(Stage::Respond),
            "full" => Ok(Stage::Full),
            other => Err(PipelineError::Config(format!(
                "unknown PIPELINE_STAGE: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub stage: Stage,
    pub users_table: String,
    pub incident_table: String,
    pub service_table: String,
    pub dynamodb_endpoint: Option<String>,
    /// Stop before writing a ticket for a user that does not exist
    pub require_registered_user: bool,
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stage = match lookup("PIPELINE_STAGE") {
            Some(raw) => raw.parse()?,
            None => Stage::Full,
        };

        let require_registered_user = match lookup("REQUIRE_REGISTERED_USER") {
            Some(raw) => parse_flag(&raw)?,
            None => false,
        };

        Ok(Self {
            stage,
            users_table: lookup("USERS_TABLE").unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string()),
            incident_table: lookup("INCIDENT_TABLE")
                .unwrap_or_else(|| DEFAULT_INCIDENT_TABLE.to_string()),
            service_table: lookup("SERVICE_TABLE")
                .unwrap_or_else(|| DEFAULT_SERVICE_TABLE.to_string()),
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT").filter(|url| !url.trim().is_empty()),
            require_registered_user,
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(PipelineError::Config(format!(
            "REQUIRE_REGISTERED_USER must be true or false, got {}",
            other
        ))),
    }
}
