//! Workspace program handles and their Anchor IDL

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{serialize_pubkey, Pubkey};

/// A program resolved from the workspace registry
#[derive(Debug, Clone, Serialize)]
pub struct ProgramHandle {
    /// Program name as declared in the workspace
    pub name: String,
    #[serde(serialize_with = "serialize_pubkey")]
    pub program_id: Pubkey,
    /// Cluster section the id was read from (e.g. "localnet")
    pub cluster: String,
    pub idl: Idl,
}

impl ProgramHandle {
    pub fn instruction_names(&self) -> Vec<&str> {
        self.idl.instructions.iter().map(|ix| ix.name.as_str()).collect()
    }
}

/// Subset of the Anchor IDL used for reporting
///
/// Covers both the legacy layout (`name`, `version`, `metadata.address`) and
/// the current one (`address`, `metadata.name`, `metadata.version`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Idl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IdlMetadata>,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdlMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<JsonValue>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JsonValue,
}

impl Idl {
    pub fn program_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .or(self.name.as_deref())
    }

    pub fn program_version(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.version.as_deref())
            .or(self.version.as_deref())
    }

    /// Program address embedded in the IDL, if any
    pub fn declared_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.address.as_deref()))
    }
}
