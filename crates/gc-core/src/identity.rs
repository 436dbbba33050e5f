//! Global ids: opaque, Relay-compatible identifiers of the form
//! `base64("<TypeName>:<local id>")`.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{GcError, GcResult};

/// A decoded global id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalId {
    pub type_name: String,
    pub local_id: String,
}

impl GlobalId {
    /// The local id as a store key. Non-numeric ids never match a record.
    pub fn numeric_id(&self) -> Option<i64> {
        self.local_id.parse().ok()
    }
}

/// Encode a type name and local id into a global id.
///
/// Type names must not contain `:`; local ids may.
pub fn to_global_id(type_name: &str, local_id: &str) -> String {
    debug_assert!(!type_name.contains(':'), "type name must not contain ':'");
    STANDARD.encode(format!("{}:{}", type_name, local_id))
}

/// Decode a global id produced by [`to_global_id`].
pub fn from_global_id(global_id: &str) -> GcResult<GlobalId> {
    let malformed = || GcError::MalformedId(global_id.to_string());

    let bytes = STANDARD.decode(global_id).map_err(|_| malformed())?;
    let decoded = String::from_utf8(bytes).map_err(|_| malformed())?;
    let (type_name, local_id) = decoded.split_once(':').ok_or_else(malformed)?;
    if type_name.is_empty() {
        return Err(malformed());
    }

    Ok(GlobalId {
        type_name: type_name.to_string(),
        local_id: local_id.to_string(),
    })
}
