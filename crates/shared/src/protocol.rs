use serde::{Deserialize, Serialize};

use crate::domain::{Printer, PrinterId, SpoolId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintersResponse {
    #[serde(default)]
    pub printers: Vec<Printer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRequest {
    pub spool_id: SpoolId,
    pub printer_id: PrinterId,
}

/// Success body of `/api/assign`. Clients must not require it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
