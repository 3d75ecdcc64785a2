use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(SpoolId);
id_newtype!(PrinterId);

const DEFAULT_SPOOL_COLOR: &str = "#888";

/// Printer state as reported by `/api/printers`.
///
/// The server sends a bare string. Anything that is not one of the three
/// known states is kept verbatim in `Other` so the mapping stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrinterStatus {
    Ready,
    Printing,
    Error,
    Other(String),
}

impl PrinterStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::Printing => "Printing",
            Self::Error => "Error",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for PrinterStatus {
    fn from(value: &str) -> Self {
        match value {
            "Ready" => Self::Ready,
            "Printing" => Self::Printing,
            "Error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PrinterStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Ready" | "Printing" | "Error" => Self::from(value.as_str()),
            _ => Self::Other(value),
        }
    }
}

impl From<PrinterStatus> for String {
    fn from(value: PrinterStatus) -> Self {
        match value {
            PrinterStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spool currently loaded in a printer, as summarized by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSpool {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Printer {
    pub id: PrinterId,
    #[serde(default)]
    pub name: String,
    pub status: PrinterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_spool: Option<CurrentSpool>,
}

impl Printer {
    pub fn new(id: impl Into<String>, status: impl Into<PrinterStatus>) -> Self {
        Self {
            id: PrinterId::new(id),
            name: String::new(),
            status: status.into(),
            url: None,
            current_spool: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Management URL to redirect to after an assignment. Empty strings
    /// count as absent.
    pub fn redirect_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Busy printers are shown but cannot be picked from the list.
    pub fn is_selectable(&self) -> bool {
        self.status != PrinterStatus::Printing
    }
}

/// Spool record served by `/api/spool/{id}`. Weights are in grams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SpoolId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub remaining: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filament_weight: Option<f64>,
}

impl Spool {
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "{} - {}",
                self.material.as_deref().unwrap_or_default(),
                self.vendor.as_deref().unwrap_or_default()
            ),
        }
    }

    pub fn display_color(&self) -> &str {
        [self.color_hex.as_deref(), self.color.as_deref()]
            .into_iter()
            .flatten()
            .find(|color| !color.is_empty())
            .unwrap_or(DEFAULT_SPOOL_COLOR)
    }
}
