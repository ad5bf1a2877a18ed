//! Request parameters for DigitalOcean actions.
//!
//! Resources themselves are returned as opaque JSON, so only the inputs that
//! need structure are modelled here.

use digitalocean_core::query::QueryParams;
use digitalocean_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which images the `images` action should list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFilter {
    /// Snapshots and backups owned by the account.
    #[default]
    MyImages,
    /// Public distribution images.
    Global,
}

impl ImageFilter {
    /// Wire value of the filter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MyImages => "my_images",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DNS record types accepted by the domain record actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Service locator record.
    Srv,
    /// Name server record.
    Ns,
}

impl RecordType {
    /// Wire value of the record type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Ns => "NS",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "SRV" => Ok(Self::Srv),
            "NS" => Ok(Self::Ns),
            _ => Err(Error::ConfigError(format!("Unknown record type: {s}"))),
        }
    }
}

/// Fields of a domain record for the create and edit actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecordRequest {
    /// Record type.
    pub record_type: RecordType,
    /// Record value, e.g. an address or a target host.
    pub data: String,
    /// Record name, required by A, CNAME, TXT and SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Priority, for MX and SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Port, for SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Weight, for SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl DomainRecordRequest {
    /// Create a request with the two mandatory fields.
    pub fn new(record_type: RecordType, data: impl Into<String>) -> Self {
        Self {
            record_type,
            data: data.into(),
            name: None,
            priority: None,
            port: None,
            weight: None,
        }
    }

    /// Set the record name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Query parameters in wire order. Unset optional fields are omitted.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("record_type", self.record_type);
        params.push("data", &self.data);
        params.push_opt("name", self.name.as_deref());
        params.push_opt("priority", self.priority);
        params.push_opt("port", self.port);
        params.push_opt("weight", self.weight);
        params
    }
}
