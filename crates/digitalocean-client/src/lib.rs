//! DigitalOcean v1 API client.
//!
//! Every API action is a GET whose query string carries the action's
//! parameters followed by the `client_id` and `api_key` credentials. Single
//! resources come back as parsed JSON; collections are re-indexed by `id`.

#![deny(missing_docs)]

pub mod client;
pub mod envelope;
pub mod models;

pub use client::{DigitalOceanClient, DigitalOceanClientBuilder};
pub use digitalocean_core::ids::{
    DomainId, DomainRef, DropletId, ImageId, RecordId, RegionId, SizeId, SshKeyId,
};
pub use digitalocean_core::{Credentials, DigitalOceanConfig, Error, HttpTransport, Transport};
pub use envelope::ResourceMap;
pub use models::{DomainRecordRequest, ImageFilter, RecordType};

/// Convenient result alias using the shared DigitalOcean error type.
pub type Result<T> = digitalocean_core::Result<T>;
