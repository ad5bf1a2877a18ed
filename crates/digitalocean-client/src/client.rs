//! Asynchronous DigitalOcean client implementation.

use crate::envelope::{decode, index_by_id, ResourceMap};
use crate::models::{DomainRecordRequest, ImageFilter};
use crate::Result;
use digitalocean_core::ids::{DomainRef, DropletId, ImageId, RecordId, RegionId, SizeId, SshKeyId};
use digitalocean_core::query::QueryParams;
use digitalocean_core::{Credentials, DigitalOceanConfig, HttpTransport, Transport};
use serde_json::Value;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

/// Builder for [`DigitalOceanClient`].
pub struct DigitalOceanClientBuilder {
    config: DigitalOceanConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl DigitalOceanClientBuilder {
    /// Create a builder for the public API with the given credentials.
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::from_config(DigitalOceanConfig::new(client_id, api_key)?))
    }

    /// Create a builder from an existing configuration.
    #[must_use]
    pub fn from_config(config: DigitalOceanConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.config = self.config.with_base_url(base_url)?;
        Ok(self)
    }

    /// Override the request timeout of the default transport, in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config = self.config.with_timeout(seconds);
        self
    }

    /// Use a custom transport instead of [`HttpTransport`].
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DigitalOceanClient> {
        self.config.check()?;
        let base_url = self.config.parse_base_url()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::from_config(&self.config)?),
        };

        Ok(DigitalOceanClient {
            credentials: self.config.credentials(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            transport,
        })
    }
}

/// Asynchronous DigitalOcean v1 client.
///
/// The client keeps nothing between calls besides its credentials, base URL
/// and transport, so it can be cloned and shared across tasks freely.
#[derive(Clone)]
pub struct DigitalOceanClient {
    credentials: Credentials,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl DigitalOceanClient {
    /// Construct a client for the public API using the default transport.
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        DigitalOceanClientBuilder::new(client_id, api_key)?.build()
    }

    /// Construct a client with an injected transport.
    pub fn with_transport(
        credentials: Credentials,
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        DigitalOceanClientBuilder::new(credentials.client_id(), credentials.api_key())?
            .with_base_url(base_url)?
            .with_transport(transport)
            .build()
    }

    /// Start a builder with the given credentials.
    pub fn builder(
        client_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<DigitalOceanClientBuilder> {
        DigitalOceanClientBuilder::new(client_id, api_key)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return the credentials sent with every request.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // Droplets

    /// List all active droplets.
    pub async fn droplets(&self) -> Result<ResourceMap> {
        self.get_indexed("droplets/", QueryParams::new(), "droplets")
            .await
    }

    /// Show a single droplet.
    pub async fn show_droplet(&self, droplet: DropletId) -> Result<Value> {
        self.get(&format!("droplets/{droplet}/"), QueryParams::new())
            .await
    }

    /// Create a droplet.
    pub async fn new_droplet(
        &self,
        name: &str,
        size: SizeId,
        image: ImageId,
        region: RegionId,
        ssh_keys: Option<&[SshKeyId]>,
    ) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("name", name);
        params.push("size_id", size);
        params.push("image_id", image);
        params.push("region_id", region);
        params.push_opt_with("ssh_key_ids", ssh_keys, |ids| {
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        });
        self.get("droplets/new", params).await
    }

    /// Reboot a droplet.
    pub async fn reboot(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "reboot", QueryParams::new())
            .await
    }

    /// Power cycle a droplet: turn it off, then back on.
    pub async fn power_cycle(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "power_cycle", QueryParams::new())
            .await
    }

    /// Shut down a running droplet.
    pub async fn shut_down(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "shut_down", QueryParams::new())
            .await
    }

    /// Power off a running droplet.
    pub async fn power_off(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "power_off", QueryParams::new())
            .await
    }

    /// Power on a powered-off droplet.
    pub async fn power_on(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "power_on", QueryParams::new())
            .await
    }

    /// Reset the root password. The droplet reboots.
    pub async fn reset_root_password(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "reset_root_password", QueryParams::new())
            .await
    }

    /// Resize a droplet to a different size.
    pub async fn resize_droplet(&self, droplet: DropletId, size: SizeId) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("size_id", size);
        self.droplet_action(droplet, "resize", params).await
    }

    /// Take a snapshot, optionally named.
    pub async fn take_snapshot(&self, droplet: DropletId, name: Option<&str>) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push_opt("name", name);
        self.droplet_action(droplet, "snapshot", params).await
    }

    /// Restore a droplet from one of its images.
    pub async fn restore(&self, droplet: DropletId, image: ImageId) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("image_id", image);
        self.droplet_action(droplet, "restore", params).await
    }

    /// Reinstall a droplet from an image, keeping its IP address.
    pub async fn rebuild(&self, droplet: DropletId, image: ImageId) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("image_id", image);
        self.droplet_action(droplet, "rebuild", params).await
    }

    /// Enable automatic daily backups.
    pub async fn enable_backups(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "enable_backups", QueryParams::new())
            .await
    }

    /// Disable automatic backups.
    pub async fn disable_backups(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "disable_backups", QueryParams::new())
            .await
    }

    /// Rename a droplet.
    pub async fn rename_droplet(&self, droplet: DropletId, name: &str) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("name", name);
        self.droplet_action(droplet, "rename", params).await
    }

    /// Destroy a droplet. This cannot be undone.
    pub async fn destroy_droplet(&self, droplet: DropletId) -> Result<Value> {
        self.droplet_action(droplet, "destroy", QueryParams::new())
            .await
    }

    // Regions

    /// List all available regions.
    pub async fn regions(&self) -> Result<ResourceMap> {
        self.get_indexed("regions/", QueryParams::new(), "regions")
            .await
    }

    // Images

    /// List images. `None` lists the account's own images (`my_images`).
    pub async fn images(&self, filter: Option<ImageFilter>) -> Result<ResourceMap> {
        let mut params = QueryParams::new();
        params.push("filter", filter.unwrap_or_default());
        self.get_indexed("images/", params, "images").await
    }

    /// Show a single image.
    pub async fn show_image(&self, image: ImageId) -> Result<Value> {
        self.get(&format!("images/{image}/"), QueryParams::new())
            .await
    }

    /// Destroy an image. This cannot be undone.
    pub async fn destroy_image(&self, image: ImageId) -> Result<Value> {
        self.get(&format!("images/{image}/destroy/"), QueryParams::new())
            .await
    }

    /// Transfer an image to another region.
    pub async fn transfer_image(&self, image: ImageId, region: RegionId) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("region_id", region);
        self.get(&format!("images/{image}/transfer/"), params).await
    }

    // SSH keys

    /// List the public SSH keys of the account.
    pub async fn ssh_keys(&self) -> Result<ResourceMap> {
        self.get_indexed("ssh_keys/", QueryParams::new(), "ssh_keys")
            .await
    }

    /// Show a single SSH key.
    pub async fn show_ssh_key(&self, key: SshKeyId) -> Result<Value> {
        self.get(&format!("ssh_keys/{key}/"), QueryParams::new())
            .await
    }

    /// Add a public SSH key to the account.
    pub async fn add_ssh_key(&self, name: &str, public_key: &str) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("name", name);
        params.push("ssh_pub_key", public_key);
        self.get("ssh_keys/new/", params).await
    }

    /// Replace the public key of an existing SSH key.
    pub async fn edit_ssh_key(&self, key: SshKeyId, public_key: &str) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("ssh_pub_key", public_key);
        self.get(&format!("ssh_keys/{key}/edit/"), params).await
    }

    /// Delete an SSH key from the account.
    pub async fn destroy_ssh_key(&self, key: SshKeyId) -> Result<Value> {
        self.get(&format!("ssh_keys/{key}/destroy/"), QueryParams::new())
            .await
    }

    // Sizes

    /// List droplet sizes.
    pub async fn sizes(&self) -> Result<ResourceMap> {
        self.get_indexed("sizes/", QueryParams::new(), "sizes").await
    }

    // Domains

    /// List all domains.
    pub async fn domains(&self) -> Result<ResourceMap> {
        self.get_indexed("domains/", QueryParams::new(), "domains")
            .await
    }

    /// Create a domain pointing at an IP address.
    pub async fn new_domain(&self, name: &str, ip_address: IpAddr) -> Result<Value> {
        let mut params = QueryParams::new();
        params.push("name", name);
        params.push("ip_address", ip_address);
        self.get("domains/new/", params).await
    }

    /// Show a single domain.
    pub async fn show_domain(&self, domain: impl Into<DomainRef>) -> Result<Value> {
        let domain = domain.into().to_path_segment();
        self.get(&format!("domains/{domain}/"), QueryParams::new())
            .await
    }

    /// Destroy a domain and its records.
    pub async fn destroy_domain(&self, domain: impl Into<DomainRef>) -> Result<Value> {
        let domain = domain.into().to_path_segment();
        self.get(&format!("domains/{domain}/destroy/"), QueryParams::new())
            .await
    }

    /// List the records of a domain.
    pub async fn domain_records(&self, domain: impl Into<DomainRef>) -> Result<ResourceMap> {
        let domain = domain.into().to_path_segment();
        self.get_indexed(
            &format!("domains/{domain}/records/"),
            QueryParams::new(),
            "records",
        )
        .await
    }

    /// Create a record on a domain.
    pub async fn new_domain_record(
        &self,
        domain: impl Into<DomainRef>,
        record: &DomainRecordRequest,
    ) -> Result<Value> {
        let domain = domain.into().to_path_segment();
        self.get(&format!("domains/{domain}/records/new/"), record.to_params())
            .await
    }

    /// Show a single domain record.
    pub async fn show_domain_record(
        &self,
        domain: impl Into<DomainRef>,
        record: RecordId,
    ) -> Result<Value> {
        let domain = domain.into().to_path_segment();
        self.get(
            &format!("domains/{domain}/records/{record}/"),
            QueryParams::new(),
        )
        .await
    }

    /// Replace the fields of a domain record.
    pub async fn edit_domain_record(
        &self,
        domain: impl Into<DomainRef>,
        record: RecordId,
        request: &DomainRecordRequest,
    ) -> Result<Value> {
        let domain = domain.into().to_path_segment();
        self.get(
            &format!("domains/{domain}/records/{record}/edit/"),
            request.to_params(),
        )
        .await
    }

    /// Delete a domain record.
    pub async fn destroy_domain_record(
        &self,
        domain: impl Into<DomainRef>,
        record: RecordId,
    ) -> Result<Value> {
        let domain = domain.into().to_path_segment();
        self.get(
            &format!("domains/{domain}/records/{record}/destroy/"),
            QueryParams::new(),
        )
        .await
    }

    /// Full request URL for an action path and its parameters.
    ///
    /// The credentials always come last.
    #[must_use]
    pub fn action_url(&self, path: &str, params: QueryParams) -> String {
        let mut auth = QueryParams::new();
        auth.push("client_id", self.credentials.client_id());
        auth.push("api_key", self.credentials.api_key());

        let mut query = params;
        query.extend(auth);

        let separator = if path.contains('?') { '&' } else { '?' };
        format!(
            "{}/{path}{separator}{}",
            self.base_url,
            query.to_query_string()
        )
    }

    async fn droplet_action(
        &self,
        droplet: DropletId,
        action: &str,
        params: QueryParams,
    ) -> Result<Value> {
        self.get(&format!("droplets/{droplet}/{action}/"), params)
            .await
    }

    async fn get(&self, path: &str, params: QueryParams) -> Result<Value> {
        info!(path, "DigitalOcean request");
        let url = self.action_url(path, params);
        let body = self.transport.fetch(&url).await?;
        decode(&body)
    }

    async fn get_indexed(
        &self,
        path: &str,
        params: QueryParams,
        key: &str,
    ) -> Result<ResourceMap> {
        let envelope = self.get(path, params).await?;
        index_by_id(envelope, key)
    }
}

impl fmt::Debug for DigitalOceanClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalOceanClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
