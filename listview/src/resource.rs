//! The resource kinds the console lists, and their table bindings.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::columns::{Column, NewRow, TableBinding};
use crate::error::Result;
use crate::types::{Identity, Machine, Provider, ResourceKind, Session, SessionStatus};

/// Domain parameter carrying the session online/history toggle.
pub const SESSION_STATUS_PARAM: &str = "status";

/// Values offered by the session protocol filter.
pub const SESSION_PROTOCOLS: &[&str] = &["RDP", "VNC", "SSH"];

/// A row type served by a paged collection endpoint.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn owner(&self) -> &str;

    fn name(&self) -> &str;

    fn identity(&self) -> Identity {
        Identity::new(self.owner(), self.name())
    }

    /// Columns, default row factory and domain defaults for this kind's page.
    fn binding() -> Result<TableBinding<Self>>;
}

impl Resource for Machine {
    const KIND: ResourceKind = ResourceKind::Machine;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn binding() -> Result<TableBinding<Self>> {
        let columns = vec![
            Column::new("owner", "Organization").server_sort().searchable(),
            Column::new("name", "Name").server_sort().searchable(),
            Column::new("displayName", "Display name")
                .client_sort(|a: &Machine, b: &Machine| a.display_name.cmp(&b.display_name)),
            Column::new("createdTime", "Created time")
                .client_sort(|a: &Machine, b: &Machine| a.created_time.cmp(&b.created_time)),
            Column::new("expireTime", "Expire time")
                .client_sort(|a: &Machine, b: &Machine| a.expire_time.cmp(&b.expire_time)),
            Column::new("region", "Region")
                .client_sort(|a: &Machine, b: &Machine| a.region.cmp(&b.region)),
            Column::new("zone", "Zone").client_sort(|a: &Machine, b: &Machine| a.zone.cmp(&b.zone)),
            Column::new("category", "Category")
                .client_sort(|a: &Machine, b: &Machine| a.category.cmp(&b.category)),
            Column::new("type", "Type").client_sort(|a: &Machine, b: &Machine| a.kind.cmp(&b.kind)),
            Column::new("size", "Size").client_sort(|a: &Machine, b: &Machine| a.size.cmp(&b.size)),
            Column::new("image", "Image")
                .client_sort(|a: &Machine, b: &Machine| a.image.cmp(&b.image)),
            Column::new("publicIp", "Public IP")
                .client_sort(|a: &Machine, b: &Machine| a.public_ip.cmp(&b.public_ip)),
            Column::new("privateIp", "Private IP")
                .client_sort(|a: &Machine, b: &Machine| a.private_ip.cmp(&b.private_ip)),
            Column::new("state", "State")
                .client_sort(|a: &Machine, b: &Machine| a.state.cmp(&b.state)),
        ];
        Ok(TableBinding::new(Self::KIND, columns)?.with_factory(new_machine))
    }
}

fn new_machine(row: &NewRow) -> Machine {
    Machine {
        owner: row.owner.clone(),
        name: format!("machine_{}", row.suffix),
        created_time: row.now.clone(),
        updated_time: row.now.clone(),
        expire_time: String::new(),
        display_name: format!("New Machine - {}", row.suffix),
        region: "West US 2".into(),
        zone: "Zone 1".into(),
        category: "Standard".into(),
        kind: "Pay As You Go".into(),
        size: "Standard_D4ls_v5".into(),
        tag: String::new(),
        state: "Active".into(),
        image: "Ubuntu 24.04".into(),
        public_ip: String::new(),
        private_ip: String::new(),
        extra: Default::default(),
    }
}

impl Resource for Provider {
    const KIND: ResourceKind = ResourceKind::Provider;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn binding() -> Result<TableBinding<Self>> {
        let columns = vec![
            Column::new("owner", "Organization").server_sort().searchable(),
            Column::new("name", "Name").server_sort().searchable(),
            Column::new("displayName", "Display name")
                .client_sort(|a: &Provider, b: &Provider| a.display_name.cmp(&b.display_name)),
            Column::new("createdTime", "Created time")
                .client_sort(|a: &Provider, b: &Provider| a.created_time.cmp(&b.created_time)),
            Column::new("category", "Category")
                .client_sort(|a: &Provider, b: &Provider| a.category.cmp(&b.category)),
            Column::new("type", "Type")
                .client_sort(|a: &Provider, b: &Provider| a.kind.cmp(&b.kind)),
            Column::new("region", "Region")
                .client_sort(|a: &Provider, b: &Provider| a.region.cmp(&b.region)),
            Column::new("state", "State")
                .client_sort(|a: &Provider, b: &Provider| a.state.cmp(&b.state)),
        ];
        Ok(TableBinding::new(Self::KIND, columns)?.with_factory(new_provider))
    }
}

fn new_provider(row: &NewRow) -> Provider {
    Provider {
        owner: row.owner.clone(),
        name: format!("provider_{}", row.suffix),
        created_time: row.now.clone(),
        updated_time: row.now.clone(),
        display_name: format!("New Provider - {}", row.suffix),
        category: "Public Cloud".into(),
        kind: "Amazon Web Services".into(),
        client_id: String::new(),
        client_secret: String::new(),
        region: "us-west".into(),
        state: "Active".into(),
        extra: Default::default(),
    }
}

impl Resource for Session {
    const KIND: ResourceKind = ResourceKind::Session;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn name(&self) -> &str {
        &self.name
    }

    /// Sessions are opened by clients, so the page has no Add button.
    fn binding() -> Result<TableBinding<Self>> {
        let columns = vec![
            Column::new("name", "Name")
                .client_sort(|a: &Session, b: &Session| a.name.cmp(&b.name)),
            Column::new("protocol", "Protocol").options(SESSION_PROTOCOLS),
            Column::new("ip", "IP"),
            Column::new("connectedTime", "Connected time")
                .client_sort(|a: &Session, b: &Session| a.connected_time.cmp(&b.connected_time)),
            Column::new("connectedTimeDur", "Connected time duration"),
        ];
        Ok(TableBinding::new(Self::KIND, columns)?
            .with_domain_default(SESSION_STATUS_PARAM, SessionStatus::Connected.as_param()))
    }
}
