use std::fmt::Display;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::{HostawayClient, RequestOptions};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Listings,
    Reservations,
    Messages,
    Channels,
    Calendar,
    Guests,
    Tasks,
    Users,
}

impl ResourceKind {
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Listings => "listings",
            ResourceKind::Reservations => "reservations",
            // Hostaway groups guest messages under conversations.
            ResourceKind::Messages => "conversations",
            ResourceKind::Channels => "channels",
            ResourceKind::Calendar => "calendar",
            ResourceKind::Guests => "guests",
            ResourceKind::Tasks => "tasks",
            ResourceKind::Users => "users",
        }
    }
}

/// A resource family bound to a client. Every method is a single request under `path`.
#[derive(Clone)]
pub struct Resource<'a> {
    client: &'a HostawayClient,
    path: String,
}

impl<'a> Resource<'a> {
    pub(crate) fn new(client: &'a HostawayClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn member_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.path, id)
    }

    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Option<Value>> {
        self.client.get(&self.path, query).await
    }

    pub async fn list_as<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T> {
        self.client.get_as(&self.path, query).await
    }

    pub async fn find(&self, id: impl Display) -> Result<Option<Value>> {
        self.client.get(&self.member_path(id), &[]).await
    }

    pub async fn find_as<T: DeserializeOwned>(&self, id: impl Display) -> Result<T> {
        self.client.get_as(&self.member_path(id), &[]).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<Option<Value>> {
        self.client.post(&self.path, body).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        body: &B,
    ) -> Result<Option<Value>> {
        self.client.put(&self.member_path(id), body).await
    }

    pub async fn remove(&self, id: impl Display) -> Result<Option<Value>> {
        self.client.delete(&self.member_path(id)).await
    }

    /// Escape hatch for endpoints the helpers above don't cover, relative to this resource.
    pub async fn request(
        &self,
        method: Method,
        sub_path: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>> {
        let path = if sub_path.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{}", self.path, sub_path.trim_start_matches('/'))
        };
        self.client.request(method, &path, options).await
    }
}
