//! Declarative resource table and the generic operations behind every
//! service.
//!
//! Each Loyverse resource is described by its collection path and the
//! response key holding list items. [`ResourceClient`] turns that
//! descriptor into get/list/create/update/delete calls; the per-resource
//! services only add typed parameters.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::client::{
    ClientInner, ListOptions, Listing, PaginatedCollection, PaginatedStream, Paginator,
};
use crate::models::Timestamp;
use crate::Result;

/// Collection path and list data key of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resource {
    pub path: &'static str,
    pub data_key: &'static str,
}

pub(crate) const CATEGORIES: Resource = Resource {
    path: "categories",
    data_key: "categories",
};

pub(crate) const ITEMS: Resource = Resource {
    path: "items",
    data_key: "items",
};

pub(crate) const INVENTORY: Resource = Resource {
    path: "inventory",
    data_key: "inventory_levels",
};

pub(crate) const RECEIPTS: Resource = Resource {
    path: "receipts",
    data_key: "receipts",
};

pub(crate) const CUSTOMERS: Resource = Resource {
    path: "customers",
    data_key: "customers",
};

pub(crate) const DISCOUNTS: Resource = Resource {
    path: "discounts",
    data_key: "discounts",
};

pub(crate) const EMPLOYEES: Resource = Resource {
    path: "employees",
    data_key: "employees",
};

pub(crate) const MODIFIERS: Resource = Resource {
    path: "modifiers",
    data_key: "modifiers",
};

pub(crate) const WEBHOOKS: Resource = Resource {
    path: "webhooks",
    data_key: "webhooks",
};

/// Generic operations over one [`Resource`].
#[derive(Clone)]
pub(crate) struct ResourceClient {
    inner: Arc<ClientInner>,
    resource: Resource,
}

impl ResourceClient {
    pub(crate) fn new(inner: Arc<ClientInner>, resource: Resource) -> Self {
        Self { inner, resource }
    }

    fn member_path(&self, id: &str) -> String {
        format!("{}/{}", self.resource.path, encode_segment(id))
    }

    pub(crate) fn paginator<Q: Serialize + ?Sized>(
        &self,
        filters: &Q,
        options: ListOptions,
    ) -> Result<Paginator<Value>> {
        Paginator::new(self.inner.clone(), self.resource.path, self.resource.data_key)
            .options(options)
            .filters(filters)
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Value> {
        self.inner.get(&self.member_path(id), &()).await
    }

    pub(crate) async fn fetch<Q: Serialize + ?Sized>(
        &self,
        filters: &Q,
        options: ListOptions,
    ) -> Result<Listing> {
        self.paginator(filters, options)?.fetch().await
    }

    pub(crate) async fn list_all<Q: Serialize + ?Sized>(
        &self,
        filters: &Q,
        options: ListOptions,
    ) -> Result<Vec<Value>> {
        self.paginator(filters, options)?.all().await
    }

    pub(crate) async fn list_page<Q: Serialize + ?Sized>(
        &self,
        filters: &Q,
        options: ListOptions,
    ) -> Result<PaginatedCollection> {
        self.paginator(filters, options)?.page().await
    }

    pub(crate) fn stream<Q: Serialize + ?Sized>(
        &self,
        filters: &Q,
        options: ListOptions,
    ) -> Result<PaginatedStream<Value>> {
        Ok(self.paginator(filters, options)?.into_stream())
    }

    pub(crate) async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
        self.inner.post(self.resource.path, body).await
    }

    /// POST to a sub-path of a member, e.g. `receipts/{n}/refund`.
    pub(crate) async fn post_action<B: Serialize + ?Sized>(
        &self,
        id: &str,
        action: &str,
        body: &B,
    ) -> Result<Value> {
        let path = format!("{}/{}", self.member_path(id), action);
        self.inner.post(&path, body).await
    }

    pub(crate) async fn update<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Value> {
        self.inner.put(&self.member_path(id), body).await
    }

    /// PUT on the collection path itself.
    pub(crate) async fn replace<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
        self.inner.put(self.resource.path, body).await
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<Option<Value>> {
        self.inner.delete(&self.member_path(id)).await
    }
}

/// Percent-encode an id for use as a single path segment.
fn encode_segment(id: &str) -> String {
    // Form encoding writes spaces as '+'; literal '+' is already %2B.
    form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Filter on last-modified time, accepted by most list endpoints.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct UpdatedAtQuery {
    /// Only records updated at or after this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<Timestamp>,
    /// Only records updated at or before this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<Timestamp>,
}

impl UpdatedAtQuery {
    /// Records updated at or after `at`.
    pub fn since(at: impl Into<Timestamp>) -> Self {
        Self {
            updated_at_min: Some(at.into()),
            updated_at_max: None,
        }
    }

    /// Set the upper bound.
    pub fn until(mut self, at: impl Into<Timestamp>) -> Self {
        self.updated_at_max = Some(at.into());
        self
    }
}

/// Generates the list family for a service holding `resource: ResourceClient`.
///
/// With a filter type the methods take `&Filters`; without one they take
/// no filter argument.
macro_rules! list_operations {
    ($name:literal, $filters:ty) => {
        #[doc = concat!("List all ", $name, " across every page.")]
        pub async fn list(&self, filters: &$filters) -> $crate::Result<Vec<serde_json::Value>> {
            self.resource
                .list_all(filters, $crate::client::ListOptions::all())
                .await
        }

        #[doc = concat!(
            "List ",
            $name,
            ", fetching every page or a single page per `options.mode`."
        )]
        pub async fn list_with(
            &self,
            filters: &$filters,
            options: $crate::client::ListOptions,
        ) -> $crate::Result<$crate::client::Listing> {
            self.resource.fetch(filters, options).await
        }

        #[doc = concat!("Fetch one page of ", $name, ".")]
        pub async fn list_page(
            &self,
            filters: &$filters,
            options: $crate::client::ListOptions,
        ) -> $crate::Result<$crate::client::PaginatedCollection> {
            self.resource.list_page(filters, options).await
        }

        #[doc = concat!("Lazily stream ", $name, " one at a time.")]
        pub fn stream(
            &self,
            filters: &$filters,
        ) -> $crate::Result<$crate::client::PaginatedStream<serde_json::Value>> {
            self.resource
                .stream(filters, $crate::client::ListOptions::all())
        }
    };
    ($name:literal) => {
        #[doc = concat!("List all ", $name, " across every page.")]
        pub async fn list(&self) -> $crate::Result<Vec<serde_json::Value>> {
            self.resource
                .list_all(&(), $crate::client::ListOptions::all())
                .await
        }

        #[doc = concat!(
            "List ",
            $name,
            ", fetching every page or a single page per `options.mode`."
        )]
        pub async fn list_with(
            &self,
            options: $crate::client::ListOptions,
        ) -> $crate::Result<$crate::client::Listing> {
            self.resource.fetch(&(), options).await
        }

        #[doc = concat!("Fetch one page of ", $name, ".")]
        pub async fn list_page(
            &self,
            options: $crate::client::ListOptions,
        ) -> $crate::Result<$crate::client::PaginatedCollection> {
            self.resource.list_page(&(), options).await
        }

        #[doc = concat!("Lazily stream ", $name, " one at a time.")]
        pub fn stream(&self) -> $crate::Result<$crate::client::PaginatedStream<serde_json::Value>> {
            self.resource.stream(&(), $crate::client::ListOptions::all())
        }
    };
}

pub(crate) use list_operations;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::request::compact_query;

    #[test]
    fn test_updated_at_query() {
        let mut pairs = compact_query(
            &UpdatedAtQuery::since("2024-01-01T00:00:00.000Z").until("2024-02-01T00:00:00.000Z"),
        )
        .unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("updated_at_max".to_string(), "2024-02-01T00:00:00.000Z".to_string()),
                ("updated_at_min".to_string(), "2024-01-01T00:00:00.000Z".to_string()),
            ]
        );

        assert!(compact_query(&UpdatedAtQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("1-1001"), "1-1001");
        assert_eq!(encode_segment("a/b?c=d"), "a%2Fb%3Fc%3Dd");
        assert_eq!(encode_segment("a b+c"), "a%20b%2Bc");
    }

    #[test]
    fn test_resource_table() {
        assert_eq!(INVENTORY.data_key, "inventory_levels");
        let resources = [
            CATEGORIES, ITEMS, RECEIPTS, CUSTOMERS, DISCOUNTS, EMPLOYEES, MODIFIERS, WEBHOOKS,
        ];
        for resource in resources {
            assert_eq!(resource.path, resource.data_key);
        }
    }
}
