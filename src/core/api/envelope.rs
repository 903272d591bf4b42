//! Accepted response shapes.
//!
//! The backend has wrapped its list and record responses differently across
//! versions. Each endpoint decodes through one enum listing every shape it
//! accepts; anything else is an [`ApiError::UnexpectedShape`], never an
//! empty default.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::{ApiError, Result};
use crate::core::models::{Campaign, Product};

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductList {
    Wrapped { products: Vec<Product> },
    Data { data: Vec<Product> },
    Bare(Vec<Product>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CampaignList {
    Bare(Vec<Campaign>),
    Wrapped { campaigns: Vec<Campaign> },
    Data { data: Vec<Campaign> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductRecord {
    Wrapped { product: Product },
    Bare(Product),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CampaignRecord {
    Wrapped { campaign: Campaign },
    Bare(Campaign),
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: Value) -> Result<T> {
    let kind = describe(&body);
    serde_json::from_value(body).map_err(|e| {
        tracing::warn!(endpoint, shape = %kind, error = %e, "Unrecognized response shape");
        ApiError::UnexpectedShape {
            endpoint,
            detail: format!("{kind}: {e}"),
        }
    })
}

fn describe(body: &Value) -> String {
    match body {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Null => "null".to_string(),
        other => format!("scalar {other}"),
    }
}

pub(crate) fn product_list(body: Value) -> Result<Vec<Product>> {
    Ok(match decode::<ProductList>("GET /api/products", body)? {
        ProductList::Wrapped { products } => products,
        ProductList::Data { data } => data,
        ProductList::Bare(products) => products,
    })
}

pub(crate) fn campaign_list(body: Value) -> Result<Vec<Campaign>> {
    Ok(match decode::<CampaignList>("GET /api/campaigns", body)? {
        CampaignList::Bare(campaigns) => campaigns,
        CampaignList::Wrapped { campaigns } => campaigns,
        CampaignList::Data { data } => data,
    })
}

pub(crate) fn product(endpoint: &'static str, body: Value) -> Result<Product> {
    Ok(match decode::<ProductRecord>(endpoint, body)? {
        ProductRecord::Wrapped { product } | ProductRecord::Bare(product) => product,
    })
}

pub(crate) fn campaign(endpoint: &'static str, body: Value) -> Result<Campaign> {
    Ok(match decode::<CampaignRecord>(endpoint, body)? {
        CampaignRecord::Wrapped { campaign } | CampaignRecord::Bare(campaign) => campaign,
    })
}
