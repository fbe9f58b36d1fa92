//! Filter option catalogue served by the superlist endpoint.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CountryOption {
    country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MarketOption {
    market: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SourceOption {
    source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CategoryOption {
    product_cat: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AggregatorOption {
    product_agg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ProductOption {
    product: String,
}

/// Available values for every multi-value dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Superlist {
    #[serde(default)]
    countries: Vec<CountryOption>,
    #[serde(default)]
    markets: Vec<MarketOption>,
    #[serde(default)]
    sources: Vec<SourceOption>,
    #[serde(default)]
    categories: Vec<CategoryOption>,
    #[serde(default)]
    aggregators: Vec<AggregatorOption>,
    #[serde(default)]
    products: Vec<ProductOption>,
}

impl Superlist {
    /// Option codes for one dimension, in server order.
    #[must_use]
    pub fn options(&self, dimension: Dimension) -> Vec<&str> {
        match dimension {
            Dimension::Countries => self.countries.iter().map(|o| o.country.as_str()).collect(),
            Dimension::Markets => self.markets.iter().map(|o| o.market.as_str()).collect(),
            Dimension::Sources => self.sources.iter().map(|o| o.source.as_str()).collect(),
            Dimension::ProductCategories => self
                .categories
                .iter()
                .map(|o| o.product_cat.as_str())
                .collect(),
            Dimension::ProductAggregators => self
                .aggregators
                .iter()
                .map(|o| o.product_agg.as_str())
                .collect(),
            Dimension::Products => self.products.iter().map(|o| o.product.as_str()).collect(),
        }
    }

    /// `(code, display text)` pairs; countries get their full names.
    #[must_use]
    pub fn labelled_options(&self, dimension: Dimension) -> Vec<(&str, &str)> {
        self.options(dimension)
            .into_iter()
            .map(|code| match dimension {
                Dimension::Countries => (code, country_label(code)),
                _ => (code, code),
            })
            .collect()
    }
}

/// Display name for a country code. Unknown codes display as themselves.
#[must_use]
pub fn country_label(code: &str) -> &str {
    match code {
        "BDI" => "Burundi",
        "DRC" => "Democratic Republic of the Congo",
        "KEN" => "Kenya",
        "MWI" => "Malawi",
        "RWA" => "Rwanda",
        "SSD" => "South Sudan",
        "TZA" => "Tanzania",
        "UGA" => "Uganda",
        other => other,
    }
}
