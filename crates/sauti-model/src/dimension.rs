//! The six multi-value filter dimensions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A multi-value filter dimension of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Countries,
    Markets,
    Sources,
    ProductCategories,
    ProductAggregators,
    Products,
}

impl Dimension {
    /// All dimensions in canonical query order.
    pub const ALL: [Self; 6] = [
        Self::Countries,
        Self::Markets,
        Self::Sources,
        Self::ProductCategories,
        Self::ProductAggregators,
        Self::Products,
    ];

    /// Query parameter name used on the wire.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Countries => "c",
            Self::Markets => "m",
            Self::Sources => "s",
            Self::ProductCategories => "pcat",
            Self::ProductAggregators => "pagg",
            Self::Products => "p",
        }
    }

    /// Look up a dimension by its query parameter name.
    #[must_use]
    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.param() == param)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Countries => "Countries",
            Self::Markets => "Markets",
            Self::Sources => "Sources",
            Self::ProductCategories => "Product category",
            Self::ProductAggregators => "Product sub-category",
            Self::Products => "Products",
        }
    }

    /// Position of this dimension in [`Dimension::ALL`].
    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Countries => 0,
            Self::Markets => 1,
            Self::Sources => 2,
            Self::ProductCategories => 3,
            Self::ProductAggregators => 4,
            Self::Products => 5,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
