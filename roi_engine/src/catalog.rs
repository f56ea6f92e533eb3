//! Product tier catalog.
//!
//! The catalog holds one [`ProductTier`] per [`TierId`].  It starts
//! from the four built-in models and may be overridden from a
//! directory of JSON files, one tier per file, so prices can change
//! without a rebuild.

use crate::error::{Result, RoiError};
use crate::models::{ProductTier, TierId};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct TierCatalog {
    // Indexed by `TierId::index`.
    tiers: Vec<ProductTier>,
}

impl Default for TierCatalog {
    fn default() -> Self {
        let tiers = vec![
            tier(
                TierId::Studio,
                90_000.0,
                "4.8m × 2.5m × 4.0m",
                "Perfect studio/office space",
                200.0,
                "Ideal for creative professionals or as a compact guest retreat",
            ),
            tier(
                TierId::Backyard,
                105_000.0,
                "6.0m × 2.5m × 4.0m",
                "Queen bed + workspace",
                225.0,
                "The perfect balance of space and functionality for guests",
            ),
            tier(
                TierId::Weekender,
                130_000.0,
                "7.2m × 2.5m × 4.0m",
                "Premium guest experience",
                250.0,
                "Luxury tiny home designed for weekend escapes",
            ),
            tier(
                TierId::Residence,
                155_000.0,
                "8.4m × 2.5m × 4.0m",
                "Full-sized living experience",
                275.0,
                "Complete tiny home with all amenities for extended stays",
            ),
        ];
        Self { tiers }
    }
}

fn tier(
    id: TierId,
    price: f64,
    dimensions: &str,
    features: &str,
    suggested_nightly_rate: f64,
    description: &str,
) -> ProductTier {
    ProductTier {
        id,
        price,
        dimensions: dimensions.to_string(),
        features: features.to_string(),
        suggested_nightly_rate,
        description: description.to_string(),
    }
}

impl TierCatalog {
    pub fn get(&self, id: TierId) -> &ProductTier {
        &self.tiers[id.index()]
    }

    /// Look a tier up by its string id.
    pub fn lookup(&self, id: &str) -> Result<&ProductTier> {
        let id: TierId = id.parse()?;
        Ok(self.get(id))
    }

    /// All tiers in catalog order.
    pub fn tiers(&self) -> &[ProductTier] {
        &self.tiers
    }

    /// Replace the entry for `tier.id`.
    ///
    /// The suggested rate is checked like a user-entered nightly rate
    /// since selecting the tier copies it straight into the input.
    pub fn insert(&mut self, tier: ProductTier) -> Result<()> {
        if !tier.price.is_finite() || tier.price < 0.0 {
            return Err(RoiError::Config {
                message: format!("tier {} has an invalid price {}", tier.id, tier.price),
            });
        }
        if !tier.suggested_nightly_rate.is_finite() || tier.suggested_nightly_rate <= 0.0 {
            return Err(RoiError::Config {
                message: format!(
                    "tier {} has an invalid suggested nightly rate {}",
                    tier.id, tier.suggested_nightly_rate
                ),
            });
        }
        let index = tier.id.index();
        self.tiers[index] = tier;
        Ok(())
    }

    /// Build a catalog from the defaults, overridden by every `.json`
    /// file in `path`.
    ///
    /// Files that fail to parse or describe an unknown tier are
    /// skipped with a warning.  A missing directory yields the
    /// defaults unchanged.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let mut catalog = Self::default();
        if !path.is_dir() {
            debug!(path = %path.display(), "tier directory not found, using built-in catalog");
            return Ok(catalog);
        }
        let mut entries = std::fs::read_dir(path)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.path());
        for entry in entries {
            let file = entry.path();
            if !entry.file_type()?.is_file() || file.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let data = std::fs::read_to_string(&file)?;
            match serde_json::from_str::<ProductTier>(&data) {
                Ok(tier) => {
                    debug!(tier = %tier.id, price = tier.price, "loaded tier override");
                    if let Err(err) = catalog.insert(tier) {
                        warn!(file = %file.display(), error = %err, "skipping tier file");
                    }
                }
                Err(err) => {
                    warn!(file = %file.display(), error = %err, "failed to parse tier file");
                }
            }
        }
        Ok(catalog)
    }
}
