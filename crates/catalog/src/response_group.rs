//! Response groups: flag set selecting which product sub-sections a read
//! should populate.

use core::str::FromStr;

use bitflags::bitflags;
use merx_core::CatalogError;

bitflags! {
    /// Which sub-sections of a `CatalogProduct` are populated in a response.
    ///
    /// `INFO` (id, code, name, flags, placement) is always present; trimming
    /// never strips it even when the flag is absent from the request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResponseGroup: u32 {
        const INFO       = 1 << 0;
        const ASSETS     = 1 << 1;
        const PROPERTIES = 1 << 2;
        const VARIATIONS = 1 << 3;
        const LINKS      = 1 << 4;
        const OUTLINES   = 1 << 5;
        const REVIEWS    = 1 << 6;

        const ITEM_SMALL  = Self::INFO.bits() | Self::ASSETS.bits();
        const ITEM_MEDIUM = Self::ITEM_SMALL.bits()
            | Self::PROPERTIES.bits()
            | Self::VARIATIONS.bits();
        const ITEM_LARGE  = Self::ITEM_MEDIUM.bits()
            | Self::LINKS.bits()
            | Self::OUTLINES.bits()
            | Self::REVIEWS.bits();
    }
}

impl Default for ResponseGroup {
    fn default() -> Self {
        Self::ITEM_LARGE
    }
}

impl FromStr for ResponseGroup {
    type Err = CatalogError;

    /// Parse a comma-separated flag list, e.g. `"info,properties,outlines"`.
    /// Composite names (`item_small`, …) are accepted alongside single flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut group = ResponseGroup::empty();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let flag = match part.to_ascii_lowercase().as_str() {
                "info" => Self::INFO,
                "assets" => Self::ASSETS,
                "properties" => Self::PROPERTIES,
                "variations" => Self::VARIATIONS,
                "links" => Self::LINKS,
                "outlines" => Self::OUTLINES,
                "reviews" => Self::REVIEWS,
                "item_small" => Self::ITEM_SMALL,
                "item_medium" => Self::ITEM_MEDIUM,
                "item_large" | "full" => Self::ITEM_LARGE,
                other => {
                    return Err(CatalogError::validation(format!(
                        "unknown response group flag: {other}"
                    )));
                }
            };
            group |= flag;
        }
        if group.is_empty() {
            return Err(CatalogError::validation("empty response group"));
        }
        Ok(group)
    }
}
