//! Skin concern categories and their keyword tables.
//!
//! A concern is a marketing-facing skin-condition category mapped to a fixed
//! keyword list. Products are matched against these keywords by
//! [`crate::catalog::matches_concerns`]; the table is static and never
//! changes at runtime.

use serde::{Deserialize, Serialize};

/// A marketing-facing skin-condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinConcern {
    /// Breakouts and blemish-prone skin.
    Acne,
    /// Dehydrated or flaky skin.
    DrySkin,
    /// Excess sebum and shine.
    OilySkin,
    /// Easily irritated or reactive skin.
    SensitiveSkin,
    /// Dark spots and uneven tone.
    Hyperpigmentation,
    /// Fine lines and loss of firmness.
    Aging,
}

impl SkinConcern {
    /// All concerns, in display order.
    pub const ALL: [Self; 6] = [
        Self::Acne,
        Self::DrySkin,
        Self::OilySkin,
        Self::SensitiveSkin,
        Self::Hyperpigmentation,
        Self::Aging,
    ];

    /// Keywords whose presence in a product's text marks it as addressing
    /// this concern.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Acne => &[
                "acne",
                "blemish",
                "breakout",
                "salicylic acid",
                "benzoyl peroxide",
                "tea tree",
                "pimple",
            ],
            Self::DrySkin => &[
                "dry skin",
                "hydrating",
                "hydration",
                "hyaluronic acid",
                "moisturizing",
                "ceramide",
                "shea butter",
            ],
            Self::OilySkin => &[
                "oily skin",
                "oil control",
                "mattifying",
                "niacinamide",
                "clay",
                "sebum",
            ],
            Self::SensitiveSkin => &[
                "sensitive skin",
                "gentle",
                "fragrance-free",
                "soothing",
                "calming",
                "aloe",
                "centella",
            ],
            Self::Hyperpigmentation => &[
                "hyperpigmentation",
                "dark spot",
                "brightening",
                "vitamin c",
                "kojic acid",
                "even tone",
                "alpha arbutin",
            ],
            Self::Aging => &[
                "anti-aging",
                "fine lines",
                "wrinkle",
                "retinol",
                "collagen",
                "firming",
                "peptide",
            ],
        }
    }

    /// Parse a concern from a URL parameter string.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "acne" => Some(Self::Acne),
            "dry_skin" | "dry" => Some(Self::DrySkin),
            "oily_skin" | "oily" => Some(Self::OilySkin),
            "sensitive_skin" | "sensitive" => Some(Self::SensitiveSkin),
            "hyperpigmentation" | "dark_spots" => Some(Self::Hyperpigmentation),
            "aging" | "anti_aging" => Some(Self::Aging),
            _ => None,
        }
    }

    /// Get the URL parameter string for this concern.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acne => "acne",
            Self::DrySkin => "dry_skin",
            Self::OilySkin => "oily_skin",
            Self::SensitiveSkin => "sensitive_skin",
            Self::Hyperpigmentation => "hyperpigmentation",
            Self::Aging => "aging",
        }
    }
}

impl std::fmt::Display for SkinConcern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Acne => write!(f, "Acne"),
            Self::DrySkin => write!(f, "Dry Skin"),
            Self::OilySkin => write!(f, "Oily Skin"),
            Self::SensitiveSkin => write!(f, "Sensitive Skin"),
            Self::Hyperpigmentation => write!(f, "Hyperpigmentation"),
            Self::Aging => write!(f, "Aging"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_param() {
        assert_eq!(SkinConcern::from_str_param("acne"), Some(SkinConcern::Acne));
        assert_eq!(
            SkinConcern::from_str_param("Dry Skin"),
            Some(SkinConcern::DrySkin)
        );
        assert_eq!(
            SkinConcern::from_str_param("anti-aging"),
            Some(SkinConcern::Aging)
        );
        assert_eq!(SkinConcern::from_str_param("unknown"), None);
    }

    #[test]
    fn test_round_trip_param() {
        for concern in SkinConcern::ALL {
            assert_eq!(SkinConcern::from_str_param(concern.as_str()), Some(concern));
        }
    }

    #[test]
    fn test_every_concern_has_keywords() {
        for concern in SkinConcern::ALL {
            assert!(!concern.keywords().is_empty());
        }
    }
}
