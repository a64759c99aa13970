use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Symbolic icon name attached to a service. The set is fixed; the admin UI
/// maps each variant to a rendered glyph, so unknown names are rejected at
/// the API boundary instead of silently falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceIcon {
    ChefHat,
    DoorOpen,
    Armchair,
    Stairs,
    Hammer,
    Building2,
    Wrench,
    Ruler,
    TreePine,
    Paintbrush,
}

impl ServiceIcon {
    pub const ALL: [ServiceIcon; 10] = [
        Self::ChefHat,
        Self::DoorOpen,
        Self::Armchair,
        Self::Stairs,
        Self::Hammer,
        Self::Building2,
        Self::Wrench,
        Self::Ruler,
        Self::TreePine,
        Self::Paintbrush,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChefHat => "ChefHat",
            Self::DoorOpen => "DoorOpen",
            Self::Armchair => "Armchair",
            Self::Stairs => "Stairs",
            Self::Hammer => "Hammer",
            Self::Building2 => "Building2",
            Self::Wrench => "Wrench",
            Self::Ruler => "Ruler",
            Self::TreePine => "TreePine",
            Self::Paintbrush => "Paintbrush",
        }
    }
}

impl Default for ServiceIcon {
    fn default() -> Self {
        Self::Wrench
    }
}

impl fmt::Display for ServiceIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceIcon::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| format!("unknown icon: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all() {
        for icon in ServiceIcon::ALL {
            assert_eq!(icon.as_str().parse::<ServiceIcon>(), Ok(icon));
        }
    }

    #[test]
    fn test_unknown_rejected() {
        assert!("Chainsaw".parse::<ServiceIcon>().is_err());
        assert!("chefhat".parse::<ServiceIcon>().is_err());
    }
}
