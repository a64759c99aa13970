use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Portfolio category. Wire values match the public site's gallery filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Kuhinje,
    Vrata,
    Namjestaj,
    Stepenice,
    Ostalo,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 5] = [
        Self::Kuhinje,
        Self::Vrata,
        Self::Namjestaj,
        Self::Stepenice,
        Self::Ostalo,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kuhinje => "kuhinje",
            Self::Vrata => "vrata",
            Self::Namjestaj => "namjestaj",
            Self::Stepenice => "stepenice",
            Self::Ostalo => "ostalo",
        }
    }

    /// Human-readable label shown in the admin UI and gallery filter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kuhinje => "Kuhinje",
            Self::Vrata => "Vrata i prozori",
            Self::Namjestaj => "Namještaj",
            Self::Stepenice => "Stepenice",
            Self::Ostalo => "Ostalo",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kuhinje" => Ok(Self::Kuhinje),
            "vrata" => Ok(Self::Vrata),
            "namjestaj" => Ok(Self::Namjestaj),
            "stepenice" => Ok(Self::Stepenice),
            "ostalo" => Ok(Self::Ostalo),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all() {
        for category in ProjectCategory::ALL {
            assert_eq!(category.as_str().parse::<ProjectCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_rejected() {
        assert!("kitchens".parse::<ProjectCategory>().is_err());
        assert!("".parse::<ProjectCategory>().is_err());
    }
}
