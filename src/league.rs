use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Leagues the prediction model covers, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    Nfl,
    Nba,
    Cfb,
    Mbb,
}

impl League {
    pub const ALL: [League; 4] = [League::Nfl, League::Nba, League::Cfb, League::Mbb];

    /// Short code used in API paths (`/games/nfl`).
    pub fn code(self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::Nba => "nba",
            League::Cfb => "cfb",
            League::Mbb => "mbb",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            League::Nfl => "NFL",
            League::Nba => "NBA",
            League::Cfb => "College Football",
            League::Mbb => "Men's College Basketball",
        }
    }
}

/// A selectable tab: the overview page or one league's predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Home,
    League(League),
}

impl Category {
    /// Home first, then every league.
    pub fn all() -> impl Iterator<Item = Category> {
        std::iter::once(Category::Home).chain(League::ALL.into_iter().map(Category::League))
    }

    pub fn code(self) -> &'static str {
        match self {
            Category::Home => "home",
            Category::League(l) => l.code(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Home => "Home",
            Category::League(l) => l.display_name(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        if code == "home" {
            return Ok(Category::Home);
        }
        League::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .map(Category::League)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
