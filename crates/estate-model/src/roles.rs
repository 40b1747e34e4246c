//! Semantic column roles.

use serde::{Deserialize, Serialize};

/// The meaning a dataset column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Area,
    Year,
    Price,
    Demand,
    Size,
}

impl Role {
    /// All roles in resolution order. `Size` comes after `Area` because it
    /// must skip the column claimed as the area.
    pub const ALL: [Role; 5] = [Role::Area, Role::Year, Role::Price, Role::Demand, Role::Size];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Area => "area",
            Role::Year => "year",
            Role::Price => "price",
            Role::Demand => "demand",
            Role::Size => "size",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which column (if any) plays each role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    pub area: Option<String>,
    pub year: Option<String>,
    pub price: Option<String>,
    pub demand: Option<String>,
    pub size: Option<String>,
}

impl RoleMapping {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Area => self.area.as_deref(),
            Role::Year => self.year.as_deref(),
            Role::Price => self.price.as_deref(),
            Role::Demand => self.demand.as_deref(),
            Role::Size => self.size.as_deref(),
        }
    }

    pub fn set(&mut self, role: Role, column: Option<String>) {
        let slot = match role {
            Role::Area => &mut self.area,
            Role::Year => &mut self.year,
            Role::Price => &mut self.price,
            Role::Demand => &mut self.demand,
            Role::Size => &mut self.size,
        };
        *slot = column;
    }

    /// Roles that no column could be found for.
    pub fn unresolved(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }
}
