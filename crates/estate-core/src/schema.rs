//! Column role discovery.
//!
//! Datasets arrive without a fixed schema, so roles are found by substring
//! matching on the (already normalized) column names. Every role takes the
//! first matching column in column order; ties are never broken
//! alphabetically.
//!
//! | Role     | Tokens                                           |
//! |----------|--------------------------------------------------|
//! | `area`   | `area`, `location`                               |
//! | `year`   | `year`                                           |
//! | `price`  | `price`                                          |
//! | `demand` | `demand`                                         |
//! | `size`   | `size`, `area` (never the column taken by `area`) |

use estate_model::{Role, RoleMapping, Table};

fn role_tokens(role: Role) -> &'static [&'static str] {
    match role {
        Role::Area => &["area", "location"],
        Role::Year => &["year"],
        Role::Price => &["price"],
        Role::Demand => &["demand"],
        Role::Size => &["size", "area"],
    }
}

/// Resolves every role against an ordered list of column names.
///
/// Unmatched roles stay `None`; this never fails.
///
/// ```
/// use estate_core::resolve_roles;
///
/// let roles = resolve_roles(&["final_location", "year", "total_carpet_area", "flat_price"]);
/// assert_eq!(roles.area.as_deref(), Some("final_location"));
/// assert_eq!(roles.size.as_deref(), Some("total_carpet_area"));
/// assert_eq!(roles.demand, None);
/// ```
pub fn resolve_roles<S: AsRef<str>>(columns: &[S]) -> RoleMapping {
    let mut mapping = RoleMapping::default();
    for role in Role::ALL {
        let area_column = mapping.area.clone();
        let found = columns
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| role != Role::Size || area_column.as_deref() != Some(*name))
            .find(|name| {
                let lowered = name.to_lowercase();
                role_tokens(role)
                    .iter()
                    .any(|token| lowered.contains(token))
            })
            .map(str::to_string);
        mapping.set(role, found);
    }
    mapping
}

/// Resolves roles for a loaded table.
pub fn resolve_table_roles(table: &Table) -> RoleMapping {
    resolve_roles(&table.column_names())
}
