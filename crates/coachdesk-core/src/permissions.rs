//! Permission catalog and hierarchy engine for the Coachdesk API.
//!
//! A permission is a `module:action` string where the action is one of
//! `read`, `write` or `delete`. Within a module the actions form a strict
//! hierarchy: `write` implies `read`, and `delete` implies both `read` and
//! `write`. [`PermissionSet::toggle`] is the single mutation path and keeps
//! that implication intact by cascading grants up on add and down on remove.
//!
//! Sets loaded from storage are carried verbatim: the engine never repairs a
//! set it did not build, it only guarantees consistency for states it
//! produces itself.
//!
//! # Example
//!
//! ```
//! use coachdesk_core::permissions::{PermissionKey, PermissionSet};
//!
//! let write: PermissionKey = "students:write".parse().unwrap();
//! let set = PermissionSet::new().toggle(&write);
//! assert_eq!(set.to_vec(), vec!["students:read", "students:write"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Students permissions
// =============================================================================

/// Permission to view students
pub const STUDENTS_READ: &str = "students:read";
/// Permission to create and edit students
pub const STUDENTS_WRITE: &str = "students:write";
/// Permission to delete students
pub const STUDENTS_DELETE: &str = "students:delete";

// =============================================================================
// Admins permissions
// =============================================================================

/// Permission to view administrators and presets
pub const ADMINS_READ: &str = "admins:read";
/// Permission to create and edit administrators and presets
pub const ADMINS_WRITE: &str = "admins:write";
/// Permission to delete, restore and purge administrators and presets
pub const ADMINS_DELETE: &str = "admins:delete";

// =============================================================================
// Attendance permissions
// =============================================================================

/// Permission to view attendance
pub const ATTENDANCE_READ: &str = "attendance:read";
/// Permission to record attendance
pub const ATTENDANCE_WRITE: &str = "attendance:write";

// =============================================================================
// Reports permissions
// =============================================================================

/// Permission to view reports
pub const REPORTS_READ: &str = "reports:read";

/// Every permission key the backend recognizes, in display order.
pub const CATALOG: [&str; 9] = [
    STUDENTS_READ,
    STUDENTS_WRITE,
    STUDENTS_DELETE,
    ADMINS_READ,
    ADMINS_WRITE,
    ADMINS_DELETE,
    ATTENDANCE_READ,
    ATTENDANCE_WRITE,
    REPORTS_READ,
];

/// The catalog as owned strings, the shape the API layer hands out.
pub fn catalog() -> Vec<String> {
    CATALOG.iter().map(|p| p.to_string()).collect()
}

/// Returns the submitted grants that are not part of the catalog.
///
/// The CRUD layer rejects a request outright when this is non-empty, so
/// malformed or unknown keys never reach storage.
pub fn unknown_grants(grants: &[String]) -> Vec<String> {
    grants
        .iter()
        .filter(|g| !CATALOG.contains(&g.as_str()))
        .cloned()
        .collect()
}

/// A permission granularity level.
///
/// The variants are ordered by implication strength: `write` implies `read`,
/// `delete` implies `write` and `read`. That ordering is also the canonical
/// rendering order for grouped catalog views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Delete,
}

impl Action {
    /// Canonical rendering order for a module's actions.
    pub const CANONICAL: [Action; 3] = [Action::Read, Action::Write, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Action::Read),
            "write" => Ok(Action::Write),
            "delete" => Ok(Action::Delete),
            _ => Err(ParsePermissionError::UnknownAction(s.to_string())),
        }
    }
}

/// Error returned when a raw permission string cannot be parsed into a
/// [`PermissionKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePermissionError {
    /// The key has no `:` separator.
    MissingSeparator(String),
    /// The action part is not one of `read`, `write`, `delete`.
    UnknownAction(String),
}

impl fmt::Display for ParsePermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePermissionError::MissingSeparator(key) => {
                write!(f, "permission key '{}' has no ':' separator", key)
            }
            ParsePermissionError::UnknownAction(action) => {
                write!(
                    f,
                    "unknown permission action '{}' (expected read, write or delete)",
                    action
                )
            }
        }
    }
}

impl std::error::Error for ParsePermissionError {}

/// A single grantable capability: one action on one module.
///
/// Parsing splits on the first `:`, so a module name can never smuggle in a
/// second action part. Keys without a separator or with an action outside
/// the canonical three are rejected at parse time instead of silently
/// producing a degenerate group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PermissionKey {
    module: String,
    action: Action,
}

impl PermissionKey {
    pub fn new(module: impl Into<String>, action: Action) -> Self {
        Self {
            module: module.into(),
            action,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// The key for a different action on the same module.
    fn sibling(&self, action: Action) -> PermissionKey {
        PermissionKey::new(self.module.clone(), action)
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.action)
    }
}

impl FromStr for PermissionKey {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, action) = s
            .split_once(':')
            .ok_or_else(|| ParsePermissionError::MissingSeparator(s.to_string()))?;
        Ok(PermissionKey::new(module, action.parse()?))
    }
}

/// A set of granted permission strings.
///
/// Grants are stored as raw strings so keys outside the canonical
/// `read`/`write`/`delete` triple (display-only catalog entries, legacy
/// data) survive round-trips untouched. All mutation goes through
/// [`toggle`](Self::toggle); construction from stored data
/// ([`From<Vec<String>>`](#impl-From<Vec<String>>-for-PermissionSet)) is a
/// verbatim load with no validation, which is also how preset application
/// works: a preset replaces the current selection wholesale.
///
/// Serializes as a plain JSON array of strings, the wire shape the rest of
/// the system exchanges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    grants: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the typed key is granted.
    pub fn contains(&self, key: &PermissionKey) -> bool {
        self.grants.contains(&key.to_string())
    }

    /// Whether the raw grant string is present.
    pub fn has(&self, grant: &str) -> bool {
        self.grants.contains(grant)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.grants.iter().map(String::as_str)
    }

    /// The grants as a sorted list, the shape persisted and sent over the
    /// wire.
    pub fn to_vec(&self) -> Vec<String> {
        self.grants.iter().cloned().collect()
    }

    /// Flips one grant and cascades the hierarchy for its module.
    ///
    /// Adding `write` pulls in `read`; adding `delete` pulls in `read` and
    /// `write`. Removing `read` strips `write` and `delete`; removing
    /// `write` strips `delete`. Adding `read` and removing `delete` cascade
    /// nothing. Other modules are never touched.
    ///
    /// Every state reachable from the empty set through this method keeps
    /// the implication hierarchy intact. A set loaded with grants this
    /// method did not produce is not repaired; the cascade rules above are
    /// simply applied to whatever is present.
    #[must_use]
    pub fn toggle(&self, key: &PermissionKey) -> PermissionSet {
        let mut grants = self.grants.clone();
        let raw = key.to_string();

        if !grants.contains(&raw) {
            grants.insert(raw);
            match key.action() {
                Action::Read => {}
                Action::Write => {
                    grants.insert(key.sibling(Action::Read).to_string());
                }
                Action::Delete => {
                    grants.insert(key.sibling(Action::Read).to_string());
                    grants.insert(key.sibling(Action::Write).to_string());
                }
            }
        } else {
            grants.remove(&raw);
            match key.action() {
                Action::Read => {
                    grants.remove(&key.sibling(Action::Write).to_string());
                    grants.remove(&key.sibling(Action::Delete).to_string());
                }
                Action::Write => {
                    grants.remove(&key.sibling(Action::Delete).to_string());
                }
                Action::Delete => {}
            }
        }

        PermissionSet { grants }
    }

    /// Whether every module in the set satisfies the implication hierarchy:
    /// `write` only with `read`, `delete` only with `read` and `write`.
    ///
    /// Grants that do not parse as canonical keys are ignored; they carry no
    /// implications.
    pub fn is_consistent(&self) -> bool {
        self.grants
            .iter()
            .filter_map(|g| g.parse::<PermissionKey>().ok())
            .all(|key| match key.action() {
                Action::Read => true,
                Action::Write => self.contains(&key.sibling(Action::Read)),
                Action::Delete => {
                    self.contains(&key.sibling(Action::Read))
                        && self.contains(&key.sibling(Action::Write))
                }
            })
    }
}

impl From<Vec<String>> for PermissionSet {
    /// Loads stored grants verbatim. Used both for rows coming out of the
    /// database and for preset application, which replaces the current
    /// selection with the preset's grants as-is.
    fn from(grants: Vec<String>) -> Self {
        Self {
            grants: grants.into_iter().collect(),
        }
    }
}

impl FromIterator<String> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            grants: iter.into_iter().collect(),
        }
    }
}

/// Groups a flat permission catalog by module.
///
/// Each module's actions come back in canonical `[read, write, delete]`
/// order no matter how the catalog is ordered, filtered to the actions the
/// module actually exposes. Keys that do not parse as canonical permission
/// keys are skipped: they are display-only and never toggleable.
pub fn group_by_module(catalog: &[String]) -> BTreeMap<String, Vec<Action>> {
    let keys: Vec<PermissionKey> = catalog
        .iter()
        .filter_map(|raw| raw.parse::<PermissionKey>().ok())
        .collect();

    let mut grouped: BTreeMap<String, Vec<Action>> = BTreeMap::new();
    for key in &keys {
        grouped.entry(key.module().to_string()).or_default();
    }
    for (module, actions) in grouped.iter_mut() {
        *actions = Action::CANONICAL
            .into_iter()
            .filter(|action| {
                keys.iter()
                    .any(|k| k.module() == module && k.action() == *action)
            })
            .collect();
    }

    grouped
}
