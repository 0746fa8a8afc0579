//! Authenticated principals.
//!
//! An anonymous caller is represented by the absence of an [`Identity`]
//! (`Option::None`), never by an identity with an empty permission set.

use std::collections::BTreeSet;

/// Capabilities an identity may hold on the LFS server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    /// Read object metadata (batch API responses).
    ReadMeta,
    /// Download objects.
    Read,
    /// Upload objects.
    Write,
}

impl Permission {
    pub const ALL: [Permission; 3] = [Permission::ReadMeta, Permission::Read, Permission::Write];

    /// The full permission set.
    pub fn all() -> PermissionSet {
        PermissionSet::all()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ReadMeta => "read_meta",
            Permission::Read => "read",
            Permission::Write => "write",
        }
    }
}

/// A set of granted permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self(Permission::ALL.into_iter().collect())
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A principal resolved from a presented token.
///
/// Only the validator in this crate can construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    permissions: PermissionSet,
}

impl Identity {
    pub(crate) fn authenticated(name: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            name: name.into(),
            permissions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions.contains(permission)
    }
}
