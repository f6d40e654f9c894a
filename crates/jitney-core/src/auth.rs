//! Credential lookup, roles, and the ride-mutation gate.
//!
//! The credential table is externally supplied (configuration in the
//! binary, literals in tests) and looked up per request -- resolved users
//! are never cached across requests. Authorization distinguishes three
//! failure conditions: no credentials at all, an identity that does not
//! match the ride's driver, and an insufficient role.

use serde::{Deserialize, Serialize};

/// Capability level of an authenticated user.
///
/// Ordered `Viewer < Writer < Admin`, but [`has_role`] checks literal
/// membership only: an Admin does not satisfy a Writer-only check unless
/// Admin is explicitly listed. Callers enumerate every permitted role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only access.
    Viewer,
    /// May start and end their own rides.
    Writer,
    /// Full access, including report generation.
    Admin,
}

impl Role {
    /// The lowercase label used in configuration and error messages.
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Writer => "writer",
            Self::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// An authenticated `(login, role)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The login the credentials resolved to.
    pub login: String,
    /// The user's single role.
    pub role: Role,
}

/// Authentication or authorization failure.
///
/// [`AuthError::BadLogin`] and [`AuthError::Unauthenticated`] are
/// authentication failures; [`AuthError::DriverMismatch`] and
/// [`AuthError::RoleInsufficient`] are the two distinguishable
/// authorization sub-kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The supplied credentials resolve to no user.
    #[error("bad login")]
    BadLogin,

    /// The operation requires credentials and none were supplied.
    #[error("authentication required")]
    Unauthenticated,

    /// The authenticated login is not the ride's driver.
    #[error("authenticated as {login}, who is not the ride's driver")]
    DriverMismatch {
        /// The login that was authenticated.
        login: String,
    },

    /// The authenticated role is not one of the permitted roles.
    #[error("role {role} is not permitted to modify rides")]
    RoleInsufficient {
        /// The authenticated user's role.
        role: Role,
    },
}

/// One entry of the externally supplied credential table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    /// Login name.
    pub login: String,
    /// Plaintext password (static lookup only; real identity is an
    /// external collaborator).
    pub password: String,
    /// The single role this credential resolves to.
    pub role: Role,
}

/// Fixed credential table mapping `(login, password)` to a [`User`].
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: Vec<Credential>,
}

impl CredentialTable {
    /// Build a table from externally supplied entries.
    pub const fn new(entries: Vec<Credential>) -> Self {
        Self { entries }
    }

    /// Resolve credentials to a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::BadLogin`] when no entry matches both login
    /// and password; the error does not reveal which of the two failed.
    pub fn login(&self, login: &str, password: &str) -> Result<User, AuthError> {
        self.entries
            .iter()
            .find(|entry| entry.login == login && entry.password == password)
            .map(|entry| User {
                login: entry.login.clone(),
                role: entry.role,
            })
            .ok_or(AuthError::BadLogin)
    }
}

/// Whether the user's role is literally one of `allowed`.
///
/// No hierarchy traversal: `has_role(admin, &[Role::Writer])` is false.
pub fn has_role(user: &User, allowed: &[Role]) -> bool {
    allowed.contains(&user.role)
}

/// Roles permitted to start or end rides.
const MUTATION_ROLES: [Role; 2] = [Role::Writer, Role::Admin];

/// Gate a ride mutation (start or end) for `driver`'s ride.
///
/// Checks, in order: the request is authenticated, the authenticated
/// login equals the ride's driver, and the role is one of
/// [`Role::Writer`] or [`Role::Admin`].
///
/// # Errors
///
/// Returns [`AuthError::Unauthenticated`], [`AuthError::DriverMismatch`],
/// or [`AuthError::RoleInsufficient`] -- three distinct conditions.
pub fn authorize_ride_mutation(user: Option<&User>, driver: &str) -> Result<(), AuthError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    if user.login != driver {
        return Err(AuthError::DriverMismatch {
            login: user.login.clone(),
        });
    }
    if !has_role(user, &MUTATION_ROLES) {
        return Err(AuthError::RoleInsufficient { role: user.role });
    }
    Ok(())
}
