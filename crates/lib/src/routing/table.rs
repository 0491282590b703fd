//! The static route table.

use std::{fmt, str::FromStr};

use super::RouteError;

/// Every navigable path of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Signup,
    Dashboard,
    Accounts,
    Transactions,
    CreditCards,
    GiftCards,
    Loans,
    Lockers,
    AdminDashboard,
    AdminAccounts,
    AdminCreditCards,
    AdminLoans,
}

/// Authentication a route demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    None,
    Authenticated,
}

/// Role a route demands on top of authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    None,
    Administrator,
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub route: Route,
    pub path: &'static str,
    pub auth: AuthRequirement,
    pub role: RoleRequirement,
}

const fn entry(
    route: Route,
    path: &'static str,
    auth: AuthRequirement,
    role: RoleRequirement,
) -> RouteEntry {
    RouteEntry {
        route,
        path,
        auth,
        role,
    }
}

use AuthRequirement::{Authenticated, None as Public};
use RoleRequirement::{Administrator, None as AnyRole};

/// All routes, in navigation order.
pub const ROUTES: [RouteEntry; 14] = [
    entry(Route::Root, "/", Public, AnyRole),
    entry(Route::Login, "/login", Public, AnyRole),
    entry(Route::Signup, "/signup", Public, AnyRole),
    entry(Route::Dashboard, "/dashboard", Authenticated, AnyRole),
    entry(Route::Accounts, "/accounts", Authenticated, AnyRole),
    entry(Route::Transactions, "/transactions", Authenticated, AnyRole),
    entry(Route::CreditCards, "/credit-cards", Authenticated, AnyRole),
    entry(Route::GiftCards, "/gift-cards", Authenticated, AnyRole),
    entry(Route::Loans, "/loans", Authenticated, AnyRole),
    entry(Route::Lockers, "/lockers", Authenticated, AnyRole),
    entry(Route::AdminDashboard, "/admin/dashboard", Authenticated, Administrator),
    entry(Route::AdminAccounts, "/admin/accounts", Authenticated, Administrator),
    entry(Route::AdminCreditCards, "/admin/credit-cards", Authenticated, Administrator),
    entry(Route::AdminLoans, "/admin/loans", Authenticated, Administrator),
];

impl Route {
    /// The table row describing this route.
    pub fn entry(self) -> &'static RouteEntry {
        // The table lists every variant in declaration order.
        &ROUTES[self as usize]
    }

    pub fn path(self) -> &'static str {
        self.entry().path
    }

    pub fn requires_auth(self) -> bool {
        self.entry().auth == AuthRequirement::Authenticated
    }

    pub fn requires_admin(self) -> bool {
        self.entry().role == RoleRequirement::Administrator
    }

    /// Match a request path. A single trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        ROUTES
            .iter()
            .find(|entry| entry.path == trimmed)
            .map(|entry| entry.route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| RouteError::UnknownPath {
            path: s.to_string(),
        })
    }
}
