//! Role-gated routing.
//!
//! Every navigation is evaluated against the current session with
//! [`resolve`]. The gate runs on every request, not only on the first, so a
//! role revoked mid-session is enforced the next time a gated route renders.
//! This is a navigation convenience only; the backends authorize every call.

pub mod errors;
mod table;

pub use errors::RouteError;
pub use table::{AuthRequirement, ROUTES, RoleRequirement, Route, RouteEntry};

use serde::Serialize;

use crate::session::{Session, SessionStatus};

/// The router's view of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    Anonymous,
    /// A persisted credential is being checked; nothing may render yet.
    Authenticating,
    Standard,
    Administrator,
}

impl AccessState {
    /// Derive the access state from a session snapshot.
    ///
    /// `credential_persisted` distinguishes a resume in progress from a bare
    /// loading flag left behind without anything to resume.
    pub fn from_session(session: &Session, credential_persisted: bool) -> Self {
        if session.is_authenticated() {
            if session.is_admin() {
                AccessState::Administrator
            } else {
                AccessState::Standard
            }
        } else if session.status() == SessionStatus::Loading
            && credential_persisted
            && session.identity().is_none()
        {
            AccessState::Authenticating
        } else {
            AccessState::Anonymous
        }
    }

    pub fn is_authenticated(self) -> bool {
        matches!(self, AccessState::Standard | AccessState::Administrator)
    }
}

/// Which navigation chrome surrounds a rendered screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chrome {
    Standard,
    Administrator,
}

/// Transient message shown after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An authenticated user without administrator privilege tried an admin route.
    AdminRequired,
}

impl Notice {
    /// Stable identifier, suitable for a cookie value.
    pub fn code(self) -> &'static str {
        match self {
            Notice::AdminRequired => "admin-required",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "admin-required" => Some(Notice::AdminRequired),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::AdminRequired => "Administrator access is required for that page.",
        }
    }
}

/// What to do with one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Show the route's screen. `chrome` is `None` for the unauthenticated screens.
    Render { route: Route, chrome: Option<Chrome> },
    /// Navigate elsewhere, optionally telling the user why.
    Redirect { to: Route, notice: Option<Notice> },
    /// A session resume is outstanding; show a neutral loading indicator.
    Loading,
}

/// The role-appropriate landing route for an authenticated state, login otherwise.
pub fn default_route(access: AccessState) -> Route {
    match access {
        AccessState::Administrator => Route::AdminDashboard,
        AccessState::Standard => Route::Dashboard,
        AccessState::Anonymous | AccessState::Authenticating => Route::Login,
    }
}

/// Apply the authentication and role gates to one navigation.
pub fn resolve(route: Route, access: AccessState) -> Decision {
    if access == AccessState::Authenticating {
        return Decision::Loading;
    }

    match route {
        Route::Root => {
            return Decision::Redirect {
                to: default_route(access),
                notice: None,
            };
        }
        Route::Login if access.is_authenticated() => {
            return Decision::Redirect {
                to: default_route(access),
                notice: None,
            };
        }
        Route::Signup if access.is_authenticated() => {
            return Decision::Redirect {
                to: Route::Dashboard,
                notice: None,
            };
        }
        _ => {}
    }

    if route.requires_auth() && !access.is_authenticated() {
        return Decision::Redirect {
            to: Route::Login,
            notice: None,
        };
    }

    if route.requires_admin() && access != AccessState::Administrator {
        tracing::debug!(path = route.path(), "Administrator route refused");
        return Decision::Redirect {
            to: Route::Dashboard,
            notice: Some(Notice::AdminRequired),
        };
    }

    let chrome = if !route.requires_auth() {
        None
    } else if route.requires_admin() {
        Some(Chrome::Administrator)
    } else {
        Some(Chrome::Standard)
    };
    Decision::Render { route, chrome }
}

/// [`resolve`] for a raw request path.
pub fn resolve_path(path: &str, access: AccessState) -> crate::Result<Decision> {
    let route: Route = path.parse()?;
    Ok(resolve(route, access))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credential, Identity, Role, SessionStore};

    const ALL_STATES: [AccessState; 4] = [
        AccessState::Anonymous,
        AccessState::Authenticating,
        AccessState::Standard,
        AccessState::Administrator,
    ];

    fn identity(roles: Vec<Role>) -> Identity {
        Identity {
            id: 1,
            username: "alice".to_string(),
            first_name: None,
            last_name: None,
            email: None,
            phone_number: None,
            roles,
        }
    }

    fn redirect_target(decision: Decision) -> Option<Route> {
        match decision {
            Decision::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        for entry in ROUTES.iter().filter(|e| e.route.requires_auth()) {
            assert_eq!(
                resolve(entry.route, AccessState::Anonymous),
                Decision::Redirect {
                    to: Route::Login,
                    notice: None
                },
                "{}",
                entry.path
            );
        }
    }

    #[test]
    fn standard_user_is_demoted_from_admin_routes() {
        for route in [
            Route::AdminDashboard,
            Route::AdminAccounts,
            Route::AdminCreditCards,
            Route::AdminLoans,
        ] {
            assert_eq!(
                resolve(route, AccessState::Standard),
                Decision::Redirect {
                    to: Route::Dashboard,
                    notice: Some(Notice::AdminRequired)
                }
            );
        }
    }

    #[test]
    fn login_redirects_authenticated_users_by_role() {
        assert_eq!(
            redirect_target(resolve(Route::Login, AccessState::Administrator)),
            Some(Route::AdminDashboard)
        );
        assert_eq!(
            redirect_target(resolve(Route::Login, AccessState::Standard)),
            Some(Route::Dashboard)
        );
    }

    #[test]
    fn signup_sends_any_authenticated_user_to_dashboard() {
        assert_eq!(
            redirect_target(resolve(Route::Signup, AccessState::Standard)),
            Some(Route::Dashboard)
        );
        assert_eq!(
            redirect_target(resolve(Route::Signup, AccessState::Administrator)),
            Some(Route::Dashboard)
        );
    }

    #[test]
    fn root_always_redirects() {
        assert_eq!(
            redirect_target(resolve(Route::Root, AccessState::Anonymous)),
            Some(Route::Login)
        );
        assert_eq!(
            redirect_target(resolve(Route::Root, AccessState::Standard)),
            Some(Route::Dashboard)
        );
        assert_eq!(
            redirect_target(resolve(Route::Root, AccessState::Administrator)),
            Some(Route::AdminDashboard)
        );
    }

    #[test]
    fn authenticating_renders_nothing() {
        for entry in &ROUTES {
            assert_eq!(resolve(entry.route, AccessState::Authenticating), Decision::Loading);
        }
    }

    #[test]
    fn chrome_follows_the_route() {
        assert_eq!(
            resolve(Route::AdminLoans, AccessState::Administrator),
            Decision::Render {
                route: Route::AdminLoans,
                chrome: Some(Chrome::Administrator)
            }
        );
        assert_eq!(
            resolve(Route::Loans, AccessState::Administrator),
            Decision::Render {
                route: Route::Loans,
                chrome: Some(Chrome::Standard)
            }
        );
        assert_eq!(
            resolve(Route::Login, AccessState::Anonymous),
            Decision::Render {
                route: Route::Login,
                chrome: None
            }
        );
    }

    #[test]
    fn no_state_renders_a_route_it_may_not_see() {
        for access in ALL_STATES {
            for entry in &ROUTES {
                if let Decision::Render { route, .. } = resolve(entry.route, access) {
                    assert!(!route.requires_auth() || access.is_authenticated());
                    assert!(!route.requires_admin() || access == AccessState::Administrator);
                    assert_ne!(route, Route::Root);
                }
            }
        }
    }

    #[test]
    fn access_state_tracks_the_session() {
        let store = SessionStore::new();
        assert_eq!(
            AccessState::from_session(&store.snapshot(), false),
            AccessState::Anonymous
        );

        store.begin_load();
        assert_eq!(
            AccessState::from_session(&store.snapshot(), true),
            AccessState::Authenticating
        );
        assert_eq!(
            AccessState::from_session(&store.snapshot(), false),
            AccessState::Anonymous
        );

        store.initialize(
            identity(vec![Role::from("customer")]),
            Credential::new("tok-123").unwrap(),
        );
        assert_eq!(
            AccessState::from_session(&store.snapshot(), true),
            AccessState::Standard
        );

        store.login_succeeded(
            identity(vec![Role::Named {
                name: "ROLE_ADMIN".to_string(),
            }]),
            Credential::new("tok-456").unwrap(),
        );
        assert_eq!(
            AccessState::from_session(&store.snapshot(), true),
            AccessState::Administrator
        );

        store.logout();
        assert_eq!(
            AccessState::from_session(&store.snapshot(), false),
            AccessState::Anonymous
        );
    }

    #[test]
    fn unknown_paths_are_reported() {
        let err = resolve_path("/admin", AccessState::Administrator).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.module(), "routing");
    }

    #[test]
    fn notice_codes_round_trip() {
        let notice = Notice::AdminRequired;
        assert_eq!(Notice::from_code(notice.code()), Some(notice));
        assert_eq!(Notice::from_code("bogus"), None);
    }
}
