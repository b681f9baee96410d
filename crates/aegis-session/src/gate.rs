//! Pure path-authorization gate.

use serde::Deserialize;

/// Which paths need a session and which are for visitors only.
///
/// This is policy data, not code: hosts may deserialize it from
/// configuration. The default matches the shipped dashboard:
/// `/dashboard` requires a session, `/login` and `/signup` bounce
/// already-authenticated users back to the dashboard.
///
/// The two sets must not claim the redirect targets themselves
/// (`login_path` must not be protected, `dashboard_path` must not be
/// pre-auth-only), otherwise [`RoutePolicy::decide`] stops being
/// idempotent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutePolicy {
    pub protected: Vec<String>,
    pub pre_auth_only: Vec<String>,
    pub login_path: String,
    pub dashboard_path: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            protected: vec!["/dashboard".to_string()],
            pre_auth_only: vec!["/login".to_string(), "/signup".to_string()],
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
        }
    }
}

impl RoutePolicy {
    /// Resolve a requested path against the current authentication
    /// state: protected paths fall back to login when unauthenticated,
    /// visitor-only paths bounce to the dashboard when authenticated,
    /// everything else passes through unchanged.
    ///
    /// Pure and idempotent: feeding the result back in with the same
    /// auth state returns it unchanged, which is what makes the loop
    /// suppression in the navigation controller analyzable.
    pub fn decide(&self, requested: &str, authenticated: bool) -> String {
        if !authenticated && self.protected.iter().any(|p| p == requested) {
            return self.login_path.clone();
        }
        if authenticated && self.pre_auth_only.iter().any(|p| p == requested) {
            return self.dashboard_path.clone();
        }
        requested.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_path_redirects_to_login_when_unauthenticated() {
        let policy = RoutePolicy::default();
        assert_eq!(policy.decide("/dashboard", false), "/login");
    }

    #[test]
    fn pre_auth_paths_redirect_to_dashboard_when_authenticated() {
        let policy = RoutePolicy::default();
        assert_eq!(policy.decide("/login", true), "/dashboard");
        assert_eq!(policy.decide("/signup", true), "/dashboard");
    }

    #[test]
    fn unlisted_paths_pass_through() {
        let policy = RoutePolicy::default();
        for auth in [false, true] {
            assert_eq!(policy.decide("/", auth), "/");
            assert_eq!(policy.decide("/pricing", auth), "/pricing");
        }
        assert_eq!(policy.decide("/dashboard", true), "/dashboard");
        assert_eq!(policy.decide("/login", false), "/login");
    }

    #[test]
    fn decide_is_idempotent() {
        let policy = RoutePolicy::default();
        for path in ["/", "/dashboard", "/login", "/signup", "/pricing"] {
            for auth in [false, true] {
                let once = policy.decide(path, auth);
                assert_eq!(policy.decide(&once, auth), once, "path {path}, auth {auth}");
            }
        }
    }

    #[test]
    fn policy_deserializes_from_config() {
        let policy: RoutePolicy = serde_json::from_str(
            r#"{
                "protected": ["/dashboard", "/reports"],
                "pre_auth_only": ["/login"],
                "login_path": "/login",
                "dashboard_path": "/dashboard"
            }"#,
        )
        .unwrap();
        assert_eq!(policy.decide("/reports", false), "/login");
    }

    #[test]
    fn missing_config_fields_take_defaults() {
        let policy: RoutePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy.decide("/dashboard", false), "/login");
    }
}
