//! Signed-in user context and the route guard built on it.
//!
//! The session is created once at startup and handed to whatever needs it;
//! nothing reads it through global state.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub display_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Session for `display_name`; blank names produce a signed-out session
    pub fn for_user(display_name: Option<&str>) -> Self {
        let mut session = Self::default();
        if let Some(name) = display_name {
            session.sign_in(name);
        }
        session
    }

    /// Returns false (and stays signed out) when the name is blank
    pub fn sign_in(&mut self, display_name: &str) -> bool {
        let name = display_name.trim();
        if name.is_empty() {
            return false;
        }
        self.user = Some(SessionUser {
            display_name: name.to_string(),
            email: None,
        });
        tracing::info!(user = name, "signed in");
        true
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.display_name, "signed out");
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.display_name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    Profile,
    Diet,
    Progress,
    Blog,
}

impl Route {
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Root | Route::Login | Route::Register)
    }

    /// Where a request for `self` actually lands given the session
    pub fn resolve(self, session: &Session) -> Route {
        match (session.is_signed_in(), self) {
            (false, route) if route.is_protected() => Route::Login,
            (false, Route::Root) => Route::Login,
            (true, Route::Root | Route::Login | Route::Register) => Route::Dashboard,
            (_, route) => route,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Profile => "/profile",
            Route::Diet => "/diet",
            Route::Progress => "/progress",
            Route::Blog => "/blog",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Route; 8] = [
        Route::Root,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Profile,
        Route::Diet,
        Route::Progress,
        Route::Blog,
    ];

    #[test]
    fn signed_out_users_land_on_login_or_register() {
        let session = Session::signed_out();
        for route in ALL {
            let landed = route.resolve(&session);
            assert!(matches!(landed, Route::Login | Route::Register), "{route:?} -> {landed:?}");
        }
        assert_eq!(Route::Register.resolve(&session), Route::Register);
    }

    #[test]
    fn signed_in_users_skip_auth_pages() {
        let session = Session::for_user(Some("Ana"));
        assert_eq!(Route::Login.resolve(&session), Route::Dashboard);
        assert_eq!(Route::Register.resolve(&session), Route::Dashboard);
        assert_eq!(Route::Root.resolve(&session), Route::Dashboard);
        assert_eq!(Route::Blog.resolve(&session), Route::Blog);
    }

    #[test]
    fn blank_name_does_not_sign_in() {
        let mut session = Session::for_user(Some("   "));
        assert!(!session.is_signed_in());
        assert!(session.sign_in("Kai"));
        assert_eq!(session.display_name(), Some("Kai"));
        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn paths_are_distinct() {
        let mut paths: Vec<&str> = ALL.iter().map(|r| r.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), ALL.len());
    }
}
