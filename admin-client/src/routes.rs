//! Navigation targets and the authentication guard

use std::fmt;

use crate::session::Session;

/// Every page of the admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Products,
    CreateProduct,
    Blogs,
    CreateBlog,
    Category,
    Material,
    Size,
    Profile,
    Contact,
    Login,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 12] = [
        Route::Dashboard,
        Route::Products,
        Route::CreateProduct,
        Route::Blogs,
        Route::CreateBlog,
        Route::Category,
        Route::Material,
        Route::Size,
        Route::Profile,
        Route::Contact,
        Route::Login,
        Route::NotFound,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Products => "/products",
            Route::CreateProduct => "/create-product",
            Route::Blogs => "/blogs",
            Route::CreateBlog => "/create-blog",
            Route::Category => "/category",
            Route::Material => "/material",
            Route::Size => "/size",
            Route::Profile => "/profile",
            Route::Contact => "/contact",
            Route::Login => "/auth/login",
            Route::NotFound => "/auth/404",
        }
    }

    /// Resolve a path; unknown paths land on the 404 page
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == normalized)
            .unwrap_or(Route::NotFound)
    }

    /// Pages reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::NotFound)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of guarding a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Decide what a navigation to `route` shows.
///
/// Protected pages redirect to login without a session. The login page
/// sends an authenticated admin to the dashboard and otherwise renders, so
/// the guard never loops.
pub fn guard(route: Route, session: &Session) -> Navigation {
    match route {
        Route::Login if session.is_authenticated => Navigation::Redirect(Route::Dashboard),
        r if r.is_public() => Navigation::Render(r),
        r if session.is_authenticated => Navigation::Render(r),
        _ => Navigation::Redirect(Route::Login),
    }
}
