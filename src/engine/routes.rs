use std::time::Duration;

/// Page routes of the front end.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Payments,
    Transactions,
    Profile,
    Settings,
    FingerprintScan,
    PalmVeinScan,
    NotFound
}

impl Route {
    pub const ALL: [Route; 11] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Payments,
        Route::Transactions,
        Route::Profile,
        Route::Settings,
        Route::FingerprintScan,
        Route::PalmVeinScan,
        Route::NotFound
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Payments => "/payments",
            Route::Transactions => "/transactions",
            Route::Profile => "/profile",
            Route::Settings => "/settings",
            Route::FingerprintScan => "/fingerprint-scan",
            Route::PalmVeinScan => "/palm-vein-scan",
            Route::NotFound => "*"
        }
    }

    /// Resolves a location, ignoring any query string. Unknown paths fall back to `NotFound`.
    pub fn from_path(location: &str) -> Route {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed
        };

        Route::ALL.into_iter()
            .find(|route| *route != Route::NotFound && route.path() == path)
            .unwrap_or(Route::NotFound)
    }
}

/// A navigation scheduled after a flow completes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Redirect {
    pub route: Route,
    pub after: Duration
}
