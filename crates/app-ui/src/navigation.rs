//! Routes and navigation for StayHub
//!
//! This module provides:
//! - Route definitions for guest, account, partner and admin pages
//! - A path router with query-string support
//! - Header navigation actions derived from auth presence
//!
//! Navigation itself belongs to the host router. The path produced by
//! [`Route::to_path`] is what the page-transition sequencer compares.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::booking::StayDates;

/// Parameters for a route
pub type RouteParams = HashMap<String, String>;

/// Route parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Date not in `YYYY-MM-DD` form
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Check-out not after check-in
    #[error("Invalid stay: check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange {
        /// Requested check-in
        check_in: String,
        /// Requested check-out
        check_out: String,
    },

    /// Guest count not a positive integer
    #[error("Invalid guest count: {0}")]
    InvalidGuests(String),
}

// =============================================================================
// Audiences
// =============================================================================

/// Who a page is built for; decides which shell renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Anonymous or signed-in guests browsing and booking
    #[default]
    Guest,
    /// Signed-in guest account pages
    Account,
    /// Hosts managing their properties
    Partner,
    /// Platform administrators
    Admin,
}

// =============================================================================
// Route Definitions
// =============================================================================

/// All routes in the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    /// Landing page
    #[default]
    Home,
    /// Property search
    Search {
        /// Destination text
        #[serde(skip_serializing_if = "Option::is_none")]
        destination: Option<String>,
        /// Requested stay
        #[serde(skip_serializing_if = "Option::is_none")]
        dates: Option<StayDates>,
        /// Number of guests
        #[serde(skip_serializing_if = "Option::is_none")]
        guests: Option<u32>,
    },
    /// Property detail
    Property {
        /// Property identifier
        id: String,
    },
    /// Checkout
    Checkout {
        /// Property being booked
        #[serde(skip_serializing_if = "Option::is_none")]
        property_id: Option<String>,
    },
    /// Log in
    Login,
    /// Create account
    Register,
    /// Account overview
    Account,
    /// The guest's bookings
    Bookings,
    /// One booking
    BookingDetail {
        /// Booking identifier
        id: String,
    },
    /// Partner dashboard
    PartnerDashboard,
    /// Partner property list
    PartnerProperties,
    /// Partner reservations
    PartnerReservations,
    /// Admin dashboard
    AdminDashboard,
    /// Admin user management
    AdminUsers,
    /// Admin property moderation
    AdminProperties,
    /// Not found
    NotFound,
}

impl Route {
    /// Get the URL path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { destination, dates, guests } => {
                let mut params = vec![];
                if let Some(destination) = destination {
                    params.push(format!("destination={}", urlencoding::encode(destination)));
                }
                if let Some(dates) = dates {
                    params.push(format!("check_in={}", dates.check_in));
                    params.push(format!("check_out={}", dates.check_out));
                }
                if let Some(guests) = guests {
                    params.push(format!("guests={}", guests));
                }
                with_query("/search", &params)
            }
            Route::Property { id } => format!("/properties/{}", urlencoding::encode(id)),
            Route::Checkout { property_id } => {
                let params: Vec<String> = property_id
                    .iter()
                    .map(|id| format!("property={}", urlencoding::encode(id)))
                    .collect();
                with_query("/checkout", &params)
            }
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Account => "/account".to_string(),
            Route::Bookings => "/account/bookings".to_string(),
            Route::BookingDetail { id } => {
                format!("/account/bookings/{}", urlencoding::encode(id))
            }
            Route::PartnerDashboard => "/partner".to_string(),
            Route::PartnerProperties => "/partner/properties".to_string(),
            Route::PartnerReservations => "/partner/reservations".to_string(),
            Route::AdminDashboard => "/admin".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminProperties => "/admin/properties".to_string(),
            Route::NotFound => "/not-found".to_string(),
        }
    }

    /// Which shell renders this route
    pub fn audience(&self) -> Audience {
        match self {
            Route::Account | Route::Bookings | Route::BookingDetail { .. } => Audience::Account,
            Route::PartnerDashboard | Route::PartnerProperties | Route::PartnerReservations => {
                Audience::Partner
            }
            Route::AdminDashboard | Route::AdminUsers | Route::AdminProperties => Audience::Admin,
            _ => Audience::Guest,
        }
    }

    /// Check if this route requires a stored access token
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Checkout { .. })
            || self.audience() != Audience::Guest
    }

    /// Get a display title for this route
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Search { .. } => "Search",
            Route::Property { .. } => "Property",
            Route::Checkout { .. } => "Checkout",
            Route::Login => "Log In",
            Route::Register => "Sign Up",
            Route::Account => "My Account",
            Route::Bookings => "My Bookings",
            Route::BookingDetail { .. } => "Booking",
            Route::PartnerDashboard => "Partner Dashboard",
            Route::PartnerProperties => "My Properties",
            Route::PartnerReservations => "Reservations",
            Route::AdminDashboard => "Admin Dashboard",
            Route::AdminUsers => "Users",
            Route::AdminProperties => "Properties",
            Route::NotFound => "Not Found",
        }
    }
}

fn with_query(path: &str, params: &[String]) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params.join("&"))
    }
}

// =============================================================================
// Navigation Actions
// =============================================================================

/// Header action shown in the guest and account shells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    /// Go to the login page
    LogIn,
    /// Go to the registration page
    SignUp,
    /// Go to the booking list
    MyBookings,
    /// Clear the token
    LogOut,
}

impl NavAction {
    /// Actions for the current auth presence
    pub fn for_presence(is_present: bool) -> Vec<NavAction> {
        if is_present {
            vec![NavAction::MyBookings, NavAction::LogOut]
        } else {
            vec![NavAction::LogIn, NavAction::SignUp]
        }
    }

    /// Message id of the action label
    pub fn message_id(&self) -> &'static str {
        match self {
            NavAction::LogIn => "nav-log-in",
            NavAction::SignUp => "nav-sign-up",
            NavAction::MyBookings => "nav-my-bookings",
            NavAction::LogOut => "nav-log-out",
        }
    }

    /// Route the action leads to, if it navigates
    pub fn target(&self) -> Option<Route> {
        match self {
            NavAction::LogIn => Some(Route::Login),
            NavAction::SignUp => Some(Route::Register),
            NavAction::MyBookings => Some(Route::Bookings),
            NavAction::LogOut => None,
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Route pattern for matching
struct RoutePattern {
    segments: Vec<PatternSegment>,
    builder: fn(RouteParams) -> Option<Route>,
}

/// Pattern segment
enum PatternSegment {
    /// Literal segment
    Literal(String),
    /// Parameter segment
    Param(String),
}

/// URL Router for parsing paths to routes
pub struct Router {
    patterns: Vec<RoutePattern>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("patterns", &self.patterns.len()).finish()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new router with all routes
    pub fn new() -> Self {
        let mut router = Self { patterns: Vec::new() };

        // Guest
        router.add_route("/", |_| Some(Route::Home));
        router.add_route("/home", |_| Some(Route::Home));
        router.add_route("/search", |params| {
            Some(Route::Search {
                destination: params.get("destination").filter(|d| !d.is_empty()).cloned(),
                dates: search_dates(&params),
                guests: params.get("guests").and_then(|g| parse_guests(g).ok()),
            })
        });
        router.add_route("/properties/:id", |params| {
            Some(Route::Property { id: params.get("id")?.clone() })
        });
        router.add_route("/checkout", |params| {
            Some(Route::Checkout { property_id: params.get("property").cloned() })
        });
        router.add_route("/login", |_| Some(Route::Login));
        router.add_route("/register", |_| Some(Route::Register));

        // Account
        router.add_route("/account", |_| Some(Route::Account));
        router.add_route("/account/bookings", |_| Some(Route::Bookings));
        router.add_route("/account/bookings/:id", |params| {
            Some(Route::BookingDetail { id: params.get("id")?.clone() })
        });

        // Partner
        router.add_route("/partner", |_| Some(Route::PartnerDashboard));
        router.add_route("/partner/properties", |_| Some(Route::PartnerProperties));
        router.add_route("/partner/reservations", |_| Some(Route::PartnerReservations));

        // Admin
        router.add_route("/admin", |_| Some(Route::AdminDashboard));
        router.add_route("/admin/users", |_| Some(Route::AdminUsers));
        router.add_route("/admin/properties", |_| Some(Route::AdminProperties));

        router
    }

    /// Add a route pattern
    fn add_route(&mut self, pattern: &str, builder: fn(RouteParams) -> Option<Route>) {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(param) = s.strip_prefix(':') {
                    PatternSegment::Param(param.to_string())
                } else {
                    PatternSegment::Literal(s.to_string())
                }
            })
            .collect();

        self.patterns.push(RoutePattern { segments, builder });
    }

    /// Match a path to a route
    pub fn match_path(&self, path: &str) -> Route {
        let (pathname, query) = match path.split_once('?') {
            Some((pathname, query)) => (pathname, Some(query)),
            None => (path, None),
        };

        let path_segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        for pattern in &self.patterns {
            if let Some(params) = self.match_pattern(&pattern.segments, &path_segments, query) {
                if let Some(route) = (pattern.builder)(params) {
                    return route;
                }
            }
        }

        tracing::debug!(path, "no route matched");
        Route::NotFound
    }

    /// Match a pattern against path segments
    fn match_pattern(
        &self,
        pattern: &[PatternSegment],
        path: &[&str],
        query: Option<&str>,
    ) -> Option<RouteParams> {
        if pattern.len() != path.len() {
            return None;
        }

        let mut params = RouteParams::new();

        for (segment, actual) in pattern.iter().zip(path.iter()) {
            match segment {
                PatternSegment::Literal(expected) => {
                    if expected != *actual {
                        return None;
                    }
                }
                PatternSegment::Param(name) => {
                    params.insert(name.clone(), urlencoding::decode(actual).ok()?.into_owned());
                }
            }
        }

        self.parse_query(query, &mut params);

        Some(params)
    }

    /// Parse query string into params
    fn parse_query(&self, query: Option<&str>, params: &mut RouteParams) {
        let Some(query) = query else {
            return;
        };
        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                if let Ok(decoded) = urlencoding::decode(&value.replace('+', " ")) {
                    params.insert(key.to_string(), decoded.into_owned());
                }
            }
        }
    }
}

fn search_dates(params: &RouteParams) -> Option<StayDates> {
    let (check_in, check_out) = (params.get("check_in")?, params.get("check_out")?);
    match StayDates::parse(check_in, check_out) {
        Ok(dates) => Some(dates),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring search dates");
            None
        }
    }
}

fn parse_guests(s: &str) -> Result<u32, RouteError> {
    match s.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RouteError::InvalidGuests(s.to_string())),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_to_path() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::Checkout { property_id: None }.to_path(), "/checkout");
        assert_eq!(Route::PartnerReservations.to_path(), "/partner/reservations");
        assert_eq!(
            Route::BookingDetail { id: "bk_42".to_string() }.to_path(),
            "/account/bookings/bk_42"
        );
    }

    #[test]
    fn test_search_to_path() {
        let route = Route::Search {
            destination: Some("Jeju City".to_string()),
            dates: Some(StayDates::parse("2026-11-01", "2026-11-03").unwrap()),
            guests: Some(2),
        };
        assert_eq!(
            route.to_path(),
            "/search?destination=Jeju%20City&check_in=2026-11-01&check_out=2026-11-03&guests=2"
        );
    }

    #[test]
    fn test_route_audience() {
        assert_eq!(Route::Home.audience(), Audience::Guest);
        assert_eq!(Route::Bookings.audience(), Audience::Account);
        assert_eq!(Route::PartnerProperties.audience(), Audience::Partner);
        assert_eq!(Route::AdminUsers.audience(), Audience::Admin);
    }

    #[test]
    fn test_route_requires_auth() {
        assert!(!Route::Home.requires_auth());
        assert!(!Route::Login.requires_auth());
        assert!(Route::Checkout { property_id: None }.requires_auth());
        assert!(Route::Account.requires_auth());
        assert!(Route::AdminDashboard.requires_auth());
    }

    #[test]
    fn test_route_default_is_home() {
        assert_eq!(Route::default(), Route::Home);
    }

    #[test]
    fn test_router_match_home() {
        let router = Router::new();
        assert_eq!(router.match_path("/"), Route::Home);
        assert_eq!(router.match_path("/home"), Route::Home);
    }

    #[test]
    fn test_router_match_params() {
        let router = Router::new();
        assert_eq!(
            router.match_path("/properties/seoul%20loft"),
            Route::Property { id: "seoul loft".to_string() }
        );
        assert_eq!(
            router.match_path("/checkout?property=p_7"),
            Route::Checkout { property_id: Some("p_7".to_string()) }
        );
    }

    #[test]
    fn test_router_match_search_with_query() {
        let router = Router::new();
        let route = router.match_path(
            "/search?destination=New+York&check_in=2026-12-24&check_out=2026-12-27&guests=3",
        );
        match route {
            Route::Search { destination, dates, guests } => {
                assert_eq!(destination.as_deref(), Some("New York"));
                assert_eq!(dates.unwrap().nights(), 3);
                assert_eq!(guests, Some(3));
            }
            other => panic!("Expected search route, got {:?}", other),
        }
    }

    #[test]
    fn test_router_ignores_bad_search_params() {
        let router = Router::new();
        let route =
            router.match_path("/search?check_in=2026-12-27&check_out=2026-12-24&guests=0");
        assert_eq!(route, Route::Search { destination: None, dates: None, guests: None });
    }

    #[test]
    fn test_router_round_trip_paths() {
        let router = Router::new();
        for route in [
            Route::Home,
            Route::Account,
            Route::Bookings,
            Route::PartnerDashboard,
            Route::AdminProperties,
            Route::BookingDetail { id: "bk 1".to_string() },
        ] {
            assert_eq!(router.match_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_router_not_found() {
        let router = Router::new();
        assert_eq!(router.match_path("/nonexistent/path"), Route::NotFound);
    }

    #[test]
    fn test_parse_guests() {
        assert_eq!(parse_guests("4"), Ok(4));
        assert_eq!(parse_guests("0"), Err(RouteError::InvalidGuests("0".to_string())));
        assert!(parse_guests("two").is_err());
    }

    #[test]
    fn test_nav_actions_follow_presence() {
        assert_eq!(NavAction::for_presence(false), vec![NavAction::LogIn, NavAction::SignUp]);
        assert_eq!(NavAction::for_presence(true), vec![NavAction::MyBookings, NavAction::LogOut]);
        assert_eq!(NavAction::MyBookings.target(), Some(Route::Bookings));
        assert_eq!(NavAction::LogOut.target(), None);
    }

    #[test]
    fn test_route_serialization() {
        let route = Route::Property { id: "p_1".to_string() };
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(json, r#"{"route":"Property","params":{"id":"p_1"}}"#);

        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(back, route);
    }

    #[test]
    fn test_route_title() {
        assert_eq!(Route::Home.title(), "Home");
        assert_eq!(Route::PartnerDashboard.title(), "Partner Dashboard");
    }
}
