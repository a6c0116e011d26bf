//! The application's route URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page showing summary cards, the revenue chart and the latest
/// invoices.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for searching and paging through invoices.
pub const INVOICES_VIEW: &str = "/invoices";
/// The page for searching customers and their invoice totals.
pub const CUSTOMERS_VIEW: &str = "/customers";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

// These tests are here so that we know when we call `Uri::from_shared` it
// will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INVOICES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMERS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }
}
