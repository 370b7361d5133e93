use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Pagination parameters for the listing endpoints.
///
/// Values arrive as raw strings and are parsed leniently: anything that does
/// not parse as an integer falls back to the default silently, and values
/// below 1 clamp to 1. A malformed `page` must never fail the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Page number (default: 1)
    pub page: Option<String>,
    /// Items per page (default: 10)
    pub per_page: Option<String>,
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        lenient_param(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn per_page(&self) -> u64 {
        lenient_param(self.per_page.as_deref(), DEFAULT_PER_PAGE)
    }
}

fn lenient_param(raw: Option<&str>, default: u64) -> u64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(value) if value >= 1 => value as u64,
        Some(_) => 1,
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, per_page: Option<&str>) -> PaginationParams {
        PaginationParams {
            page: page.map(str::to_string),
            per_page: per_page.map(str::to_string),
        }
    }

    #[test]
    fn missing_values_use_defaults() {
        let p = params(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), 10);
    }

    #[test]
    fn malformed_values_fall_back_silently() {
        let p = params(Some("abc"), Some("1.5"));
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), 10);
    }

    #[test]
    fn below_minimum_clamps_to_one() {
        let p = params(Some("0"), Some("-3"));
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), 1);
    }

    #[test]
    fn valid_values_pass_through() {
        let p = params(Some("7"), Some("25"));
        assert_eq!(p.page(), 7);
        assert_eq!(p.per_page(), 25);
    }
}
