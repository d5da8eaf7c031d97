pub mod job_description;
pub mod pdf;
pub mod score;
pub mod text;

use serde::Deserialize;

use crate::errors::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// `?limit=&offset=` query parameters shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    /// Returns `(limit, offset)` with defaults applied, or a validation error.
    pub fn resolve(&self) -> Result<(i64, i64), AppError> {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = self.offset.unwrap_or(0);
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"
            )));
        }
        if offset < 0 {
            return Err(AppError::Validation(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        Ok((limit, offset))
    }
}

/// Rejects blank strings and strings longer than `max_chars`.
pub fn require_text(field: &str, value: &str, max_chars: Option<usize>) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if let Some(max) = max_chars {
        let len = value.chars().count();
        if len > max {
            return Err(AppError::Validation(format!(
                "{field} must be at most {max} characters, got {len}"
            )));
        }
    }
    Ok(())
}

/// `%query%` for a case-insensitive `ILIKE` substring match, wildcards escaped.
pub fn contains_pattern(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 2);
    out.push('%');
    for c in query.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(Pagination::default().resolve().unwrap(), (10, 0));
    }

    #[test]
    fn test_pagination_rejects_out_of_range_limit() {
        for limit in [0, -1, 101] {
            let p = Pagination {
                limit: Some(limit),
                offset: None,
            };
            assert!(matches!(p.resolve(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_pagination_rejects_negative_offset() {
        let p = Pagination {
            limit: Some(5),
            offset: Some(-3),
        };
        assert!(matches!(p.resolve(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_require_text_counts_chars_not_bytes() {
        // four chars, eight bytes
        assert!(require_text("name", "éééé", Some(4)).is_ok());
        assert!(require_text("name", "ééééé", Some(4)).is_err());
        assert!(require_text("name", "   ", None).is_err());
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern(" 100%_rust\\ "), "%100\\%\\_rust\\\\%");
        assert_eq!(contains_pattern("data engineer"), "%data engineer%");
    }
}
