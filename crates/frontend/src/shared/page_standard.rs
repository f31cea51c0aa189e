//! Page category constants.
//!
//! Every page declares a DOM `id` of the form `{entity}--{category}` (e.g.
//! `"a001_unit--list"`) and a `data-page-category` with one of the values
//! below, so a page found in the DOM inspector leads straight to its module.

/// Paged table with search.
pub const PAGE_CAT_LIST: &str = "list";

/// Document editor for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Report / summary view.
pub const PAGE_CAT_REPORT: &str = "report";

pub fn page_id(entity: &str, category: &str) -> String {
    format!("{}--{}", entity, category)
}

/// Check the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => {
            !entity.is_empty()
                && [PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_REPORT].contains(&category)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        let id = page_id("a001_unit", PAGE_CAT_LIST);
        assert_eq!(id, "a001_unit--list");
        assert!(is_valid_page_id(&id));
        assert!(!is_valid_page_id("a001_unit"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_unit--other"));
    }
}
