use chrono::NaiveDate;
use contracts::dashboards::d400_profit_and_loss::{ProfitAndLossRequest, ProfitAndLossSource};
use contracts::shared::validation::ValidationErrors;

use crate::shared::http::{ApiClient, ApiError};

const REPORT_PATH: &str = "/api/reports/profit-and-loss";

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Both dates present and in order.
pub fn validate_range(request: &ProfitAndLossRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let from = parse_date(&request.date_from);
    let to = parse_date(&request.date_to);
    if from.is_none() {
        errors.add("date_from", "Start date is required");
    }
    if to.is_none() {
        errors.add("date_to", "End date is required");
    }
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            errors.add("date_to", "End date must not be before start date");
        }
    }
    errors.into_result()
}

pub fn report_path(request: &ProfitAndLossRequest) -> String {
    match serde_qs::to_string(request) {
        Ok(qs) => format!("{}?{}", REPORT_PATH, qs),
        Err(e) => {
            log::warn!("Failed to encode report query: {}", e);
            REPORT_PATH.to_string()
        }
    }
}

pub async fn fetch_profit_and_loss(
    client: &ApiClient,
    request: &ProfitAndLossRequest,
) -> Result<ProfitAndLossSource, ApiError> {
    validate_range(request).map_err(ApiError::Invalid)?;
    client.get(&report_path(request)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(from: &str, to: &str) -> ProfitAndLossRequest {
        ProfitAndLossRequest {
            date_from: from.into(),
            date_to: to.into(),
        }
    }

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path(&request("2024-01-01", "2024-01-31")),
            "/api/reports/profit-and-loss?date_from=2024-01-01&date_to=2024-01-31"
        );
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(&request("2024-01-01", "2024-01-01")).is_ok());

        let errors = validate_range(&request("2024-02-01", "2024-01-01")).unwrap_err();
        assert_eq!(errors.field("date_to").len(), 1);

        let errors = validate_range(&request("", "01/02/2024")).unwrap_err();
        assert_eq!(errors.field("date_from").len(), 1);
        assert_eq!(errors.field("date_to").len(), 1);
    }
}
