use contracts::dashboards::d400_profit_and_loss::{ProfitAndLoss, ProfitAndLossRequest};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_profit_and_loss::api;
use crate::shared::crud::field_errors;
use crate::shared::export::{export_csv, CsvExportable};
use crate::shared::format::{format_money, format_number, today_iso};
use crate::shared::http::ApiError;
use crate::shared::icons::icon;
use crate::shared::page_context::use_page_context;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_REPORT};
use crate::shared::toast::use_toasts;
use crate::system::auth::use_api;

/// One printed line of the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementLine {
    pub section: &'static str,
    pub label: String,
    pub amount: f64,
    pub total: bool,
}

impl StatementLine {
    fn item(section: &'static str, label: impl Into<String>, amount: f64) -> Self {
        Self {
            section,
            label: label.into(),
            amount,
            total: false,
        }
    }

    fn total(section: &'static str, label: impl Into<String>, amount: f64) -> Self {
        Self {
            total: true,
            ..Self::item(section, label, amount)
        }
    }
}

impl CsvExportable for StatementLine {
    fn headers() -> Vec<&'static str> {
        vec!["Section", "Line", "Amount"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.section.to_string(),
            self.label.clone(),
            format!("{:.2}", self.amount),
        ]
    }
}

/// Statement in reading order: trading, other income, expenses, result.
pub fn statement_lines(pl: &ProfitAndLoss) -> Vec<StatementLine> {
    let mut lines = vec![
        StatementLine::item("Trading", "Revenue", pl.revenue),
        StatementLine::item("Trading", "Cost of goods sold", pl.cost_of_goods),
        StatementLine::total("Trading", "Gross profit", pl.gross_profit),
    ];
    lines.extend(
        pl.other_income
            .iter()
            .map(|(category, amount)| StatementLine::item("Other income", category.as_str(), *amount)),
    );
    lines.push(StatementLine::total("Other income", "Total other income", pl.total_other_income));
    lines.extend(
        pl.expenses
            .iter()
            .map(|(category, amount)| StatementLine::item("Expenses", category.as_str(), *amount)),
    );
    lines.push(StatementLine::total("Expenses", "Total expenses", pl.total_expenses));
    lines.push(StatementLine::total(
        "Result",
        if pl.is_loss() { "Net loss" } else { "Net profit" },
        pl.net_profit,
    ));
    lines
}

fn month_start(today: &str) -> String {
    match today.get(..7) {
        Some(month) => format!("{}-01", month),
        None => today.to_string(),
    }
}

#[component]
pub fn ProfitAndLossReport() -> impl IntoView {
    let client = use_api();
    let toasts = use_toasts();
    use_page_context().set("Profit and loss", None);

    let today = today_iso();
    let date_from = RwSignal::new(month_start(&today));
    let date_to = RwSignal::new(today);
    let report = RwSignal::new(None::<(ProfitAndLossRequest, ProfitAndLoss)>);
    let errors = RwSignal::new(ValidationErrors::new());
    let loading = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);
    let generation = StoredValue::new(0u64);

    let run = move || {
        let request = ProfitAndLossRequest {
            date_from: date_from.get_untracked(),
            date_to: date_to.get_untracked(),
        };
        errors.set(ValidationErrors::new());
        message.set(None);
        if let Err(fields) = api::validate_range(&request) {
            errors.set(fields);
            return;
        }
        let current = generation.get_value() + 1;
        generation.set_value(current);
        loading.set(true);
        let client = client.clone();
        spawn_local(async move {
            let result = api::fetch_profit_and_loss(&client, &request).await;
            // Dates changed and another run started meanwhile
            if generation.try_get_value() != Some(current) {
                return;
            }
            let _ = loading.try_set(false);
            match result {
                Ok(source) => {
                    let _ = report.try_set(Some((request, ProfitAndLoss::compute(&source))));
                }
                Err(ApiError::Unauthorized) => {}
                Err(e) => {
                    log::error!("Profit and loss report failed: {:?}", e);
                    if let Some(fields) = e.field_errors() {
                        let _ = errors.try_set(fields.clone());
                    }
                    let _ = message.try_set(Some(e.user_message()));
                }
            }
        });
    };
    let run = StoredValue::new_local(run);
    run.with_value(|run| run());

    let on_export = move |_| {
        let Some((request, pl)) = report.get_untracked() else {
            return;
        };
        let filename = format!("profit-and-loss_{}_{}.csv", request.date_from, request.date_to);
        if let Err(e) = export_csv(&statement_lines(&pl), &filename) {
            toasts.error(format!("Export failed: {}", e));
        }
    };

    let statement = move || {
        report.get().map(|(_, pl)| {
            let loss = pl.is_loss();
            let margin = format!("{}%", format_number(pl.net_margin_percent, 2));
            let rows = statement_lines(&pl)
                .into_iter()
                .map(|line| {
                    view! {
                        <tr class="table__row" class:table__row--total=line.total>
                            <td class="table__cell">{line.section}</td>
                            <td class="table__cell">{line.label}</td>
                            <td class="table__cell table__cell--number">{format_money(line.amount)}</td>
                        </tr>
                    }
                })
                .collect_view();
            view! {
                <div class="pl-summary">
                    <div class="pl-summary__item">
                        <span class="pl-summary__label">"Gross profit"</span>
                        <span class="pl-summary__value">{format_money(pl.gross_profit)}</span>
                    </div>
                    <div class="pl-summary__item">
                        <span class="pl-summary__label">{if loss { "Net loss" } else { "Net profit" }}</span>
                        <span class="pl-summary__value" class:amount--negative=loss>
                            {format_money(pl.net_profit)}
                        </span>
                    </div>
                    <div class="pl-summary__item">
                        <span class="pl-summary__label">"Net margin"</span>
                        <span class="pl-summary__value">{margin}</span>
                    </div>
                </div>
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Section"</th>
                                <th class="table__header-cell">"Line"</th>
                                <th class="table__header-cell">"Amount"</th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                </div>
            }
        })
    };

    view! {
        <PageFrame page_id=page_id("d400_profit_and_loss", PAGE_CAT_REPORT) category=PAGE_CAT_REPORT>
            <div class="page__header">
                <h2 class="page__title">"Profit and loss"</h2>
            </div>
            <div class="filter-panel">
                <div class="form-group">
                    <label for="pl-date-from">"From"</label>
                    <input
                        type="date"
                        id="pl-date-from"
                        prop:value=move || date_from.get()
                        on:input=move |ev| date_from.set(event_target_value(&ev))
                    />
                    {field_errors(errors, "date_from")}
                </div>
                <div class="form-group">
                    <label for="pl-date-to">"To"</label>
                    <input
                        type="date"
                        id="pl-date-to"
                        prop:value=move || date_to.get()
                        on:input=move |ev| date_to.set(event_target_value(&ev))
                    />
                    {field_errors(errors, "date_to")}
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || loading.get())
                    on_click=move |_| run.with_value(|run| run())
                >
                    {icon("refresh")}
                    "Run"
                </Button>
                <Button
                    disabled=Signal::derive(move || report.with(|r| r.is_none()))
                    on_click=on_export
                >
                    {icon("download")}
                    "Export CSV"
                </Button>
            </div>

            {move || message.get().map(|m| view! { <div class="error">{m}</div> })}
            <Show when=move || loading.get()>
                <div class="page__loading"><Spinner size=SpinnerSize::Tiny />" Loading..."</div>
            </Show>
            {statement}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_profit_and_loss::{CategoryAmount, ProfitAndLossSource};
    use contracts::domain::a003_transaction_category::TransactionKind;

    #[test]
    fn test_statement_lines_order() {
        let pl = ProfitAndLoss::compute(&ProfitAndLossSource {
            revenue: 1_000.0,
            cost_of_goods: 400.0,
            entries: vec![
                CategoryAmount {
                    category: "Rent".into(),
                    kind: TransactionKind::Expense,
                    amount: 700.0,
                },
                CategoryAmount {
                    category: "Interest".into(),
                    kind: TransactionKind::Income,
                    amount: 50.0,
                },
            ],
        });
        let lines = statement_lines(&pl);
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Revenue",
                "Cost of goods sold",
                "Gross profit",
                "Interest",
                "Total other income",
                "Rent",
                "Total expenses",
                "Net loss",
            ]
        );
        assert_eq!(lines.last().map(|l| l.amount), Some(-50.0));
        assert_eq!(lines.iter().filter(|l| l.total).count(), 4);
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start("2024-03-17"), "2024-03-01");
        assert_eq!(month_start("bad"), "bad");
    }

    #[test]
    fn test_statement_csv_row() {
        let line = StatementLine::item("Expenses", "Rent, office", 1200.5);
        assert_eq!(line.to_csv_row(), vec!["Expenses", "Rent, office", "1200.50"]);
    }
}
