use contracts::domain::common::{DocumentStatus, InvoiceDocument};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::service::InvoiceService;
use crate::shared::crud::{Column, Columns};
use crate::shared::format::{format_date, format_money};
use crate::shared::http::ApiError;
use crate::shared::icons::icon;
use crate::shared::toast::use_toasts;
use crate::system::auth::use_api;

pub fn document_status_badge(status: DocumentStatus) -> AnyView {
    let color = match status {
        DocumentStatus::Draft => BadgeColor::Informative,
        DocumentStatus::Completed => BadgeColor::Success,
        DocumentStatus::Cancelled => BadgeColor::Danger,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{status.label()}</Badge> }.into_any()
}

pub fn invoice_columns(party_label: &'static str) -> Columns {
    Columns::new(vec![
        Column::new("invoice_no", "Invoice"),
        Column::new("date", "Date"),
        Column::new("party", party_label),
        Column::hidden("phone", "Phone"),
        Column::new("grand_total", "Total"),
        Column::new("paid", "Paid"),
        Column::new("due", "Due"),
        Column::new("status", "Status"),
    ])
}

pub fn invoice_cell<D: InvoiceDocument>(doc: &D, key: &'static str) -> AnyView {
    match key {
        "invoice_no" => doc.invoice_no().unwrap_or("-").to_string().into_any(),
        "date" => format_date(doc.date()).into_any(),
        "party" => doc.party_name().to_string().into_any(),
        "phone" => doc.party_phone().to_string().into_any(),
        "grand_total" => format_money(doc.totals().grand_total).into_any(),
        "paid" => format_money(doc.totals().paid).into_any(),
        "due" => {
            let due = doc.totals().due;
            view! {
                <span class="amount" class:amount--negative={due > 0.0}>{format_money(due)}</span>
            }
            .into_any()
        }
        "status" => document_status_badge(doc.document_status()),
        _ => ().into_any(),
    }
}

/// Row button downloading the invoice PDF.
pub fn pdf_action<D: InvoiceDocument>(doc: &D) -> AnyView {
    let Some(id) = doc.id() else {
        return ().into_any();
    };
    let file_name = doc.pdf_file_name();
    let service = InvoiceService::<D>::new(use_api());
    let toasts = use_toasts();
    view! {
        <button
            class="button button--ghost"
            title="Download PDF"
            on:click=move |_| {
                let service = service.clone();
                let file_name = file_name.clone();
                spawn_local(async move {
                    match service.download_pdf(id, &file_name).await {
                        Ok(()) => {}
                        Err(ApiError::Unauthorized) => {}
                        Err(e) => toasts.error(e.user_message()),
                    }
                });
            }
        >
            {icon("download")}
        </button>
    }
    .into_any()
}
