use contracts::domain::a002_payment_method::PaymentMethod;
use contracts::domain::a007_product::Product;
use contracts::domain::common::{CrudEntity, EntityId, InvoiceDocument, InvoiceParty};
use contracts::shared::invoice::{InvoiceLine, InvoicePayment, InvoiceTotals};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::list::document_status_badge;
use super::service::{phone_lookup_query, InvoiceService};
use crate::shared::crud::field_errors;
use crate::shared::crud::flows::SaveOutcome;
use crate::shared::format::{format_money, parse_amount, today_iso};
use crate::shared::http::ApiError;
use crate::shared::icons::icon;
use crate::shared::lookup::{to_options, use_lookup};
use crate::shared::modal::{use_modal, ModalHandle};
use crate::shared::page_context::use_page_context;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toasts;
use crate::system::auth::use_api;

fn editor_title<D: InvoiceDocument>(doc: &D) -> String {
    match doc.invoice_no() {
        Some(no) => format!("{} {}", D::element_name(), no),
        None => format!("New {}", D::element_name().to_lowercase()),
    }
}

/// Full-page editor for one sale or purchase invoice.
///
/// Typing a phone number looks the party up and fills it in; totals follow
/// every edit. Saved invoices can be cancelled with a reason and downloaded
/// as PDF.
#[component]
pub fn InvoiceEditor<D>(
    id: Option<EntityId>,
    on_close: Callback<()>,
    #[prop(optional)] _marker: std::marker::PhantomData<D>,
) -> impl IntoView
where
    D: InvoiceDocument,
{
    let service = StoredValue::new(InvoiceService::<D>::new(use_api()));
    let toasts = use_toasts();
    let modal = use_modal();
    let page_ctx = use_page_context();

    let draft = RwSignal::new(D::create_new());
    let errors = RwSignal::new(ValidationErrors::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);
    let party_hint = RwSignal::new(None::<String>);
    let lookup_generation = StoredValue::new(0u64);

    let products = use_lookup::<Product>();
    let methods = use_lookup::<PaymentMethod>();
    let parties = use_lookup::<D::Party>();

    let totals = Memo::new(move |_| draft.with(|d| d.totals()));
    let editable = Signal::derive(move || draft.with(|d| d.is_editable()) && !loading.get());

    let load = move || {
        let Some(id) = id else {
            draft.update(|d| d.set_date(today_iso()));
            page_ctx.set(&draft.with_untracked(editor_title::<D>), None);
            return;
        };
        loading.set(true);
        let svc = service.get_value();
        spawn_local(async move {
            match svc.load(id).await {
                Ok(doc) => {
                    page_ctx.set(&editor_title(&doc), None);
                    let _ = draft.try_set(doc);
                }
                Err(e) => {
                    log::error!("Failed to load {} {}: {:?}", D::element_name(), id, e);
                    let _ = message.try_set(Some(e.user_message()));
                }
            }
            let _ = loading.try_set(false);
        });
    };
    load();

    let on_phone_input = move |phone: String| {
        draft.update(|d| d.set_party_phone(phone.clone()));
        let generation = lookup_generation.get_value() + 1;
        lookup_generation.set_value(generation);
        if phone_lookup_query(&phone).is_none() {
            party_hint.set(None);
            return;
        }
        let svc = service.get_value();
        spawn_local(async move {
            let result = svc.find_party(&phone).await;
            // A newer keystroke has started its own lookup
            if lookup_generation.try_get_value() != Some(generation) {
                return;
            }
            match result {
                Ok(Some(party)) => {
                    let _ = party_hint.try_set(Some(format!("Found: {}", party.name())));
                    draft.update(|d| d.assign_party(&party));
                }
                Ok(None) => {
                    let _ = party_hint.try_set(Some(format!(
                        "No {} with this phone. Pick one from the list.",
                        D::party_label().to_lowercase()
                    )));
                    draft.update(|d| d.clear_party());
                }
                Err(e) => log::warn!("{} lookup failed: {:?}", D::party_label(), e),
            }
        });
    };

    let on_party_select = move |value: String| {
        let chosen = value
            .parse::<EntityId>()
            .ok()
            .and_then(|id| parties.with(|list| list.iter().find(|p| p.id() == Some(id)).cloned()));
        draft.update(|d| match &chosen {
            Some(party) => d.assign_party(party),
            None => d.clear_party(),
        });
        party_hint.set(None);
    };

    let on_save = move |_| {
        let doc = draft.get_untracked();
        saving.set(true);
        message.set(None);
        errors.set(ValidationErrors::new());
        let svc = service.get_value();
        spawn_local(async move {
            let result = svc.save(&doc).await;
            let _ = saving.try_set(false);
            match result {
                Ok(outcome) => {
                    let verb = match outcome {
                        SaveOutcome::Created => "created",
                        SaveOutcome::Updated => "updated",
                    };
                    toasts.success(format!("{} {}.", D::element_name(), verb));
                    on_close.run(());
                }
                Err(e) => {
                    if let Some(fields) = e.field_errors() {
                        let _ = errors.try_set(fields.clone());
                    }
                    if !matches!(e, ApiError::Unauthorized) {
                        let _ = message.try_set(Some(e.user_message()));
                    }
                }
            }
        });
    };

    let on_pdf = move |_| {
        let Some(id) = id else { return };
        let file_name = draft.with_untracked(|d| d.pdf_file_name());
        let svc = service.get_value();
        spawn_local(async move {
            match svc.download_pdf(id, &file_name).await {
                Ok(()) | Err(ApiError::Unauthorized) => {}
                Err(e) => toasts.error(e.user_message()),
            }
        });
    };

    let on_cancel_invoice = move |_| {
        let Some(id) = id else { return };
        let on_cancelled = Callback::new(move |_| load());
        modal.open(Some("cancel-invoice-modal"), move |handle| {
            view! { <CancelDialog<D> id=id service=service handle=handle on_cancelled=on_cancelled /> }
                .into_any()
        });
    };

    let party_options = Signal::derive(move || parties.with(|list| to_options(list)));
    let product_options = Signal::derive(move || products.with(|list| to_options(list)));
    let method_options = Signal::derive(move || methods.with(|list| to_options(list)));

    let line_count = move || draft.with(|d| d.lines().len());
    let payment_count = move || draft.with(|d| d.payments().len());

    let frame_id = page_id(
        &format!("{}_{}", D::aggregate_index(), D::element_name().to_lowercase()),
        PAGE_CAT_DETAIL,
    );

    view! {
        <PageFrame page_id=frame_id category=PAGE_CAT_DETAIL>
            <div class="details-container invoice-editor">
                <div class="details-header">
                    <h3>{move || draft.with(editor_title::<D>)}</h3>
                    {move || draft.with(|d| d.id().is_some().then(|| document_status_badge(d.document_status())))}
                    <div class="details-header__actions">
                        <Show when=move || id.is_some()>
                            <Button appearance=ButtonAppearance::Secondary on_click=on_pdf>
                                {icon("download")}
                                "PDF"
                            </Button>
                        </Show>
                        <Show when=move || id.is_some() && draft.with(|d| d.document_status().can_cancel())>
                            <Button appearance=ButtonAppearance::Secondary on_click=on_cancel_invoice>
                                "Cancel invoice"
                            </Button>
                        </Show>
                    </div>
                </div>

                {move || message.get().map(|m| view! { <div class="error">{m}</div> })}
                {move || draft.with(|d| d.cancel_reason().map(|reason| view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{format!("Cancelled: {}", reason)}</span>
                    </div>
                }))}
                <Show when=move || loading.get()>
                    <div class="invoice-editor__loading"><Spinner size=SpinnerSize::Tiny />" Loading..."</div>
                </Show>

                <div class="details-form invoice-editor__header">
                    <div class="form-group">
                        <label for="invoice-phone">{format!("{} phone", D::party_label())}</label>
                        <input
                            type="tel"
                            id="invoice-phone"
                            placeholder="Type a phone number to look up"
                            disabled=move || !editable.get()
                            prop:value=move || draft.with(|d| d.party_phone().to_string())
                            on:input=move |ev| on_phone_input(event_target_value(&ev))
                        />
                        {move || party_hint.get().map(|hint| view! { <div class="form-group__hint">{hint}</div> })}
                    </div>

                    <div class="form-group">
                        <label for="invoice-party">{D::party_label()}</label>
                        <select
                            id="invoice-party"
                            disabled=move || !editable.get()
                            on:change=move |ev| on_party_select(event_target_value(&ev))
                        >
                            <option value="" selected=move || draft.with(|d| d.party_id().is_none())>
                                "-- Select --"
                            </option>
                            {move || {
                                let current = draft.with(|d| d.party_id());
                                party_options
                                    .get()
                                    .into_iter()
                                    .map(|(value, text)| view! {
                                        <option value=value.to_string() selected=current == Some(value)>{text}</option>
                                    })
                                    .collect_view()
                            }}
                        </select>
                        {field_errors(errors, D::party_field())}
                    </div>

                    <div class="form-group">
                        <label for="invoice-date">"Date"</label>
                        <input
                            type="date"
                            id="invoice-date"
                            disabled=move || !editable.get()
                            prop:value=move || draft.with(|d| d.date().to_string())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.set_date(value));
                            }
                        />
                        {field_errors(errors, D::date_field())}
                    </div>
                </div>

                <h4 class="invoice-editor__section">"Items"</h4>
                <div class="table">
                    <table class="table__data table--striped invoice-lines">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Product"</th>
                                <th class="table__header-cell">"Qty"</th>
                                <th class="table__header-cell">"Price"</th>
                                <th class="table__header-cell">"Disc. %"</th>
                                <th class="table__header-cell">"Tax %"</th>
                                <th class="table__header-cell">"Total"</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || 0..line_count()
                                key=|index| *index
                                children=move |index| line_row(draft, index, products, product_options, editable)
                            />
                        </tbody>
                    </table>
                </div>
                {field_errors(errors, "lines")}
                <Show when=move || editable.get()>
                    <Button
                        size=ButtonSize::Small
                        on_click=move |_| draft.update(|d| d.lines_mut().push(InvoiceLine::blank()))
                    >
                        {icon("plus")}
                        "Add item"
                    </Button>
                </Show>

                <h4 class="invoice-editor__section">"Payments"</h4>
                <div class="table">
                    <table class="table__data table--striped invoice-payments">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Method"</th>
                                <th class="table__header-cell">"Amount"</th>
                                <th class="table__header-cell">"Date"</th>
                                <th class="table__header-cell">"Note"</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || payment_count() == 0>
                                <tr>
                                    <td class="table__cell table__cell--empty" colspan="5">"No payments yet"</td>
                                </tr>
                            </Show>
                            <For
                                each=move || 0..payment_count()
                                key=|index| *index
                                children=move |index| payment_row(draft, index, method_options, editable)
                            />
                        </tbody>
                    </table>
                </div>
                {field_errors(errors, "payments")}
                <Show when=move || editable.get()>
                    <Button
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || totals.with(|t| t.is_settled()))
                        on_click=move |_| {
                            let method = method_options.with_untracked(|options| options.first().map(|(id, _)| *id));
                            draft.update(|d| {
                                d.add_payment(method, today_iso());
                            });
                        }
                    >
                        {icon("plus")}
                        "Add payment"
                    </Button>
                </Show>

                <div class="invoice-editor__footer">
                    <div class="form-group invoice-editor__note">
                        <label for="invoice-note">"Note"</label>
                        <textarea
                            id="invoice-note"
                            rows="3"
                            disabled=move || !editable.get()
                            prop:value=move || draft.with(|d| d.note().to_string())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.set_note(value));
                            }
                        ></textarea>
                    </div>
                    {totals_panel(draft, totals, editable)}
                </div>

                <div class="details-actions">
                    <Show when=move || editable.get()>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || saving.get())
                            on_click=on_save
                        >
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </Button>
                    </Show>
                    <Button on_click=move |_| on_close.run(())>"Close"</Button>
                </div>
            </div>
        </PageFrame>
    }
}

fn line_row<D: InvoiceDocument>(
    draft: RwSignal<D>,
    index: usize,
    products: RwSignal<Vec<Product>>,
    product_options: Signal<Vec<(EntityId, String)>>,
    editable: Signal<bool>,
) -> impl IntoView {
    let read = move |f: fn(&InvoiceLine) -> f64| {
        draft.with(|d| d.lines().get(index).map(f).unwrap_or_default())
    };
    let write = move |f: fn(&mut InvoiceLine, f64), value: f64| {
        draft.update(|d| {
            if let Some(line) = d.lines_mut().get_mut(index) {
                f(line, value);
            }
        });
    };
    let number_cell = move |get: fn(&InvoiceLine) -> f64, set: fn(&mut InvoiceLine, f64)| {
        view! {
            <td class="table__cell">
                <input
                    type="number"
                    step="any"
                    class="table__input"
                    disabled=move || !editable.get()
                    prop:value=move || read(get).to_string()
                    on:change=move |ev| write(set, parse_amount(&event_target_value(&ev)))
                />
            </td>
        }
    };

    let on_product = move |value: String| {
        let product = value
            .parse::<EntityId>()
            .ok()
            .and_then(|id| products.with(|list| list.iter().find(|p| p.id == Some(id)).cloned()));
        draft.update(|d| match &product {
            Some(product) => d.set_line_product(index, product),
            None => {
                if let Some(line) = d.lines_mut().get_mut(index) {
                    line.product_id = None;
                    line.product_name.clear();
                }
            }
        });
    };

    let remove = move |_| {
        draft.update(|d| {
            let lines = d.lines_mut();
            if lines.len() > 1 {
                lines.remove(index);
            } else if let Some(line) = lines.first_mut() {
                *line = InvoiceLine::blank();
            }
        });
    };

    view! {
        <tr class="table__row">
            <td class="table__cell">
                <select
                    class="table__input"
                    disabled=move || !editable.get()
                    on:change=move |ev| on_product(event_target_value(&ev))
                >
                    <option value="">"-- Product --"</option>
                    {move || {
                        let current = draft.with(|d| d.lines().get(index).and_then(|l| l.product_id));
                        let name = draft.with(|d| d.lines().get(index).map(|l| l.product_name.clone()));
                        let mut options = product_options.get();
                        // Keep lines of since-deactivated products readable
                        if let Some(id) = current.filter(|id| !options.iter().any(|(o, _)| o == id)) {
                            options.insert(0, (id, name.unwrap_or_default()));
                        }
                        options
                            .into_iter()
                            .map(|(value, text)| view! {
                                <option value=value.to_string() selected=current == Some(value)>{text}</option>
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            {number_cell(|l| l.quantity, |l, v| l.quantity = v)}
            {number_cell(|l| l.unit_price, |l, v| l.unit_price = v)}
            {number_cell(|l| l.discount_percent, |l, v| l.discount_percent = v)}
            {number_cell(|l| l.tax_percent, |l, v| l.tax_percent = v)}
            <td class="table__cell table__cell--number">
                {move || format_money(draft.with(|d| d.lines().get(index).map(InvoiceLine::total).unwrap_or_default()))}
            </td>
            <td class="table__cell table__cell--actions">
                <Show when=move || editable.get()>
                    <button class="button button--ghost button--danger" title="Remove item" on:click=remove>
                        {icon("delete")}
                    </button>
                </Show>
            </td>
        </tr>
    }
}

fn payment_row<D: InvoiceDocument>(
    draft: RwSignal<D>,
    index: usize,
    method_options: Signal<Vec<(EntityId, String)>>,
    editable: Signal<bool>,
) -> impl IntoView {
    let update = move |f: Box<dyn FnOnce(&mut InvoicePayment)>| {
        draft.update(|d| {
            if let Some(payment) = d.payments_mut().get_mut(index) {
                f(payment);
            }
        });
    };
    let current_method = move || draft.with(|d| d.payments().get(index).and_then(|p| p.payment_method_id));

    view! {
        <tr class="table__row">
            <td class="table__cell">
                <select
                    class="table__input"
                    disabled=move || !editable.get()
                    on:change=move |ev| {
                        let id = event_target_value(&ev).parse::<EntityId>().ok();
                        update(Box::new(move |p| p.payment_method_id = id));
                    }
                >
                    <option value="" selected=move || current_method().is_none()>"-- Method --"</option>
                    {move || {
                        let current = current_method();
                        method_options
                            .get()
                            .into_iter()
                            .map(|(value, text)| view! {
                                <option value=value.to_string() selected=current == Some(value)>{text}</option>
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            <td class="table__cell">
                <input
                    type="number"
                    step="any"
                    class="table__input"
                    disabled=move || !editable.get()
                    prop:value=move || draft.with(|d| d.payments().get(index).map(|p| p.amount).unwrap_or_default()).to_string()
                    on:change=move |ev| {
                        let amount = parse_amount(&event_target_value(&ev));
                        update(Box::new(move |p| p.amount = amount));
                    }
                />
            </td>
            <td class="table__cell">
                <input
                    type="date"
                    class="table__input"
                    disabled=move || !editable.get()
                    prop:value=move || draft.with(|d| d.payments().get(index).map(|p| p.paid_on.clone()).unwrap_or_default())
                    on:input=move |ev| {
                        let date = event_target_value(&ev);
                        update(Box::new(move |p| p.paid_on = date));
                    }
                />
            </td>
            <td class="table__cell">
                <input
                    type="text"
                    class="table__input"
                    disabled=move || !editable.get()
                    prop:value=move || draft.with(|d| d.payments().get(index).map(|p| p.note.clone()).unwrap_or_default())
                    on:input=move |ev| {
                        let note = event_target_value(&ev);
                        update(Box::new(move |p| p.note = note));
                    }
                />
            </td>
            <td class="table__cell table__cell--actions">
                <Show when=move || editable.get()>
                    <button
                        class="button button--ghost button--danger"
                        title="Remove payment"
                        on:click=move |_| draft.update(|d| {
                            if index < d.payments().len() {
                                d.payments_mut().remove(index);
                            }
                        })
                    >
                        {icon("delete")}
                    </button>
                </Show>
            </td>
        </tr>
    }
}

fn totals_panel<D: InvoiceDocument>(
    draft: RwSignal<D>,
    totals: Memo<InvoiceTotals>,
    editable: Signal<bool>,
) -> impl IntoView {
    let row = move |label: &'static str, value: fn(&InvoiceTotals) -> f64| {
        view! {
            <div class="totals__row">
                <span class="totals__label">{label}</span>
                <span class="totals__value">{move || format_money(totals.with(value))}</span>
            </div>
        }
    };

    view! {
        <div class="totals">
            {row("Subtotal", |t| t.subtotal)}
            {row("Item discounts", |t| t.line_discount)}
            {row("Tax", |t| t.tax)}
            <div class="totals__row">
                <label class="totals__label" for="invoice-discount">"Invoice discount"</label>
                <input
                    type="number"
                    step="any"
                    id="invoice-discount"
                    class="totals__input"
                    disabled=move || !editable.get()
                    prop:value=move || draft.with(|d| d.header_discount()).to_string()
                    on:change=move |ev| {
                        let value = parse_amount(&event_target_value(&ev));
                        draft.update(|d| d.set_header_discount(value));
                    }
                />
            </div>
            <div class="totals__row totals__row--grand">
                <span class="totals__label">"Grand total"</span>
                <span class="totals__value">{move || format_money(totals.with(|t| t.grand_total))}</span>
            </div>
            {row("Paid", |t| t.paid)}
            <div class="totals__row" class:totals__row--due=move || totals.with(|t| t.due > 0.0)>
                <span class="totals__label">"Due"</span>
                <span class="totals__value">{move || format_money(totals.with(|t| t.due))}</span>
            </div>
            <Show when=move || totals.with(|t| t.change > 0.0)>
                {row("Change", |t| t.change)}
            </Show>
        </div>
    }
}

/// Asks for the mandatory reason, then cancels the invoice.
#[component]
fn CancelDialog<D>(
    id: EntityId,
    service: StoredValue<InvoiceService<D>>,
    handle: ModalHandle,
    on_cancelled: Callback<()>,
) -> impl IntoView
where
    D: InvoiceDocument,
{
    let toasts = use_toasts();
    let reason = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let busy = RwSignal::new(false);

    let on_confirm = move |_| {
        let text = reason.get_untracked();
        busy.set(true);
        errors.set(ValidationErrors::new());
        let svc = service.get_value();
        spawn_local(async move {
            let result = svc.cancel(id, &text).await;
            let _ = busy.try_set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("{} cancelled.", D::element_name()));
                    handle.close();
                    on_cancelled.run(());
                }
                Err(ApiError::Invalid(fields)) => {
                    let _ = errors.try_set(fields);
                }
                Err(ApiError::Unauthorized) => handle.close(),
                Err(e) => {
                    if let Some(fields) = e.field_errors() {
                        let _ = errors.try_set(fields.clone());
                    }
                    toasts.error(e.user_message());
                }
            }
        });
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{format!("Cancel {}", D::element_name().to_lowercase())}</h3>
            </div>
            <div class="details-form">
                <div class="form-group">
                    <label for="cancel-reason">"Reason"</label>
                    <textarea
                        id="cancel-reason"
                        rows="3"
                        prop:value=move || reason.get()
                        on:input=move |ev| reason.set(event_target_value(&ev))
                    ></textarea>
                    {field_errors(errors, "reason")}
                </div>
            </div>
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || busy.get())
                    on_click=on_confirm
                >
                    "Cancel invoice"
                </Button>
                <Button on_click=move |_| handle.close()>"Back"</Button>
            </div>
        </div>
    }
}
