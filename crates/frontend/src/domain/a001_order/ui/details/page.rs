//! Order details page: header, lines, status actions and delivery timeline

use super::timeline::OrderTimeline;
use super::view_model::OrderDetailsVm;
use crate::shared::date_utils::format_datetime;
use crate::shared::session::SessionContext;
use contracts::domain::a001_order::aggregate::Order;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn OrderDetail(id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = OrderDetailsVm::new();
    let session = use_context::<SessionContext>().expect("SessionContext not found");

    vm.load(id);

    let code = vm.code();
    let timeline = vm.timeline;

    view! {
        <div class="page" data-page="a001_order--detail">
            <div class="page__header">
                <h2 class="page__title">{move || format!("{} {}", Order::element_name(), code.get())}</h2>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
            </div>

            <Show when=move || vm.error.get().is_some()>
                <div class="alert alert--error">{move || vm.error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || vm.loading.get()>
                <Spinner />
            </Show>

            {move || {
                vm.order.get().map(|order| view! {
                    <div class="detail-grid">
                        <div class="detail-grid__col">
                            <GeneralSection order=order.clone() />
                            <LinesSection order=order />
                        </div>
                        <div class="detail-grid__col">
                            <h4 class="details-section__title">"Delivery"</h4>
                            <OrderTimeline steps=timeline />
                            <Show when=move || session.can_change_status()>
                                <StatusActions vm=vm />
                            </Show>
                        </div>
                    </div>
                })
            }}
        </div>
    }
}

#[component]
fn GeneralSection(order: Order) -> impl IntoView {
    let created = format_datetime(&order.base.metadata.created_at.to_rfc3339());
    let address = order
        .header
        .shipping_address
        .clone()
        .unwrap_or_else(|| "—".to_string());

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Order"</h4>
            <dl class="details-list">
                <dt>"Code"</dt>
                <dd>{order.base.code.clone()}</dd>
                <dt>"Description"</dt>
                <dd>{order.base.description.clone()}</dd>
                <dt>"Status"</dt>
                <dd>{order.status.display_name()}</dd>
                <dt>"Customer"</dt>
                <dd>{order.header.customer_name.clone()}</dd>
                <dt>"Vendor"</dt>
                <dd>{order.header.vendor_ref.clone()}</dd>
                <dt>"Channel"</dt>
                <dd>{order.header.origin.as_str()}</dd>
                <dt>"Ship to"</dt>
                <dd>{address}</dd>
                <dt>"Created"</dt>
                <dd>{created}</dd>
            </dl>
        </div>
    }
}

#[component]
fn LinesSection(order: Order) -> impl IntoView {
    let currency = order.header.currency.clone();
    let items_total = format!("{:.2}", order.items_total());
    let discount_total = format!("{:.2}", order.discount_total());
    let total = format!("{:.2} {}", order.total(), currency);
    let items_count = format!("{}", order.items_count());

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Items"</h4>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th class="table__cell--right">"Qty"</th>
                        <th class="table__cell--right">"Price"</th>
                        <th class="table__cell--right">"Discount"</th>
                        <th class="table__cell--right">"Amount"</th>
                    </tr>
                </thead>
                <tbody>
                    {order
                        .lines
                        .iter()
                        .map(|line| {
                            view! {
                                <tr>
                                    <td>{line.name.clone()}</td>
                                    <td class="table__cell--right">{format!("{}", line.qty)}</td>
                                    <td class="table__cell--right">{format!("{:.2}", line.unit_price)}</td>
                                    <td class="table__cell--right">
                                        {format!("{:.2}", line.discount.unwrap_or(0.0))}
                                    </td>
                                    <td class="table__cell--right">{format!("{:.2}", line.amount())}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="3">"Subtotal"</td>
                        <td class="table__cell--right">{discount_total}</td>
                        <td class="table__cell--right">{items_total}</td>
                    </tr>
                    <tr>
                        <td colspan="4">"Units"</td>
                        <td class="table__cell--right">{items_count}</td>
                    </tr>
                    <tr class="table__totals">
                        <td colspan="4">"Total"</td>
                        <td class="table__cell--right">{total}</td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

#[component]
fn StatusActions(vm: OrderDetailsVm) -> impl IntoView {
    let next = vm.next_statuses();
    let closed = vm.is_closed();

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Change status"</h4>
            <Show
                when=move || !closed.get()
                fallback=|| view! { <div class="text-muted">"Order is closed"</div> }
            >
                <div class="button-row">
                    {move || {
                        next.get()
                            .into_iter()
                            .map(|status| {
                                view! {
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        size=ButtonSize::Small
                                        disabled=vm.saving
                                        on_click=move |_| vm.change_status(status)
                                    >
                                        {status.display_name()}
                                    </Button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
