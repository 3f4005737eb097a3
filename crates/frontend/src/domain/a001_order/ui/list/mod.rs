pub mod state;

use crate::shared::api_utils::api_url;
use crate::shared::list_utils::{
    filter_list, get_sort_indicator, paginate, sort_list, total_pages,
};
use contracts::domain::a001_order::aggregate::Order;
use contracts::domain::common::AggregateRoot;
use contracts::enums::order_status::OrderStatus;
use gloo_net::http::Request;
use leptos::prelude::*;
use state::{OrderRow, PAGE_SIZE};
use thaw::*;
use wasm_bindgen_futures::spawn_local;

async fn fetch_orders(status: Option<String>) -> Result<Vec<Order>, String> {
    let path = match status {
        Some(code) => format!("/api/a001/order?status={}", urlencoding::encode(&code)),
        None => "/api/a001/order".to_string(),
    };
    let response = Request::get(&api_url(&path))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch: {}", e))?;

    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    response
        .json::<Vec<Order>>()
        .await
        .map_err(|e| format!("Failed to parse orders: {}", e))
}

#[component]
pub fn OrderList(#[prop(into)] on_open: Callback<String>) -> impl IntoView {
    let (rows, set_rows) = signal(Vec::<OrderRow>::new());
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (filter_status, set_filter_status) = signal(None::<String>);
    let (search, set_search) = signal(String::new());
    let (sort_field, set_sort_field) = signal("created_at".to_string());
    let (sort_ascending, set_sort_ascending) = signal(false);
    let (page, set_page) = signal(0usize);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        let status = filter_status.get_untracked();
        spawn_local(async move {
            match fetch_orders(status).await {
                Ok(orders) => {
                    set_rows.set(orders.iter().map(OrderRow::from).collect());
                    set_page.set(0);
                }
                Err(e) => {
                    log::error!("Failed to load orders: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    // Статус фильтруется на сервере, поэтому смена статуса перезагружает список
    Effect::new(move |_| {
        filter_status.track();
        load();
    });

    let visible = Memo::new(move |_| {
        let mut items = filter_list(rows.get(), &search.get());
        sort_list(&mut items, &sort_field.get(), sort_ascending.get());
        items
    });

    let pages = Signal::derive(move || total_pages(visible.with(|v| v.len()), PAGE_SIZE));

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            set_sort_ascending.update(|asc| *asc = !*asc);
        } else {
            set_sort_field.set(field.to_string());
            set_sort_ascending.set(true);
        }
    };

    let header = move |field: &'static str, title: &'static str| {
        view! {
            <th class="table__header--sortable" on:click=move |_| toggle_sort(field)>
                {title}
                {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
            </th>
        }
    };

    view! {
        <div class="page" data-page="a001_order--list">
            <div class="page__header">
                <h2 class="page__title">{Order::list_name()}</h2>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                    "Refresh"
                </Button>
            </div>

            <div class="filter-panel">
                <select
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if value.is_empty() {
                            set_filter_status.set(None);
                        } else {
                            set_filter_status.set(Some(value));
                        }
                    }
                >
                    <option value="">"All statuses"</option>
                    {OrderStatus::all()
                        .into_iter()
                        .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Search (min. 3 characters)..."
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        set_search.set(event_target_value(&ev));
                        set_page.set(0);
                    }
                />
            </div>

            <Show when=move || error.get().is_some()>
                <div class="alert alert--error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        {header("code", "Code")}
                        {header("created_at", "Created")}
                        {header("customer", "Customer")}
                        {header("status", "Status")}
                        {header("total", "Total")}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let current = visible.with(|v| paginate(v, page.get(), PAGE_SIZE));
                        current
                            .into_iter()
                            .map(|row| {
                                let id = row.id.clone();
                                view! {
                                    <tr class="table__row--clickable" on:click=move |_| on_open.run(id.clone())>
                                        <td>{row.code}</td>
                                        <td>{crate::shared::date_utils::format_datetime(&row.created_at)}</td>
                                        <td>{row.customer_name}</td>
                                        <td data-status=row.status_code>{row.status_name}</td>
                                        <td class="table__cell--right">
                                            {format!("{:.2} {}", row.total, row.currency)}
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <div class="pagination-controls">
                <button
                    class="pagination-btn"
                    disabled=move || page.get() == 0
                    on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1))
                >
                    "‹"
                </button>
                <span class="pagination-info">
                    {move || format!("{} / {} ({})", page.get() + 1, pages.get(), visible.with(|v| v.len()))}
                </span>
                <button
                    class="pagination-btn"
                    disabled=move || page.get() + 1 >= pages.get()
                    on:click=move |_| set_page.update(|p| *p += 1)
                >
                    "›"
                </button>
            </div>
        </div>
    }
}
