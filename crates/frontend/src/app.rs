use crate::domain::a001_order::ui::details::OrderDetail;
use crate::domain::a001_order::ui::list::OrderList;
use crate::shared::session::SessionContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let session = SessionContext::from_location();
    log::info!("Console started as {}", session.role.display_name());
    provide_context(session);

    let (opened, set_opened) = signal(None::<String>);

    view! {
        <div class="app">
            <header class="app__header">
                <span class="app__title">"Marketplace"</span>
                <span class="app__role">{session.role.display_name()}</span>
            </header>
            <main class="app__content">
                {move || match opened.get() {
                    Some(id) => view! {
                        <OrderDetail id=id on_close=move |_| set_opened.set(None) />
                    }
                    .into_any(),
                    None => view! {
                        <OrderList on_open=move |id: String| set_opened.set(Some(id)) />
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}
