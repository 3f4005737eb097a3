//! ViewModel for order details

use super::model::{change_status, fetch_by_id};
use crate::shared::telemetry::ClientAnomalySink;
use contracts::domain::a001_order::aggregate::Order;
use contracts::domain::a001_order::timeline::{build_timeline_reported, TimelineStep};
use contracts::enums::order_status::OrderStatus;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy)]
pub struct OrderDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub order: RwSignal<Option<Order>>,
    /// Лента пересобирается при каждой загрузке или изменении заказа
    pub timeline: RwSignal<Vec<TimelineStep>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl OrderDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            order: RwSignal::new(None),
            timeline: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn code(&self) -> Signal<String> {
        let order = self.order;
        Signal::derive(move || order.with(|o| o.as_ref().map(|o| o.base.code.clone()).unwrap_or_default()))
    }

    /// Статусы, доступные для перевода из текущего
    pub fn next_statuses(&self) -> Signal<Vec<OrderStatus>> {
        let order = self.order;
        Signal::derive(move || {
            order.with(|o| {
                o.as_ref()
                    .and_then(|o| o.status.known())
                    .map(|s| s.next_statuses().to_vec())
                    .unwrap_or_default()
            })
        })
    }

    /// Заказ в конечном статусе: дальнейших действий нет
    pub fn is_closed(&self) -> Signal<bool> {
        let order = self.order;
        Signal::derive(move || {
            order.with(|o| {
                o.as_ref()
                    .and_then(|o| o.status.known())
                    .is_some_and(|s| s.is_terminal())
            })
        })
    }

    fn set_order(&self, order: Order) {
        self.timeline
            .set(build_timeline_reported(&order, &ClientAnomalySink));
        self.order.set(Some(order));
    }

    pub fn load(&self, id: String) {
        let vm = *self;
        vm.id.set(Some(id.clone()));
        vm.loading.set(true);
        vm.error.set(None);

        spawn_local(async move {
            match fetch_by_id(&id).await {
                Ok(order) => vm.set_order(order),
                Err(e) => {
                    log::error!("Failed to load order {}: {}", id, e);
                    vm.error.set(Some(e));
                }
            }
            vm.loading.set(false);
        });
    }

    pub fn change_status(&self, next: OrderStatus) {
        let vm = *self;
        let Some(id) = vm.id.get_untracked() else {
            return;
        };
        vm.saving.set(true);
        vm.error.set(None);

        spawn_local(async move {
            match change_status(&id, next.code()).await {
                Ok(order) => {
                    log::info!("Order {} moved to {}", order.base.code, next);
                    vm.set_order(order);
                }
                Err(e) => vm.error.set(Some(e)),
            }
            vm.saving.set(false);
        });
    }
}

impl Default for OrderDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
