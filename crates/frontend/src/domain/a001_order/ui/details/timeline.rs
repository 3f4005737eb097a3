//! Отрисовка ленты доставки заказа

use crate::shared::date_utils::format_datetime;
use contracts::domain::a001_order::timeline::{StepState, TimelineStep};
use leptos::prelude::*;
use thaw::*;

/// Момент шага для показа: дата в локальном формате или заглушка
pub fn display_timestamp(step: &TimelineStep) -> String {
    match &step.timestamp {
        Some(ts) => format_datetime(ts),
        None => step.timestamp_label().to_string(),
    }
}

fn state_badge(state: StepState) -> (BadgeColor, &'static str) {
    match state {
        StepState::Completed => (BadgeColor::Success, "✓"),
        StepState::Pending => (BadgeColor::Informative, "…"),
        StepState::Error => (BadgeColor::Danger, "✗"),
    }
}

fn state_class(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "timeline__step timeline__step--completed",
        StepState::Pending => "timeline__step timeline__step--pending",
        StepState::Error => "timeline__step timeline__step--error",
    }
}

#[component]
pub fn OrderTimeline(#[prop(into)] steps: Signal<Vec<TimelineStep>>) -> impl IntoView {
    view! {
        <ol class="timeline">
            {move || {
                steps
                    .get()
                    .into_iter()
                    .map(|step| {
                        let (color, mark) = state_badge(step.state);
                        let when = display_timestamp(&step);
                        view! {
                            <li class=state_class(step.state) data-step=step.id.as_str()>
                                <Badge appearance=BadgeAppearance::Filled color=color>
                                    {mark}
                                </Badge>
                                <div class="timeline__body">
                                    <div class="timeline__title">{step.title}</div>
                                    <div class="timeline__description">{step.description}</div>
                                    <div class="timeline__timestamp">{when}</div>
                                </div>
                            </li>
                        }
                    })
                    .collect_view()
            }}
        </ol>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_order::aggregate::OrderTimestamps;
    use contracts::domain::a001_order::timeline::build_steps;
    use contracts::enums::order_status::RecordedStatus;

    #[test]
    fn test_display_timestamp() {
        let ts = OrderTimestamps {
            created_at: Some("2024-01-01T09:15:00Z".into()),
            ..OrderTimestamps::default()
        };
        let steps = build_steps(&RecordedStatus::from("shipped"), &ts);
        assert_eq!(display_timestamp(&steps[0]), "01.01.2024 09:15:00");
        assert_eq!(display_timestamp(&steps[1]), "Pending");

        let steps = build_steps(&RecordedStatus::from("cancelled"), &OrderTimestamps::default());
        assert_eq!(display_timestamp(&steps[1]), "N/A");
    }
}
