use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Trend::Up => "stat-trend up",
            Trend::Down => "stat-trend down",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    pub icon: AttrValue,
    pub trend: Trend,
    pub trend_value: AttrValue,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-card">
            <div class="stat-card-header">
                <span class="stat-title">{ &props.title }</span>
                <span class="stat-icon">{ &props.icon }</span>
            </div>
            <div class="stat-value">{ &props.value }</div>
            <div class={props.trend.class()}>
                { format!("{} {}", props.trend.arrow(), props.trend_value) }
            </div>
        </div>
    }
}
