//! Fixed dashboard content: metric tiles, quick actions and recent activity.

use crate::components::Trend;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Count(u64),
    Text(&'static str),
}

impl StatValue {
    pub fn display(&self) -> String {
        match self {
            StatValue::Count(count) => utils::format_count(*count),
            StatValue::Text(text) => text.to_string(),
        }
    }
}

pub struct StatTile {
    pub title: &'static str,
    pub value: StatValue,
    pub icon: &'static str,
    pub trend: Trend,
    pub trend_value: &'static str,
}

pub struct QuickAction {
    pub icon: &'static str,
    pub label: &'static str,
    /// Accent class for the button background
    pub color: &'static str,
}

pub struct ActivityEntry {
    pub action: &'static str,
    pub time: &'static str,
    pub icon: &'static str,
}

pub const STAT_TILES: [StatTile; 4] = [
    StatTile {
        title: "Total Views",
        value: StatValue::Count(12847),
        icon: "📊",
        trend: Trend::Up,
        trend_value: "12.5%",
    },
    StatTile {
        title: "Active Sessions",
        value: StatValue::Count(342),
        icon: "👥",
        trend: Trend::Up,
        trend_value: "8.2%",
    },
    StatTile {
        title: "Storage Used",
        value: StatValue::Text("2.4 GB"),
        icon: "💾",
        trend: Trend::Down,
        trend_value: "3.1%",
    },
    StatTile {
        title: "Success Rate",
        value: StatValue::Text("99.8%"),
        icon: "✅",
        trend: Trend::Up,
        trend_value: "0.3%",
    },
];

pub const QUICK_ACTIONS: [QuickAction; 6] = [
    QuickAction {
        icon: "📝",
        label: "New Post",
        color: "accent-blue",
    },
    QuickAction {
        icon: "👤",
        label: "Users",
        color: "accent-purple",
    },
    QuickAction {
        icon: "⚙️",
        label: "Settings",
        color: "accent-zinc",
    },
    QuickAction {
        icon: "📈",
        label: "Analytics",
        color: "accent-green",
    },
    QuickAction {
        icon: "🔔",
        label: "Notifications",
        color: "accent-yellow",
    },
    QuickAction {
        icon: "📁",
        label: "Files",
        color: "accent-red",
    },
];

pub const RECENT_ACTIVITY: [ActivityEntry; 5] = [
    ActivityEntry {
        action: "New user registered",
        time: "2 min ago",
        icon: "👤",
    },
    ActivityEntry {
        action: "Post published",
        time: "15 min ago",
        icon: "📝",
    },
    ActivityEntry {
        action: "Settings updated",
        time: "1 hour ago",
        icon: "⚙️",
    },
    ActivityEntry {
        action: "File uploaded",
        time: "2 hours ago",
        icon: "📁",
    },
    ActivityEntry {
        action: "Analytics viewed",
        time: "3 hours ago",
        icon: "📊",
    },
];
