use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editable broadcast preset. The active broadcast shares this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastTemplate {
    pub id: String,
    /// Tab label shown in the broadcast editor.
    pub btn_name: String,
    pub title: String,
    pub subtitle: String,
}

impl BroadcastTemplate {
    pub fn new(
        id: impl Into<String>,
        btn_name: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            btn_name: btn_name.into(),
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Copy of this template carrying a new id, ready to be shown.
    pub fn publish_as(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    pub fn apply(&mut self, patch: &TemplatePatch) {
        if let Some(btn_name) = &patch.btn_name {
            self.btn_name = btn_name.clone();
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(subtitle) = &patch.subtitle {
            self.subtitle = subtitle.clone();
        }
    }
}

/// Partial edit of a template; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btn_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

pub fn default_templates() -> Vec<BroadcastTemplate> {
    vec![
        BroadcastTemplate::new("1", "下課休息", "下課時間", "離開教室請注意安全"),
        BroadcastTemplate::new("2", "安靜午休", "午休時間", "請保持安靜，安靜午睡"),
        BroadcastTemplate::new("3", "打掃時間", "環境清掃", "維護校園整潔，大家動起來"),
    ]
}

/// One-tap status messages from the kiosk toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    ToClass,
    Home,
    Ball,
    Meeting,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::ToClass,
        QuickAction::Home,
        QuickAction::Ball,
        QuickAction::Meeting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickAction::ToClass => "to_class",
            QuickAction::Home => "home",
            QuickAction::Ball => "ball",
            QuickAction::Meeting => "meeting",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            QuickAction::ToClass => "去上課了",
            QuickAction::Home => "回家了",
            QuickAction::Ball => "打球去了",
            QuickAction::Meeting => "開會去了",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            QuickAction::ToClass => "下課才回來",
            QuickAction::Home => "明天才回來",
            QuickAction::Ball => "下午才回來",
            QuickAction::Meeting => "請稍後再來訪",
        }
    }

    pub fn to_broadcast(self, id: impl Into<String>) -> BroadcastTemplate {
        BroadcastTemplate::new(id, "Quick", self.title(), self.subtitle())
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickAction {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        QuickAction::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or(())
    }
}

/// Destinations offered by the travel picker; any other non-blank text is accepted too.
pub const TRAVEL_DESTINATIONS: [&str; 4] = ["德國", "日本", "澳洲", "美國"];

/// Returns `None` when the destination is blank.
pub fn travel_broadcast(id: impl Into<String>, destination: &str) -> Option<BroadcastTemplate> {
    let destination = destination.trim();
    if destination.is_empty() {
        return None;
    }
    Some(BroadcastTemplate::new(
        id,
        "Travel",
        format!("我在{destination}"),
        "很快就回來",
    ))
}
