use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Kinds of content a pane can host.
///
/// The layout engine never rejects an unrecognised type; it maps to
/// [`WidgetType::Unknown`] and the renderer shows a placeholder.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum WidgetType {
    AgentMap,
    GlobalMetrics,
    TemplateDistribution,
    EventLog,
    TemplateDynamics,
    TimeSeriesExplorer,
    EconomicExplorer,
    GeospatialExplorer,
    Metrics,
    AgentInspector,
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WidgetCategory {
    Global,
    Analysis,
    Legacy,
    Other,
}

impl WidgetType {
    pub fn from_name(name: &str) -> Self { name.parse().unwrap_or(Self::Unknown) }

    /// Every type a user can pick, in menu order.
    pub fn known() -> impl Iterator<Item = WidgetType> {
        Self::iter().filter(|widget| *widget != Self::Unknown)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::AgentMap => "Agent Map",
            Self::GlobalMetrics => "Global Metrics",
            Self::TemplateDistribution => "Template Distribution",
            Self::EventLog => "Event Log",
            Self::TemplateDynamics => "Template Dynamics",
            Self::TimeSeriesExplorer => "Time Series Explorer",
            Self::EconomicExplorer => "Economic Explorer",
            Self::GeospatialExplorer => "Geospatial Explorer",
            Self::Metrics => "Metrics Dashboard",
            Self::AgentInspector => "Agent Inspector",
            Self::Unknown => "Unknown Widget",
        }
    }

    pub fn category(self) -> WidgetCategory {
        match self {
            Self::AgentMap | Self::GlobalMetrics | Self::TemplateDistribution | Self::EventLog => {
                WidgetCategory::Global
            }
            Self::TemplateDynamics
            | Self::TimeSeriesExplorer
            | Self::EconomicExplorer
            | Self::GeospatialExplorer => WidgetCategory::Analysis,
            Self::Metrics | Self::AgentInspector => WidgetCategory::Legacy,
            Self::Unknown => WidgetCategory::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn names_are_camel_case() {
        assert_eq!(WidgetType::TimeSeriesExplorer.to_string(), "timeSeriesExplorer");
        assert_eq!(WidgetType::from_name("agentMap"), WidgetType::AgentMap);
        assert_eq!(
            serde_json::to_string(&WidgetType::GeospatialExplorer).unwrap(),
            r#""geospatialExplorer""#
        );
    }

    #[test]
    fn unrecognised_names_are_unknown() {
        assert_eq!(WidgetType::from_name("radar"), WidgetType::Unknown);
        assert_eq!(WidgetType::from_name(""), WidgetType::Unknown);
        assert_eq!(WidgetType::from_name("AgentMap"), WidgetType::Unknown);
    }

    #[test]
    fn known_excludes_unknown() {
        let known: Vec<_> = WidgetType::known().collect();
        assert_eq!(known.len(), 10);
        assert!(!known.contains(&WidgetType::Unknown));
        assert_eq!(known[0], WidgetType::AgentMap);
    }

    #[test]
    fn categories() {
        assert_eq!(WidgetType::EventLog.category(), WidgetCategory::Global);
        assert_eq!(WidgetType::EconomicExplorer.category(), WidgetCategory::Analysis);
        assert_eq!(WidgetType::AgentInspector.category(), WidgetCategory::Legacy);
    }
}
