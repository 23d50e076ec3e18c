use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{LayoutNode, LayoutTree, SplitDirection};
use crate::model::WidgetType;

/// Built-in layout templates. Their leaves are bare widget types and must be
/// instantiated before they can be installed.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Preset {
    /// Map and metrics over the time-series and template-dynamics charts.
    Default,
    /// A single agent map.
    Minimal,
    Monitoring,
    Analysis,
}

impl Preset {
    pub fn template(self) -> LayoutTree {
        use WidgetType::*;
        let node = match self {
            Preset::Default => column(
                row(AgentMap, GlobalMetrics, 70.0),
                row(TimeSeriesExplorer, TemplateDynamics, 70.0),
                60.0,
            ),
            Preset::Minimal => widget(AgentMap),
            Preset::Monitoring => column(
                row(AgentMap, GlobalMetrics, 70.0),
                row(TemplateDistribution, EventLog, 50.0),
                65.0,
            ),
            Preset::Analysis => column(
                row(AgentMap, TimeSeriesExplorer, 60.0),
                row(EconomicExplorer, GeospatialExplorer, 50.0),
                55.0,
            ),
        };
        Some(node)
    }
}

fn widget(widget: WidgetType) -> LayoutNode { LayoutNode::leaf(widget.to_string()) }

fn row(first: WidgetType, second: WidgetType, split: f64) -> LayoutNode {
    LayoutNode::branch(SplitDirection::Row, widget(first), widget(second)).with_split(split)
}

fn column(first: LayoutNode, second: LayoutNode, split: f64) -> LayoutNode {
    LayoutNode::branch(SplitDirection::Column, first, second).with_split(split)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::layout_engine::count_leaves;

    #[test]
    fn preset_names_parse() {
        assert_eq!("monitoring".parse::<Preset>().unwrap(), Preset::Monitoring);
        assert_eq!(Preset::Analysis.to_string(), "analysis");
        assert!("sideways".parse::<Preset>().is_err());
    }

    #[test]
    fn templates_have_expected_sizes() {
        for preset in Preset::iter() {
            let expected = if preset == Preset::Minimal { 1 } else { 4 };
            assert_eq!(count_leaves(&preset.template()), expected, "{preset}");
        }
    }

    #[test]
    fn monitoring_template_shape() {
        assert_eq!(
            serde_json::to_value(Preset::Monitoring.template()).unwrap(),
            json!({
                "direction": "column",
                "first": {
                    "direction": "row",
                    "first": "agentMap",
                    "second": "globalMetrics",
                    "splitPercentage": 70.0,
                },
                "second": {
                    "direction": "row",
                    "first": "templateDistribution",
                    "second": "eventLog",
                    "splitPercentage": 50.0,
                },
                "splitPercentage": 65.0,
            })
        );
    }
}
