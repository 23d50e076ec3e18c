use serde::Serialize;

use super::{ActiveView, WidgetType};
use crate::layout_engine::{LayoutTree, PaneId, count_leaves};

/// What the renderer needs to mount one pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaneData {
    pub id: PaneId,
    pub widget: WidgetType,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutStateData {
    pub view: ActiveView,
    pub pane_count: usize,
    pub panes: Vec<PaneData>,
    pub layout: LayoutTree,
}

impl PaneData {
    pub fn new(id: &PaneId) -> Self {
        let widget = id.widget_type();
        // Unknown panes keep their raw type name as the title.
        let title = match widget {
            WidgetType::Unknown => id.widget_name().to_owned(),
            known => known.title().to_owned(),
        };
        Self { id: id.clone(), widget, title }
    }
}

impl LayoutStateData {
    pub fn new(view: ActiveView, layout: &LayoutTree) -> Self {
        let panes: Vec<PaneData> = layout
            .as_ref()
            .map(|root| root.leaves().map(PaneData::new).collect())
            .unwrap_or_default();
        Self {
            view,
            pane_count: count_leaves(layout),
            panes,
            layout: layout.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::layout_engine::{LayoutNode, SplitDirection};

    #[test]
    fn pane_data_derives_type_and_title() {
        let pane = PaneData::new(&PaneId::new("eventLog#k2j4l1"));
        assert_eq!(pane.widget, WidgetType::EventLog);
        assert_eq!(pane.title, "Event Log");

        let pane = PaneData::new(&PaneId::new("radar#000001"));
        assert_eq!(pane.widget, WidgetType::Unknown);
        assert_eq!(pane.title, "radar");
    }

    #[test]
    fn state_data_serializes_for_the_renderer() {
        let layout = Some(LayoutNode::branch(
            SplitDirection::Row,
            LayoutNode::leaf("agentMap#1"),
            LayoutNode::leaf("radar#2"),
        ));
        let data = LayoutStateData::new(ActiveView::Global, &layout);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "view": "global",
                "pane_count": 2,
                "panes": [
                    {"id": "agentMap#1", "widget": "agentMap", "title": "Agent Map"},
                    {"id": "radar#2", "widget": "unknown", "title": "radar"},
                ],
                "layout": {"direction": "row", "first": "agentMap#1", "second": "radar#2"},
            })
        );
    }

    #[test]
    fn empty_layout_has_no_panes() {
        let data = LayoutStateData::new(ActiveView::EconomicExplorer, &None);
        assert_eq!(data.pane_count, 0);
        assert!(data.panes.is_empty());
    }
}
