use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level page of the dashboard. Only `Global` shows the pane layout.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Global,
    EconomicExplorer,
    PoliticalExplorer,
}
