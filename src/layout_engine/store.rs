use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::{
    IdentityGenerator, LayoutError, LayoutNode, LayoutTree, PaneId, Preset, SplitDirection,
    count_leaves, ops, validate,
};
use crate::common::config::LayoutSettings;
use crate::model::{ActiveView, LayoutStateData, PaneData};
use crate::sys::persist::KeyValueStore;

/// Key the current layout is persisted under.
pub const SNAPSHOT_KEY: &str = "mosaic_layout";

/// Everything the surrounding UI can ask the store to do.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    AddWidget {
        widget: String,
    },
    AddWidgetAt {
        target: PaneId,
        widget: String,
        #[serde(default)]
        direction: SplitDirection,
    },
    RemoveWidget(PaneId),
    LoadPreset(Preset),
    LoadDefaultLayout,
    ResetToMinimal,
    /// Wholesale replacement, used by drag and resize in the view layer.
    ReplaceTree(LayoutTree),
    SetActiveView(ActiveView),
}

/// How the store obtained its first tree.
#[derive(Debug)]
pub enum BootstrapOutcome {
    Restored,
    /// Nothing was persisted, so the default layout was installed.
    Defaulted,
    /// The persisted snapshot was rejected and cleared, and the default
    /// layout was installed instead.
    Recovered(LayoutError),
}

/// Owner of the current layout tree.
///
/// The tree is only ever replaced, never edited in place, so a clone taken by
/// a reader stays consistent across later mutations. Every accepted mutation
/// rewrites the persisted snapshot; a failed write is logged and the in-memory
/// tree stays authoritative.
pub struct LayoutStore<S> {
    tree: LayoutTree,
    active_view: ActiveView,
    ids: IdentityGenerator,
    persistence: S,
    settings: LayoutSettings,
    bootstrap: BootstrapOutcome,
}

impl<S: KeyValueStore> LayoutStore<S> {
    pub fn bootstrap(persistence: S, ids: IdentityGenerator, settings: LayoutSettings) -> Self {
        let mut store = Self {
            tree: None,
            active_view: ActiveView::default(),
            ids,
            persistence,
            settings,
            bootstrap: BootstrapOutcome::Defaulted,
        };
        store.bootstrap = store.restore();
        store
    }

    fn restore(&mut self) -> BootstrapOutcome {
        let snapshot = self.persistence.get(SNAPSHOT_KEY).unwrap_or_else(|err| {
            warn!(error = %err, "Failed to read layout snapshot");
            None
        });
        let text = snapshot.as_deref().map(str::trim).filter(|text| !text.is_empty() && *text != "null");
        let Some(text) = text else {
            debug!("No persisted layout, installing default");
            self.tree = self.default_tree();
            return BootstrapOutcome::Defaulted;
        };

        match validate::decode_snapshot(text) {
            Ok(tree) => {
                info!(panes = count_leaves(&tree), "Restored persisted layout");
                self.tree = tree;
                BootstrapOutcome::Restored
            }
            Err(err) => {
                warn!(error = %err, "Invalid persisted layout, installing default");
                if let Err(remove_err) = self.persistence.remove(SNAPSHOT_KEY) {
                    warn!(error = %remove_err, "Failed to clear invalid layout snapshot");
                }
                self.tree = self.default_tree();
                BootstrapOutcome::Recovered(err)
            }
        }
    }

    fn default_tree(&mut self) -> LayoutTree {
        ops::instantiate_preset(&Preset::Default.template(), &mut self.ids)
    }

    pub fn bootstrap_outcome(&self) -> &BootstrapOutcome { &self.bootstrap }

    pub fn tree(&self) -> &LayoutTree { &self.tree }

    /// A copy of the current revision that later mutations will not affect.
    pub fn snapshot(&self) -> LayoutTree { self.tree.clone() }

    pub fn panes(&self) -> Vec<PaneData> {
        self.tree.as_ref().map(|root| root.leaves().map(PaneData::new).collect()).unwrap_or_default()
    }

    pub fn state_data(&self) -> LayoutStateData { LayoutStateData::new(self.active_view, &self.tree) }

    pub fn active_view(&self) -> ActiveView { self.active_view }

    pub fn persistence(&self) -> &S { &self.persistence }

    pub fn debug_tree(&self) {
        match &self.tree {
            Some(root) => debug!("Layout:\n{}", root.draw_tree().trim_end()),
            None => debug!("Layout is empty"),
        }
    }

    /// Runs `operation` on the current tree and installs the result unless it
    /// has duplicate pane identities.
    pub fn apply<F>(&mut self, operation: F) -> Result<(), LayoutError>
    where F: FnOnce(&LayoutTree, &mut IdentityGenerator) -> LayoutTree {
        let next = operation(&self.tree, &mut self.ids);
        if let Err(err) = validate::ensure_unique_identities(&next) {
            error!(error = %err, "Rejecting layout mutation");
            return Err(err);
        }
        self.install(next);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn handle_command(&mut self, command: LayoutCommand) -> Result<(), LayoutError> {
        match command {
            LayoutCommand::AddWidget { widget } => self.add_widget(&widget),
            LayoutCommand::AddWidgetAt { target, widget, direction } => {
                self.add_widget_at(&target, &widget, direction)
            }
            LayoutCommand::RemoveWidget(id) => self.remove_widget(&id),
            LayoutCommand::LoadPreset(preset) => {
                self.load_named_preset(preset);
                Ok(())
            }
            LayoutCommand::LoadDefaultLayout => {
                self.load_default_layout();
                Ok(())
            }
            LayoutCommand::ResetToMinimal => {
                self.reset_to_minimal();
                Ok(())
            }
            LayoutCommand::ReplaceTree(tree) => self.replace_tree(tree),
            LayoutCommand::SetActiveView(view) => {
                self.set_active_view(view);
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    pub fn add_widget(&mut self, widget_type: &str) -> Result<(), LayoutError> {
        self.apply(|tree, ids| ops::insert_first_leaf(tree, widget_type, ids))
    }

    #[instrument(skip(self))]
    pub fn add_widget_at(
        &mut self,
        target: &PaneId,
        widget_type: &str,
        direction: SplitDirection,
    ) -> Result<(), LayoutError> {
        self.apply(|tree, ids| ops::insert_at_leaf(tree, target, widget_type, direction, ids))
    }

    #[instrument(skip(self))]
    pub fn remove_widget(&mut self, id: &PaneId) -> Result<(), LayoutError> {
        self.apply(|tree, _| ops::remove_leaf(tree, id))
    }

    /// Instantiating a template always yields fresh identities, so the result
    /// is installed without the duplicate check.
    #[instrument(skip_all)]
    pub fn load_preset(&mut self, template: &LayoutTree) {
        let tree = ops::instantiate_preset(template, &mut self.ids);
        self.install(tree);
    }

    pub fn load_named_preset(&mut self, preset: Preset) {
        info!(%preset, "Loading layout preset");
        self.load_preset(&preset.template());
    }

    pub fn load_default_layout(&mut self) { self.load_named_preset(Preset::Default) }

    /// Discards every pane and leaves a single pane of the configured default
    /// widget type.
    #[instrument(skip(self))]
    pub fn reset_to_minimal(&mut self) {
        let id = self.ids.new_identity(&self.settings.default_widget);
        self.install(Some(LayoutNode::Leaf(id)));
    }

    #[instrument(skip_all)]
    pub fn replace_tree(&mut self, tree: LayoutTree) -> Result<(), LayoutError> {
        self.apply(move |_, _| tree)
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        debug!(%view, "Switching view");
        self.active_view = view;
    }

    fn install(&mut self, tree: LayoutTree) {
        debug!(panes = count_leaves(&tree), "Installing layout");
        self.tree = tree;
        self.persist();
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.tree) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "Failed to serialize layout");
                return;
            }
        };
        if let Err(err) = self.persistence.set(SNAPSHOT_KEY, &json) {
            warn!(error = %err, "Failed to persist layout, keeping it in memory");
        }
    }
}
