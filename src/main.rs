use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use labdash::common::config::Config;
use labdash::common::log::init_logging;
use labdash::layout_engine::{
    IdentityGenerator, LayoutCommand, LayoutStore, LayoutTree, PaneId, Preset, SplitDirection,
};
use labdash::model::WidgetType;
use labdash::sys::persist::{FileStore, KeyValueStore, MemoryStore};

#[derive(Parser, Debug)]
#[command(name = "labdash", version, about = "Inspect and rearrange the dashboard layout")]
struct Cli {
    /// Config file. Defaults to `labdash/config.toml` in the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the layout snapshot; overrides the config.
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current layout as a tree.
    Show,
    /// List the panes of the current layout.
    Panes {
        #[arg(long)]
        json: bool,
    },
    /// List the widget types that can be added.
    Widgets,
    /// Add a pane next to the top-left pane.
    Add { widget: String },
    /// Split an existing pane, placing a new one after it.
    Split {
        target: String,
        widget: String,
        #[arg(long, default_value_t = SplitDirection::Row)]
        direction: SplitDirection,
    },
    /// Remove a pane; its sibling takes over the space.
    Remove { id: String },
    /// Replace the layout with a built-in preset.
    Preset { name: Preset },
    /// Leave a single pane of the configured default widget.
    Reset,
    /// Restore the default layout.
    Default,
    /// Install a layout read from a JSON file.
    Replace { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::read(&path)?,
        None => Config::default(),
    };
    let ids = IdentityGenerator::random();
    let settings = config.layout.clone();

    if config.persist {
        let dir = cli
            .state_dir
            .or_else(|| config.state_dir())
            .context("no state directory available, pass --state-dir")?;
        run(LayoutStore::bootstrap(FileStore::new(dir), ids, settings), cli.command)
    } else {
        run(LayoutStore::bootstrap(MemoryStore::new(), ids, settings), cli.command)
    }
}

fn run<S: KeyValueStore>(mut store: LayoutStore<S>, command: Command) -> anyhow::Result<()> {
    let layout_command = match command {
        Command::Show => {
            print_tree(store.tree());
            return Ok(());
        }
        Command::Panes { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&store.state_data())?);
            } else {
                for pane in store.panes() {
                    println!("{}\t{}\t{}", pane.id, pane.widget, pane.title);
                }
            }
            return Ok(());
        }
        Command::Widgets => {
            for widget in WidgetType::known() {
                println!("{widget}\t{}\t{}", widget.category(), widget.title());
            }
            return Ok(());
        }
        Command::Add { widget } => LayoutCommand::AddWidget { widget },
        Command::Split { target, widget, direction } => LayoutCommand::AddWidgetAt {
            target: PaneId::new(target),
            widget,
            direction,
        },
        Command::Remove { id } => LayoutCommand::RemoveWidget(PaneId::new(id)),
        Command::Preset { name } => LayoutCommand::LoadPreset(name),
        Command::Reset => LayoutCommand::ResetToMinimal,
        Command::Default => LayoutCommand::LoadDefaultLayout,
        Command::Replace { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let tree: LayoutTree = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a layout tree", file.display()))?;
            LayoutCommand::ReplaceTree(tree)
        }
    };

    store.handle_command(layout_command)?;
    store.debug_tree();
    print_tree(store.tree());
    Ok(())
}

fn print_tree(tree: &LayoutTree) {
    match tree {
        Some(root) => print!("{}", root.draw_tree()),
        None => println!("(empty layout)"),
    }
}
