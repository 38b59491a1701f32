//! Document Editor
//!
//! This example wires a history into a small editor and mirrors it onto an
//! in-memory undo coordinator, the way a desktop app would mirror it onto
//! its Edit menu.
//!
//! Key concepts:
//! - Host actions mutate the live value and register a labelled checkpoint
//! - Undo/redo can come from the editor or from the coordinator
//! - The coordinator's menu titles always match the history's labels
//! - Only the live value is persisted
//!
//! Run with: RUST_LOG=checkpoint_undo=debug cargo run --example document_editor

use checkpoint_undo::checkpoint_route;
use checkpoint_undo::coordinator::{InMemoryCoordinator, UndoCoordinator};
use checkpoint_undo::core::History;
use checkpoint_undo::effects::{CheckpointAction, Effect};
use checkpoint_undo::snapshot;
use checkpoint_undo::store::{track_checkpoints, Store};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Document {
    title: String,
    body: String,
}

#[derive(Debug)]
struct Editor {
    document: History<Document>,
}

#[derive(Debug, Clone, PartialEq)]
enum EditorAction {
    Retitle(String),
    Append(String),
    History(CheckpointAction),
}

checkpoint_route!(EditorAction::History);

fn document(editor: &mut Editor) -> &mut History<Document> {
    &mut editor.document
}

fn editor_reducer(editor: &mut Editor, action: EditorAction) -> Effect<EditorAction> {
    match action {
        EditorAction::Retitle(title) => {
            editor.document.value_mut().title = title;
            Effect::checkpoint(CheckpointAction::register("Rename Document"))
        }
        EditorAction::Append(text) => {
            editor.document.value_mut().body.push_str(&text);
            Effect::checkpoint(CheckpointAction::register("Typing"))
        }
        EditorAction::History(_) => Effect::none(),
    }
}

fn menu(coordinator: &InMemoryCoordinator) -> String {
    let undo = if coordinator.can_undo() {
        format!("Undo {}", coordinator.undo_action_name())
    } else {
        "Undo (disabled)".to_string()
    };
    let redo = if coordinator.can_redo() {
        format!("Redo {}", coordinator.redo_action_name())
    } else {
        "Redo (disabled)".to_string()
    };
    format!("[{undo}] [{redo}]")
}

fn show(store: &Store<Editor, EditorAction>, coordinator: &InMemoryCoordinator) {
    let doc = store.state().document.value();
    println!("  title: {:?}, body: {:?}", doc.title, doc.body);
    println!("  menu:  {}\n", menu(coordinator));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Document Editor ===\n");

    let coordinator = Rc::new(InMemoryCoordinator::new());
    let editor = Editor {
        document: History::new(Document {
            title: "Untitled".to_string(),
            body: String::new(),
        }),
    };
    let mut store = Store::new(editor, track_checkpoints(editor_reducer, document));

    store.send(EditorAction::History(CheckpointAction::attach(&coordinator)));
    println!("Attached coordinator");
    show(&store, &coordinator);

    println!("Step 1: Rename and type");
    store.send(EditorAction::Retitle("Notes".to_string()));
    store.send(EditorAction::Append("Hello".to_string()));
    store.send(EditorAction::Append(", world".to_string()));
    show(&store, &coordinator);

    println!("Step 2: Undo from the Edit menu");
    coordinator.undo();
    store.process_pending();
    show(&store, &coordinator);

    println!("Step 3: Undo from the editor");
    store.send(EditorAction::History(CheckpointAction::Undo));
    show(&store, &coordinator);

    println!("Step 4: Redo from the Edit menu");
    coordinator.redo();
    store.process_pending();
    show(&store, &coordinator);

    println!("Step 5: Typing cuts the redo branch");
    store.send(EditorAction::Append("!".to_string()));
    show(&store, &coordinator);

    println!("Undo stack: {:?}\n", store.state().document.all_undo_labels());

    println!("Step 6: Save");
    match snapshot::to_json(&store.state().document) {
        Ok(json) => println!("  saved: {json}\n"),
        Err(e) => println!("  save failed: {e}\n"),
    }

    store.send(EditorAction::History(CheckpointAction::DetachCoordinator));
    println!("Detached coordinator");
    show(&store, &coordinator);

    println!("Key Takeaways:");
    println!("- The editor registers checkpoints; it never stores undo closures");
    println!("- Menu and editor undo share one history");
    println!("- Typing after undo drops the redo steps on both sides");

    println!("\n=== Example Complete ===");
}
