//! Todo insert demo binary
//!
//! Plays the parent of the form: it owns a todo list and appends whatever
//! the form submits. Each command-line argument is typed and submitted in
//! turn; without arguments a short script runs.

use composable_widgets_runtime::Store;
use std::sync::{Arc, Mutex, PoisonError};
use todo_insert::{
    SubmitEvent, TodoInsertAction, TodoInsertEnvironment, TodoInsertReducer, TodoInsertState,
    render,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_insert=debug,composable_widgets_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut entries: Vec<String> = std::env::args().skip(1).collect();
    if entries.is_empty() {
        entries = ["Buy milk", "Write documentation", ""]
            .map(String::from)
            .to_vec();
    }

    let todos = Arc::new(Mutex::new(Vec::<String>::new()));
    let env = TodoInsertEnvironment::new({
        let todos = Arc::clone(&todos);
        move |value: String| {
            todos
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        }
    });

    let store = Store::new(TodoInsertState::new(), TodoInsertReducer::new(), env);
    println!("{}", store.state(render).await);

    for entry in entries {
        store.send(TodoInsertAction::change(entry)).await?;
        println!("{}", store.state(render).await);

        let event = SubmitEvent::new();
        store
            .send(TodoInsertAction::Submit {
                event: event.clone(),
            })
            .await?;
        println!(
            "{}  (default prevented: {})",
            store.state(render).await,
            event.default_prevented()
        );
    }

    println!("\nTodos:");
    for todo in todos.lock().unwrap_or_else(PoisonError::into_inner).iter() {
        println!("  - {todo:?}");
    }

    store.shutdown_default().await?;
    Ok(())
}
