//! Counter demo binary
//!
//! Dispatches action names through a Store and re-renders after each one.
//! Names come from the command line, defaulting to
//! `INCREMENT INCREMENT DECREMENT`.

use composable_widgets_runtime::Store;
use counter::{CounterAction, CounterEnvironment, CounterReducer, CounterState, render};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,composable_widgets_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        names = ["INCREMENT", "INCREMENT", "DECREMENT"]
            .map(String::from)
            .to_vec();
    }

    let store = Store::new(
        CounterState::default(),
        CounterReducer::new(),
        CounterEnvironment::new(),
    );

    println!("{}\n", store.state(render).await);

    for name in names {
        let action = CounterAction::from_type(&name);
        println!(">>> {name}");
        store.send(action).await?;
        println!("{}\n", store.state(render).await);
    }

    store.shutdown_default().await?;
    Ok(())
}
