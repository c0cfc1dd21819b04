use action_server::{app, AppState, ServerConfig, ServerError};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "action_server=info,agent_actions=info,transfer_form=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Action server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    let addr = config.addr;
    let state = AppState::from_config(&config)?;

    info!(
        actions = state.registry.list_actions().len(),
        users_url = %config.actions.users_url,
        amount_ceiling = config.actions.form.amount_ceiling,
        "Action registry ready"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Action server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
