use crate::cli::{Cli, RunMode};
use docsmith_core::agent::{
    Agent, ConfirmPolicy, ConfirmationGate, DenialPolicy, ToolRuntime, TracingHooks,
};
use docsmith_core::arcade::ArcadeClient;
use docsmith_core::config::ensure_env_loaded;
use docsmith_core::console::{Console, ConsoleHooks, run_runner_loop, run_session_loop};
use docsmith_core::model::OpenAIClient;
use docsmith_core::session::{InMemorySessionService, SessionRunner};
use docsmith_core::tooling::{Authorizer, ToolService, fetch_tools};
use docsmith_core::types::RunContext;
use docsmith_core::{AgentConfig, Credentials, Overrides};
use serde_json::{Map, Value};
use std::error::Error;
use std::sync::Arc;
use tokio::io::{BufReader, Stdin, Stdout};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

type StdConsole = Console<BufReader<Stdin>, Stdout>;

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing(cli.verbose);
    debug!(
        mode = ?cli.mode,
        config = ?cli.config,
        toolkits = ?cli.toolkits,
        "CLI arguments parsed"
    );

    ensure_env_loaded();
    let mut credentials = Credentials::from_env()?;
    if let Some(model) = &cli.model {
        credentials = credentials.with_model(model);
    }
    if let Some(user_id) = &cli.user_id {
        credentials = credentials.with_user_id(user_id);
    }

    let mut config = AgentConfig::load(cli.config.as_deref())?;
    config.apply_overrides(&Overrides {
        toolkits: cli.toolkits.clone(),
        preauthorize: cli.no_preauthorize.then_some(false),
    });
    config.validate()?;
    info!(
        agent = config.name.as_str(),
        toolkits = ?config.toolkits,
        preauthorize = config.preauthorize,
        "Loaded agent configuration"
    );

    let console: Arc<StdConsole> = Arc::new(Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    ));
    let service: Arc<dyn ToolService> = Arc::new(ArcadeClient::new(
        &credentials.arcade_base_url,
        &credentials.arcade_api_key,
    ));
    let authorizer = Arc::new(Authorizer::new(
        Arc::clone(&service),
        console.clone(),
        config.auth_timeout,
    ));

    let registry = fetch_tools(
        service.as_ref(),
        &config.toolkits,
        &config.tools,
        config.tool_limit,
    )
    .await?;
    if config.preauthorize {
        authorizer
            .preauthorize_all(&registry, &credentials.arcade_user_id)
            .await?;
    }

    let gate = ConfirmationGate::new(
        ConfirmPolicy::from_list(&config.confirm_tools),
        console.clone(),
    );
    let runtime = ToolRuntime::new(registry, service, gate, authorizer);
    let provider = Arc::new(OpenAIClient::new(
        &credentials.openai_base_url,
        &credentials.openai_api_key,
    ));
    let builder = Agent::builder(&config.name, provider, runtime)
        .instructions(&config.instructions)
        .model(&credentials.openai_model)
        .max_turns(config.max_turns);

    info!(mode = ?cli.mode, "Starting interactive loop");
    match cli.mode {
        RunMode::Runner => {
            let hooks = Arc::new(ConsoleHooks::new(&config.name, console.clone()));
            let agent = builder.hooks(hooks).build();
            let context = RunContext::new(&credentials.arcade_user_id);
            run_runner_loop(console.as_ref(), &agent, &context).await?;
        }
        RunMode::Session => {
            let agent = Arc::new(
                builder
                    .hooks(Arc::new(TracingHooks))
                    .denial_policy(DenialPolicy::Record)
                    .build(),
            );
            let sessions = Arc::new(InMemorySessionService::new());
            let mut state = Map::new();
            state.insert(
                "user_id".to_string(),
                Value::String(credentials.arcade_user_id.clone()),
            );
            let session = sessions
                .create_session(&config.app_name, &credentials.arcade_user_id, state)
                .await;
            let runner = SessionRunner::new(&config.app_name, agent, sessions);
            run_session_loop(
                console.as_ref(),
                &runner,
                &credentials.arcade_user_id,
                &session.id,
            )
            .await?;
        }
    }

    info!("Agent session finished");
    Ok(())
}

fn init_tracing(verbose: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let fallback = if verbose { "info" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
