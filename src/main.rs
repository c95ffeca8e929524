//! MedBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use tracing::{error, info, warn};

use MedBuddy::{
    config::Settings,
    database::{connection::create_pool, run_migrations, DatabaseService, PoolConfig},
    catalog::ScenarioCatalog,
    handlers::{
        callbacks::handle_callback_query,
        commands::{help, start, stats},
        messages::handle_message,
    },
    services::ServiceFactory,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting MedBuddy Telegram Bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool_config = PoolConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        ..PoolConfig::default()
    };
    let db_pool = create_pool(&pool_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool);

    // Load the scenario catalog
    info!(path = %settings.catalog.path, "Loading scenario catalog...");
    let catalog = Arc::new(ScenarioCatalog::load(&settings.catalog.path));
    if catalog.is_empty() {
        warn!("Scenario catalog is empty, dialogues cannot be started");
    } else {
        info!(scenarios = catalog.len(), "Scenario catalog loaded");
    }

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(settings.clone(), catalog, database_service)?;
    let services_arc = Arc::new(services);

    info!("Setting up bot handlers...");
    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![services_arc])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    if let Some(webhook_url) = &settings.bot.webhook_url {
        info!("Webhook URL configured: {}", webhook_url);
        info!("Note: Webhook setup not implemented in this version, falling back to polling");
    }

    info!("MedBuddy bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("MedBuddy bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<BotCommands>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle regular text and voice messages
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "MedBuddy Bot Commands")]
enum BotCommands {
    #[command(description = "Start the bot and show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Show your training statistics")]
    Stats,
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    services: Arc<ServiceFactory>,
) -> HandlerResult {
    let services = (*services).clone();

    let result = match cmd {
        BotCommands::Start => start::handle_start(bot, msg, services).await,
        BotCommands::Help => help::handle_help(bot, msg).await,
        BotCommands::Stats => stats::handle_stats(bot, msg, services).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = handle_message(bot, msg, services).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    services: Arc<ServiceFactory>,
) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = handle_callback_query(bot, query, services).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
