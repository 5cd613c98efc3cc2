// apps/recipecli/src/main.rs

use clap::{Arg, ArgAction, ArgMatches, Command};
use sqlx::MySqlPool;
use std::process;
use tracing_subscriber::EnvFilter;

use recipe_lib::recipe_service::RecipeService;
use recipe_lib::repository::{IngredientRepository, RecipeRepository, TagRepository, UserRepository};
use recipe_lib::util::{connect_with_retry, MIGRATOR};

const DATABASE_URL: &str = "DATABASE_URL";
const CONNECT_RETRIES: u32 = 3;

fn cli() -> Command {
    Command::new("recipecli")
        .about("Recipe API operator utility")
        .arg(
            Arg::new("migrations")
                .long("migrations")
                .action(ArgAction::SetTrue)
                .help("Execute database migrations"),
        )
        .subcommand(
            Command::new("create-user")
                .about("Create a user and print its API token")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("name").long("name").required(true)),
        )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    if let Err(e) = run(matches).await {
        eprintln!("{}", e);
        process::exit(1);
    }
}

async fn run(matches: ArgMatches) -> Result<(), String> {
    let run_migrations = matches.get_flag("migrations");
    let create_user = matches.subcommand_matches("create-user");

    if !run_migrations && create_user.is_none() {
        cli().print_help().map_err(|e| e.to_string())?;
        return Ok(());
    }

    let db_url = std::env::var(DATABASE_URL).map_err(|_| format!("{} must be set", DATABASE_URL))?;
    let pool = connect_with_retry(&db_url, CONNECT_RETRIES)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;

    if run_migrations {
        run_recipe_lib_migrations(&pool).await?;
    }

    if let Some(args) = create_user {
        let email = args.get_one::<String>("email").map(String::as_str).unwrap_or_default();
        let name = args.get_one::<String>("name").map(String::as_str).unwrap_or_default();
        create_user_with_token(pool, email, name).await?;
    }

    Ok(())
}

async fn run_recipe_lib_migrations(pool: &MySqlPool) -> Result<(), String> {
    println!("Running migrations for recipe-lib...");
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| format!("Migration failed: {}", e))?;
    println!("Migrations applied successfully.");
    Ok(())
}

async fn create_user_with_token(pool: MySqlPool, email: &str, name: &str) -> Result<(), String> {
    let service = RecipeService::new(
        UserRepository::new(pool.clone()),
        IngredientRepository::new(pool.clone()),
        TagRepository::new(pool.clone()),
        RecipeRepository::new(pool),
    );

    let issued = service
        .create_user(email, name)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

    tracing::info!(user_id = issued.user.id, "user created from cli");
    println!("user {} <{}>", issued.user.id, issued.user.email);
    println!("token {}", issued.token);
    Ok(())
}
