//! recipebox - command-line front end for the recipe backend
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use recipebox::repos::{
    BookRepository, MealPlanRepository, NewsletterRepository, RecipeRepository, Repository,
    ShoppingRepository, UserRepository,
};
use recipebox::{ApiClient, Config, CredentialStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = parse_args()?;
    match command {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("recipebox {}", recipebox::VERSION);
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load()?;
    let credentials = Arc::new(CredentialStore::open()?);
    let api = Arc::new(ApiClient::from_config(&config, credentials)?);

    match command {
        Command::Login { email } => login(api, &email).await,
        Command::Logout => {
            if UserRepository::new(api).logout() {
                println!("✓ Logged out");
            }
            Ok(())
        }
        Command::Whoami => whoami(&api),
        Command::Recipes { search } => recipes(api, search.as_deref()).await,
        Command::Books => books(api).await,
        Command::Shopping => shopping(api).await,
        Command::MealPlan { date } => meal_plan(api, date).await,
        Command::Newsletter { action } => newsletter(api, action).await,
        Command::Help | Command::Version => Ok(()),
    }
}

/// CLI commands
enum Command {
    Login { email: String },
    Logout,
    Whoami,
    Recipes { search: Option<String> },
    Books,
    Shopping,
    MealPlan { date: NaiveDate },
    Newsletter { action: NewsletterAction },
    Help,
    Version,
}

enum NewsletterAction {
    Status,
    Subscribe,
    Unsubscribe,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "login" => {
            let email = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing email\nExample: recipebox login me@example.com"))?
                .clone();
            Ok(Command::Login { email })
        }

        "logout" => Ok(Command::Logout),
        "whoami" => Ok(Command::Whoami),

        "recipes" => {
            let search = args
                .iter()
                .position(|a| a == "--search" || a == "-s")
                .and_then(|i| args.get(i + 1))
                .cloned();
            Ok(Command::Recipes { search })
        }

        "books" => Ok(Command::Books),
        "shopping" => Ok(Command::Shopping),

        "mealplan" => {
            let date = match args.get(2) {
                Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))?,
                None => Utc::now().date_naive(),
            };
            Ok(Command::MealPlan { date })
        }

        "newsletter" => {
            let action = match args.get(2).map(String::as_str) {
                None | Some("status") => NewsletterAction::Status,
                Some("subscribe") => NewsletterAction::Subscribe,
                Some("unsubscribe") => NewsletterAction::Unsubscribe,
                Some(other) => {
                    return Err(anyhow::anyhow!(
                        "Unknown newsletter action: {other}\nSupported: status, subscribe, unsubscribe"
                    ));
                }
            };
            Ok(Command::Newsletter { action })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'recipebox --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = recipebox::paths::config_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"🍲 recipebox - recipe backend client

USAGE:
    recipebox [COMMAND]

COMMANDS:
    login <email>                      Log in (password read from stdin)
    logout                             Forget the stored session
    whoami                             Show the stored session

    recipes [OPTIONS]                  List recipes
      Options:
        -s, --search <title>           Search by title

    books                              List your recipe books
    shopping                           Show the shopping list
    mealplan [YYYY-MM-DD]              Show the meal plan (default: today)
    newsletter [status|subscribe|unsubscribe]

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

CONFIG:
    {}
"#,
        config_path
    );
}

async fn login(api: Arc<ApiClient>, email: &str) -> Result<()> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;

    let session = UserRepository::new(api)
        .login(email, password.trim())
        .await
        .ok_or_else(|| anyhow::anyhow!("Login failed"))?;

    println!(
        "✓ Logged in as {}",
        session.username.as_deref().unwrap_or(email)
    );
    Ok(())
}

fn whoami(api: &ApiClient) -> Result<()> {
    let store = api.credentials();
    if store.token().is_none() {
        println!("Not logged in.");
        return Ok(());
    }

    println!("User:  {}", store.username().unwrap_or_default());
    println!("Email: {}", store.user_email().unwrap_or_default());
    println!("Role:  {}", store.user_role());
    if let Some(id) = store.user_id() {
        println!("Id:    {}", id);
    }
    if store.is_logged_in() {
        println!("Token: valid");
    } else {
        println!("Token: expired (run 'recipebox login')");
    }
    Ok(())
}

async fn recipes(api: Arc<ApiClient>, search: Option<&str>) -> Result<()> {
    let repo = RecipeRepository::new(api);
    let recipes = match search {
        Some(title) => repo.search(title).await,
        None => repo.list().await,
    }
    .ok_or_else(|| anyhow::anyhow!("Could not load recipes"))?;

    if recipes.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }

    for recipe in recipes {
        let rating = if recipe.reviews.is_empty() {
            "no reviews".to_string()
        } else {
            format!("★ {:.1} ({})", recipe.average_rating(), recipe.reviews.len())
        };
        println!(
            "  [{}] {} by {} · {}",
            recipe.id.unwrap_or_default(),
            recipe.title,
            recipe.author,
            rating
        );
    }
    Ok(())
}

async fn books(api: Arc<ApiClient>) -> Result<()> {
    let books = BookRepository::new(api)
        .current_user_books()
        .await
        .ok_or_else(|| anyhow::anyhow!("Could not load books"))?;

    if books.is_empty() {
        println!("No books yet.");
        return Ok(());
    }

    for book in books {
        let visibility = if book.is_public { "public" } else { "private" };
        println!(
            "  [{}] {} ({} recipes, {})",
            book.id.unwrap_or_default(),
            book.title,
            book.recipe_ids.len(),
            visibility
        );
    }
    Ok(())
}

async fn shopping(api: Arc<ApiClient>) -> Result<()> {
    let mut items = ShoppingRepository::new(api)
        .list()
        .await
        .ok_or_else(|| anyhow::anyhow!("Could not load the shopping list"))?;

    if items.is_empty() {
        println!("Shopping list is empty.");
        return Ok(());
    }

    items.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
    let mut current = None;
    for item in &items {
        if current != Some(&item.category) {
            println!("\n{}", item.category);
            current = Some(&item.category);
        }
        println!("  {} × {}", item.count, item.name);
    }
    Ok(())
}

async fn meal_plan(api: Arc<ApiClient>, date: NaiveDate) -> Result<()> {
    let Some(plan) = MealPlanRepository::new(api).for_date(date).await else {
        println!("Nothing planned for {}.", date);
        return Ok(());
    };

    println!("{}", plan.date.format("%A, %d %B %Y"));
    println!("{}", "─".repeat(40));
    for recipe in &plan.recipes {
        println!("  🍽  {}", recipe.title);
    }
    for note in &plan.notes {
        println!("  📝 {}", note.content);
    }
    Ok(())
}

async fn newsletter(api: Arc<ApiClient>, action: NewsletterAction) -> Result<()> {
    let repo = NewsletterRepository::new(api);
    match action {
        NewsletterAction::Status => {
            if repo.is_subscribed().await {
                println!("Subscribed to the newsletter.");
            } else {
                println!("Not subscribed.");
            }
        }
        NewsletterAction::Subscribe => println!("Subscribe: {}", repo.subscribe().await),
        NewsletterAction::Unsubscribe => println!("Unsubscribe: {}", repo.unsubscribe().await),
    }
    Ok(())
}
