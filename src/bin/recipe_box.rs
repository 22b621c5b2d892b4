//! Command-line front end for the recipe book.
//!
//! ```bash
//! recipe-box add --title "Pancakes" --ingredients "2 eggs, flour, milk" --steps "Mix. Fry." --tags breakfast
//! recipe-box list --search egg --sort title
//! recipe-box show 1
//! recipe-box favorite 1
//! recipe-box delete 1
//! ```

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use recipe_box::{
    Config, ConfigOverrides, FileStore, KeyValueStore, ListQuery, MealDbClient, RecipeBook,
    RecipeForm, RecipeId, SortMode,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recipe-box", version, about = "Manage your personal recipe collection")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding recipes and config.yaml
    #[arg(long, global = true, env = "RECIPE_BOX_DATA_DIR")]
    data_dir: Option<Utf8PathBuf>,

    /// TheMealDB API base URL
    #[arg(long, global = true, env = "RECIPE_BOX_API_URL")]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new recipe
    Add {
        #[arg(long)]
        title: String,

        /// Ingredients, comma or newline separated
        #[arg(long)]
        ingredients: String,

        #[arg(long)]
        steps: String,

        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// List recipes
    List {
        /// Only show recipes whose title or ingredients contain this text
        #[arg(long, short, default_value = "")]
        search: String,

        /// Sort mode: title, date or none
        #[arg(long)]
        sort: Option<String>,
    },

    /// Show a recipe with metadata from TheMealDB
    Show { id: RecipeId },

    /// Toggle the favorite flag of a recipe
    Favorite { id: RecipeId },

    /// Delete a recipe
    Delete {
        id: RecipeId,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::resolve(ConfigOverrides {
        data_dir: cli.data_dir,
        api_base_url: cli.api_url,
    })?;
    let mut book = RecipeBook::open(FileStore::new(config.data_dir.clone()))
        .with_context(|| format!("Failed to load recipes from {}", config.data_dir))?;

    match cli.command {
        Command::Add {
            title,
            ingredients,
            steps,
            tags,
        } => {
            let recipe = book.add(RecipeForm {
                title,
                ingredients,
                steps,
                tags,
            })?;
            println!("Added recipe {}: {}", recipe.id, recipe.title);
            print!("{}", book.list(&ListQuery::new("", config.default_sort)));
        }
        Command::List { search, sort } => {
            let sort = resolve_sort(sort.as_deref(), config.default_sort);
            print!("{}", book.list(&ListQuery::new(search, sort)));
        }
        Command::Show { id } => {
            let client = MealDbClient::new(&config.api_base_url, config.request_timeout)?;
            match book.show(id, &client).await {
                Some(view) => print!("{view}"),
                None => eprintln!("No recipe with id {id}"),
            }
        }
        Command::Favorite { id } => match book.toggle_favorite(id)? {
            Some(recipe) => {
                let state = if recipe.favorite { "favorited" } else { "unfavorited" };
                println!("{} {}", recipe.title, state);
                print!("{}", book.list(&ListQuery::new("", config.default_sort)));

                let client = MealDbClient::new(&config.api_base_url, config.request_timeout)?;
                if let Some(view) = book.show(id, &client).await {
                    println!();
                    print!("{view}");
                }
            }
            None => eprintln!("No recipe with id {id}"),
        },
        Command::Delete { id, yes } => {
            if delete_recipe(&mut book, id, yes, &mut prompt_stdin)? {
                println!("Deleted recipe {id}");
                print!("{}", book.list(&ListQuery::new("", config.default_sort)));
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "recipe_box=debug"
    } else {
        "recipe_box=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `--sort` wins over the configured default. Unknown names mean no sorting.
fn resolve_sort(arg: Option<&str>, default: SortMode) -> SortMode {
    arg.map_or(default, |s| s.parse().unwrap_or_default())
}

/// With `yes` the prompt is skipped entirely.
fn delete_recipe<S, P>(
    book: &mut RecipeBook<S>,
    id: RecipeId,
    yes: bool,
    prompt: &mut P,
) -> Result<bool>
where
    S: KeyValueStore,
    P: FnMut(&str) -> bool,
{
    let deleted = if yes {
        book.delete(id, &mut |_: &str| true)?
    } else {
        book.delete(id, prompt)?
    };
    Ok(deleted)
}

fn prompt_stdin(prompt: &str) -> bool {
    confirm_from(io::stdin().lock(), io::stdout(), prompt)
}

/// Asks a yes/no question. Anything but "y"/"yes" declines, as do I/O errors.
fn confirm_from<R: BufRead, W: Write>(mut input: R, mut output: W, prompt: &str) -> bool {
    if write!(output, "{prompt} [y/N] ").is_err() || output.flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
