use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use thiserror::Error;

use crate::advisor::{AdvisorClient, format_answer};
use crate::config::Config;
use crate::database::{Database, DatabaseError};
use crate::diet::{DietForm, DietPreference, MISSING_FIELDS_MESSAGE, generate_plan};
use crate::models::ValidationError;
use crate::posts::PostCollection;
use crate::progress::{ProgressForm, ProgressLog};

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "FitTrack - fitness tracking in the terminal")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    /// Start signed in as this user
    #[arg(long)]
    pub user: Option<String>,

    /// Theme to start with (light, dark or a [themes] entry from config)
    #[arg(long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Manage blog posts
    #[command(subcommand)]
    Post(PostCommand),
    /// Check a progress entry and show its BMI
    #[command(subcommand)]
    Progress(ProgressCommand),
    /// Diet plans and advice
    #[command(subcommand)]
    Diet(DietCommand),
}

#[derive(Subcommand)]
pub enum PostCommand {
    /// Publish a new post
    Add {
        /// Post text
        content: String,
        /// Image URL (a placeholder is used when omitted)
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a post by ID
    Delete {
        id: String,
    },
    /// List posts, newest first
    List,
}

#[derive(Args, Debug, Clone)]
pub struct ProgressArgs {
    /// Date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub date: String,
    /// Weight in kg
    #[arg(long, default_value = "")]
    pub weight: String,
    #[arg(long, default_value = "")]
    pub calories: String,
    #[arg(long, default_value = "")]
    pub steps: String,
    /// Diet score
    #[arg(long, default_value = "")]
    pub diet: String,
    /// Water score
    #[arg(long, default_value = "")]
    pub water: String,
    /// Sleep score
    #[arg(long, default_value = "")]
    pub sleep: String,
    /// Workout score
    #[arg(long, default_value = "")]
    pub workout: String,
}

impl From<ProgressArgs> for ProgressForm {
    fn from(args: ProgressArgs) -> Self {
        ProgressForm {
            date: args.date,
            weight: args.weight,
            calories: args.calories,
            steps: args.steps,
            diet: args.diet,
            water: args.water,
            sleep: args.sleep,
            workout: args.workout,
        }
    }
}

#[derive(Subcommand)]
pub enum ProgressCommand {
    /// Validate a progress entry and print it with its BMI (all fields required).
    /// Entries are not stored between runs.
    Add(ProgressArgs),
}

#[derive(Subcommand)]
pub enum DietCommand {
    /// Generate a diet plan
    Plan {
        #[arg(long, default_value = "")]
        height: String,
        #[arg(long, default_value = "")]
        weight: String,
        #[arg(long, default_value = "")]
        age: String,
        #[arg(long, default_value = "")]
        gender: String,
        /// Non-vegetarian plan
        #[arg(long)]
        non_veg: bool,
    },
    /// Ask the diet advisor a question
    Ask {
        question: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Advisor(String),
    #[error("No post with ID {0}")]
    PostNotFound(String),
}

/// Handle `post` subcommands
pub fn handle_post(command: PostCommand, db: &Database, config: &Config) -> Result<(), CliError> {
    let mut posts = PostCollection::load(db, &config.post_author, &config.default_post_image);

    match command {
        PostCommand::Add { content, image } => {
            match posts.add(db, &content, image.as_deref())? {
                Some(post) => println!("Post created successfully (ID: {})", post.id),
                None => println!("Nothing to post: content is empty"),
            }
        }
        PostCommand::Delete { id } => {
            if !posts.remove(db, &id)? {
                return Err(CliError::PostNotFound(id));
            }
            println!("Post deleted");
        }
        PostCommand::List => {
            if posts.is_empty() {
                println!("No posts yet. Start writing!");
            }
            for post in posts.posts() {
                println!("[{}] {} - {}", post.id, post.timestamp, post.author);
                println!("  {}", post.content);
                println!("  image: {}", post.image);
            }
        }
    }
    Ok(())
}

/// Handle `progress` subcommands
pub fn handle_progress(command: ProgressCommand) -> Result<(), CliError> {
    match command {
        ProgressCommand::Add(args) => {
            let mut log = ProgressLog::new();
            let e = log.add(&args.into())?;
            println!(
                "{}  weight {:.1} kg  BMI {:.1}  calories {}  steps {}  diet {}  water {}  sleep {}  workout {}",
                e.date, e.weight, e.bmi, e.calories, e.steps, e.diet, e.water, e.sleep, e.workout
            );
        }
    }
    Ok(())
}

/// Handle `diet` subcommands
pub fn handle_diet(command: DietCommand, config: &Config) -> Result<(), CliError> {
    match command {
        DietCommand::Plan { height, weight, age, gender, non_veg } => {
            let form = DietForm { height, weight, age, gender };
            let request = form.validate().inspect_err(|_| eprintln!("{}", MISSING_FIELDS_MESSAGE))?;
            let preference = if non_veg { DietPreference::NonVeg } else { DietPreference::Veg };
            let plan = generate_plan(preference, &request);
            termimad::print_text(&plan);
        }
        DietCommand::Ask { question } => {
            let client = AdvisorClient::new(
                &config.advisor_endpoint,
                Duration::from_secs(config.advisor_timeout_secs),
            )
            .map_err(|e| CliError::Advisor(e.to_string()))?;
            let result = client.ask(&question);
            let message = format_answer(&result);
            if result.is_err() {
                return Err(CliError::Advisor(message));
            }
            println!("{}", message);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_progress_add() {
        let cli = Cli::try_parse_from([
            "fittrack", "progress", "add", "--date", "2024-01-02", "--weight", "70", "--calories", "2000",
            "--steps", "9000", "--diet", "7", "--water", "8", "--sleep", "6", "--workout", "5",
        ])
        .unwrap();
        let Some(Commands::Progress(ProgressCommand::Add(args))) = cli.command else {
            panic!("expected progress add");
        };
        let form: ProgressForm = args.clone().into();
        assert_eq!(form.weight, "70");
        assert!(form.validate().is_ok());
        assert!(handle_progress(ProgressCommand::Add(args)).is_ok());
    }

    #[test]
    fn post_add_then_delete() {
        let db = Database::open_in_memory().unwrap();
        let config = Config::default();
        handle_post(PostCommand::Add { content: "hello".into(), image: None }, &db, &config).unwrap();

        let id = PostCollection::load(&db, "", "").posts()[0].id.clone();
        handle_post(PostCommand::Delete { id: id.clone() }, &db, &config).unwrap();
        assert!(matches!(
            handle_post(PostCommand::Delete { id }, &db, &config),
            Err(CliError::PostNotFound(_))
        ));
    }

    #[test]
    fn incomplete_progress_is_a_validation_error() {
        let args = ProgressArgs {
            date: "2024-01-02".into(),
            weight: "70".into(),
            calories: "2000".into(),
            steps: String::new(),
            diet: "7".into(),
            water: "8".into(),
            sleep: "6".into(),
            workout: "5".into(),
        };
        let err = handle_progress(ProgressCommand::Add(args)).unwrap_err();
        assert!(matches!(err, CliError::Validation(ValidationError::MissingField("steps"))));
    }
}
