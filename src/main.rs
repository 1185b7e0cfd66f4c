use clap::Parser;
use color_eyre::Result;
use fittrack::{Config, Database, Profile, Session, cli::{Cli, Commands}};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps config and data in a separate profile directory
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };
    let mut config = Config::load_with_profile(profile)?;
    if let Some(theme) = cli.theme.as_deref() {
        config.set_theme(theme)?;
    }

    fittrack::logging::init(&config.get_log_path(), &config.log_level);

    let db_path = config.get_database_path();
    let db = Database::new(
        db_path.to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?
    )?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let session = Session::for_user(cli.user.as_deref().or(config.default_user.as_deref()));
            let app = fittrack::tui::App::new(config, db, session).with_profile(profile);
            fittrack::tui::run_event_loop(app)?;
        }
        Commands::Post(command) => fittrack::cli::handle_post(command, &db, &config)?,
        Commands::Progress(command) => fittrack::cli::handle_progress(command)?,
        Commands::Diet(command) => fittrack::cli::handle_diet(command, &config)?,
    }

    Ok(())
}
