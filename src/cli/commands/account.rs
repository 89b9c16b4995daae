//! Theme and session commands.

use super::App;
use crate::cli::args::ThemeAction;
use crate::core::SessionManager;
use crate::models::config::Config;
use crate::models::Theme;
use anyhow::Result;
use colored::Colorize;

/// Execute theme command.
pub fn execute_theme(config: &Config, action: Option<ThemeAction>) -> Result<()> {
    let app = App::local(config)?;
    app.core.restore();

    let theme = match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => app.core.theme(),
        ThemeAction::Toggle => app.core.toggle_theme(),
        ThemeAction::Dark => {
            app.core.set_theme(Theme::Dark);
            Theme::Dark
        }
        ThemeAction::Light => {
            app.core.set_theme(Theme::Light);
            Theme::Light
        }
    };

    println!("Theme: {}", theme.to_string().bold());
    Ok(())
}

/// Execute login command.
pub fn execute_login(config: &Config, username: Option<String>, password: &str) -> Result<()> {
    let app = App::local(config)?;
    let mut session = SessionManager::new(app.persistence);

    let username = username.unwrap_or_else(whoami::username);
    let user = session.login(&username, password)?;
    println!(
        "{} Signed in as {} <{}>",
        "[OK]".green(),
        user.name.bold(),
        user.email
    );
    Ok(())
}

/// Execute logout command.
pub fn execute_logout(config: &Config) -> Result<()> {
    let app = App::local(config)?;
    let mut session = SessionManager::new(app.persistence);

    if !session.is_signed_in() {
        println!("{} Not signed in", "[INFO]".cyan());
        return Ok(());
    }
    session.logout()?;
    println!("{} Signed out", "[OK]".green());
    Ok(())
}

/// Execute whoami command.
pub fn execute_whoami(config: &Config) -> Result<()> {
    let app = App::local(config)?;
    let session = SessionManager::new(app.persistence);

    match session.current_user() {
        Some(user) => {
            println!("{} ({})", user.name.bold(), user.username);
            println!("  Email:     {}", user.email);
            println!(
                "  Signed in: {}",
                user.signed_in_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
        None => println!("Not signed in"),
    }
    Ok(())
}
