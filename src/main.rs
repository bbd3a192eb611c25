use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

use tagbook::cli::Cli;
use tagbook::shell::ShellConfig;
use tagbook::shell::history::HistoryConfig;
use tagbook::{LogConfig, Manager, Shell, init_logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.app_config()?;
    init_logging(&LogConfig::new(config.log_path()).with_level(cli.log_level))?;
    log::info!("Using data directory {}", config.data_dir().display());

    let mut manager = Manager::new(config.clone())?;

    println!("Welcome to tagbook!");
    if manager.is_first_run() && !cli.register {
        println!("No accounts yet. Start with --register to create one.");
    }

    let username = match &cli.user {
        Some(user) => user.clone(),
        None => prompt_line("Username: ")?,
    };
    let password = rpassword::prompt_password("Password: ").context("Error reading password")?;

    if cli.register {
        let confirm = rpassword::prompt_password("Confirm password: ")
            .context("Error reading password")?;
        if confirm != password {
            bail!("passwords do not match");
        }
        manager.register(&username, &password)?;
        println!("Account '{}' created.", username.trim());
    }

    let mut session = manager.login(&username, &password)?;

    let shell = Shell::with_config(ShellConfig {
        history: HistoryConfig::new(config.history_path(session.username())),
        show_welcome: true,
    });
    shell.run(&mut session)
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Error reading username")?;
    Ok(input.trim().to_string())
}
