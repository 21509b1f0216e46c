use clap::{Parser, Subcommand};

mod account;
mod db;

#[derive(Debug, Parser)]
#[command(name = "emporium-app", about = "Emporium CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Account(account::AccountCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Account(command) => account::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
