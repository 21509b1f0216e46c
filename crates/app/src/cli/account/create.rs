use std::sync::Arc;

use clap::Args;
use emporium_app::{
    access::Role,
    auth::password::{Argon2PasswordHasher, Password},
    context::Stores,
    database::{self, Db},
    domain::accounts::{AccountsManager, data::Registration},
};

#[derive(Debug, Args)]
pub(crate) struct CreateAccountArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    age: u16,

    /// One of `user`, `premium` or `admin`
    #[arg(long, default_value = "user")]
    role: Role,

    #[arg(long, env = "ACCOUNT_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAccountArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let stores = Stores::postgres(&Db::new(pool));

    let manager = AccountsManager::new(
        stores.accounts,
        stores.carts,
        Arc::new(Argon2PasswordHasher::new()),
    );

    let account = manager
        .provision(
            Registration {
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
                age: args.age,
                password: Password::new(args.password),
            },
            args.role,
        )
        .await
        .map_err(|error| format!("failed to create account: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("email: {}", account.email);
    println!("role: {}", account.role);
    println!("cart_uuid: {}", account.cart_uuid);

    Ok(())
}
