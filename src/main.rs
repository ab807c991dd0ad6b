use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use stockpile::auth::UserId;
use stockpile::config::Config;
use stockpile::inventory::MaterialId;
use stockpile::service::SignUp;
use stockpile::{AccountService, InventoryService, Outcome};

#[derive(Parser)]
#[command(name = "stockpile", version, about = "Multi-user inventory tracker")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "STOCKPILE_CONFIG")]
    config: Option<String>,

    /// Database URI, overrides `db_path` from the configuration
    #[arg(long, env = "STOCKPILE_DB")]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Credentials {
    #[arg(long, env = "STOCKPILE_USER")]
    user: String,
    #[arg(long, env = "STOCKPILE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database tables if they do not exist
    Init,
    /// Create an account and log it in
    Register {
        #[arg(long)]
        user: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOCKPILE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Check credentials and print the user id
    Login(Credentials),
    /// Add a material to the inventory
    Add {
        #[command(flatten)]
        creds: Credentials,
        name: String,
        quantity: u32,
        price: f64,
    },
    /// Overwrite name, quantity and price of a material
    Edit {
        #[command(flatten)]
        creds: Credentials,
        id: MaterialId,
        name: String,
        quantity: u32,
        price: f64,
    },
    /// Rename a material
    Rename {
        #[command(flatten)]
        creds: Credentials,
        id: MaterialId,
        name: String,
    },
    /// Change the unit price of a material
    SetPrice {
        #[command(flatten)]
        creds: Credentials,
        name: String,
        price: f64,
    },
    /// Change the quantity of a material
    SetQuantity {
        #[command(flatten)]
        creds: Credentials,
        name: String,
        quantity: u32,
    },
    /// Remove a material
    Delete {
        #[command(flatten)]
        creds: Credentials,
        name: String,
    },
    /// Print one material
    Show {
        #[command(flatten)]
        creds: Credentials,
        id: MaterialId,
    },
    /// Print the whole inventory with totals
    List {
        #[command(flatten)]
        creds: Credentials,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match cli.config.as_deref() {
        Some(path) => {
            Config::from_file(path).with_context(|| format!("loading configuration {path}"))?
        }
        None => Config::default(),
    };
    if let Some(db) = cli.db {
        cfg.db_path = db;
    }
    stockpile::logging::init(&cfg);

    let (accounts, inventory) = stockpile::connect(&cfg)
        .await
        .with_context(|| format!("opening database {}", cfg.db_path))?;

    run(cli.command, &accounts, &inventory).await
}

async fn login(accounts: &AccountService, creds: &Credentials) -> anyhow::Result<UserId> {
    match accounts.authenticate(&creds.user, &creds.password).await {
        Some(id) => Ok(id),
        None => bail!("invalid username or password"),
    }
}

/// Resolve a material id the logged-in user is allowed to touch.
async fn owned(
    inventory: &InventoryService,
    user_id: UserId,
    id: MaterialId,
) -> anyhow::Result<stockpile::inventory::MaterialRecord> {
    match inventory.material_by_id(id).await {
        Some(record) if record.user_id == user_id => Ok(record),
        _ => bail!("no material with id {id}"),
    }
}

fn report(outcome: Outcome, what: &str) -> anyhow::Result<()> {
    match outcome {
        Outcome::Done => {
            println!("{what}");
            Ok(())
        }
        Outcome::Duplicate => bail!("a material with that name already exists"),
        Outcome::Rejected => bail!("invalid input"),
        Outcome::Failed => bail!("storage error, see log"),
    }
}

fn check(ok: bool, what: &str) -> anyhow::Result<()> {
    if ok {
        println!("{what}");
        Ok(())
    } else {
        bail!("operation failed")
    }
}

async fn run(
    command: Command,
    accounts: &AccountService,
    inventory: &InventoryService,
) -> anyhow::Result<()> {
    match command {
        Command::Init => {
            println!("database ready");
            Ok(())
        }
        Command::Register {
            user,
            email,
            password,
        } => match accounts.sign_up(&user, &email, &password).await {
            SignUp::Created(id) => {
                println!("account created, user id {id}");
                Ok(())
            }
            SignUp::Duplicate => bail!("username or email already exists"),
            SignUp::Failed => bail!("registration failed"),
        },
        Command::Login(creds) => {
            let id = login(accounts, &creds).await?;
            println!("{id}");
            Ok(())
        }
        Command::Add {
            creds,
            name,
            quantity,
            price,
        } => {
            let user_id = login(accounts, &creds).await?;
            let outcome = inventory
                .add_material_outcome(user_id, &name, quantity, price)
                .await;
            report(outcome, "material added")
        }
        Command::Edit {
            creds,
            id,
            name,
            quantity,
            price,
        } => {
            let user_id = login(accounts, &creds).await?;
            owned(inventory, user_id, id).await?;
            let outcome = inventory
                .update_material_outcome(id, &name, quantity, price)
                .await;
            report(outcome, "material updated")
        }
        Command::Rename { creds, id, name } => {
            let user_id = login(accounts, &creds).await?;
            owned(inventory, user_id, id).await?;
            check(
                inventory.rename_material(id, &name).await,
                "material renamed",
            )
        }
        Command::SetPrice { creds, name, price } => {
            let user_id = login(accounts, &creds).await?;
            check(
                inventory.set_price(user_id, &name, price).await,
                "price updated",
            )
        }
        Command::SetQuantity {
            creds,
            name,
            quantity,
        } => {
            let user_id = login(accounts, &creds).await?;
            check(
                inventory.set_quantity(user_id, &name, quantity).await,
                "quantity updated",
            )
        }
        Command::Delete { creds, name } => {
            let user_id = login(accounts, &creds).await?;
            check(
                inventory.delete_material(user_id, &name).await,
                "material deleted",
            )
        }
        Command::Show { creds, id } => {
            let user_id = login(accounts, &creds).await?;
            let record = owned(inventory, user_id, id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Command::List { creds, json } => {
            let user_id = login(accounts, &creds).await?;
            let Some(dashboard) = inventory.dashboard(accounts, user_id).await else {
                bail!("user {user_id} not found");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
                return Ok(());
            }
            println!("Inventory for {}", dashboard.username);
            println!(
                "{:>6}  {:<24} {:>10} {:>12} {:>12}",
                "id", "name", "quantity", "price", "total"
            );
            for (name, entry) in &dashboard.materials {
                println!(
                    "{:>6}  {:<24} {:>10} {:>12.2} {:>12.2}",
                    entry.id, name, entry.quantity, entry.price, entry.total
                );
            }
            println!("{:>68.2}", dashboard.total_value);
            Ok(())
        }
    }
}
