use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portal_core::client::{PortalClient, RequestScope, SharedToken, TokenProvider};
use portal_core::config::Config;
use portal_core::domain::{
    AccountId, FeatureFlagSet, Identity, LoginInput, NoteDraft, NoteQuery, Preferences, Role,
    Session,
};
use portal_core::navigation::{chrome, menu_for_path};
use portal_core::routing::{GuardPaths, NavigationOutcome, Navigator};
use portal_core::state::{FlagStore, SessionHandle, SessionStore};
use portal_core::telemetry;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Portal client core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Session to evaluate guards and menus against
#[derive(clap::Args)]
struct SessionArgs {
    /// Simulate a signed-in user with this role instead of asking the API
    #[arg(long, conflicts_with = "anonymous")]
    role: Option<Role>,
    /// Simulate a signed-out visitor
    #[arg(long)]
    anonymous: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path through the route table and its guard
    Route {
        path: String,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the navigation menu and layout chrome for a path
    Nav {
        #[arg(default_value = "/dashboard")]
        path: String,
        #[command(flatten)]
        session: SessionArgs,
        /// Enabled feature flags (skips loading flags from the API)
        #[arg(long = "flag")]
        flags: Vec<String>,
    },
    /// Note operations
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
    /// Feature flag operations
    Flags {
        #[command(subcommand)]
        command: FlagsCommand,
    },
    /// Sign in and print the issued token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum NotesCommand {
    List {
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    Get {
        id: String,
        #[arg(long)]
        account: Option<String>,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        public: bool,
        #[arg(long)]
        account: Option<String>,
    },
    Delete {
        id: String,
        #[arg(long)]
        account: Option<String>,
    },
}

#[derive(Subcommand)]
enum FlagsCommand {
    List,
    Set {
        name: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

fn scope(account: Option<String>) -> RequestScope {
    account
        .map(|id| RequestScope::Account(AccountId::new(id)))
        .unwrap_or_default()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn simulated(args: &SessionArgs) -> Option<Session> {
    if args.anonymous {
        return Some(Session::anonymous());
    }
    args.role.map(|role| {
        Session::authenticated(Identity {
            id: "cli".to_string(),
            email: "cli@localhost".to_string(),
            name: None,
            role,
            preferences: Preferences::default(),
        })
    })
}

/// Simulated session, or the identity behind the configured token.
async fn session_handle(
    args: &SessionArgs,
    client: &PortalClient,
    token: SharedToken,
) -> SessionHandle {
    if let Some(session) = simulated(args) {
        return SessionHandle::fixed(session);
    }
    let store = SessionStore::new(client.auth().clone(), token);
    SessionHandle::fixed(store.initialize().await)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let token = SharedToken::new(config.api.token.clone());
    let client = PortalClient::new(&config.api, Arc::new(token.clone()))
        .context("Failed to build API client")?;
    let paths = GuardPaths::from(&config.routes);

    match cli.command {
        Commands::Route { path, session } => {
            let handle = session_handle(&session, &client, token).await;
            let mut navigator = Navigator::new(handle, paths);
            match navigator.navigate(&path)? {
                NavigationOutcome::Rendered(route) => print_json(&json!({
                    "requested": path,
                    "path": route.path,
                    "page": route.page,
                    "params": route.params,
                    "history": navigator.history().entries(),
                }))?,
                NavigationOutcome::Pending { path } => {
                    print_json(&json!({ "pending": path }))?
                }
            }
        }
        Commands::Nav {
            path,
            session,
            flags,
        } => {
            let handle = session_handle(&session, &client, token).await;
            let snapshot = handle.snapshot();
            let flags: FeatureFlagSet = if flags.is_empty() {
                FlagStore::new().load(client.flags()).await
            } else {
                flags.into_iter().map(|name| (name, true)).collect()
            };
            let menu = menu_for_path(&snapshot, &flags, &path, &paths.landing)?;
            print_json(&json!({
                "menu": menu,
                "chrome": chrome(&snapshot),
            }))?;
        }
        Commands::Notes { command } => run_notes(&client, command).await?,
        Commands::Flags { command } => match command {
            FlagsCommand::List => print_json(&client.flags().list().await?.data)?,
            FlagsCommand::Set { name, enabled } => {
                print_json(&client.flags().set_enabled(&name, enabled).await?.data)?
            }
        },
        Commands::Login { email, password } => {
            let store = SessionStore::new(client.auth().clone(), token.clone());
            let identity = store.login(&LoginInput { email, password }).await?;
            info!(user_id = %identity.id, "signed in");
            print_json(&json!({
                "token": token.token(),
                "user": identity,
            }))?;
        }
    }

    Ok(())
}

async fn run_notes(client: &PortalClient, command: NotesCommand) -> Result<()> {
    let notes = client.notes();
    match command {
        NotesCommand::List {
            account,
            category,
            tag,
            search,
        } => {
            let query = NoteQuery {
                category,
                tag,
                search,
                ..NoteQuery::default()
            };
            let scope = scope(account);
            print_json(&notes.scoped(&scope).list(&query).await?.data)?;
        }
        NotesCommand::Get { id, account } => {
            let scope = scope(account);
            print_json(&notes.scoped(&scope).get(&id).await?.data)?;
        }
        NotesCommand::Create {
            title,
            content,
            category,
            tags,
            public,
            account,
        } => {
            let mut draft = NoteDraft {
                title,
                content,
                is_public: public,
                ..NoteDraft::default()
            };
            if let Some(category) = category {
                draft.category = category;
            }
            for tag in &tags {
                draft.add_tag(tag);
            }
            let input = draft.to_input()?;
            let scope = scope(account);
            print_json(&notes.scoped(&scope).create(&input).await?.data)?;
        }
        NotesCommand::Delete { id, account } => {
            let scope = scope(account);
            notes.scoped(&scope).delete(&id).await?;
            println!("deleted {}", id);
        }
    }
    Ok(())
}
