use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::Workspace;

#[derive(Parser, Debug)]
#[command(name = "sartor", version, about = "Tailoring shop CRM")]
struct Cli {
    /// Path to the snapshot data file. Overrides the config's store section.
    #[arg(long, global = true, env = "SARTOR_DATA")]
    data: Option<PathBuf>,

    /// Path to a shop config file (YAML).
    #[arg(long, global = true, env = "SARTOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schedule a new appointment, or edit one with --edit.
    Schedule {
        client_id: String,

        /// Appointment type: Consultation, Fitting or Pickup.
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,

        /// Start time as "YYYY-MM-DD HH:MM" on the shop clock.
        #[arg(long)]
        at: String,

        #[arg(long)]
        notes: Option<String>,

        /// Appointment id to replace in place.
        #[arg(long)]
        edit: Option<String>,
    },

    /// Order pipeline operations.
    Order {
        #[command(subcommand)]
        cmd: OrderCommand,
    },

    /// Client record operations.
    Client {
        #[command(subcommand)]
        cmd: ClientCommand,
    },

    /// Print the referral tree with attributed revenue.
    Tree,

    /// Verify the snapshot's referential and business invariants.
    Check,
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    /// Create an order in the initial stage.
    New {
        client_id: String,

        /// Garment type, e.g. "Suit" or "Shirt".
        #[arg(long = "type", value_name = "TYPE")]
        order_type: String,

        #[arg(long)]
        fabric: Option<String>,

        #[arg(long)]
        total: f64,

        #[arg(long, default_value_t = 0.0)]
        deposit: f64,

        /// Due date as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        due: Option<String>,

        /// Specification entries as key=value, repeatable.
        #[arg(long = "spec", value_name = "KEY=VALUE")]
        specs: Vec<String>,
    },

    /// Move an order to a pipeline stage, by stage name.
    Move { order_id: String, stage: String },

    /// Reposition an order within its current stage.
    Reorder { order_id: String, position: usize },

    /// Duplicate an order as a fresh one due today.
    Clone { order_id: String },

    /// Update an order's total and deposit, recomputing the balance.
    Price {
        order_id: String,

        #[arg(long)]
        total: f64,

        #[arg(long)]
        deposit: f64,
    },
}

#[derive(Subcommand, Debug)]
enum ClientCommand {
    /// Create a client record.
    New {
        first_name: String,
        last_name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// Free-form referral source, e.g. "Instagram".
        #[arg(long, default_value = "")]
        source: String,

        /// Id of the existing client who referred this one.
        #[arg(long = "referred-by")]
        referred_by: Option<String>,

        #[arg(long, default_value_t = false)]
        vip: bool,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Point a client's referrer at another client, or clear it.
    Refer {
        client_id: String,

        #[arg(long, conflicts_with = "clear")]
        to: Option<String>,

        #[arg(long, default_value_t = false)]
        clear: bool,
    },

    /// Merge one client into another, rewiring every linked record.
    Merge { keep_id: String, merge_id: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let ws = Workspace::open(cli.config.as_deref(), cli.data.as_deref())?;

    match cli.cmd {
        Command::Schedule {
            client_id,
            kind,
            at,
            notes,
            edit,
        } => commands::schedule::run(&ws, &client_id, &kind, &at, notes, edit),
        Command::Order { cmd } => match cmd {
            OrderCommand::New {
                client_id,
                order_type,
                fabric,
                total,
                deposit,
                due,
                specs,
            } => commands::order::new(
                &ws,
                &client_id,
                &order_type,
                fabric,
                total,
                deposit,
                due.as_deref(),
                &specs,
            ),
            OrderCommand::Move { order_id, stage } => commands::order::mv(&ws, &order_id, &stage),
            OrderCommand::Reorder { order_id, position } => {
                commands::order::reorder(&ws, &order_id, position)
            }
            OrderCommand::Clone { order_id } => commands::order::clone(&ws, &order_id),
            OrderCommand::Price {
                order_id,
                total,
                deposit,
            } => commands::order::price(&ws, &order_id, total, deposit),
        },
        Command::Client { cmd } => match cmd {
            ClientCommand::New {
                first_name,
                last_name,
                email,
                phone,
                source,
                referred_by,
                vip,
                notes,
            } => commands::client::new(
                &ws,
                sartor_engine::NewClient {
                    first_name,
                    last_name,
                    email,
                    phone,
                    referral_source: source,
                    referred_by_id: referred_by,
                    vip_status: vip,
                    notes,
                    ..Default::default()
                },
            ),
            ClientCommand::Refer { client_id, to, clear } => {
                commands::client::refer(&ws, &client_id, to.as_deref(), clear)
            }
            ClientCommand::Merge { keep_id, merge_id } => {
                commands::client::merge(&ws, &keep_id, &merge_id)
            }
        },
        Command::Tree => commands::tree::run(&ws),
        Command::Check => commands::check::run(&ws),
    }
}
