use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use dashboard_cli::commands;
use dashboard_cli::runtime::ChatOutcome;
use dashboard_core::model::ReportPeriod;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dashboard", about = "Terminal front end for the awareness dashboard demo")]
struct Cli {
    /// SQLite file standing in for browser local storage.
    #[arg(long, env = "DASHBOARD_DB", default_value = "dashboard.db")]
    db: String,

    /// Print the landing view, ignoring any subcommand.
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Today's reports, action items and alerts.
    Dashboard,
    /// Reports for a period.
    Reports {
        #[arg(long, value_enum, default_value_t = PeriodArg::Daily)]
        period: PeriodArg,
        /// Any day inside the period; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Team id, or `all`.
        #[arg(long, default_value = "all")]
        team: String,
    },
    /// Action items, optionally filtered by app.
    Actions {
        #[arg(long)]
        app: Vec<String>,
    },
    Teams,
    /// Ask the demo assistant a question.
    Search { query: String },
    /// Show a saved canned conversation.
    Open { chat_id: String },
    /// Recent chats as listed in the sidebar.
    Recent,
    /// Delete a saved chat from the recent list.
    Forget { chat_id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<PeriodArg> for ReportPeriod {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Daily => ReportPeriod::Daily,
            PeriodArg::Weekly => ReportPeriod::Weekly,
            PeriodArg::Monthly => ReportPeriod::Monthly,
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let state = dashboard_cli::build_state(&cli.db)?;
    let now = Utc::now();

    let command = match cli.command {
        Some(command) if !cli.demo => command,
        _ => Command::Dashboard,
    };

    match command {
        Command::Dashboard => dashboard_cli::run_demo(&state)?,
        Command::Reports { period, date, team } => {
            let anchor = date.unwrap_or_else(|| now.date_naive());
            let query = commands::report_query(period.into(), anchor, &team);
            print_json(&commands::list_reports(&state, &query))?;
        }
        Command::Actions { app } => {
            let mut board = state.action_board();
            for name in &app {
                match commands::parse_app(name) {
                    Some(app) => board.toggle_filter(app),
                    None => tracing::warn!(app = %name, "unknown app filter ignored"),
                }
            }
            print_json(&commands::list_action_items(&board, now))?;
        }
        Command::Teams => print_json(&commands::list_teams(&state))?,
        Command::Search { query } => match dashboard_cli::run_search(&state, &query).await? {
            ChatOutcome::Saved(record) => tracing::info!(chat_id = %record.id, "saved"),
            ChatOutcome::Fallback => {}
            ChatOutcome::Cancelled => eprintln!("cancelled"),
        },
        Command::Open { chat_id } => dashboard_cli::show_conversation(&state, &chat_id)?,
        Command::Recent => print_json(&commands::list_recent_chats(&state, now)?)?,
        Command::Forget { chat_id } => {
            if !commands::forget_chat(&state, &chat_id)? {
                tracing::warn!(chat_id = %chat_id, "nothing deleted");
            }
        }
    }

    Ok(())
}
