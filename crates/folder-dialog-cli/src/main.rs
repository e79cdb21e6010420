use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use folder_dialog_core::test_harness::{run_session, SessionReport, SessionScript};
use folder_dialog_core::{DialogConfig, FolderKind, SubmitOutcome};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("folder-dialog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Folder creation dialog driver")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Dialog configuration file (TOML)"),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run a create-folder session against an in-memory store")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required_unless_present("script")
                        .help("Folder name to submit"),
                )
                .arg(
                    Arg::new("script")
                        .long("script")
                        .value_parser(value_parser!(std::path::PathBuf))
                        .conflicts_with("name")
                        .help("Session script (JSON)"),
                )
                .arg(
                    Arg::new("existing")
                        .long("existing")
                        .action(ArgAction::Append)
                        .help("Name already taken next to the new folder (repeatable)"),
                )
                .arg(Arg::new("team").long("team").help("Team URL slug"))
                .arg(Arg::new("parent").long("parent").help("Parent folder id"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(value_parser!(FolderKind))
                        .help("Folder kind: template or document"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the session report as JSON"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration as TOML"))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<DialogConfig> {
    match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            DialogConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))
        }
        None => Ok(DialogConfig::default()),
    }
}

fn build_script(args: &ArgMatches) -> anyhow::Result<SessionScript> {
    let mut script = match args.get_one::<std::path::PathBuf>("script") {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            serde_json::from_str(&source).context("parsing session script")?
        }
        None => {
            let name = args
                .get_one::<String>("name")
                .context("--name is required without --script")?;
            SessionScript::create(name.clone())
        }
    };

    if let Some(team) = args.get_one::<String>("team") {
        script = script.with_team(team.clone());
    }
    if let Some(parent) = args.get_one::<String>("parent") {
        script = script.with_parent(parent.clone());
    }
    if let Some(existing) = args.get_many::<String>("existing") {
        for name in existing {
            script = script.with_existing(name.clone());
        }
    }
    Ok(script)
}

fn print_report(report: &SessionReport) {
    for outcome in &report.submissions {
        match outcome {
            SubmitOutcome::Invalid(errors) => {
                for (field, message) in errors {
                    println!("invalid   {field}: {message}");
                }
            }
            SubmitOutcome::Ignored => println!("ignored"),
            SubmitOutcome::Created { record, path } => {
                println!("created   {} ({})", record.name, record.id);
                println!("navigate  {path}");
            }
            SubmitOutcome::Failed(error) => println!("failed    {}", error.message()),
            SubmitOutcome::Discarded => println!("discarded"),
        }
    }
    for notification in &report.notifications {
        match &notification.title {
            Some(title) => println!("toast     [{title}] {}", notification.description),
            None => println!("toast     {}", notification.description),
        }
    }
    println!("state     {:?}", report.final_state.phase);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let mut config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("simulate", args)) => {
            if let Some(kind) = args.get_one::<FolderKind>("kind") {
                config = config.with_kind(*kind);
            }
            let script = build_script(args)?;
            let report = run_session(config, &script).await?;
            tracing::info!(
                steps = script.steps.len(),
                created = report.created(),
                "Session finished"
            );

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Some(("config", _)) => {
            print!("{}", config.to_toml_string()?);
        }
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }

    Ok(())
}
