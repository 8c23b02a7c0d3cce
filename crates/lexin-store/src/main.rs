//! `lexinctl`: inspect and govern a Lexin data directory

use anyhow::{anyhow, bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use lexin_store::prelude::*;
use lexin_store::{FileByteStore, StoreConfig, Workspace};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn kind_arg() -> Arg {
    Arg::new("kind")
        .required(true)
        .value_parser(value_parser!(EntityKind))
        .help("Entity family: project, prd or ui")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Entity id")
}

fn cli() -> Command {
    Command::new("lexinctl")
        .version(lexin_store::VERSION)
        .about("Inspect and govern versioned documents, designs and projects")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the stored collections"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List entities of one family")
                .arg(kind_arg()),
        )
        .subcommand(
            Command::new("history")
                .about("Show the version history of an entity")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("diff")
                .about("Compare two versions of a document or design")
                .arg(kind_arg())
                .arg(id_arg())
                .arg(Arg::new("from").required(true).help("Older version id"))
                .arg(Arg::new("to").required(true).help("Newer version id")),
        )
        .subcommand(
            Command::new("freeze")
                .about("Freeze a document or design")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("unfreeze")
                .about("Return a document or design to draft")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("insights")
                .about("Show delivery metrics of a project")
                .arg(Arg::new("project").required(true).help("Project id")),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexin_store=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();
    let data_dir = matches
        .get_one::<PathBuf>("data-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => StoreConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    let json = matches.get_flag("json");

    let mut store = FileByteStore::new(data_dir);
    let mut ws = Workspace::load(&store, config)
        .with_context(|| format!("loading workspace from {}", store.root().display()))?;

    match matches.subcommand() {
        Some(("list", args)) => list(&ws, kind(args)?, json),
        Some(("history", args)) => history(&ws, kind(args)?, &entity(args, "id")?, json),
        Some(("diff", args)) => {
            let from = VersionId::new(string(args, "from")?);
            let to = VersionId::new(string(args, "to")?);
            diff(&ws, kind(args)?, &entity(args, "id")?, &from, &to, json)
        }
        Some((name @ ("freeze" | "unfreeze"), args)) => {
            let status = if name == "freeze" {
                GovernanceStatus::Frozen
            } else {
                GovernanceStatus::Draft
            };
            let id = entity(args, "id")?;
            let transition = match kind(args)? {
                EntityKind::Prd => ws.set_document_governance_status(&id, status)?,
                EntityKind::Ui => ws.set_design_governance_status(&id, status)?,
                EntityKind::Project => bail!("projects carry no governance status"),
            };
            ws.save(&mut store)?;
            println!("{id}: {} -> {}", transition.from, transition.to);
            Ok(())
        }
        Some(("insights", args)) => {
            let insights = ws.project_insights(&entity(args, "project")?)?;
            if json {
                print_json(&insights)
            } else {
                println!("Project {} (v{})", insights.project_id, insights.project_version);
                println!("  Documents: {} ({}% completed)", insights.document_count, insights.document_completion_rate);
                println!("  Designs: {} ({}% completed)", insights.design_count, insights.design_completion_rate);
                println!("  Document changes: {}", insights.document_change_count);
                println!("  Design redos: {}", insights.design_redo_count);
                println!(
                    "  Changes after freeze: {} ({}%)",
                    insights.changes_after_freeze, insights.freeze_change_ratio
                );
                println!("  Latest activity: {}", insights.latest_activity);
                println!("  Landing cycle: {} days", insights.landing_cycle_days);
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

fn string(args: &ArgMatches, name: &str) -> Result<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing argument <{name}>"))
}

fn entity(args: &ArgMatches, name: &str) -> Result<EntityId> {
    string(args, name).map(EntityId::new)
}

fn kind(args: &ArgMatches) -> Result<EntityKind> {
    args.get_one::<EntityKind>("kind")
        .copied()
        .ok_or_else(|| anyhow!("missing argument <kind>"))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn list(ws: &Workspace, kind: EntityKind, json: bool) -> Result<()> {
    match (kind, json) {
        (EntityKind::Prd, true) => print_json(ws.documents()),
        (EntityKind::Ui, true) => print_json(ws.designs()),
        (EntityKind::Project, true) => print_json(ws.projects()),
        (EntityKind::Prd, false) => {
            for doc in ws.documents().iter() {
                println!(
                    "{}  v{}  {:<6}  {}",
                    doc.id(),
                    doc.history().current_version_number(),
                    doc.governance_status().as_str(),
                    doc.fields().title
                );
            }
            Ok(())
        }
        (EntityKind::Ui, false) => {
            for design in ws.designs().iter() {
                println!(
                    "{}  v{}  {:<6}  {}",
                    design.id(),
                    design.history().current_version_number(),
                    design.governance_status().as_str(),
                    design.fields().title
                );
            }
            Ok(())
        }
        (EntityKind::Project, false) => {
            for project in ws.projects().iter() {
                println!(
                    "{}  v{}  {}",
                    project.id(),
                    project.history().current_version_number(),
                    project.fields().title
                );
            }
            Ok(())
        }
    }
}

fn print_versions<S>(versions: &[VersionRecord<S>], json: bool) -> Result<()>
where
    VersionRecord<S>: Serialize,
{
    if json {
        return print_json(versions);
    }
    for record in versions {
        println!(
            "v{:<3} {}  {}  {}  {}{}",
            record.version(),
            record.id(),
            record.created_at(),
            record.created_by(),
            record.summary(),
            record
                .change_request_id()
                .map(|request| format!("  [{request}]"))
                .unwrap_or_default()
        );
    }
    Ok(())
}

fn history(ws: &Workspace, kind: EntityKind, id: &EntityId, json: bool) -> Result<()> {
    match kind {
        EntityKind::Prd => print_versions(ws.document_versions(id)?, json),
        EntityKind::Ui => print_versions(ws.design_versions(id)?, json),
        EntityKind::Project => print_versions(ws.project_versions(id)?, json),
    }
}

fn diff(
    ws: &Workspace,
    kind: EntityKind,
    id: &EntityId,
    from: &VersionId,
    to: &VersionId,
    json: bool,
) -> Result<()> {
    let summary = match kind {
        EntityKind::Prd => ws.diff_document_versions(id, from, to)?,
        EntityKind::Ui => ws.diff_design_versions(id, from, to)?,
        EntityKind::Project => bail!("project versions are compared by their child version ids"),
    };
    if json {
        print_json(&summary)
    } else {
        println!("{}", ws.describe(&summary));
        Ok(())
    }
}
