//! `wayfind` - CLI for wayfinder
//!
//! This binary manages the destination catalog, runs the location matcher
//! against ad-hoc observations, and prints spoken walkthroughs.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use wayfinder::cli::{
    AddCommand, Cli, Command, ConfigCommand, ExportCommand, GuideCommand, ImportCommand,
    ListCommand, LocateCommand, RemoveCommand, ShowCommand, UpdateCommand,
};
use wayfinder::waypoint::{Fingerprint, GpsFix, NavigationStep, Waypoint, WaypointKind};
use wayfinder::{
    init_logging, CatalogExport, Config, GuidanceEvent, GuidanceSession, Matcher, Observation,
    Store,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::Update(cmd) => handle_update(&config, &cmd),
        Command::Remove(cmd) => handle_remove(&config, &cmd),
        Command::Locate(cmd) => handle_locate(&config, &cmd),
        Command::Guide(cmd) => handle_guide(&config, &cmd),
        Command::Export(cmd) => handle_export(&config, &cmd),
        Command::Import(cmd) => handle_import(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the catalog store, seeding the demo catalog on first use.
fn open_store(config: &Config) -> anyhow::Result<Store> {
    let path = config.database_path();
    let mut store =
        Store::open(&path).with_context(|| format!("opening catalog at {}", path.display()))?;
    if config.storage.seed_defaults {
        store.seed_defaults()?;
    }
    Ok(store)
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let waypoints = store.list()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&waypoints)?);
        return Ok(());
    }

    if waypoints.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    for waypoint in &waypoints {
        let hints = match (&waypoint.gps, &waypoint.fingerprint) {
            (Some(_), Some(_)) => "gps+wifi",
            (Some(_), None) => "gps",
            (None, Some(_)) => "wifi",
            (None, None) => "-",
        };
        println!(
            "{}  {:<28} {:<10} hints: {:<8} steps: {}",
            waypoint.id,
            waypoint.name,
            waypoint.kind,
            hints,
            waypoint.steps.len()
        );
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let waypoint = store
        .get(&cmd.id)?
        .ok_or_else(|| wayfinder::Error::waypoint_not_found(&cmd.id))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&waypoint)?);
        return Ok(());
    }

    println!("{} ({})", waypoint.name, waypoint.kind);
    println!("  id: {}", waypoint.id);
    if let Some(gps) = &waypoint.gps {
        println!("  gps: {}, {}", gps.lat, gps.lon);
    }
    if let Some(fp) = &waypoint.fingerprint {
        println!("  fingerprint ({} APs):", fp.len());
        for (ap, dbm) in &fp.0 {
            println!("    {ap}: {dbm} dBm");
        }
    }
    println!("  steps:");
    for (i, step) in waypoint.steps.iter().enumerate() {
        println!("    {}. {}", i + 1, step.spoken_text());
    }
    Ok(())
}

/// A waypoint as written by an administrator: everything but the id,
/// which the store assigns.
#[derive(Debug, Deserialize)]
struct WaypointDraft {
    name: String,
    kind: WaypointKind,
    #[serde(default)]
    gps: Option<GpsFix>,
    #[serde(default)]
    fingerprint: Option<Fingerprint>,
    #[serde(default)]
    steps: Vec<NavigationStep>,
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("reading {}", cmd.file.display()))?;
    let draft: WaypointDraft = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", cmd.file.display()))?;

    let mut waypoint = Waypoint::new(draft.name, draft.kind, draft.steps);
    waypoint.gps = draft.gps;
    waypoint.fingerprint = draft.fingerprint;

    let mut store = open_store(config)?;
    store.insert(&waypoint)?;

    println!("Added {} with id {}", waypoint.name, waypoint.id);
    Ok(())
}

fn handle_update(config: &Config, cmd: &UpdateCommand) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("reading {}", cmd.file.display()))?;
    let draft: WaypointDraft = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", cmd.file.display()))?;

    let waypoint = Waypoint {
        id: cmd.id.clone(),
        name: draft.name,
        kind: draft.kind,
        gps: draft.gps,
        fingerprint: draft.fingerprint,
        steps: draft.steps,
    };

    let mut store = open_store(config)?;
    store.update(&waypoint)?;

    println!("Updated {} ({})", waypoint.name, waypoint.id);
    Ok(())
}

fn handle_remove(config: &Config, cmd: &RemoveCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    if store.delete(&cmd.id)? {
        println!("Removed {}", cmd.id);
        Ok(())
    } else {
        Err(wayfinder::Error::waypoint_not_found(&cmd.id).into())
    }
}

/// Build the observation fix from `--lat`/`--lon`, rejecting coordinates
/// outside the valid ranges.
fn observation_fix(lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<Option<GpsFix>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let fix = GpsFix::new(lat, lon);
            anyhow::ensure!(
                fix.is_valid(),
                "coordinates out of range: lat {lat}, lon {lon}"
            );
            Ok(Some(fix))
        }
        _ => Ok(None),
    }
}

fn handle_locate(config: &Config, cmd: &LocateCommand) -> anyhow::Result<()> {
    let gps = observation_fix(cmd.lat, cmd.lon)?;

    let fingerprint = match &cmd.scan {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(
                serde_json::from_str::<Fingerprint>(&text)
                    .with_context(|| format!("parsing {}", path.display()))?,
            )
        }
        None => None,
    };

    let observation = Observation { fingerprint, gps };
    anyhow::ensure!(
        !observation.is_empty(),
        "nothing to match: give --lat/--lon and/or --scan"
    );

    let store = open_store(config)?;
    let catalog = store.list()?;
    let matcher = Matcher::new(config.matcher);

    match matcher.best_match(&catalog, &observation) {
        Some(result) if cmd.json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some(result) => {
            println!("Best match: {} ({})", result.waypoint_name, result.waypoint_id);
            println!("  score: {:.2}", result.score);
            if let Some(d) = result.wifi_distance_dbm {
                println!("  mean signal difference: {d:.1} dBm");
            }
            if let Some(d) = result.gps_distance_m {
                println!("  distance: {d:.1} m");
            }
        }
        None if cmd.json => println!("null"),
        None => println!("No destination matches the observation."),
    }
    Ok(())
}

fn handle_guide(config: &Config, cmd: &GuideCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let waypoint = store
        .get(&cmd.id)?
        .ok_or_else(|| wayfinder::Error::waypoint_not_found(&cmd.id))?;

    let mut session = GuidanceSession::new(waypoint);
    println!("Navigating to {}", session.waypoint().name);

    loop {
        if session.is_arrived() {
            println!("{}", session.arrival_text());
            break;
        }
        let (current, total) = session.step_counter();
        println!(
            "Step {current} of {total} (arrow {:+.0}°): {}",
            session.rotation_deg(),
            session.spoken_text()
        );
        if let GuidanceEvent::Arrived = session.advance() {
            println!("{}", session.arrival_text());
            break;
        }
    }
    Ok(())
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let snapshot = store.export()?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            println!(
                "Exported {} waypoints to {}",
                snapshot.waypoints.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn handle_import(config: &Config, cmd: &ImportCommand) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("reading {}", cmd.file.display()))?;
    let snapshot: CatalogExport = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", cmd.file.display()))?;

    let mut store = open_store(config)?;
    let imported = store.import(&snapshot)?;
    println!("Imported {imported} waypoints");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!("  Seed defaults:   {}", config.storage.seed_defaults);
                println!();
                println!("[Matcher]");
                println!("  Wi-Fi weight:    {}", config.matcher.wifi_weight);
                println!("  GPS weight:      {}", config.matcher.gps_weight);
                println!("  GPS range (m):   {}", config.matcher.max_gps_range_m);
                println!("  Min shared APs:  {}", config.matcher.min_shared_aps);
                println!();
                println!("[Speech]");
                println!("  Language:        {}", config.speech.language);
                println!("  Rate:            {}", config.speech.rate);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
