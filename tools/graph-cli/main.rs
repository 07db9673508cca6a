use clap::{Parser, ValueEnum};
use profiler_graph::prelude::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

/// Builds the entity graph of an extracted bundle and prints what is visible
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the entity snapshot JSON file
    snapshot_path: String,

    /// Optional path to a graph configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Node ids to toggle, applied in order
    #[arg(short, long = "toggle")]
    toggles: Vec<String>,

    /// Only keep the entities surrounding this application
    #[arg(short, long)]
    scope: Option<String>,

    /// Print the detail view of this node instead of the graph
    #[arg(short, long)]
    detail: Option<String>,

    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    let config = match &cli.config {
        Some(path) => GraphConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config from '{}': {}", path, e))
        }),
        None => GraphConfig::default(),
    };

    let mut snapshot = EntitySnapshot::from_file(&cli.snapshot_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load snapshot: {}", e)))
        .with_flattened_layouts(config.max_depth);
    if let Some(application_id) = &cli.scope {
        if snapshot.application(application_id).is_none() {
            exit_with_error(&format!(
                "Application '{}' is not part of the snapshot",
                application_id
            ));
        }
        snapshot = snapshot.scoped_to_application(application_id);
    }

    let build_start = Instant::now();
    let mut store = NodeGraphBuilder::new(&snapshot)
        .with_config(config.clone())
        .build();
    let build_duration = build_start.elapsed();

    if let Some(node_id) = &cli.detail {
        print_detail(&store, &snapshot, node_id, cli.format);
        return;
    }

    let mut controller = CollapseController::new(&mut store).with_config(&config);
    let mut graph = controller.assemble();
    for node_id in &cli.toggles {
        graph = controller
            .toggle(node_id)
            .unwrap_or_else(|e| exit_with_error(&format!("Toggle failed: {}", e)));
    }

    match cli.format {
        OutputFormat::Json => print_json(&graph),
        OutputFormat::Summary => {
            println!("--- Bundle Totals ---");
            for total in snapshot.totals() {
                println!("{:<14} {}", total.label, total.count);
            }

            println!("\n--- Visible Graph ---");
            println!("Stored Nodes:   {}", controller.store().len());
            println!("Visible Nodes:  {}", graph.nodes.len());
            println!("Visible Edges:  {}", graph.edges.len());
            for node in &graph.nodes {
                let marker = match (node.collapsible, node.expanded) {
                    (false, _) => " ",
                    (true, true) => "-",
                    (true, false) => "+",
                };
                println!("  {} {:<24} {:?} '{}'", marker, node.id, node.kind(), node.label);
            }

            println!("\n--- Performance Summary ---");
            println!("Graph Build:      {:?}", build_duration);
            println!("Total Execution:  {:?}", total_start.elapsed());
        }
    }
}

fn print_detail(
    store: &NodeStore,
    snapshot: &EntitySnapshot,
    node_id: &str,
    format: OutputFormat,
) {
    let request = show_detail(store, node_id)
        .unwrap_or_else(|e| exit_with_error(&format!("No detail available: {}", e)));

    match format {
        OutputFormat::Json => print_json(&request),
        OutputFormat::Summary => {
            println!("View:    {:?}", request.view);
            println!("Entity:  {}", request.entity_id);
            println!("Node:    {} ({:?})", request.node_id, request.kind);
            match request.resolve(snapshot) {
                Ok(entity) => println!("Found:   {:?}", entity),
                Err(e) => println!("Missing: {}", e),
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize output: {}", e)));
    println!("{}", json);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
