use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;

use pimidi_tools::chord::ChordProcessor;
use pimidi_tools::dx7::{bank, catalog, Dx7Controller};
use pimidi_tools::general::{check, forwarder, stdin_handler};
use pimidi_tools::io::output::MidiSink;
use pimidi_tools::io::{input, output, ports};
use pimidi_tools::thru::{ThruProcessor, MAX_PORT};
use pimidi_tools::{Config, EventProcessor};

#[derive(Parser)]
#[command(name = "pimidi-tools", version, about = "MIDI chord, DX7 and thru tools")]
struct Cli {
    /// Settings file with KEY=VALUE lines (environment variables take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Turn every note into a chord
    Chord {
        /// Logical input port id
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        input: i64,
        /// Logical output port id
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        output: i64,
        /// Semitone offsets, overriding CHORD_SEMITONES
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        semitones: Option<Vec<i32>>,
    },
    /// Program DX7 voice parameters from CC knobs via SysEx
    Dx7 {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        input: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        output: i64,
        /// DX7 device id 0-15, overriding DX7_DEVICE_ID
        #[arg(long)]
        device_id: Option<u8>,
    },
    /// Forward one input to several outputs
    Thru {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        input: i64,
        /// Number of outputs, starting at logical id 0
        #[arg(long, default_value_t = MAX_PORT)]
        outputs: usize,
    },
    /// Show resolved port names and the ports the system offers
    Ports,
    /// Print the DX7 parameter table and control banks
    Catalog {
        /// Show only the parameter with this exact name
        name: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved configuration as JSON
    Config,
}

#[derive(Serialize)]
struct CatalogDump {
    parameters: &'static [catalog::ParameterDescriptor],
    banks: &'static [catalog::ControlBank],
}

fn main() {
    let cli = Cli::parse();
    let log_level = init_logging(&cli);
    if let Err(err) = run(cli, log_level) {
        check::print_startup_failed(&format!("{:#}", err));
        std::process::exit(1);
    }
}

/// Our own targets are filtered at debug so `debug on` can raise the level at
/// runtime; the effective level is then set through `log::set_max_level`.
/// Returns the startup level, which `debug off` restores.
fn init_logging(cli: &Cli) -> LevelFilter {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("pimidi_tools", LevelFilter::Debug)
        .format_timestamp(None);
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
            builder.init();
            if cli.verbose || cli.quiet {
                log::warn!("RUST_LOG is set, ignoring --verbose/--quiet");
            }
            log::max_level()
        }
        Err(_) => {
            builder.init();
            log::set_max_level(level);
            level
        }
    }
}

fn run(cli: Cli, log_level: LevelFilter) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Command::Chord {
            input,
            output,
            semitones,
        } => {
            let semitones = semitones.unwrap_or_else(|| config.semitones.clone());
            let chord = ChordProcessor::new(&semitones);
            log::info!("Chord offsets: {:?}", chord.semitones());
            let input = ports::input_port_name(&config, input)?;
            let outputs = vec![ports::output_port_name(&config, output)?];
            run_processor("Chord generator", Box::new(chord), &input, &outputs, log_level)
        }
        Command::Dx7 {
            input,
            output,
            device_id,
        } => {
            let mut config = config;
            if let Some(id) = device_id {
                config.device_id = id;
            }
            let dx7 = Dx7Controller::from_config(&config)?;
            log::info!("DX7 MIDI controller started, device id {}", dx7.device_id());
            log::info!("{}", bank::describe_bank(&catalog::all_banks()[dx7.current_bank_index()]));
            let input = ports::input_port_name(&config, input)?;
            let outputs = vec![ports::output_port_name(&config, output)?];
            run_processor("DX7 controller", Box::new(dx7), &input, &outputs, log_level)
        }
        Command::Thru { input, outputs } => {
            let input = ports::input_port_name(&config, input)?;
            let outputs = (0..outputs as i64)
                .map(|id| ports::output_port_name(&config, id))
                .collect::<Result<Vec<_>, _>>()?;
            run_processor("MIDI thru", Box::new(ThruProcessor), &input, &outputs, log_level)
        }
        Command::Ports => print_ports(&config),
        Command::Catalog { name: Some(name), json } => print_parameter(&name, json),
        Command::Catalog { name: None, json } => print_catalog(json),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn run_processor(
    tool: &str,
    processor: Box<dyn EventProcessor>,
    input: &str,
    outputs: &[String],
    log_level: LevelFilter,
) -> anyhow::Result<()> {
    let mut sinks: Vec<Box<dyn MidiSink>> = Vec::with_capacity(outputs.len());
    let mut output_names = Vec::with_capacity(outputs.len());
    for wanted in outputs {
        let (conn, name) = output::open_output(wanted)
            .with_context(|| format!("failed to open output '{}'", wanted))?;
        log::info!("Using output port {}", name);
        sinks.push(Box::new(conn));
        output_names.push(name);
    }

    // Input callback -> channel -> forwarding thread, which owns the outputs
    // and the processor state.
    let (tx, rx) = channel();
    let forward_handle = forwarder::spawn_forwarder(processor, sinks, rx);

    let (conn_in, input_name) =
        input::open_input(input, tx).with_context(|| format!("failed to open input '{}'", input))?;
    log::info!("Using input port {}", input_name);
    check::print_ports_ready(tool, &input_name, &output_names);

    let exit_flag = Arc::new(AtomicBool::new(false));
    let stdin_handle = stdin_handler::spawn_stdin_handler(Arc::clone(&exit_flag), log_level);

    while !exit_flag.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    println!("Closing connections and exiting...");
    // Dropping the input closes the channel, which ends the forwarder.
    drop(conn_in);
    let _ = stdin_handle.join();
    let _ = forward_handle.join();
    Ok(())
}

fn print_ports(config: &Config) -> anyhow::Result<()> {
    println!("Logical ports:");
    for id in 0..ports::DEFAULT_PORT_COUNT {
        println!(
            "  {}: in = {}, out = {}",
            id,
            ports::input_port_name(config, id)?,
            ports::output_port_name(config, id)?
        );
    }
    for (id, name) in &config.input_ports {
        if *id as i64 >= ports::DEFAULT_PORT_COUNT {
            println!("  {}: in = {}", id, name);
        }
    }
    for (id, name) in &config.output_ports {
        if *id as i64 >= ports::DEFAULT_PORT_COUNT {
            println!("  {}: out = {}", id, name);
        }
    }

    match input::list_input_ports() {
        Ok(names) => {
            println!("\nAvailable input ports:");
            for (i, name) in names.iter().enumerate() {
                println!("  {}: {}", i, name);
            }
        }
        Err(err) => log::warn!("Cannot list input ports: {}", err),
    }
    match output::list_output_ports() {
        Ok(names) => {
            println!("\nAvailable output ports:");
            for (i, name) in names.iter().enumerate() {
                println!("  {}: {}", i, name);
            }
        }
        Err(err) => log::warn!("Cannot list output ports: {}", err),
    }
    Ok(())
}

fn print_parameter(name: &str, json: bool) -> anyhow::Result<()> {
    let p = catalog::find_by_name(name)
        .with_context(|| format!("no DX7 parameter named '{}'", name))?;
    if json {
        println!("{}", serde_json::to_string_pretty(p)?);
        return Ok(());
    }
    let banks: Vec<String> = catalog::all_banks()
        .iter()
        .filter_map(|b| {
            let slot = b.parameters.iter().position(|&id| id == p.id)?;
            Some(format!("{} slot {}", b.name, slot + 1))
        })
        .collect();
    println!("{:>3}  {}  {}-{}", p.id, p.name, p.min, p.max);
    if !banks.is_empty() {
        println!("     in {}", banks.join(", "));
    }
    Ok(())
}

fn print_catalog(json: bool) -> anyhow::Result<()> {
    if json {
        let dump = CatalogDump {
            parameters: catalog::all_parameters(),
            banks: catalog::all_banks(),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let width = catalog::longest_name_len();
    println!("{:>3}  {:<width$}  Range", "Id", "Name", width = width);
    for p in catalog::all_parameters() {
        println!("{:>3}  {:<width$}  {}-{}", p.id, p.name, p.min, p.max, width = width);
    }
    println!("\nBanks:");
    for (i, b) in catalog::all_banks().iter().enumerate() {
        let names: Vec<&str> = b
            .parameters
            .iter()
            .filter_map(|&id| catalog::lookup(id).ok())
            .map(|p| p.name)
            .collect();
        println!("{:>2}  {:<14}  {}", i, b.name, names.join(" | "));
    }
    Ok(())
}
