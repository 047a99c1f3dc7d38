//! mars-rover CLI
//!
//! Feeds a command string (argument, file, or stdin) through the optimizer and
//! rover, or runs the line-based interactive control loop.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use glam::IVec2;
use mars_rover::logging::init_logging;
use mars_rover::{
    CommandOptimizer, Heading, Mission, NullMovePolicy, OptimizerConfig, RoverConfig, RoverError,
    describe_error, read_commands,
};
use std::io::{self, BufRead, Read};
use std::process;
use std::sync::mpsc;
use std::thread;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeadingArg {
    N,
    E,
    S,
    W,
}

impl From<HeadingArg> for Heading {
    fn from(arg: HeadingArg) -> Self {
        match arg {
            HeadingArg::N => Heading::North,
            HeadingArg::E => Heading::East,
            HeadingArg::S => Heading::South,
            HeadingArg::W => Heading::West,
        }
    }
}

#[derive(Parser)]
#[command(name = "mars-rover")]
#[command(about = "Drive a grid rover with F/B/L/R commands", long_about = None)]
#[command(group(ArgGroup::new("source").args(["commands", "file", "interactive"])))]
struct Args {
    /// Command string, e.g. FFLRB
    #[arg(short, long)]
    commands: Option<String>,

    /// Read the command string from a file
    #[arg(short, long)]
    file: Option<std::path::PathBuf>,

    /// Read control tokens (up, down, left, right, exit) from stdin, one per line
    #[arg(short, long, conflicts_with_all = ["trace", "json"])]
    interactive: bool,

    /// Print the state after every compressed move
    #[arg(long)]
    trace: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Drop runs that cancel out instead of emitting zero moves
    #[arg(long)]
    elide_null_moves: bool,

    /// Starting x coordinate
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    start_x: i32,

    /// Starting y coordinate
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    start_y: i32,

    /// Starting heading
    #[arg(long, value_enum, default_value = "n")]
    heading: HeadingArg,
}

fn main() {
    init_logging("warn");
    let args = Args::parse();

    if let Err(e) = run(args) {
        match e.downcast_ref::<RoverError>() {
            Some(rover_err) => eprintln!("{}", describe_error(rover_err)),
            None => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let rover_config = RoverConfig {
        start_position: IVec2::new(args.start_x, args.start_y),
        start_heading: args.heading.into(),
    };
    let null_moves = if args.elide_null_moves {
        NullMovePolicy::Elide
    } else {
        NullMovePolicy::Keep
    };
    let optimizer = CommandOptimizer::standard(OptimizerConfig { null_moves });
    let mut mission = Mission::new(rover_config, optimizer);

    if args.interactive {
        return run_interactive(&mut mission);
    }

    let commands = match (&args.commands, &args.file) {
        (Some(commands), _) => commands.clone(),
        (None, Some(path)) => read_commands(path)?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read commands from stdin")?;
            buf
        }
    };

    if args.trace {
        let steps = mission.calculate_route_traced(&commands)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&steps)?);
        } else {
            for step in &steps {
                println!("{:?} -> {}", step.applied, step.state);
            }
        }
        return Ok(());
    }

    let snapshot = mission.calculate_route(&commands)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{snapshot}");
    }
    Ok(())
}

fn run_interactive(mission: &mut Mission) -> Result<()> {
    println!("Interactive control: up, down, left, right; exit to quit.");
    println!("{}", mission.rover().snapshot());

    let (input_tx, input_rx) = mpsc::channel();
    let (output_tx, output_rx) = mpsc::channel::<String>();

    // Detached: blocks on stdin and ends with the process.
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(line).is_err() {
                break;
            }
        }
    });

    let printer = thread::spawn(move || {
        for line in output_rx {
            println!("{line}");
        }
    });

    mission.interactive_control(input_rx, output_tx)?;
    join_printer(printer)
}

fn join_printer(printer: thread::JoinHandle<()>) -> Result<()> {
    printer
        .join()
        .map_err(|_| anyhow::anyhow!("output thread panicked"))
}
