//! Interactive intersection
//!
//! Drive the car, the pedestrian and the signal from the terminal.
//!
//! Run with: cargo run --example intersection -- --signal "signal red"
//! Set RUST_LOG=crossing=debug to see every transition.

use clap::Parser;
use crossing::agent::{AgentRole, TransitionError};
use crossing::core::TransitionTable;
use crossing::intersection::{
    Intersection, IntersectionConfig, DEFAULT_CAR_STATE, DEFAULT_PEDESTRIAN_STATE,
    DEFAULT_SIGNAL_STATE,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Drive a car, a pedestrian and a traffic signal")]
struct Args {
    /// Initial car state
    #[arg(long, default_value = DEFAULT_CAR_STATE)]
    car: String,

    /// Initial pedestrian state
    #[arg(long, default_value = DEFAULT_PEDESTRIAN_STATE)]
    pedestrian: String,

    /// Initial signal colour
    #[arg(long, default_value = DEFAULT_SIGNAL_STATE)]
    signal: String,
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = IntersectionConfig::default()
        .car(args.car)
        .pedestrian(args.pedestrian)
        .signal(args.signal);

    let table = TransitionTable::intersection();
    let mut crossing = Intersection::new(&table, &config)?;

    println!("{}", crossing.car().current_event_label());
    println!("{}", crossing.pedestrian().current_event_label());
    println!("{}", crossing.signal().current_event_label());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        prompt("Enter agent as 'signal', 'man' or 'car' (or 'exit'): ")?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let input = line.trim();
        if input == "exit" {
            break;
        }

        let role = match input.parse::<AgentRole>() {
            Ok(role) => role,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let verb = match role {
            AgentRole::Signal => {
                println!("switching light");
                String::new()
            }
            AgentRole::Car | AgentRole::Pedestrian => {
                prompt(&format!("Enter command 'drive', 'walk' or 'stop' on {role}: "))?;
                match lines.next().transpose()? {
                    Some(verb) => verb.trim().to_string(),
                    None => break,
                }
            }
        };

        match role {
            AgentRole::Signal => match crossing.advance_signal() {
                Ok(report) => {
                    println!("{}", report.signal_event);
                    for forced in &report.forced {
                        match &forced.outcome {
                            Ok(event) => println!("{event}"),
                            Err(err) => println!("{} not updated: {err}", forced.role),
                        }
                    }
                }
                Err(err) => println!("{err}"),
            },
            _ => match crossing.command(role, &verb) {
                Ok(event) => println!("{event}"),
                Err(TransitionError::IllegalTransition { .. }) => {
                    println!("Cannot switch to this state")
                }
                Err(err) => println!("{err}"),
            },
        }

        let snapshot = crossing.snapshot();
        println!(
            "[{} | {} | {}]",
            snapshot.car, snapshot.pedestrian, snapshot.signal
        );
    }

    Ok(())
}
