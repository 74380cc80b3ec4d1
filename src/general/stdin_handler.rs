use std::io::stdin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::LevelFilter;

/// What a console line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    Debug(bool),
    Help,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let cmd = line.trim();
    if cmd.is_empty()
        || cmd.eq_ignore_ascii_case("exit")
        || cmd.eq_ignore_ascii_case("quit")
        || cmd.eq_ignore_ascii_case("q")
    {
        return Command::Exit;
    }
    if cmd.eq_ignore_ascii_case("debug on") || cmd.eq_ignore_ascii_case("debug enable") {
        return Command::Debug(true);
    }
    if cmd.eq_ignore_ascii_case("debug off") || cmd.eq_ignore_ascii_case("debug disable") {
        return Command::Debug(false);
    }
    if cmd.eq_ignore_ascii_case("help") || cmd.eq_ignore_ascii_case("h") {
        return Command::Help;
    }
    Command::Unknown(cmd.to_string())
}

/// Log level for `debug on`/`debug off`, given the level the run started at.
pub fn debug_level(on: bool, startup: LevelFilter) -> LevelFilter {
    if on {
        startup.max(LevelFilter::Debug)
    } else {
        startup
    }
}

/// Spawn a thread that reads console commands. An empty line or `exit` sets
/// `exit_flag`. End of input only stops the thread, so the tools keep running
/// when started without a terminal.
pub fn spawn_stdin_handler(
    exit_flag: Arc<AtomicBool>,
    startup_level: LevelFilter,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) => {
                    log::debug!("Console closed, running until terminated");
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Console read failed: {}", err);
                    break;
                }
            }

            match parse_command(&line) {
                Command::Exit => {
                    exit_flag.store(true, Ordering::SeqCst);
                    break;
                }
                Command::Debug(on) => {
                    log::set_max_level(debug_level(on, startup_level));
                    println!("Debug {}", if on { "enabled" } else { "disabled" });
                }
                Command::Help => {
                    println!("Commands:");
                    println!("  debug on/off     - Enable/Disable verbose debug logging");
                    println!("  help/h           - Show this help");
                    println!("  exit/quit/q      - Exit program");
                }
                Command::Unknown(cmd) => {
                    println!("Unrecognized command: '{}'. Type 'help' for available commands.", cmd);
                }
            }
        }
    })
}
