use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn print_colored(color: Color, text: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true));
    let _ = writeln!(&mut stdout, "{}", text);
    let _ = stdout.reset();
}

pub fn print_quick_help() {
    print_colored(Color::Blue, "Type 'help' for commands, 'exit' to quit");
}

/// Startup banner once all ports are open.
pub fn print_ports_ready(tool: &str, input: &str, outputs: &[String]) {
    print_colored(
        Color::Green,
        &format!("{} started | {} -> {}", tool, input, outputs.join(", ")),
    );
    print_quick_help();
}

pub fn print_startup_failed(err: &dyn std::fmt::Display) {
    print_colored(Color::Red, &format!("Error: {}", err));
}
