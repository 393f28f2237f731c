fn main() {
    // Errors are reported but the exit status stays 0: `record` runs from
    // shell hooks, and a failed record must not disturb the user's shell.
    if let Err(e) = scribe::cli::run() {
        eprintln!("Error: {:#}", e);
    }
}
