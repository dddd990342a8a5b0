fn main() {
    if let Err(err) = hubsets::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
