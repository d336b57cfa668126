fn main() {
    if let Err(e) = shapejoin::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
