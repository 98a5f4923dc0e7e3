fn main() {
    if let Err(err) = tokenplot::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
