fn main() {
    if let Err(err) = argallery_cli::run() {
        eprintln!("argallery: {err}");
        std::process::exit(1);
    }
}
