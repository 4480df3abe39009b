fn main() {
    if let Err(error) = imgtools_client::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
