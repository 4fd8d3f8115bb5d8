fn main() {
    if let Err(err) = ortho_connector::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
