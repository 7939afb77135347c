fn main() {
    if let Err(err) = braindump::entry() {
        eprintln!("✗ {err}");
        std::process::exit(1);
    }
}
