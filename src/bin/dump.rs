//! Short `dump` binary that forwards to the `braindump` library.

fn main() {
    if let Err(err) = braindump::entry() {
        eprintln!("✗ {err}");
        std::process::exit(1);
    }
}
