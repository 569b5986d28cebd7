use s3_roundtrip::{args, run_app};

fn main() {
    let args = args::args_checks();

    if let Err(e) = run_app(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
