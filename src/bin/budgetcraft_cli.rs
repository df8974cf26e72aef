use budgetcraft::commands::run_cli;

fn main() {
    if let Err(err) = run_cli(std::env::args().skip(1)) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
