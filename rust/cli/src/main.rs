use drawpoker_cli::logging::init_logging;

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = drawpoker_cli::run(args, &mut out, &mut err);
    std::process::exit(code);
}
