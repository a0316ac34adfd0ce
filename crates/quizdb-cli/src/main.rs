#[tokio::main]
async fn main() {
    quizdb_cli::init_tracing();
    if let Err(e) = quizdb_cli::run(std::env::args().collect()).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
