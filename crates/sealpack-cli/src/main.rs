use std::process;

#[tokio::main]
async fn main() {
    process::exit(sealpack_cli::run().await);
}
