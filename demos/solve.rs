use snapsolve::{ImagePayload, Solver, SolverConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    snapsolve::logger::init()?;

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "problem.png".to_string());
    let bytes = std::fs::read(&path)?;
    let image = ImagePayload::from_upload(&path, &bytes)?;

    let solver = Solver::new(SolverConfig::from_env())?;
    let answer = solver
        .solve("Explain how to solve this step by step", Some(&image))
        .await?;

    println!("{}", answer);
    Ok(())
}
