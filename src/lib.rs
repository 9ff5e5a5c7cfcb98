//! Snap or upload a photo of a math problem, ask a question about it, and get
//! an explanation back from a hosted multimodal chat-completion model.
//!
//! ```no_run
//! use snapsolve::{ImagePayload, Solver, SolverConfig};
//!
//! # async fn run() -> snapsolve::Result<()> {
//! let solver = Solver::new(SolverConfig::from_env())?;
//! let bytes = std::fs::read("problem.png").map_err(snapsolve::ImageError::from)?;
//! let image = ImagePayload::from_upload("problem.png", &bytes)?;
//! let answer = solver.solve("Solve for x", Some(&image)).await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod payload;
pub mod session;
pub mod solver;
pub mod ui;

pub use config::{SolverConfig, SubmissionPolicy};
pub use error::{ErrorKind, ImageError, Result, SolveError};
pub use models::SolveRequest;
pub use payload::{ImagePayload, ImageSource};
pub use session::{CaptureSlot, SolveSession};
pub use solver::{CredentialSource, EnvCredentials, Solver, StaticCredentials, Transport};
pub use ui::{Layout, Page};
