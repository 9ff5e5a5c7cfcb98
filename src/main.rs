use snapsolve::{
    logger::{self, LoggerConfig},
    ImagePayload, ImageSource, Layout, Page, SolveSession, Solver, SolverConfig,
};
use std::env;
use std::process::ExitCode;

const USAGE: &str =
    "usage: snapsolve [--camera PATH | --upload PATH] [--layout tabs|columns|stacked] [PROMPT...]";

struct Args {
    image: Option<(ImageSource, String)>,
    layout: Layout,
    prompt: String,
}

fn parse_args() -> Result<Args, String> {
    let mut image = None;
    let mut layout = Layout::Tabs;
    let mut prompt = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--camera" | "--upload" => {
                if image.is_some() {
                    return Err("use either --camera or --upload, not both".to_string());
                }
                let path = args.next().ok_or_else(|| format!("{} needs a path", arg))?;
                let source = if arg == "--camera" {
                    ImageSource::Camera
                } else {
                    ImageSource::Upload
                };
                image = Some((source, path));
            }
            "--layout" => {
                let value = args.next().ok_or("--layout needs a value")?;
                layout = Layout::parse(&value).ok_or_else(|| format!("unknown layout {}", value))?;
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => prompt.push(arg),
        }
    }

    Ok(Args {
        image,
        layout,
        prompt: prompt.join(" "),
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    if let Err(e) = logger::init_with_config(LoggerConfig::from_env()) {
        eprintln!("{}", e);
    }
    if !dotenv_loaded {
        log::debug!("No .env file found, using process environment");
    }

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    let config = SolverConfig::from_env();
    let page = Page::new(args.layout).with_api_key_var(config.api_key_var.clone());
    print!("{}", page.render_header());

    let mut session = SolveSession::new();
    if let Some((source, path)) = &args.image {
        match ImagePayload::open(path, *source) {
            Ok(image) => match source {
                ImageSource::Camera => session.capture(image),
                ImageSource::Upload => session.upload(image),
            },
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let solver = match Solver::new(config) {
        Ok(solver) => solver,
        Err(e) => {
            println!("{}", page.render_error(&e));
            return ExitCode::FAILURE;
        }
    };

    let request = session.prepare(args.prompt);
    println!("{}", page.processing_label);

    match solver.solve_request(&request).await {
        Ok(answer) => {
            println!("{}", page.done_label);
            println!("{}", page.render_solution(&answer));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", page.render_error(&e));
            ExitCode::FAILURE
        }
    }
}
