use std::io;

use ai_commit::{
   api::ChatClient,
   config::CommitConfig,
   error::{CommitGenError, Result},
   generator::MessageGenerator,
   git::GitCli,
   session::{Outcome, Session},
   style,
   types::Args,
};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
   let level = match verbosity {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
   };
   let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

   tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .with_target(false)
      .with_thread_ids(false)
      .init();
}

/// Apply CLI overrides to config
fn apply_cli_overrides(config: &mut CommitConfig, args: &Args) {
   if let Some(ref model) = args.model {
      config.model.clone_from(model);
   }
   if let Some(ref template) = args.template {
      config.template_path = Some(template.clone());
   }
}

/// Load config from args or default
fn load_config_from_args(args: &Args) -> Result<CommitConfig> {
   if let Some(ref config_path) = args.config {
      CommitConfig::from_file(config_path)
   } else {
      CommitConfig::load()
   }
}

fn run(args: &Args) -> Result<()> {
   let mut config = load_config_from_args(args)?;
   apply_cli_overrides(&mut config, args);

   let repo = match GitCli::open(&args.dir) {
      Ok(repo) => repo,
      Err(CommitGenError::NotARepository { path }) => {
         debug!(%path, "not a git repository");
         println!(
            "{} This directory is not a Git repository. Run 'git init' first.",
            style::error("Error:")
         );
         return Ok(());
      },
      Err(e) => return Err(e),
   };

   let client = ChatClient::new(&config)?;
   info!(model = client.model(), base_url = %config.api_base_url, "using generation service");
   if config.api_key.is_none() {
      warn!("No API key configured (set AI_COMMIT_API_KEY or GEMINI_API_KEY)");
   }

   let generator = MessageGenerator::new(client, &config);
   let session = Session { repo: &repo, generator: &generator, auto_commit: args.commit };

   let outcome = session.run(&mut io::stdin().lock(), &mut io::stdout())?;
   debug!(?outcome, "session finished");
   if outcome == Outcome::Aborted {
      println!();
   }
   Ok(())
}

fn main() {
   // .env may carry the API key, so load it before anything reads the environment
   dotenvy::dotenv().ok();

   let args = Args::parse();
   init_logging(args.verbose);

   if let Err(e) = run(&args) {
      eprintln!("{} {e}", style::error("Error:"));
      std::process::exit(1);
   }
}
