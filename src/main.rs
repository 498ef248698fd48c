use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use crisprdesign::data::{FastaFile, SequenceSource};
use crisprdesign::engines::feedback::MemoryFeedbackLog;
use crisprdesign::{ConfigManager, DesignRequest, DesignResponse, DesignService};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crisprdesign", version, about = "CRISPR guide RNA selection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Design guides for a sequence
    Design(DesignArgs),

    /// Print the effective configuration as TOML
    Config {
        /// TOML config file layered under CRISPR_* environment variables
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct DesignArgs {
    /// FASTA file holding the target sequence
    #[arg(long, conflicts_with = "sequence", required_unless_present = "sequence")]
    fasta: Option<PathBuf>,

    /// Raw sequence over A/C/G/T
    #[arg(long)]
    sequence: Option<String>,

    #[arg(long, default_value = "GENE")]
    gene_id: String,

    #[arg(long, default_value_t = 0)]
    region_start: usize,

    #[arg(long)]
    region_end: Option<usize>,

    /// Number of guides to return
    #[arg(long)]
    top_k: Option<usize>,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Design(args) => design(args),
        Command::Config { config } => {
            let manager = ConfigManager::load(config.as_deref())?;
            print!("{}", manager.to_toml()?);
            Ok(())
        }
    }
}

fn design(args: DesignArgs) -> anyhow::Result<()> {
    let sequence = match (&args.sequence, &args.fasta) {
        (Some(sequence), _) => sequence.trim().to_string(),
        (None, Some(path)) => FastaFile::single(path)
            .fetch(&args.gene_id)?
            .with_context(|| format!("No sequence found in {}", path.display()))?,
        (None, None) => bail!("either --sequence or --fasta is required"),
    };

    let manager = ConfigManager::load(args.config.as_deref())?;
    let service = DesignService::new(manager, Box::new(MemoryFeedbackLog::new()))?;

    let mut request =
        DesignRequest::new(args.gene_id, sequence).with_region(args.region_start, args.region_end);
    request.top_k = args.top_k;

    let response = service.design(&request)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_table(&response);
    }
    Ok(())
}

fn print_table(response: &DesignResponse) {
    println!(
        "{} region {}..{}: {} PAM sites, {} guides",
        response.gene_id,
        response.region.start,
        response.region.end,
        response.total_sites,
        response.guides.len()
    );
    if response.guides.is_empty() {
        println!("No PAM sites found in the specified region");
        return;
    }

    println!(
        "{:>4}  {:<16} {:>7}  {:<24} {:<5} {:>6} {:>8} {:>8} {:>9}",
        "rank", "candidate", "locus", "guide", "pam", "gc%", "on", "off", "composite"
    );
    for (rank, guide) in response.guides.iter().enumerate() {
        println!(
            "{:>4}  {:<16} {:>7}  {:<24} {:<5} {:>6.1} {:>8.3} {:>8.3} {:>9.3}",
            rank + 1,
            guide.candidate_id,
            guide.locus,
            guide.guide_sequence,
            guide.pam_sequence,
            guide.gc_content,
            guide.on_target_score,
            guide.off_target_penalty,
            guide.composite_score
        );
    }
}
