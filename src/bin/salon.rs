use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use salon_cli::app::App;
use salon_cli::config::{Config, StoreBackend};
use salon_cli::error::SalonError;
use salon_cli::fasta::SequenceKind;
use salon_cli::repository::RdfRepository;
use salon_cli::stardog::StardogRepository;
use salon_cli::virtuoso::VirtuosoRepository;

#[derive(Parser)]
#[command(name = "salon")]
#[command(about = "Sequence ALignment ONtology client: MACSIM/XML and FASTA alignments as RDF")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create the database from a seed schema file")]
    Init {
        #[arg(long, short = 'i')]
        filename: PathBuf,
    },
    #[command(about = "Insert an RDF file into the store")]
    Load {
        #[arg(long, short = 'i')]
        filename: PathBuf,
    },
    #[command(about = "Enrich a protein sequence with UniProt metadata")]
    Enrich {
        #[arg(long, short = 'x')]
        uri: String,
    },
    #[command(about = "Print FASTA description lines for a protein sequence")]
    Export {
        #[arg(long, short = 'x')]
        uri: String,
    },
    #[command(about = "Translate an alignment file (MACSIM/XML, FASTA) into RDF")]
    Parse {
        #[arg(long, short = 'i')]
        input_path: PathBuf,
        #[arg(long, short = 'o', default_value = "output.ttl")]
        output_path: PathBuf,
        #[arg(long, value_enum, default_value_t = SequenceKind::Protein)]
        sequence_type: SequenceKind,
    },
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(salon) = report.downcast_ref::<SalonError>() {
            return ExitCode::from(map_exit_code(salon));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SalonError) -> u8 {
    match error {
        SalonError::UnsupportedInput(_)
        | SalonError::UnsupportedRdfFormat(_)
        | SalonError::MalformedXml(_)
        | SalonError::MalformedFasta(_)
        | SalonError::FileRead { .. }
        | SalonError::ConfigRead(_)
        | SalonError::ConfigParse(_)
        | SalonError::InvalidBackend(_) => 2,
        SalonError::StoreHttp(_)
        | SalonError::RemoteQueryFailed { .. }
        | SalonError::DigestAuth(_)
        | SalonError::UnsupportedOperation { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;

    match config.backend {
        StoreBackend::Stardog => {
            let repository = StardogRepository::new(&config)?;
            dispatch(App::new(&config, repository), cli.command)
        }
        StoreBackend::Virtuoso => {
            let repository = VirtuosoRepository::new(&config)?;
            dispatch(App::new(&config, repository), cli.command)
        }
    }
}

fn dispatch<R: RdfRepository>(app: App<R>, command: Commands) -> miette::Result<()> {
    match command {
        Commands::Init { filename } => app.init(&filename)?,
        Commands::Load { filename } => app.load(&filename)?,
        Commands::Enrich { uri } => app.enrich(&uri)?,
        Commands::Export { uri } => {
            for line in app.export(&uri)? {
                println!("{line}");
            }
        }
        Commands::Parse {
            input_path,
            output_path,
            sequence_type,
        } => app.parse(&input_path, &output_path, sequence_type)?,
    }
    Ok(())
}
