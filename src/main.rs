use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::io;
use std::path::PathBuf;
use tracing::info;

mod compatibility;
mod eligibility;
mod fallback;
mod output;
mod types;

use compatibility::{can_donate, compatibility_info, compatible_recipients, CompatibilityReport};
use eligibility::{ScreeningResult, VitalSigns, VITAL_RANGES};
use fallback::{derive_blood_type, DISTRIBUTION};
use output::{render_text_report, ReportFormat, ReportGenerator};
use types::BloodType;

/// Blood type compatibility and donor screening tool
#[derive(Parser, Debug)]
#[command(
    name = "blood-compatibility",
    version,
    about = "Blood type compatibility resolution for donation coordination",
    long_about = r#"
A tool for blood-donation coordination logic:
- Donor and recipient compatibility lookups over the eight ABO/Rh types
- Pairwise donor -> recipient compatibility checks
- Compatibility summaries with universal donor/recipient flags
- Deterministic display-fallback blood type derivation from identifiers
- Donor health screening against vital-sign reference ranges
"#
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Interactive mode with prompts for all parameters
    #[arg(short, long, help = "Interactive mode")]
    interactive: bool,

    /// Output format for report generation
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output directory for reports
    #[arg(short, long, default_value = "./reports")]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List donor types compatible with a recipient
    Donors {
        #[arg(value_enum)]
        recipient: BloodType,
    },
    /// List recipient types a donor may give to
    Recipients {
        #[arg(value_enum)]
        donor: BloodType,
    },
    /// Check whether a donor may give to a recipient
    Check {
        #[arg(value_enum)]
        donor: BloodType,
        #[arg(value_enum)]
        recipient: BloodType,
    },
    /// Show a compatibility summary for a recipient type
    Summary {
        /// Recipient blood type (tolerates case and whitespace)
        recipient: String,
    },
    /// Derive a stable display blood type from an identifier
    Derive { identifier: String },
    /// Write the full compatibility matrix report
    Matrix,
    /// Show the population distribution table
    Distribution,
    /// Evaluate donor screening from vital signs
    Screen {
        /// Systolic blood pressure (mmHg)
        #[arg(long)]
        systolic: Option<f64>,
        /// Diastolic blood pressure (mmHg)
        #[arg(long)]
        diastolic: Option<f64>,
        /// Heart rate (bpm)
        #[arg(long)]
        heart_rate: Option<f64>,
        /// Body temperature (°C)
        #[arg(long)]
        temperature: Option<f64>,
        /// Body weight (kg)
        #[arg(long)]
        weight: Option<f64>,
        /// Hemoglobin level (g/dL)
        #[arg(long)]
        hemoglobin: Option<f64>,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
    All,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> ReportFormat {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::All => ReportFormat::All,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    init_logging(cli.verbose);

    if cli.interactive {
        return run_interactive_mode(&cli);
    }

    match cli.command {
        Some(Commands::Donors { recipient }) => print_donors(recipient),
        Some(Commands::Recipients { donor }) => print_recipients(donor),
        Some(Commands::Check { donor, recipient }) => print_check(donor, recipient),
        Some(Commands::Summary { recipient }) => print_summary(&recipient),
        Some(Commands::Derive { identifier }) => print_derived(&identifier),
        Some(Commands::Matrix) => write_matrix(&cli)?,
        Some(Commands::Distribution) => print_distribution(),
        Some(Commands::Screen {
            systolic,
            diastolic,
            heart_rate,
            temperature,
            weight,
            hemoglobin,
        }) => print_screening(VitalSigns {
            systolic,
            diastolic,
            heart_rate,
            temperature,
            weight,
            hemoglobin,
        }),
        Some(Commands::Completions { .. }) | None => {}
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("blood_compatibility={}", level))
        .init();
}

fn print_donors(recipient: BloodType) {
    let donors = compatibility::compatible_donors(recipient.as_str());
    println!(
        "{} can receive red cells from:",
        style(recipient.as_str()).red().bold()
    );
    for donor in donors {
        println!("  {}", style(donor.as_str()).green());
    }
}

fn print_recipients(donor: BloodType) {
    let recipients = compatible_recipients(donor.as_str());
    println!(
        "{} can donate red cells to:",
        style(donor.as_str()).red().bold()
    );
    for recipient in recipients {
        println!("  {}", style(recipient.as_str()).green());
    }
}

fn print_check(donor: BloodType, recipient: BloodType) {
    if can_donate(donor.as_str(), recipient.as_str()) {
        println!(
            "{} {} can donate to {}",
            style("✓").green().bold(),
            style(donor.as_str()).bold(),
            style(recipient.as_str()).bold()
        );
    } else {
        println!(
            "{} {} cannot donate to {}",
            style("✗").red().bold(),
            style(donor.as_str()).bold(),
            style(recipient.as_str()).bold()
        );
    }
}

fn print_summary(recipient: &str) {
    let info = compatibility_info(recipient);
    println!("{}", style(&info.description).bold());

    if !info.compatible_donors.is_empty() {
        let donors: Vec<&str> = info.compatible_donors.iter().map(|t| t.as_str()).collect();
        println!("Compatible donors: {}", style(donors.join(", ")).green());
    }
    if info.is_universal_recipient {
        println!("{}", style("Universal recipient").cyan());
    }
    if info.has_universal_donor {
        println!(
            "{}",
            style("O- (universal donor) is among the compatible donors").dim()
        );
    }
}

fn print_derived(identifier: &str) {
    let blood_type = derive_blood_type(identifier);
    info!("Derived fallback blood type for {:?}", identifier);
    println!(
        "{} (display fallback, not a medical value)",
        style(blood_type.as_str()).red().bold()
    );
}

fn print_distribution() {
    println!("{}", style("Population blood type distribution:").bold());
    for entry in DISTRIBUTION.iter() {
        println!(
            "  {} {:>5.1}%",
            style(format!("{:<4}", entry.blood_type.as_str())).red(),
            entry.percentage
        );
    }
}

fn print_screening(vitals: VitalSigns) {
    match vitals.evaluate() {
        ScreeningResult::Eligible => {
            println!("{} Donor is eligible", style("✓").green().bold());
        }
        ScreeningResult::Ineligible => {
            println!("{} Donor is not eligible", style("✗").red().bold());
            for field in vitals.failed_checks() {
                println!("  out of range: {}", style(field).yellow());
            }
        }
        ScreeningResult::Incomplete => {
            println!(
                "{} Screening incomplete, missing vital signs",
                style("?").yellow().bold()
            );
            println!("\nReference ranges:");
            for range in VITAL_RANGES {
                println!(
                    "  {:<20} {:>5.1} - {:>5.1} {}",
                    range.field, range.min, range.max, range.unit
                );
            }
        }
    }
}

fn write_matrix(cli: &Cli) -> Result<()> {
    info!("Building compatibility report");
    let report = CompatibilityReport::build();
    let generator = ReportGenerator::new(&cli.output)?;
    let written = generator.generate(&report, cli.format.into())?;

    print!("{}", render_text_report(&report));
    for path in written {
        println!(
            "{} Report saved to: {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    }

    Ok(())
}

fn run_interactive_mode(cli: &Cli) -> Result<()> {
    println!(
        "{}",
        style("Blood Compatibility - Interactive Mode").cyan().bold()
    );
    println!();

    let theme = ColorfulTheme::default();

    let actions = vec![
        "Compatibility summary for a recipient",
        "Check a donor/recipient pair",
        "Derive a fallback blood type",
        "Donor screening",
        "Write full compatibility report",
    ];

    let action = Select::with_theme(&theme)
        .with_prompt("Select an action")
        .default(0)
        .items(&actions)
        .interact()?;

    let type_labels: Vec<&str> = BloodType::ALL.iter().map(|t| t.as_str()).collect();

    match action {
        0 => {
            let idx = Select::with_theme(&theme)
                .with_prompt("Recipient blood type")
                .default(0)
                .items(&type_labels)
                .interact()?;
            print_summary(type_labels[idx]);
        }
        1 => {
            let donor_idx = Select::with_theme(&theme)
                .with_prompt("Donor blood type")
                .default(0)
                .items(&type_labels)
                .interact()?;
            let recipient_idx = Select::with_theme(&theme)
                .with_prompt("Recipient blood type")
                .default(0)
                .items(&type_labels)
                .interact()?;
            print_check(BloodType::ALL[donor_idx], BloodType::ALL[recipient_idx]);
        }
        2 => {
            let identifier: String = Input::with_theme(&theme)
                .with_prompt("Identifier (user id, email, ...)")
                .allow_empty(true)
                .interact_text()?;
            print_derived(&identifier);
        }
        3 => {
            let vitals = prompt_vital_signs(&theme)?;
            print_screening(vitals);
        }
        _ => write_matrix(cli)?,
    }

    Ok(())
}

fn prompt_vital_signs(theme: &ColorfulTheme) -> Result<VitalSigns> {
    let mut readings = [None; 6];

    for (i, range) in VITAL_RANGES.iter().enumerate() {
        let input: String = Input::with_theme(theme)
            .with_prompt(format!("{} ({})", range.field, range.unit))
            .allow_empty(true)
            .interact_text()?;

        if !input.is_empty() {
            readings[i] = Some(input.trim().parse::<f64>()?);
        }
    }

    Ok(VitalSigns {
        systolic: readings[0],
        diastolic: readings[1],
        heart_rate: readings[2],
        temperature: readings[3],
        weight: readings[4],
        hemoglobin: readings[5],
    })
}
