//! Command-line entry point: decode one certificate and print a summary

use std::io::Read;
use std::path::PathBuf;

use cert_decoder::{rfc1123, CertificateDecoder, CertificateRecord, DecoderConfig, LoggingTransformer};
use clap::Parser;

#[derive(Parser)]
#[command(name = "certdecode")]
#[command(about = "Decode an X.509 certificate (PEM or DER) into a readable summary")]
struct Cli {
    /// Certificate file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// JSON config file with decoder settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Days before expiry at which the certificate is reported as expiring soon
    #[arg(long)]
    warn_days: Option<i64>,

    /// Stop scanning extensions this many bytes before the end of the input
    #[arg(long)]
    scan_margin: Option<usize>,
}

fn main() {
    LoggingTransformer::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("certdecode: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DecoderConfig::from_json_file(path)?,
        None => DecoderConfig::default(),
    };
    if let Some(days) = cli.warn_days {
        config.expiry_warning_days = days;
    }
    if let Some(margin) = cli.scan_margin {
        config.extension_scan_margin = margin;
    }

    let (source, input) = match &cli.file {
        Some(path) => (path.display().to_string(), std::fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            ("<stdin>".to_string(), buf)
        }
    };

    let decoder = CertificateDecoder::with_config(config);
    // A DER certificate always opens with a SEQUENCE tag; anything else is taken as PEM
    let outcome = if input.first() == Some(&0x30) {
        decoder.decode(&input)
    } else {
        decoder.decode_pem(&String::from_utf8_lossy(&input))
    };
    LoggingTransformer::log_decode_outcome(&source, &outcome);
    let record = outcome?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_report(&record, decoder.config().expiry_warning_days);
    }
    Ok(())
}

fn print_report(record: &CertificateRecord, warning_days: i64) {
    println!("Status:        {}", record.status(warning_days));
    println!("Subject:       {}", record.subject);
    println!("Issuer:        {}", record.issuer);
    println!("Serial Number: {}", record.serial_number);
    println!("Valid From:    {}", rfc1123(&record.not_before));
    println!("Valid Until:   {}", rfc1123(&record.not_after));
    println!("Key Algorithm: {}", record.public_key_algorithm);
    if let Some(curve) = &record.public_key_curve {
        println!("Named Curve:   {curve}");
    }
    if record.subject_alternative_names.is_empty() {
        println!("SANs:          (none)");
    } else {
        for (i, name) in record.subject_alternative_names.iter().enumerate() {
            let label = if i == 0 { "SANs:" } else { "" };
            println!("{label:<15}{name}");
        }
    }
    println!();
    println!("{}", record.public_key_pem);
}
