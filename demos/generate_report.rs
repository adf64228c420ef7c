use dotenv::dotenv;
use ria_report_builder::{
    report_file_stem, AccessGate, ClientConfig, FirmDirectory, QueryClient, ReportGenerator,
};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

// Usage: cargo run --example generate_report -- <firm data csv> [firm name]
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let data_path = PathBuf::from(args.next().unwrap_or_else(|| "data_cleaned.csv".to_string()));
    let firm_arg = args.next();

    let directory = FirmDirectory::from_path(&data_path)?;
    println!("📂 Loaded {} firms from {}", directory.len(), data_path.display());

    let firm_name = match firm_arg {
        Some(name) => name,
        None => prompt_line("Enter firm name: ")?,
    };
    let record = directory.require(&firm_name)?.clone();

    println!("\n📋 Reported SEC Data");
    for (label, value) in record.summary_lines() {
        println!("  {}: {}", label, value);
    }

    let gate = AccessGate::from_env()?;
    let password = prompt_line("\nEnter password: ")?;
    if let Err(e) = gate.verify(&password) {
        eprintln!("❌ {}. Please try again.", e);
        return Ok(());
    }

    let client = QueryClient::from_config(ClientConfig::from_env()?)?;
    println!("\n🤖 Firm Research: AI Generated\n");

    let report = ReportGenerator::new(&client)
        .generate_report(&firm_name, Some(record))
        .await?;

    for (key, result) in report.sections.iter() {
        println!("#### {}", key);
        println!("{}\n", result.text());
        if !result.citations().is_empty() {
            println!("{}\n", result.citations_plain());
        }
    }

    let stem = report_file_stem(&firm_name);
    std::fs::write(format!("{}.md", stem), report.to_markdown())?;
    std::fs::write(format!("{}.csv", stem), report.to_csv()?)?;
    println!("✅ Wrote {}.md and {}.csv", stem, stem);

    Ok(())
}

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
