// reset; cargo run -- --dashboard ./data/Dashboard_Mocktest_5A.xlsx
// reset; cargo run -- --dashboard ./data/Dashboard_Mocktest_5A.xlsx --scores-csv scores.csv

use anyhow::Context;
use certgen_lib::{
    Dashboard, ERRORS_LOG_FILE, ScoreSheet, compute_scores, export_scores_csv, scores_to_json,
    utils::write_error_to_log, validate,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "pmb-certgen")]
#[command(about = "Validates a PMB mock test dashboard and computes certificate star ratings")]
#[command(version)]
struct Args {
    /// Path to the filled-in mock test dashboard (.xlsx)
    #[arg(short, long)]
    dashboard: String,

    /// Write the computed score sheet to this CSV file
    #[arg(long)]
    scores_csv: Option<String>,

    /// Print the computed score sheet as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arguments = Args::parse();

    let dashboard = match Dashboard::open(&arguments.dashboard) {
        Ok(dashboard) => dashboard,
        Err(error) => fail("Dashboard Validation Error", &error.to_string()),
    };

    if let Err(error) = validate(&dashboard) {
        fail("Dashboard Validation Error", &error.to_string());
    }
    println!("✅ File recognized as a PMB mock test dashboard");

    let scores = match compute_scores(&dashboard) {
        Ok(scores) => scores,
        Err(error) => fail("Score Calculation Error", &error.to_string()),
    };
    if scores.missing_results > 0 {
        println!(
            "⚠️ {} result cell(s) were not numeric and defaulted to 0 stars",
            scores.missing_results
        );
    }

    if arguments.json {
        println!("{}", scores_to_json(&scores)?);
    } else {
        print_score_table(&scores);
    }

    if let Some(csv_path) = &arguments.scores_csv {
        export_scores_csv(&scores, csv_path)
            .with_context(|| format!("failed to write score sheet to {csv_path}"))?;
        println!("✅ Score sheet written to {csv_path}");
    }

    Ok(())
}

fn print_score_table(scores: &ScoreSheet) {
    println!("Level: {}", scores.level.name());
    println!(
        "{:<30} {:>5} {:>6} | {:>9} {:>4} {:>9}",
        "Student", "Year", "Class", "Listening", "R&W", "Speaking"
    );
    for student in &scores.students {
        println!(
            "{:<30} {:>5} {:>6} | {:>9} {:>4} {:>9}",
            student.name,
            student.year,
            student.class_group,
            format!("{}★", student.listening.stars),
            format!("{}★", student.reading_writing.stars),
            format!("{}★", student.speaking.stars),
        );
    }
}

fn fail(error_type: &str, message: &str) -> ! {
    eprintln!("❌ {message}");
    write_error_to_log(error_type, message);
    eprintln!("❌ Check {} for details.", ERRORS_LOG_FILE);
    std::process::exit(1);
}
