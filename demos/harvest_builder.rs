use clap::Parser;
use page_harvest::Harvest;
use page_harvest::sites::Useme;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First listing page number
    #[arg(short, long, default_value_t = 1)]
    start_page: u32,

    /// Number of listing pages to process
    #[arg(short = 'n', long, default_value_t = 1)]
    pages: u32,

    /// Cap on profiles visited per listing page
    #[arg(short, long)]
    max_records: Option<usize>,

    /// Output directory for page JSON files
    #[arg(short, long)]
    output_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Starting useme harvest: {} page(s) from page {}", args.pages, args.start_page);

    let mut builder = Harvest::new(Useme)
        .with_start_page(args.start_page)
        .with_total_pages(args.pages);

    if let Some(max_records) = args.max_records {
        println!("Capping records per page at {}", max_records);
        builder = builder.with_max_records_per_page(max_records);
    }

    if let Some(output_dir) = args.output_dir {
        println!("Writing output to: {}", output_dir);
        builder = builder.with_output_dir(output_dir);
    }

    let start_time = std::time::Instant::now();
    let summary = builder.run().await?;

    println!(
        "Harvest complete. Processed {} pages ({} failed), {} records in {:.2} seconds.",
        summary.pages_processed,
        summary.pages_failed,
        summary.records_extracted,
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
