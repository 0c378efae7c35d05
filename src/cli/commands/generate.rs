//! Generate command implementation
//!
//! Writes a synthetic raw daily file into the raw zone so the pipeline can
//! be exercised without a production feed. Most rows are clean; a
//! configurable fraction carries deliberate defects (duplicates, empty
//! fields, out-of-range values, bad regions, future dates) so the validator
//! has something to reject.

use crate::app::adapters::object_store::{FsObjectStore, ObjectStore};
use crate::cli::args::GenerateArgs;
use crate::constants::{self, columns};
use crate::{Error, Result};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::shared::{load_configuration, setup_logging};

const PRODUCTS: &[&str] = &[
    "Laptop", "Desktop", "Monitor", "Keyboard", "Mouse", "Headset", "Webcam", "Router", "Switch",
    "Cable", "USB Drive", "External HDD", "SSD", "RAM", "Motherboard",
];

/// Generate command runner
pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    setup_logging(args.get_log_level())?;
    args.validate()?;

    let config = load_configuration(args.config_file.as_ref(), args.bucket_path.clone())?;
    let run_date = args.run_date();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        "Generating {} records for {} ({:.0}% dirty)",
        args.records,
        run_date,
        args.dirty_fraction * 100.0
    );

    let csv = generate_csv(&config.rules.valid_regions, run_date, &args, &mut rng)?;

    let store = FsObjectStore::new(config.store.bucket_path.clone());
    let key = constants::daily_key(&config.store.raw_zone, run_date);
    store.put(&key, &csv)?;

    if !args.quiet {
        println!("Generated {} records into {}", args.records, key);
    }

    Ok(())
}

/// Build the synthetic CSV payload
fn generate_csv(
    regions: &[String],
    run_date: NaiveDate,
    args: &GenerateArgs,
    rng: &mut StdRng,
) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        columns::TRANSACTION_ID,
        columns::DATE,
        columns::REGION,
        columns::PRODUCT,
        columns::QUANTITY,
        columns::PRICE,
        columns::CUSTOMER_ID,
    ])?;

    let date_str = run_date.format(constants::DATE_FORMAT).to_string();

    for index in 0..args.records {
        let mut transaction_id = format!("TXN-{}-{:06}", run_date.format("%Y%m%d"), index + 1);
        let mut date = date_str.clone();
        let mut region = regions[rng.gen_range(0..regions.len())].clone();
        let product = PRODUCTS[rng.gen_range(0..PRODUCTS.len())].to_string();
        let mut quantity = rng.gen_range(1..=50).to_string();
        let mut price = format!("{:.2}", rng.gen_range(5.0..2500.0));
        let customer_id = format!("CUST-{:04}", rng.gen_range(1..=200));

        // A slice of rows carries one deliberate defect each
        if rng.gen_bool(args.dirty_fraction) {
            match rng.gen_range(0..6) {
                0 if index > 0 => {
                    // Duplicate an earlier id
                    let earlier = rng.gen_range(0..index);
                    transaction_id =
                        format!("TXN-{}-{:06}", run_date.format("%Y%m%d"), earlier + 1);
                }
                1 => quantity = "0".to_string(),
                2 => price = "-1.00".to_string(),
                3 => region = "Unknown".to_string(),
                4 => {
                    date = (run_date + chrono::Duration::days(rng.gen_range(1..30)))
                        .format(constants::DATE_FORMAT)
                        .to_string();
                }
                _ => quantity = String::new(),
            }
        }

        writer.write_record([
            transaction_id.as_str(),
            date.as_str(),
            region.as_str(),
            product.as_str(),
            quantity.as_str(),
            price.as_str(),
            customer_id.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::io("Cannot flush CSV buffer", std::io::Error::other(e)))
}
