use clap::Parser;
use sun_locator::utils::error::ErrorCategory;
use sun_locator::utils::logger;
use sun_locator::{CliConfig, Locator, LocationSource, LocatorError, SolarReport};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    let locator = match Locator::from_config(&config) {
        Ok(locator) => locator,
        Err(e) => exit_with(e),
    };

    match locator.report(cli.at).await {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn print_report(report: &SolarReport) {
    let coordinates = report.location.coordinates;
    let source = match report.location.source {
        LocationSource::Live => "live",
        LocationSource::Fallback => "fallback",
    };

    println!("Time: {}", report.instant.to_rfc3339());
    println!(
        "Latitude: {}, Longitude: {} ({})",
        coordinates.latitude(),
        coordinates.longitude(),
        source
    );
    println!("Solar Altitude: {:.4}°", report.direction.altitude);
    println!("Solar Azimuth: {:.4}°", report.direction.azimuth);
}

fn exit_with(e: LocatorError) -> ! {
    tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.category() {
        ErrorCategory::Configuration => 2,
        ErrorCategory::Network | ErrorCategory::Data | ErrorCategory::Computation => 1,
    };
    std::process::exit(exit_code);
}
