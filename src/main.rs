use anyhow::Result;
use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;
use tripintel::models::TripRequest;
use tripintel::{TripIntelConfig, TripIntelError, TripPlanner, discovery};

fn init_logging(config: &TripIntelConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Known application errors get the friendly wording
        match err.downcast_ref::<TripIntelError>() {
            Some(trip_err) => eprintln!("{}", trip_err.user_message()),
            None => eprintln!("{err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = TripIntelConfig::load()?;
    init_logging(&config);

    let mut args = std::env::args().skip(1);
    let destination = args.next().unwrap_or_else(|| "Seoul".to_string());
    let budget_usd = args
        .next()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(config.defaults.budget_usd);

    let today = Utc::now().date_naive();
    let request = TripRequest {
        destination,
        country_code: None,
        start_date: today,
        end_date: today + Duration::days(i64::from(config.defaults.trip_days) - 1),
        budget_usd,
        interests: vec!["culture".to_string(), "food".to_string()],
        history: Vec::new(),
    };
    request.validate()?;

    let planner = TripPlanner::new(&config)?;
    let report = planner.assemble(&request).await;

    println!("Trip intelligence for {}", report.destination);
    println!();

    println!(
        "Advisory: {} (score {:.1}) - {}",
        report.advisory.level, report.advisory.score, report.advisory.message
    );

    println!();
    println!(
        "Weather in {}, {} ({} points):",
        report.weather.city,
        report.weather.country,
        report.weather.forecasts.len()
    );
    for point in report.weather.forecasts.iter().take(4) {
        println!(
            "  {}  {:>5.1}°C  {}  wind {:.1} m/s",
            point.time.format("%Y-%m-%d %H:%M"),
            point.temp_c,
            point.description,
            point.wind_speed_mps
        );
    }

    println!();
    println!("Events ({}):", report.events.len());
    for event in &report.events {
        println!(
            "  [{:>3}] {} - starts {}",
            event.rank,
            event.title,
            event.start.format("%Y-%m-%d")
        );
    }

    println!();
    println!(
        "Costs: ${:.0}/day (meal ${:.0}, transport ${:.1}, hotel ${:.0})",
        report.costs.daily_usd,
        report.costs.meal_usd,
        report.costs.transport_usd,
        report.costs.hotel_usd
    );
    println!(
        "Budget: ${:.0} for {} days, estimated ${:.0}, remaining ${:.0} ({})",
        request.budget_usd,
        request.duration_days(),
        report.budget.total_estimated_usd,
        report.budget.remaining_usd,
        if report.budget.feasible {
            "feasible"
        } else {
            "over budget"
        }
    );

    println!();
    println!("{}", report.recommendation.body);

    let suggestions = discovery::suggest(&request.interests, &request.history);
    if !suggestions.is_empty() {
        println!();
        println!("You might also like: {}", suggestions.join(", "));
    }

    Ok(())
}
