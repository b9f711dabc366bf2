use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use tracing::{info_span, warn, Instrument};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::{
    DEFAULT_TRUCK_HEIGHT_FT, DEFAULT_TRUCK_LENGTH_FT, DEFAULT_TRUCK_WEIGHT_KG,
    DEFAULT_TRUCK_WIDTH_FT, SEED,
};
use crate::config::Settings;
use crate::distance::{
    estimate_route, DistanceProvider, DistanceSource, Geocoder, NominatimGeocoder, RouteEstimate,
};
use crate::domain::types::{BoxSpec, Dimensions, TruckSpec};
use crate::domain::LoadingSession;
use crate::error::{CalcError, Result};
use crate::evaluation::cost::CostModel;
use crate::fixtures::generate_scenario;
use crate::report;
use crate::setup::{name_unnamed, parse_adjustment, parse_box_spec, read_box_specs_from_csv, Adjustment};

#[derive(Parser)]
#[command(name = "truckload")]
#[command(version)]
#[command(about = "Truck loading combinations and transport cost estimates")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct TruckArgs {
    /// Truck storage length in feet
    #[arg(long, default_value_t = DEFAULT_TRUCK_LENGTH_FT)]
    truck_length: f64,

    /// Truck storage width in feet
    #[arg(long, default_value_t = DEFAULT_TRUCK_WIDTH_FT)]
    truck_width: f64,

    /// Truck storage height in feet
    #[arg(long, default_value_t = DEFAULT_TRUCK_HEIGHT_FT)]
    truck_height: f64,

    /// Truck weight capacity in kg
    #[arg(long, default_value_t = DEFAULT_TRUCK_WEIGHT_KG)]
    truck_weight: f64,
}

impl TruckArgs {
    fn spec(&self) -> TruckSpec {
        TruckSpec {
            dimensions: Dimensions::new(self.truck_length, self.truck_width, self.truck_height),
            max_weight_kg: self.truck_weight,
        }
    }
}

#[derive(Args)]
struct BoxArgs {
    /// Box type as LxWxH:KG or NAME=LxWxH:KG (feet, kg); repeat per type
    #[arg(short = 'b', long = "box", value_parser = parse_box_spec)]
    boxes: Vec<BoxSpec>,

    /// CSV with columns name,length_ft,width_ft,height_ft,weight_kg
    #[arg(long)]
    boxes_csv: Option<PathBuf>,
}

impl BoxArgs {
    fn load(&self) -> Result<Vec<BoxSpec>> {
        let mut boxes = self.boxes.clone();
        if let Some(path) = &self.boxes_csv {
            boxes.extend(read_box_specs_from_csv(path)?);
        }
        if boxes.is_empty() {
            return Err(CalcError::NoBoxTypes);
        }
        name_unnamed(&mut boxes);
        Ok(boxes)
    }
}

#[derive(Args)]
struct RouteArgs {
    /// Origin place name
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Destination place name
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// How to measure the distance: geodesic or osrm
    #[arg(long, default_value_t = DistanceSource::Geodesic)]
    distance: DistanceSource,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the box combinations that fit the truck
    Search {
        #[command(flatten)]
        truck: TruckArgs,

        #[command(flatten)]
        boxes: BoxArgs,

        /// Also write the results to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search, pick a combination, adjust it and optionally price a route
    Plan {
        #[command(flatten)]
        truck: TruckArgs,

        #[command(flatten)]
        boxes: BoxArgs,

        /// Rank of the combination to pick (1 = best)
        #[arg(long, default_value_t = 1, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        select: usize,

        /// Change a box count as BOX:DELTA, e.g. 2:+3 or 1:-1; repeatable
        #[arg(long = "adjust", value_parser = parse_adjustment)]
        adjustments: Vec<Adjustment>,

        #[command(flatten)]
        route: RouteArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Distance and fuel cost between two places
    Estimate {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Load weight in kg
        #[arg(long, default_value_t = 0.0)]
        weight: f64,

        /// How to measure the distance: geodesic or osrm
        #[arg(long, default_value_t = DistanceSource::Geodesic)]
        distance: DistanceSource,
    },

    /// Run the search on a random truck and box set
    Demo {
        #[arg(long, default_value_t = SEED)]
        seed: u64,

        #[arg(long, default_value_t = 3)]
        box_types: usize,
    },
}

/// Initialize tracing and environment
fn init_tracing_and_env(verbose: bool) {
    dotenv().ok();
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_and_env(cli.verbose);
    let settings = Settings::from_env()?;

    match cli.command {
        Commands::Search {
            truck,
            boxes,
            csv,
            json,
        } => {
            let mut session = LoadingSession::new(truck.spec(), boxes.load()?)?;
            session.calculate(&settings.limits)?;

            if let Some(path) = &csv {
                report::save_to_csv(session.results(), session.boxes().len(), path)?;
            }
            if json {
                println!("{}", report::to_json(session.capacity(), session.results(), None)?);
            } else {
                report::print_truck(session.truck(), session.boxes());
                report::print_combinations(session.results(), &session.capacity());
            }
        }

        Commands::Plan {
            truck,
            boxes,
            select,
            adjustments,
            route,
            json,
        } => {
            let mut session = LoadingSession::new(truck.spec(), boxes.load()?)?;
            session.calculate(&settings.limits)?;
            session.select_rank(select)?;
            for adjustment in &adjustments {
                session.adjust(adjustment.index, adjustment.delta)?;
            }

            if let (Some(from), Some(to)) = (&route.from, &route.to) {
                let geocoder = NominatimGeocoder::from_settings(&settings)?;
                let provider = DistanceProvider::from_settings(route.distance, &settings)?;
                session.route = price_route(
                    &geocoder,
                    &provider,
                    &settings.cost_model,
                    from,
                    to,
                    &session,
                )
                .instrument(info_span!("route_estimate", source = %route.distance))
                .await?;
            }

            let capacity = session.capacity();
            let (Some(selected), Some(assessment)) = (session.selected(), session.assessment())
            else {
                return Err(CalcError::NoSelection);
            };
            if json {
                let chosen = std::slice::from_ref(selected);
                let plan = report::to_json(capacity, chosen, session.route.as_ref())?;
                println!("{plan}");
            } else {
                report::print_truck(session.truck(), session.boxes());
                report::print_selection(selected, &assessment, &capacity);
                match &session.route {
                    Some(estimate) => report::print_route(estimate),
                    None if route.from.is_some() => println!("Route: distance unavailable"),
                    None => {}
                }
            }
        }

        Commands::Estimate {
            from,
            to,
            weight,
            distance,
        } => {
            let geocoder = NominatimGeocoder::from_settings(&settings)?;
            let provider = DistanceProvider::from_settings(distance, &settings)?;
            let estimate =
                estimate_route(&geocoder, &provider, &from, &to, weight, &settings.cost_model)
                    .await?;
            report::print_route(&estimate);
        }

        Commands::Demo { seed, box_types } => {
            let scenario = generate_scenario(seed, box_types);
            let mut session = LoadingSession::new(scenario.truck, scenario.boxes)?;
            session.calculate(&settings.limits)?;
            report::print_truck(session.truck(), session.boxes());
            report::print_combinations(session.results(), &session.capacity());
        }
    }

    Ok(())
}

/// Route estimate for the selected load. Unresolvable places or missing
/// routes yield `None` so the plan is still printed.
async fn price_route<G: Geocoder>(
    geocoder: &G,
    provider: &DistanceProvider,
    cost_model: &CostModel,
    from: &str,
    to: &str,
    session: &LoadingSession,
) -> Result<Option<RouteEstimate>> {
    let weight = session
        .selected()
        .map(|c| c.total_weight)
        .ok_or(CalcError::NoSelection)?;

    match estimate_route(geocoder, provider, from, to, weight, cost_model).await {
        Ok(estimate) => Ok(Some(estimate)),
        Err(e @ (CalcError::GeocodeNotFound(_) | CalcError::DistanceUnavailable { .. })) => {
            warn!("Distance unavailable: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
