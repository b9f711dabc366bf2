use std::path::Path;

use colored::*;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::distance::RouteEstimate;
use crate::domain::types::{BoxSpec, Capacity, Combination, TruckSpec};
use crate::error::Result;
use crate::evaluation::status::{assess, format_combination, LoadAssessment};

/// Header lines shown above the result list.
pub fn print_truck(truck: &TruckSpec, boxes: &[BoxSpec]) {
    let capacity = truck.capacity();
    println!(
        "{} {} ({:.2} cubic feet), capacity {} kg",
        "Truck:".bold(),
        truck.dimensions,
        capacity.volume,
        capacity.weight
    );
    for (i, spec) in boxes.iter().enumerate() {
        println!(
            "  Box {} ({}): {} = {:.2} cubic feet, {} kg",
            i + 1,
            spec.name,
            spec.dimensions,
            spec.box_type().unit_volume,
            spec.weight_kg
        );
    }
}

pub fn print_combinations(combinations: &[Combination], capacity: &Capacity) {
    if combinations.is_empty() {
        println!("{}", "No combination fits the truck.".yellow());
        return;
    }
    for (rank, combination) in combinations.iter().enumerate() {
        println!("{:>3}. {}", rank + 1, colour_line(combination, capacity));
    }
}

pub fn print_selection(
    combination: &Combination,
    assessment: &LoadAssessment,
    capacity: &Capacity,
) {
    println!("{} {}", "Selected:".bold(), colour_line(combination, capacity));
    println!("  {}", utilization_line(combination, assessment));
    if !assessment.feasible {
        println!("  {}", "This load does not fit the truck.".red().bold());
    }
}

/// `N boxes, V% of volume, W% of weight`.
pub fn utilization_line(combination: &Combination, assessment: &LoadAssessment) -> String {
    format!(
        "{} boxes, {:.1}% of volume, {:.1}% of weight",
        combination.total_boxes(),
        assessment.volume_utilization * 100.0,
        assessment.weight_utilization * 100.0
    )
}

fn colour_line(combination: &Combination, capacity: &Capacity) -> ColoredString {
    let line = format_combination(combination, capacity);
    let assessment = assess(combination, capacity);
    if !assessment.feasible {
        line.red()
    } else if assessment.volume_limit_reached || assessment.weight_limit_reached {
        line.yellow()
    } else {
        line.green()
    }
}

pub fn print_route(route: &RouteEstimate) {
    println!(
        "{} {} -> {}: {:.2} km, fuel {:.2}, estimated cost {:.2}",
        "Route:".bold(),
        route.from,
        route.to,
        route.distance_km,
        route.fuel_needed,
        route.cost
    );
}

/// Writes `rank,box_1..box_n,total_volume,total_weight`.
pub fn save_to_csv(combinations: &[Combination], box_types: usize, filename: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(filename)?;

    let mut header = vec!["rank".to_string()];
    header.extend((1..=box_types).map(|i| format!("box_{i}")));
    header.push("total_volume".to_string());
    header.push("total_weight".to_string());
    wtr.write_record(&header)?;

    for (rank, combination) in combinations.iter().enumerate() {
        let mut record = vec![(rank + 1).to_string()];
        record.extend(combination.counts.iter().map(|c| c.to_string()));
        record.push(combination.total_volume.to_string());
        record.push(combination.total_weight.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    info!(
        "Saved {} combinations to {}",
        combinations.len(),
        filename.display()
    );
    Ok(())
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    combination: &'a Combination,
    boxes: u64,
    assessment: LoadAssessment,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    capacity: Capacity,
    combinations: Vec<JsonEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a RouteEstimate>,
}

pub fn to_json(
    capacity: Capacity,
    combinations: &[Combination],
    route: Option<&RouteEstimate>,
) -> Result<String> {
    let combinations = combinations
        .iter()
        .map(|combination| JsonEntry {
            combination,
            boxes: combination.total_boxes(),
            assessment: assess(combination, &capacity),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&JsonReport {
        capacity,
        combinations,
        route,
    })?)
}
