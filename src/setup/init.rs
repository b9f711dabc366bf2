use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::domain::types::{BoxSpec, Dimensions};
use crate::error::{CalcError, Result};
use crate::setup::init_types::{Adjustment, BoxRow};

/// Reads box types from a CSV file with the header
/// `name,length_ft,width_ft,height_ft,weight_kg`.
pub fn read_box_specs_from_csv(csv_path: &Path) -> Result<Vec<BoxSpec>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)?;

    let mut boxes = Vec::new();
    for row in reader.deserialize::<BoxRow>() {
        let row = row?;
        boxes.push(BoxSpec {
            name: row.name,
            dimensions: Dimensions::new(row.length_ft, row.width_ft, row.height_ft),
            weight_kg: row.weight_kg,
        });
    }

    if boxes.is_empty() {
        return Err(CalcError::NoBoxTypes);
    }
    info!(
        "Loaded {} box types from {}",
        boxes.len(),
        csv_path.display()
    );
    Ok(boxes)
}

/// Parses `LxWxH:KG` or `NAME=LxWxH:KG` (feet and kilograms).
pub fn parse_box_spec(raw: &str) -> std::result::Result<BoxSpec, String> {
    let (name, spec) = match raw.split_once('=') {
        Some((name, spec)) => (name.trim().to_string(), spec),
        None => (String::new(), raw),
    };
    let (dims, weight) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected LxWxH:KG, got '{raw}'"))?;

    let sides = dims
        .split(['x', 'X'])
        .map(|side| parse_number(side, raw))
        .collect::<std::result::Result<Vec<f64>, String>>()?;
    let [length, width, height] = sides[..] else {
        return Err(format!("expected three dimensions in '{raw}'"));
    };

    let spec = BoxSpec {
        name,
        dimensions: Dimensions::new(length, width, height),
        weight_kg: parse_number(weight, raw)?,
    };
    debug!("Parsed box spec {:?}", spec);
    Ok(spec)
}

/// Parses `I:+D` / `I:-D` with a 1-based box type index.
pub fn parse_adjustment(raw: &str) -> std::result::Result<Adjustment, String> {
    let (index, delta) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected BOX:DELTA, got '{raw}'"))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid box number in '{raw}'"))?;
    if index == 0 {
        return Err("box numbers start at 1".to_string());
    }
    let delta: i64 = delta
        .trim()
        .trim_start_matches('+')
        .parse()
        .map_err(|_| format!("invalid delta in '{raw}'"))?;

    Ok(Adjustment {
        index: index - 1,
        delta,
    })
}

/// Give unnamed boxes their position as a name ("Box 1", "Box 2", ...).
pub fn name_unnamed(boxes: &mut [BoxSpec]) {
    for (i, spec) in boxes.iter_mut().enumerate() {
        if spec.name.is_empty() {
            spec.name = format!("Box {}", i + 1);
        }
    }
}

fn parse_number(text: &str, raw: &str) -> std::result::Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{}' in '{raw}'", text.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_box_specs() {
        let spec = parse_box_spec("pallet=4x3.5x2:120.5").unwrap();
        assert_eq!(spec.name, "pallet");
        assert_eq!(spec.dimensions, Dimensions::new(4.0, 3.5, 2.0));
        assert_eq!(spec.weight_kg, 120.5);

        let unnamed = parse_box_spec("1X1x2:3").unwrap();
        assert!(unnamed.name.is_empty());
        assert_eq!(unnamed.box_type().unit_volume, 2.0);
    }

    #[test]
    fn rejects_bad_box_specs() {
        assert!(parse_box_spec("1x1x1").is_err());
        assert!(parse_box_spec("1x1:3").is_err());
        assert!(parse_box_spec("1xax1:3").is_err());
        assert!(parse_box_spec("1x1x1x1:3").is_err());
    }

    #[test]
    fn parses_adjustments() {
        assert_eq!(parse_adjustment("1:+2"), Ok(Adjustment { index: 0, delta: 2 }));
        assert_eq!(parse_adjustment("3:-1"), Ok(Adjustment { index: 2, delta: -1 }));
        assert!(parse_adjustment("0:1").is_err());
        assert!(parse_adjustment("2").is_err());
    }

    #[test]
    fn names_unnamed_boxes_by_position() {
        let mut boxes = vec![
            parse_box_spec("1x1x1:1").unwrap(),
            parse_box_spec("big=2x2x2:1").unwrap(),
        ];
        name_unnamed(&mut boxes);
        assert_eq!(boxes[0].name, "Box 1");
        assert_eq!(boxes[1].name, "big");
    }

    #[test]
    fn reads_csv_box_specs() {
        let path = std::env::temp_dir().join(format!("truckload-boxes-{}.csv", std::process::id()));
        fs::write(
            &path,
            "name,length_ft,width_ft,height_ft,weight_kg\n small , 1, 1, 1, 5\nlarge,2,2,2,40\n",
        )
        .unwrap();

        let boxes = read_box_specs_from_csv(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].name, "small");
        assert_eq!(boxes[1].box_type().unit_volume, 8.0);
        assert_eq!(boxes[1].weight_kg, 40.0);
    }
}
