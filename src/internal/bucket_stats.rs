#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]

use chainmap::ChainMap;
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric};

// Total number of random keys inserted
const NUM_KEYS: usize = 100_000;
// Record chain statistics every SAMPLE_EVERY inserts
const SAMPLE_EVERY: usize = 500;
const MIN_KEY_LEN: usize = 4;
const MAX_KEY_LEN: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Sample {
    entries: usize,
    capacity: usize,
    average_chain: f64,
    longest_chain: usize,
}

// Average over allocated, non-empty buckets only
fn sample(map: &ChainMap<usize>) -> Sample {
    let lengths = map.bucket_lengths();
    let occupied: Vec<usize> = lengths.into_iter().filter(|&len| len > 0).collect();
    let average_chain = if occupied.is_empty() {
        0.0
    } else {
        occupied.iter().sum::<usize>() as f64 / occupied.len() as f64
    };

    Sample {
        entries: map.len(),
        capacity: map.capacity(),
        average_chain,
        longest_chain: occupied.iter().copied().max().unwrap_or(0),
    }
}

fn random_key(rng: &mut impl Rng) -> String {
    let len = rng.random_range(MIN_KEY_LEN..=MAX_KEY_LEN);
    rng.sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let mut map = ChainMap::new();
    let mut samples = Vec::with_capacity(NUM_KEYS / SAMPLE_EVERY);
    let mut last_capacity = map.capacity();

    for i in 0..NUM_KEYS {
        map.set(random_key(&mut rng), i);

        if map.capacity() != last_capacity {
            println!(
                "Grew from {} to {} buckets at {} entries",
                last_capacity,
                map.capacity(),
                map.len()
            );
            last_capacity = map.capacity();
        }
        if (i + 1) % SAMPLE_EVERY == 0 {
            samples.push(sample(&map));
        }
    }

    let last = samples.last().copied().unwrap_or_else(|| sample(&map));
    println!(
        "Final: {} entries, {} buckets, average chain {:.2}, longest chain {}",
        last.entries, last.capacity, last.average_chain, last.longest_chain
    );

    let line_width = 2;
    let text_size = 16;
    let title_size = 35;
    let font_family = "sans-serif";

    let root = BitMapBackend::new("chain_lengths.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = samples.iter().map(|s| s.longest_chain).max().unwrap_or(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Chain Length While Growing", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..NUM_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Chain Length (entries)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    let average_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(line_width);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.entries, s.average_chain)),
            average_style,
        ))?
        .label("Average occupied chain")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], average_style));

    let longest_style = ShapeStyle::from(&RGBColor(220, 50, 50)).stroke_width(line_width);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.entries, s.longest_chain as f64)),
            longest_style,
        ))?
        .label("Longest chain")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], longest_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot image: chain_lengths.png");

    Ok(())
}
