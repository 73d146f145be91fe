use clap::Parser;
use geo_kirkpatrick::io::{polygon_from_geojson, read_points, triangulation_to_geojson};
use geo_kirkpatrick::{LocatorOptions, LogTracer, Point};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Polygon file: GeoJSON (.geojson/.json) or the plain point-list format
    #[arg(short, long)]
    input: PathBuf,

    /// Write the initial triangulation here as GeoJSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Query points as "x,y"; may be repeated
    #[arg(short, long = "query", value_parser = parse_query)]
    queries: Vec<Point>,

    /// Maximum degree of vertices removed per refinement round
    #[arg(long, default_value_t = geo_kirkpatrick::locator::MAX_DEGREE)]
    max_degree: usize,

    /// Print every construction step (log records at trace level)
    #[arg(long, default_value_t = false)]
    trace: bool,
}

fn parse_query(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let coord = |v: &str| v.trim().parse::<i64>().map_err(|e| format!("{v:?}: {e}"));
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Also bridges `log` records, which is what the locator emits.
    tracing_subscriber::fmt()
        .with_max_level(if args.trace {
            LevelFilter::TRACE
        } else {
            LevelFilter::INFO
        })
        .with_target(false)
        .init();

    println!("Reading polygon from {:?}", args.input);
    let is_geojson = matches!(
        args.input.extension().and_then(|e| e.to_str()),
        Some("geojson") | Some("json")
    );
    let points = if is_geojson {
        let value: serde_json::Value = serde_json::from_reader(BufReader::new(File::open(&args.input)?))?;
        polygon_from_geojson(&value.to_string())?
    } else {
        let file = read_points(BufReader::new(File::open(&args.input)?))?;
        if !file.complete {
            println!("Warning: polygon is marked incomplete, closing it anyway");
        }
        file.points
    };
    println!("Read {} vertices", points.len());

    let options = LocatorOptions {
        max_degree: args.max_degree,
        ..Default::default()
    };
    let start = std::time::Instant::now();
    let locator = if args.trace {
        options.build_traced(&points, &mut LogTracer)?
    } else {
        options.build(&points)?
    };
    println!(
        "Built hierarchy in {:?}: {} triangles, {} rounds",
        start.elapsed(),
        locator.hierarchy().len(),
        locator.rounds()
    );

    for q in &args.queries {
        let verdict = if locator.query(*q) { "inside" } else { "outside" };
        println!("{q}: {verdict}");
    }

    if let Some(output) = &args.output {
        fs::write(output, triangulation_to_geojson(&locator))?;
        println!("Wrote triangulation to {:?}", output);
    }

    Ok(())
}
