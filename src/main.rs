use stepgraph::context::GraphContext;
use stepgraph::layout::{Canvas, LayoutMode, LayoutPlanner};
use stepgraph::measure::LabelMetrics;
use stepgraph::payload::GraphPayload;
use serde_json::json;
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

fn usage(program: &str) {
    eprintln!("Usage: {} <payload.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("  -m, --mode <mode>       Layout mode: dag, tree (default: dag)");
    eprintln!("  -W, --width <px>        Canvas width (default: 800)");
    eprintln!("  -H, --height <px>       Canvas height (default: 500)");
    eprintln!("      --margin <px>       Canvas margin (default: 50)");
    eprintln!("      --caption-width <n> Caption width in columns (default: 12)");
    eprintln!("      --highlight <uid>   Include the path highlight of a submission");
}

fn parse_number(flag: &str, value: &str) -> f64 {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {}: {}", flag, value);
        process::exit(1);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut mode = LayoutMode::Dag;
    let mut canvas = Canvas::default();
    let mut planner = LayoutPlanner::default();
    let mut highlight: Option<String> = None;
    let mut metrics = LabelMetrics::default();

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let Some(value) = args.get(i) else {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        };
        match flag {
            "-o" | "--output" => output_path = Some(value.clone()),
            "-m" | "--mode" => {
                mode = LayoutMode::from_str(value).unwrap_or_else(|| {
                    eprintln!("Invalid layout mode: {}", value);
                    process::exit(1);
                });
            }
            "-W" | "--width" => canvas.width = parse_number(flag, value),
            "-H" | "--height" => canvas.height = parse_number(flag, value),
            "--margin" => planner = planner.with_margin(parse_number(flag, value)),
            "--caption-width" => {
                metrics.caption_width = value.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid value for {}: {}", flag, value);
                    process::exit(1);
                });
            }
            "--highlight" => highlight = Some(value.clone()),
            _ => {
                eprintln!("Unknown option: {}", flag);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let payload = match GraphPayload::from_json(&input) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut ctx = match GraphContext::load(&payload, mode, canvas, &planner) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    ctx.set_label_metrics(metrics);

    let details = match ctx
        .layout()
        .nodes
        .iter()
        .map(|n| ctx.node_detail(n.id))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(details) => details,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Some(uid) = &highlight {
        if let Err(e) = ctx.highlight_submission(uid) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    let document = if highlight.is_some() {
        json!({ "layout": ctx.layout(), "details": details, "highlight": ctx.highlight() })
    } else {
        json!({ "layout": ctx.layout(), "details": details })
    };
    let output = match serde_json::to_string_pretty(&document) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to encode layout: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => println!("{}", output),
    }
}
