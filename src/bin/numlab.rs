use numlab::api::{ApiClients, Operation};
use numlab::config::ClientConfig;
use numlab::core::{ExpressionSanitizer, SanitizeRules};
use numlab::render::Color;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage:
  numlab sanitize <expression> [--power-only]
  numlab endpoints
  numlab solve <resource> --payload <path> [--output <path>] [--chart <path.svg>] [--width <px>] [--height <px>] [--color <#rrggbb>]

environment:
  NUMLAB_API_URL (or API_URL)  solver base url
  NUMLAB_MODE                  extended (default) | legacy";

#[derive(Debug)]
enum Command {
    Sanitize {
        expression: String,
        rules: SanitizeRules,
    },
    Endpoints,
    Solve(SolveArgs),
}

#[derive(Debug)]
struct SolveArgs {
    operation: Operation,
    payload: PathBuf,
    output: Option<PathBuf>,
    chart: Option<PathBuf>,
    width: u32,
    height: u32,
    series_color: Option<Color>,
}

fn main() {
    let _ = numlab::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    match parse_args(std::env::args().skip(1))? {
        Command::Sanitize { expression, rules } => {
            println!("{}", ExpressionSanitizer::new(rules).sanitize(&expression));
            Ok(())
        }
        Command::Endpoints => {
            let config = ClientConfig::from_env().map_err(|err| err.to_string())?;
            for operation in Operation::ALL {
                let availability = if operation.is_available_in(config.mode) {
                    "available"
                } else {
                    "unavailable"
                };
                println!(
                    "{:<20} {} ({availability} in {} mode)",
                    operation.resource_path(),
                    config.endpoint(operation.resource_path()),
                    config.mode
                );
            }
            Ok(())
        }
        Command::Solve(args) => solve(&args),
    }
}

fn solve(args: &SolveArgs) -> Result<(), String> {
    let raw = fs::read_to_string(&args.payload)
        .map_err(|err| format!("failed to read `{}`: {err}", args.payload.display()))?;
    let payload: Value = serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;

    let config = ClientConfig::from_env().map_err(|err| err.to_string())?;
    let clients = ApiClients::from_config(config).map_err(|err| err.to_string())?;
    let response = clients
        .submit(args.operation, &payload)
        .map_err(|err| err.to_string())?;

    let pretty = serde_json::to_string_pretty(&response)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    match &args.output {
        Some(path) => fs::write(path, &pretty)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?,
        None => println!("{pretty}"),
    }

    if let Some(chart) = &args.chart {
        export_chart(args, &payload, &response, chart)?;
    }
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn export_chart(args: &SolveArgs, payload: &Value, response: &Value, chart: &Path) -> Result<(), String> {
    use numlab::core::{SolverOutcome, Viewport, sample_points};
    use numlab::export::{ChartExporter, DirectorySink, ExportOutcome};
    use numlab::render::{CairoRenderer, PlotBuilder, PlotStyle, Renderer};

    let points = if args.operation.is_root_finding() {
        SolverOutcome::from_value(response)
            .map_err(|err| err.to_string())?
            .convergence_points()
    } else if args.operation == Operation::Interpolation {
        sample_points(payload).map_err(|err| err.to_string())?
    } else {
        return Err(format!("no chart is defined for `{}`", args.operation));
    };

    let viewport = Viewport::new(args.width, args.height);
    let mut style = PlotStyle::default();
    if let Some(color) = args.series_color {
        style.series_color = color;
    }
    let mut plot = PlotBuilder::new(viewport).with_style(style);
    if let Some(expression) = payload.get("function_expression").and_then(Value::as_str) {
        plot = plot.with_expression(expression, &ExpressionSanitizer::default());
    }
    let frame = plot.build(&points).map_err(|err| err.to_string())?;

    let mut renderer = CairoRenderer::for_viewport(viewport).map_err(|err| err.to_string())?;
    renderer
        .set_clear_color(plot.style().background)
        .map_err(|err| err.to_string())?;
    renderer.render(&frame).map_err(|err| err.to_string())?;

    let (dir, file_name) = split_chart_path(chart)?;
    let exporter = ChartExporter::new(DirectorySink::new(dir));
    match exporter
        .export_as_image(Some(&renderer), &file_name)
        .map_err(|err| err.to_string())?
    {
        ExportOutcome::Saved { path, .. } => {
            eprintln!("chart written to `{}`", path.display());
            Ok(())
        }
        ExportOutcome::MissingSurface => Err("chart surface unavailable".to_owned()),
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn export_chart(_args: &SolveArgs, _payload: &Value, _response: &Value, chart: &Path) -> Result<(), String> {
    Err(format!(
        "cannot write `{}`: chart export requires the `cairo-backend` feature",
        chart.display()
    ))
}

#[cfg_attr(not(feature = "cairo-backend"), allow(dead_code))]
fn split_chart_path(chart: &Path) -> Result<(PathBuf, String), String> {
    let file_name = chart
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("`{}` has no usable file name", chart.display()))?
        .to_owned();
    let dir = match chart.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    match args.next().as_deref() {
        Some("sanitize") => {
            let mut expression = None::<String>;
            let mut rules = SanitizeRules::default();
            for arg in args {
                match arg.as_str() {
                    "--power-only" => rules = SanitizeRules::POWER_ONLY,
                    "--help" | "-h" => return Err(USAGE.to_owned()),
                    _ if expression.is_none() => expression = Some(arg),
                    _ => return Err(format!("unexpected argument `{arg}`")),
                }
            }
            let expression = expression.ok_or_else(|| "missing <expression>".to_owned())?;
            Ok(Command::Sanitize { expression, rules })
        }
        Some("endpoints") => Ok(Command::Endpoints),
        Some("solve") => parse_solve_args(args).map(Command::Solve),
        _ => Err(USAGE.to_owned()),
    }
}

fn parse_solve_args(mut args: impl Iterator<Item = String>) -> Result<SolveArgs, String> {
    let operation: Operation = args
        .next()
        .ok_or_else(|| "missing <resource>".to_owned())?
        .parse()
        .map_err(|err: numlab::NumlabError| err.to_string())?;

    let mut payload = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut chart = None::<PathBuf>;
    let mut width = 800_u32;
    let mut height = 480_u32;
    let mut series_color = None::<Color>;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--payload" => payload = Some(PathBuf::from(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--chart" => chart = Some(PathBuf::from(value()?)),
            "--width" => width = parse_pixels(&value()?)?,
            "--height" => height = parse_pixels(&value()?)?,
            "--color" => {
                series_color = Some(Color::from_hex(&value()?).map_err(|err| err.to_string())?);
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let payload = payload.ok_or_else(|| "missing --payload".to_owned())?;
    Ok(SolveArgs {
        operation,
        payload,
        output,
        chart,
        width,
        height,
        series_color,
    })
}

fn parse_pixels(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(format!("`{raw}` is not a positive pixel size")),
    }
}
