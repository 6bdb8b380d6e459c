//! Command-line renderer: reads a JSON or YAML diagram description and
//! writes the chosen back-end's output to stdout or a file.

use std::io::Read;

use shunter_render::{EndClass, SvgRenderSettings, TextRenderSettings};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Render(shunter_core::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Yaml(err) => write!(f, "YAML error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<shunter_core::Error> for CliError {
    fn from(value: shunter_core::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Format {
    #[default]
    Svg,
    Text,
}

#[derive(Debug, Default)]
struct Args {
    format: Format,
    input: Option<String>,
    out: Option<String>,
    max_width: Option<f64>,
    reverse: bool,
    end_class: Option<EndClass>,
    title: Option<String>,
    yaml: bool,
    debug: bool,
}

fn usage() -> &'static str {
    "shunter\n\
\n\
USAGE:\n\
  shunter [render] [--format svg|text] [--max-width <n>] [--reverse]\n\
          [--end-class simple|complex] [--title <text>] [--yaml] [--debug]\n\
          [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON diagram description; .yaml/.yml files (or --yaml) are\n\
    parsed as YAML.\n\
  - Output goes to stdout by default; use --out to write a file.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => {}
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = match fmt.as_str() {
                    "svg" => Format::Svg,
                    "text" | "txt" | "ascii" => Format::Text,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--max-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let w = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(w.is_finite() && w > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.max_width = Some(w);
            }
            "--reverse" => args.reverse = true,
            "--end-class" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.end_class = match kind.as_str() {
                    "simple" => Some(EndClass::Simple),
                    "complex" => Some(EndClass::Complex),
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--yaml" => args.yaml = true,
            "--debug" => args.debug = true,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn parse_description(text: &str, args: &Args) -> Result<serde_json::Value, CliError> {
    let is_yaml = args.yaml
        || args
            .input
            .as_deref()
            .is_some_and(|p| p.ends_with(".yaml") || p.ends_with(".yml"));
    if is_yaml {
        Ok(serde_yaml::from_str(text)?)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

fn write_output(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let value = parse_description(&text, &args)?;
    let element = shunter_core::load::from_value(&value)?;

    let output = match args.format {
        Format::Svg => {
            let mut settings = SvgRenderSettings::default();
            if let Some(w) = args.max_width {
                settings.max_width = w;
            }
            if let Some(end_class) = args.end_class {
                settings.end_class = end_class;
            }
            settings.title = args.title.clone();
            settings.reverse = args.reverse;
            settings.debug = args.debug;
            shunter_render::render_svg(&element, &settings)?
        }
        Format::Text => {
            let mut settings = TextRenderSettings::default();
            if let Some(w) = args.max_width {
                settings.max_width = w;
            }
            if let Some(end_class) = args.end_class {
                settings.end_class = end_class;
            }
            settings.reverse = args.reverse;
            settings.debug = args.debug;
            shunter_render::render_text(&element, &settings)?
        }
    };

    write_output(&output, args.out.as_deref())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(args) => args,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
