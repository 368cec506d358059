use fretboard::shapes::{ChordQuality, ChordSpec, ShapeResolver, TRIAD_SHAPES};
use fretboard::{
    clamp_fret_count, format_for_display, load_initial_selection, Accidentals, FretPosition,
    PageConfig, PitchClass, Tuning, DEFAULT_FRET_COUNT, STRING_COUNT,
};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: fretboard notes [--flat] [--frets N]
       fretboard chord <ROOT> <major|minor> [--strings 345] [--frets N]
       fretboard triads
       fretboard page <page.yaml> [--frets N]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        process::exit(1);
    };

    let result = match command.as_str() {
        "notes" => notes(&args[1..]),
        "chord" => chord(&args[1..]),
        "triads" => {
            triads();
            Ok(())
        }
        "page" => page(&args[1..]),
        _ => Err(USAGE.to_string()),
    };

    if let Err(message) = result {
        eprintln!("{}", message);
        process::exit(1);
    }
}

/// `RUST_LOG`-style directives, falling back to `warn` when none parse.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| format!("Missing value for {}", flag)),
        None => Ok(None),
    }
}

fn fret_count(args: &[String]) -> Result<usize, String> {
    match flag_value(args, "--frets")? {
        Some(v) => v
            .parse::<usize>()
            .map(clamp_fret_count)
            .map_err(|_| format!("Invalid fret count: {}", v)),
        None => Ok(DEFAULT_FRET_COUNT),
    }
}

fn header(frets: usize) -> String {
    let mut line = String::from("   ");
    for fret in 0..=frets {
        line.push_str(&format!("{:>4}", fret));
    }
    line
}

/// Print one row per string, high string first.
fn print_board(frets: usize, mut cell: impl FnMut(FretPosition) -> String) {
    let tuning = Tuning::standard();
    println!("{}", header(frets));
    for string in (0..STRING_COUNT).rev() {
        let open = tuning.open_strings()[string];
        let mut line = format!("{:<3}", open.to_string());
        for fret in 0..=frets {
            line.push_str(&format!("{:>4}", cell(FretPosition::new(string, fret))));
        }
        println!("{}", line);
    }
}

fn notes(args: &[String]) -> Result<(), String> {
    let frets = fret_count(args)?;
    let accidentals = if args.iter().any(|a| a == "--flat") {
        Accidentals::Flat
    } else {
        Accidentals::Sharp
    };
    let tuning = Tuning::standard();
    print_board(frets, |pos| {
        format_for_display(tuning.note_at(pos), accidentals).to_string()
    });
    Ok(())
}

fn chord(args: &[String]) -> Result<(), String> {
    let (Some(root), Some(quality)) = (args.first(), args.get(1)) else {
        return Err(USAGE.to_string());
    };
    let root: PitchClass = root.parse().map_err(|e| format!("{}", e))?;
    let quality: ChordQuality = quality.parse().map_err(|e| format!("{}", e))?;

    let strings: Vec<usize> = match flag_value(args, "--strings")? {
        Some(digits) => digits
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if (d as usize) < STRING_COUNT => Ok(d as usize),
                _ => Err(format!("Invalid string list: {}", digits)),
            })
            .collect::<Result<_, _>>()?,
        None => (0..STRING_COUNT).collect(),
    };
    let frets = fret_count(args)?;

    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, frets);
    let chord_spec = ChordSpec::new(root, quality, strings);

    let mut shapes = BTreeSet::new();
    print_board(frets, |pos| match resolver.resolve(&chord_spec, pos) {
        Some(hl) => {
            shapes.insert((
                hl.shape.min_fret(),
                hl.fingerprint.to_string(),
                hl.inversion.name(),
                hl.color,
            ));
            hl.label.to_string()
        }
        None => "-".to_string(),
    });

    println!();
    for (min_fret, fingerprint, inversion, color) in shapes {
        println!("fret {:>2}  {:<8} {:<9} {}", min_fret, fingerprint, inversion, color);
    }
    Ok(())
}

fn triads() {
    for shape in TRIAD_SHAPES.iter() {
        let cells: Vec<String> = shape.positions().iter().map(|p| p.to_string()).collect();
        println!("{:<32} {}", shape.title(), cells.join(" "));
    }
}

fn page(args: &[String]) -> Result<(), String> {
    let Some(path) = args.first() else {
        return Err(USAGE.to_string());
    };
    let content =
        fs::read_to_string(path).map_err(|e| format!("Error reading file '{}': {}", path, e))?;
    let config = PageConfig::from_yaml(&content).map_err(|e| format!("{}: {}", path, e))?;
    let frets = fret_count(args)?;

    let selection = load_initial_selection(&config, &Tuning::standard(), frets);
    println!("{} ({})", config.title, config.slug);
    if !config.description.is_empty() {
        println!("{}", config.description);
    }
    println!("{} positions selected", selection.len());
    print_board(frets, |pos| {
        if selection.contains(&pos) {
            "o".to_string()
        } else {
            ".".to_string()
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).to_string(), "warn");
        assert_eq!(log_filter(Some("")).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_keeps_bare_level() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(log_filter(Some("fretboard=trace")).to_string(), "fretboard=trace");
    }
}
