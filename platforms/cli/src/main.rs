use clap::Parser;
use retrace::{
    analyze, analyze_configuration, Configuration, MachineManager, MachineSpec, SpecLoader, Tape,
};
use std::path::Path;
use std::process;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The rule-table file to load
    #[clap(short, long, conflicts_with = "machine")]
    table: Option<String>,

    /// The name of an embedded machine to load (see --list)
    #[clap(short, long)]
    machine: Option<String>,

    /// List the embedded machines and exit
    #[clap(long)]
    list: bool,

    /// Initial tape contents, comma separated, index 0 leftmost
    #[clap(short = 'i', long, default_value = "")]
    tape: String,

    /// Initial state; defaults to the table's first trigger state
    #[clap(short, long)]
    state: Option<String>,

    /// Initial head position
    #[clap(long, default_value_t = 0)]
    head: i64,

    /// Blank symbol
    #[clap(short, long, default_value = "_")]
    blank: String,

    /// Maximum number of forward steps to run
    #[clap(short = 'n', long, default_value_t = 100)]
    steps: usize,

    /// Enumerate predecessor configurations to this depth instead of
    /// stepping forward
    #[clap(short, long)]
    reverse: Option<usize>,

    /// Treat the starting configuration as halted
    #[clap(long)]
    halted: bool,

    /// Print each configuration as JSON
    #[clap(short, long)]
    json: bool,

    /// Print every intermediate configuration
    #[clap(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for index in 0..MachineManager::count() {
            match MachineManager::get_info(index) {
                Ok(info) => println!(
                    "{} (start: {}, {} rules)",
                    info.name, info.initial_state, info.rule_count
                ),
                Err(e) => eprintln!("error: {e}"),
            }
        }
        return;
    }

    let spec = load_spec(&cli);

    let state = cli
        .state
        .clone()
        .or_else(|| spec.default_initial_state().map(str::to_string))
        .unwrap_or_else(|| {
            eprintln!("error: the table has no rules; pass --state explicitly");
            process::exit(1);
        });

    let tape = Tape::parse(&cli.tape, &cli.blank, cli.head);
    let config = Configuration::new(tape, state, cli.halted);

    if let Err(e) = analyze(&spec).and_then(|_| analyze_configuration(&spec, &config)) {
        eprintln!("error: {e}");
        process::exit(1);
    }

    match cli.reverse {
        Some(depth) => run_reverse(&spec, config, depth, &cli),
        None => run_forward(&spec, config, &cli),
    }
}

/// Loads the machine specification from --table or --machine.
fn load_spec(cli: &Cli) -> MachineSpec {
    let result = match (&cli.table, &cli.machine) {
        (Some(path), _) => SpecLoader::load_spec(Path::new(path), &cli.blank),
        (None, Some(name)) => MachineManager::get_by_name(name),
        (None, None) => {
            eprintln!("error: pass --table, --machine, or --list");
            process::exit(1);
        }
    };

    match result {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Steps the configuration forward until it halts or the step limit is hit.
fn run_forward(spec: &MachineSpec, mut config: Configuration, cli: &Cli) {
    if cli.debug {
        print_configuration(&config, cli);
    }

    for _ in 0..cli.steps {
        if config.is_halted() {
            break;
        }

        config = match spec.step(&config) {
            Ok(next) => next,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        };

        if cli.debug {
            print_configuration(&config, cli);
        }
    }

    if !cli.debug {
        print_configuration(&config, cli);
    }
}

/// Expands the predecessor frontier level by level. The engine reports
/// duplicates per justifying rule; deduplicating each level with
/// configuration equality is this caller's policy.
fn run_reverse(spec: &MachineSpec, config: Configuration, depth: usize, cli: &Cli) {
    let mut frontier = vec![config];

    for level in 1..=depth {
        let mut next: Vec<Configuration> = Vec::new();

        for config in &frontier {
            for predecessor in spec.invert(config) {
                if !next.contains(&predecessor) {
                    next.push(predecessor);
                }
            }
        }

        println!("level {level}: {} predecessor(s)", next.len());
        for predecessor in &next {
            print_configuration(predecessor, cli);
        }

        frontier = next;
        if frontier.is_empty() {
            break;
        }
    }
}

fn print_configuration(config: &Configuration, cli: &Cli) {
    if cli.json {
        match serde_json::to_string(config) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("error: {e}"),
        }
        return;
    }

    let tape = config.tape();
    let (lo, hi) = match tape.bounds() {
        Some((lo, hi)) => (lo.min(tape.head()), hi.max(tape.head())),
        None => (tape.head(), tape.head()),
    };

    let cells: Vec<&str> = (lo..=hi).map(|index| tape.symbol_at(index)).collect();
    let status = if config.is_halted() { " (halted)" } else { "" };
    let label = format!("state: {}{}  tape[{}..{}]: ", config.state(), status, lo, hi);
    println!("{}{}", label, cells.join(","));

    // Mark the head cell on a second line, but only on an interactive
    // terminal; piped output stays one line per configuration.
    if atty::is(atty::Stream::Stdout) {
        let mut marker = " ".repeat(label.len());
        for (offset, cell) in cells.iter().enumerate() {
            if lo + offset as i64 == tape.head() {
                marker.push('^');
                break;
            }
            marker.push_str(&" ".repeat(cell.len() + 1));
        }
        println!("{marker}");
    }
}
