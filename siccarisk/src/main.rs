use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use siccarisk_model::{evaluate, ClinicalInput, Evaluation, RISK_ANCHORS};
use thiserror::Error;

const GAUGE_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "siccarisk",
    version,
    about = "Thrombocytopenia risk calculator for primary Sjögren's syndrome",
    long_about = "siccarisk estimates the probability of thrombocytopenia in patients with\n\
        primary Sjögren's syndrome from three indicators: dry mouth/eyes symptoms,\n\
        anti-SSA antibody level, and ProGRP concentration.\n\n\
        EXAMPLES:\n\
        \n  siccarisk eval --dry --anti-ssa 150 --progrp 30   Evaluate one case\n\
        \n  siccarisk json --input case.json                  Machine-readable output\n\
        \n  siccarisk repl                                    Interactive session\n\
        \n  siccarisk curve --step 20                         Inspect the risk curve"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one case and print the point breakdown and risk
    #[command(
        about = "Evaluate one case and print the point breakdown and risk",
        long_about = "Computes the nomogram points for one case and maps the total to a\n\
            probability of thrombocytopenia.\n\n\
            Inputs come from the flags, or from a JSON file via --input\n\
            ('-' reads stdin). Omitted flags use the form defaults:\n\
            no dry symptoms, anti-SSA 150 AU/mL, ProGRP 30 pg/mL."
    )]
    Eval(EvalArgs),

    /// Evaluate one case and print the result as JSON
    #[command(about = "Evaluate one case and print the result as JSON for tooling")]
    Json(EvalArgs),

    /// Start an interactive session that re-evaluates on every change
    #[command(
        about = "Start an interactive session that re-evaluates on every change",
        long_about = "Holds a working case and reprints the risk report after each accepted\n\
            change, like the live form.\n\n\
            Commands:\n\
            \n  dry on|off      Toggle the dry mouth/eyes finding\n\
            \n  ssa <AU/mL>     Set the anti-SSA antibody level\n\
            \n  progrp <pg/mL>  Set the ProGRP concentration\n\
            \n  :show           Show the current inputs\n\
            \n  :json           Print the current result as JSON\n\
            \n  :reset          Return to the form defaults\n\
            \n  :quit           Exit (also :q, :exit)"
    )]
    Repl,

    /// Print the score-to-risk anchor table
    #[command(about = "Print the score-to-risk anchor table, optionally sampling the curve")]
    Curve(CurveArgs),
}

#[derive(Debug, Args, Clone, Default)]
struct EvalArgs {
    /// Dry mouth/eyes symptoms are present
    #[arg(long = "dry")]
    dry_mouth_eyes: bool,

    /// Anti-SSA antibody level in AU/mL (default 150)
    #[arg(long = "anti-ssa", value_name = "AU_PER_ML")]
    anti_ssa: Option<f64>,

    /// ProGRP concentration in pg/mL (default 30)
    #[arg(long = "progrp", value_name = "PG_PER_ML")]
    pro_grp: Option<f64>,

    /// Read the case from a JSON file instead of the flags ('-' for stdin)
    #[arg(long = "input", value_name = "FILE", conflicts_with_all = ["dry_mouth_eyes", "anti_ssa", "pro_grp"])]
    input: Option<PathBuf>,

    /// Clamp numeric inputs to the form's slider ranges before scoring
    #[arg(long = "clamp")]
    clamp: bool,
}

#[derive(Debug, Args, Clone)]
struct CurveArgs {
    /// Also sample the curve over [0, 220] points at this step size
    #[arg(long = "step", value_name = "POINTS")]
    step: Option<f64>,
}

#[derive(Debug, Error)]
enum InputError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
}

fn load_input(args: &EvalArgs) -> Result<ClinicalInput, InputError> {
    let Some(path) = &args.input else {
        let defaults = ClinicalInput::default();
        return Ok(ClinicalInput::new(
            args.dry_mouth_eyes,
            args.anti_ssa.unwrap_or(defaults.anti_ssa),
            args.pro_grp.unwrap_or(defaults.pro_grp),
        ));
    };

    let (name, text) = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| InputError::Read {
                path: "<stdin>".into(),
                source,
            })?;
        ("<stdin>".to_string(), buf)
    } else {
        let text = fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.display().to_string(),
            source,
        })?;
        (path.display().to_string(), text)
    };

    serde_json::from_str(&text).map_err(|source| InputError::Decode { path: name, source })
}

/// Bounded text gauge: the fill fraction clamps to [0, 1] even when the
/// probability does not.
fn render_gauge(probability: f64, width: usize) -> String {
    let fraction = probability.clamp(0.0, 1.0);
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn render_report(input: &ClinicalInput, eval: &Evaluation) -> Vec<String> {
    let b = &eval.breakdown;
    let r = &eval.risk;
    vec![
        format!(
            "inputs: dry mouth/eyes {}, anti-SSA {:.1} AU/mL, ProGRP {:.1} pg/mL",
            if input.dry_mouth_eyes { "yes" } else { "no" },
            input.anti_ssa,
            input.pro_grp,
        ),
        format!("  dry mouth/eyes points  {:>6.1}", b.dry),
        format!("  anti-SSA points        {:>6.1}", b.anti_ssa),
        format!("  ProGRP points          {:>6.1}", b.pro_grp),
        format!("  total points           {:>6.1}", b.total),
        format!(
            "risk {} {:.1}% ({})",
            render_gauge(r.probability, GAUGE_WIDTH),
            r.percent(),
            r.stratum(),
        ),
    ]
}

fn json_report(input: &ClinicalInput, eval: &Evaluation) -> String {
    let value = serde_json::json!({
        "input": input,
        "breakdown": eval.breakdown,
        "risk": {
            "probability": eval.risk.probability,
            "percent": eval.risk.percent(),
            "stratum": eval.risk.stratum(),
        },
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

fn run_eval(args: &EvalArgs, mode: OutputMode) -> i32 {
    let input = match load_input(args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let input = if args.clamp { input.clamped() } else { input };
    log::debug!("evaluating case: {input:?}");
    let eval = evaluate(&input);

    match mode {
        OutputMode::Text => {
            for line in render_report(&input, &eval) {
                println!("{line}");
            }
        }
        OutputMode::Json => println!("{}", json_report(&input, &eval)),
    }
    0
}

fn run_curve(args: &CurveArgs) -> i32 {
    println!("anchor table (points -> probability):");
    for (score, risk) in RISK_ANCHORS {
        println!("  {score:>5.0}  ->  {risk:.2}");
    }

    if let Some(step) = args.step {
        if !step.is_finite() || step <= 0.0 {
            eprintln!("error: --step must be a positive number of points");
            return 2;
        }
        println!("sampled curve:");
        let mut score = 0.0;
        while score <= 220.0 {
            let risk = siccarisk_model::score_to_risk(score);
            println!("  {score:>6.1}  ->  {:.1}%", risk * 100.0);
            score += step;
        }
    }
    0
}

#[derive(Debug)]
struct ReplSession {
    input: ClinicalInput,
}

impl ReplSession {
    fn new() -> Self {
        Self {
            input: ClinicalInput::default(),
        }
    }

    fn prompt(&self) -> &'static str {
        "siccarisk> "
    }

    fn report(&self) -> Vec<String> {
        let eval = evaluate(&self.input);
        render_report(&self.input, &eval)
    }

    fn handle_command(&mut self, line: &str) -> (Vec<String>, bool) {
        match line {
            ":help" => (
                vec![
                    "commands: :help, :show, :json, :reset, :quit".to_string(),
                    "updates: dry on|off, ssa <AU/mL>, progrp <pg/mL>".to_string(),
                    "each accepted update re-evaluates and reprints the report".to_string(),
                ],
                false,
            ),
            ":q" | ":quit" | ":exit" => (Vec::new(), true),
            ":show" => (
                vec![format!(
                    "dry mouth/eyes: {}, anti-SSA: {:.1} AU/mL, ProGRP: {:.1} pg/mL",
                    if self.input.dry_mouth_eyes { "yes" } else { "no" },
                    self.input.anti_ssa,
                    self.input.pro_grp,
                )],
                false,
            ),
            ":json" => {
                let eval = evaluate(&self.input);
                (vec![json_report(&self.input, &eval)], false)
            }
            ":reset" => {
                self.input = ClinicalInput::default();
                (self.report(), false)
            }
            other => (vec![format!("error: unknown command '{other}'")], false),
        }
    }

    fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }

        let mut parts = trimmed.split_whitespace();
        let field = parts.next().unwrap_or_default();
        let value = parts.next();
        if parts.next().is_some() {
            return (
                vec!["error: expected '<field> <value>'".to_string()],
                false,
            );
        }

        let out = match (field, value) {
            ("dry" | "ssa" | "progrp", None) => {
                Some(format!("error: usage: {field} <value>"))
            }
            ("dry", Some(v)) => match v {
                "on" | "true" | "yes" | "1" => {
                    self.input.dry_mouth_eyes = true;
                    None
                }
                "off" | "false" | "no" | "0" => {
                    self.input.dry_mouth_eyes = false;
                    None
                }
                other => Some(format!("error: expected 'dry on' or 'dry off', got '{other}'")),
            },
            ("ssa", Some(v)) => match v.parse::<f64>() {
                Ok(level) if level.is_finite() => {
                    self.input.anti_ssa = level;
                    self.input = self.input.clamped();
                    None
                }
                _ => Some(format!("error: '{v}' is not a valid anti-SSA level")),
            },
            ("progrp", Some(v)) => match v.parse::<f64>() {
                Ok(level) if level.is_finite() => {
                    self.input.pro_grp = level;
                    self.input = self.input.clamped();
                    None
                }
                _ => Some(format!("error: '{v}' is not a valid ProGRP level")),
            },
            (other, _) => Some(format!(
                "error: unknown field '{other}' (try :help)"
            )),
        };

        match out {
            Some(err) => (vec![err], false),
            None => (self.report(), false),
        }
    }
}

fn run_repl() -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new();
    println!("starting from the form defaults; :help lists commands");
    for line in session.report() {
        println!("{line}");
    }

    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Some(Command::Eval(args)) => run_eval(&args, OutputMode::Text),
        Some(Command::Json(args)) => run_eval(&args, OutputMode::Json),
        Some(Command::Repl) => run_repl(),
        Some(Command::Curve(args)) => run_curve(&args),
        // bare `siccarisk` evaluates the form defaults
        None => run_eval(&EvalArgs::default(), OutputMode::Text),
    }
}

fn main() {
    std::process::exit(run_cli());
}
