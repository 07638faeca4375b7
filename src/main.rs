use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use stepwise::{
    parse_slots, Algorithm, Controller, Element, Pacer, PlaybackConfig, Renderer, Slot, Step,
    StructureKind,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stepwise", about = "Step through data-structure traversals in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Auto-play a traversal with timed pauses between visits.
    Play {
        #[command(flatten)]
        setup: Setup,
        /// Speed multiplier; pause = base delay / speed.
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
        /// Pause at speed 1x, in milliseconds.
        #[arg(long, default_value_t = 700)]
        base_delay_ms: u64,
    },
    /// Advance a traversal one visit at a time (Enter steps, `q` quits).
    Step {
        #[command(flatten)]
        setup: Setup,
        /// Take this many steps without reading stdin.
        #[arg(long)]
        steps: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct Setup {
    /// Structure kind: stack, queue, list or tree.
    #[arg(long, default_value = "tree")]
    structure: StructureKind,
    /// Values separated by whitespace or commas.
    #[arg(long, default_value = "5, 3, 8, 1, 4, 7, 9, 0")]
    values: String,
    /// Token that marks an empty tree slot (e.g. `_`).
    #[arg(long)]
    gap: Option<String>,
    /// Algorithm: bfs, dfs-pre, dfs-in, dfs-post, lin or bin.
    #[arg(long, default_value = "bfs")]
    algorithm: Algorithm,
    /// Value to search for.
    #[arg(long, default_value = "")]
    target: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            setup,
            speed,
            base_delay_ms,
        } => run_play(setup, speed, base_delay_ms)?,
        Commands::Step { setup, steps } => run_step(setup, steps)?,
    }

    Ok(())
}

fn run_play(setup: Setup, speed: f64, base_delay_ms: u64) -> Result<()> {
    let config = PlaybackConfig::default()
        .with_base_delay(Duration::from_millis(base_delay_ms))
        .with_speed(speed)
        .context("invalid --speed")?;

    let mut controller =
        Controller::with_pacer(TerminalRenderer::stdout(), FlushingPacer).with_config(config);
    prepare(&mut controller, &setup);

    let outcome = controller.run();
    tracing::debug!(%outcome, "playback finished");
    Ok(())
}

fn run_step(setup: Setup, steps: Option<usize>) -> Result<()> {
    let mut controller = Controller::new(TerminalRenderer::stdout());
    prepare(&mut controller, &setup);

    if let Some(steps) = steps {
        for _ in 0..steps {
            if controller.step() == Step::Rejected {
                break;
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        if controller.step().is_terminal() {
            break;
        }
    }
    Ok(())
}

fn prepare<P: Pacer>(controller: &mut Controller<TerminalRenderer<io::Stdout>, P>, setup: &Setup) {
    controller.set_structure_mode(setup.structure);
    controller.load_slots(parse_slots(&setup.values, setup.gap.as_deref()));
    controller.select_algorithm(setup.algorithm);
    controller.set_target(&setup.target);
}

/// Prints every notification as one line
struct TerminalRenderer<W> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalRenderer<W> {
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn on_visit(&mut self, index: usize, value: Option<&Element>, label: &str) {
        let shown = value.map(ToString::to_string).unwrap_or_default();
        self.line(&format!("visit\t{index}\t{shown}\t{label}"));
    }

    fn on_target_found(&mut self, index: usize, value: Option<&Element>) {
        let shown = value.map(ToString::to_string).unwrap_or_default();
        self.line(&format!("found\t{index}\t{shown}"));
    }

    fn on_status(&mut self, message: &str) {
        self.line(&format!("status\t{message}"));
    }

    fn on_traversal_complete(&mut self) {
        self.line("complete");
    }

    fn on_validation_error(&mut self, message: &str) {
        self.line(&format!("error\t{message}"));
    }

    fn on_render(&mut self, kind: StructureKind, slots: &[Slot]) {
        let shown: Vec<String> = slots
            .iter()
            .map(|slot| slot.as_ref().map_or_else(|| "·".to_string(), ToString::to_string))
            .collect();
        self.line(&format!("{kind}\t[{}]", shown.join(", ")));
    }
}

/// Flushes stdout so each visit shows up before the pause
#[derive(Debug, Clone, Copy)]
struct FlushingPacer;

impl Pacer for FlushingPacer {
    fn pause(&mut self, delay: Duration) {
        let _ = io::stdout().flush();
        std::thread::sleep(delay);
    }
}
