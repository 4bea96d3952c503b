use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use qplayground::circuit::{simulate, CircuitFile};
use qplayground::core::{ControlledGate, Gate, Simulator};
use qplayground::{Playground, SimConfig};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

/// Probabilities at or below this are not printed.
const DISPLAY_THRESHOLD: f64 = 1e-6;

#[derive(Debug, Parser)]
#[command(name = "qplay", version, about = "State-vector quantum circuit playground")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run built-in demonstration circuits
    Demo,
    /// Replay a circuit file and print the resulting state
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Fixed RNG seed (overrides the config file)
        #[arg(long = "seed", value_name = "S")]
        seed: Option<u64>,
        /// Measure qubit Q after the circuit; repeatable, applied in order
        #[arg(long = "measure", value_name = "Q")]
        measure: Vec<usize>,
        /// TOML configuration file
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Export a circuit file as OpenQASM 2.0
    Qasm {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write to OUT instead of stdout
        #[arg(short = 'o', long = "out", value_name = "OUT")]
        out: Option<PathBuf>,
    },
    /// Static circuit analysis and validation
    Analyze {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_all_demos(),
        Command::Run { file, seed, measure, config } => {
            cli_run(&file, seed, &measure, config.as_deref())
        }
        Command::Qasm { file, out } => cli_qasm(&file, out.as_deref()),
        Command::Analyze { file } => cli_analyze(&file),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ── CLI ───────────────────────────────────────────────────────────────────

fn load_circuit(path: &Path) -> anyhow::Result<CircuitFile> {
    CircuitFile::load(path).with_context(|| format!("cannot load circuit '{}'", path.display()))
}

fn cli_run(
    path: &Path,
    seed: Option<u64>,
    measure: &[usize],
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(p) => SimConfig::load(p)
            .with_context(|| format!("cannot load config '{}'", p.display()))?,
        None => SimConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let file = load_circuit(path)?;
    info!(qubits = file.num_qubits, operations = file.operations.len(), "circuit loaded");

    println!("━━━ qplay runner ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("File: {}\n", path.display());
    println!("Circuit:");
    for op in &file.operations {
        println!("  {op}");
    }
    println!();

    let mut sim = simulate(&file, &config).context("simulation failed")?;
    println!("Final state:");
    print_significant_states(&sim);
    println!();

    if !measure.is_empty() {
        println!("Measurement results:");
        for &q in measure {
            let m = sim
                .measure(q)
                .with_context(|| format!("cannot measure qubit {q}"))?;
            println!("  q{q}  →  {}   (p = {:.6})", m.result, m.probability);
        }
        println!();
        println!("Post-measurement state:");
        print_significant_states(&sim);
    }
    Ok(())
}

fn cli_qasm(path: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let file = load_circuit(path)?;
    let qasm = file.to_qasm().context("QASM export failed")?;
    match out {
        Some(out) => {
            std::fs::write(out, &qasm)
                .with_context(|| format!("cannot write '{}'", out.display()))?;
            info!(path = %out.display(), "QASM written");
        }
        None => print!("{qasm}"),
    }
    Ok(())
}

fn cli_analyze(path: &Path) -> anyhow::Result<()> {
    let file = load_circuit(path)?;
    println!("━━━ qplay circuit analyzer ━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("File: {}\n", path.display());
    println!("  Qubits         : {}", file.num_qubits);
    print!("{}", file.metrics());

    let validation = file.validate();
    print!("{validation}");
    if !validation.is_valid {
        bail!("circuit has {} error(s)", validation.errors.len());
    }
    Ok(())
}

fn print_significant_states(sim: &Simulator) {
    let state = sim.state();
    for (i, p) in sim.probabilities().into_iter().enumerate() {
        if p > DISPLAY_THRESHOLD {
            println!("  |{}⟩  {p:.6}", state.basis_label(i));
        }
    }
}

// ── Demos ─────────────────────────────────────────────────────────────────

fn run_all_demos() -> anyhow::Result<()> {
    print_banner();
    demo_single_qubit()?;
    demo_bell_state()?;
    demo_ghz_state()?;
    demo_teleportation()?;
    demo_playground()?;
    Ok(())
}

fn print_banner() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║          qplay v{:<29}║", env!("CARGO_PKG_VERSION"));
    println!("║  State-Vector Quantum Circuit Playground     ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();
}

fn demo_single_qubit() -> anyhow::Result<()> {
    println!("━━━ Demo 1: Single Qubit Basics ━━━━━━━━━━━━━━━━━");
    let mut sim = Simulator::new(1)?;
    println!("Initial |0⟩:");
    print_significant_states(&sim);
    sim.apply_gate(Gate::H, 0)?;
    println!("After H (superposition):");
    print_significant_states(&sim);
    sim.apply_gate(Gate::Z, 0)?.apply_gate(Gate::H, 0)?;
    println!("After H·Z·H = X (should be |1⟩):");
    print_significant_states(&sim);
    println!();
    Ok(())
}

fn demo_bell_state() -> anyhow::Result<()> {
    println!("━━━ Demo 2: Bell State |Φ+⟩ ━━━━━━━━━━━━━━━━━━━━━");
    let mut sim = Simulator::new(2)?;
    sim.apply_gate(Gate::H, 0)?.apply_controlled_gate(Gate::X, 0, 1)?;
    print_significant_states(&sim);

    let mut counts = [0u32; 4];
    for _ in 0..1000 {
        let mut s = sim.clone();
        let r = s.measure_all()?;
        counts[usize::from(r[1].result) << 1 | usize::from(r[0].result)] += 1;
    }
    println!("Sampling 1000 shots:  |00⟩={} |11⟩={}", counts[0], counts[3]);
    println!();
    Ok(())
}

fn demo_ghz_state() -> anyhow::Result<()> {
    println!("━━━ Demo 3: GHZ State (3 qubits) ━━━━━━━━━━━━━━━━");
    let mut pg = Playground::new(3, SimConfig::default())?;
    pg.add_gate(Gate::H, 0, None)?;
    pg.add_gate(ControlledGate::Cnot, 1, Some(0))?;
    pg.add_gate(ControlledGate::Cnot, 2, Some(0))?;
    print_significant_states(pg.simulator());
    println!();
    println!("OpenQASM 2.0:");
    print!("{}", pg.export_qasm()?);
    println!();
    println!("Metrics:");
    print!("{}", pg.metrics());
    println!();
    Ok(())
}

fn demo_teleportation() -> anyhow::Result<()> {
    println!("━━━ Demo 4: Quantum Teleportation ━━━━━━━━━━━━━━━");
    println!("Teleporting |+⟩ from q0 to q2.  [msg|alice|bob]");
    let mut sim = Simulator::new(3)?;
    sim.apply_gate(Gate::H, 0)?;
    sim.apply_gate(Gate::H, 1)?.apply_controlled_gate(Gate::X, 1, 2)?;
    sim.apply_controlled_gate(Gate::X, 0, 1)?.apply_gate(Gate::H, 0)?;
    let m0 = sim.measure(0)?;
    let m1 = sim.measure(1)?;
    if m1.result == 1 {
        sim.apply_gate(Gate::X, 2)?;
    }
    if m0.result == 1 {
        sim.apply_gate(Gate::Z, 2)?;
    }
    // Bob's qubit is |+⟩: H maps it back to |0⟩
    sim.apply_gate(Gate::H, 2)?;
    let p1 = sim.qubit_probability_one(2)?;
    println!(
        "Bob P(|1⟩) after H = {p1:.4}  →  {}",
        if p1 < 0.01 { "SUCCESS" } else { "FAILED" }
    );
    println!();
    Ok(())
}

fn demo_playground() -> anyhow::Result<()> {
    println!("━━━ Demo 5: Playground Undo / Redo ━━━━━━━━━━━━━━");
    let mut pg = Playground::new(2, SimConfig::default())?;
    pg.add_gate(Gate::H, 0, None)?;
    pg.add_gate(ControlledGate::Cnot, 1, Some(0))?;
    println!("After H q0, CNOT q0→q1:");
    print_significant_states(pg.simulator());

    pg.undo()?;
    println!("Undo:");
    print_significant_states(pg.simulator());

    pg.redo()?;
    let m = pg.measure(0)?;
    println!("Redo, then measure q0 → {} (p = {:.4}):", m.result, m.probability);
    print_significant_states(pg.simulator());
    println!("Measurements per qubit: {:?}", pg.measurement_counts());
    println!();
    Ok(())
}
