use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for rvic")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test, scenarios)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        #[arg(long)]
        ignored: bool,
        /// Run only interrupt controller tests
        #[arg(long)]
        interrupt: bool,
        /// Run only multiplier tests
        #[arg(long)]
        multiplier: bool,
        /// Run only scenario runner tests
        #[arg(long)]
        scenario: bool,
    },
    /// Run benchmarks
    Bench,
    /// Run the bundled scenario files through the rvic binary
    Scenarios {
        /// Directory holding *.toml scenarios
        #[arg(default_value = "scenarios")]
        dir: PathBuf,
        /// Write a per-edge sample log to this path
        #[arg(long)]
        sample_log: Option<PathBuf>,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
    /// Install git hooks
    InstallHooks,
}

/// Module filters for `cargo x test`
#[derive(Default, Clone, Copy)]
struct TestFilter {
    interrupt: bool,
    multiplier: bool,
    scenario: bool,
}

impl TestFilter {
    fn modules(self) -> Vec<(&'static str, &'static str)> {
        [
            (self.interrupt, "core::interrupt", "Interrupt"),
            (self.multiplier, "core::multiplier", "Multiplier"),
            (self.scenario, "core::scenario", "Scenario"),
        ]
        .into_iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, path, name)| (path, name))
        .collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_pipeline("CI Pipeline", Stage::CI, verbose),
        Commands::Check { verbose } => run_pipeline("Quick Checks", Stage::CHECK, verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test {
            doc,
            ignored,
            interrupt,
            multiplier,
            scenario,
        } => run_test(
            doc,
            ignored,
            TestFilter {
                interrupt,
                multiplier,
                scenario,
            },
        ),
        Commands::Bench => run_cargo(cargo(&["bench"])),
        Commands::Scenarios {
            dir,
            sample_log,
            release,
        } => run_scenarios(&dir, sample_log.as_deref(), release),
        Commands::PreCommit => run_pipeline("Pre-commit Checks", Stage::PRE_COMMIT, false),
        Commands::InstallHooks => install_hooks(),
    }
}

/// One step of a multi-step pipeline
#[derive(Clone, Copy)]
enum Stage {
    FmtCheck,
    Clippy,
    Build,
    Test,
    Scenarios,
}

impl Stage {
    const CI: &'static [Stage] = &[
        Stage::FmtCheck,
        Stage::Clippy,
        Stage::Build,
        Stage::Test,
        Stage::Scenarios,
    ];
    const CHECK: &'static [Stage] = &[Stage::FmtCheck, Stage::Clippy];
    const PRE_COMMIT: &'static [Stage] = &[Stage::FmtCheck, Stage::Clippy, Stage::Test];

    fn label(self) -> &'static str {
        match self {
            Stage::FmtCheck => "Format Check",
            Stage::Clippy => "Clippy",
            Stage::Build => "Build",
            Stage::Test => "Test",
            Stage::Scenarios => "Scenarios",
        }
    }

    fn run(self) -> Result<()> {
        match self {
            Stage::FmtCheck => run_fmt(true),
            Stage::Clippy => run_clippy(false),
            Stage::Build => run_build(false),
            Stage::Test => run_test(false, false, TestFilter::default()),
            Stage::Scenarios => run_scenarios(Path::new("scenarios"), None, false),
        }
    }
}

fn run_pipeline(title: &str, stages: &[Stage], verbose: bool) -> Result<()> {
    println!("{}", format!("=== {} ===", title).bold().blue());

    let start = Instant::now();
    for stage in stages {
        run_task(stage.label(), || stage.run(), verbose)?;
    }

    println!(
        "\n{} {}",
        format!("✓ {} passed in", title).green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

/// `cargo <args>`
fn cargo(args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

fn run_fmt(check: bool) -> Result<()> {
    let args: &[&str] = if check {
        &["fmt", "--all", "--", "--check"]
    } else {
        &["fmt", "--all"]
    };
    run_cargo(cargo(args))
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = cargo(&["clippy", "--all-targets", "--all-features"]);
    if fix {
        cmd.arg("--fix");
    } else {
        cmd.args(["--", "-D", "warnings"]);
    }
    run_cargo(cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = cargo(&["build"]);
    if release {
        cmd.arg("--release");
    }
    run_cargo(cmd)
}

fn cargo_test(ignored: bool, extra: &[&str]) -> Command {
    let mut cmd = cargo(&["test", "--all-features"]);
    cmd.args(extra);
    if ignored {
        cmd.args(["--", "--ignored"]);
    }
    cmd
}

fn run_test(doc: bool, ignored: bool, filter: TestFilter) -> Result<()> {
    if doc {
        return run_cargo(cargo_test(ignored, &["--doc"]));
    }

    let modules = filter.modules();
    if modules.is_empty() {
        return run_cargo(cargo_test(ignored, &[]));
    }

    let mut failed = Vec::new();

    for (module_path, module_name) in &modules {
        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        match run_cargo(cargo_test(ignored, &["--lib", module_path])) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), module_name),
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                if modules.len() == 1 {
                    return Err(e);
                }
                failed.push(*module_name);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Module tests failed: {}", failed.join(", "))
    }
}

fn run_scenarios(dir: &Path, sample_log: Option<&Path>, release: bool) -> Result<()> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();

    if files.is_empty() {
        println!(
            "{} No scenarios found in {}",
            "✗".red().bold(),
            dir.display().to_string().yellow()
        );
        anyhow::bail!("No scenario files");
    }

    println!(
        "{} {} scenario(s) from {}",
        "→".blue(),
        files.len().to_string().bold(),
        dir.display().to_string().cyan()
    );

    let start = Instant::now();

    let mut cmd = cargo(&["run", "--quiet"]);
    if release {
        cmd.arg("--release");
    }
    cmd.args(["--", "run"]).args(&files);
    if let Some(path) = sample_log {
        cmd.arg("--sample-log").arg(path);
    }
    run_cargo(cmd)?;

    println!(
        "{} Scenarios passed in {}",
        "✓".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

const PRE_COMMIT_HOOK: &str = "#!/bin/sh
# Installed by `cargo x install-hooks`
set -e
cargo x pre-commit
";

fn install_hooks() -> Result<()> {
    let hook = Path::new(".git/hooks/pre-commit");
    if !hook.parent().is_some_and(Path::exists) {
        anyhow::bail!("No .git/hooks directory; run from the repository root");
    }

    std::fs::write(hook, PRE_COMMIT_HOOK)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(hook, std::fs::Permissions::from_mode(0o755))?;
    }

    println!("{} pre-commit hook installed (fmt, clippy, test)", "✓".green());
    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();
    let result = task();

    match &result {
        Ok(()) if verbose => println!(
            "{} ({:.2}s)",
            "✓".green().bold(),
            start.elapsed().as_secs_f64()
        ),
        Ok(()) => println!("{}", "✓".green().bold()),
        Err(_) => println!("{}", "✗".red().bold()),
    }
    result
}

fn run_cargo(mut cmd: Command) -> Result<()> {
    let status = cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit()).status()?;
    if !status.success() {
        anyhow::bail!("{:?} failed with exit code: {}", cmd, status);
    }
    Ok(())
}
