use clap::{Parser, Subcommand};
use std::io::{self, BufWriter};

use donut_tty::error::{AppResult, ConfigError};
use donut_tty::render::frame::run_app_loop;
use donut_tty::render::plain::run_plain;
use donut_tty::render::{AppState, Scene};
use donut_tty::terminal_setup::{cleanup_terminal, install_panic_hook, setup_terminal};
use donut_tty::ticker::Ticker;
use donut_tty::torus::params::{TorusParams, TICK_PERIOD};
use donut_tty::torus::Rasterizer;
use donut_tty::{input, pong};

#[derive(Debug, Parser)]
#[command(
    name = "donut-tty",
    version,
    about = "Rotating ASCII donut and a tiny Pong, in your terminal"
)]
struct Cli {
    #[command(subcommand)]
    demo: Option<Demo>,
    #[arg(long, value_name = "N", global = true, help = "Stop after N frames")]
    frames: Option<u64>,
    #[arg(
        long,
        global = true,
        help = "Print donut frames to stdout without terminal control"
    )]
    plain: bool,
    #[arg(long, global = true, help = "Hide the status line")]
    no_hud: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Demo {
    /// Rotating shaded torus (default)
    Donut,
    /// Pong against a tracking AI: Up/Down to move, Space to restart
    Pong,
}

fn detect_truecolor() -> bool {
    match std::env::var("COLORTERM") {
        Ok(val) => val == "truecolor" || val == "24bit",
        Err(_) => match std::env::var("TERM_PROGRAM") {
            Ok(prog) => prog != "Apple_Terminal",
            Err(_) => match std::env::var("TERM") {
                Ok(term) => {
                    term.contains("ghostty") || term.contains("kitty") || term.contains("wezterm")
                }
                Err(_) => false,
            },
        },
    }
}

fn run_plain_mode(cli: &Cli, demo: Demo) -> AppResult<()> {
    if demo != Demo::Donut {
        return Err(ConfigError::Usage("--plain only supports the donut demo".into()).into());
    }
    let mut rasterizer = Rasterizer::new(TorusParams::default())?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match run_plain(&mut rasterizer, cli.frames, Some(Ticker::new(TICK_PERIOD)), &mut out) {
        Ok(frames) => {
            log::info!("wrote {frames} frames");
            Ok(())
        }
        // Downstream closed the pipe (e.g. `| head`); nothing left to do.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn main() -> AppResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();
    let demo = cli.demo.unwrap_or(Demo::Donut);

    if cli.plain {
        return run_plain_mode(&cli, demo);
    }

    // Validate constants before touching the terminal.
    let (scene, ticker) = match demo {
        Demo::Donut => {
            let rasterizer = Rasterizer::new(TorusParams::default())?;
            log::debug!("torus params: {:?}", rasterizer.params());
            (Scene::donut(rasterizer), Ticker::new(TICK_PERIOD))
        }
        Demo::Pong => (Scene::pong(), Ticker::new(pong::TICK_PERIOD)),
    };

    let mut app_state = AppState::new(scene, ticker);
    app_state.show_hud = !cli.no_hud;
    app_state.frame_limit = cli.frames;
    app_state.use_truecolor = detect_truecolor();
    log::info!(
        "starting {} at {}ms per tick",
        app_state.scene.name(),
        app_state.ticker.period().as_millis()
    );

    install_panic_hook();
    let mut stdout = BufWriter::with_capacity(256 * 1024, io::stdout());
    if let Err(err) = setup_terminal(&mut stdout) {
        let _ = cleanup_terminal(&mut stdout);
        return Err(err);
    }
    // Queries the terminal, so it has to run before the input thread owns stdin.
    app_state.input_state.release_events =
        crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    let input_rx = input::thread::spawn_input_thread();

    let run_result = run_app_loop(&mut app_state, &input_rx, &mut stdout);
    let cleanup_result = cleanup_terminal(&mut stdout);
    log::info!("stopped after {} frames", app_state.frame_count);

    run_result?;
    cleanup_result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donut_is_the_default_demo() {
        let cli = Cli::try_parse_from(["donut-tty"]).expect("parse");
        assert_eq!(cli.demo, None);
        assert!(!cli.plain);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["donut-tty", "pong", "--frames", "5", "--no-hud"])
            .expect("parse");
        assert_eq!(cli.demo, Some(Demo::Pong));
        assert_eq!(cli.frames, Some(5));
        assert!(cli.no_hud);
    }

    #[test]
    fn plain_pong_is_a_usage_error() {
        let cli = Cli::try_parse_from(["donut-tty", "pong", "--plain"]).expect("parse");
        let err = run_plain_mode(&cli, Demo::Pong).expect_err("should reject");
        assert!(err.to_string().contains("--plain"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
