use std::io::{self, BufRead, Stdout, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use getset::{CopyGetters, Getters};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::graphics::{self, Viewport};
use crate::input::Prompter;
use crate::scene_file::SceneFile;
use crate::settings::Settings;
use crate::simulation::{BodyId, CelestialBodySpec, SceneOptions, Simulation, bootstrap};
use crate::vector::Vector2;

#[derive(Parser, Debug)]
#[command(name = "orrery", about = "N-body solar system simulator for the terminal")]
pub struct Arguments {
    /// YAML scene file; the built-in solar system is used when absent.
    #[arg(short, long)]
    scene: Option<PathBuf>,
    /// YAML settings file.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Stop after this many frames.
    #[arg(short, long)]
    frames: Option<u64>,
    /// Include moons without asking.
    #[arg(long)]
    moons: bool,
    /// Skip the interactive questions and use the settings as they are.
    #[arg(long)]
    no_prompt: bool,
}

#[derive(derive_new::new, Getters, CopyGetters)]
pub struct OrreryApplication {
    #[getset(get = "pub")]
    simulation: Simulation,
    #[getset(get = "pub")]
    settings: Settings,
    #[getset(get_copy = "pub")]
    focus: BodyId,
    #[new(value = "0")]
    #[getset(get_copy = "pub")]
    frames: u64,
    #[new(value = "false")]
    exit_requested: bool,
}

pub fn execute() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_thread_names(true)
        .with_ansi(true)
        .with_file(true)
        .init();
    info!("Executing orrery simulation application...");

    let arguments = Arguments::parse();
    let mut settings = match &arguments.settings {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };
    if let Some(frames) = arguments.frames {
        settings.set_frame_limit(Some(frames));
    }
    if arguments.moons {
        settings.set_show_moons(true);
    }

    let scene = match &arguments.scene {
        Some(path) => SceneFile::from_path(path)?,
        None => SceneFile::solar_system()?,
    };
    let specs = scene.specs();

    let simulation = if arguments.no_prompt {
        bootstrap(&specs, SceneOptions::with_moons(settings.show_moons()))
            .context("failed to build the scene")?
    } else {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        interactive_setup(&mut prompter, &specs, &mut settings)?
    };
    settings.validate()?;
    graphics::display_scene_bodies(&simulation);

    let focus = resolve_focus(&simulation, settings.focus())?;
    let mut application = OrreryApplication::new(simulation, settings, focus);
    application.run_event_loop()?;

    info!(
        "simulated {:.1} days in {} frames",
        application.simulation().elapsed() / 86_400.0,
        application.frames()
    );
    Ok(())
}

/// Asks the setup questions in order: moons, focus body, then the three
/// scales. Returns the simulation built from the answers.
pub fn interactive_setup<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    specs: &[CelestialBodySpec],
    settings: &mut Settings,
) -> Result<Simulation> {
    prompter.say("Welcome to the solar system simulator.")?;
    prompter.say("Choose the parameters, or press enter to keep the defaults.")?;

    let show_moons = prompter.ask_yes_no("Show moons", settings.show_moons())?;
    settings.set_show_moons(show_moons);

    let simulation = bootstrap(specs, SceneOptions::with_moons(show_moons))
        .context("failed to build the scene")?;

    let focus = prompter.ask_focus(&simulation, settings.focus())?;
    settings.set_focus(focus);

    let distance_scale =
        prompter.ask_positive("Distance scale [m per row]", settings.distance_scale())?;
    settings.set_distance_scale(distance_scale);
    let planet_scale = prompter.ask_positive("Planet scale", settings.planet_scale())?;
    settings.set_planet_scale(planet_scale);
    let timescale = prompter.ask_positive("Timescale [s per s]", settings.timescale())?;
    settings.set_timescale(timescale);

    Ok(simulation)
}

/// Id of the configured focus body, or of the first body when that name is
/// not part of the scene.
pub fn resolve_focus(simulation: &Simulation, name: &str) -> Result<BodyId> {
    simulation.id_of(name).or_else(|err| {
        warn!("{err}; centering on the first body instead");
        simulation
            .iter()
            .next()
            .map(|(id, _)| id)
            .context("scene contains no bodies")
    })
}

/// Puts the terminal into full-screen raw mode and restores it on drop.
struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        enter_screen(&mut out)?;
        Ok(Self { out })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = leave_screen(&mut self.out);
        let _ = terminal::disable_raw_mode();
    }
}

fn enter_screen<W: Write>(out: &mut W) -> Result<()> {
    execute!(out, EnterAlternateScreen, cursor::Hide)?;
    Ok(())
}

fn leave_screen<W: Write>(out: &mut W) -> Result<()> {
    execute!(out, cursor::Show, LeaveAlternateScreen)?;
    Ok(())
}

impl OrreryApplication {
    pub fn run_event_loop(&mut self) -> Result<()> {
        self.settings.validate()?;
        let mut session = TerminalSession::enter()?;
        let frame_time = Duration::from_secs_f64(1.0 / f64::from(self.settings.ticks_per_second()));
        info!(
            "running at {} ticks per second, {} simulated seconds per tick",
            self.settings.ticks_per_second(),
            self.settings.dt()
        );

        while !self.should_exit() {
            let started = Instant::now();
            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    self.on_key_input(key);
                }
            }
            if self.exit_requested {
                break;
            }

            self.tick();
            self.draw(&mut session.out)?;

            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
        Ok(())
    }

    /// Advances the simulation by one frame's worth of simulated time.
    pub fn tick(&mut self) {
        self.simulation.step(self.settings.dt());
        self.frames += 1;

        let per_second = u64::from(self.settings.ticks_per_second());
        if self.frames.checked_rem(per_second) == Some(0) {
            debug!(
                frame = self.frames,
                energy = self.simulation.total_energy(),
                momentum = %self.simulation.total_momentum(),
                "conserved quantities"
            );
        }
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
            || self
                .settings
                .frame_limit()
                .is_some_and(|limit| self.frames >= limit)
    }

    pub fn focus_position(&self) -> Vector2 {
        self.simulation
            .get(self.focus)
            .map(|body| body.position())
            .unwrap_or(Vector2::ZERO)
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        let (columns, rows) = terminal::size()?;
        let viewport = Viewport::new(
            columns,
            rows,
            self.settings.distance_scale(),
            self.settings.planet_scale(),
        );
        let sprites = graphics::compose(&self.simulation, self.focus_position(), &viewport);
        let focus_name = self
            .simulation
            .get(self.focus)
            .map(|body| body.name().as_str())
            .unwrap_or("?");
        let status = graphics::status_line(&self.simulation, focus_name);
        graphics::render(out, &viewport, &sprites, &status)?;
        Ok(())
    }

    pub fn on_key_input(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.exit_requested = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exit_requested = true;
            }
            other => debug!("ignoring key [{}]", format!("{other:?}").yellow()),
        }
    }
}
