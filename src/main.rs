//! Color Hit headless runner
//!
//! Plays the game without a window: an auto-firing player shoots whenever
//! the wedge about to pass under the pin matches its color. Useful for
//! balance checks on a tuning file.
//!
//! Usage: `color-hit [--seed N] [--seconds S] [--tuning PATH] [--memory]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use color_hit::consts::{MAX_SUBSTEPS, SIM_DT};
    use color_hit::persistence::{JsonFileStore, MemoryStore, ScoreStore};
    use color_hit::render::DrawList;
    use color_hit::sim::{GameEvent, TickInput};
    use color_hit::{Screen, Session, Tuning};

    /// Simulated display refresh; each frame runs whole ticks from an accumulator
    const FRAME_DT: f32 = 1.0 / 60.0;

    struct Options {
        seed: u64,
        seconds: f32,
        tuning: Option<PathBuf>,
        memory: bool,
    }

    fn usage() -> String {
        "Usage: color-hit [--seed N] [--seconds S] [--tuning PATH] [--memory]".to_string()
    }

    fn parse_args() -> Result<Options, String> {
        let mut options = Options {
            seed: 0x00C0_FFEE,
            seconds: 60.0,
            tuning: None,
            memory: false,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().ok_or_else(usage)?;
                    options.seed = value
                        .parse()
                        .map_err(|e| format!("Invalid seed '{value}': {e}"))?;
                }
                "--seconds" => {
                    let value = args.next().ok_or_else(usage)?;
                    options.seconds = value
                        .parse()
                        .map_err(|e| format!("Invalid seconds '{value}': {e}"))?;
                }
                "--tuning" => options.tuning = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
                "--memory" => options.memory = true,
                "-h" | "--help" => return Err(usage()),
                other => return Err(format!("Unknown argument '{other}'\n{}", usage())),
            }
        }
        Ok(options)
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning, String> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read tuning '{}': {e}", path.display()))?;
        let tuning = Tuning::from_json(&json).map_err(|e| e.to_string())?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Frame loop with fixed-step ticks
    struct Runner<S: ScoreStore> {
        session: Session<S>,
        accumulator: f32,
        input: TickInput,
        stuck: u32,
        missed: u32,
        bonuses: u32,
    }

    impl<S: ScoreStore> Runner<S> {
        fn frame(&mut self, dt: f32) -> Result<(), String> {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let events = self
                    .session
                    .update(SIM_DT, &self.input)
                    .map_err(|e| e.to_string())?;
                self.accumulator -= SIM_DT;
                substeps += 1;
                for event in events {
                    self.record(event);
                }
                if matches!(self.session.screen, Screen::GameOver { .. }) {
                    // Headless player always retries
                    self.session.resolve_game_over(true).map_err(|e| e.to_string())?;
                }
            }
            Ok(())
        }

        fn record(&mut self, event: GameEvent) {
            match event {
                GameEvent::PinStuck { .. } => self.stuck += 1,
                GameEvent::PinMissed { .. } => self.missed += 1,
                GameEvent::BonusCollected { .. } => self.bonuses += 1,
                GameEvent::LevelStarted { level, pins } => {
                    log::info!("Level {level}: {pins} pins");
                }
                GameEvent::GameOver { score, new_best } => {
                    log::info!("Game over, score {score}{}", if new_best { " (new best)" } else { "" });
                }
                GameEvent::PinFired { .. } => {}
            }
        }
    }

    fn play<S: ScoreStore>(store: S, options: &Options, tuning: Tuning) -> Result<(), String> {
        let mut session = Session::new(tuning, store, options.seed).map_err(|e| e.to_string())?;
        session.start().map_err(|e| e.to_string())?;

        let mut runner = Runner {
            session,
            accumulator: 0.0,
            input: TickInput {
                autoplay: true,
                ..Default::default()
            },
            stuck: 0,
            missed: 0,
            bonuses: 0,
        };

        let frames = (options.seconds / FRAME_DT).ceil() as u64;
        for _ in 0..frames {
            runner.frame(FRAME_DT)?;
        }

        let mut surface = DrawList::new();
        runner.session.draw(&mut surface);
        log::debug!("Final frame: {} draw commands", surface.commands.len());

        let (level, score) = runner
            .session
            .game()
            .map(|g| (g.level, g.score))
            .unwrap_or_default();
        runner.session.quit();

        println!(
            "level {level}, score {score}, best {}, stuck {}, missed {}, bonuses {}",
            runner.session.best_score(),
            runner.stuck,
            runner.missed,
            runner.bonuses
        );
        Ok(())
    }

    pub fn run() -> Result<(), String> {
        env_logger::init();
        let options = parse_args()?;
        let tuning = load_tuning(options.tuning.as_ref())?;
        log::info!(
            "Color Hit (headless) seed {} for {}s",
            options.seed,
            options.seconds
        );

        if options.memory {
            play(MemoryStore::default(), &options, tuning)
        } else {
            let store = JsonFileStore::in_data_dir().map_err(|e| e.to_string())?;
            log::info!("Best score file: {}", store.path().display());
            play(store, &options, tuning)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = headless::run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build is driven by the host page through the library
}
