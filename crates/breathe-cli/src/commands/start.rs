use clap::Args;

use breathe_core::{
    run_to_completion, AudioSink, Catalog, Config, CoreError, Event, NoKeepAwake, NullAudio,
    RenderDispatch, RunReport, Sequencer, Technique,
};

use crate::audio::BellAudio;
use crate::i18n::{self, Locale};

#[derive(Args)]
pub struct StartArgs {
    /// Technique ID (see `breathe technique list`)
    pub id: String,
    /// Number of cycles, defaulting to the technique's usual count
    #[arg(long, short = 'c')]
    pub cycles: Option<u32>,
    /// Line-by-line text output instead of the full-screen view
    #[arg(long)]
    pub text: bool,
    /// One JSON event per line, for scripting
    #[arg(long)]
    pub json: bool,
    /// Silence sound cues for this run
    #[arg(long)]
    pub no_sound: bool,
}

pub fn run(args: StartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let technique = Catalog::get(&args.id)?;
    let cycles = args.cycles.unwrap_or(technique.default_cycles);
    technique.validate_cycles(cycles)?;

    let mut config = Config::load_or_default();
    if args.no_sound {
        config.sound.enabled = false;
    }

    tracing::debug!(technique = %technique.id, cycles, fps = config.fps(), "starting exercise");

    let runtime = tokio::runtime::Runtime::new()?;

    #[cfg(feature = "tui")]
    if !(args.text || args.json) {
        runtime.block_on(crate::tui::run(&technique, cycles, &config))?;
        return Ok(());
    }

    runtime.block_on(run_lines(&technique, cycles, &config, args.json))?;
    Ok(())
}

/// Stream the run as lines on stdout, one per discrete event.
async fn run_lines(
    technique: &Technique,
    cycles: u32,
    config: &Config,
    json: bool,
) -> Result<(), CoreError> {
    let audio: Box<dyn AudioSink> = if json {
        Box::new(NullAudio)
    } else {
        Box::new(BellAudio::new(config.sound.clone()))
    };
    let mut sequencer = Sequencer::new(RenderDispatch::new(), audio, Box::new(NoKeepAwake));
    let loc = i18n::locale(&config.language);

    // The sender stays bound for the whole run; line mode takes no input,
    // and a dropped sender would read as a stop command.
    let (_tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let report = run_to_completion(
        &mut sequencer,
        technique,
        cycles,
        config.fps(),
        &mut rx,
        |_, events| {
            for event in events {
                print_event(event, technique, cycles, loc, json);
            }
        },
    )
    .await?;

    if !json {
        if let Some(report) = report {
            print_summary(&report, technique, loc);
        }
    }
    Ok(())
}

fn format_secs(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{secs:.0}")
    } else {
        format!("{secs}")
    }
}

fn print_event(event: &Event, technique: &Technique, total_cycles: u32, loc: &Locale, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
        return;
    }

    match event {
        Event::ExerciseStarted { .. } => {
            println!("{} {} ({}x)", technique.icon, technique.name, total_cycles);
            println!("{}", loc.get_ready);
        }
        Event::CountdownTick { remaining, .. } => println!("{remaining}..."),
        Event::PhaseStarted {
            cycle,
            phase_type,
            duration_secs,
            ..
        } => {
            println!(
                "[{} {cycle}/{total_cycles}] {} ({}s)",
                loc.cycle,
                loc.phase_label(*phase_type),
                format_secs(*duration_secs),
            );
        }
        Event::CycleCompleted { cycle, .. } => {
            println!("{} {cycle} {} {total_cycles} ✓", loc.cycle, loc.of);
        }
        Event::ExercisePaused { .. } => println!("{}", loc.paused),
        Event::ExerciseResumed { .. } => println!("{}", loc.resumed),
        Event::ExerciseStopped { .. } => println!("{}", loc.stopped),
        // Per-second ticks stay off the line stream; the summary covers
        // completion.
        Event::TimerTick { .. } | Event::PhaseCompleted { .. } | Event::ExerciseCompleted { .. } => {}
    }
}

fn print_summary(report: &RunReport, technique: &Technique, loc: &Locale) {
    let (minutes, seconds) = report.minutes_seconds();
    println!();
    println!("{}", loc.well_done);
    println!("{}", loc.completed_message);
    println!("{}: {}", loc.technique, technique.name);
    println!("{}: {}", loc.cycles_completed, report.cycles_completed);
    println!("{}: {minutes}:{seconds:02}", loc.total_time);
}
