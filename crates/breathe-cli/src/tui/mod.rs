//! Full-screen terminal frontend.
//!
//! Raw mode plus an alternate screen for the duration of the run; a
//! dedicated thread polls for keys and forwards runner commands over a
//! channel. The terminal is restored before the run result is inspected.

mod view;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedSender};

use breathe_core::{
    run_to_completion, Config, CoreError, EngineState, NoKeepAwake, RunnerCommand, Sequencer,
    Technique,
};

use crate::audio::BellAudio;
use crate::i18n;
use view::{build_dispatch, Header, SharedView};

pub async fn run(technique: &Technique, cycles: u32, config: &Config) -> Result<(), CoreError> {
    let loc = i18n::locale(&config.language);

    let view = SharedView::default();
    let dispatch = build_dispatch(&view);
    let mut sequencer = Sequencer::new(
        dispatch,
        Box::new(BellAudio::new(config.sound.clone())),
        Box::new(NoKeepAwake),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let input = std::thread::spawn(move || read_keys(tx));

    let mut terminal = setup_terminal()?;
    let mut header = Header::new(technique, cycles, loc);
    let show_timer = config.display.timer;

    let result = run_to_completion(
        &mut sequencer,
        technique,
        cycles,
        config.fps(),
        &mut rx,
        |seq, events| {
            header.observe(events);
            header.paused = seq.state() == EngineState::Paused;
            if let Ok(state) = view.lock() {
                terminal
                    .draw(|frame| view::draw(frame, &header, &state, show_timer))
                    .ok();
            }
        },
    )
    .await;

    restore_terminal(&mut terminal);
    drop(rx);
    let _ = input.join();

    let report = result?;
    match report {
        Some(report) => {
            let (minutes, seconds) = report.minutes_seconds();
            println!("{}", loc.well_done);
            println!("{}: {}", loc.technique, technique.name);
            println!("{}: {}", loc.cycles_completed, report.cycles_completed);
            println!("{}: {minutes}:{seconds:02}", loc.total_time);
        }
        None => println!("{}", loc.stopped),
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, CoreError> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

fn read_keys(tx: UnboundedSender<RunnerCommand>) {
    loop {
        if tx.is_closed() {
            break;
        }
        if !event::poll(Duration::from_millis(100)).unwrap_or(false) {
            continue;
        }
        let Ok(TermEvent::Key(key)) = event::read() else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let command = match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => RunnerCommand::Stop,
            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => RunnerCommand::Stop,
            (_, KeyCode::Char(' ')) | (_, KeyCode::Char('p')) => RunnerCommand::Toggle,
            _ => continue,
        };
        if tx.send(command).is_err() {
            break;
        }
    }
}
