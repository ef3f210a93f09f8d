//! Render targets and frame drawing.
//!
//! Each animation is a [`RenderTarget`] that folds engine progress into a
//! [`ViewState`] snapshot behind a mutex; the draw pass reads the snapshot
//! and paints it onto a braille canvas. Targets never touch the terminal,
//! so the same wiring drives tests without one.

use std::sync::{Arc, Mutex};

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use breathe_core::engine::motion;
use breathe_core::{AnimationKind, Event, PhaseType, RenderDispatch, RenderTarget, Technique};

use crate::i18n::Locale;

pub type SharedView = Arc<Mutex<ViewState>>;

/// Everything the draw pass needs, written by the render targets.
pub struct ViewState {
    pub active: Option<AnimationKind>,
    pub timer: u32,
    /// Box trace: per-side fill, bottom-left corner first, clockwise.
    pub box_sides: [f64; 4],
    /// Ring segments: fraction of the circle per phase, and per-phase fill.
    pub arc_spans: Vec<f64>,
    pub arc_fill: Vec<f64>,
    pub belly_scale: f64,
    pub wave_height: f64,
    pub power_level: f64,
    pub power_energy: f64,
    pub power_breath: Option<u32>,
    pub gauge_fill: f64,
    pub gauge_scale: f64,
    pub gauge_fade: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active: None,
            timer: 0,
            box_sides: [0.0; 4],
            arc_spans: Vec::new(),
            arc_fill: Vec::new(),
            belly_scale: 0.5,
            wave_height: 0.0,
            power_level: 0.0,
            power_energy: 0.0,
            power_breath: None,
            gauge_fill: 0.0,
            gauge_scale: 1.0,
            gauge_fade: 0.0,
        }
    }
}

fn with_view(view: &SharedView, f: impl FnOnce(&mut ViewState)) {
    if let Ok(mut state) = view.lock() {
        f(&mut state);
    }
}

/// Wire one target per animation kind onto a shared view.
pub fn build_dispatch(view: &SharedView) -> RenderDispatch {
    let mut dispatch = RenderDispatch::new();
    dispatch.register(AnimationKind::Box, Box::new(BoxView { view: view.clone() }));
    dispatch.register(AnimationKind::Arc, Box::new(ArcView { view: view.clone() }));
    dispatch.register(
        AnimationKind::Belly,
        Box::new(BellyView { view: view.clone() }),
    );
    dispatch.register(
        AnimationKind::Wave,
        Box::new(WaveView { view: view.clone() }),
    );
    dispatch.register(
        AnimationKind::Power,
        Box::new(PowerView { view: view.clone() }),
    );
    dispatch.register(
        AnimationKind::Gauge,
        Box::new(GaugeView { view: view.clone() }),
    );
    dispatch
}

// ── Render targets ───────────────────────────────────────────────────

struct BoxView {
    view: SharedView,
}

impl RenderTarget for BoxView {
    fn show(&mut self) {
        with_view(&self.view, |s| s.active = Some(AnimationKind::Box));
    }
    fn hide(&mut self) {
        with_view(&self.view, |s| {
            if s.active == Some(AnimationKind::Box) {
                s.active = None;
            }
        });
    }
    fn reset(&mut self) {
        with_view(&self.view, |s| s.box_sides = [0.0; 4]);
    }
    fn update(&mut self, phase_index: usize, progress: f64, _technique: &Technique) {
        with_view(&self.view, |s| {
            if let Some(side) = s.box_sides.get_mut(phase_index) {
                *side = progress;
            }
        });
    }
    fn update_timer(&mut self, seconds: u32) {
        with_view(&self.view, |s| s.timer = seconds);
    }
}

struct ArcView {
    view: SharedView,
}

impl RenderTarget for ArcView {
    fn show(&mut self) {
        with_view(&self.view, |s| s.active = Some(AnimationKind::Arc));
    }
    fn hide(&mut self) {
        with_view(&self.view, |s| {
            if s.active == Some(AnimationKind::Arc) {
                s.active = None;
            }
        });
    }
    fn reset(&mut self) {
        with_view(&self.view, |s| {
            for fill in &mut s.arc_fill {
                *fill = 0.0;
            }
        });
    }
    fn update(&mut self, phase_index: usize, progress: f64, technique: &Technique) {
        let total = technique.cycle_secs();
        with_view(&self.view, |s| {
            if s.arc_spans.len() != technique.phases.len() && total > 0.0 {
                s.arc_spans = technique
                    .phases
                    .iter()
                    .map(|p| p.duration_secs / total)
                    .collect();
                s.arc_fill = vec![0.0; technique.phases.len()];
            }
            if let Some(fill) = s.arc_fill.get_mut(phase_index) {
                *fill = progress;
            }
        });
    }
    fn update_timer(&mut self, seconds: u32) {
        with_view(&self.view, |s| s.timer = seconds);
    }
}

struct BellyView {
    view: SharedView,
}

impl RenderTarget for BellyView {
    fn show(&mut self) {
        with_view(&self.view, |s| s.active = Some(AnimationKind::Belly));
    }
    fn hide(&mut self) {
        with_view(&self.view, |s| {
            if s.active == Some(AnimationKind::Belly) {
                s.active = None;
            }
        });
    }
    fn reset(&mut self) {
        with_view(&self.view, |s| s.belly_scale = 0.5);
    }
    fn update(&mut self, phase_index: usize, progress: f64, technique: &Technique) {
        let Some(phase) = technique.phases.get(phase_index) else {
            return;
        };
        let eased = motion::ease_in_out_sine(progress);
        let scale = match phase.phase_type {
            PhaseType::Inhale => 0.5 + 0.5 * eased,
            _ => 1.0 - 0.5 * eased,
        };
        with_view(&self.view, |s| s.belly_scale = scale);
    }
    fn update_timer(&mut self, seconds: u32) {
        with_view(&self.view, |s| s.timer = seconds);
    }
}

struct WaveView {
    view: SharedView,
}

impl RenderTarget for WaveView {
    fn show(&mut self) {
        with_view(&self.view, |s| s.active = Some(AnimationKind::Wave));
    }
    fn hide(&mut self) {
        with_view(&self.view, |s| {
            if s.active == Some(AnimationKind::Wave) {
                s.active = None;
            }
        });
    }
    fn reset(&mut self) {
        with_view(&self.view, |s| s.wave_height = 0.0);
    }
    fn update(&mut self, phase_index: usize, progress: f64, technique: &Technique) {
        let Some(phase) = technique.phases.get(phase_index) else {
            return;
        };
        let eased = motion::ease_in_out_sine(progress);
        let height = match phase.phase_type {
            PhaseType::Inhale => eased,
            _ => 1.0 - eased,
        };
        with_view(&self.view, |s| s.wave_height = height);
    }
    fn update_timer(&mut self, seconds: u32) {
        with_view(&self.view, |s| s.timer = seconds);
    }
}

struct PowerView {
    view: SharedView,
}

impl RenderTarget for PowerView {
    fn show(&mut self) {
        with_view(&self.view, |s| s.active = Some(AnimationKind::Power));
    }
    fn hide(&mut self) {
        with_view(&self.view, |s| {
            if s.active == Some(AnimationKind::Power) {
                s.active = None;
            }
        });
    }
    fn reset(&mut self) {
        with_view(&self.view, |s| {
            s.power_level = 0.0;
            s.power_energy = 0.0;
            s.power_breath = None;
        });
    }
    fn update(&mut self, phase_index: usize, progress: f64, technique: &Technique) {
        let Some(phase) = technique.phases.get(phase_index) else {
            return;
        };
        let (level, breath, energy) = match phase.phase_type {
            PhaseType::Power => (
                motion::power_pulse(progress, phase.sub_breath_count()),
                Some(motion::breath_number(progress, phase.sub_breath_count())),
                progress,
            ),
            // Slow swell while the breath is held out.
            PhaseType::Retention => (
                ((progress * std::f64::consts::PI * 4.0).sin() * 0.5 + 0.5) * 0.4,
                None,
                1.0,
            ),
            _ => ((progress * 5.0).min(1.0), None, 1.0),
        };
        with_view(&self.view, |s| {
            s.power_level = level;
            s.power_breath = breath;
            s.power_energy = energy;
        });
    }
    fn update_timer(&mut self, seconds: u32) {
        with_view(&self.view, |s| s.timer = seconds);
    }
}

struct GaugeView {
    view: SharedView,
}

impl RenderTarget for GaugeView {
    fn show(&mut self) {
        with_view(&self.view, |s| s.active = Some(AnimationKind::Gauge));
    }
    fn hide(&mut self) {
        with_view(&self.view, |s| {
            if s.active == Some(AnimationKind::Gauge) {
                s.active = None;
            }
        });
    }
    fn reset(&mut self) {
        with_view(&self.view, |s| {
            s.gauge_fill = 0.0;
            s.gauge_scale = 1.0;
            s.gauge_fade = 0.0;
        });
    }
    fn update(&mut self, phase_index: usize, progress: f64, technique: &Technique) {
        let Some(phase) = technique.phases.get(phase_index) else {
            return;
        };
        let (fill, scale, fade) = match phase.phase_type {
            PhaseType::Inhale => (0.0, 0.9 + 0.15 * motion::ease_out_cubic(progress), 0.0),
            PhaseType::Exhale => (0.0, 1.05 - 0.15 * motion::ease_in_out_sine(progress), 0.0),
            // Control pause: the ring tracks the hold.
            PhaseType::Hold => (progress, 1.0, 0.0),
            _ => (0.0, 0.92 + 0.08 * motion::shallow_flutter(progress), progress),
        };
        with_view(&self.view, |s| {
            s.gauge_fill = fill;
            s.gauge_scale = scale;
            s.gauge_fade = fade;
        });
    }
    fn update_timer(&mut self, seconds: u32) {
        with_view(&self.view, |s| s.timer = seconds);
    }
}

// ── Header ───────────────────────────────────────────────────────────

/// Everything above the canvas, updated from the event stream.
pub struct Header {
    pub technique_name: String,
    pub icon: String,
    pub color: Color,
    pub total_cycles: u32,
    pub cycle: u32,
    pub phase: &'static str,
    pub counting_down: bool,
    pub paused: bool,
    loc: &'static Locale,
}

impl Header {
    pub fn new(technique: &Technique, cycles: u32, loc: &'static Locale) -> Self {
        Self {
            technique_name: technique.name.clone(),
            icon: technique.icon.clone(),
            color: color_from_hex(&technique.color),
            total_cycles: cycles,
            cycle: 1,
            phase: loc.get_ready,
            counting_down: true,
            paused: false,
            loc,
        }
    }

    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ExerciseStarted { .. } => {
                    self.counting_down = true;
                    self.phase = self.loc.get_ready;
                }
                Event::PhaseStarted {
                    cycle, phase_type, ..
                } => {
                    self.counting_down = false;
                    self.cycle = *cycle;
                    self.phase = self.loc.phase_label(*phase_type);
                }
                _ => {}
            }
        }
    }
}

// ── Drawing ──────────────────────────────────────────────────────────

pub fn draw(frame: &mut Frame, header: &Header, view: &ViewState, show_timer: bool) {
    let [top, middle, bottom] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_header(frame, top, header, view, show_timer);
    draw_animation(frame, middle, header, view);
    draw_footer(frame, bottom, header);
}

fn draw_header(frame: &mut Frame, area: Rect, header: &Header, view: &ViewState, show_timer: bool) {
    let title = format!(
        "{} {}  {} {} {} {}",
        header.icon,
        header.technique_name,
        header.loc.cycle,
        header.cycle,
        header.loc.of,
        header.total_cycles,
    );
    let mut status = header.phase.to_string();
    if show_timer && view.timer > 0 {
        status = format!("{status}  {}", view.timer);
    }
    let text = vec![
        Line::styled(
            title,
            Style::default()
                .fg(header.color)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(status),
    ];
    frame.render_widget(Paragraph::new(text).centered(), area);
}

fn draw_animation(frame: &mut Frame, area: Rect, header: &Header, view: &ViewState) {
    let color = header.color;
    let canvas = Canvas::default()
        .x_bounds([-1.5, 1.5])
        .y_bounds([-1.5, 1.5])
        .paint(|ctx| match view.active {
            Some(AnimationKind::Box) => paint_box(ctx, view, color),
            Some(AnimationKind::Arc) => paint_arc(ctx, view, color),
            Some(AnimationKind::Belly) => paint_belly(ctx, view, color),
            Some(AnimationKind::Wave) => paint_wave(ctx, view, color),
            Some(AnimationKind::Power) => paint_power(ctx, view, color),
            Some(AnimationKind::Gauge) => paint_gauge(ctx, view, color),
            None => {}
        });
    frame.render_widget(canvas, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, header: &Header) {
    let hints = format!(
        "Space/p {}   q {}",
        if header.paused {
            header.loc.resume
        } else {
            header.loc.pause
        },
        header.loc.stop,
    );
    let mut text = Vec::new();
    if header.paused {
        text.push(Line::styled(
            header.loc.paused.to_uppercase(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    text.push(Line::raw(hints));
    frame.render_widget(Paragraph::new(text).centered(), area);
}

/// Points along a ring, clockwise from the top. Turns are fractions of a
/// full revolution.
fn ring_points(radius: f64, from_turn: f64, span_turns: f64) -> Vec<(f64, f64)> {
    let steps = ((span_turns * 240.0) as usize).max(2);
    (0..=steps)
        .map(|i| {
            let t = from_turn + span_turns * (i as f64 / steps as f64);
            let theta = std::f64::consts::FRAC_PI_2 - t * std::f64::consts::TAU;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

fn paint_box(ctx: &mut Context, view: &ViewState, color: Color) {
    const CORNERS: [(f64, f64); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)];
    for (i, fill) in view.box_sides.iter().enumerate() {
        if *fill <= 0.0 {
            continue;
        }
        let (x1, y1) = CORNERS[i];
        let (x2, y2) = CORNERS[(i + 1) % 4];
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2: x1 + (x2 - x1) * fill,
            y2: y1 + (y2 - y1) * fill,
            color,
        });
    }
}

fn paint_arc(ctx: &mut Context, view: &ViewState, color: Color) {
    let track = ring_points(1.0, 0.0, 1.0);
    ctx.draw(&Points {
        coords: &track,
        color: Color::DarkGray,
    });

    let mut start = 0.0;
    for (span, fill) in view.arc_spans.iter().zip(&view.arc_fill) {
        if *fill > 0.0 {
            let coords = ring_points(1.0, start, span * fill);
            ctx.draw(&Points {
                coords: &coords,
                color,
            });
        }
        start += span;
    }
}

fn paint_belly(ctx: &mut Context, view: &ViewState, color: Color) {
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: view.belly_scale,
        color,
    });
}

fn paint_wave(ctx: &mut Context, view: &ViewState, color: Color) {
    let level = -0.8 + 1.6 * view.wave_height;
    let coords: Vec<(f64, f64)> = (0..=140)
        .map(|i| {
            let x = -1.4 + 2.8 * f64::from(i) / 140.0;
            let y = level + 0.06 * (x * 4.0 * std::f64::consts::PI).sin();
            (x, y)
        })
        .collect();
    ctx.draw(&Points {
        coords: &coords,
        color,
    });
    ctx.draw(&Circle {
        x: 0.0,
        y: level + 0.12,
        radius: 0.08,
        color,
    });
}

fn paint_power(ctx: &mut Context, view: &ViewState, color: Color) {
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: 0.3 + 0.5 * view.power_level,
        color,
    });
    if view.power_energy > 0.0 {
        let coords = ring_points(1.15, 0.0, view.power_energy);
        ctx.draw(&Points {
            coords: &coords,
            color: Color::Yellow,
        });
    }
    if let Some(breath) = view.power_breath {
        ctx.print(
            0.0,
            -1.35,
            Line::styled(format!("{breath}"), Style::default().fg(color)),
        );
    }
}

fn paint_gauge(ctx: &mut Context, view: &ViewState, color: Color) {
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: 0.6 * view.gauge_scale,
        color,
    });
    let ring = view.gauge_fill.max(view.gauge_fade);
    if ring > 0.0 {
        let coords = ring_points(1.1, 0.0, ring);
        ctx.draw(&Points {
            coords: &coords,
            color,
        });
    }
}

fn color_from_hex(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let parse = |s: &str| u8::from_str_radix(s, 16);
        if let (Ok(r), Ok(g), Ok(b)) = (parse(&hex[0..2]), parse(&hex[2..4]), parse(&hex[4..6])) {
            return Color::Rgb(r, g, b);
        }
    }
    Color::Cyan
}
