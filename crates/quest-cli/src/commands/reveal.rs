use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;

use quest_core::motion::{RevealAnimator, StyleValues, TriggerMode, Variant};
use quest_core::{AppConfig, Presets};

/// Upper bound on printed samples
const MAX_FRAMES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetName {
    FadeInUp,
    ScaleIn,
    Showcase,
}

impl PresetName {
    fn variant(&self, presets: &Presets) -> Variant {
        match self {
            PresetName::FadeInUp => presets.fade_in_up(),
            PresetName::ScaleIn => presets.scale_in(),
            PresetName::Showcase => presets.showcase(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Timeline {
    preset: PresetName,
    /// Start delay per child, seconds after the trigger
    delays: Vec<f64>,
    settle_time: f64,
    frames: Vec<Frame>,
}

#[derive(Debug, Serialize)]
struct Frame {
    time: f64,
    /// Container first, then each child
    values: Vec<StyleValues>,
}

pub fn run(config: &AppConfig, preset: PresetName, children: usize, step: f64, json: bool) -> Result<()> {
    let presets = Presets::from_config(&config.motion)?;
    let timeline = build(&presets, preset, children, step)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    println!(
        "{:?} x {} (settles after {:.2}s)\n",
        timeline.preset, children, timeline.settle_time
    );
    for (i, delay) in timeline.delays.iter().enumerate() {
        println!("  child {}: starts at {:.2}s", i, delay);
    }
    println!();

    print!("{:>6}", "t");
    for i in 0..children {
        print!("  {:>20}", format!("child {}", i));
    }
    println!();
    for frame in &timeline.frames {
        print!("{:>6.2}", frame.time);
        for value in frame.values.iter().skip(1) {
            print!(
                "  {:>20}",
                format!("{:.2}/{:+.1}/{:.2}", value.opacity, value.translate_y, value.scale)
            );
        }
        println!();
    }
    println!("\ncolumns: opacity/translate_y/scale");
    Ok(())
}

fn build(presets: &Presets, preset: PresetName, children: usize, step: f64) -> Result<Timeline> {
    if !step.is_finite() || step <= 0.0 {
        bail!("--step must be a positive number of seconds, got {}", step);
    }

    let variant = preset.variant(presets);
    let group = presets
        .stagger_container()
        .children_from((0..children).map(|_| variant));
    let mut animator = RevealAnimator::new(group, TriggerMode::OnMount);
    let start = Instant::now();
    animator.mount(start);

    let node = animator.node();
    let delays = node.delays().into_iter().skip(1).collect();
    let settle_time = node.settle_time();

    let count = frame_count(settle_time, step);
    let frames = (0..count)
        .map(|i| {
            let time = (i as f64 * step).min(settle_time);
            Frame {
                time,
                values: animator.composed_values_at(start + Duration::from_secs_f64(time)),
            }
        })
        .collect();

    Ok(Timeline {
        preset,
        delays,
        settle_time,
        frames,
    })
}

/// Samples needed to cover `settle_time` at `step`, capped at `MAX_FRAMES`
fn frame_count(settle_time: f64, step: f64) -> usize {
    let steps = (settle_time / step).ceil().min(MAX_FRAMES as f64);
    (steps as usize).saturating_add(1).min(MAX_FRAMES)
}
