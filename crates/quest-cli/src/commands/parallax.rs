use anyhow::{Context, Result};
use serde::Serialize;

use quest_core::motion::{Channel, ElementBounds, InterpolationMap, ScrollParallax, ScrollRange};

#[derive(Debug, Serialize)]
struct Report {
    scroll: f64,
    start: f64,
    end: f64,
    channel: Channel,
    progress: f64,
    value: f64,
}

pub fn run(scroll: f64, start: f64, end: f64, map: &str, channel: &str, json: bool) -> Result<()> {
    let report = evaluate(scroll, start, end, map, channel)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Scroll:   {} px (range {} to {})", report.scroll, report.start, report.end);
    println!("Progress: {:.4}", report.progress);
    println!("{:?}: {}", report.channel, report.value);
    Ok(())
}

fn evaluate(scroll: f64, start: f64, end: f64, map: &str, channel: &str) -> Result<Report> {
    let channel: Channel = channel.parse()?;
    let map: InterpolationMap = map
        .parse()
        .with_context(|| format!("invalid map '{}'", map))?;
    let range = ScrollRange::new(start, end)?;

    let parallax = ScrollParallax::fixed(range).channel(channel, map);
    // a fixed range ignores element geometry
    let sample = parallax.sample(scroll, &ElementBounds::default(), 0.0);

    Ok(Report {
        scroll,
        start,
        end,
        channel,
        progress: sample.progress,
        value: sample.values.first().copied().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_and_clamp() {
        let report = evaluate(500.0, 0.0, 1000.0, "0:0,1:100", "y").unwrap();
        assert_eq!(report.progress, 0.5);
        assert_eq!(report.value, 50.0);

        let report = evaluate(1500.0, 0.0, 1000.0, "0:0,1:100", "y").unwrap();
        assert_eq!(report.progress, 1.0);
        assert_eq!(report.value, 100.0);
    }

    #[test]
    fn test_opacity_map() {
        let report = evaluate(400.0, 0.0, 1000.0, "0:1,0.8:0", "opacity").unwrap();
        assert!((report.value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(evaluate(0.0, 0.0, 1000.0, "0:0", "y").is_err());
        assert!(evaluate(0.0, 0.0, 1000.0, "0:0,1:1", "rotate").is_err());
        assert!(evaluate(0.0, 100.0, 100.0, "0:0,1:1", "y").is_err());
    }
}
