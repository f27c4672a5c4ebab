use anyhow::{Context, Result, bail};
use colored::Colorize;
use folio_core::{
    Choreography, Frame, Portfolio, ScrollTracker, Sections, StaticViewport, ViewportObserver,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Heights used by `folio track` when no layout is given
pub const DEFAULT_LAYOUT: &str = "hero=900,about=800,projects=1200,skills=1000,contact=900";
pub const DEFAULT_VIEWPORT: f64 = 800.0;

/// Parse `id=height,id=height,...` into stacked sections
pub fn parse_layout(spec: &str) -> Result<Vec<(String, f64)>> {
    let mut layout = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((id, height)) = part.split_once('=') else {
            bail!("Invalid layout entry: {} (expected id=height)", part);
        };
        let height: f64 = height
            .trim()
            .parse()
            .with_context(|| format!("Invalid height for {}: {}", id, height))?;
        if height < 0.0 {
            bail!("Height for {} must not be negative", id);
        }
        layout.push((id.trim().to_string(), height));
    }
    if layout.is_empty() {
        bail!("Layout is empty");
    }
    Ok(layout)
}

#[derive(Debug, Serialize)]
pub struct Band {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Serialize)]
pub struct TrackReport {
    pub offset: f64,
    pub active: String,
    pub scrolled: bool,
    pub bands: Vec<Band>,
}

/// Run the scroll tracker from the top of the page down to `offset`
pub fn track(
    sections: Sections,
    layout: &[(String, f64)],
    viewport_height: f64,
    header_offset: f64,
    threshold: f64,
    offset: f64,
) -> TrackReport {
    let stacked: Vec<(&str, f64)> = layout.iter().map(|(id, h)| (id.as_str(), *h)).collect();
    let mut viewport = StaticViewport::stacked(&stacked, viewport_height);
    let mut tracker = ScrollTracker::new(sections, header_offset, threshold);

    viewport.scroll_to(offset);
    tracker.update(&viewport);

    let bands = tracker
        .sections()
        .ids()
        .filter_map(|id| {
            let bounds = viewport.section_bounds(id)?;
            let top = bounds.top - header_offset;
            Some(Band {
                id: id.to_string(),
                top,
                bottom: top + bounds.height,
            })
        })
        .collect();

    let state = tracker.state();
    TrackReport {
        offset: state.offset,
        active: state.active.clone(),
        scrolled: state.scrolled,
        bands,
    }
}

pub fn print_track(report: &TrackReport, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        );
        return Ok(());
    }

    let scrolled = if report.scrolled { "scrolled" } else { "at top" };
    println!(
        "offset {}: {} ({})",
        report.offset,
        format!("active {}", report.active).green().bold(),
        scrolled.dimmed()
    );
    for band in &report.bands {
        let line = format!("  {:<10} {:>8.1} .. {:<8.1}", band.id, band.top, band.bottom);
        if band.id == report.active {
            println!("{}", line.green());
        } else {
            println!("{}", line.dimmed());
        }
    }
    Ok(())
}

/// Frame values keyed by target, then by property name
pub type FrameReport = BTreeMap<String, BTreeMap<String, f64>>;

pub fn sample_timeline(portfolio: &Portfolio, name: &str, at: f64) -> Result<FrameReport> {
    let choreography = Choreography::for_portfolio(portfolio);
    let Some(timeline) = choreography.timeline(name) else {
        bail!(
            "Unknown timeline: {}. Run `folio timeline --list` to see the names",
            name
        );
    };
    Ok(frame_report(&timeline.sample(at.max(0.0))))
}

pub fn timeline_names(portfolio: &Portfolio) -> Vec<String> {
    let choreography = Choreography::for_portfolio(portfolio);
    std::iter::once("hero".to_string())
        .chain(choreography.reveals().map(|(name, _, _)| name.to_string()))
        .collect()
}

fn frame_report(frame: &Frame) -> FrameReport {
    frame
        .iter()
        .map(|(target, props)| {
            let values = props
                .iter()
                .map(|(property, value)| (property.to_string(), value))
                .collect();
            (target.clone(), values)
        })
        .collect()
}

pub fn print_frame(report: &FrameReport, at: f64, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialize frame")?
        );
        return Ok(());
    }

    println!("{}", format!("t = {:.2}s", at).cyan().bold());
    for (target, values) in report {
        let props: Vec<String> = values
            .iter()
            .map(|(name, value)| format!("{}={:.3}", name, value))
            .collect();
        println!("  {:<22} {}", target, props.join(" "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let layout = parse_layout("hero=900, about = 800").unwrap();
        assert_eq!(
            layout,
            vec![("hero".to_string(), 900.0), ("about".to_string(), 800.0)]
        );
        assert!(parse_layout("hero").is_err());
        assert!(parse_layout("hero=tall").is_err());
        assert!(parse_layout("hero=-1").is_err());
        assert!(parse_layout(" , ").is_err());
    }

    #[test]
    fn test_track_default_layout() {
        let layout = parse_layout(DEFAULT_LAYOUT).unwrap();
        let report = track(Sections::portfolio(), &layout, 800.0, 100.0, 50.0, 2800.0);
        assert_eq!(report.active, "skills");
        assert!(report.scrolled);
        assert_eq!(report.bands.len(), 5);
        assert_eq!(report.bands[3].top, 2800.0);
        assert_eq!(report.bands[3].bottom, 3800.0);
    }

    #[test]
    fn test_track_partial_layout_keeps_first_section() {
        let layout = parse_layout("about=800").unwrap();
        let report = track(Sections::portfolio(), &layout, 800.0, 100.0, 50.0, 5000.0);
        assert_eq!(report.active, "hero");
        assert_eq!(report.bands.len(), 1);
    }

    #[test]
    fn test_sample_hero_at_start() {
        let portfolio = Portfolio::builtin().unwrap();
        let report = sample_timeline(&portfolio, "hero", 0.0).unwrap();
        assert_eq!(report["hero-cta"]["opacity"], 0.0);
        assert_eq!(report["hero-cta"]["y"], 50.0);
        assert!(sample_timeline(&portfolio, "blog", 0.0).is_err());
    }

    #[test]
    fn test_timeline_names() {
        let portfolio = Portfolio::builtin().unwrap();
        let names = timeline_names(&portfolio);
        assert_eq!(names[0], "hero");
        assert!(names.contains(&"about".to_string()));
        assert!(names.contains(&"skill-bar-0".to_string()));
    }
}
