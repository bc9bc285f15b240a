use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use bench::Pattern;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use quicksort::{SortVariant, variant_name};
use serde::Serialize;

use crate::config::Config;
use crate::runner::Measurement;

#[derive(Debug, Serialize)]
pub struct Report {
    pub runs: usize,
    pub seed: u64,
    pub pattern: Pattern,
    pub results: Vec<Measurement>,
}

impl Report {
    pub fn new(config: &Config, results: Vec<Measurement>) -> Self {
        Self {
            runs: config.runs,
            seed: config.seed,
            pattern: config.pattern,
            results,
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("creating report file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("writing report file {}", path.display()))?;
        Ok(())
    }
}

/// Markdown-style table: method, array size, mean seconds.
pub fn render_table(results: &[Measurement], runs: usize) -> String {
    let headers = [
        "Method".to_owned(),
        "Array Size".to_owned(),
        format!("Avg Time over {runs} runs"),
    ];
    let rows: Vec<[String; 3]> = results
        .iter()
        .map(|m| {
            [
                m.variant.to_string(),
                m.size.to_string(),
                format!("{:.4}s", m.avg_secs),
            ]
        })
        .collect();

    let mut widths = headers.each_ref().map(|h| h.len());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    out.push('|');
    for (cell, &w) in cells.iter().zip(widths) {
        out.push_str(&format!(" {cell:<w$} |"));
    }
    out.push('\n');
}

const PLOT_SIZE: (u32, u32) = (1280, 720);

struct Curve {
    variant: SortVariant,
    points: Vec<(f64, f64)>,
}

/// One (size, mean seconds) polyline per variant, in first-seen order.
fn curves(results: &[Measurement]) -> Vec<Curve> {
    let mut curves: Vec<Curve> = Vec::new();
    for m in results {
        let point = (m.size as f64, m.avg_secs);
        match curves.iter_mut().find(|c| c.variant == m.variant) {
            Some(curve) => curve.points.push(point),
            None => curves.push(Curve {
                variant: m.variant,
                points: vec![point],
            }),
        }
    }
    for curve in &mut curves {
        curve.points.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    curves
}

/// Plots average time against array size, one line per variant.
///
/// A `.svg` path gets vector output, anything else a PNG. When text cannot be
/// rendered (no usable fonts on the host) the chart is redrawn with lines and
/// markers only.
pub fn render_plot<P: AsRef<Path>>(results: &[Measurement], path: P) -> Result<()> {
    let path = path.as_ref();
    let curves = curves(results);
    if curves.is_empty() {
        anyhow::bail!("no measurements to plot");
    }

    if let Err(err) = draw_to(path, &curves, true) {
        log::warn!(
            "labelled plot {} failed ({err:#}); drawing without text",
            path.display()
        );
        draw_to(path, &curves, false)?;
    }
    Ok(())
}

fn draw_to(path: &Path, curves: &[Curve], labelled: bool) -> Result<()> {
    let svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    let drawn = if svg {
        let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
        draw_chart(root, curves, labelled).map_err(|e| anyhow::anyhow!("{e}"))
    } else {
        let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
        draw_chart(root, curves, labelled).map_err(|e| anyhow::anyhow!("{e}"))
    };
    drawn.with_context(|| format!("writing plot {}", path.display()))
}

fn draw_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    curves: &[Curve],
    labelled: bool,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let points = || curves.iter().flat_map(|c| c.points.iter().copied());
    let x_max = points().map(|p| p.0).fold(1.0, f64::max) * 1.05;
    let y_max = points().map(|p| p.1).fold(1e-6, f64::max) * 1.1;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if labelled {
        builder
            .caption("Quicksort: average time vs array size", ("sans-serif", 28).into_font())
            .x_label_area_size(45)
            .y_label_area_size(80);
    }
    let mut chart = builder.build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    if labelled {
        chart
            .configure_mesh()
            .x_desc("Array Size")
            .y_desc("Average Time (s)")
            .draw()?;
    }

    for (i, curve) in curves.iter().enumerate() {
        let style = Palette99::pick(i).stroke_width(2);
        let series = chart.draw_series(LineSeries::new(curve.points.iter().copied(), style))?;
        if labelled {
            series
                .label(variant_name(curve.variant))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
        chart.draw_series(
            curve
                .points
                .iter()
                .map(|&p| Circle::new(p, 3, style.filled())),
        )?;
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
