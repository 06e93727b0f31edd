//! Per-residue plot of the residue table.
//!
//! Four panels (accessible area, buried area, buried area score and solvation energy)
//! share a continuous residue axis. Points are colored by the z-score of the panel's
//! metric, and the first non-binder residue is marked with a dashed line.

use crate::chains::ChainRoles;
use crate::error::{PisaError, Result};
use crate::residues::ResidueRecord;
use plotters::prelude::*;
use std::path::Path;

const METRICS: [&str; 4] = [
    "Solvent Accessible Area",
    "Buried Surface Area",
    "Buried Surface Area Score",
    "Solvation Energy",
];
const SOLVATION_PANEL: usize = 3;

const ACCENT: RGBColor = RGBColor(0x62, 0x4d, 0xa0);
const TITLE: RGBColor = RGBColor(0x2b, 0x21, 0x5f);
const HIGHLIGHT: RGBColor = RGBColor(0xf8, 0x99, 0x1d);
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];
const FONT: &str = "sans-serif";

fn metric(r: &ResidueRecord, panel: usize) -> f64 {
    match panel {
        0 => r.sasa,
        1 => r.bsa,
        2 => r.bsa_score,
        _ => r.solvation_energy,
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> PisaError {
    PisaError::Plot(e.to_string())
}

/// Standardize values to zero mean and unit (population) variance.
/// Constant inputs map to zero.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sd = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    values
        .iter()
        .map(|v| match sd > 0.0 {
            true => (v - mean) / sd,
            false => 0.0,
        })
        .collect()
}

/// Color on the viridis ramp for `t` in `[0, 1]`.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Label of an annotated residue, e.g. `LEU12: ΔG = -1.20 kcal/M`.
pub fn energy_label(r: &ResidueRecord) -> String {
    format!(
        "{}{}: ΔG = {:.2} kcal/M",
        r.id.resn, r.id.resi, r.solvation_energy
    )
}

fn padded_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = match hi - lo {
        d if d > 0.0 => d * 0.1,
        _ => 1.0,
    };
    (lo - pad, hi + pad)
}

/// Draw the residue plot as an SVG file at `path`.
pub fn plot_residues(residues: &[ResidueRecord], roles: &ChainRoles, path: &Path) -> Result<()> {
    if residues.is_empty() {
        return Err(PisaError::Plot(format!(
            "no residues to plot for {}",
            path.display()
        )));
    }

    let x_values: Vec<f64> = residues.iter().map(|r| r.continuous_resi as f64).collect();
    let (x_min, x_max) = padded_range(&x_values);
    let width = ((x_max - x_min) * 6.0).clamp(900.0, 4000.0) as u32;

    // First residue past the binder chains
    let boundary = residues
        .iter()
        .filter(|r| !roles.is_binder(&r.id.chain))
        .map(|r| r.continuous_resi)
        .min()
        .map(|x| x as f64 - 0.5);

    let binder = residues.iter().filter(|r| roles.is_binder(&r.id.chain));
    let lowest = binder
        .clone()
        .min_by(|a, b| a.solvation_energy.total_cmp(&b.solvation_energy));
    let highest = binder.max_by(|a, b| a.solvation_energy.total_cmp(&b.solvation_energy));

    let root = SVGBackend::new(path, (width, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let panels = root.split_evenly((2, 2));

    for (panel_idx, (panel, title)) in panels.iter().zip(METRICS).enumerate() {
        let values: Vec<f64> = residues.iter().map(|r| metric(r, panel_idx)).collect();
        let (y_min, y_max) = padded_range(&values);

        let mut chart = ChartBuilder::on(panel)
            .caption(title, (FONT, 18).into_font().color(&TITLE))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Amino Acid")
            .x_label_formatter(&|x| format!("{x:.0}"))
            .draw()
            .map_err(plot_err)?;

        let z = z_scores(&values);
        let (z_lo, z_hi) = z
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let span = if z_hi > z_lo { z_hi - z_lo } else { 1.0 };
        chart
            .draw_series(residues.iter().zip(values.iter().zip(z.iter())).map(
                |(r, (&v, &zv))| {
                    let color = viridis((zv - z_lo) / span);
                    EmptyElement::at((r.continuous_resi as f64, v))
                        + Circle::new((0, 0), 4, color.filled())
                        + Circle::new((0, 0), 4, BLACK.stroke_width(1))
                },
            ))
            .map_err(plot_err)?;

        if let Some(b) = boundary {
            let dashes = 40;
            let step = (y_max - y_min) / dashes as f64;
            chart
                .draw_series((0..dashes).step_by(2).map(|i| {
                    let y0 = y_min + step * i as f64;
                    PathElement::new(vec![(b, y0), (b, y0 + step)], ACCENT.stroke_width(1))
                }))
                .map_err(plot_err)?;

            let label_y = y_max - (y_max - y_min) * 0.05;
            let style = (FONT, 12).into_font().color(&ACCENT);
            chart
                .draw_series([
                    Text::new("Binder", ((x_min + b) / 2.0, label_y), style.clone()),
                    Text::new("Target", ((b + x_max) / 2.0, label_y), style),
                ])
                .map_err(plot_err)?;
        }

        if panel_idx == SOLVATION_PANEL {
            let style = (FONT, 10).into_font().color(&HIGHLIGHT);
            chart
                .draw_series(lowest.iter().chain(highest.iter()).map(|r| {
                    Text::new(
                        energy_label(r),
                        (r.continuous_resi as f64 + 1.0, r.solvation_energy),
                        style.clone(),
                    )
                }))
                .map_err(plot_err)?;
        }
    }

    root.present().map_err(plot_err)?;
    Ok(())
}
