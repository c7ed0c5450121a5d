use std::path::Path;

use anyhow::{bail, Result};
use plotters::prelude::*;

use crate::matrix::AbundanceMatrix;

const TITLE_HEIGHT: i32 = 50;
const LABEL_WIDTH: i32 = 150;
const BOTTOM_LABEL_HEIGHT: i32 = 36;
const CELL_WIDTH: i32 = 96;
const CELL_HEIGHT: i32 = 44;
const MARGIN: i32 = 20;
const COLORBAR_WIDTH: i32 = 24;
const COLORBAR_GAP: i32 = 36;
const COLORBAR_LABEL_WIDTH: i32 = 56;

/// Viridis-style gradient over `t` in `[0, 1]`.
fn gradient(t: f64) -> RGBColor {
    let anchors: [(f64, (u8, u8, u8)); 5] = [
        (0.00, (68, 1, 84)),
        (0.25, (59, 82, 139)),
        (0.50, (33, 145, 140)),
        (0.75, (94, 201, 98)),
        (1.00, (253, 231, 37)),
    ];

    let t = t.clamp(0.0, 1.0);
    for window in anchors.windows(2) {
        let (t0, (r0, g0, b0)) = window[0];
        let (t1, (r1, g1, b1)) = window[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return RGBColor(
                (r0 as f64 + f * (r1 as f64 - r0 as f64)) as u8,
                (g0 as f64 + f * (g1 as f64 - g0 as f64)) as u8,
                (b0 as f64 + f * (b1 as f64 - b0 as f64)) as u8,
            );
        }
    }
    let (_, (r, g, b)) = anchors[anchors.len() - 1];
    RGBColor(r, g, b)
}

///
/// Render a normalized abundance matrix as an annotated SVG heatmap.
///
/// Rows are TE categories, columns satellite families. Each cell is colored
/// by its value relative to the matrix maximum and annotated with the value
/// as a percentage (two decimals), matching the summary the analysis prints.
///
pub fn render_heatmap(matrix: &AbundanceMatrix, path: &Path) -> Result<()> {
    if matrix.is_empty() {
        bail!("Abundance matrix is empty, nothing to render");
    }

    let n_rows = matrix.row_labels.len() as i32;
    let n_cols = matrix.col_labels.len() as i32;

    let plot_width = n_cols * CELL_WIDTH;
    let plot_height = n_rows * CELL_HEIGHT;
    let total_width =
        LABEL_WIDTH + plot_width + COLORBAR_GAP + COLORBAR_WIDTH + COLORBAR_LABEL_WIDTH + MARGIN;
    let total_height = TITLE_HEIGHT + plot_height + BOTTOM_LABEL_HEIGHT + MARGIN;

    let root =
        SVGBackend::new(path, (total_width as u32, total_height as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    root.draw(&Text::new(
        "TE x satellite overlap abundance (normalized)",
        (LABEL_WIDTH, MARGIN),
        ("sans-serif", 20).into_font().color(&BLACK),
    ))?;

    let max_value = matrix.max_value();

    // row labels (TE categories)
    for (row_idx, label) in matrix.row_labels.iter().enumerate() {
        let y = TITLE_HEIGHT + row_idx as i32 * CELL_HEIGHT + CELL_HEIGHT / 2;
        root.draw(&Text::new(
            label.clone(),
            (MARGIN / 2, y),
            ("sans-serif", 13).into_font().color(&BLACK),
        ))?;
    }

    // column labels (satellite families)
    for (col_idx, label) in matrix.col_labels.iter().enumerate() {
        let x = LABEL_WIDTH + col_idx as i32 * CELL_WIDTH + 4;
        let y = TITLE_HEIGHT + plot_height + 8;
        root.draw(&Text::new(
            label.clone(),
            (x, y),
            ("sans-serif", 13).into_font().color(&BLACK),
        ))?;
    }

    // cells with percentage annotation
    for (row_idx, row) in matrix.values.iter().enumerate() {
        for (col_idx, &value) in row.iter().enumerate() {
            let x0 = LABEL_WIDTH + col_idx as i32 * CELL_WIDTH;
            let y0 = TITLE_HEIGHT + row_idx as i32 * CELL_HEIGHT;

            let t = if max_value > 0.0 {
                value / max_value
            } else {
                0.0
            };
            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + CELL_WIDTH, y0 + CELL_HEIGHT)],
                gradient(t).filled(),
            ))?;

            // keep the annotation readable against the cell background
            let text_color = if t < 0.6 { &WHITE } else { &BLACK };
            root.draw(&Text::new(
                format!("{:.2}%", value * 100.0),
                (x0 + 8, y0 + CELL_HEIGHT / 2 - 6),
                ("sans-serif", 12).into_font().color(text_color),
            ))?;
        }
    }

    // colorbar
    let colorbar_x = LABEL_WIDTH + plot_width + COLORBAR_GAP;
    let steps = 100;
    let step_height = plot_height as f64 / steps as f64;
    for step in 0..steps {
        let y0 = TITLE_HEIGHT as f64 + step as f64 * step_height;
        let t = 1.0 - step as f64 / steps as f64;
        root.draw(&Rectangle::new(
            [
                (colorbar_x, y0 as i32),
                (colorbar_x + COLORBAR_WIDTH, (y0 + step_height) as i32 + 1),
            ],
            gradient(t).filled(),
        ))?;
    }
    root.draw(&Text::new(
        format!("{:.2}%", max_value * 100.0),
        (colorbar_x + COLORBAR_WIDTH + 6, TITLE_HEIGHT),
        ("sans-serif", 12).into_font().color(&BLACK),
    ))?;
    root.draw(&Text::new(
        "0.00%",
        (
            colorbar_x + COLORBAR_WIDTH + 6,
            TITLE_HEIGHT + plot_height - 12,
        ),
        ("sans-serif", 12).into_font().color(&BLACK),
    ))?;

    root.present()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_gradient_endpoints() {
        assert_eq!(gradient(0.0), RGBColor(68, 1, 84));
        assert_eq!(gradient(1.0), RGBColor(253, 231, 37));
        // out-of-range values clamp instead of wrapping
        assert_eq!(gradient(-1.0), gradient(0.0));
        assert_eq!(gradient(2.0), gradient(1.0));
    }

    #[rstest]
    fn test_render_writes_svg() {
        let matrix = AbundanceMatrix {
            row_labels: vec!["LTR/Copia".to_string(), "LTR/Gypsy".to_string()],
            col_labels: vec!["Cen155".to_string()],
            values: vec![vec![0.25], vec![0.5]],
        };

        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("heatmap.svg");
        render_heatmap(&matrix, &out).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("<svg") || content.contains("<svg"));
        assert!(content.contains("Cen155"));
    }

    #[rstest]
    fn test_render_empty_matrix_is_error() {
        let matrix = AbundanceMatrix {
            row_labels: vec![],
            col_labels: vec![],
            values: vec![],
        };

        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("heatmap.svg");
        assert!(render_heatmap(&matrix, &out).is_err());
    }
}
