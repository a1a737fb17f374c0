use crate::error::{ReportError, Result};
use log::error;
use plotters::prelude::RGBColor;

pub static FONT_SIZE: i32 = 22;
pub static TITLE_FONT_SIZE: i32 = 28;
pub static STROKE_WIDTH: u32 = 3;
pub static MARKER_SIZE: i32 = 5;

pub fn get_color_from_label(label: &str) -> Result<RGBColor> {
    match label {
        "actual" => Ok(RGBColor(1, 6, 130)),
        "ideal" => Ok(RGBColor(214, 39, 40)),
        "grid" => Ok(RGBColor(220, 220, 220)),
        _ => {
            error!("unrecognized label for color (label={label})");
            Err(ReportError::Render(format!(
                "unrecognized color label (label={label})"
            )))
        }
    }
}
