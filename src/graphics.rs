use std::fmt::Debug;
use std::io::{self, Write};
use std::ops::Deref;
use std::str::FromStr;

use colored::Colorize;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, BeginSynchronizedUpdate, ClearType, EndSynchronizedUpdate},
};
use getset::CopyGetters;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::simulation::{SimBody, Simulation};
use crate::vector::Vector2;

/// Mean Earth radius in meters, the reference size for body glyphs.
pub const EARTH_RADIUS: f64 = 6_371_008.771;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Color names accepted in body specs. Anything else is drawn white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString, strum_macros::Display)]
#[strum(ascii_case_insensitive)]
pub enum Palette {
    #[strum(to_string = "white")]
    White,
    #[strum(to_string = "yellow")]
    Yellow,
    #[strum(to_string = "orange")]
    Orange,
    #[strum(to_string = "red")]
    Red,
    #[strum(to_string = "blue")]
    Blue,
    #[strum(to_string = "light blue", serialize = "lightblue")]
    LightBlue,
    #[strum(to_string = "navy")]
    Navy,
    #[strum(to_string = "gray", serialize = "grey")]
    Gray,
    #[strum(
        to_string = "light gray",
        serialize = "lightgray",
        serialize = "light grey",
        serialize = "lightgrey"
    )]
    LightGray,
    #[strum(to_string = "tan")]
    Tan,
    #[strum(to_string = "khaki")]
    Khaki,
    #[strum(to_string = "saddle brown", serialize = "saddlebrown")]
    SaddleBrown,
}

impl Palette {
    pub fn resolve(name: &str) -> Palette {
        Palette::from_str(name.trim()).unwrap_or(Palette::White)
    }

    pub fn color(self) -> Color {
        let (r, g, b) = match self {
            Palette::White => (255, 255, 255),
            Palette::Yellow => (255, 255, 0),
            Palette::Orange => (255, 165, 0),
            Palette::Red => (255, 0, 0),
            Palette::Blue => (0, 0, 255),
            Palette::LightBlue => (173, 216, 230),
            Palette::Navy => (0, 0, 128),
            Palette::Gray => (190, 190, 190),
            Palette::LightGray => (211, 211, 211),
            Palette::Tan => (210, 180, 140),
            Palette::Khaki => (240, 230, 140),
            Palette::SaddleBrown => (139, 69, 19),
        };
        Color::Rgb { r, g, b }
    }
}

/// What part of space is visible and how bodies are scaled.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters, derive_new::new)]
pub struct Viewport {
    #[getset(get_copy = "pub")]
    columns: u16,
    #[getset(get_copy = "pub")]
    rows: u16,
    /// Meters per row.
    distance_scale: f64,
    planet_scale: f64,
}

impl Viewport {
    /// Rows available for the scene; the last row holds the status line.
    fn scene_rows(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    /// Cell for a point given relative to the focus, or `None` off-screen.
    pub fn project(&self, offset: Vector2) -> Option<(u16, u16)> {
        let center_column = f64::from(self.columns / 2);
        let center_row = f64::from(self.scene_rows() / 2);
        let column = (center_column + offset.x() / self.distance_scale * CELL_ASPECT).round();
        let row = (center_row - offset.y() / self.distance_scale).round();

        let on_screen = column >= 0.0
            && row >= 0.0
            && column < f64::from(self.columns)
            && row < f64::from(self.scene_rows());
        on_screen.then(|| (column as u16, row as u16))
    }

    /// Glyph reflecting a body's size relative to Earth.
    pub fn glyph(&self, radius: f64) -> char {
        let size = (radius / EARTH_RADIUS).sqrt() * self.planet_scale;
        match size {
            s if s >= 1.0 => '@',
            s if s >= 0.5 => 'O',
            s if s >= 0.25 => 'o',
            _ => '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub column: u16,
    pub row: u16,
    pub glyph: char,
    pub color: Color,
}

/// Places every visible body on the grid, centered on `focus`.
pub fn compose(simulation: &Simulation, focus: Vector2, viewport: &Viewport) -> Vec<Sprite> {
    simulation
        .iter()
        .filter_map(|(_, body)| {
            viewport
                .project(body.position() - focus)
                .map(|(column, row)| Sprite {
                    column,
                    row,
                    glyph: viewport.glyph(body.radius()),
                    color: Palette::resolve(body.color()).color(),
                })
        })
        .collect()
}

pub fn status_line(simulation: &Simulation, focus_name: &str) -> String {
    format!(
        " t = {:.1} days | focus: {} | bodies: {} | q to quit",
        simulation.elapsed() / 86_400.0,
        focus_name,
        simulation.len()
    )
}

pub fn render<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    sprites: &[Sprite],
    status: &str,
) -> io::Result<()> {
    queue!(out, BeginSynchronizedUpdate, terminal::Clear(ClearType::All))?;
    for sprite in sprites {
        queue!(
            out,
            cursor::MoveTo(sprite.column, sprite.row),
            SetForegroundColor(sprite.color),
            Print(sprite.glyph)
        )?;
    }
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, viewport.rows().saturating_sub(1)),
        Print(status),
        EndSynchronizedUpdate
    )?;
    out.flush()
}

#[derive(Debug, strum_macros::EnumIter, strum_macros::Display)]
pub enum BodyProperty {
    #[strum(to_string = "Mass [kg]")]
    Mass,
    #[strum(to_string = "Radius [m]")]
    Radius,
    #[strum(to_string = "Color")]
    Color,
    #[strum(to_string = "Position [m]")]
    Position,
    #[strum(to_string = "Velocity [m/s]")]
    Velocity,
}

pub fn display_scene_bodies(simulation: &Simulation) {
    simulation.iter().for_each(|(id, body)| {
        info!(" + Body: [{}] ({})", body.name().yellow(), id);
        info!(" +-----------------------------------");
        if Palette::from_str(body.color()).is_err() {
            warn!(" + unknown color [{}], drawing it white", body.color().yellow());
        }
        BodyProperty::iter().for_each(|item| info!("{}", display_body_property(body, item)));
    });
}

fn display_body_property(body: &SimBody, property: BodyProperty) -> String {
    let information: Box<dyn Debug> = match property {
        BodyProperty::Mass => Box::new(body.mass()),
        BodyProperty::Radius => Box::new(body.radius()),
        BodyProperty::Color => Box::new(body.color().clone()),
        BodyProperty::Position => Box::new(body.position()),
        BodyProperty::Velocity => Box::new(body.velocity()),
    };
    format!(
        " + {} : [{:?}]",
        property.to_string().yellow(),
        information.deref()
    )
}
