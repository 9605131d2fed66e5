use crate::color::{Hsv, ParseHsvError};
use crate::coords::Point;
use crate::harmony::Harmony;
use std::str::FromStr;
use thiserror::Error;

/// Everything that can happen to a wheel, independent of where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelEvent {
    PointerDown,
    /// Absolute pointer position in pixel space.
    PointerMove(Point),
    PointerUp,
    SetColor(Hsv),
    SyncColor(Hsv),
    SetHarmony(Harmony),
    Resize(f64),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseEventError {
    #[error("Empty event")]
    Empty,
    #[error("Unknown event '{0}'")]
    Unknown(String),
    #[error("Event '{0}' needs an argument")]
    MissingArgument(String),
    #[error("Event '{0}' takes no argument")]
    UnexpectedArgument(String),
    #[error("Invalid point '{0}', expected 'x,y'")]
    Point(String),
    #[error("Invalid number '{0}'")]
    Number(String),
    #[error(transparent)]
    Color(#[from] ParseHsvError),
    #[error("Unknown harmony '{0}'")]
    Harmony(String),
}

/// Parses `x,y`, allowing spaces around either coordinate.
pub fn parse_point(s: &str) -> Result<Point, ParseEventError> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| ParseEventError::Point(s.to_string()))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| ParseEventError::Point(s.to_string()))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

impl FromStr for WheelEvent {
    type Err = ParseEventError;

    /// One event per line: `down`, `move x,y`, `up`, `color h,s[,v]`, `sync h,s[,v]`,
    /// `harmony <name>` or `resize <radius>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ParseEventError::Empty)?;
        let arg = words.collect::<Vec<_>>().join("");
        let no_arg = |event: Self| {
            arg.is_empty()
                .then_some(event)
                .ok_or_else(|| ParseEventError::UnexpectedArgument(verb.to_string()))
        };
        let need_arg = || {
            (!arg.is_empty())
                .then_some(arg.as_str())
                .ok_or_else(|| ParseEventError::MissingArgument(verb.to_string()))
        };

        match verb.to_ascii_lowercase().as_str() {
            "down" => no_arg(Self::PointerDown),
            "up" => no_arg(Self::PointerUp),
            "move" => Ok(Self::PointerMove(parse_point(need_arg()?)?)),
            "color" => Ok(Self::SetColor(need_arg()?.parse()?)),
            "sync" => Ok(Self::SyncColor(need_arg()?.parse()?)),
            "harmony" => {
                let name = need_arg()?;
                Harmony::from_str(name)
                    .map(Self::SetHarmony)
                    .map_err(|_| ParseEventError::Harmony(name.to_string()))
            }
            "resize" => {
                let radius = need_arg()?;
                radius
                    .parse()
                    .map(Self::Resize)
                    .map_err(|_| ParseEventError::Number(radius.to_string()))
            }
            _ => Err(ParseEventError::Unknown(verb.to_string())),
        }
    }
}
