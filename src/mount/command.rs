//! LX200-style command dispatch.
//!
//! The protocol layer frames and lexes commands; this module maps the
//! two-letter command and its parameter onto mount operations.

use core::f64::consts::PI;
use core::fmt::Write;

use heapless::String;
use libm::{fabs, round};

use super::state::{GuideDirection, TrackingRate};
use super::Mount;
use crate::axis::AxisHardware;
use crate::error::{CommandError, CommandResult};
use crate::transform::{normalize_2pi, PointingModel, SiderealClock};

/// Reply to a protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply text, without framing.
    pub text: String<64>,
    /// Send the text without the `#` terminator.
    pub suppress_frame: bool,
    /// Reply with `1`/`0` for success/failure instead of `text`.
    pub numeric: bool,
}

impl Default for Reply {
    fn default() -> Self {
        Self { text: String::new(), suppress_frame: false, numeric: true }
    }
}

impl Reply {
    fn text(&mut self) -> &mut String<64> {
        self.numeric = false;
        &mut self.text
    }
}

/// Parse `HH:MM:SS` or `HH:MM.T` hours into radians.
pub fn parse_hms(s: &str) -> Option<f64> {
    let (h, m, sec) = split_sexagesimal(s.trim())?;
    if h < 0.0 || h >= 24.0 || m >= 60.0 || sec >= 60.0 {
        return None;
    }
    Some((h + m / 60.0 + sec / 3600.0) * PI / 12.0)
}

/// Parse `sDD*MM:SS`, `sDD*MM` or `DDD*MM:SS` degrees into radians.
pub fn parse_dms(s: &str) -> Option<f64> {
    let s = s.trim();
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (d, m, sec) = split_sexagesimal(body)?;
    if d < 0.0 || d > 360.0 || m >= 60.0 || sec >= 60.0 {
        return None;
    }
    let degrees = d + m / 60.0 + sec / 3600.0;
    Some(if negative { -degrees } else { degrees }.to_radians())
}

fn split_sexagesimal(s: &str) -> Option<(f64, f64, f64)> {
    let mut fields = s.split(|c| matches!(c, ':' | '*' | '\'' | '\u{b0}' | '\u{df}'));
    let first: f64 = fields.next()?.trim().parse().ok()?;
    let minutes: f64 = match fields.next() {
        Some(f) => f.trim().parse().ok()?,
        None => 0.0,
    };
    let seconds: f64 = match fields.next() {
        Some(f) => f.trim().parse().ok()?,
        None => 0.0,
    };
    if fields.next().is_some() || minutes < 0.0 || seconds < 0.0 {
        return None;
    }
    Some((first, minutes, seconds))
}

/// Format radians as `HH:MM:SS` hours.
pub fn format_hms(angle: f64, out: &mut String<64>) {
    let total = round(normalize_2pi(angle) * 12.0 / PI * 3600.0) as i64 % (24 * 3600);
    let _ = write!(out, "{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60);
}

/// Format radians as `sDD*MM:SS`, or `DDD*MM:SS` when `signed` is false.
pub fn format_dms(angle: f64, signed: bool, out: &mut String<64>) {
    let degrees = angle.to_degrees();
    let total = round(fabs(degrees) * 3600.0) as i64;
    let (d, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    if signed {
        let sign = if degrees < 0.0 && total > 0 { '-' } else { '+' };
        let _ = write!(out, "{}{:02}*{:02}:{:02}", sign, d, m, s);
    } else {
        let _ = write!(out, "{:03}*{:02}:{:02}", d, m, s);
    }
}

fn parse_guide(parameter: &str) -> Option<(GuideDirection, u32)> {
    let mut chars = parameter.chars();
    let direction = match chars.next()?.to_ascii_lowercase() {
        'n' => GuideDirection::North,
        's' => GuideDirection::South,
        'e' => GuideDirection::East,
        'w' => GuideDirection::West,
        _ => return None,
    };
    let duration: u32 = chars.as_str().trim().parse().ok()?;
    Some((direction, duration))
}

impl<H: AxisHardware, C: SiderealClock, M: PointingModel> Mount<H, C, M> {
    /// Handle one protocol command.
    ///
    /// Returns `Ok(false)` when `command` is not a mount command.
    pub fn command(&mut self, command: &str, parameter: &str, reply: &mut Reply) -> CommandResult<bool> {
        match command {
            "Sr" => {
                self.pending.r = parse_hms(parameter).ok_or(CommandError::ParamForm)?;
            }
            "Sd" => {
                let d = parse_dms(parameter).ok_or(CommandError::ParamForm)?;
                if fabs(d) > PI / 2.0 {
                    return Err(CommandError::ParamRange);
                }
                self.pending.d = d;
            }
            "Gr" => format_hms(self.current_native().r, reply.text()),
            "Gd" => format_dms(self.current_native().d, true, reply.text()),
            "GR" => format_hms(self.pending.r, reply.text()),
            "GD" => format_dms(self.pending.d, true, reply.text()),
            "GA" => format_dms(self.current_native().a, true, reply.text()),
            "GZ" => format_dms(normalize_2pi(self.current_native().z), false, reply.text()),
            "MS" => {
                let target = self.equ_from_ra_dec(self.pending.r, self.pending.d);
                let code = match self.goto_equ(&target) {
                    Ok(()) => 0,
                    Err(e) => e.goto_code(),
                };
                let _ = write!(reply.text(), "{}", code);
                reply.suppress_frame = true;
            }
            "CM" => {
                let target = self.equ_from_ra_dec(self.pending.r, self.pending.d);
                self.sync_equ(&target)?;
                let _ = reply.text().push_str("N/A");
            }
            "Q" => {
                self.stop();
                reply.numeric = false;
            }
            "hP" => self.park_goto()?,
            "hQ" => self.park_set()?,
            "hR" => self.park_restore(true)?,
            "hF" => self.reset_home()?,
            "hC" => {
                if self.axis1.has_home_sense() && self.axis2.has_home_sense() {
                    self.find_home()?;
                } else {
                    self.return_home()?;
                }
            }
            "Te" => self.set_tracking(true)?,
            "Td" => self.set_tracking(false)?,
            "TQ" => self.set_tracking_rate(TrackingRate::Sidereal)?,
            "TL" => self.set_tracking_rate(TrackingRate::Lunar)?,
            "TS" => self.set_tracking_rate(TrackingRate::Solar)?,
            "TK" => self.set_tracking_rate(TrackingRate::King)?,
            "Mg" => {
                let (direction, duration) = parse_guide(parameter).ok_or(CommandError::ParamForm)?;
                self.guide(direction, self.config.guide_rate, duration)?;
                reply.numeric = false;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
