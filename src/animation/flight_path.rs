use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{FlightPathError, Result};
use crate::math::{Vector3D, VELOCITY_STEP};

use super::waypoint::Waypoint;

/// How positions between two waypoints are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Linear,
    /// Cubic Hermite spline through the waypoints with tangents
    /// `tension * (p[i+1] - p[i-1])`.
    CatmullRom,
}

/// Tension giving the standard Catmull-Rom spline.
const DEFAULT_TENSION: f64 = 0.5;

/// A time-parameterized path through a sequence of waypoints.
///
/// Waypoints are kept sorted by time and the path's duration is the time of
/// the last one. Every query is a pure function of time.
#[derive(Debug, Clone, Serialize)]
pub struct FlightPath {
    waypoints: Vec<Waypoint>,
    interpolation: InterpolationMode,
    is_looping: bool,
    tension: f64,
}

impl FlightPath {
    /// Straight segments between waypoints.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty list or a non-finite waypoint.
    pub fn create_linear(waypoints: Vec<Waypoint>) -> Result<Self> {
        Self::new(waypoints, InterpolationMode::Linear, false, DEFAULT_TENSION)
    }

    /// Catmull-Rom spline through the waypoints.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty list, a non-finite waypoint or tension.
    pub fn create_spline(waypoints: Vec<Waypoint>, tension: f64) -> Result<Self> {
        Self::new(waypoints, InterpolationMode::CatmullRom, false, tension)
    }

    /// Linear path visiting `positions` at a constant `speed` (m/s).
    ///
    /// Waypoint times are the cumulative distance divided by speed.
    ///
    /// # Errors
    ///
    /// Returns [`FlightPathError::InvalidSpeed`] unless `speed` is positive
    /// and finite, or [`FlightPathError::Empty`] for no positions.
    pub fn create_with_speed(positions: &[Vector3D], speed: f64) -> Result<Self> {
        if !(speed > 0.0 && speed.is_finite()) {
            return Err(FlightPathError::InvalidSpeed(speed).into());
        }
        let mut time = 0.0;
        let mut waypoints = Vec::with_capacity(positions.len());
        for (i, p) in positions.iter().enumerate() {
            if i > 0 {
                time += positions[i - 1].distance(p) / speed;
            }
            waypoints.push(Waypoint::new(*p, time).with_speed(speed));
        }
        Self::create_linear(waypoints)
    }

    /// Looping circle of `radius` around `center` at `altitude`, flown once
    /// per `duration` seconds counter-clockwise starting on `+X`.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than 3 points or a non-positive radius or
    /// duration.
    pub fn create_orbit(
        center: Vector3D,
        radius: f64,
        altitude: f64,
        duration: f64,
        points: usize,
    ) -> Result<Self> {
        check_closed_loop(radius, duration, points)?;
        Self::closed_loop(duration, points, |theta| {
            center + Vector3D::new(radius * theta.cos(), radius * theta.sin(), altitude)
        })
    }

    /// Looping figure eight (lemniscate of Gerono) spanning `2 * size` along
    /// X and `size` along Y, crossing itself at `center`.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than 3 points or a non-positive size or
    /// duration.
    pub fn create_figure_eight(
        center: Vector3D,
        size: f64,
        altitude: f64,
        duration: f64,
        points: usize,
    ) -> Result<Self> {
        check_closed_loop(size, duration, points)?;
        Self::closed_loop(duration, points, |theta| {
            let s = theta.sin();
            center + Vector3D::new(size * s, size * s * theta.cos(), altitude)
        })
    }

    /// Samples `shape` at `points` angles over one turn, repeating the first
    /// sample at `duration` so the loop closes.
    fn closed_loop(duration: f64, points: usize, shape: impl Fn(f64) -> Vector3D) -> Result<Self> {
        #[allow(clippy::cast_precision_loss)]
        let n = points as f64;
        let waypoints = (0..=points)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let k = i as f64 / n;
                Waypoint::new(shape(TAU * k), duration * k)
            })
            .collect();
        Self::new(waypoints, InterpolationMode::CatmullRom, true, DEFAULT_TENSION)
    }

    fn new(
        mut waypoints: Vec<Waypoint>,
        interpolation: InterpolationMode,
        is_looping: bool,
        tension: f64,
    ) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(FlightPathError::Empty.into());
        }
        if let Some(wp) = waypoints.iter().find(|w| !w.time.is_finite()) {
            return Err(FlightPathError::NonFiniteTime(wp.time).into());
        }
        if waypoints.iter().any(|w| !w.position.is_finite()) {
            return Err(
                FlightPathError::InvalidParameter("waypoint position is not finite".into()).into(),
            );
        }
        if !tension.is_finite() {
            return Err(FlightPathError::InvalidParameter(format!("tension {tension}")).into());
        }
        waypoints.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self {
            waypoints,
            interpolation,
            is_looping,
            tension,
        })
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    #[must_use]
    pub fn tension(&self) -> f64 {
        self.tension
    }

    /// Time of the last waypoint.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.waypoints[self.waypoints.len() - 1].time
    }

    /// Sum of straight-line distances between consecutive waypoints.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].position.distance(&w[1].position))
            .sum()
    }

    /// Maps a query time onto the path: looping paths wrap times past the
    /// end, everything else is clamped to `[0, total_duration]`.
    fn effective_time(&self, time: f64) -> f64 {
        let total = self.total_duration();
        if self.is_looping && total > 0.0 && time > total {
            time % total
        } else {
            time.clamp(0.0, total.max(0.0))
        }
    }

    /// Index of the segment `[i, i + 1]` bracketing `time`, or `None` when
    /// `time` lies outside the waypoints.
    fn segment_at(&self, time: f64) -> Option<usize> {
        self.waypoints
            .windows(2)
            .position(|w| time >= w[0].time && time <= w[1].time)
    }

    #[must_use]
    pub fn get_position_at_time(&self, time: f64) -> Vector3D {
        let t = self.effective_time(time);
        let last = self.waypoints.len() - 1;
        let Some(i) = self.segment_at(t) else {
            return if t < self.waypoints[0].time {
                self.waypoints[0].position
            } else {
                self.waypoints[last].position
            };
        };

        let (w1, w2) = (&self.waypoints[i], &self.waypoints[i + 1]);
        let span = w2.time - w1.time;
        if span <= 0.0 {
            return w2.position;
        }
        let u = (t - w1.time) / span;

        match self.interpolation {
            InterpolationMode::Linear => w1.position.lerp(&w2.position, u),
            InterpolationMode::CatmullRom => {
                let p0 = self.waypoints[i.saturating_sub(1)].position;
                let p3 = self.waypoints[(i + 2).min(last)].position;
                catmull_rom(&p0, &w1.position, &w2.position, &p3, self.tension, u)
            }
        }
    }

    /// Forward difference of position over [`VELOCITY_STEP`] seconds.
    ///
    /// At the clamped end of a non-looping path the result is zero.
    #[must_use]
    pub fn get_velocity_at_time(&self, time: f64) -> Vector3D {
        let here = self.get_position_at_time(time);
        let ahead = self.get_position_at_time(time + VELOCITY_STEP);
        (ahead - here) / VELOCITY_STEP
    }

    #[must_use]
    pub fn get_speed_at_time(&self, time: f64) -> f64 {
        self.get_velocity_at_time(time).length()
    }

    /// Direction of horizontal travel in degrees clockwise from `+Y`, in `[0, 360)`.
    #[must_use]
    pub fn get_heading_at_time(&self, time: f64) -> f64 {
        let v = self.get_velocity_at_time(time);
        let heading = v.x.atan2(v.y).to_degrees();
        if heading < 0.0 {
            heading + 360.0
        } else {
            heading
        }
    }

    /// Climb angle in degrees above the horizontal plane.
    #[must_use]
    pub fn get_pitch_at_time(&self, time: f64) -> f64 {
        let v = self.get_velocity_at_time(time);
        v.z.atan2(v.x.hypot(v.y)).to_degrees()
    }

    /// Index of the last waypoint reached at `time`.
    #[must_use]
    pub fn get_current_waypoint_index(&self, time: f64) -> usize {
        let t = self.effective_time(time);
        self.waypoints
            .iter()
            .rposition(|w| w.time <= t)
            .unwrap_or(0)
    }

    /// Fraction of the path's duration elapsed at `time`, in `[0, 1]`.
    #[must_use]
    pub fn get_progress(&self, time: f64) -> f64 {
        let total = self.total_duration();
        if total <= 0.0 {
            return 0.0;
        }
        (self.effective_time(time) / total).clamp(0.0, 1.0)
    }

    /// `samples` positions evenly spaced in time over `[0, total_duration]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_path(&self, samples: usize) -> Vec<Vector3D> {
        match samples {
            0 => Vec::new(),
            1 => vec![self.get_position_at_time(0.0)],
            _ => {
                let step = self.total_duration() / (samples - 1) as f64;
                (0..samples)
                    .map(|k| self.get_position_at_time(step * k as f64))
                    .collect()
            }
        }
    }
}

/// Cubic Hermite interpolation between `p1` and `p2` with Catmull-Rom tangents.
fn catmull_rom(
    p0: &Vector3D,
    p1: &Vector3D,
    p2: &Vector3D,
    p3: &Vector3D,
    tension: f64,
    u: f64,
) -> Vector3D {
    let m1 = (*p2 - *p0) * tension;
    let m2 = (*p3 - *p1) * tension;
    let u2 = u * u;
    let u3 = u2 * u;
    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;
    *p1 * h00 + m1 * h10 + *p2 * h01 + m2 * h11
}

fn check_closed_loop(size: f64, duration: f64, points: usize) -> Result<()> {
    if points < 3 {
        return Err(FlightPathError::InvalidParameter(format!(
            "closed loop needs at least 3 points, got {points}"
        ))
        .into());
    }
    if !(size > 0.0 && size.is_finite()) {
        return Err(FlightPathError::InvalidParameter(format!("size {size} must be positive")).into());
    }
    if !(duration > 0.0 && duration.is_finite()) {
        return Err(
            FlightPathError::InvalidParameter(format!("duration {duration} must be positive"))
                .into(),
        );
    }
    Ok(())
}

/// Step-by-step construction of a [`FlightPath`].
#[derive(Debug, Clone)]
pub struct FlightPathBuilder {
    waypoints: Vec<Waypoint>,
    interpolation: InterpolationMode,
    looping: bool,
    tension: f64,
}

impl Default for FlightPathBuilder {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            interpolation: InterpolationMode::default(),
            looping: false,
            tension: DEFAULT_TENSION,
        }
    }
}

impl FlightPathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.push(waypoint);
        self
    }

    #[must_use]
    pub fn add_waypoint(self, position: Vector3D, time: f64) -> Self {
        self.waypoint(Waypoint::new(position, time))
    }

    #[must_use]
    pub fn add_waypoint_with_speed(self, position: Vector3D, time: f64, speed: f64) -> Self {
        self.waypoint(Waypoint::new(position, time).with_speed(speed))
    }

    #[must_use]
    pub fn interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    #[must_use]
    pub fn tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    /// Sorts the waypoints by time and builds the path.
    ///
    /// # Errors
    ///
    /// Returns an error for no waypoints, a non-finite time or position, or
    /// a non-finite tension.
    pub fn build(self) -> Result<FlightPath> {
        FlightPath::new(self.waypoints, self.interpolation, self.looping, self.tension)
    }
}
