//! Animation driver: the continuous-time primitives the control is animated with.
//!
//! The engine never interpolates values itself. It asks an [`AnimationDriver`] to
//! move a [`Channel`] toward a target and reads the instantaneous value back when
//! it builds a frame. [`Timeline`] is the frame-stepped implementation used by the
//! desktop host and by the tests.

use std::time::Duration;
use strum::{EnumCount, EnumIter};

/// Independently animated values owned by the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Channel {
    /// Live vertical drag offset, relative to the drag baseline.
    OffsetY,
    Translate,
    Rotate,
    Scale,
}

impl Channel {
    pub fn as_index(&self) -> usize {
        *self as usize
    }
}

/// Timing curves for tweens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps a linear fraction in [0, 1] onto the curve.
    pub fn transform(&self, fraction: f64) -> f64 {
        match self {
            Self::Linear => fraction.clamp(0.0, 1.0),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let sample = |p1: f64, p2: f64, s: f64| {
        let u = 1.0 - s;
        3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
    };

    // x(s) is monotonic for control points inside the unit square, so bisect for s
    let (mut lo, mut hi, mut s) = (0.0, 1.0, fraction);
    for _ in 0..48 {
        let x = sample(x1, x2, s);
        if (x - fraction).abs() < 1e-9 {
            break;
        }
        if x > fraction {
            hi = s;
        } else {
            lo = s;
        }
        s = 0.5 * (lo + hi);
    }

    sample(y1, y2, s)
}

/// Damped harmonic spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped, below 1.0 overshoots.
    pub damping_ratio: f64,
    pub stiffness: f64,
    /// Below this speed (units/s) the spring may come to rest.
    pub rest_velocity: f64,
    /// Below this distance from the target the spring may come to rest.
    pub rest_displacement: f64,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: 0.8,
            stiffness: 180.0,
            rest_velocity: 0.05,
            rest_displacement: 0.01,
        }
    }
}

/// Capability to move channels over time.
///
/// Every motion starts from the channel's current instantaneous value, so
/// retargeting a channel mid-flight never makes it jump.
pub trait AnimationDriver {
    fn value(&self, channel: Channel) -> f64;

    /// Places the channel at `value` immediately, cancelling any motion.
    fn set(&mut self, channel: Channel, value: f64);

    fn animate_to(&mut self, channel: Channel, target: f64, easing: Easing, duration: Duration);

    fn spring_to(&mut self, channel: Channel, target: f64);

    /// Steps every running motion by `dt`. Returns whether anything is still moving.
    fn advance(&mut self, dt: Duration) -> bool;

    fn is_animating(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle,
    Tween {
        from: f64,
        to: f64,
        easing: Easing,
        duration: Duration,
        elapsed: Duration,
    },
    Spring {
        target: f64,
        velocity: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct Track {
    value: f64,
    motion: Motion,
}

impl Track {
    const fn at(value: f64) -> Self {
        Self {
            value,
            motion: Motion::Idle,
        }
    }

    fn step(&mut self, dt: Duration, spring: &SpringSpec) {
        match &mut self.motion {
            Motion::Idle => {}
            Motion::Tween {
                from,
                to,
                easing,
                duration,
                elapsed,
            } => {
                *elapsed += dt;
                let linear = elapsed.as_secs_f64() / duration.as_secs_f64();
                if linear >= 1.0 {
                    self.value = *to;
                    self.motion = Motion::Idle;
                } else {
                    self.value = *from + (*to - *from) * easing.transform(linear);
                }
            }
            Motion::Spring { target, velocity } => {
                let damping = 2.0 * spring.damping_ratio * spring.stiffness.sqrt();
                let mut remaining = dt.as_secs_f64();

                // semi-implicit Euler at a fixed substep keeps stiff springs stable
                while remaining > 0.0 {
                    let step = SPRING_SUBSTEP.min(remaining);
                    let force = -spring.stiffness * (self.value - *target) - damping * *velocity;
                    *velocity += force * step;
                    self.value += *velocity * step;
                    remaining -= step;
                }

                if velocity.abs() < spring.rest_velocity
                    && (self.value - *target).abs() < spring.rest_displacement
                {
                    self.value = *target;
                    self.motion = Motion::Idle;
                }
            }
        }
    }
}

const SPRING_SUBSTEP: f64 = 1.0 / 120.0;

/// Frame-stepped driver. The host calls [`AnimationDriver::advance`] once per frame.
#[derive(Debug, Clone)]
pub struct Timeline {
    tracks: [Track; Channel::COUNT],
    spring: SpringSpec,
}

impl Timeline {
    pub fn new(spring: SpringSpec) -> Self {
        Self {
            tracks: [Track::at(0.0); Channel::COUNT],
            spring,
        }
    }

    fn track(&mut self, channel: Channel) -> &mut Track {
        &mut self.tracks[channel.as_index()]
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(SpringSpec::default())
    }
}

impl AnimationDriver for Timeline {
    fn value(&self, channel: Channel) -> f64 {
        self.tracks[channel.as_index()].value
    }

    fn set(&mut self, channel: Channel, value: f64) {
        *self.track(channel) = Track::at(value);
    }

    fn animate_to(&mut self, channel: Channel, target: f64, easing: Easing, duration: Duration) {
        let track = self.track(channel);
        if duration.is_zero() {
            *track = Track::at(target);
            return;
        }
        track.motion = Motion::Tween {
            from: track.value,
            to: target,
            easing,
            duration,
            elapsed: Duration::ZERO,
        };
    }

    fn spring_to(&mut self, channel: Channel, target: f64) {
        let track = self.track(channel);
        let velocity = match track.motion {
            Motion::Spring { velocity, .. } => velocity,
            _ => 0.0,
        };
        track.motion = Motion::Spring { target, velocity };
    }

    fn advance(&mut self, dt: Duration) -> bool {
        let spring = self.spring;
        for track in &mut self.tracks {
            track.step(dt, &spring);
        }
        self.is_animating()
    }

    fn is_animating(&self) -> bool {
        self.tracks.iter().any(|t| t.motion != Motion::Idle)
    }
}
