//! Shaping raw stick input into movement goals.
//!
//! Input is read from [`LocomotionInput`], turned into a gait and a speed from the
//! [`SpeedTable`], and written out as a [`MovementGoal`].

use bevy_ecs::prelude::*;
use bevy_log::{debug, trace};
use bevy_math::prelude::*;
use bevy_reflect::Reflect;

use wistchze_core::goals::{Grounded, MovementGoal, ObservedVelocity};
use wistchze_core::interp::lerp;

/// How the analog stick maps to speed and gait
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum AnalogStickBehavior {
    /// Any deflection moves at full speed of the selected gait
    #[default]
    FixedSpeedSingleGait,
    /// Full speed, but a light deflection walks and a strong one runs
    FixedSpeedWalkRun,
    /// Speed follows deflection within the selected gait
    VariableSpeedSingleGait,
    /// Speed follows deflection, and a strong deflection runs
    VariableSpeedWalkRun,
}

impl AnalogStickBehavior {
    #[must_use]
    #[inline]
    pub fn is_fixed_speed(self) -> bool {
        matches!(self, Self::FixedSpeedSingleGait | Self::FixedSpeedWalkRun)
    }

    #[must_use]
    #[inline]
    pub fn is_walk_run(self) -> bool {
        matches!(self, Self::FixedSpeedWalkRun | Self::VariableSpeedWalkRun)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum Gait {
    Walk,
    #[default]
    Run,
    Sprint,
}

/// Top speeds of one gait depending on where the character moves relative to where it faces
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GaitSpeeds {
    pub forward: f32,
    pub strafe: f32,
    pub backward: f32,
}

impl GaitSpeeds {
    #[must_use]
    pub const fn new(forward: f32, strafe: f32, backward: f32) -> Self {
        Self {
            forward,
            strafe,
            backward,
        }
    }

    /// The same speed in every direction
    #[must_use]
    pub const fn uniform(speed: f32) -> Self {
        Self::new(speed, speed, speed)
    }

    /// Speed for a value of [`strafe_speed_map`]: 0 is forward, 1 strafing and 2 backward
    #[must_use]
    pub fn speed_for(&self, strafe_map: f32) -> f32 {
        let strafe_map = strafe_map.clamp(0., 2.);
        if strafe_map <= 1. {
            lerp(self.forward, self.strafe, strafe_map)
        } else {
            lerp(self.strafe, self.backward, strafe_map - 1.)
        }
    }
}

/// Every gait's speeds, plus crouching
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SpeedTable {
    pub walk: GaitSpeeds,
    pub run: GaitSpeeds,
    pub sprint: GaitSpeeds,
    pub crouch: GaitSpeeds,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            walk: GaitSpeeds::new(200., 180., 150.),
            run: GaitSpeeds::new(500., 350., 300.),
            sprint: GaitSpeeds::uniform(700.),
            crouch: GaitSpeeds::new(225., 200., 180.),
        }
    }
}

impl SpeedTable {
    #[must_use]
    pub fn speeds(&self, gait: Gait, crouching: bool) -> GaitSpeeds {
        if crouching {
            return self.crouch;
        }

        match gait {
            Gait::Walk => self.walk,
            Gait::Run => self.run,
            Gait::Sprint => self.sprint,
        }
    }
}

/// Per character locomotion settings
#[derive(Debug, Component, Clone, Copy, PartialEq, Reflect)]
pub struct LocomotionConfig {
    pub stick_behavior: AnalogStickBehavior,
    /// Deflection at which walk-run behaviors switch from walking to running
    pub analog_move_threshold: f32,
    /// Gait used by the single gait behaviors
    pub gait: Gait,
    pub speeds: SpeedTable,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            stick_behavior: AnalogStickBehavior::default(),
            analog_move_threshold: 0.7,
            gait: Gait::Run,
            speeds: SpeedTable::default(),
        }
    }
}

/// What the controlling player or AI wants this frame.
///
/// `stick` is in input space: x is right and y is forward.
#[derive(Debug, Component, Clone, Copy, Default, PartialEq, Reflect)]
pub struct LocomotionInput {
    pub stick: Vec2,
    pub wants_sprint: bool,
    pub wants_crouch: bool,
}

/// Locomotion state carried between frames
#[derive(Debug, Component, Clone, Copy, Default, PartialEq, Reflect)]
pub struct LocomotionState {
    pub gait: Gait,
    pub crouching: bool,
    pub was_on_ground: bool,
    /// Only true on the frame the character touched down
    pub just_landed: bool,
    /// Velocity right before the last landing
    pub land_velocity: Vec3,
    pub last_velocity: Vec3,
}

/// The components to let an entity be driven by locomotion input
#[derive(Bundle, Default)]
pub struct LocomotionBundle {
    pub config: LocomotionConfig,
    pub input: LocomotionInput,
    pub state: LocomotionState,
    pub movement_goal: MovementGoal,
}

/// Scale raw stick input according to `behavior`.
///
/// Variable speed behaviors pass the input through. Fixed speed ones only keep its direction, and
/// zero input stays zero.
#[must_use]
#[inline]
pub fn movement_input_scale(input: Vec2, behavior: AnalogStickBehavior) -> Vec2 {
    if behavior.is_fixed_speed() {
        input.normalize_or_zero()
    } else {
        input
    }
}

/// Map the direction of `input` to `[0, 2]`: 0 straight ahead, 1 to either side, 2 straight back
#[must_use]
pub fn strafe_speed_map(input: Vec2) -> f32 {
    // angle away from forward (+y), either way round
    let angle = input.x.atan2(input.y).abs().to_degrees();
    (angle / 90.).clamp(0., 2.)
}

/// Which gait the input asks for
#[must_use]
pub fn select_gait(config: &LocomotionConfig, input: &LocomotionInput) -> Gait {
    if input.wants_sprint {
        Gait::Sprint
    } else if config.stick_behavior.is_walk_run() {
        if input.stick.length() < config.analog_move_threshold {
            Gait::Walk
        } else {
            Gait::Run
        }
    } else {
        config.gait
    }
}

/// The velocity `input` asks for, in the character's local frame (forward is -z)
#[must_use]
pub fn movement_goal(
    config: &LocomotionConfig,
    input: &LocomotionInput,
    gait: Gait,
    crouching: bool,
) -> Vec3 {
    let scaled = movement_input_scale(input.stick, config.stick_behavior);
    if scaled == Vec2::ZERO {
        return Vec3::ZERO;
    }

    let speed = config
        .speeds
        .speeds(gait, crouching)
        .speed_for(strafe_speed_map(scaled));
    let velocity = scaled * speed;

    Vec3::new(velocity.x, 0., -velocity.y)
}

/// Keep track of landings from the host's grounded flag.
///
/// Should run before [`update_locomotion`] so it sees this frame's landing.
pub fn track_landing(
    mut characters: Query<(
        Entity,
        &mut LocomotionState,
        &Grounded,
        Option<&ObservedVelocity>,
    )>,
) {
    for (entity, mut state, grounded, velocity) in characters.iter_mut() {
        let on_ground = **grounded;

        state.just_landed = on_ground && !state.was_on_ground;
        if state.just_landed {
            state.land_velocity = state.last_velocity;
            debug!("{:?} landed at {}", entity, state.land_velocity);
        }
        state.was_on_ground = on_ground;

        if let Some(velocity) = velocity {
            state.last_velocity = **velocity;
        }
    }
}

/// Turn locomotion input into gait and movement goals
pub fn update_locomotion(
    mut characters: Query<(
        &LocomotionConfig,
        &LocomotionInput,
        &mut LocomotionState,
        &mut MovementGoal,
    )>,
) {
    for (config, input, mut state, mut goal) in characters.iter_mut() {
        let gait = select_gait(config, input);
        if gait != state.gait {
            trace!("gait {:?} -> {:?}", state.gait, gait);
            state.gait = gait;
        }
        state.crouching = input.wants_crouch;

        let new_goal = movement_goal(config, input, state.gait, state.crouching);
        if goal.0 != new_goal {
            goal.0 = new_goal;
        }
    }
}
