//! A third person camera rig for characters
//!
//! A [`CameraRig`] on the character drives a [`CameraArm`] on a separate entity (usually a child),
//! which carries the camera at its end. Gameplay code talks to rigs by sending [`RigCommand`]s;
//! the rig then interpolates the arm toward the new shoulder or zoom level over the next frames.
//!
//! Rigs and their arms only carry [`TickEnabled`] while something is interpolating, and the
//! simulation step only ever looks at ticking rigs.

#![warn(clippy::unwrap_used)]
#![warn(clippy::perf, clippy::disallowed_types)] // performance warns
#![warn(clippy::pedantic)]
// most bevy systems violate these. Nothing I can do about it at the moment.
#![allow(
    clippy::type_complexity,
    clippy::too_many_arguments,
    clippy::needless_pass_by_value // TODO: separate out system functions from non-system
)]
#![allow(clippy::cast_possible_truncation)]

use bevy_app::{App, Startup, Update};
use bevy_ecs::prelude::*;
use bevy_hierarchy::Children;
use bevy_log::{error, trace, warn};
use bevy_reflect::GetTypeRegistration;
use bevy_time::Time;

use wistchze_core::{CorePlugin, GameplaySet};

pub mod arm;
pub mod config;
pub mod features;
pub mod position;
pub mod rig;

pub use arm::{ArmHandle, CameraArm, TickEnabled};
pub use config::RigConfig;
pub use features::{ActiveFeatures, RigFeature};
pub use position::ShoulderPosition;
pub use rig::{CameraRig, RigError};


/// The systems of [`CameraPlugin`], for ordering against.
///
/// Anything sending [`RigCommand`]s in [`GameplaySet::Input`] should run before
/// [`RigSystem::ApplyCommands`] for them to take effect the same frame.
#[derive(SystemSet, Hash, Debug, Clone, Copy, Eq, PartialEq)]
pub enum RigSystem {
    Attach,
    ApplyCommands,
    Step,
    SyncTransforms,
}

/// What a [`RigCommand`] asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigCommandKind {
    /// Move to the next shoulder
    CyclePosition,
    /// Analog zoom input, e.g. a scroll delta. Positive zooms in
    ZoomInput(f32),
    /// Absolute zoom as a fraction of the allowed range
    ZoomFraction(f32),
}

/// A fire-and-forget request for the rig on `rig`
#[derive(Debug, Clone, Copy, PartialEq, Event)]
pub struct RigCommand {
    pub rig: Entity,
    pub kind: RigCommandKind,
}

impl RigCommand {
    #[must_use]
    pub fn cycle_position(rig: Entity) -> Self {
        Self {
            rig,
            kind: RigCommandKind::CyclePosition,
        }
    }

    #[must_use]
    pub fn zoom_input(rig: Entity, input: f32) -> Self {
        Self {
            rig,
            kind: RigCommandKind::ZoomInput(input),
        }
    }

    #[must_use]
    pub fn zoom_fraction(rig: Entity, fraction: f32) -> Self {
        Self {
            rig,
            kind: RigCommandKind::ZoomFraction(fraction),
        }
    }
}

/// Sent when a freshly spawned rig could not find its arm. This is a setup bug in the host.
#[derive(Debug, Clone, Copy, PartialEq, Event)]
pub struct AttachFailed {
    pub rig: Entity,
    pub error: RigError,
}

/// The components to spawn a rig that drives a known arm entity.
///
/// A lone [`CameraRig`] without an [`ArmHandle`] looks for a [`CameraArm`] among its children
/// instead.
#[derive(Bundle)]
pub struct CameraRigBundle {
    pub rig: CameraRig,
    pub arm: ArmHandle,
}

impl CameraRigBundle {
    #[must_use]
    pub fn new(config: RigConfig, arm: Entity) -> Self {
        Self {
            rig: CameraRig::new(config),
            arm: ArmHandle(arm),
        }
    }
}

/// Attach every newly added rig to its arm, reporting the ones that have none
fn attach_rigs(
    mut rigs: Query<
        (Entity, &mut CameraRig, Option<&ArmHandle>, Option<&Children>),
        Added<CameraRig>,
    >,
    mut arms: Query<&mut CameraArm>,
) -> Vec<AttachFailed> {
    let mut failures = Vec::new();

    for (entity, mut rig, explicit, children) in rigs.iter_mut() {
        let handle = explicit.copied().or_else(|| {
            children
                .and_then(|c| c.iter().find(|child| arms.contains(**child)))
                .map(|child| ArmHandle(*child))
        });

        let Some(handle) = handle else {
            failures.push(AttachFailed {
                rig: entity,
                error: RigError::MissingArm { rig: entity },
            });
            continue;
        };

        match arms.get_mut(*handle) {
            Ok(mut arm) => rig.attach(handle, &mut arm),
            Err(_) => failures.push(AttachFailed {
                rig: entity,
                error: RigError::ArmDestroyed { arm: *handle },
            }),
        }
    }

    failures
}

fn report_attach_failures(
    In(failures): In<Vec<AttachFailed>>,
    mut failed_events: EventWriter<AttachFailed>,
) {
    for failure in failures {
        error!("{:?}: {}", failure.rig, failure.error);
        failed_events.send(failure);
    }
}

/// Enable ticking on a rig and its arm
fn start_ticking(commands: &mut Commands, rig: Entity, arm: Option<ArmHandle>) {
    commands.entity(rig).insert(TickEnabled);

    if let Some(mut arm) = arm.and_then(|a| commands.get_entity(*a)) {
        arm.insert(TickEnabled);
    }
}

/// Disable ticking on a rig and its arm
fn stop_ticking(commands: &mut Commands, rig: Entity, arm: Option<ArmHandle>) {
    commands.entity(rig).remove::<TickEnabled>();

    if let Some(mut arm) = arm.and_then(|a| commands.get_entity(*a)) {
        arm.remove::<TickEnabled>();
    }
}

/// Apply this frame's [`RigCommand`]s, waking up any rig that now has work to do
fn apply_rig_commands(
    mut rig_commands: EventReader<RigCommand>,
    mut rigs: Query<(&mut CameraRig, Option<&TickEnabled>)>,
    arms: Query<(), With<CameraArm>>,
    mut commands: Commands,
) {
    for command in rig_commands.iter() {
        let Ok((mut rig, ticking)) = rigs.get_mut(command.rig) else {
            warn!("{:?} sent to an entity without a camera rig", command);
            continue;
        };

        // an idle rig only learns its arm is gone here
        if let Some(handle) = rig.arm().filter(|handle| !arms.contains(**handle)) {
            warn!(
                "dropping {:?}: {}, detaching",
                command.kind,
                RigError::ArmDestroyed { arm: *handle }
            );
            rig.detach();
            stop_ticking(&mut commands, command.rig, None);
            continue;
        }

        let result = match command.kind {
            RigCommandKind::CyclePosition => rig.cycle_position(),
            RigCommandKind::ZoomInput(input) => rig.apply_zoom_input(input),
            RigCommandKind::ZoomFraction(fraction) => rig.set_zoom_by_fraction(fraction),
        };

        if let Err(e) = result {
            warn!("dropping {:?}: {}", command.kind, e);
            continue;
        }

        if ticking.is_none() && !rig.features().is_empty() {
            trace!("waking rig {:?}", command.rig);
            start_ticking(&mut commands, command.rig, rig.arm());
        }
    }
}

/// Advance every ticking rig, putting the ones that have converged back to sleep
fn step_rigs(
    mut rigs: Query<(Entity, &mut CameraRig), With<TickEnabled>>,
    mut arms: Query<&mut CameraArm>,
    time: Res<Time>,
    mut commands: Commands,
) {
    let delta_seconds = time.delta_seconds();

    for (entity, mut rig) in rigs.iter_mut() {
        let Some(handle) = rig.arm() else {
            stop_ticking(&mut commands, entity, None);
            continue;
        };

        if rig.features().is_empty() {
            stop_ticking(&mut commands, entity, Some(handle));
            continue;
        }

        let Ok(mut arm) = arms.get_mut(*handle) else {
            warn!(
                "rig {:?}: {}, detaching",
                entity,
                RigError::ArmDestroyed { arm: *handle }
            );
            rig.detach();
            stop_ticking(&mut commands, entity, None);
            continue;
        };

        if rig.step(delta_seconds, &mut arm).is_empty() {
            trace!("rig {:?} converged", entity);
            stop_ticking(&mut commands, entity, Some(handle));
        }
    }
}

fn register_types(type_registry: Res<AppTypeRegistry>) {
    let mut type_registry_w = type_registry.write();

    type_registry_w.add_registration(CameraRig::get_type_registration());
    type_registry_w.add_registration(CameraArm::get_type_registration());
    type_registry_w.add_registration(ArmHandle::get_type_registration());
    type_registry_w.add_registration(TickEnabled::get_type_registration());
    type_registry_w.add_registration(RigConfig::get_type_registration());
    type_registry_w.add_registration(ShoulderPosition::get_type_registration());
    type_registry_w.add_registration(ActiveFeatures::get_type_registration());
    type_registry_w.add_registration(RigFeature::get_type_registration());
}

/// A plugin running camera rigs.
///
/// Rigs attach in [`GameplaySet::Setup`], take commands in [`GameplaySet::Input`], interpolate in
/// [`GameplaySet::Simulate`], and cameras are moved to the end of their arms in
/// [`GameplaySet::Completed`].
pub struct CameraPlugin;

impl bevy_app::Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CorePlugin>() {
            app.add_plugins(CorePlugin);
        }

        app.add_event::<RigCommand>()
            .add_event::<AttachFailed>()
            .add_systems(Startup, register_types)
            .add_systems(
                Update,
                (
                    attach_rigs
                        .pipe(report_attach_failures)
                        .in_set(GameplaySet::Setup)
                        .in_set(RigSystem::Attach),
                    apply_rig_commands
                        .in_set(GameplaySet::Input)
                        .in_set(RigSystem::ApplyCommands),
                    step_rigs
                        .in_set(GameplaySet::Simulate)
                        .in_set(RigSystem::Step),
                    arm::sync_arm_transforms
                        .in_set(GameplaySet::Completed)
                        .in_set(RigSystem::SyncTransforms),
                ),
            );
    }
}
